//! Property-based tests for the classification engine
//!
//! These tests verify invariants that should hold for all inputs:
//! - Quadrant counts always sum to the number of classified samples
//! - Derived rates stay in range and finite
//! - Recall never rises along a sweep
//! - The prefix-count sweep agrees with a full rescan
//! - Every computation is deterministic

use proptest::prelude::*;
use threshold_explorer::data::filter::active_subset;
use threshold_explorer::engine::metrics::Metric;
use threshold_explorer::engine::sweep::sweep_scan;
use threshold_explorer::{
    Axis, AxisRange, ConfusionCounts, EngineConfig, Point, ReferenceState, Sample, ZoomBounds,
    classify, derive, histogram, recompute, sweep,
};

/// Measurements on a coarse grid so ties with thresholds and edges are common.
fn measurement() -> impl Strategy<Value = f64> {
    prop_oneof![
        4 => (0u32..=40).prop_map(|v| v as f64 * 0.25),
        1 => 0.0f64..10.0,
    ]
}

fn sample() -> impl Strategy<Value = Sample> {
    (measurement(), measurement(), proptest::option::of(0i32..4)).prop_map(|(cpm, intensity, state)| {
        Sample {
            name: String::new(),
            cpm,
            intensity,
            state,
        }
    })
}

fn samples() -> impl Strategy<Value = Vec<Sample>> {
    proptest::collection::vec(sample(), 0..60)
}

fn point() -> impl Strategy<Value = Point> {
    (measurement(), measurement()).prop_map(|(c, i)| Point::new(c, i))
}

fn axis() -> impl Strategy<Value = Axis> {
    prop_oneof![Just(Axis::Cpm), Just(Axis::Intensity)]
}

fn counts() -> impl Strategy<Value = ConfusionCounts> {
    (0u64..1000, 0u64..1000, 0u64..1000, 0u64..1000)
        .prop_map(|(tp, fp, tn, fn_count)| ConfusionCounts::new(tp, fp, tn, fn_count))
}

proptest! {
    /// Property: point classification partitions the samples
    #[test]
    fn prop_point_counts_sum_to_sample_count(data in samples(), t in point()) {
        let counts = classify(&data, &t);
        prop_assert_eq!(counts.total(), data.len() as u64);
    }

    /// Property: every sweep bucket partitions the samples
    #[test]
    fn prop_sweep_counts_sum_to_sample_count(
        data in samples(),
        axis in axis(),
        secondary in measurement(),
        buckets in 1usize..50
    ) {
        let curve = sweep(&data, axis, secondary, AxisRange::new(0.0, 10.0), buckets);
        prop_assert_eq!(curve.len(), buckets);
        for p in &curve.points {
            prop_assert_eq!(p.counts.total(), data.len() as u64);
        }
    }

    /// Property: rates lie in [0, 1], MCC in [-1, 1], nothing is NaN or infinite
    #[test]
    fn prop_metrics_are_bounded_and_finite(c in counts()) {
        let m = derive(&c);
        for metric in Metric::ALL {
            let v = m.get(metric);
            prop_assert!(v.is_finite(), "{:?} = {}", metric, v);
            if metric == Metric::Mcc {
                prop_assert!((-1.0..=1.0).contains(&v));
            } else {
                prop_assert!((0.0..=1.0).contains(&v), "{:?} = {}", metric, v);
            }
        }
    }

    /// Property: recall is weakly non-increasing as the cpm edge rises
    #[test]
    fn prop_recall_non_increasing_along_cpm_sweep(data in samples(), secondary in measurement()) {
        let curve = sweep(&data, Axis::Cpm, secondary, AxisRange::new(0.0, 10.0), 40);
        let recall = curve.series(Metric::Recall);
        for pair in recall.windows(2) {
            prop_assert!(pair[1].1 <= pair[0].1);
            prop_assert!(pair[0].0 < pair[1].0);
        }
        for pair in curve.points.windows(2) {
            prop_assert!(pair[1].counts.tp <= pair[0].counts.tp);
            prop_assert!(pair[1].counts.fn_count >= pair[0].counts.fn_count);
        }
    }

    /// Property: sorted prefix counting gives exactly the rescan result
    #[test]
    fn prop_sweep_matches_rescan(
        data in samples(),
        axis in axis(),
        secondary in measurement(),
        lo in 0.0f64..5.0,
        width in 0.0f64..6.0,
        buckets in 0usize..45
    ) {
        let refs: Vec<&Sample> = data.iter().collect();
        let domain = AxisRange::new(lo, lo + width);
        let fast = sweep(refs.iter().copied(), axis, secondary, domain, buckets);
        let slow = sweep_scan(&refs, axis, secondary, domain, buckets);
        prop_assert_eq!(fast, slow);
    }

    /// Property: the histogram counts exactly the samples inside its domain
    #[test]
    fn prop_histogram_mass_matches_domain(data in samples(), axis in axis(), buckets in 1usize..40) {
        let domain = AxisRange::new(1.0, 8.0);
        let bins = histogram(&data, axis, domain, buckets);
        let mass: u64 = bins.iter().map(|b| b.count).sum();
        let inside = data.iter().filter(|s| domain.contains(axis.value_of(s))).count() as u64;
        prop_assert_eq!(mass, inside);
    }

    /// Property: recomputing from identical inputs gives identical views
    #[test]
    fn prop_recompute_is_deterministic(
        data in samples(),
        t in proptest::option::of(point()),
        hover in proptest::option::of(point()),
        zoom in proptest::option::of((point(), point()))
    ) {
        let state = ReferenceState {
            threshold: t,
            hover,
            zoom: zoom.map(|(a, b)| ZoomBounds::new(
                AxisRange::new(a.cpm.min(b.cpm), a.cpm.max(b.cpm)),
                AxisRange::new(a.intensity.min(b.intensity), a.intensity.max(b.intensity)),
            )),
        };
        let config = EngineConfig::default();
        let first = recompute(&data, &state, &config);
        let second = recompute(&data, &state, &config);
        prop_assert_eq!(&first, &second);

        let subset = active_subset(&data, state.zoom.as_ref());
        prop_assert_eq!(first.active_count, subset.len());
        if let Some(report) = first.point {
            prop_assert_eq!(report.counts.total(), subset.len() as u64);
        }
    }
}
