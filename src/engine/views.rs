//! Everything the plots show, recomputed from scratch for each
//! `(samples, reference state)` pair.

use serde::Serialize;

use super::confusion::{ConfusionCounts, classify};
use super::histogram::{HistogramBin, histogram};
use super::metrics::{MetricsVector, derive};
use super::sweep::{SweepCurve, sweep};
use crate::config::EngineConfig;
use crate::data::filter::{active_domain, active_subset};
use crate::data::model::{Axis, AxisRange, Sample, ThresholdPoint};
use crate::state::ReferenceState;

/// Fixed-threshold quadrant report over the active subset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PointReport {
    pub threshold: ThresholdPoint,
    pub counts: ConfusionCounts,
    pub metrics: MetricsVector,
}

/// Per-axis marginal, sweep and hover guide.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisView {
    pub axis: Axis,
    pub domain: AxisRange,
    pub density: Vec<HistogramBin>,
    /// Present while a threshold is set; the other axis is held at the
    /// threshold's coordinate.
    pub sweep: Option<SweepCurve>,
    /// Hover coordinate on this axis, when it falls inside `domain`.
    pub hover: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerivedViews {
    /// Samples in the store.
    pub sample_count: usize,
    /// Samples left after zoom.
    pub active_count: usize,
    pub point: Option<PointReport>,
    pub cpm: AxisView,
    pub intensity: AxisView,
}

impl DerivedViews {
    pub fn axis(&self, axis: Axis) -> &AxisView {
        match axis {
            Axis::Cpm => &self.cpm,
            Axis::Intensity => &self.intensity,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Derive every view from the store and the reference state.
pub fn recompute<'a>(
    samples: impl IntoIterator<Item = &'a Sample>,
    state: &ReferenceState,
    config: &EngineConfig,
) -> DerivedViews {
    let store: Vec<&Sample> = samples.into_iter().collect();
    let zoom = state.zoom.as_ref();
    let subset = active_subset(store.iter().copied(), zoom);

    let point = state.threshold.map(|threshold| {
        let counts = classify(subset.iter().copied(), &threshold);
        PointReport {
            threshold,
            counts,
            metrics: derive(&counts),
        }
    });

    let axis_view = |axis: Axis| -> AxisView {
        let domain = active_domain(store.iter().copied(), zoom, axis);
        AxisView {
            axis,
            domain,
            density: histogram(
                subset.iter().copied(),
                axis,
                domain,
                config.histogram_buckets,
            ),
            sweep: state.threshold.map(|t| {
                sweep(
                    subset.iter().copied(),
                    axis,
                    t.get(axis.other()),
                    domain,
                    config.sweep_buckets,
                )
            }),
            hover: state
                .hover
                .map(|h| h.get(axis))
                .filter(|&v| domain.contains(v)),
        }
    };

    let views = DerivedViews {
        sample_count: store.len(),
        active_count: subset.len(),
        point,
        cpm: axis_view(Axis::Cpm),
        intensity: axis_view(Axis::Intensity),
    };

    log::debug!(
        "Recomputed views: {} of {} samples active, threshold {}",
        views.active_count,
        views.sample_count,
        if state.threshold.is_some() { "set" } else { "unset" }
    );
    views
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{Point, ZoomBounds};

    fn quad() -> Vec<Sample> {
        vec![
            Sample::new("a", 1.0, 1.0),
            Sample::new("b", 5.0, 5.0),
            Sample::new("c", 1.0, 5.0),
            Sample::new("d", 5.0, 1.0),
        ]
    }

    #[test]
    fn no_threshold_means_no_report_or_sweeps() {
        let data = quad();
        let views = recompute(&data, &ReferenceState::default(), &EngineConfig::default());
        assert!(views.point.is_none());
        assert!(views.cpm.sweep.is_none());
        assert!(views.intensity.sweep.is_none());
        assert_eq!(views.cpm.density.len(), 30);
        assert_eq!(views.cpm.domain, AxisRange::new(0.0, 5.0));
    }

    #[test]
    fn threshold_produces_report_and_both_sweeps() {
        let data = quad();
        let mut state = ReferenceState::default();
        state.set_threshold(Point::new(3.0, 3.0));
        let views = recompute(&data, &state, &EngineConfig::default());

        let report = views.point.unwrap();
        assert_eq!(report.counts, ConfusionCounts::new(1, 1, 1, 1));
        let cpm_sweep = views.cpm.sweep.as_ref().unwrap();
        assert_eq!(cpm_sweep.len(), 40);
        assert_eq!(cpm_sweep.secondary, 3.0);
        assert_eq!(views.axis(Axis::Intensity).sweep.as_ref().unwrap().axis, Axis::Intensity);
    }

    #[test]
    fn zoom_restricts_every_view() {
        let data = quad();
        let mut state = ReferenceState::default();
        state.set_threshold(Point::new(0.0, 0.0));
        state.set_zoom(Some(ZoomBounds::new(
            AxisRange::new(0.0, 3.0),
            AxisRange::new(0.0, 3.0),
        )));
        let views = recompute(&data, &state, &EngineConfig::default());

        assert_eq!(views.active_count, 1);
        assert_eq!(views.point.unwrap().counts.total(), 1);
        assert_eq!(views.cpm.domain, AxisRange::new(0.0, 3.0));
        let mass: u64 = views.intensity.density.iter().map(|b| b.count).sum();
        assert_eq!(mass, 1);
        for p in &views.cpm.sweep.as_ref().unwrap().points {
            assert_eq!(p.counts.total(), 1);
        }
    }

    #[test]
    fn hover_outside_domain_is_hidden() {
        let data = quad();
        let mut state = ReferenceState::default();
        state.set_hover(Some(Point::new(2.0, 9.0)));
        let views = recompute(&data, &state, &EngineConfig::default());
        assert_eq!(views.cpm.hover, Some(2.0));
        assert_eq!(views.intensity.hover, None);
    }

    #[test]
    fn views_serialize_to_json() {
        let data = quad();
        let mut state = ReferenceState::default();
        state.set_threshold(Point::new(3.0, 3.0));
        let json = recompute(&data, &state, &EngineConfig::default())
            .to_json()
            .unwrap();
        assert!(json.contains("\"sweep\""));
        assert!(json.contains("\"fn_count\":1"));
    }
}
