//! Threshold sweep: slide one axis' threshold across its domain while the
//! other axis' reference value stays fixed, producing one metrics vector per
//! bucket edge.

use serde::Serialize;

use super::buckets::Buckets;
use super::confusion::{ConfusionCounts, sweep_quadrant};
use super::metrics::{Metric, MetricsVector, derive};
use crate::data::model::{Axis, AxisRange, Sample};

pub const DEFAULT_SWEEP_BUCKETS: usize = 40;

/// One bucket of a sweep.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SweepPoint {
    /// Bucket center.
    pub x: f64,
    /// Bucket lower edge, the threshold the counts were taken at.
    pub edge: f64,
    pub counts: ConfusionCounts,
    pub metrics: MetricsVector,
}

/// Metric curves along `axis`, ordered by ascending `x`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SweepCurve {
    pub axis: Axis,
    /// Fixed reference value on the other axis.
    pub secondary: f64,
    pub points: Vec<SweepPoint>,
}

impl SweepCurve {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// `(x, value)` pairs for a single metric.
    pub fn series(&self, metric: Metric) -> Vec<(f64, f64)> {
        self.points
            .iter()
            .map(|p| (p.x, p.metrics.get(metric)))
            .collect()
    }
}

fn point_at(buckets: &Buckets, i: usize, counts: ConfusionCounts) -> SweepPoint {
    SweepPoint {
        x: buckets.center(i),
        edge: buckets.lower(i),
        counts,
        metrics: derive(&counts),
    }
}

/// Values on the swept axis, split by whether the secondary value confirms.
/// Sorted ascending; NaN values are only counted, since they never reach any
/// edge.
struct SortedSplit {
    confirmed: Vec<f64>,
    unconfirmed: Vec<f64>,
    confirmed_nan: u64,
    unconfirmed_nan: u64,
}

impl SortedSplit {
    fn new<'a>(samples: impl IntoIterator<Item = &'a Sample>, axis: Axis, secondary: f64) -> Self {
        let mut split = SortedSplit {
            confirmed: Vec::new(),
            unconfirmed: Vec::new(),
            confirmed_nan: 0,
            unconfirmed_nan: 0,
        };
        for s in samples {
            let value = axis.value_of(s);
            let confirmed = axis.other().value_of(s) >= secondary;
            match (confirmed, value.is_nan()) {
                (true, false) => split.confirmed.push(value),
                (false, false) => split.unconfirmed.push(value),
                (true, true) => split.confirmed_nan += 1,
                (false, true) => split.unconfirmed_nan += 1,
            }
        }
        split.confirmed.sort_by(f64::total_cmp);
        split.unconfirmed.sort_by(f64::total_cmp);
        split
    }

    fn counts_at(&self, edge: f64) -> ConfusionCounts {
        let at_or_above = |values: &[f64]| -> u64 {
            if edge.is_nan() {
                return 0;
            }
            (values.len() - values.partition_point(|&v| v < edge)) as u64
        };
        let tp = at_or_above(&self.confirmed);
        let fp = at_or_above(&self.unconfirmed);
        ConfusionCounts {
            tp,
            fp,
            tn: self.unconfirmed.len() as u64 - fp + self.unconfirmed_nan,
            fn_count: self.confirmed.len() as u64 - tp + self.confirmed_nan,
        }
    }
}

/// Sweep `axis` over `domain` in `bucket_count` buckets, classifying every
/// sample with the sweep rule at each bucket's lower edge.
///
/// Sorts once and counts by binary search per bucket. Yields exactly what
/// [`sweep_scan`] yields.
pub fn sweep<'a>(
    samples: impl IntoIterator<Item = &'a Sample>,
    axis: Axis,
    secondary: f64,
    domain: AxisRange,
    bucket_count: usize,
) -> SweepCurve {
    let buckets = Buckets::new(domain, bucket_count);
    let split = SortedSplit::new(samples, axis, secondary);

    let points = (0..bucket_count)
        .map(|i| point_at(&buckets, i, split.counts_at(buckets.lower(i))))
        .collect();

    SweepCurve {
        axis,
        secondary,
        points,
    }
}

/// Reference sweep that rescans every sample for every bucket.
pub fn sweep_scan(
    samples: &[&Sample],
    axis: Axis,
    secondary: f64,
    domain: AxisRange,
    bucket_count: usize,
) -> SweepCurve {
    let buckets = Buckets::new(domain, bucket_count);

    let points = (0..bucket_count)
        .map(|i| {
            let edge = buckets.lower(i);
            let counts = samples
                .iter()
                .map(|s| sweep_quadrant(s, axis, edge, secondary))
                .collect();
            point_at(&buckets, i, counts)
        })
        .collect();

    SweepCurve {
        axis,
        secondary,
        points,
    }
}
