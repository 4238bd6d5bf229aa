use serde::Serialize;

use super::buckets::Buckets;
use crate::data::model::{Axis, AxisRange, Sample};

pub const DEFAULT_HISTOGRAM_BUCKETS: usize = 30;

/// Sample count in `[x0, x1)` (the last bin also includes `x1`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HistogramBin {
    pub x0: f64,
    pub x1: f64,
    pub count: u64,
}

impl HistogramBin {
    pub fn center(&self) -> f64 {
        (self.x0 + self.x1) / 2.0
    }
}

/// Marginal density of `axis` over `domain`. Values outside the domain (and
/// NaN) are not counted.
pub fn histogram<'a>(
    samples: impl IntoIterator<Item = &'a Sample>,
    axis: Axis,
    domain: AxisRange,
    bucket_count: usize,
) -> Vec<HistogramBin> {
    let buckets = Buckets::new(domain, bucket_count);
    let mut counts = vec![0u64; bucket_count];
    for s in samples {
        if let Some(i) = buckets.index_of(axis.value_of(s)) {
            counts[i] += 1;
        }
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| {
            let (x0, x1) = buckets.edges(i);
            HistogramBin { x0, x1, count }
        })
        .collect()
}
