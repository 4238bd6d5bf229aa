use std::fmt;

use serde::Serialize;

use crate::data::model::{Axis, Sample, ThresholdPoint};

// ---------------------------------------------------------------------------
// Quadrant – where one sample lands relative to a threshold
// ---------------------------------------------------------------------------

/// Classification outcome of one sample. The discriminant is the code written
/// to quadrant exports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[repr(u8)]
pub enum Quadrant {
    TruePositive = 1,
    FalsePositive = 2,
    TrueNegative = 3,
    FalseNegative = 4,
}

impl Quadrant {
    pub fn code(self) -> u8 {
        self as u8
    }

    fn from_flags(positive: bool, confirmed: bool) -> Self {
        match (positive, confirmed) {
            (true, true) => Quadrant::TruePositive,
            (true, false) => Quadrant::FalsePositive,
            (false, true) => Quadrant::FalseNegative,
            (false, false) => Quadrant::TrueNegative,
        }
    }
}

/// Point rule: strictly above the threshold on cpm is a positive call,
/// strictly above on intensity confirms it.
pub fn point_quadrant(sample: &Sample, threshold: &ThresholdPoint) -> Quadrant {
    Quadrant::from_flags(
        sample.cpm > threshold.cpm,
        sample.intensity > threshold.intensity,
    )
}

/// Sweep rule: at or above `edge` on the swept axis is a positive call, at or
/// above `secondary` on the other axis confirms it.
///
/// This intentionally differs from [`point_quadrant`] at the boundary
/// (`>=` here, `>` there); the two feed different views.
pub fn sweep_quadrant(sample: &Sample, axis: Axis, edge: f64, secondary: f64) -> Quadrant {
    Quadrant::from_flags(
        axis.value_of(sample) >= edge,
        axis.other().value_of(sample) >= secondary,
    )
}

// ---------------------------------------------------------------------------
// ConfusionCounts
// ---------------------------------------------------------------------------

/// Aggregate quadrant counts. `total()` always equals the number of samples
/// that were classified.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct ConfusionCounts {
    pub tp: u64,
    pub fp: u64,
    pub tn: u64,
    pub fn_count: u64,
}

impl ConfusionCounts {
    pub fn new(tp: u64, fp: u64, tn: u64, fn_count: u64) -> Self {
        Self {
            tp,
            fp,
            tn,
            fn_count,
        }
    }

    pub fn total(&self) -> u64 {
        self.tp + self.fp + self.tn + self.fn_count
    }

    pub fn record(&mut self, quadrant: Quadrant) {
        match quadrant {
            Quadrant::TruePositive => self.tp += 1,
            Quadrant::FalsePositive => self.fp += 1,
            Quadrant::TrueNegative => self.tn += 1,
            Quadrant::FalseNegative => self.fn_count += 1,
        }
    }
}

impl FromIterator<Quadrant> for ConfusionCounts {
    fn from_iter<I: IntoIterator<Item = Quadrant>>(iter: I) -> Self {
        let mut counts = ConfusionCounts::default();
        for q in iter {
            counts.record(q);
        }
        counts
    }
}

impl fmt::Display for ConfusionCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "tp={} fp={} tn={} fn={}",
            self.tp, self.fp, self.tn, self.fn_count
        )
    }
}

/// Count each sample's quadrant under the point rule.
pub fn classify<'a>(
    samples: impl IntoIterator<Item = &'a Sample>,
    threshold: &ThresholdPoint,
) -> ConfusionCounts {
    samples
        .into_iter()
        .map(|s| point_quadrant(s, threshold))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Point;

    #[test]
    fn point_rule_boundary_is_negative() {
        let t = Point::new(3.0, 3.0);
        assert_eq!(
            point_quadrant(&Sample::new("on", 3.0, 3.0), &t),
            Quadrant::TrueNegative
        );
        assert_eq!(
            point_quadrant(&Sample::new("x", 3.1, 3.0), &t),
            Quadrant::FalsePositive
        );
        assert_eq!(
            point_quadrant(&Sample::new("y", 3.0, 3.1), &t),
            Quadrant::FalseNegative
        );
    }

    #[test]
    fn sweep_rule_boundary_is_positive() {
        let s = Sample::new("on", 3.0, 3.0);
        assert_eq!(
            sweep_quadrant(&s, Axis::Cpm, 3.0, 3.0),
            Quadrant::TruePositive
        );
        assert_eq!(
            sweep_quadrant(&s, Axis::Intensity, 3.5, 3.0),
            Quadrant::FalseNegative
        );
    }

    #[test]
    fn sweep_rule_swaps_roles_on_intensity_axis() {
        let s = Sample::new("s", 10.0, 1.0);
        assert_eq!(
            sweep_quadrant(&s, Axis::Intensity, 0.5, 20.0),
            Quadrant::FalsePositive
        );
    }

    #[test]
    fn nan_sample_falls_in_true_negative() {
        let t = Point::new(0.0, 0.0);
        assert_eq!(
            point_quadrant(&Sample::new("nan", f64::NAN, f64::NAN), &t),
            Quadrant::TrueNegative
        );
    }

    #[test]
    fn quadrant_codes_match_export_encoding() {
        assert_eq!(Quadrant::TruePositive.code(), 1);
        assert_eq!(Quadrant::FalsePositive.code(), 2);
        assert_eq!(Quadrant::TrueNegative.code(), 3);
        assert_eq!(Quadrant::FalseNegative.code(), 4);
    }

    #[test]
    fn classify_empty_is_all_zero() {
        let counts = classify(&Vec::<Sample>::new(), &Point::new(1.0, 1.0));
        assert_eq!(counts, ConfusionCounts::default());
        assert_eq!(counts.total(), 0);
    }
}
