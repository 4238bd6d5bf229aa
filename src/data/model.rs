use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Axis – one of the two measurement dimensions
// ---------------------------------------------------------------------------

/// The two continuous measurement axes a sample is classified over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Cpm,
    Intensity,
}

impl Axis {
    pub const ALL: [Axis; 2] = [Axis::Cpm, Axis::Intensity];

    /// The orthogonal axis.
    pub fn other(self) -> Axis {
        match self {
            Axis::Cpm => Axis::Intensity,
            Axis::Intensity => Axis::Cpm,
        }
    }

    /// Read this axis' coordinate from a sample.
    pub fn value_of(self, sample: &Sample) -> f64 {
        match self {
            Axis::Cpm => sample.cpm,
            Axis::Intensity => sample.intensity,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Cpm => write!(f, "cpm"),
            Axis::Intensity => write!(f, "intensity"),
        }
    }
}

// ---------------------------------------------------------------------------
// Sample – one row of the loaded table
// ---------------------------------------------------------------------------

/// A single measured sample.
///
/// `state` is an external group label kept for display grouping only; the
/// classification logic never reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub name: String,
    pub cpm: f64,
    pub intensity: f64,
    #[serde(default)]
    pub state: Option<i32>,
}

impl Sample {
    pub fn new(name: impl Into<String>, cpm: f64, intensity: f64) -> Self {
        Self {
            name: name.into(),
            cpm,
            intensity,
            state: None,
        }
    }

    pub fn with_state(mut self, state: i32) -> Self {
        self.state = Some(state);
        self
    }
}

// ---------------------------------------------------------------------------
// Point – a (cpm, intensity) coordinate pair
// ---------------------------------------------------------------------------

/// A position in the (cpm, intensity) plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub cpm: f64,
    pub intensity: f64,
}

/// The reference decision boundary used for point classification.
pub type ThresholdPoint = Point;

/// Transient pointer position over the interaction surface.
pub type HoverPoint = Point;

impl Point {
    pub fn new(cpm: f64, intensity: f64) -> Self {
        Self { cpm, intensity }
    }

    pub fn get(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Cpm => self.cpm,
            Axis::Intensity => self.intensity,
        }
    }

    /// Copy of `self` with one coordinate replaced.
    pub fn with(mut self, axis: Axis, value: f64) -> Self {
        match axis {
            Axis::Cpm => self.cpm = value,
            Axis::Intensity => self.intensity = value,
        }
        self
    }
}

// ---------------------------------------------------------------------------
// AxisRange / ZoomBounds
// ---------------------------------------------------------------------------

/// Closed interval `[min, max]` on one axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
}

impl AxisRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn width(&self) -> f64 {
        self.max - self.min
    }

    /// Inclusive on both ends. NaN is never contained.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Optional rectangular restriction of both axes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomBounds {
    pub cpm: AxisRange,
    pub intensity: AxisRange,
}

impl ZoomBounds {
    pub fn new(cpm: AxisRange, intensity: AxisRange) -> Self {
        Self { cpm, intensity }
    }

    pub fn get(&self, axis: Axis) -> AxisRange {
        match axis {
            Axis::Cpm => self.cpm,
            Axis::Intensity => self.intensity,
        }
    }

    pub fn contains(&self, sample: &Sample) -> bool {
        self.cpm.contains(sample.cpm) && self.intensity.contains(sample.intensity)
    }
}

// ---------------------------------------------------------------------------
// SampleStore – the complete loaded table
// ---------------------------------------------------------------------------

/// An input row that was kept out of the store at ingestion.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RejectedRow {
    /// 1-based line number in the source (header is line 1).
    pub line: usize,
    pub reason: String,
}

/// The parsed dataset, in source order, with its distinct state labels.
#[derive(Debug, Clone, Default)]
pub struct SampleStore {
    pub samples: Vec<Sample>,
    /// Sorted set of distinct `state` labels present in `samples`.
    pub states: BTreeSet<i32>,
    /// Rows quarantined by the loader.
    pub rejected: Vec<RejectedRow>,
}

impl SampleStore {
    /// Build the state index from the loaded samples.
    pub fn from_samples(samples: Vec<Sample>) -> Self {
        let states = samples.iter().filter_map(|s| s.state).collect();
        SampleStore {
            samples,
            states,
            rejected: Vec::new(),
        }
    }

    pub fn with_rejected(mut self, rejected: Vec<RejectedRow>) -> Self {
        self.rejected = rejected;
        self
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axis_other_swaps_roles() {
        assert_eq!(Axis::Cpm.other(), Axis::Intensity);
        assert_eq!(Axis::Intensity.other(), Axis::Cpm);
    }

    #[test]
    fn point_with_replaces_one_coordinate() {
        let p = Point::new(1.0, 2.0).with(Axis::Intensity, 7.5);
        assert_eq!(p, Point::new(1.0, 7.5));
        assert_eq!(p.get(Axis::Cpm), 1.0);
    }

    #[test]
    fn range_is_inclusive_and_rejects_nan() {
        let r = AxisRange::new(0.0, 3.0);
        assert!(r.contains(0.0));
        assert!(r.contains(3.0));
        assert!(!r.contains(3.0001));
        assert!(!r.contains(f64::NAN));
    }

    #[test]
    fn store_collects_sorted_distinct_states() {
        let store = SampleStore::from_samples(vec![
            Sample::new("a", 1.0, 1.0).with_state(3),
            Sample::new("b", 1.0, 1.0),
            Sample::new("c", 1.0, 1.0).with_state(1),
            Sample::new("d", 1.0, 1.0).with_state(3),
        ]);
        assert_eq!(store.states.iter().copied().collect::<Vec<_>>(), vec![1, 3]);
        assert_eq!(store.len(), 4);
    }
}
