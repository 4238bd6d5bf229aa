//! Interactive two-axis threshold exploration.
//!
//! A table of samples with `cpm` and `intensity` measurements is split by a
//! reference threshold point into true/false positives/negatives. The
//! [`session::Session`] keeps that reference (plus hover and zoom) and
//! recomputes the confusion report, per-axis metric sweeps and marginal
//! densities after every change. Rendering is left to the caller; every
//! derived structure is plain, serializable data.

pub mod config;
pub mod data;
pub mod engine;
pub mod export;
pub mod session;
pub mod state;

pub use config::EngineConfig;
pub use data::model::{
    Axis, AxisRange, HoverPoint, Point, Sample, SampleStore, ThresholdPoint, ZoomBounds,
};
pub use engine::confusion::{ConfusionCounts, Quadrant, classify};
pub use engine::histogram::{HistogramBin, histogram};
pub use engine::metrics::{Metric, MetricsVector, derive};
pub use engine::sweep::{SweepCurve, SweepPoint, sweep};
pub use engine::views::{DerivedViews, recompute};
pub use session::Session;
pub use state::ReferenceState;
