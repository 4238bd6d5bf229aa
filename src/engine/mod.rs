/// Numeric core: pure functions of (samples, reference state).
///
/// ```text
///   active subset ──┬──▶ confusion (point rule) ──▶ metrics ──▶ PointReport
///                   ├──▶ sweep (sweep rule, per bucket edge) ──▶ metrics ──▶ SweepCurve
///                   └──▶ histogram ──▶ HistogramBin
///                              │
///                              ▼
///                        views::recompute ──▶ DerivedViews
/// ```

pub mod buckets;
pub mod confusion;
pub mod histogram;
pub mod metrics;
pub mod sweep;
pub mod views;
