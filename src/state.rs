use serde::Serialize;

use crate::data::filter::{ZoomError, parse_zoom};
use crate::data::model::{Axis, HoverPoint, ThresholdPoint, ZoomBounds};

// ---------------------------------------------------------------------------
// Reference state
// ---------------------------------------------------------------------------

/// The interactive reference every derived view is computed from.
///
/// Each setter touches only its own field. [`ReferenceState::reset_all`] is
/// the single place all three are cleared together, and is called when a new
/// dataset becomes active.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ReferenceState {
    /// Current decision boundary.
    pub threshold: Option<ThresholdPoint>,
    /// Pointer position; cleared when the pointer leaves the plot.
    pub hover: Option<HoverPoint>,
    /// Rectangular restriction of both axes.
    pub zoom: Option<ZoomBounds>,
}

impl ReferenceState {
    pub fn set_threshold(&mut self, point: ThresholdPoint) {
        self.threshold = Some(point);
    }

    /// Edit one coordinate of the threshold. Without a threshold the other
    /// coordinate starts at `0`. Non-finite values are ignored.
    pub fn set_threshold_axis(&mut self, axis: Axis, value: f64) {
        if !value.is_finite() {
            return;
        }
        let base = self
            .threshold
            .unwrap_or_else(|| ThresholdPoint::new(0.0, 0.0));
        self.threshold = Some(base.with(axis, value));
    }

    pub fn clear_threshold(&mut self) {
        self.threshold = None;
    }

    pub fn set_hover(&mut self, point: Option<HoverPoint>) {
        self.hover = point;
    }

    pub fn set_zoom(&mut self, bounds: Option<ZoomBounds>) {
        self.zoom = bounds;
    }

    /// Parse `"<min>-<max>"` texts for both axes and apply them. On error the
    /// previous bounds are kept.
    pub fn set_zoom_text(&mut self, cpm: &str, intensity: &str) -> Result<(), ZoomError> {
        let bounds = parse_zoom(cpm, intensity)?;
        self.zoom = Some(bounds);
        Ok(())
    }

    pub fn reset_all(&mut self) {
        *self = ReferenceState::default();
    }
}
