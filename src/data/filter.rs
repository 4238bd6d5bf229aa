use std::collections::BTreeSet;

use thiserror::Error;

use super::model::{Axis, AxisRange, Sample, ZoomBounds};

// ---------------------------------------------------------------------------
// State-group filter: which state labels are selected
// ---------------------------------------------------------------------------

/// Selected `state` labels. An empty selection means "no filter" (show all).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StateFilter {
    selected: BTreeSet<i32>,
}

impl StateFilter {
    pub fn is_active(&self) -> bool {
        !self.selected.is_empty()
    }

    pub fn selected(&self) -> &BTreeSet<i32> {
        &self.selected
    }

    pub fn toggle(&mut self, state: i32) {
        if !self.selected.remove(&state) {
            self.selected.insert(state);
        }
    }

    pub fn select(&mut self, states: impl IntoIterator<Item = i32>) {
        self.selected = states.into_iter().collect();
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// A sample passes when no label is selected, or its label is selected.
    /// Unlabelled samples are dropped by any active selection.
    pub fn accepts(&self, sample: &Sample) -> bool {
        if self.selected.is_empty() {
            return true;
        }
        sample
            .state
            .is_some_and(|state| self.selected.contains(&state))
    }

    /// The samples passing the filter, in source order.
    pub fn apply<'a>(&self, samples: impl IntoIterator<Item = &'a Sample>) -> Vec<&'a Sample> {
        samples.into_iter().filter(|s| self.accepts(s)).collect()
    }
}

// ---------------------------------------------------------------------------
// Zoom text parsing
// ---------------------------------------------------------------------------

/// Rejected zoom input. The previous bounds stay in effect.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ZoomError {
    #[error("{axis} range '{input}' must have the form \"<min>-<max>\"")]
    WrongTokenCount { axis: Axis, input: String },
    #[error("{axis} range bound '{token}' is not a finite number")]
    NotNumeric { axis: Axis, token: String },
}

/// Parse one `"<min>-<max>"` range for `axis`.
///
/// The text is split on every `-`, so exactly two finite tokens are required
/// and negative bounds cannot be expressed. An empty token (`"-3"`, `"3-"`)
/// is rejected as non-numeric rather than read as `0`. A range with `min`
/// above `max` is accepted and simply contains nothing.
pub fn parse_range(axis: Axis, input: &str) -> Result<AxisRange, ZoomError> {
    let tokens: Vec<&str> = input.split('-').map(str::trim).collect();
    if tokens.len() != 2 {
        return Err(ZoomError::WrongTokenCount {
            axis,
            input: input.to_string(),
        });
    }

    let parse = |token: &str| -> Result<f64, ZoomError> {
        token
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| ZoomError::NotNumeric {
                axis,
                token: token.to_string(),
            })
    };
    let min = parse(tokens[0])?;
    let max = parse(tokens[1])?;
    Ok(AxisRange::new(min, max))
}

/// Parse both axes' range texts into zoom bounds.
pub fn parse_zoom(cpm: &str, intensity: &str) -> Result<ZoomBounds, ZoomError> {
    Ok(ZoomBounds::new(
        parse_range(Axis::Cpm, cpm)?,
        parse_range(Axis::Intensity, intensity)?,
    ))
}

// ---------------------------------------------------------------------------
// Active domain / active subset
// ---------------------------------------------------------------------------

/// The range computations run over on `axis`.
///
/// With zoom bounds this is the zoomed range. Otherwise it spans from `0` to
/// the largest finite value on the axis (`0` for no samples), ordered so that
/// `min <= max` even when every value is negative.
pub fn active_domain<'a>(
    samples: impl IntoIterator<Item = &'a Sample>,
    zoom: Option<&ZoomBounds>,
    axis: Axis,
) -> AxisRange {
    if let Some(bounds) = zoom {
        return bounds.get(axis);
    }
    let max = samples
        .into_iter()
        .map(|s| axis.value_of(s))
        .filter(|v| v.is_finite())
        .fold(None, |acc: Option<f64>, v| Some(acc.map_or(v, |m| m.max(v))))
        .unwrap_or(0.0);
    AxisRange::new(max.min(0.0), max.max(0.0))
}

/// The samples computations run over: all of them without zoom bounds,
/// otherwise those inside both ranges (inclusive). Source order is kept.
pub fn active_subset<'a>(
    samples: impl IntoIterator<Item = &'a Sample>,
    zoom: Option<&ZoomBounds>,
) -> Vec<&'a Sample> {
    match zoom {
        None => samples.into_iter().collect(),
        Some(bounds) => samples.into_iter().filter(|s| bounds.contains(s)).collect(),
    }
}
