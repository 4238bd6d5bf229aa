use std::io::Write;
use std::path::Path;

use anyhow::Result;

use crate::config::EngineConfig;
use crate::data::filter::{StateFilter, ZoomError};
use crate::data::model::{Axis, HoverPoint, Sample, SampleStore, ThresholdPoint, ZoomBounds};
use crate::engine::views::{DerivedViews, recompute};
use crate::export;
use crate::state::ReferenceState;

const ZOOM_ERROR_PREFIX: &str = "Invalid zoom: ";

// ---------------------------------------------------------------------------
// Interactive session
// ---------------------------------------------------------------------------

/// Owns the loaded table and the reference state, and keeps the derived
/// views in step with them. Every mutating method recomputes `views`.
#[derive(Debug, Default)]
pub struct Session {
    /// Loaded dataset (None until a file is loaded).
    pub dataset: Option<SampleStore>,

    /// State-label selection. The samples it lets through are the store the
    /// engine sees.
    pub state_filter: StateFilter,

    pub reference: ReferenceState,

    pub config: EngineConfig,

    /// Views for the current dataset and reference (None without a dataset).
    pub views: Option<DerivedViews>,

    /// Status / error message for the UI.
    pub status_message: Option<String>,
}

impl Session {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Install a newly loaded dataset. Resets the state selection and the
    /// reference state.
    pub fn set_dataset(&mut self, dataset: SampleStore) {
        log::info!(
            "Loaded {} samples with states {:?} ({} rows rejected)",
            dataset.len(),
            dataset.states,
            dataset.rejected.len()
        );
        self.state_filter.clear();
        self.reference.reset_all();
        self.status_message = (!dataset.rejected.is_empty())
            .then(|| format!("Skipped {} unparsable rows", dataset.rejected.len()));
        self.dataset = Some(dataset);
        self.refresh();
    }

    /// Load a file and install it. On failure the current dataset is kept and
    /// the error is also put in `status_message`.
    pub fn load_file(&mut self, path: &Path) -> Result<()> {
        match crate::data::loader::load_file(path) {
            Ok(dataset) => {
                self.set_dataset(dataset);
                Ok(())
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
                Err(e)
            }
        }
    }

    /// Samples passing the state selection, in source order.
    pub fn visible_samples(&self) -> Vec<&Sample> {
        match &self.dataset {
            Some(ds) => self.state_filter.apply(&ds.samples),
            None => Vec::new(),
        }
    }

    /// Recompute `views` from the current dataset and reference state.
    pub fn refresh(&mut self) {
        self.views = self.dataset.as_ref().map(|ds| {
            recompute(
                self.state_filter.apply(&ds.samples),
                &self.reference,
                &self.config,
            )
        });
    }

    // -- reference state --

    pub fn set_threshold(&mut self, point: ThresholdPoint) {
        self.reference.set_threshold(point);
        self.refresh();
    }

    pub fn set_threshold_axis(&mut self, axis: Axis, value: f64) {
        self.reference.set_threshold_axis(axis, value);
        self.refresh();
    }

    pub fn clear_threshold(&mut self) {
        self.reference.clear_threshold();
        self.refresh();
    }

    pub fn set_hover(&mut self, point: Option<HoverPoint>) {
        self.reference.set_hover(point);
        self.refresh();
    }

    pub fn set_zoom(&mut self, bounds: Option<ZoomBounds>) {
        self.reference.set_zoom(bounds);
        self.refresh();
    }

    /// Apply `"<min>-<max>"` zoom texts. A rejected input leaves the bounds
    /// and views untouched and is reported through `status_message`.
    pub fn apply_zoom_text(&mut self, cpm: &str, intensity: &str) -> Result<(), ZoomError> {
        if let Err(e) = self.reference.set_zoom_text(cpm, intensity) {
            log::warn!("Rejected zoom input: {e}");
            self.status_message = Some(format!("{ZOOM_ERROR_PREFIX}{e}"));
            return Err(e);
        }
        // Only a stale zoom error is cleared; load notices stay.
        if self
            .status_message
            .as_deref()
            .is_some_and(|msg| msg.starts_with(ZOOM_ERROR_PREFIX))
        {
            self.status_message = None;
        }
        self.refresh();
        Ok(())
    }

    pub fn reset_zoom(&mut self) {
        self.set_zoom(None);
    }

    // -- state selection --
    //
    // Changing the selection swaps the store the engine sees, so the
    // reference state is reset just as on a new load.

    pub fn toggle_state(&mut self, state: i32) {
        self.state_filter.toggle(state);
        self.store_changed();
    }

    pub fn select_all_states(&mut self) {
        if let Some(ds) = &self.dataset {
            let all = ds.states.clone();
            self.state_filter.select(all);
            self.store_changed();
        }
    }

    pub fn clear_state_filter(&mut self) {
        self.state_filter.clear();
        self.store_changed();
    }

    fn store_changed(&mut self) {
        self.reference.reset_all();
        self.refresh();
    }

    // -- export --

    /// Quadrant export of the visible samples; `None` without a threshold.
    pub fn export_quadrants(&self) -> Result<Option<String>> {
        export::export_quadrants(self.visible_samples(), &self.reference)
    }

    /// Write the quadrant export. Returns `false` (nothing written) without a
    /// threshold.
    pub fn write_export<W: Write>(&self, writer: W) -> Result<bool> {
        let Some(threshold) = self.reference.threshold else {
            return Ok(false);
        };
        export::write_quadrants(writer, self.visible_samples(), &threshold)?;
        Ok(true)
    }
}
