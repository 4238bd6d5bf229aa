use std::io::Write;

use anyhow::{Context, Result};

use crate::data::model::{Sample, ThresholdPoint};
use crate::engine::confusion::point_quadrant;
use crate::state::ReferenceState;

// ---------------------------------------------------------------------------
// Quadrant export
// ---------------------------------------------------------------------------

/// Suggested file name for quadrant exports.
pub const EXPORT_FILE_NAME: &str = "threshold_results.tsv";

/// Write `name<TAB>state` rows, one per sample in store order, where `state`
/// is the point-rule quadrant code (1=TP, 2=FP, 3=TN, 4=FN).
pub fn write_quadrants<'a, W: Write>(
    writer: W,
    samples: impl IntoIterator<Item = &'a Sample>,
    threshold: &ThresholdPoint,
) -> Result<()> {
    let mut out = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .quote_style(csv::QuoteStyle::Never)
        .from_writer(writer);

    out.write_record(["name", "state"])
        .context("writing export header")?;
    for s in samples {
        let code = point_quadrant(s, threshold).code().to_string();
        out.write_record([s.name.as_str(), code.as_str()])
            .with_context(|| format!("writing export row for '{}'", s.name))?;
    }
    out.flush().context("flushing export")?;
    Ok(())
}

/// The export as text, or `None` when no threshold is set.
pub fn export_quadrants<'a>(
    samples: impl IntoIterator<Item = &'a Sample>,
    state: &ReferenceState,
) -> Result<Option<String>> {
    let Some(threshold) = state.threshold else {
        return Ok(None);
    };
    let mut buf = Vec::new();
    write_quadrants(&mut buf, samples, &threshold)?;
    let text = String::from_utf8(buf).context("export is not UTF-8")?;
    Ok(Some(text))
}
