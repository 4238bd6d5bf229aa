use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde_json::Value as JsonValue;

use super::model::{RejectedRow, Sample, SampleStore};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a sample table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.tsv` / `.txt` – tab-separated, header row `name  cpm  intensity  [state]`
/// * `.json`         – `[{ "name": "...", "cpm": 1.0, "intensity": 2.0, "state": 1 }, ...]`
///
/// Rows whose `cpm` or `intensity` is not a finite number are kept out of the
/// store and listed in [`SampleStore::rejected`].
pub fn load_file(path: &Path) -> Result<SampleStore> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "tsv" | "txt" => {
            let file = std::fs::File::open(path).context("opening TSV file")?;
            parse_tsv(file)
        }
        "json" => {
            let text = std::fs::read_to_string(path).context("reading JSON file")?;
            parse_json(&text)
        }
        other => bail!("Unsupported file extension: .{other}"),
    }
}

// ---------------------------------------------------------------------------
// TSV loader
// ---------------------------------------------------------------------------

/// Parse tab-separated text. The first line names the columns; `name`, `cpm`
/// and `intensity` are required, `state` is optional, others are ignored.
pub fn parse_tsv<R: Read>(input: R) -> Result<SampleStore> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .quoting(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(input);

    let headers: Vec<String> = reader
        .headers()
        .context("reading TSV header")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let column = |name: &str| -> Result<usize> {
        headers
            .iter()
            .position(|h| h == name)
            .with_context(|| format!("TSV missing '{name}' column"))
    };
    let name_idx = column("name")?;
    let cpm_idx = column("cpm")?;
    let intensity_idx = column("intensity")?;
    let state_idx = headers.iter().position(|h| h == "state");

    let mut samples = Vec::new();
    let mut rejected = Vec::new();

    for result in reader.records() {
        let record = result.context("reading TSV row")?;
        // Whitespace-only lines count as blank.
        if record.iter().all(str::is_empty) {
            continue;
        }
        let line = record
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(samples.len() + rejected.len() + 2);

        let field = |idx: usize| record.get(idx).unwrap_or("");

        let cpm = match parse_measurement(field(cpm_idx), "cpm") {
            Ok(v) => v,
            Err(reason) => {
                quarantine(&mut rejected, line, reason);
                continue;
            }
        };
        let intensity = match parse_measurement(field(intensity_idx), "intensity") {
            Ok(v) => v,
            Err(reason) => {
                quarantine(&mut rejected, line, reason);
                continue;
            }
        };
        let state = state_idx.and_then(|idx| field(idx).parse::<i32>().ok());

        samples.push(Sample {
            name: field(name_idx).to_string(),
            cpm,
            intensity,
            state,
        });
    }

    Ok(SampleStore::from_samples(samples).with_rejected(rejected))
}

fn parse_measurement(raw: &str, column: &str) -> std::result::Result<f64, String> {
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(format!("'{raw}' in column '{column}' is not a finite number")),
    }
}

fn quarantine(rejected: &mut Vec<RejectedRow>, line: usize, reason: String) {
    log::warn!("Skipping line {line}: {reason}");
    rejected.push(RejectedRow { line, reason });
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented):
///
/// ```json
/// [
///   { "name": "s1", "cpm": 12.5, "intensity": 0.8, "state": 2 },
///   ...
/// ]
/// ```
///
/// `line` in a [`RejectedRow`] is the 1-based record index here.
pub fn parse_json(text: &str) -> Result<SampleStore> {
    let root: JsonValue = serde_json::from_str(text).context("parsing JSON")?;

    let records = root
        .as_array()
        .context("Expected top-level JSON array")?;

    let mut samples = Vec::with_capacity(records.len());
    let mut rejected = Vec::new();

    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .with_context(|| format!("Record {i} is not a JSON object"))?;

        let name = match obj.get("name") {
            Some(JsonValue::String(s)) => s.clone(),
            Some(JsonValue::Null) | None => String::new(),
            Some(other) => other.to_string(),
        };

        let number = |key: &str| -> std::result::Result<f64, String> {
            obj.get(key)
                .and_then(json_to_f64)
                .filter(|v| v.is_finite())
                .ok_or_else(|| format!("'{key}' is missing or not a finite number"))
        };
        let (cpm, intensity) = match (number("cpm"), number("intensity")) {
            (Ok(c), Ok(i)) => (c, i),
            (Err(reason), _) | (_, Err(reason)) => {
                quarantine(&mut rejected, i + 1, reason);
                continue;
            }
        };

        let state = obj
            .get("state")
            .and_then(|v| v.as_i64())
            .and_then(|v| i32::try_from(v).ok());

        samples.push(Sample {
            name,
            cpm,
            intensity,
            state,
        });
    }

    Ok(SampleStore::from_samples(samples).with_rejected(rejected))
}

/// Numbers, or strings holding numbers, as exported by spreadsheet tools.
fn json_to_f64(val: &JsonValue) -> Option<f64> {
    match val {
        JsonValue::Number(n) => n.as_f64(),
        JsonValue::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}
