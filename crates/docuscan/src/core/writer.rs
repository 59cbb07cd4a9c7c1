//! Result Writer: one JSON record per processed input.

use crate::types::OcrResultRecord;
use crate::{DocuscanError, Result};
use std::path::{Path, PathBuf};

/// Write the result record for one input file.
///
/// The output name is the input's base name with the extension replaced
/// by `.json`, placed directly under `output_dir`. Any existing file at
/// that path is overwritten unconditionally; only the progress set
/// decides whether an input is reprocessed.
pub fn write_result_record(file_name: &str, lines: &[String], output_dir: &Path) -> Result<PathBuf> {
    let stem = Path::new(file_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(file_name);
    let output_path = output_dir.join(format!("{}.json", stem));

    let record = OcrResultRecord {
        file: file_name.to_string(),
        text: lines.to_vec(),
    };

    let json = serde_json::to_string_pretty(&record)?;
    std::fs::write(&output_path, json).map_err(DocuscanError::Io)?;

    Ok(output_path)
}
