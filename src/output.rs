use std::fs;
use std::path::Path;

use crate::error::{ExtractError, Result};
use crate::model::ArtworkRecord;

/// Overwrite `path` with the records as two-space indented JSON.
///
/// Not atomic: a crash mid-write can leave a truncated file.
pub fn write_records(path: &Path, records: &[ArtworkRecord]) -> Result<()> {
    let json = serde_json::to_string_pretty(records)?;
    fs::write(path, json).map_err(|source| ExtractError::WriteOutput {
        path: path.to_path_buf(),
        source,
    })
}
