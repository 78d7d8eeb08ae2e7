use std::fs;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use tracing::debug;

use crate::error::{ExtractError, Result};

const HTML_EXTENSION: &str = ".html";

/// What to do when one file in the input directory cannot be read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ReadPolicy {
    /// Stop the whole run on the first unreadable file.
    #[default]
    Abort,
    /// Warn, leave the file out and keep going.
    Skip,
}

pub struct SourceDocument {
    pub file_name: String,
    pub html: String,
}

/// `.html` files directly inside `dir`, sorted by file name.
pub fn list_html_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let list_err = |source| ExtractError::ListDir {
        path: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(list_err)? {
        let entry = entry.map_err(list_err)?;
        let name = entry.file_name();
        match name.to_str() {
            Some(n) if n.ends_with(HTML_EXTENSION) => files.push(entry.path()),
            _ => debug!("Ignoring {:?}", name),
        }
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// Read one file as text. Invalid UTF-8 is replaced rather than rejected.
pub fn read_document(path: &Path) -> Result<SourceDocument> {
    let bytes = fs::read(path).map_err(|source| ExtractError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    Ok(SourceDocument {
        file_name,
        html: String::from_utf8_lossy(&bytes).into_owned(),
    })
}
