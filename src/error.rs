use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ExtractError>;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("cannot list input directory {path}")]
    ListDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot read {path}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot write {path}")]
    WriteOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot write progress report")]
    Progress(#[source] std::io::Error),

    #[error("invalid progress bar template")]
    ProgressTemplate(#[from] indicatif::style::TemplateError),

    #[error("cannot serialize artwork records")]
    Serialize(#[from] serde_json::Error),

    #[error("malformed catalog {path}")]
    ParseCatalog {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
