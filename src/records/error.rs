use polars::error::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RecordStoreError {
    #[error("Climate source '{0}' cannot be opened")]
    SourceUnavailable(PathBuf, #[source] std::io::Error),

    #[error("Climate source '{0}' could not be parsed as CSV")]
    SourceUnreadable(PathBuf, #[source] PolarsError),

    #[error("Required column '{column}' not found in climate source '{path}'")]
    MissingColumn { path: PathBuf, column: String },

    #[error("Failed to read description table '{0}'")]
    DescriptionRead(PathBuf, #[source] std::io::Error),

    #[error("Failed to parse description table '{0}'")]
    DescriptionParse(PathBuf, #[source] serde_json::Error),
}
