use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum LimnosError {
    #[error("record {row}: field '{field}': {reason}")]
    Parse {
        row: usize,
        field: String,
        reason: String,
    },

    #[error("failed to read records: {0}")]
    Source(String),

    #[error("failed to load profile from {path}: {reason}")]
    ProfileLoad { path: PathBuf, reason: String },

    #[error("invalid profile: {0}")]
    ProfileInvalid(String),

    #[error("unknown substance family '{0}'")]
    UnknownFamily(String),

    #[error("no sampling point labelled '{0}'")]
    UnknownLocation(String),

    #[error("profile defines no safety threshold for family '{0}'")]
    MissingThreshold(String),

    #[error("unknown time window '{0}'. Expected all, last_month, last_half_year, last_<n>_months or last_<n>_days")]
    InvalidWindow(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl LimnosError {
    /// Row index for record-level failures, if this error has one.
    pub fn row(&self) -> Option<usize> {
        match self {
            LimnosError::Parse { row, .. } => Some(*row),
            _ => None,
        }
    }
}
