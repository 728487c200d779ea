use std::path::PathBuf;

use thiserror::Error;

// ---------------------------------------------------------------------------
// AnalysisError – every fatal condition of a run
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The dataset file is missing, unreadable, or not parseable.
    #[error("failed to load dataset {}", path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    /// A mode was requested over a column with no non-missing values.
    #[error("column '{column}' has no non-missing values")]
    EmptyDomain { column: String },

    /// The charting backend failed.
    #[error("chart rendering failed: {0}")]
    Render(String),

    /// Writing a chart table to disk failed.
    #[error("failed to export table to {}", path.display())]
    Export {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },
}

impl AnalysisError {
    pub fn load(path: impl Into<PathBuf>, source: impl Into<anyhow::Error>) -> Self {
        AnalysisError::Load {
            path: path.into(),
            source: source.into(),
        }
    }
}

pub type Result<T, E = AnalysisError> = std::result::Result<T, E>;
