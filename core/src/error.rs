use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Missing required column '{column}'")]
    Schema { column: String },

    #[error("Line {line}: cannot parse {column} value '{value}': {reason}")]
    Parse {
        line:   usize,
        column: String,
        value:  String,
        reason: String,
    },

    #[error("Line {line}: unknown {column} label '{value}'")]
    UnknownCategory {
        line:   usize,
        column: String,
        value:  String,
    },

    #[error("Invalid date range: {start} is after {end}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },

    #[error("View '{name}' not found")]
    UnknownView { name: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PipelineError {
    /// A required column was absent from the source header.
    pub fn is_schema_error(&self) -> bool {
        matches!(self, Self::Schema { .. })
    }

    /// A cell failed to parse under its expected type or vocabulary.
    pub fn is_parse_error(&self) -> bool {
        matches!(self, Self::Parse { .. } | Self::UnknownCategory { .. })
    }
}

pub type PipelineResult<T> = Result<T, PipelineError>;
