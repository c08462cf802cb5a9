//! Domain error types.

/// A table does not have the shape an operation requires.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SchemaError {
    #[error("'{column}' column is required")]
    MissingColumn { column: String },

    #[error("columns must be {}, found {}", .expected.join(", "), .found.join(", "))]
    UnexpectedColumns {
        expected: Vec<String>,
        found: Vec<String>,
    },

    #[error("column '{column}' must hold {expected} values, found {found}")]
    ColumnType {
        column: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("column '{column}' has {found} rows, table has {expected}")]
    ColumnLength {
        column: String,
        expected: usize,
        found: usize,
    },

    #[error("column '{column}' holds non-integral value {value} at row {row}")]
    NonIntegral {
        column: String,
        row: usize,
        value: f64,
    },
}

impl SchemaError {
    pub fn missing(column: &str) -> Self {
        SchemaError::MissingColumn {
            column: column.to_string(),
        }
    }
}

/// Top-level error type for tradekit.
#[derive(Debug, thiserror::Error)]
pub enum TradekitError {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error("invalid mode '{mode}': must be home, away, over or under")]
    InvalidMode { mode: String },

    #[error("{operation} requires at least one row")]
    EmptyInput { operation: &'static str },

    #[error("invalid timeframe '{value}': {reason}")]
    InvalidTimeframe { value: String, reason: String },

    #[error("data format error: {reason}")]
    DataFormat { reason: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&TradekitError> for std::process::ExitCode {
    fn from(err: &TradekitError) -> Self {
        let code: u8 = match err {
            TradekitError::Io(_) => 1,
            TradekitError::ConfigParse { .. }
            | TradekitError::ConfigMissing { .. }
            | TradekitError::ConfigInvalid { .. } => 2,
            TradekitError::Schema(_)
            | TradekitError::InvalidMode { .. }
            | TradekitError::EmptyInput { .. }
            | TradekitError::InvalidTimeframe { .. } => 3,
            TradekitError::DataFormat { .. } => 4,
        };
        std::process::ExitCode::from(code)
    }
}
