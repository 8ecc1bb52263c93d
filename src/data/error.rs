use thiserror::Error;

/// Errors raised while reading and converting record lines.
///
/// None of these abort a load: the loader and store recover from each one
/// locally and end up with fewer records plus a diagnostic.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("resource not found: {0}")]
    ResourceMissing(String),

    #[error("failed to read resource {name}: {source}")]
    Io {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("line {line}: {reason}: {raw}")]
    MalformedLine {
        line: usize,
        raw: String,
        reason: FormatError,
    },

    #[error("invalid record format: {0}")]
    Format(#[from] FormatError),
}

/// Why a single line could not be turned into a record.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormatError {
    #[error("expected 7 fields, found {0}")]
    FieldCount(usize),

    #[error("{0} is empty")]
    EmptyField(&'static str),

    #[error("{field} '{value}' is missing the '{unit}' suffix")]
    MissingUnit {
        field: &'static str,
        unit: &'static str,
        value: String,
    },

    #[error("{field} '{value}' is not a number")]
    InvalidNumber { field: &'static str, value: String },
}
