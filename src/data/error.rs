use std::path::PathBuf;

use thiserror::Error;

use super::model::ContentType;

/// The input file could not be turned into a [`ContentTable`](super::model::ContentTable).
/// Fatal for the current render pass.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot open {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported file extension: .{0}")]
    UnsupportedFormat(String),

    #[error("malformed input: {0}")]
    Malformed(String),

    #[error("missing required column '{0}'")]
    MissingColumn(String),

    #[error("row {row}: invalid value {value:?} in column '{column}'")]
    InvalidValue {
        row: usize,
        column: String,
        value: String,
    },

    #[error("row {row}: duplicate show_id '{id}'")]
    DuplicateId { row: usize, id: String },
}

/// A single record's duration text does not follow its type's unit rule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("empty duration")]
    Empty,

    #[error("{kind} duration {raw:?} has no '{unit}' suffix")]
    MissingUnit {
        kind: ContentType,
        raw: String,
        unit: &'static str,
    },

    #[error("{kind} duration {raw:?} is not a whole number")]
    NotANumber { kind: ContentType, raw: String },
}

/// The caller asked for something the table cannot provide.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("unknown column '{0}'")]
    UnknownColumn(String),

    #[error("'{0}' cannot be used as a group column (expected release_year, rating or year_added)")]
    InvalidGroupColumn(String),
}
