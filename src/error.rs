//! Configuration error types.

use std::num::{ParseFloatError, ParseIntError};

use thiserror::Error;

use crate::value::ValueError;

/// Configuration loading error.
///
/// Every failure of a load surfaces as one of these variants; the message
/// text of each variant is stable.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{key} is required")]
    Missing { key: String },
    #[error("Can't cast {key}={raw} to {ty}: {source}")]
    Cast {
        key: String,
        raw: String,
        ty: String,
        #[source]
        source: CastError,
    },
    #[error("unsupported type {ty}")]
    UnsupportedType { ty: String },
    #[error("postponed evaluation of annotations is not supported: {ty}")]
    Postponed { ty: String },
    #[error("failed to construct {ty}: {source}")]
    Construct {
        ty: String,
        #[source]
        source: ValueError,
    },
    #[error("failed to read env file: {0}")]
    Dotenv(#[from] dotenvy::Error),
}

/// Coarse cause of a [`ConfigError`], for callers that branch on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reason {
    MissingRequired,
    CastFailure,
    UnsupportedType,
    PostponedType,
    Construct,
    Dotenv,
}

impl ConfigError {
    pub fn reason(&self) -> Reason {
        match self {
            ConfigError::Missing { .. } => Reason::MissingRequired,
            ConfigError::Cast { .. } => Reason::CastFailure,
            ConfigError::UnsupportedType { .. } => Reason::UnsupportedType,
            ConfigError::Postponed { .. } => Reason::PostponedType,
            ConfigError::Construct { .. } => Reason::Construct,
            ConfigError::Dotenv(_) => Reason::Dotenv,
        }
    }
}

/// Conversion failure of a raw string into a leaf value.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CastError {
    #[error("invalid bool value '{0}'")]
    Bool(String),
    #[error(transparent)]
    Int(#[from] ParseIntError),
    #[error("number too large to fit in target type")]
    IntRange,
    #[error(transparent)]
    Float(#[from] ParseFloatError),
    #[error("number too large to fit in target type")]
    FloatRange,
    #[error("invalid duration '{0}'")]
    Duration(String),
    #[error("invalid map item '{item}': expected key{separator}value")]
    MapItem { item: String, separator: String },
    #[error("invalid length for fixed tuple: expected {expected}, got {actual}")]
    TupleLength { expected: usize, actual: usize },
    #[error("invalid item '{item}': {source}")]
    Item {
        item: String,
        #[source]
        source: Box<CastError>,
    },
}
