//! Error types for the Solvere pipeline.

use std::fmt;
use thiserror::Error;

/// Result alias used throughout the solvere crates.
pub type Result<T, E = SolvereError> = std::result::Result<T, E>;

/// Top-level error type for the Solvere pipeline.
#[derive(Debug, Error)]
pub enum SolvereError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Transform(#[from] TransformError),

    /// An error raised while assembling a specific entity.
    #[error("{operation} failed for entity '{entity}': {source}")]
    Entity {
        entity: String,
        operation: Operation,
        #[source]
        source: Box<SolvereError>,
    },
}

impl SolvereError {
    /// Attach the entity tag and the failing operation to this error.
    pub fn in_entity(self, entity: impl Into<String>, operation: Operation) -> Self {
        SolvereError::Entity {
            entity: entity.into(),
            operation,
            source: Box::new(self),
        }
    }

    /// The innermost error, skipping any entity context.
    pub fn root_cause(&self) -> &SolvereError {
        match self {
            SolvereError::Entity { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

/// Caller contract violations on the input tables and options.
#[derive(Debug, Error, PartialEq)]
pub enum InputError {
    #[error("table has no rows")]
    EmptyTable,

    #[error("row {row} has {found} columns, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("table has {found} columns, expected {expected}")]
    ColumnCount { expected: String, found: usize },

    #[error("invalid option {name}: {reason}")]
    InvalidOption { name: &'static str, reason: String },

    #[error("final time sample is {time}; cannot normalize time")]
    ZeroDuration { time: f64 },

    #[error("geometry template has no Transform node")]
    MissingTransform,

    #[error("template line {line}: malformed substitution tag")]
    MalformedTag { line: usize },

    #[error("template line {line}: substitution ${index}$ requested but {available} available")]
    MissingSubstitution {
        line: usize,
        index: usize,
        available: usize,
    },
}

impl InputError {
    /// Create an invalid option error.
    pub fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidOption {
            name,
            reason: reason.into(),
        }
    }
}

/// Contract violations in the numeric primitives.
#[derive(Debug, Error, PartialEq)]
pub enum TransformError {
    #[error("downsample stride must be at least 1")]
    ZeroStride,

    #[error("downsample stride {stride} exceeds sample count {len}")]
    StrideTooLarge { stride: usize, len: usize },

    #[error("sequence length mismatch: expected {expected}, found {found}")]
    LengthMismatch { expected: usize, found: usize },
}

/// The pipeline step an [`SolvereError::Entity`] error came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    ReadFrames,
    Validate,
    Resample,
    BuildStrip,
    RewriteTemplate,
    NormalizeTime,
    CollectChannels,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::ReadFrames => "reading frames",
            Operation::Validate => "validating options",
            Operation::Resample => "resampling",
            Operation::BuildStrip => "building triangle strip",
            Operation::RewriteTemplate => "rewriting geometry template",
            Operation::NormalizeTime => "normalizing time",
            Operation::CollectChannels => "collecting channels",
        };
        f.write_str(name)
    }
}

/// Attach entity context to any result whose error converts into [`SolvereError`].
pub trait EntityContext<T> {
    fn entity(self, tag: &str, operation: Operation) -> Result<T>;
}

impl<T, E> EntityContext<T> for std::result::Result<T, E>
where
    E: Into<SolvereError>,
{
    fn entity(self, tag: &str, operation: Operation) -> Result<T> {
        self.map_err(|e| e.into().in_entity(tag, operation))
    }
}
