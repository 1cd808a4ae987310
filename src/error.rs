use std::error::Error as StdError;
use thiserror::Error;


/// Coarse classification of a failure.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ErrorKind {
    /// No failure.
    None,
    /// Malformed template, failed partial lookup in strict mode, or any foreign error.
    Unknown,
    /// A name could not be resolved while strict resolution was requested.
    MissingParams,
}

impl ErrorKind {
    /// True if the result carries this kind, `None` standing for success.
    pub fn matches<T>(self, result: &Result<T, Error>) -> bool {
        match result {
            Ok(_) => self == ErrorKind::None,
            Err(err) => err.kind() == self
        }
    }
}


#[derive(Error, Debug)]
pub enum Error {
    #[error("line {line}: unterminated tag")]
    UnterminatedTag { line: usize },

    #[error("line {line}: invalid delimiters tag")]
    InvalidDelimiters { line: usize },

    #[error("line {line}: unbalanced braces in triple mustache")]
    UnbalancedBraces { line: usize },

    #[error("line {line}: missing tag name")]
    EmptyTag { line: usize },

    #[error("line {line}: unexpected end of section {name}")]
    UnexpectedClose { line: usize, name: String },

    #[error("line {line}: section {expected} closed by {found}")]
    MismatchedSection { line: usize, expected: String, found: String },

    #[error("line {line}: unclosed section {name}")]
    UnclosedSection { line: usize, name: String },

    #[error("missing variable {name}")]
    MissingVariable { name: String },

    #[error("missing partial {name}")]
    MissingPartial { name: String },

    #[error("{name} is not a scalar and cannot be interpolated")]
    NotInterpolatable { name: String },

    #[error("partial {name} exceeds the maximum depth of {depth}")]
    PartialDepth { name: String, depth: usize },

    #[error("{source}")]
    Wrapped {
        kind: ErrorKind,
        source: Box<dyn StdError + Send + Sync>
    },
}

impl Error {
    /// Attach a kind to a foreign error.
    pub fn wrap<E>(source: E, kind: ErrorKind) -> Self
    where E: Into<Box<dyn StdError + Send + Sync>> {
        Error::Wrapped { kind, source: source.into() }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::MissingVariable { .. } => ErrorKind::MissingParams,
            Error::Wrapped { kind, .. } => *kind,
            _ => ErrorKind::Unknown
        }
    }
}


/// Classify any error: `None` for no error, the carried kind for errors of
/// this crate, `Unknown` for everything else.
pub fn classify(error: Option<&(dyn StdError + 'static)>) -> ErrorKind {
    match error {
        None => ErrorKind::None,
        Some(err) => match err.downcast_ref::<Error>() {
            Some(err) => err.kind(),
            None => ErrorKind::Unknown
        }
    }
}
