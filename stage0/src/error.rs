use std::io;
use std::path::PathBuf;

use bareio::Fault;
use parser::{ParseError, Span};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("unknown message `{name}` at {span}")]
    UnknownMessage { name: String, span: Span },

    #[error("`{name}` is not a valid Rust identifier")]
    InvalidName { name: String },

    #[error("script faulted: {0}")]
    Fault(#[from] Fault),
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Source region the error points at, if any.
    pub fn span(&self) -> Option<Span> {
        match self {
            Self::Parse(err) => Some(err.span),
            Self::UnknownMessage { span, .. } => Some(*span),
            _ => None,
        }
    }
}
