use std::path::PathBuf;

use thiserror::Error;

use crate::Diagnostic;
use crate::semantic::SemanticError;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} syntax error(s)", .0.len())]
    Parse(Vec<Diagnostic>),

    #[error(transparent)]
    Semantic(#[from] SemanticError),

    #[error("failed to serialize symbol table: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
