use std::{io, path::PathBuf};

use thiserror::Error;

/// Errors surfaced by the translation engine.
///
/// Custom expression errors happen before any file is touched. I/O errors
/// abort the run; files already rewritten stay rewritten.
#[derive(Debug, Error)]
pub enum TranslateError {
    #[error("failed to read custom expressions file {}", path.display())]
    CustomExpressionsRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed custom expressions file {}: {source}", path.display())]
    CustomExpressionsParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("failed to walk {}", path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("failed to read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type Result<T, E = TranslateError> = std::result::Result<T, E>;
