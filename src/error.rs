//! Errors for the I/O edges of the game (best records, settings, tuning).
//!
//! The simulation itself is total and never returns these. Callers on the
//! host side log them and keep playing.

use std::fmt;

#[derive(Debug)]
pub enum PersistError {
    /// Reading or writing the backing file failed.
    Io(std::io::Error),

    /// Stored data exists but could not be decoded.
    Parse(String),

    /// The host refused access (no storage, private mode, quota).
    Unavailable {
        /// Which backend was being used, for logging.
        backend: &'static str,
    },
}

impl fmt::Display for PersistError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersistError::Io(err) => write!(f, "storage i/o failed: {}", err),
            PersistError::Parse(msg) => write!(f, "stored data is malformed: {}", msg),
            PersistError::Unavailable { backend } => {
                write!(f, "storage backend '{}' is unavailable", backend)
            }
        }
    }
}

impl std::error::Error for PersistError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PersistError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for PersistError {
    fn from(err: std::io::Error) -> Self {
        PersistError::Io(err)
    }
}

impl From<serde_json::Error> for PersistError {
    fn from(err: serde_json::Error) -> Self {
        PersistError::Parse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_backend() {
        let err = PersistError::Unavailable { backend: "localStorage" };
        assert_eq!(err.to_string(), "storage backend 'localStorage' is unavailable");
    }

    #[test]
    fn test_io_error_has_source() {
        let err: PersistError = std::io::Error::other("disk gone").into();
        assert!(std::error::Error::source(&err).is_some());
    }
}
