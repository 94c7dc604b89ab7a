use std::path::PathBuf;

/// Result type alias for workspace operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types raised at the file-system boundary
#[derive(Debug)]
pub enum Error {
    Io { path: PathBuf, source: std::io::Error },
    SourceNotFound(PathBuf),
    InvalidArgument(String),
    SerializationError(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Error::Io { path, source } => write!(f, "IO error on {}: {}", path.display(), source),
            Error::SourceNotFound(path) => write!(f, "Source file not found: {}", path.display()),
            Error::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            Error::SerializationError(msg) => write!(f, "Serialization error: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl Error {
    /// Wraps an I/O error with the path it happened on; a missing file becomes
    /// [`Error::SourceNotFound`].
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            Error::SourceNotFound(path)
        } else {
            Error::Io { path, source }
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::SerializationError(format!("JSON serialization error: {}", err))
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Self {
        Error::SerializationError(format!("YAML serialization error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_maps_to_source_not_found() {
        let err = Error::io("A.java", std::io::Error::from(std::io::ErrorKind::NotFound));
        assert!(matches!(err, Error::SourceNotFound(_)));
        assert_eq!(err.to_string(), "Source file not found: A.java");
    }

    #[test]
    fn test_io_error_keeps_source() {
        let err = Error::io(
            "out/A.http",
            std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        );
        assert!(err.to_string().starts_with("IO error on out/A.http"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
