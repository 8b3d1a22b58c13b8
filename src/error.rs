use std::error::Error as StdError;
use std::fmt;
use std::path::PathBuf;

/// Failure categories for file-backed JSON operations.
///
/// `NotFound`, `Permission`, and `Io` originate in the filesystem;
/// `Malformed` and `Unrepresentable` originate in the JSON codec.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    Internal,
    NotFound,
    Permission,
    Io,
    Malformed,
    Unrepresentable,
}

impl ErrorKind {
    /// True for failures raised by the filesystem.
    pub fn is_storage(self) -> bool {
        matches!(self, Self::NotFound | Self::Permission | Self::Io)
    }

    /// True for failures raised by the JSON codec (decode or encode).
    pub fn is_format(self) -> bool {
        matches!(self, Self::Malformed | Self::Unrepresentable)
    }
}

#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    message: Option<String>,
    path: Option<PathBuf>,
    source: Option<Box<dyn StdError + Send + Sync>>,
}

impl Error {
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            message: None,
            path: None,
            source: None,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn path(&self) -> Option<&std::path::Path> {
        self.path.as_deref()
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_source(mut self, source: impl StdError + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.kind)?;
        if let Some(message) = &self.message {
            write!(f, ": {message}")?;
        }
        if let Some(path) = &self.path {
            write!(f, " (path: {})", path.display())?;
        }
        Ok(())
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|source| source.as_ref() as &(dyn StdError + 'static))
    }
}

#[cfg(test)]
mod tests {
    use super::{Error, ErrorKind};

    #[test]
    fn kinds_split_into_storage_and_format() {
        let storage = [ErrorKind::NotFound, ErrorKind::Permission, ErrorKind::Io];
        for kind in storage {
            assert!(kind.is_storage());
            assert!(!kind.is_format());
        }

        let format = [ErrorKind::Malformed, ErrorKind::Unrepresentable];
        for kind in format {
            assert!(kind.is_format());
            assert!(!kind.is_storage());
        }

        assert!(!ErrorKind::Internal.is_storage());
        assert!(!ErrorKind::Internal.is_format());
    }

    #[test]
    fn display_includes_message_and_path() {
        let err = Error::new(ErrorKind::Malformed)
            .with_message("unexpected end of input")
            .with_path("/tmp/broken.json");
        let text = err.to_string();
        assert!(text.starts_with("Malformed: unexpected end of input"));
        assert!(text.contains("(path: /tmp/broken.json)"));
    }

    #[test]
    fn source_is_preserved() {
        let io = std::io::Error::other("disk slipped");
        let err = Error::new(ErrorKind::Io).with_source(io);
        let source = std::error::Error::source(&err).expect("source");
        assert!(source.to_string().contains("disk slipped"));
    }
}
