use thiserror::Error;

/// Classifies rule-source errors for programmatic matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceErrorKind {
    /// Required path, URL or format not configured
    NotConfigured,
    /// File open/read/write failure
    FileError,
    /// Data format or decoding error (not a rule list, bad JSON shape, etc.)
    InvalidData,
    /// Download failure (connection, HTTP status, body read)
    DownloadFailed,
    /// Download did not finish in time
    Timeout,
}

/// Public suffix engine error types
#[derive(Error, Debug)]
pub enum SuffixError {
    #[error("Rule source error: {message}")]
    Source {
        kind: SourceErrorKind,
        message: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SuffixError {
    pub(crate) fn from_kind(kind: SourceErrorKind, message: impl Into<String>) -> Self {
        SuffixError::Source {
            kind,
            message: message.into(),
        }
    }

    /// Source error kind, if this is a source error
    pub fn kind(&self) -> Option<SourceErrorKind> {
        match self {
            SuffixError::Source { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, SuffixError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_error_kind_is_matchable() {
        let err = SuffixError::from_kind(SourceErrorKind::DownloadFailed, "connection refused");
        match &err {
            SuffixError::Source { kind, .. } => {
                assert!(matches!(kind, SourceErrorKind::DownloadFailed));
            }
            _ => panic!("expected Source error"),
        }
        assert_eq!(err.kind(), Some(SourceErrorKind::DownloadFailed));
    }

    #[test]
    fn test_source_error_display_includes_message() {
        let err = SuffixError::from_kind(SourceErrorKind::Timeout, "fetch timed out after 30s");
        let display = format!("{}", err);
        assert!(display.contains("fetch timed out"), "got: {}", display);
    }

    #[test]
    fn test_io_error_has_no_source_kind() {
        let err = SuffixError::from(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "missing",
        ));
        assert_eq!(err.kind(), None);
        assert!(format!("{}", err).starts_with("IO error"));
    }

    #[test]
    fn test_json_error_conversion() {
        let err: SuffixError = serde_json::from_str::<Vec<String>>("{").unwrap_err().into();
        assert!(matches!(err, SuffixError::Json(_)));
    }
}
