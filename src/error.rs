//! Error types for snmp-passpersist.
//!
//! All errors are `#[non_exhaustive]` to allow adding new variants without breaking changes.

/// Result type alias using the library's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// OID validation error kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OidErrorKind {
    /// Invalid arc value (non-numeric, negative, out of range, or empty).
    InvalidArc,
    /// First arc must be 0, 1, or 2.
    InvalidFirstArc(u32),
    /// Second arc too large for first arc value.
    InvalidSecondArc { first: u32, second: u32 },
    /// OID has too many arcs (exceeds MAX_OID_LEN).
    TooManyArcs { count: usize, max: usize },
}

impl std::fmt::Display for OidErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidArc => write!(f, "invalid arc value"),
            Self::InvalidFirstArc(v) => write!(f, "first arc must be 0, 1, or 2, got {}", v),
            Self::InvalidSecondArc { first, second } => {
                write!(f, "second arc {} too large for first arc {}", second, first)
            }
            Self::TooManyArcs { count, max } => {
                write!(f, "OID has {} arcs, exceeds maximum {}", count, max)
            }
        }
    }
}

/// Library error type.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// I/O error on the protocol stream.
    #[error("I/O error: {source}")]
    Io {
        #[source]
        source: std::io::Error,
    },

    /// Invalid OID format.
    #[error("invalid OID{}: {kind}", input.as_ref().map(|i| format!(" '{}'", i)).unwrap_or_default())]
    InvalidOid {
        kind: OidErrorKind,
        input: Option<Box<str>>, // Only allocated when parsing string input
    },

    /// Population callback failed.
    #[error("collector failed: {source}")]
    Collector {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Invalid configuration value.
    #[error("invalid configuration: {message}")]
    Config { message: Box<str> },
}

impl Error {
    /// Create an invalid OID error from a kind (no input string).
    pub fn invalid_oid(kind: OidErrorKind) -> Self {
        Self::InvalidOid { kind, input: None }
    }

    /// Create an invalid OID error with the input string that failed.
    pub fn invalid_oid_with_input(kind: OidErrorKind, input: impl Into<Box<str>>) -> Self {
        Self::InvalidOid {
            kind,
            input: Some(input.into()),
        }
    }

    /// Wrap an arbitrary error raised by a collector.
    pub fn collector(source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Collector {
            source: source.into(),
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<Box<str>>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Returns the OID error kind if this is an OID validation failure.
    pub fn oid_kind(&self) -> Option<OidErrorKind> {
        match self {
            Self::InvalidOid { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Self::Io { source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_oid_display_with_input() {
        let err = Error::invalid_oid_with_input(OidErrorKind::InvalidArc, "1.3.x");
        assert_eq!(err.to_string(), "invalid OID '1.3.x': invalid arc value");
        assert_eq!(err.oid_kind(), Some(OidErrorKind::InvalidArc));
    }

    #[test]
    fn test_invalid_oid_display_without_input() {
        let err = Error::invalid_oid(OidErrorKind::TooManyArcs { count: 130, max: 128 });
        assert_eq!(
            err.to_string(),
            "invalid OID: OID has 130 arcs, exceeds maximum 128"
        );
    }

    #[test]
    fn test_collector_error_keeps_source() {
        let err = Error::collector("tool exited with status 2");
        assert_eq!(err.to_string(), "collector failed: tool exited with status 2");
        assert!(std::error::Error::source(&err).is_some());
        assert_eq!(err.oid_kind(), None);
    }
}
