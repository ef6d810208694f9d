// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Error types for DRDF encoding and decoding.
//!
//! Every failure aborts the current read or write call. The variants map
//! onto the four classes of problems a caller can run into:
//! - malformed streams ([`DrdfError::Format`])
//! - checksum mismatches ([`DrdfError::Integrity`])
//! - pixel format/shape disagreements ([`DrdfError::Encoding`])
//! - builder contract violations ([`DrdfError::Usage`])

use std::fmt;

/// Errors that can occur while building, writing or reading a DRDF file.
#[derive(Debug, Clone, PartialEq)]
pub enum DrdfError {
    /// Malformed header, bad fixed chunk length or out-of-order chunk
    Format {
        /// Chunk tag or stage being processed
        context: String,
        /// Error message
        message: String,
    },

    /// Trailer checksum does not match the recomputed running checksum
    Integrity {
        /// Checksum recomputed while reading
        computed: u32,
        /// Checksum stored in the `ERAW` chunk
        expected: u32,
    },

    /// Invalid format code or shape/element type combination
    Encoding {
        /// Error message
        message: String,
    },

    /// Builder or accessor called without the required context
    Usage {
        /// Operation that was attempted
        operation: String,
        /// Error message
        message: String,
    },

    /// Underlying I/O failure
    Io {
        /// Kind reported by the operating system
        kind: std::io::ErrorKind,
        /// Error message
        message: String,
    },
}

impl DrdfError {
    /// Create a format error.
    pub fn format(context: impl Into<String>, message: impl Into<String>) -> Self {
        DrdfError::Format {
            context: context.into(),
            message: message.into(),
        }
    }

    /// Create an integrity error.
    pub fn integrity(computed: u32, expected: u32) -> Self {
        DrdfError::Integrity { computed, expected }
    }

    /// Create an encoding error.
    pub fn encoding(message: impl Into<String>) -> Self {
        DrdfError::Encoding {
            message: message.into(),
        }
    }

    /// Create a usage error.
    pub fn usage(operation: impl Into<String>, message: impl Into<String>) -> Self {
        DrdfError::Usage {
            operation: operation.into(),
            message: message.into(),
        }
    }

    /// Returns true for [`DrdfError::Format`].
    pub fn is_format(&self) -> bool {
        matches!(self, DrdfError::Format { .. })
    }

    /// Returns true for [`DrdfError::Integrity`].
    pub fn is_integrity(&self) -> bool {
        matches!(self, DrdfError::Integrity { .. })
    }

    /// Returns true for [`DrdfError::Encoding`].
    pub fn is_encoding(&self) -> bool {
        matches!(self, DrdfError::Encoding { .. })
    }

    /// Returns true for [`DrdfError::Usage`].
    pub fn is_usage(&self) -> bool {
        matches!(self, DrdfError::Usage { .. })
    }

    /// Get structured fields for logging.
    pub fn log_fields(&self) -> Vec<(&'static str, String)> {
        match self {
            DrdfError::Format { context, message } => {
                vec![("context", context.clone()), ("message", message.clone())]
            }
            DrdfError::Integrity { computed, expected } => vec![
                ("computed", format!("{computed:08X}")),
                ("expected", format!("{expected:08X}")),
            ],
            DrdfError::Encoding { message } => vec![("message", message.clone())],
            DrdfError::Usage { operation, message } => {
                vec![("operation", operation.clone()), ("message", message.clone())]
            }
            DrdfError::Io { kind, message } => {
                vec![("kind", format!("{kind:?}")), ("message", message.clone())]
            }
        }
    }
}

impl fmt::Display for DrdfError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DrdfError::Format { context, message } => {
                write!(f, "Format error in {context}: {message}")
            }
            DrdfError::Integrity { computed, expected } => write!(
                f,
                "Checksum mismatch: calculated {computed:08X}, expected {expected:08X}"
            ),
            DrdfError::Encoding { message } => write!(f, "Encoding error: {message}"),
            DrdfError::Usage { operation, message } => {
                write!(f, "Invalid use of {operation}: {message}")
            }
            DrdfError::Io { message, .. } => write!(f, "I/O error: {message}"),
        }
    }
}

impl std::error::Error for DrdfError {}

impl From<std::io::Error> for DrdfError {
    fn from(err: std::io::Error) -> Self {
        DrdfError::Io {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

/// Result type for DRDF operations.
pub type Result<T> = std::result::Result<T, DrdfError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_error() {
        let err = DrdfError::format("EVNT", "bad length");
        assert!(err.is_format());
        assert_eq!(err.to_string(), "Format error in EVNT: bad length");
    }

    #[test]
    fn test_integrity_error_reports_both_values() {
        let err = DrdfError::integrity(0xDEADBEEF, 0x1234);
        assert!(err.is_integrity());
        assert_eq!(
            err.to_string(),
            "Checksum mismatch: calculated DEADBEEF, expected 00001234"
        );
    }

    #[test]
    fn test_encoding_error() {
        let err = DrdfError::encoding("invalid format code 9");
        assert!(err.is_encoding());
        assert!(!err.is_format());
        assert_eq!(err.to_string(), "Encoding error: invalid format code 9");
    }

    #[test]
    fn test_usage_error() {
        let err = DrdfError::usage("add_image", "no current event");
        assert!(err.is_usage());
        assert_eq!(
            err.to_string(),
            "Invalid use of add_image: no current event"
        );
    }

    #[test]
    fn test_log_fields_integrity() {
        let err = DrdfError::integrity(1, 2);
        let fields = err.log_fields();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0], ("computed", "00000001".to_string()));
        assert_eq!(fields[1], ("expected", "00000002".to_string()));
    }

    #[test]
    fn test_log_fields_usage() {
        let err = DrdfError::usage("set_georef", "no current run");
        let fields = err.log_fields();
        assert_eq!(fields[0].0, "operation");
        assert_eq!(fields[0].1, "set_georef");
        assert_eq!(fields[1].0, "message");
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: DrdfError = io_err.into();
        assert!(matches!(
            err,
            DrdfError::Io {
                kind: std::io::ErrorKind::NotFound,
                ..
            }
        ));
        assert_eq!(err.to_string(), "I/O error: file not found");
    }

    #[test]
    fn test_error_clone() {
        let err1 = DrdfError::format("HRAW", "header mismatch");
        let err2 = err1.clone();
        assert_eq!(err1, err2);
    }
}
