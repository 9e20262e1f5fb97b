//! Error types for catalog ingestion and the binary codec.
//!
//! # Error Categories
//!
//! | Variant | Scope | Batch-fatal? |
//! |---------|-------|--------------|
//! | [`MalformedRecord`](CatalogError::MalformedRecord) | One text record | No — caller decides skip or abort |
//! | [`TruncatedRecord`](CatalogError::TruncatedRecord) | Binary stream | Yes — later offsets are unrecoverable |
//! | [`VersionMismatch`](CatalogError::VersionMismatch) | Binary stream | Yes |
//! | [`InvalidHeader`](CatalogError::InvalidHeader) | Binary stream | Yes |
//! | [`Io`](CatalogError::Io) | Either | Yes |
//!
//! An unknown type code or an absent magnitude is a valid data state, not an
//! error; those never surface here. Likewise a lookup for a designator that
//! is not in the published catalog returns `None` from the catalog API rather
//! than an error.

use thiserror::Error;

/// Convenience alias for `Result<T, CatalogError>`.
pub type Result<T> = std::result::Result<T, CatalogError>;

#[derive(Debug, Error)]
pub enum CatalogError {
    /// A text field failed to parse as its declared type.
    ///
    /// Record-local: the decoder reports it with the original line and field
    /// index and keeps no partial object. Whether the batch continues is the
    /// caller's policy, never the decoder's.
    #[error("malformed record at line {line}, field {field}: {reason} in {record:?}")]
    MalformedRecord {
        line: usize,
        field: usize,
        reason: String,
        record: String,
    },

    /// The binary stream ended inside record `index`.
    #[error("binary stream ended inside record {index}")]
    TruncatedRecord { index: u64 },

    /// The binary shape selector names an unknown record layout.
    #[error("unknown binary shape selector {selector}")]
    VersionMismatch { selector: u32 },

    /// Bad magic bytes or an unsupported format version.
    #[error("invalid catalog header: {0}")]
    InvalidHeader(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl CatalogError {
    /// Creates a [`MalformedRecord`](Self::MalformedRecord) carrying the
    /// offending line and field index.
    pub fn malformed(line: usize, field: usize, reason: impl Into<String>, record: &str) -> Self {
        Self::MalformedRecord {
            line,
            field,
            reason: reason.into(),
            record: record.to_string(),
        }
    }

    /// Returns `true` if the current batch cannot safely continue past this
    /// error. Only malformed text records are recoverable by skipping.
    pub fn is_batch_fatal(&self) -> bool {
        !matches!(self, Self::MalformedRecord { .. })
    }
}
