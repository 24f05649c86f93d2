//! # Error Types
//!
//! This module defines the error type shared by every part of the sentence engine:
//! the tokenizer, the typed field accessors, the coordinate converter and the
//! sentence type registry.
//!
//! All errors are reported synchronously to the immediate caller. The engine never
//! substitutes a default for missing or malformed data.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Holds the result of the internal `nom` parsers.
///
/// These never leave the crate: the tokenizer converts every `nom` failure into
/// [`Error::InvalidSentenceFormat`].
pub(crate) type IResult<I, O> = nom::IResult<I, O, nom::error::Error<I>>;

/// Represents all possible errors raised while decoding, accessing or encoding sentences.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The raw line does not match the NMEA 0183 sentence grammar.
    ///
    /// Raised for a bad begin character, a malformed address field, a missing
    /// first comma, non-printable characters or a malformed checksum suffix.
    #[error("invalid sentence format: {0:?}")]
    InvalidSentenceFormat(String),

    /// A checksum is present but does not match the computed value.
    #[error("checksum mismatch: calculated {expected:02X}, found {found:02X}")]
    ChecksumMismatch {
        /// The checksum calculated from the sentence content
        expected: u8,
        /// The checksum found in the sentence
        found: u8,
    },

    /// The decoder requires a checksum but the sentence carries none.
    #[error("sentence has no checksum")]
    MissingChecksum,

    /// The requested field is empty or its index is out of range.
    ///
    /// An empty field means "no data", which is distinct from a zero value.
    #[error("field {index} is not available")]
    FieldNotAvailable {
        /// Zero-based field index (address field excluded)
        index: usize,
    },

    /// The field holds data that cannot be interpreted as the requested type.
    #[error("field {index} value {value:?} is not a valid {expected}")]
    MalformedField {
        /// Zero-based field index (address field excluded)
        index: usize,
        /// Raw content of the field
        value: String,
        /// Human readable name of the expected type
        expected: &'static str,
    },

    /// A setter received a value outside of its documented domain.
    #[error("value {value} is out of range [{min}, {max}]")]
    ValueOutOfRange {
        /// The rejected value
        value: f64,
        /// Lower inclusive bound
        min: f64,
        /// Upper inclusive bound
        max: f64,
    },

    /// Encoding the sentence would exceed the configured maximum line length.
    #[error("sentence length {length} exceeds maximum of {max}")]
    SentenceTooLong {
        /// Length of the encoded line including its terminator
        length: usize,
        /// Configured maximum
        max: usize,
    },

    /// A typed sentence was built from a sentence carrying another sentence id.
    #[error("expected sentence id {expected}, found {found}")]
    UnexpectedSentenceId {
        /// Id(s) accepted by the typed sentence
        expected: &'static str,
        /// Id found in the sentence
        found: String,
    },

    /// No constructor is registered for the sentence id.
    #[error("no parser registered for sentence id {0:?}")]
    UnknownSentenceType(String),

    /// A registration is missing one of its constructors or uses an invalid id.
    #[error("invalid extension: {0}")]
    InvalidExtension(String),

    /// A registered constructor failed.
    #[error("failed to construct {id} sentence: {source}")]
    ConstructionFailed {
        /// Sentence id that was dispatched
        id: String,
        /// Error returned by the constructor
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    pub(crate) fn format(line: &str) -> Self {
        Error::InvalidSentenceFormat(line.to_string())
    }

    pub(crate) fn malformed(index: usize, value: &str, expected: &'static str) -> Self {
        Error::MalformedField {
            index,
            value: value.to_string(),
            expected,
        }
    }
}
