//! # NMEA 0183 Sentence Engine
//!
//! This library decodes, inspects, builds and encodes NMEA 0183 sentences of the form
//! `$TTSSS,D1,D2,...,Dn*CC\r\n` (and `!` encapsulated sentences such as AIS `VDM`).
//!
//! The engine is organized in layers:
//! - [`checksum`]: XOR checksum calculation, validation and suffix handling
//! - [`SentenceDecoder`] / [`SentenceEncoder`]: tokenizing raw lines into [`Sentence`]s
//!   and serializing them back, with configurable checksum and line ending handling
//! - [`Sentence`]: typed field access by index (strings, numbers, characters, times,
//!   dates, coordinates and repeated field groups)
//! - [`SentenceRegistry`]: maps sentence ids to typed views such as [`sentences::GGA`]
//! - [`FragmentAssembler`]: rebuilds multi-fragment AIS messages
//!
//! ## Usage
//!
//! ```rust
//! use nmea0183_sentence::{ChecksumMode, LineEndingMode, SentenceDecoder};
//!
//! let decoder = SentenceDecoder::new()
//!     .checksum_mode(ChecksumMode::Required)
//!     .line_ending_mode(LineEndingMode::Required);
//!
//! let sentence = decoder.decode("$GPGGA,123456,data*41\r\n").unwrap();
//! assert_eq!(sentence.address(), "GPGGA");
//! assert_eq!(sentence.get_string(0).unwrap(), "123456");
//! ```
//!
//! Typed access goes through the registry or directly through a [`SentenceKind`]:
//!
//! ```rust
//! use nmea0183_sentence::{SentenceKind, TalkerId, sentences::DPT};
//!
//! let mut dpt = DPT::new(TalkerId::SD).unwrap();
//! dpt.set_depth(11.44).unwrap();
//! dpt.set_offset(0.5).unwrap();
//! assert_eq!(dpt.to_string(), "$SDDPT,11.4,0.5,*4A");
//! ```

mod ais;
pub mod checksum;
pub mod error;
mod nmea0183;
mod parsing;
mod registry;
pub mod sentence;
pub mod sentences;
mod talker;

pub use ais::{AisPayload, Assembly, FragmentAssembler, FragmentHeader};
pub use error::{Error, Result};
pub use nmea0183::{
    ChecksumMode, LINE_ENDING, LineEndingMode, MAX_LENGTH, SentenceDecoder, SentenceEncoder,
};
pub use registry::{Construct, ParserEntry, SentenceKind, SentenceRegistry, SentenceView};
pub use sentence::{
    Axis, BeginChar, FieldGroups, Hemisphere, Position, PositionFields, Sentence,
};
pub use talker::TalkerId;

#[cfg(doctest)]
#[doc = include_str!("../README.md")]
struct README;
