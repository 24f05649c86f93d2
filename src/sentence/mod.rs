//! # Sentence
//!
//! [`Sentence`] is the generic, field-list representation of an NMEA 0183 line:
//! a begin character, a talker id, a sentence id and an ordered list of fields.
//!
//! Fields are stored as strings and interpreted lazily through the typed accessors
//! (see [`fields`](self::fields)), the coordinate converter
//! (see [`position`](self::position)) and the time/date accessors
//! (see [`datetime`](self::datetime)). An absent value is an empty field, never
//! a missing entry.

pub mod datetime;
pub mod fields;
pub mod position;

use std::{fmt, str::FromStr};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Error, Result, SentenceDecoder, SentenceEncoder, TalkerId};

pub use fields::FieldGroups;
pub use position::{Axis, Hemisphere, Position, PositionFields};

/// Field separator character.
pub const FIELD_DELIMITER: char = ',';

/// Maximum number of characters in the address field (talker id and sentence id).
pub const ADDRESS_MAX_LENGTH: usize = 10;

/// Minimum number of characters in a sentence id.
pub const SENTENCE_ID_MIN_LENGTH: usize = 3;

/// The first character of a sentence.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BeginChar {
    #[default]
    /// `$` - regular sentence with delimited, parameter based content
    Standard,
    /// `!` - encapsulated sentence carrying an encoded payload (AIS)
    Encapsulated,
}

impl BeginChar {
    /// Returns the character that starts a sentence of this kind.
    pub const fn as_char(&self) -> char {
        match self {
            BeginChar::Standard => '$',
            BeginChar::Encapsulated => '!',
        }
    }

    /// Maps a character to a begin character, if it is one.
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            '$' => Some(BeginChar::Standard),
            '!' => Some(BeginChar::Encapsulated),
            _ => None,
        }
    }

    /// Whether `c` may start a sentence.
    pub const fn is_begin_char(c: char) -> bool {
        BeginChar::from_char(c).is_some()
    }
}

impl fmt::Display for BeginChar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// A generic NMEA 0183 sentence.
///
/// The talker id and sentence id are the identity of the sentence, the field list
/// is its only mutable state. There is always at least one field slot.
///
/// # Examples
///
/// Decoding:
///
/// ```rust
/// use nmea0183_sentence::{Sentence, TalkerId};
///
/// let sentence: Sentence = "$GPBOD,234.9,T,228.8,M,RUSKI,*1D".parse().unwrap();
/// assert_eq!(sentence.talker_id(), TalkerId::GP);
/// assert_eq!(sentence.sentence_id(), "BOD");
/// assert_eq!(sentence.field_count(), 6);
/// assert_eq!(sentence.get_string(4).unwrap(), "RUSKI");
/// assert!(!sentence.has_value(5));
/// ```
///
/// Encoding:
///
/// ```rust
/// use nmea0183_sentence::{BeginChar, Sentence, TalkerId};
///
/// let mut sentence = Sentence::new(BeginChar::Standard, TalkerId::SD, "DPT", 3).unwrap();
/// sentence.set_double(0, 11.44, 1, 1).unwrap();
/// sentence.set_double(1, 0.5, 1, 1).unwrap();
/// assert_eq!(sentence.to_sentence().unwrap(), "$SDDPT,11.4,0.5,*4A");
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Sentence {
    begin_char: BeginChar,
    talker_id: TalkerId,
    sentence_id: String,
    fields: Vec<String>,
}

impl Sentence {
    /// Creates an empty sentence with `field_count` empty fields.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidSentenceFormat`] if the sentence id is not 3 or more uppercase
    ///   alphanumeric characters or makes the address field longer than 10 characters.
    /// - [`Error::ValueOutOfRange`] if `field_count` is zero.
    pub fn new(
        begin_char: BeginChar,
        talker_id: TalkerId,
        sentence_id: &str,
        field_count: usize,
    ) -> Result<Self> {
        validate_sentence_id(talker_id, sentence_id)?;
        validate_field_count(field_count)?;

        Ok(Sentence {
            begin_char,
            talker_id,
            sentence_id: sentence_id.to_string(),
            fields: vec![String::new(); field_count],
        })
    }

    /// Assembles a sentence from already validated parts.
    pub(crate) fn from_parts(
        begin_char: BeginChar,
        talker_id: TalkerId,
        sentence_id: String,
        fields: Vec<String>,
    ) -> Self {
        debug_assert!(!fields.is_empty());
        Sentence {
            begin_char,
            talker_id,
            sentence_id,
            fields,
        }
    }

    /// Decodes a raw line with the default, lenient [`SentenceDecoder`].
    pub fn parse(line: &str) -> Result<Self> {
        SentenceDecoder::new().decode(line)
    }

    /// Returns the begin character of the sentence.
    pub fn begin_char(&self) -> BeginChar {
        self.begin_char
    }

    /// Returns the talker id of the sentence.
    pub fn talker_id(&self) -> TalkerId {
        self.talker_id
    }

    /// Changes the talker id, for example to re-emit a sentence under another device class.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidSentenceFormat`] if the sentence id does not fit the address field
    /// with the new talker id.
    pub fn set_talker_id(&mut self, talker_id: TalkerId) -> Result<()> {
        validate_sentence_id(talker_id, &self.sentence_id)?;
        self.talker_id = talker_id;
        Ok(())
    }

    /// Returns the sentence id, e.g. `GGA`.
    pub fn sentence_id(&self) -> &str {
        &self.sentence_id
    }

    /// Returns the address field, the talker id followed by the sentence id.
    pub fn address(&self) -> String {
        format!("{}{}", self.talker_id, self.sentence_id)
    }

    /// Returns all fields, absent values being empty strings.
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Returns the number of fields, always at least one.
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Whether the sentence is a proprietary (`$P...`) sentence.
    pub fn is_proprietary(&self) -> bool {
        self.talker_id.is_proprietary()
    }

    /// Whether the sentence was emitted by an AIS station or is an encapsulated sentence.
    pub fn is_ais(&self) -> bool {
        self.begin_char == BeginChar::Encapsulated || self.talker_id.is_ais()
    }

    /// Encodes the sentence with the default [`SentenceEncoder`].
    ///
    /// # Errors
    ///
    /// See [`SentenceEncoder::encode`].
    pub fn to_sentence(&self) -> Result<String> {
        SentenceEncoder::new().encode(self)
    }

    /// Encodes the sentence, enforcing a custom maximum line length.
    ///
    /// # Errors
    ///
    /// See [`SentenceEncoder::encode`].
    pub fn to_sentence_with(&self, max_length: usize) -> Result<String> {
        SentenceEncoder::new().max_length(max_length).encode(self)
    }

    pub(crate) fn fields_mut(&mut self) -> &mut Vec<String> {
        &mut self.fields
    }
}

/// Renders the line with a fresh checksum and without a length limit.
impl fmt::Display for Sentence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::nmea0183::render(self))
    }
}

impl FromStr for Sentence {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Sentence::parse(s)
    }
}

pub(crate) fn validate_sentence_id(talker_id: TalkerId, sentence_id: &str) -> Result<()> {
    let address_length = talker_id.as_str().len() + sentence_id.len();

    if sentence_id.len() < SENTENCE_ID_MIN_LENGTH
        || address_length > ADDRESS_MAX_LENGTH
        || !sentence_id.bytes().all(is_address_byte)
    {
        return Err(Error::format(sentence_id));
    }

    Ok(())
}

pub(crate) fn validate_field_count(field_count: usize) -> Result<()> {
    if field_count == 0 {
        return Err(Error::ValueOutOfRange {
            value: 0.0,
            min: 1.0,
            max: f64::INFINITY,
        });
    }

    Ok(())
}

pub(crate) fn is_address_byte(b: u8) -> bool {
    b.is_ascii_uppercase() || b.is_ascii_digit()
}
