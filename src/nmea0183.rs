//! # Sentence Tokenizer
//!
//! Splits raw NMEA 0183 lines into [`Sentence`]s and serializes them back.
//!
//! A line has the shape `<begin><address>,<field>,...,<field>[*CC][\r\n]` where `begin`
//! is `$` or `!` and the address is the talker id followed by the sentence id. The
//! decoder is configurable to handle variations in:
//! - Checksum requirements (required or optional)
//! - Line ending requirements (CRLF optional, required or forbidden)

use log::warn;
use nom::{
    Parser,
    bytes::complete::{take_till, take_while_m_n},
    character::complete::{char, one_of},
    combinator::opt,
    error::ErrorKind,
    sequence::preceded,
};

use crate::{
    Error, Result, Sentence, TalkerId,
    checksum::{self, DELIMITER, checksum, format_checksum, hex_checksum},
    error::IResult,
    parsing::consumed,
    sentence::{
        ADDRESS_MAX_LENGTH, BeginChar, FIELD_DELIMITER, is_address_byte, validate_sentence_id,
    },
};

/// Maximum length of a sentence in characters, line terminator included.
pub const MAX_LENGTH: usize = 82;

/// Sentence terminator.
pub const LINE_ENDING: &str = "\r\n";

/// Defines how the decoder should handle sentence checksums.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ChecksumMode {
    /// Checksum is required and must be present.
    ///
    /// Decoding fails with [`Error::MissingChecksum`] if no `*CC` suffix is found.
    /// Use this mode for strict NMEA 0183 compliance or when data integrity is critical.
    Required,

    /// Checksum is optional but will be validated if present.
    ///
    /// Use this mode when working with mixed sources or legacy equipment that does not
    /// always emit checksums.
    #[default]
    Optional,
}

/// Defines how the decoder should handle line terminators.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum LineEndingMode {
    /// Any trailing `\r` and `\n` characters are ignored.
    #[default]
    Optional,

    /// The line must end with `\r\n`, as read from a serial port or a log file.
    Required,

    /// The line must not end with a terminator, as delivered by APIs or databases
    /// that already split the stream into lines.
    Forbidden,
}

/// Configurable NMEA 0183 line decoder.
///
/// # Examples
///
/// ```rust
/// use nmea0183_sentence::{ChecksumMode, LineEndingMode, SentenceDecoder};
///
/// // Lenient defaults: checksum and terminator are both optional
/// let decoder = SentenceDecoder::new();
/// assert!(decoder.decode("$GPGGA,123456,data*41\r\n").is_ok());
/// assert!(decoder.decode("$GPGGA,123456,data").is_ok());
/// assert!(decoder.decode("$GPGGA,123456,data*42").is_err()); // (invalid checksum)
///
/// // Strict NMEA compliance
/// let strict = SentenceDecoder::new()
///     .checksum_mode(ChecksumMode::Required)
///     .line_ending_mode(LineEndingMode::Required);
/// assert!(strict.decode("$GPGGA,123456,data*41\r\n").is_ok());
/// assert!(strict.decode("$GPGGA,123456,data*41").is_err()); // (missing CRLF)
/// assert!(strict.decode("$GPGGA,123456,data\r\n").is_err()); // (missing checksum)
/// ```
#[must_use]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SentenceDecoder {
    /// Checksum mode for the decoder.
    checksum_mode: ChecksumMode,

    /// Line ending mode for the decoder.
    line_ending_mode: LineEndingMode,
}

impl SentenceDecoder {
    /// Creates a decoder with default settings.
    ///
    /// The default settings are:
    /// - Checksum mode: [`ChecksumMode::Optional`]
    /// - Line ending mode: [`LineEndingMode::Optional`]
    pub fn new() -> Self {
        SentenceDecoder {
            checksum_mode: ChecksumMode::Optional,
            line_ending_mode: LineEndingMode::Optional,
        }
    }

    /// Sets the checksum mode.
    pub fn checksum_mode(mut self, mode: ChecksumMode) -> Self {
        self.checksum_mode = mode;
        self
    }

    /// Sets the line ending mode.
    pub fn line_ending_mode(mut self, mode: LineEndingMode) -> Self {
        self.line_ending_mode = mode;
        self
    }

    /// Decodes a raw line into a [`Sentence`].
    ///
    /// Lines longer than [`MAX_LENGTH`] are accepted with a warning.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidSentenceFormat`] if the line does not follow the sentence grammar,
    ///   contains non-printable characters or carries an unknown talker id.
    /// - [`Error::MissingChecksum`] if the checksum is required but absent.
    /// - [`Error::ChecksumMismatch`] if the checksum does not match the content.
    pub fn decode(&self, line: &str) -> Result<Sentence> {
        let body = self.strip_line_ending(line)?;

        if !body.bytes().all(is_printable) {
            return Err(Error::format(line));
        }

        let (_, frame) = consumed(frame, ErrorKind::Eof)
            .parse(body)
            .map_err(|_| Error::format(line))?;

        let (talker_id, sentence_id) =
            split_address(frame.address).ok_or_else(|| Error::format(line))?;

        let calculated = checksum(&body[1..checksum::index(body)]);
        match frame.checksum {
            None if self.checksum_mode == ChecksumMode::Required => {
                return Err(Error::MissingChecksum);
            }
            Some(found) if found != calculated => {
                return Err(Error::ChecksumMismatch {
                    expected: calculated,
                    found,
                });
            }
            _ => {}
        }

        if body.len() + LINE_ENDING.len() > MAX_LENGTH {
            warn!("sentence exceeds {MAX_LENGTH} characters: {body}");
        }

        let fields = frame.payload.split(FIELD_DELIMITER).map(String::from).collect();

        Ok(Sentence::from_parts(
            frame.begin_char,
            talker_id,
            sentence_id.to_string(),
            fields,
        ))
    }

    fn strip_line_ending<'a>(&self, line: &'a str) -> Result<&'a str> {
        match self.line_ending_mode {
            LineEndingMode::Optional => Ok(checksum::trim_line_ending(line)),
            LineEndingMode::Required => line
                .strip_suffix(LINE_ENDING)
                .ok_or_else(|| Error::format(line)),
            LineEndingMode::Forbidden if line.ends_with(['\r', '\n']) => Err(Error::format(line)),
            LineEndingMode::Forbidden => Ok(line),
        }
    }
}

/// Configurable NMEA 0183 line encoder.
///
/// ```rust
/// use nmea0183_sentence::{Sentence, SentenceEncoder};
///
/// let sentence = Sentence::parse("$GPBOD,234.9,T,228.8,M,RUSKI,").unwrap();
///
/// let line = SentenceEncoder::new().line_ending(true).encode(&sentence).unwrap();
/// assert_eq!(line, "$GPBOD,234.9,T,228.8,M,RUSKI,*1D\r\n");
///
/// assert!(SentenceEncoder::new().max_length(32).encode(&sentence).is_err());
/// ```
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SentenceEncoder {
    max_length: usize,
    line_ending: bool,
}

impl SentenceEncoder {
    /// Creates an encoder limited to [`MAX_LENGTH`] characters, without line terminator.
    pub fn new() -> Self {
        SentenceEncoder {
            max_length: MAX_LENGTH,
            line_ending: false,
        }
    }

    /// Sets the maximum line length, terminator included.
    pub fn max_length(mut self, max_length: usize) -> Self {
        self.max_length = max_length;
        self
    }

    /// Appends `\r\n` to encoded lines.
    pub fn line_ending(mut self, line_ending: bool) -> Self {
        self.line_ending = line_ending;
        self
    }

    /// Encodes a sentence with a freshly computed checksum.
    ///
    /// The length check always accounts for the two terminator characters, whether or
    /// not they are appended.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidSentenceFormat`] if a field contains a `,` or `*` delimiter or a
    ///   non-printable character.
    /// - [`Error::SentenceTooLong`] if the line exceeds the maximum length.
    pub fn encode(&self, sentence: &Sentence) -> Result<String> {
        if let Some(field) = sentence
            .fields()
            .iter()
            .find(|field| !field.bytes().all(is_field_byte))
        {
            return Err(Error::format(field));
        }

        let mut line = render(sentence);

        let length = line.len() + LINE_ENDING.len();
        if length > self.max_length {
            return Err(Error::SentenceTooLong {
                length,
                max: self.max_length,
            });
        }

        if self.line_ending {
            line.push_str(LINE_ENDING);
        }

        Ok(line)
    }
}

impl Default for SentenceEncoder {
    fn default() -> Self {
        SentenceEncoder::new()
    }
}

/// Serializes a sentence with its checksum, without validation nor length limit.
pub(crate) fn render(sentence: &Sentence) -> String {
    let mut body = sentence.address();
    for field in sentence.fields() {
        body.push(FIELD_DELIMITER);
        body.push_str(field);
    }

    format!(
        "{}{body}{DELIMITER}{}",
        sentence.begin_char(),
        format_checksum(checksum(&body))
    )
}

#[derive(Debug, PartialEq)]
struct Frame<'a> {
    begin_char: BeginChar,
    address: &'a str,
    payload: &'a str,
    checksum: Option<u8>,
}

/// `<begin><address>,<payload>[*CC]`, the line terminator already removed.
fn frame(i: &str) -> IResult<&str, Frame<'_>> {
    let (i, begin_char) = one_of("$!")
        .map(|c| match c {
            '!' => BeginChar::Encapsulated,
            _ => BeginChar::Standard,
        })
        .parse(i)?;
    let (i, address) = take_while_m_n(3, ADDRESS_MAX_LENGTH, |c: char| {
        c.is_ascii() && is_address_byte(c as u8)
    })
    .parse(i)?;
    let (i, _) = char(FIELD_DELIMITER).parse(i)?;
    let (i, payload) = take_till(|c| c == DELIMITER).parse(i)?;
    let (i, checksum) = opt(preceded(char(DELIMITER), hex_checksum)).parse(i)?;

    Ok((
        i,
        Frame {
            begin_char,
            address,
            payload,
            checksum,
        },
    ))
}

/// Splits an address into talker id and sentence id.
///
/// An address starting with `P` is proprietary unless its first two characters form
/// a known talker id.
fn split_address(address: &str) -> Option<(TalkerId, &str)> {
    let (talker_id, sentence_id) = match TalkerId::from_code(address.get(..2)?) {
        Some(talker_id) => (talker_id, &address[2..]),
        None => (TalkerId::Proprietary, address.strip_prefix('P')?),
    };

    validate_sentence_id(talker_id, sentence_id).ok()?;
    Some((talker_id, sentence_id))
}

fn is_printable(b: u8) -> bool {
    (0x20..=0x7E).contains(&b)
}

fn is_field_byte(b: u8) -> bool {
    is_printable(b) && b != FIELD_DELIMITER as u8 && b != DELIMITER as u8
}
