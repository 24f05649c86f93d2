//! # Checksum Codec
//!
//! NMEA 0183 sentences may end with a `*CC` suffix where `CC` is a two-digit
//! hexadecimal value representing the XOR of all bytes between the begin character
//! (`$` or `!`) and the `*` delimiter, both excluded.
//!
//! All functions here are pure.

use nom::{
    Parser,
    bytes::complete::take,
    character::complete::hex_digit0,
    error::ErrorKind,
    number::complete::hex_u32,
};

use crate::{
    Error, Result,
    error::IResult,
    parsing::consumed,
    sentence::BeginChar,
};

/// Checksum delimiter character.
pub const DELIMITER: char = '*';

/// Calculates the XOR checksum of the given sentence content.
///
/// The content must not include the begin character nor the `*` delimiter.
///
/// # Examples
///
/// ```rust
/// use nmea0183_sentence::checksum;
///
/// assert_eq!(checksum::checksum("GPGGA,123456,data"), 0x41);
/// ```
pub fn checksum(body: &str) -> u8 {
    body.as_bytes()
        .iter()
        .fold(0u8, |accumulated_xor, &byte| accumulated_xor ^ byte)
}

/// Formats a checksum value as a two-digit uppercase hexadecimal string.
///
/// ```rust
/// use nmea0183_sentence::checksum::format_checksum;
///
/// assert_eq!(format_checksum(0x41), "41");
/// assert_eq!(format_checksum(0x0A), "0A");
/// ```
pub fn format_checksum(checksum: u8) -> String {
    format!("{checksum:02X}")
}

/// Returns the index of the `*` delimiter, or the length of `line` if there is none.
pub fn index(line: &str) -> usize {
    line.find(DELIMITER).unwrap_or(line.len())
}

/// Calculates the checksum of a sentence and returns it as two uppercase hex digits.
///
/// The leading begin character, an existing checksum suffix and any trailing
/// line terminator are ignored, so both `$GPBOD,...` and `GPBOD,...*1D\r\n`
/// yield the same value.
///
/// ```rust
/// use nmea0183_sentence::checksum;
///
/// assert_eq!(checksum::calculate("$GPBOD,234.9,T,228.8,M,RUSKI,*1D"), "1D");
/// assert_eq!(checksum::calculate("GPBOD,234.9,T,228.8,M,RUSKI,"), "1D");
/// ```
pub fn calculate(line: &str) -> String {
    format_checksum(checksum(body(line)))
}

/// Checks the checksum of a sentence.
///
/// Returns `Ok(true)` if the sentence carries no checksum or if the checksum matches
/// the calculated value, `Ok(false)` if it does not match.
///
/// # Errors
///
/// [`Error::InvalidSentenceFormat`] if the line does not start with a begin character
/// or if the characters after `*` are not exactly two hexadecimal digits.
///
/// ```rust
/// use nmea0183_sentence::checksum;
///
/// assert_eq!(checksum::validate("$GPBOD,234.9,T,228.8,M,RUSKI,*1D"), Ok(true));
/// assert_eq!(checksum::validate("$GPBOD,234.9,T,228.8,M,RUSKI,*1E"), Ok(false));
/// assert_eq!(checksum::validate("$GPBOD,234.9,T,228.8,M,RUSKI,"), Ok(true));
/// assert!(checksum::validate("$GPBOD,234.9,T,228.8,M,RUSKI,*ZZ").is_err());
/// ```
pub fn validate(line: &str) -> Result<bool> {
    if !line.starts_with(BeginChar::is_begin_char) {
        return Err(Error::format(line));
    }

    match suffix(line)? {
        Some(found) => Ok(found == checksum(body(line))),
        None => Ok(true),
    }
}

/// Replaces or adds the checksum suffix of a sentence.
///
/// Any trailing line terminator is dropped.
///
/// ```rust
/// use nmea0183_sentence::checksum;
///
/// assert_eq!(
///     checksum::append("$GPBOD,234.9,T,228.8,M,RUSKI,*00\r\n"),
///     "$GPBOD,234.9,T,228.8,M,RUSKI,*1D"
/// );
/// ```
pub fn append(line: &str) -> String {
    let trimmed = trim_line_ending(line);
    let end = index(trimmed);
    format!("{}{DELIMITER}{}", &trimmed[..end], calculate(trimmed))
}

/// Extracts and parses the checksum suffix, `None` when no `*` is present.
pub(crate) fn suffix(line: &str) -> Result<Option<u8>> {
    let trimmed = trim_line_ending(line);
    let end = index(trimmed);

    if end == trimmed.len() {
        return Ok(None);
    }

    let digits = &trimmed[end + DELIMITER.len_utf8()..];
    hex_checksum(digits)
        .map(|(_, cc)| Some(cc))
        .map_err(|_| Error::format(line))
}

/// Parses exactly two hexadecimal digits.
pub(crate) fn hex_checksum(i: &str) -> IResult<&str, u8> {
    let (i, cc) = consumed(take(2u8), ErrorKind::Count).parse(i)?;
    let (_, cc) = consumed(hex_digit0, ErrorKind::IsA).parse(cc)?;

    hex_u32.map(|cc| cc as u8).parse(cc).map(|(_, cc)| (i, cc))
}

fn body(line: &str) -> &str {
    let line = trim_line_ending(line);
    let line = line.strip_prefix(BeginChar::is_begin_char).unwrap_or(line);
    &line[..index(line)]
}

pub(crate) fn trim_line_ending(line: &str) -> &str {
    line.trim_end_matches(['\r', '\n'])
}
