//! # Time and Date Fields
//!
//! UTC time fields use the `hhmmss[.sss]` layout, date fields the `ddmmyy` layout with
//! a two-digit year: `83` to `99` map to the 1900s, everything else to the 2000s.

use std::iter;

use nom::{
    Parser,
    character::complete::{char, digit0},
    combinator::opt,
    error::{ErrorKind, make_error},
    sequence::preceded,
};
use time::{Date, Month, Time};

use crate::{
    Error, Result, Sentence,
    error::IResult,
    parsing::{consumed, fixed_digits},
};

/// First year representable by a two-digit `ddmmyy` date.
pub const FIRST_YEAR: i32 = 1983;

/// Last year representable by a two-digit `ddmmyy` date.
pub const LAST_YEAR: i32 = FIRST_YEAR + 99;

impl Sentence {
    /// Parses a `hhmmss[.sss]` UTC time field.
    ///
    /// ```rust
    /// use nmea0183_sentence::Sentence;
    ///
    /// let sentence = Sentence::parse("$GPRMC,120044.567,A,6011.552,N,02501.941,E,000.0,360.0,160705,006.1,E,A*0B").unwrap();
    /// let time = sentence.get_time(0).unwrap();
    /// assert_eq!(time.as_hms_milli(), (12, 0, 44, 567));
    /// ```
    ///
    /// # Errors
    ///
    /// [`Error::FieldNotAvailable`] if the field is empty, [`Error::MalformedField`] if it is
    /// not a valid time of day.
    pub fn get_time(&self, index: usize) -> Result<Time> {
        let value = self.get_string(index)?;

        consumed(utc_time, ErrorKind::Eof)
            .parse(value)
            .map(|(_, time)| time)
            .map_err(|_| Error::malformed(index, value, "hhmmss.ss time"))
    }

    /// Writes a UTC time as `hhmmss.ss`.
    ///
    /// # Errors
    ///
    /// [`Error::FieldNotAvailable`] if `index` is out of range.
    pub fn set_time(&mut self, index: usize, time: Time) -> Result<()> {
        let (hour, minute, second, nanosecond) = time.as_hms_nano();
        let hundredths = nanosecond / 10_000_000;

        self.set_string(index, format!("{hour:02}{minute:02}{second:02}.{hundredths:02}").as_str())
    }

    /// Parses a `ddmmyy` date field.
    ///
    /// # Errors
    ///
    /// [`Error::FieldNotAvailable`] if the field is empty, [`Error::MalformedField`] if it is
    /// not a valid calendar date.
    pub fn get_date(&self, index: usize) -> Result<Date> {
        let value = self.get_string(index)?;

        consumed(calendar_date, ErrorKind::Eof)
            .parse(value)
            .map(|(_, date)| date)
            .map_err(|_| Error::malformed(index, value, "ddmmyy date"))
    }

    /// Writes a date as `ddmmyy`.
    ///
    /// ```rust
    /// use nmea0183_sentence::{BeginChar, Sentence, TalkerId};
    /// use time::{Date, Month};
    ///
    /// let mut sentence = Sentence::new(BeginChar::Standard, TalkerId::GP, "RMC", 12).unwrap();
    /// let date = Date::from_calendar_date(2005, Month::July, 16).unwrap();
    /// sentence.set_date(8, date).unwrap();
    /// assert_eq!(sentence.get_string(8).unwrap(), "160705");
    /// assert_eq!(sentence.get_date(8).unwrap(), date);
    /// ```
    ///
    /// # Errors
    ///
    /// - [`Error::ValueOutOfRange`] if the year is not within [`FIRST_YEAR`] and [`LAST_YEAR`].
    /// - [`Error::FieldNotAvailable`] if `index` is out of range.
    pub fn set_date(&mut self, index: usize, date: Date) -> Result<()> {
        let year = date.year();

        if !(FIRST_YEAR..=LAST_YEAR).contains(&year) {
            return Err(Error::ValueOutOfRange {
                value: year as f64,
                min: FIRST_YEAR as f64,
                max: LAST_YEAR as f64,
            });
        }

        let (day, month) = (date.day(), u8::from(date.month()));
        let year = year % 100;

        self.set_string(index, format!("{day:02}{month:02}{year:02}").as_str())
    }
}

fn utc_time(i: &str) -> IResult<&str, Time> {
    let (i, (hour, minute, second, fraction)) = (
        fixed_digits(2),
        fixed_digits(2),
        fixed_digits(2),
        opt(preceded(char('.'), digit0)),
    )
        .parse(i)?;

    let nanosecond = fraction.map_or(0, fraction_nanos);

    let time = Time::from_hms_nano(hour as u8, minute as u8, second as u8, nanosecond)
        .or(Err(nom::Err::Error(make_error(i, ErrorKind::Verify))))?;

    Ok((i, time))
}

fn calendar_date(i: &str) -> IResult<&str, Date> {
    let (i, (day, month, year)) = (fixed_digits(2), fixed_digits(2), fixed_digits(2)).parse(i)?;

    let month = Month::try_from(month as u8)
        .or(Err(nom::Err::Error(make_error(i, ErrorKind::Verify))))?;

    let year = match year {
        83..=99 => year + 1900,
        _ => year + 2000,
    };

    let date = Date::from_calendar_date(year as i32, month, day as u8)
        .or(Err(nom::Err::Error(make_error(i, ErrorKind::Verify))))?;

    Ok((i, date))
}

/// Converts fraction-of-second digits to nanoseconds, ignoring digits past the ninth.
fn fraction_nanos(digits: &str) -> u32 {
    digits
        .bytes()
        .chain(iter::repeat(b'0'))
        .take(9)
        .fold(0, |nanos, digit| nanos * 10 + u32::from(digit - b'0'))
}
