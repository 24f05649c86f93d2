//! # Typed Field Access
//!
//! Getters and setters interpreting the fields of a [`Sentence`] by zero-based index
//! (address field and checksum excluded).
//!
//! An empty field means "no data": every getter fails with
//! [`Error::FieldNotAvailable`] on it, so callers probe optional fields with
//! [`Sentence::has_value`] first. Setters write the exact textual formats NMEA
//! expects (zero padded integers, fixed decimal counts, `.` as decimal separator).

use std::iter;

use crate::{Error, Result, Sentence, sentence::validate_field_count};

impl Sentence {
    /// Whether the field exists and is not empty.
    pub fn has_value(&self, index: usize) -> bool {
        self.fields().get(index).is_some_and(|field| !field.is_empty())
    }

    /// Returns the content of a field.
    ///
    /// # Errors
    ///
    /// [`Error::FieldNotAvailable`] if the field is empty or `index` is out of range.
    pub fn get_string(&self, index: usize) -> Result<&str> {
        match self.fields().get(index) {
            Some(field) if !field.is_empty() => Ok(field),
            _ => Err(Error::FieldNotAvailable { index }),
        }
    }

    /// Parses a field as an integer.
    ///
    /// # Errors
    ///
    /// [`Error::FieldNotAvailable`] as [`Sentence::get_string`], [`Error::MalformedField`]
    /// if the content is not an integer.
    pub fn get_int(&self, index: usize) -> Result<i32> {
        let value = self.get_string(index)?;
        value
            .parse()
            .map_err(|_| Error::malformed(index, value, "integer"))
    }

    /// Parses a field as a decimal number.
    ///
    /// # Errors
    ///
    /// [`Error::FieldNotAvailable`] as [`Sentence::get_string`], [`Error::MalformedField`]
    /// if the content is not a finite decimal number.
    pub fn get_double(&self, index: usize) -> Result<f64> {
        let value = self.get_string(index)?;
        value
            .parse::<f64>()
            .ok()
            .filter(|number| number.is_finite())
            .ok_or_else(|| Error::malformed(index, value, "decimal number"))
    }

    /// Returns a single-character field.
    ///
    /// # Errors
    ///
    /// [`Error::FieldNotAvailable`] as [`Sentence::get_string`], [`Error::MalformedField`]
    /// if the field holds more than one character.
    pub fn get_char(&self, index: usize) -> Result<char> {
        let value = self.get_string(index)?;
        let mut chars = value.chars();

        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(c),
            _ => Err(Error::malformed(index, value, "single character")),
        }
    }

    /// Sets the content of a field verbatim, `None` clears it.
    ///
    /// ```rust
    /// use nmea0183_sentence::{BeginChar, Sentence, TalkerId};
    ///
    /// let mut sentence = Sentence::new(BeginChar::Standard, TalkerId::GP, "BOD", 6).unwrap();
    /// sentence.set_string(4, "RUSKI").unwrap();
    /// assert!(sentence.has_value(4));
    /// sentence.set_string(4, None).unwrap();
    /// assert!(!sentence.has_value(4));
    /// ```
    ///
    /// # Errors
    ///
    /// [`Error::FieldNotAvailable`] if `index` is out of range.
    pub fn set_string<'a>(
        &mut self,
        index: usize,
        value: impl Into<Option<&'a str>>,
    ) -> Result<()> {
        let field = self.field_mut(index)?;
        field.clear();
        if let Some(value) = value.into() {
            field.push_str(value);
        }
        Ok(())
    }

    /// Sets a single-character field.
    ///
    /// # Errors
    ///
    /// [`Error::FieldNotAvailable`] if `index` is out of range.
    pub fn set_char(&mut self, index: usize, value: char) -> Result<()> {
        let field = self.field_mut(index)?;
        field.clear();
        field.push(value);
        Ok(())
    }

    /// Sets an integer field, zero padded to at least `min_digits` characters.
    ///
    /// ```rust
    /// use nmea0183_sentence::{BeginChar, Sentence, TalkerId};
    ///
    /// let mut sentence = Sentence::new(BeginChar::Standard, TalkerId::GP, "GGA", 14).unwrap();
    /// sentence.set_int(6, 7, 2).unwrap();
    /// assert_eq!(sentence.get_string(6).unwrap(), "07");
    /// ```
    ///
    /// # Errors
    ///
    /// [`Error::FieldNotAvailable`] if `index` is out of range.
    pub fn set_int(&mut self, index: usize, value: i64, min_digits: usize) -> Result<()> {
        *self.field_mut(index)? = format!("{value:0min_digits$}");
        Ok(())
    }

    /// Sets a decimal field with a fixed pattern.
    ///
    /// The integer part is zero padded to `leading` digits and the fraction has exactly
    /// `decimals` digits, rounded half-up. With `leading == 0` the integer part is
    /// omitted when it is zero (`0.5` with one decimal gives `.5`). When both counts
    /// are zero the value is rounded to a bare integer of at least one digit.
    ///
    /// ```rust
    /// use nmea0183_sentence::{BeginChar, Sentence, TalkerId};
    ///
    /// let mut sentence = Sentence::new(BeginChar::Standard, TalkerId::GP, "VTG", 9).unwrap();
    /// sentence.set_double(0, 54.75, 3, 1).unwrap();
    /// assert_eq!(sentence.get_string(0).unwrap(), "054.8");
    /// ```
    ///
    /// # Errors
    ///
    /// - [`Error::FieldNotAvailable`] if `index` is out of range.
    /// - [`Error::ValueOutOfRange`] if `value` is not finite.
    pub fn set_double(
        &mut self,
        index: usize,
        value: f64,
        leading: usize,
        decimals: usize,
    ) -> Result<()> {
        let formatted = format_decimal(value, leading, decimals).ok_or(Error::ValueOutOfRange {
            value,
            min: f64::MIN,
            max: f64::MAX,
        })?;

        *self.field_mut(index)? = formatted;
        Ok(())
    }

    /// Sets a bearing or heading field, `ddd.d`.
    ///
    /// # Errors
    ///
    /// - [`Error::FieldNotAvailable`] if `index` is out of range.
    /// - [`Error::ValueOutOfRange`] if `value` is not within `0..=360`.
    pub fn set_degrees(&mut self, index: usize, value: f64) -> Result<()> {
        if !(0.0..=360.0).contains(&value) {
            return Err(Error::ValueOutOfRange {
                value,
                min: 0.0,
                max: 360.0,
            });
        }

        self.set_double(index, value, 3, 1)
    }

    /// Grows (with empty fields) or shrinks (dropping trailing fields) the field list
    /// to exactly `count` fields.
    ///
    /// # Errors
    ///
    /// [`Error::ValueOutOfRange`] if `count` is zero.
    pub fn set_field_count(&mut self, count: usize) -> Result<()> {
        validate_field_count(count)?;
        self.fields_mut().resize(count, String::new());
        Ok(())
    }

    /// Replaces every field from `start` onwards with `values`.
    ///
    /// The field count becomes `start + values.len()`; if `start` lies beyond the
    /// current end, the gap is filled with empty fields. Used for sentences whose
    /// tail has a variable length.
    ///
    /// ```rust
    /// use nmea0183_sentence::{BeginChar, Sentence, TalkerId};
    ///
    /// let mut sentence = Sentence::new(BeginChar::Standard, TalkerId::II, "XDR", 4).unwrap();
    /// sentence.set_fields(0, &["C", "19.52", "C", "TempAir", "P", "1.02481", "B", "Barometer"]).unwrap();
    /// assert_eq!(sentence.field_count(), 8);
    /// ```
    ///
    /// # Errors
    ///
    /// [`Error::ValueOutOfRange`] if the sentence would be left without fields.
    pub fn set_fields<S: AsRef<str>>(&mut self, start: usize, values: &[S]) -> Result<()> {
        validate_field_count(start + values.len())?;

        let fields = self.fields_mut();
        fields.resize(start, String::new());
        fields.extend(values.iter().map(|value| value.as_ref().to_string()));
        Ok(())
    }

    /// Same as [`Sentence::set_fields`].
    pub fn set_strings<S: AsRef<str>>(&mut self, start: usize, values: &[S]) -> Result<()> {
        self.set_fields(start, values)
    }

    fn field_mut(&mut self, index: usize) -> Result<&mut String> {
        self.fields_mut()
            .get_mut(index)
            .ok_or(Error::FieldNotAvailable { index })
    }
}

/// A repeated group of `size` consecutive fields starting at field `start`.
///
/// Sentences such as XDR carry a variable number of fixed-size groups. This view
/// addresses them by group number instead of raw field arithmetic.
///
/// ```rust
/// use nmea0183_sentence::{FieldGroups, Sentence};
///
/// const MEASUREMENTS: FieldGroups = FieldGroups::new(0, 4);
///
/// let sentence = Sentence::parse("$IIXDR,C,19.52,C,TempAir,P,1.02481,B,Barometer*7E").unwrap();
/// assert_eq!(MEASUREMENTS.count(&sentence), 2);
/// assert_eq!(MEASUREMENTS.get(&sentence, 1).unwrap()[3], "Barometer");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldGroups {
    start: usize,
    size: usize,
}

impl FieldGroups {
    /// Creates a group view. `size` must not be zero.
    pub const fn new(start: usize, size: usize) -> Self {
        assert!(size > 0, "field groups must contain at least one field");
        FieldGroups { start, size }
    }

    /// Index of the first field of the first group.
    pub const fn start(&self) -> usize {
        self.start
    }

    /// Number of fields per group.
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Number of complete groups present in the sentence.
    pub fn count(&self, sentence: &Sentence) -> usize {
        sentence.field_count().saturating_sub(self.start) / self.size
    }

    /// Returns the fields of group `n`.
    ///
    /// # Errors
    ///
    /// [`Error::FieldNotAvailable`] if the group is missing or incomplete.
    pub fn get<'a>(&self, sentence: &'a Sentence, n: usize) -> Result<&'a [String]> {
        let first = self.first_index(n);

        if n >= self.count(sentence) {
            return Err(Error::FieldNotAvailable { index: first });
        }

        Ok(&sentence.fields()[first..first + self.size])
    }

    /// Overwrites group `n`, or appends a group when `n` equals [`FieldGroups::count`].
    ///
    /// # Errors
    ///
    /// - [`Error::ValueOutOfRange`] if `values` does not hold exactly `size` entries.
    /// - [`Error::FieldNotAvailable`] if `n` is beyond the next free group.
    pub fn set<S: AsRef<str>>(
        &self,
        sentence: &mut Sentence,
        n: usize,
        values: &[S],
    ) -> Result<()> {
        self.check_size(values.len())?;

        let count = self.count(sentence);
        let first = self.first_index(n);

        if n > count {
            return Err(Error::FieldNotAvailable { index: first });
        }

        if n == count {
            // drop any incomplete trailing group before appending
            sentence.fields_mut().truncate(first);
            sentence.set_fields(first, values)
        } else {
            for (offset, value) in values.iter().enumerate() {
                let value: &str = value.as_ref();
                sentence.set_string(first + offset, value)?;
            }
            Ok(())
        }
    }

    /// Replaces all groups with `groups`.
    ///
    /// # Errors
    ///
    /// - [`Error::ValueOutOfRange`] if a group does not hold exactly `size` entries, or if
    ///   the sentence would be left without fields.
    pub fn set_all<G, S>(&self, sentence: &mut Sentence, groups: &[G]) -> Result<()>
    where
        G: AsRef<[S]>,
        S: AsRef<str>,
    {
        let mut values: Vec<&str> = Vec::with_capacity(groups.len() * self.size);

        for group in groups {
            let group: &[S] = group.as_ref();
            self.check_size(group.len())?;
            values.extend(group.iter().map(|value| value.as_ref()));
        }

        sentence.set_fields(self.start, &values)
    }

    // saturates for group numbers far beyond the field list
    fn first_index(&self, n: usize) -> usize {
        self.start.saturating_add(n.saturating_mul(self.size))
    }

    fn check_size(&self, len: usize) -> Result<()> {
        if len != self.size {
            return Err(Error::ValueOutOfRange {
                value: len as f64,
                min: self.size as f64,
                max: self.size as f64,
            });
        }

        Ok(())
    }
}

/// Formats a number with a fixed decimal pattern, rounding half-up.
///
/// Returns `None` for non-finite values. See [`Sentence::set_double`] for the
/// meaning of `leading` and `decimals`.
///
/// ```rust
/// use nmea0183_sentence::sentence::fields::format_decimal;
///
/// assert_eq!(format_decimal(2.5, 1, 0).as_deref(), Some("3"));
/// assert_eq!(format_decimal(-1.25, 2, 1).as_deref(), Some("-01.3"));
/// assert_eq!(format_decimal(f64::NAN, 1, 1), None);
/// ```
pub fn format_decimal(value: f64, leading: usize, decimals: usize) -> Option<String> {
    if !value.is_finite() {
        return None;
    }

    // `Display` yields the shortest round-tripping decimal, never an exponent
    let repr = value.abs().to_string();
    let (int_part, frac_part) = repr.split_once('.').unwrap_or((repr.as_str(), ""));

    let mut digits: Vec<u8> = int_part
        .bytes()
        .chain(frac_part.bytes().chain(iter::repeat(b'0')).take(decimals))
        .map(|b| b - b'0')
        .collect();

    if frac_part.as_bytes().get(decimals).is_some_and(|&b| b >= b'5') {
        round_up(&mut digits);
    }

    let (int_digits, frac_digits) = digits.split_at(digits.len() - decimals);
    let significant = int_digits
        .iter()
        .position(|&d| d != 0)
        .map_or(&[][..], |first| &int_digits[first..]);

    let min_int = if leading == 0 && decimals == 0 { 1 } else { leading };
    let is_zero = digits.iter().all(|&d| d == 0);

    let mut formatted = String::with_capacity(min_int.max(significant.len()) + decimals + 2);
    if value.is_sign_negative() && !is_zero {
        formatted.push('-');
    }
    formatted.extend(iter::repeat_n('0', min_int.saturating_sub(significant.len())));
    formatted.extend(significant.iter().map(|&d| char::from(b'0' + d)));
    if decimals > 0 {
        formatted.push('.');
        formatted.extend(frac_digits.iter().map(|&d| char::from(b'0' + d)));
    }

    Some(formatted)
}

fn round_up(digits: &mut Vec<u8>) {
    for digit in digits.iter_mut().rev() {
        if *digit == 9 {
            *digit = 0;
        } else {
            *digit += 1;
            return;
        }
    }

    digits.insert(0, 1);
}
