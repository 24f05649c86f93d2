//! # Coordinates
//!
//! Conversion between decimal degrees and the `ddmm.mmm` (latitude) or `dddmm.mmm`
//! (longitude) notation plus hemisphere letter used by position-bearing sentences.
//!
//! Position sentences lay out their four coordinate fields at different offsets.
//! Each sentence type describes its layout with a [`PositionFields`] table instead
//! of reimplementing the arithmetic.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Error, Result, Sentence};

/// Mean Earth radius in metres (IUGG).
pub const EARTH_RADIUS: f64 = 6_371_008.8;

/// Latitude or longitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Latitude,
    Longitude,
}

impl Axis {
    /// Largest absolute value in degrees.
    pub const fn limit(&self) -> f64 {
        match self {
            Axis::Latitude => 90.0,
            Axis::Longitude => 180.0,
        }
    }
}

/// Hemisphere indicator of a coordinate.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hemisphere {
    /// `N`
    North,
    /// `S`
    South,
    /// `E`
    East,
    /// `W`
    West,
}

impl Hemisphere {
    /// Maps an indicator letter to a hemisphere, provided it belongs to `axis`.
    pub const fn from_char(c: char, axis: Axis) -> Option<Self> {
        match (c, axis) {
            ('N', Axis::Latitude) => Some(Hemisphere::North),
            ('S', Axis::Latitude) => Some(Hemisphere::South),
            ('E', Axis::Longitude) => Some(Hemisphere::East),
            ('W', Axis::Longitude) => Some(Hemisphere::West),
            _ => None,
        }
    }

    /// Returns the indicator letter.
    pub const fn as_char(&self) -> char {
        match self {
            Hemisphere::North => 'N',
            Hemisphere::South => 'S',
            Hemisphere::East => 'E',
            Hemisphere::West => 'W',
        }
    }

    /// Returns the axis this hemisphere belongs to.
    pub const fn axis(&self) -> Axis {
        match self {
            Hemisphere::North | Hemisphere::South => Axis::Latitude,
            Hemisphere::East | Hemisphere::West => Axis::Longitude,
        }
    }

    /// `-1.0` for south and west, `1.0` otherwise.
    pub const fn sign(&self) -> f64 {
        match self {
            Hemisphere::South | Hemisphere::West => -1.0,
            Hemisphere::North | Hemisphere::East => 1.0,
        }
    }

    fn of(value: f64, axis: Axis) -> Self {
        match (axis, value < 0.0) {
            (Axis::Latitude, false) => Hemisphere::North,
            (Axis::Latitude, true) => Hemisphere::South,
            (Axis::Longitude, false) => Hemisphere::East,
            (Axis::Longitude, true) => Hemisphere::West,
        }
    }
}

impl fmt::Display for Hemisphere {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// A geographic position in signed decimal degrees (south and west negative).
///
/// ```rust
/// use nmea0183_sentence::Position;
///
/// let helsinki = Position::new(60.1699, 24.9384).unwrap();
/// let tallinn = Position::new(59.4370, 24.7536).unwrap();
/// let distance = helsinki.distance_to(&tallinn);
/// assert!((distance - 82_200.0).abs() < 500.0);
///
/// assert!(Position::new(90.5, 0.0).is_err());
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    latitude: f64,
    longitude: f64,
    altitude: Option<f64>,
}

impl Position {
    /// Creates a position without altitude.
    ///
    /// # Errors
    ///
    /// [`Error::ValueOutOfRange`] if the latitude is not within ±90 or the longitude
    /// is not within ±180 degrees.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        check_range(latitude, Axis::Latitude)?;
        check_range(longitude, Axis::Longitude)?;

        Ok(Position {
            latitude,
            longitude,
            altitude: None,
        })
    }

    /// Attaches an altitude in metres.
    pub fn with_altitude(self, altitude: f64) -> Self {
        Position {
            altitude: Some(altitude),
            ..self
        }
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn altitude(&self) -> Option<f64> {
        self.altitude
    }

    pub fn latitude_hemisphere(&self) -> Hemisphere {
        Hemisphere::of(self.latitude, Axis::Latitude)
    }

    pub fn longitude_hemisphere(&self) -> Hemisphere {
        Hemisphere::of(self.longitude, Axis::Longitude)
    }

    /// Great-circle distance in metres (haversine formula), altitude ignored.
    pub fn distance_to(&self, other: &Position) -> f64 {
        let lat1 = self.latitude.to_radians();
        let lat2 = other.latitude.to_radians();
        let delta_lat = lat2 - lat1;
        let delta_lon = (other.longitude - self.longitude).to_radians();

        let a = (delta_lat / 2.0).sin().powi(2)
            + lat1.cos() * lat2.cos() * (delta_lon / 2.0).sin().powi(2);

        2.0 * EARTH_RADIUS * a.sqrt().asin()
    }
}

/// Field offsets of the four coordinate fields of a position-bearing sentence.
///
/// ```rust
/// use nmea0183_sentence::{PositionFields, Sentence};
///
/// const GLL: PositionFields = PositionFields::new(0, 1, 2, 3);
///
/// let sentence = Sentence::parse("$GPGLL,6011.552,N,02501.941,E,120045,A,A*4B").unwrap();
/// let position = GLL.get(&sentence).unwrap();
/// assert!((position.latitude() - 60.19253).abs() < 1e-5);
/// assert!((position.longitude() - 25.03235).abs() < 1e-5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionFields {
    pub latitude: usize,
    pub lat_hemisphere: usize,
    pub longitude: usize,
    pub lon_hemisphere: usize,
}

impl PositionFields {
    pub const fn new(
        latitude: usize,
        lat_hemisphere: usize,
        longitude: usize,
        lon_hemisphere: usize,
    ) -> Self {
        PositionFields {
            latitude,
            lat_hemisphere,
            longitude,
            lon_hemisphere,
        }
    }

    /// Reads the position from `sentence`, see [`Sentence::get_position`].
    pub fn get(&self, sentence: &Sentence) -> Result<Position> {
        sentence.get_position(self)
    }

    /// Writes the position to `sentence`, see [`Sentence::set_position`].
    pub fn set(&self, sentence: &mut Sentence, position: &Position) -> Result<()> {
        sentence.set_position(self, position)
    }
}

impl Sentence {
    /// Parses a `[d]ddmm.mmm` field into unsigned decimal degrees.
    ///
    /// # Errors
    ///
    /// [`Error::FieldNotAvailable`] if the field is empty, [`Error::MalformedField`] if
    /// it is not a coordinate.
    pub fn get_degrees(&self, index: usize) -> Result<f64> {
        let value = self.get_string(index)?;
        parse_degrees(value).ok_or_else(|| Error::malformed(index, value, "degrees and minutes"))
    }

    /// Parses a hemisphere indicator belonging to `axis`.
    ///
    /// # Errors
    ///
    /// [`Error::FieldNotAvailable`] if the field is empty, [`Error::MalformedField`] if
    /// the letter is not a hemisphere of `axis` (`E` where `N`/`S` is expected, ...).
    pub fn get_hemisphere(&self, index: usize, axis: Axis) -> Result<Hemisphere> {
        let expected = match axis {
            Axis::Latitude => "N or S",
            Axis::Longitude => "E or W",
        };

        let c = self
            .get_char(index)
            .map_err(|e| match e {
                Error::MalformedField { index, value, .. } => {
                    Error::MalformedField { index, value, expected }
                }
                e => e,
            })?;

        Hemisphere::from_char(c, axis)
            .ok_or_else(|| Error::malformed(index, &c.to_string(), expected))
    }

    /// Reads a signed position from the four fields described by `fields`.
    ///
    /// # Errors
    ///
    /// [`Error::FieldNotAvailable`] if any of the fields is empty, [`Error::MalformedField`]
    /// if one of them cannot be parsed or the coordinate lies outside its range.
    pub fn get_position(&self, fields: &PositionFields) -> Result<Position> {
        let latitude = self.get_coordinate(fields.latitude, fields.lat_hemisphere, Axis::Latitude)?;
        let longitude =
            self.get_coordinate(fields.longitude, fields.lon_hemisphere, Axis::Longitude)?;

        Ok(Position {
            latitude,
            longitude,
            altitude: None,
        })
    }

    /// Writes the position to the four fields described by `fields`. The altitude, if
    /// any, is left to the caller.
    ///
    /// # Errors
    ///
    /// - [`Error::ValueOutOfRange`] if a coordinate lies outside its range.
    /// - [`Error::FieldNotAvailable`] if one of the offsets is out of range.
    pub fn set_position(&mut self, fields: &PositionFields, position: &Position) -> Result<()> {
        check_range(position.latitude, Axis::Latitude)?;
        check_range(position.longitude, Axis::Longitude)?;

        self.set_latitude(fields.latitude, fields.lat_hemisphere, position.latitude)?;
        self.set_longitude(fields.longitude, fields.lon_hemisphere, position.longitude)
    }

    /// Writes a signed latitude as `ddmm.mmm` plus `N`/`S`.
    ///
    /// # Errors
    ///
    /// [`Error::ValueOutOfRange`] outside ±90, [`Error::FieldNotAvailable`] if an offset
    /// is out of range.
    pub fn set_latitude(&mut self, index: usize, hemisphere: usize, latitude: f64) -> Result<()> {
        self.set_coordinate(index, hemisphere, latitude, Axis::Latitude)
    }

    /// Writes a signed longitude as `dddmm.mmm` plus `E`/`W`.
    ///
    /// # Errors
    ///
    /// [`Error::ValueOutOfRange`] outside ±180, [`Error::FieldNotAvailable`] if an offset
    /// is out of range.
    pub fn set_longitude(&mut self, index: usize, hemisphere: usize, longitude: f64) -> Result<()> {
        self.set_coordinate(index, hemisphere, longitude, Axis::Longitude)
    }

    fn get_coordinate(&self, index: usize, hemisphere: usize, axis: Axis) -> Result<f64> {
        let degrees = self.get_degrees(index)?;
        let hemisphere = self.get_hemisphere(hemisphere, axis)?;

        if degrees > axis.limit() {
            return Err(Error::malformed(index, self.get_string(index)?, "coordinate in range"));
        }

        Ok(degrees * hemisphere.sign())
    }

    fn set_coordinate(
        &mut self,
        index: usize,
        hemisphere_index: usize,
        value: f64,
        axis: Axis,
    ) -> Result<()> {
        let formatted = format_coordinate(value, axis)?;

        // both offsets are checked before anything is written
        let count = self.field_count();
        for i in [index, hemisphere_index] {
            if i >= count {
                return Err(Error::FieldNotAvailable { index: i });
            }
        }

        self.set_string(index, formatted.as_str())?;
        self.set_char(hemisphere_index, Hemisphere::of(value, axis).as_char())
    }
}

/// Parses `[d]ddmm.mmm` into unsigned decimal degrees.
///
/// The two digits left of the decimal point and the fraction are minutes, everything
/// further left is whole degrees. Returns `None` if the text is not a coordinate or the
/// minutes are 60 or more.
///
/// ```rust
/// use nmea0183_sentence::sentence::position::parse_degrees;
///
/// assert_eq!(parse_degrees("4530.000"), Some(45.5));
/// assert_eq!(parse_degrees("00030.000"), Some(0.5));
/// assert_eq!(parse_degrees("4560.000"), None);
/// assert_eq!(parse_degrees("45E0.000"), None);
/// ```
pub fn parse_degrees(value: &str) -> Option<f64> {
    let dot = value.find('.').unwrap_or(value.len());
    let (degrees, minutes) = value.split_at(dot.saturating_sub(2));

    let is_minutes_byte = |b: u8| b.is_ascii_digit() || b == b'.';
    if !degrees.bytes().all(|b| b.is_ascii_digit()) || !minutes.bytes().all(is_minutes_byte) {
        return None;
    }

    let degrees: f64 = if degrees.is_empty() { 0.0 } else { degrees.parse().ok()? };
    let minutes: f64 = minutes.parse().ok()?;

    (minutes < 60.0).then_some(degrees + minutes / 60.0)
}

/// Formats the absolute value of a latitude as `ddmm.mmm`.
///
/// Returns `None` outside ±90 and for NaN.
///
/// ```rust
/// use nmea0183_sentence::sentence::position::format_latitude;
///
/// assert_eq!(format_latitude(60.192533).as_deref(), Some("6011.552"));
/// assert_eq!(format_latitude(-5.5).as_deref(), Some("0530.000"));
/// assert_eq!(format_latitude(f64::NAN), None);
/// ```
pub fn format_latitude(latitude: f64) -> Option<String> {
    format_coordinate(latitude, Axis::Latitude).ok()
}

/// Formats the absolute value of a longitude as `dddmm.mmm`.
///
/// Returns `None` outside ±180 and for NaN.
///
/// ```rust
/// use nmea0183_sentence::sentence::position::format_longitude;
///
/// assert_eq!(format_longitude(25.03235).as_deref(), Some("02501.941"));
/// assert_eq!(format_longitude(-179.99999).as_deref(), Some("17959.999"));
/// assert_eq!(format_longitude(180.5), None);
/// ```
pub fn format_longitude(longitude: f64) -> Option<String> {
    format_coordinate(longitude, Axis::Longitude).ok()
}

fn format_coordinate(value: f64, axis: Axis) -> Result<String> {
    check_range(value, axis)?;

    let (degrees, minutes, thousandths) = split_minutes(value);
    Ok(match axis {
        Axis::Latitude => format!("{degrees:02}{minutes:02}.{thousandths:03}"),
        Axis::Longitude => format!("{degrees:03}{minutes:02}.{thousandths:03}"),
    })
}

/// Splits into whole degrees, whole minutes and thousandths of a minute, rounding once
/// on the total so that minutes never read `60.000`.
fn split_minutes(value: f64) -> (u64, u64, u64) {
    let total = (value.abs() * 60_000.0).round() as u64;
    let minutes = total % 60_000;
    (total / 60_000, minutes / 1000, minutes % 1000)
}

fn check_range(value: f64, axis: Axis) -> Result<()> {
    let limit = axis.limit();

    if !(-limit..=limit).contains(&value) {
        return Err(Error::ValueOutOfRange {
            value,
            min: -limit,
            max: limit,
        });
    }

    Ok(())
}
