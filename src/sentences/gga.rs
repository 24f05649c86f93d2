#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use time::Time;

use super::{GpsFixQuality, get_char_field, set_char_field};
use crate::{Error, Position, PositionFields, Result, Sentence};

const POSITION: PositionFields = PositionFields::new(1, 2, 3, 4);

const UTC_TIME: usize = 0;
const FIX_QUALITY: usize = 5;
const SATELLITES_IN_USE: usize = 6;
const HDOP: usize = 7;
const ALTITUDE: usize = 8;
const ALTITUDE_UNITS: usize = 9;
const GEOIDAL_HEIGHT: usize = 10;
const GEOIDAL_HEIGHT_UNITS: usize = 11;
const DGPS_AGE: usize = 12;
const DGPS_STATION_ID: usize = 13;

/// GGA - Global Positioning System Fix Data
///
/// <https://gpsd.gitlab.io/gpsd/NMEA.html#_gga_global_positioning_system_fix_data>
///
/// ```text
///                                                      11
///         1         2       3 4        5 6 7  8   9  10 |  12 13  14
///         |         |       | |        | | |  |   |   | |   | |   |
///  $--GGA,hhmmss.ss,ddmm.mm,a,dddmm.mm,a,x,xx,x.x,x.x,M,x.x,M,x.x,xxxx*hh<CR><LF>
/// ```
///
/// ```rust
/// use nmea0183_sentence::{SentenceKind, sentences::{GGA, GpsFixQuality}};
///
/// let gga = GGA::parse("$GPGGA,120044,6011.552,N,02501.941,E,1,00,2.0,28.0,M,19.6,M,,*79").unwrap();
/// assert_eq!(gga.fix_quality().unwrap(), GpsFixQuality::GpsFix);
///
/// let position = gga.position().unwrap();
/// assert!((position.latitude() - 60.19253).abs() < 1e-5);
/// assert_eq!(position.altitude(), Some(28.0));
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GGA {
    sentence: Sentence,
}

sentence_kind!(GGA, "GGA", 14);

impl GGA {
    /// Fix time in UTC
    pub fn time(&self) -> Result<Time> {
        self.sentence.get_time(UTC_TIME)
    }

    pub fn set_time(&mut self, time: Time) -> Result<()> {
        self.sentence.set_time(UTC_TIME, time)
    }

    /// Position of the fix, with the altitude above mean sea level when present.
    pub fn position(&self) -> Result<Position> {
        let position = POSITION.get(&self.sentence)?;

        if self.sentence.has_value(ALTITUDE) {
            return Ok(position.with_altitude(self.altitude()?));
        }

        Ok(position)
    }

    /// Writes the coordinates and the altitude. A position without altitude clears
    /// the altitude fields.
    pub fn set_position(&mut self, position: &Position) -> Result<()> {
        if let Some(altitude) = position.altitude().filter(|altitude| !altitude.is_finite()) {
            return Err(Error::ValueOutOfRange {
                value: altitude,
                min: f64::MIN,
                max: f64::MAX,
            });
        }

        POSITION.set(&mut self.sentence, position)?;

        match position.altitude() {
            Some(altitude) => self.set_altitude(altitude),
            None => {
                self.sentence.set_string(ALTITUDE, None)?;
                self.sentence.set_string(ALTITUDE_UNITS, None)
            }
        }
    }

    pub fn fix_quality(&self) -> Result<GpsFixQuality> {
        get_char_field(&self.sentence, FIX_QUALITY)
    }

    pub fn set_fix_quality(&mut self, quality: GpsFixQuality) -> Result<()> {
        set_char_field(&mut self.sentence, FIX_QUALITY, quality)
    }

    /// Number of satellites in use
    pub fn satellites_in_use(&self) -> Result<i32> {
        self.sentence.get_int(SATELLITES_IN_USE)
    }

    pub fn set_satellites_in_use(&mut self, count: u8) -> Result<()> {
        self.sentence.set_int(SATELLITES_IN_USE, count.into(), 2)
    }

    /// Horizontal Dilution of Precision
    pub fn hdop(&self) -> Result<f64> {
        self.sentence.get_double(HDOP)
    }

    pub fn set_hdop(&mut self, hdop: f64) -> Result<()> {
        self.sentence.set_double(HDOP, hdop, 1, 1)
    }

    /// Altitude above mean sea level (geoid) in meters
    pub fn altitude(&self) -> Result<f64> {
        self.sentence.get_double(ALTITUDE)
    }

    pub fn set_altitude(&mut self, altitude: f64) -> Result<()> {
        self.sentence.set_double(ALTITUDE, altitude, 1, 1)?;
        self.sentence.set_char(ALTITUDE_UNITS, 'M')
    }

    /// Geoidal separation in meters, negative when the geoid is below the WGS-84 ellipsoid
    pub fn geoidal_height(&self) -> Result<f64> {
        self.sentence.get_double(GEOIDAL_HEIGHT)
    }

    pub fn set_geoidal_height(&mut self, height: f64) -> Result<()> {
        self.sentence.set_double(GEOIDAL_HEIGHT, height, 1, 1)?;
        self.sentence.set_char(GEOIDAL_HEIGHT_UNITS, 'M')
    }

    /// Age of differential GPS data in seconds
    pub fn dgps_age(&self) -> Result<f64> {
        self.sentence.get_double(DGPS_AGE)
    }

    pub fn set_dgps_age(&mut self, seconds: f64) -> Result<()> {
        self.sentence.set_double(DGPS_AGE, seconds, 1, 1)
    }

    /// Differential reference station id
    pub fn dgps_station_id(&self) -> Result<&str> {
        self.sentence.get_string(DGPS_STATION_ID)
    }

    pub fn set_dgps_station_id(&mut self, id: Option<&str>) -> Result<()> {
        self.sentence.set_string(DGPS_STATION_ID, id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Error, SentenceKind, SentenceView, TalkerId};

    #[test]
    fn test_gga_parsing() {
        let gga = GGA::parse(
            "$GPGGA,001043.00,4404.14036,N,12118.85961,W,1,12,0.98,1113.0,M,-21.3,M,,*59",
        )
        .unwrap();

        assert_eq!(gga.time().unwrap().as_hms(), (0, 10, 43));
        assert_eq!(gga.fix_quality(), Ok(GpsFixQuality::GpsFix));
        assert_eq!(gga.satellites_in_use(), Ok(12));
        assert_eq!(gga.hdop(), Ok(0.98));
        assert_eq!(gga.geoidal_height(), Ok(-21.3));
        assert_eq!(gga.dgps_age(), Err(Error::FieldNotAvailable { index: DGPS_AGE }));
        assert_eq!(
            gga.dgps_station_id(),
            Err(Error::FieldNotAvailable { index: DGPS_STATION_ID })
        );

        let position = gga.position().unwrap();
        assert!((position.latitude() - 44.069006).abs() < 1e-6);
        assert!((position.longitude() + 121.314327).abs() < 1e-6);
        assert_eq!(position.altitude(), Some(1113.0));
    }

    #[test]
    fn test_gga_empty() {
        let gga = GGA::new(TalkerId::GN).unwrap();
        assert_eq!(gga.sentence().to_sentence().unwrap(), "$GNGGA,,,,,,,,,,,,,,*48");
        assert_eq!(gga.position(), Err(Error::FieldNotAvailable { index: 1 }));
        assert_eq!(gga.fix_quality(), Err(Error::FieldNotAvailable { index: FIX_QUALITY }));
    }

    #[test]
    fn test_gga_encoding() {
        let mut gga = GGA::new(TalkerId::GP).unwrap();

        gga.set_time(Time::from_hms(12, 0, 44).unwrap()).unwrap();
        let position = Position::new(60.19253, 25.03235).unwrap().with_altitude(28.0);
        gga.set_position(&position).unwrap();
        gga.set_fix_quality(GpsFixQuality::GpsFix).unwrap();
        gga.set_satellites_in_use(8).unwrap();
        gga.set_hdop(1.2).unwrap();
        gga.set_geoidal_height(19.6).unwrap();

        assert_eq!(
            gga.to_string(),
            "$GPGGA,120044.00,6011.552,N,02501.941,E,1,08,1.2,28.0,M,19.6,M,,*5E"
        );

        gga.set_position(&Position::new(60.19253, 25.03235).unwrap()).unwrap();
        assert!(!gga.sentence().has_value(ALTITUDE));
        assert!(!gga.sentence().has_value(ALTITUDE_UNITS));
    }

    #[test]
    fn test_gga_rejected_altitude_keeps_fields() {
        let line = "$GPGGA,120044,6011.552,N,02501.941,E,1,00,2.0,28.0,M,19.6,M,,*79";
        let mut gga = GGA::parse(line).unwrap();
        let before = gga.clone();

        for altitude in [f64::NAN, f64::INFINITY] {
            let position = Position::new(-33.85, 151.2).unwrap().with_altitude(altitude);
            assert!(matches!(gga.set_position(&position), Err(Error::ValueOutOfRange { .. })));
            assert_eq!(gga, before);
        }
    }
}
