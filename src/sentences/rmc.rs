#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use time::{Date, PrimitiveDateTime, Time};

use super::{CompassPoint, DataStatus, FaaMode, get_char_field, set_char_field};
use crate::{Position, PositionFields, Result, Sentence};

const POSITION: PositionFields = PositionFields::new(2, 3, 4, 5);

const UTC_TIME: usize = 0;
const STATUS: usize = 1;
const SPEED: usize = 6;
const COURSE: usize = 7;
const UTC_DATE: usize = 8;
const VARIATION: usize = 9;
const VARIATION_DIRECTION: usize = 10;
const MODE: usize = 11;

/// RMC - Recommended Minimum Navigation Information
///
/// <https://gpsd.gitlab.io/gpsd/NMEA.html#_rmc_recommended_minimum_navigation_information>
///
/// ```text
///         1         2 3       4 5        6  7   8   9    10 1112
///         |         | |       | |        |  |   |   |    |  | |
///  $--RMC,hhmmss.ss,A,ddmm.mm,a,dddmm.mm,a,x.x,x.x,xxxx,x.x,a,m*hh<CR><LF>
/// ```
///
/// ```rust
/// use nmea0183_sentence::{SentenceKind, sentences::RMC};
///
/// let rmc = RMC::parse(
///     "$GPRMC,120044.567,A,6011.552,N,02501.941,E,000.0,360.0,160705,006.1,E,A*0B",
/// )
/// .unwrap();
///
/// assert_eq!(rmc.variation().unwrap(), 6.1);
///
/// let date_time = rmc.date_time().unwrap();
/// assert_eq!(date_time.year(), 2005);
/// assert_eq!(date_time.as_hms_milli(), (12, 0, 44, 567));
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RMC {
    sentence: Sentence,
}

sentence_kind!(RMC, "RMC", 12);

impl RMC {
    /// Fix time in UTC
    pub fn time(&self) -> Result<Time> {
        self.sentence.get_time(UTC_TIME)
    }

    pub fn set_time(&mut self, time: Time) -> Result<()> {
        self.sentence.set_time(UTC_TIME, time)
    }

    /// Fix date in UTC
    pub fn date(&self) -> Result<Date> {
        self.sentence.get_date(UTC_DATE)
    }

    pub fn set_date(&mut self, date: Date) -> Result<()> {
        self.sentence.set_date(UTC_DATE, date)
    }

    /// Fix date and time combined.
    pub fn date_time(&self) -> Result<PrimitiveDateTime> {
        Ok(PrimitiveDateTime::new(self.date()?, self.time()?))
    }

    pub fn set_date_time(&mut self, date_time: PrimitiveDateTime) -> Result<()> {
        self.set_date(date_time.date())?;
        self.set_time(date_time.time())
    }

    pub fn status(&self) -> Result<DataStatus> {
        get_char_field(&self.sentence, STATUS)
    }

    pub fn set_status(&mut self, status: DataStatus) -> Result<()> {
        set_char_field(&mut self.sentence, STATUS, status)
    }

    pub fn position(&self) -> Result<Position> {
        POSITION.get(&self.sentence)
    }

    pub fn set_position(&mut self, position: &Position) -> Result<()> {
        POSITION.set(&mut self.sentence, position)
    }

    /// Speed over ground in knots
    pub fn speed(&self) -> Result<f64> {
        self.sentence.get_double(SPEED)
    }

    pub fn set_speed(&mut self, knots: f64) -> Result<()> {
        self.sentence.set_double(SPEED, knots, 3, 1)
    }

    /// Course over ground in degrees true
    pub fn course(&self) -> Result<f64> {
        self.sentence.get_double(COURSE)
    }

    pub fn set_course(&mut self, degrees: f64) -> Result<()> {
        self.sentence.set_degrees(COURSE, degrees)
    }

    /// Magnetic variation in degrees, easterly positive and westerly negative.
    pub fn variation(&self) -> Result<f64> {
        let variation = self.sentence.get_double(VARIATION)?;

        match get_char_field(&self.sentence, VARIATION_DIRECTION)? {
            CompassPoint::East => Ok(variation),
            CompassPoint::West => Ok(-variation),
        }
    }

    pub fn set_variation(&mut self, degrees: f64) -> Result<()> {
        let direction = if degrees < 0.0 {
            CompassPoint::West
        } else {
            CompassPoint::East
        };

        self.sentence.set_double(VARIATION, degrees.abs(), 3, 1)?;
        set_char_field(&mut self.sentence, VARIATION_DIRECTION, direction)
    }

    /// FAA mode indicator (NMEA 2.3 and later)
    pub fn mode(&self) -> Result<FaaMode> {
        get_char_field(&self.sentence, MODE)
    }

    pub fn set_mode(&mut self, mode: FaaMode) -> Result<()> {
        set_char_field(&mut self.sentence, MODE, mode)
    }
}

#[cfg(test)]
mod tests {
    use time::Month;

    use super::*;
    use crate::{Error, SentenceKind, TalkerId};

    #[test]
    fn test_rmc_parsing() {
        let rmc = RMC::parse(
            "$GPRMC,120044.567,A,6011.552,N,02501.941,E,000.0,360.0,160705,006.1,E,A*0B",
        )
        .unwrap();

        assert_eq!(rmc.time().unwrap().as_hms_milli(), (12, 0, 44, 567));
        assert_eq!(rmc.date(), Ok(Date::from_calendar_date(2005, Month::July, 16).unwrap()));
        assert_eq!(rmc.status(), Ok(DataStatus::Active));
        assert_eq!(rmc.speed(), Ok(0.0));
        assert_eq!(rmc.course(), Ok(360.0));
        assert_eq!(rmc.variation(), Ok(6.1));
        assert_eq!(rmc.mode(), Ok(FaaMode::Autonomous));
        assert!((rmc.position().unwrap().latitude() - 60.19253).abs() < 1e-5);
    }

    #[test]
    fn test_rmc_variation() {
        let mut rmc = RMC::new(TalkerId::GP).unwrap();
        assert_eq!(rmc.variation(), Err(Error::FieldNotAvailable { index: VARIATION }));

        rmc.set_variation(-20.3).unwrap();
        assert_eq!(rmc.sentence.get_string(VARIATION), Ok("020.3"));
        assert_eq!(rmc.sentence.get_string(VARIATION_DIRECTION), Ok("W"));
        assert_eq!(rmc.variation(), Ok(-20.3));

        rmc.sentence.set_char(VARIATION_DIRECTION, 'N').unwrap();
        assert_eq!(
            rmc.variation(),
            Err(Error::malformed(VARIATION_DIRECTION, "N", "E or W direction"))
        );
    }

    #[test]
    fn test_rmc_encoding() {
        let mut rmc = RMC::new(TalkerId::GP).unwrap();
        assert_eq!(rmc.to_string(), "$GPRMC,,,,,,,,,,,,*4B");

        let date = Date::from_calendar_date(1994, Month::November, 19).unwrap();
        let time = Time::from_hms(22, 54, 46).unwrap();
        rmc.set_date_time(PrimitiveDateTime::new(date, time)).unwrap();
        rmc.set_status(DataStatus::Active).unwrap();
        rmc.set_position(&Position::new(49.2741667, -123.1853333).unwrap()).unwrap();
        rmc.set_speed(0.5).unwrap();
        rmc.set_course(54.7).unwrap();
        rmc.set_variation(-20.3).unwrap();
        rmc.set_mode(FaaMode::Autonomous).unwrap();

        assert_eq!(
            rmc.to_string(),
            "$GPRMC,225446.00,A,4916.450,N,12311.120,W,000.5,054.7,191194,020.3,W,A*39"
        );
        assert!(matches!(rmc.set_course(360.5), Err(Error::ValueOutOfRange { .. })));
    }
}
