#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use time::Time;

use super::{DataStatus, FaaMode, get_char_field, set_char_field};
use crate::{Position, PositionFields, Result, Sentence};

const POSITION: PositionFields = PositionFields::new(0, 1, 2, 3);

const UTC_TIME: usize = 4;
const STATUS: usize = 5;
const MODE: usize = 6;

/// GLL - Geographic Position - Latitude/Longitude
///
/// <https://gpsd.gitlab.io/gpsd/NMEA.html#_gll_geographic_position_latitudelongitude>
///
/// ```text
///         1       2 3        4 5         6 7
///         |       | |        | |         | |
///  $--GLL,ddmm.mm,a,dddmm.mm,a,hhmmss.ss,a,m*hh<CR><LF>
/// ```
///
/// Sentences from receivers older than NMEA 2.3 have no mode field; the field list is
/// kept as received, so [`GLL::mode`] reports it as not available.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GLL {
    sentence: Sentence,
}

sentence_kind!(GLL, "GLL", 7);

impl GLL {
    pub fn position(&self) -> Result<Position> {
        POSITION.get(&self.sentence)
    }

    pub fn set_position(&mut self, position: &Position) -> Result<()> {
        POSITION.set(&mut self.sentence, position)
    }

    /// Fix time in UTC
    pub fn time(&self) -> Result<Time> {
        self.sentence.get_time(UTC_TIME)
    }

    pub fn set_time(&mut self, time: Time) -> Result<()> {
        self.sentence.set_time(UTC_TIME, time)
    }

    pub fn status(&self) -> Result<DataStatus> {
        get_char_field(&self.sentence, STATUS)
    }

    pub fn set_status(&mut self, status: DataStatus) -> Result<()> {
        set_char_field(&mut self.sentence, STATUS, status)
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
    use super::*;
    use crate::{Error, SentenceKind, TalkerId};

    #[test]
    fn test_gll_parsing() {
        let gll = GLL::parse("$GPGLL,6011.552,N,02501.941,E,120045,A,A*4B").unwrap();

        let position = gll.position().unwrap();
        assert!((position.latitude() - 60.19253).abs() < 1e-5);
        assert!((position.longitude() - 25.03235).abs() < 1e-5);
        assert_eq!(gll.time().unwrap().as_hms(), (12, 0, 45));
        assert_eq!(gll.status(), Ok(DataStatus::Active));
        assert_eq!(gll.mode(), Ok(FaaMode::Autonomous));
    }

    #[test]
    fn test_gll_without_mode() {
        let gll = GLL::parse("$GPGLL,4916.45,N,12311.12,W,225444,A").unwrap();

        assert_eq!(gll.status(), Ok(DataStatus::Active));
        assert_eq!(gll.mode(), Err(Error::FieldNotAvailable { index: MODE }));
    }

    #[test]
    fn test_gll_encoding() {
        let mut gll = GLL::new(TalkerId::GP).unwrap();
        assert_eq!(gll.to_string(), "$GPGLL,,,,,,,*7C");

        gll.set_position(&Position::new(-49.2741667, -123.1853333).unwrap()).unwrap();
        gll.set_time(Time::from_hms(22, 54, 44).unwrap()).unwrap();
        gll.set_status(DataStatus::Void).unwrap();
        gll.set_mode(FaaMode::NotValid).unwrap();

        assert_eq!(gll.to_string(), "$GPGLL,4916.450,S,12311.120,W,225444.00,V,N*77");
    }
}
