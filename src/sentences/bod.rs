#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Result, Sentence};

const TRUE_BEARING: usize = 0;
const TRUE_INDICATOR: usize = 1;
const MAGNETIC_BEARING: usize = 2;
const MAGNETIC_INDICATOR: usize = 3;
const DESTINATION: usize = 4;
const ORIGIN: usize = 5;

/// BOD - Bearing - Waypoint to Waypoint
///
/// <https://gpsd.gitlab.io/gpsd/NMEA.html#_bod_bearing_waypoint_to_waypoint>
///
/// ```text
///         1   2 3   4 5    6
///         |   | |   | |    |
///  $--BOD,x.x,T,x.x,M,c--c,c--c*hh<CR><LF>
/// ```
///
/// ```rust
/// use nmea0183_sentence::{SentenceKind, TalkerId, sentences::BOD};
///
/// let mut bod = BOD::new(TalkerId::GP).unwrap();
/// bod.set_true_bearing(97.0).unwrap();
/// bod.set_magnetic_bearing(103.2).unwrap();
/// bod.set_destination(Some("POINTB")).unwrap();
/// bod.set_origin(Some("POINTA")).unwrap();
///
/// assert_eq!(bod.to_string(), "$GPBOD,097.0,T,103.2,M,POINTB,POINTA*4A");
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BOD {
    sentence: Sentence,
}

sentence_kind!(BOD, "BOD", 6);

impl BOD {
    /// Bearing from origin to destination in degrees true
    pub fn true_bearing(&self) -> Result<f64> {
        self.sentence.get_double(TRUE_BEARING)
    }

    pub fn set_true_bearing(&mut self, degrees: f64) -> Result<()> {
        self.sentence.set_degrees(TRUE_BEARING, degrees)?;
        self.sentence.set_char(TRUE_INDICATOR, 'T')
    }

    /// Bearing from origin to destination in degrees magnetic
    pub fn magnetic_bearing(&self) -> Result<f64> {
        self.sentence.get_double(MAGNETIC_BEARING)
    }

    pub fn set_magnetic_bearing(&mut self, degrees: f64) -> Result<()> {
        self.sentence.set_degrees(MAGNETIC_BEARING, degrees)?;
        self.sentence.set_char(MAGNETIC_INDICATOR, 'M')
    }

    /// Destination waypoint id
    pub fn destination(&self) -> Result<&str> {
        self.sentence.get_string(DESTINATION)
    }

    pub fn set_destination(&mut self, id: Option<&str>) -> Result<()> {
        self.sentence.set_string(DESTINATION, id)
    }

    /// Origin waypoint id, empty when navigating from the present position
    pub fn origin(&self) -> Result<&str> {
        self.sentence.get_string(ORIGIN)
    }

    pub fn set_origin(&mut self, id: Option<&str>) -> Result<()> {
        self.sentence.set_string(ORIGIN, id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Error, SentenceKind, TalkerId};

    #[test]
    fn test_bod_parsing() {
        let bod = BOD::parse("$GPBOD,234.9,T,228.8,M,RUSKI,*1D").unwrap();

        assert_eq!(bod.true_bearing(), Ok(234.9));
        assert_eq!(bod.magnetic_bearing(), Ok(228.8));
        assert_eq!(bod.destination(), Ok("RUSKI"));
        assert_eq!(bod.origin(), Err(Error::FieldNotAvailable { index: ORIGIN }));
    }

    #[test]
    fn test_bod_rejects_other_sentences() {
        assert_eq!(
            BOD::parse("$GPDPT,,,*7B"),
            Err(Error::UnexpectedSentenceId {
                expected: "BOD",
                found: "DPT".to_string(),
            })
        );
    }

    #[test]
    fn test_bod_bearing_range() {
        let mut bod = BOD::new(TalkerId::GP).unwrap();

        assert!(matches!(bod.set_true_bearing(-0.1), Err(Error::ValueOutOfRange { .. })));
        assert_eq!(bod.to_string(), "$GPBOD,,,,,,*5E");

        bod.set_true_bearing(360.0).unwrap();
        assert_eq!(bod.true_bearing(), Ok(360.0));
    }
}
