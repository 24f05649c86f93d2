#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::{FaaMode, get_char_field, set_char_field};
use crate::{Result, Sentence};

const TRUE_COURSE: usize = 0;
const TRUE_INDICATOR: usize = 1;
const MAGNETIC_COURSE: usize = 2;
const MAGNETIC_INDICATOR: usize = 3;
const SPEED_KNOTS: usize = 4;
const KNOTS_INDICATOR: usize = 5;
const SPEED_KMPH: usize = 6;
const KMPH_INDICATOR: usize = 7;
const MODE: usize = 8;

const KMPH_PER_KNOT: f64 = 1.852;

/// VTG - Track made good and Ground speed
///
/// <https://gpsd.gitlab.io/gpsd/NMEA.html#_vtg_track_made_good_and_ground_speed>
///
/// ```text
///          1  2  3  4  5  6  7  8 9
///          |  |  |  |  |  |  |  | |
///  $--VTG,x.x,T,x.x,M,x.x,N,x.x,K,m*hh<CR><LF>
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VTG {
    sentence: Sentence,
}

sentence_kind!(VTG, "VTG", 9);

impl VTG {
    /// Course over ground in degrees true
    pub fn true_course(&self) -> Result<f64> {
        self.sentence.get_double(TRUE_COURSE)
    }

    pub fn set_true_course(&mut self, degrees: f64) -> Result<()> {
        self.sentence.set_degrees(TRUE_COURSE, degrees)?;
        self.sentence.set_char(TRUE_INDICATOR, 'T')
    }

    /// Course over ground in degrees magnetic
    pub fn magnetic_course(&self) -> Result<f64> {
        self.sentence.get_double(MAGNETIC_COURSE)
    }

    pub fn set_magnetic_course(&mut self, degrees: f64) -> Result<()> {
        self.sentence.set_degrees(MAGNETIC_COURSE, degrees)?;
        self.sentence.set_char(MAGNETIC_INDICATOR, 'M')
    }

    /// Speed over ground in knots
    pub fn speed_knots(&self) -> Result<f64> {
        self.sentence.get_double(SPEED_KNOTS)
    }

    /// Speed over ground in kilometers per hour
    pub fn speed_kmph(&self) -> Result<f64> {
        self.sentence.get_double(SPEED_KMPH)
    }

    /// Writes the speed over ground in both knots and kilometers per hour.
    pub fn set_speed(&mut self, knots: f64) -> Result<()> {
        self.sentence.set_double(SPEED_KNOTS, knots, 3, 1)?;
        self.sentence.set_char(KNOTS_INDICATOR, 'N')?;
        self.sentence.set_double(SPEED_KMPH, knots * KMPH_PER_KNOT, 3, 1)?;
        self.sentence.set_char(KMPH_INDICATOR, 'K')
    }

    /// FAA mode indicator (NMEA 2.3 and later)
    pub fn mode(&self) -> Result<FaaMode> {
        get_char_field(&self.sentence, MODE)
    }

    pub fn set_mode(&mut self, mode: FaaMode) -> Result<()> {
        set_char_field(&mut self.sentence, MODE, mode)
    }
}
