#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Result, Sentence};

const FEET: usize = 0;
const METERS: usize = 2;
const FATHOMS: usize = 4;

const METERS_PER_FOOT: f64 = 0.3048;
const METERS_PER_FATHOM: f64 = 1.8288;

/// DBT - Depth Below Transducer
///
/// <https://gpsd.gitlab.io/gpsd/NMEA.html#_dbt_depth_below_transducer>
///
/// ```text
///         1   2 3   4 5   6
///         |   | |   | |   |
///  $--DBT,x.x,f,x.x,M,x.x,F*hh<CR><LF>
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DBT {
    sentence: Sentence,
}

sentence_kind!(DBT, "DBT", 6);

impl DBT {
    /// Water depth in feet
    pub fn depth_feet(&self) -> Result<f64> {
        self.sentence.get_double(FEET)
    }

    /// Water depth in meters
    pub fn depth_meters(&self) -> Result<f64> {
        self.sentence.get_double(METERS)
    }

    /// Water depth in fathoms
    pub fn depth_fathoms(&self) -> Result<f64> {
        self.sentence.get_double(FATHOMS)
    }

    /// Writes the depth in all three units.
    pub fn set_depth(&mut self, meters: f64) -> Result<()> {
        let depths = [
            (FEET, meters / METERS_PER_FOOT, 'f'),
            (METERS, meters, 'M'),
            (FATHOMS, meters / METERS_PER_FATHOM, 'F'),
        ];

        for (index, depth, unit) in depths {
            self.sentence.set_double(index, depth, 1, 1)?;
            self.sentence.set_char(index + 1, unit)?;
        }

        Ok(())
    }
}
