#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Result, Sentence};

const DEPTH: usize = 0;
const OFFSET: usize = 1;
const MAXIMUM: usize = 2;

/// DPT - Depth of Water
///
/// <https://gpsd.gitlab.io/gpsd/NMEA.html#_dpt_depth_of_water>
///
/// ```text
///         1   2   3
///         |   |   |
///  $--DPT,x.x,x.x,x.x*hh<CR><LF>
/// ```
///
/// The third field was added in NMEA 3.0; older sentences decode with two fields.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DPT {
    sentence: Sentence,
}

sentence_kind!(DPT, "DPT", 3);

impl DPT {
    /// Water depth relative to the transducer in meters
    pub fn depth(&self) -> Result<f64> {
        self.sentence.get_double(DEPTH)
    }

    pub fn set_depth(&mut self, meters: f64) -> Result<()> {
        self.sentence.set_double(DEPTH, meters, 1, 1)
    }

    /// Offset from the transducer in meters, positive towards the water line and
    /// negative towards the keel
    pub fn offset(&self) -> Result<f64> {
        self.sentence.get_double(OFFSET)
    }

    pub fn set_offset(&mut self, meters: f64) -> Result<()> {
        self.sentence.set_double(OFFSET, meters, 1, 1)
    }

    /// Maximum range scale in use
    pub fn maximum(&self) -> Result<f64> {
        self.sentence.get_double(MAXIMUM)
    }

    pub fn set_maximum(&mut self, meters: f64) -> Result<()> {
        self.sentence.set_double(MAXIMUM, meters, 1, 1)
    }
}
