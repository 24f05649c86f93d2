//! # Talker Identifiers
//!
//! The talker id is the two-letter prefix of a standard sentence address field and
//! identifies the kind of device that emitted it (`GP` for a GPS receiver, `AI` for
//! an AIS transponder, ...). Proprietary sentences carry the single-letter `P`
//! sentinel instead.

use std::{fmt, str::FromStr};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::Error;

macro_rules! talker_ids {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $code:literal => $variant:ident
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant,
            )*
        }

        impl $name {
            /// Every known talker id, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),*];

            /// Returns the code as it appears in the sentence address field.
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $code,)*
                }
            }

            /// Looks up a talker id by its code.
            pub fn from_code(code: &str) -> Option<Self> {
                match code {
                    $($code => Some($name::$variant),)*
                    _ => None,
                }
            }
        }
    };
}

talker_ids! {
    /// Known NMEA 0183 talker identifiers.
    pub enum TalkerId {
        /// Independent AIS Base Station
        "AB" => AB,
        /// Dependent AIS Base Station
        "AD" => AD,
        /// Heading/track controller (autopilot), general
        "AG" => AG,
        /// Mobile AIS station
        "AI" => AI,
        /// AIS aid to navigation
        "AN" => AN,
        /// Heading/track controller (autopilot), magnetic
        "AP" => AP,
        /// AIS receiving station
        "AR" => AR,
        /// AIS limited base station
        "AS" => AS,
        /// AIS transmitting station
        "AT" => AT,
        /// AIS simplex repeater
        "AX" => AX,
        /// BeiDou (China)
        "BD" => BD,
        /// Bilge systems
        "BI" => BI,
        /// Bridge navigational watch alarm system
        "BN" => BN,
        /// Base AIS station (deprecated)
        "BS" => BS,
        /// Computer, programmed calculator
        "CC" => CC,
        /// Digital selective calling (DSC)
        "CD" => CD,
        /// Computer memory data
        "CM" => CM,
        /// Satellite communications
        "CS" => CS,
        /// Radio-telephone (MF/HF)
        "CT" => CT,
        /// Radio-telephone (VHF)
        "CV" => CV,
        /// Scanning receiver
        "CX" => CX,
        /// DECCA navigation
        "DE" => DE,
        /// Direction finder
        "DF" => DF,
        /// Velocity sensor, speed log, water, magnetic
        "DM" => DM,
        /// Duplex repeater station
        "DU" => DU,
        /// Electronic Chart Display & Information System (ECDIS)
        "EC" => EC,
        /// Electronic Chart Display & Information System (ECDIS)
        "EI" => EI,
        /// Emergency position indicating beacon (EPIRB)
        "EP" => EP,
        /// Engine room monitoring systems
        "ER" => ER,
        /// Galileo positioning system
        "GA" => GA,
        /// BeiDou (China)
        "GB" => GB,
        /// NavIC (India)
        "GI" => GI,
        /// GLONASS, according to IEC 61162-1
        "GL" => GL,
        /// Mixed GPS and GLONASS data, according to IEC 61162-1
        "GN" => GN,
        /// Global Positioning System receiver
        "GP" => GP,
        /// QZSS regional GPS augmentation system (Japan)
        "GQ" => GQ,
        /// Heading, magnetic compass
        "HC" => HC,
        /// Heading, north seeking gyro
        "HE" => HE,
        /// Heading, non north seeking gyro
        "HN" => HN,
        /// Integrated instrumentation
        "II" => II,
        /// Integrated navigation
        "IN" => IN,
        /// Loran A
        "LA" => LA,
        /// Loran C
        "LC" => LC,
        /// Microprocessor controller
        "MP" => MP,
        /// Navigation light controller
        "NL" => NL,
        /// OMEGA navigation system
        "OM" => OM,
        /// Distress alarm system
        "OS" => OS,
        /// RADAR and/or ARPA
        "RA" => RA,
        /// Physical shore AIS station
        "SA" => SA,
        /// Sounder, depth
        "SD" => SD,
        /// Electronic positioning system, other/general
        "SN" => SN,
        /// Sounder, scanning
        "SS" => SS,
        /// Turn rate indicator
        "TI" => TI,
        /// TRANSIT navigation system
        "TR" => TR,
        /// Microprocessor controller
        "UP" => UP,
        /// Velocity sensor, doppler, other/general
        "VD" => VD,
        /// Velocity sensor, speed log, water, magnetic
        "VM" => VM,
        /// Voyage data recorder
        "VR" => VR,
        /// Velocity sensor, speed log, water, mechanical
        "VW" => VW,
        /// Weather instruments
        "WI" => WI,
        /// Transducer, temperature
        "YC" => YC,
        /// Transducer, displacement, angular or linear
        "YD" => YD,
        /// Transducer, frequency
        "YF" => YF,
        /// Transducer, level
        "YL" => YL,
        /// Transducer, pressure
        "YP" => YP,
        /// Transducer, flow rate
        "YR" => YR,
        /// Transducer, tachometer
        "YT" => YT,
        /// Transducer, volume
        "YV" => YV,
        /// Transducer
        "YX" => YX,
        /// Timekeeper, atomic clock
        "ZA" => ZA,
        /// Timekeeper, chronometer
        "ZC" => ZC,
        /// Timekeeper, quartz
        "ZQ" => ZQ,
        /// Timekeeper, radio update, WWV or WWVH
        "ZV" => ZV,
        /// Proprietary sentence, the `P` sentinel
        "P" => Proprietary,
    }
}

impl TalkerId {
    /// Whether this is the single-letter proprietary sentinel.
    pub const fn is_proprietary(&self) -> bool {
        matches!(self, TalkerId::Proprietary)
    }

    /// Whether this talker id designates an AIS station.
    pub const fn is_ais(&self) -> bool {
        matches!(
            self,
            TalkerId::AB
                | TalkerId::AD
                | TalkerId::AI
                | TalkerId::AN
                | TalkerId::AR
                | TalkerId::AS
                | TalkerId::AT
                | TalkerId::AX
                | TalkerId::BS
                | TalkerId::SA
        )
    }
}

impl fmt::Display for TalkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TalkerId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TalkerId::from_code(s).ok_or_else(|| Error::format(s))
    }
}
