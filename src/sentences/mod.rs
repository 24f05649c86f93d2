//! # Built-in Sentence Types
//!
//! Typed views over the generic [`Sentence`] for a handful of common sentence types.
//! Each view is a thin wrapper: the wrapped sentence stays the single source of truth
//! and every accessor reads or writes its fields in place, so a view never drifts
//! from the line it encodes to.
//!
//! These are also the types [`SentenceRegistry::with_builtins`] seeds the registry
//! with. Additional types follow the same pattern: wrap a [`Sentence`], implement
//! [`SentenceKind`] and register it.
//!
//! [`SentenceRegistry::with_builtins`]: crate::SentenceRegistry::with_builtins

/// Defines an enum mapped one to one onto the characters of a field.
macro_rules! char_field_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident ($expected:literal) {
            $(
                $(#[$variant_meta:meta])*
                $char:literal => $variant:ident
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant,
            )*
        }

        impl $name {
            /// Looks up a value by its field character.
            pub const fn from_char(c: char) -> Option<Self> {
                match c {
                    $($char => Some($name::$variant),)*
                    _ => None,
                }
            }

            /// Returns the character written to the field.
            pub const fn as_char(&self) -> char {
                match self {
                    $($name::$variant => $char,)*
                }
            }
        }

        impl $crate::sentences::CharField for $name {
            const EXPECTED: &'static str = $expected;

            fn from_char(c: char) -> Option<Self> {
                $name::from_char(c)
            }

            fn as_char(self) -> char {
                $name::as_char(&self)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.as_char())
            }
        }
    };
}

/// Implements the view traits for a struct wrapping a `sentence: Sentence` field.
macro_rules! sentence_kind {
    ($name:ident, $sentence_id:literal, $field_count:literal) => {
        impl $crate::SentenceView for $name {
            fn sentence(&self) -> &$crate::Sentence {
                &self.sentence
            }

            fn sentence_mut(&mut self) -> &mut $crate::Sentence {
                &mut self.sentence
            }

            fn into_sentence(self: Box<Self>) -> $crate::Sentence {
                self.sentence
            }

            fn as_any(&self) -> &dyn std::any::Any {
                self
            }
        }

        impl $crate::SentenceKind for $name {
            const SENTENCE_ID: &'static str = $sentence_id;
            const FIELD_COUNT: usize = $field_count;

            fn from_sentence_unchecked(sentence: $crate::Sentence) -> Self {
                $name { sentence }
            }
        }

        impl From<$name> for $crate::Sentence {
            fn from(value: $name) -> Self {
                value.sentence
            }
        }

        impl TryFrom<$crate::Sentence> for $name {
            type Error = $crate::Error;

            fn try_from(sentence: $crate::Sentence) -> $crate::Result<Self> {
                <$name as $crate::SentenceKind>::try_from_sentence(sentence)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                std::fmt::Display::fmt(&self.sentence, f)
            }
        }
    };
}

mod bod;
mod dbt;
mod dpt;
mod gga;
mod gll;
mod rmc;
mod vdm;
mod vtg;
mod xdr;
mod zda;

pub use bod::BOD;
pub use dbt::DBT;
pub use dpt::DPT;
pub use gga::GGA;
pub use gll::GLL;
pub use rmc::RMC;
pub use vdm::AisSentence;
pub use vtg::VTG;
pub use xdr::{Measurement, XDR};
pub use zda::ZDA;

use crate::{Error, Result, Sentence};

/// A single-character field with a closed set of values.
pub(crate) trait CharField: Sized + Copy {
    /// Human readable name used in [`Error::MalformedField`].
    const EXPECTED: &'static str;

    fn from_char(c: char) -> Option<Self>;

    fn as_char(self) -> char;
}

/// Reads a single-character field into `T`.
pub(crate) fn get_char_field<T: CharField>(sentence: &Sentence, index: usize) -> Result<T> {
    let value = sentence.get_string(index)?;
    let mut chars = value.chars();

    match (chars.next(), chars.next()) {
        (Some(c), None) => T::from_char(c),
        _ => None,
    }
    .ok_or_else(|| Error::malformed(index, value, T::EXPECTED))
}

pub(crate) fn set_char_field<T: CharField>(
    sentence: &mut Sentence,
    index: usize,
    value: T,
) -> Result<()> {
    sentence.set_char(index, value.as_char())
}

char_field_enum! {
    /// Validity flag of GLL and RMC sentences.
    pub enum DataStatus("A or V status") {
        /// Data valid
        'A' => Active,
        /// Data invalid, navigation receiver warning
        'V' => Void,
    }
}

char_field_enum! {
    /// FAA mode indicator, appended to several sentences since NMEA 2.3.
    pub enum FaaMode("FAA mode indicator") {
        /// Autonomous GNSS fix
        'A' => Autonomous,
        /// Caution
        'C' => Caution,
        /// Differential GNSS fix
        'D' => Differential,
        /// Estimated (dead reckoning)
        'E' => Estimated,
        /// RTK float
        'F' => FloatRtk,
        /// Manual input
        'M' => Manual,
        /// Data not valid
        'N' => NotValid,
        /// Precise
        'P' => Precise,
        /// RTK integer
        'R' => FixedRtk,
        /// Simulator
        'S' => Simulator,
        /// Unsafe
        'U' => Unsafe,
    }
}

char_field_enum! {
    /// GPS quality indicator of GGA sentences.
    pub enum GpsFixQuality("fix quality") {
        /// Fix not available
        '0' => Invalid,
        /// GPS fix
        '1' => GpsFix,
        /// Differential GPS fix
        '2' => DGpsFix,
        /// PPS fix
        '3' => PpsFix,
        /// Real Time Kinematic
        '4' => Rtk,
        /// Float RTK
        '5' => FloatRtk,
        /// Estimated (dead reckoning)
        '6' => Estimated,
        /// Manual input mode
        '7' => Manual,
        /// Simulation mode
        '8' => Simulation,
    }
}

char_field_enum! {
    /// Direction of a compass deviation or magnetic variation.
    pub enum CompassPoint("E or W direction") {
        'E' => East,
        'W' => West,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BeginChar, TalkerId};

    #[test]
    fn test_char_field_enums() {
        assert_eq!(DataStatus::from_char('A'), Some(DataStatus::Active));
        assert_eq!(DataStatus::Void.as_char(), 'V');
        assert_eq!(FaaMode::from_char('R'), Some(FaaMode::FixedRtk));
        assert_eq!(FaaMode::from_char('X'), None);
        assert_eq!(GpsFixQuality::from_char('2'), Some(GpsFixQuality::DGpsFix));
        assert_eq!(GpsFixQuality::Simulation.to_string(), "8");
        assert_eq!(CompassPoint::from_char('W'), Some(CompassPoint::West));
    }

    #[test]
    fn test_get_char_field() {
        let mut sentence = Sentence::new(BeginChar::Standard, TalkerId::GP, "TST", 1).unwrap();

        assert_eq!(
            get_char_field::<DataStatus>(&sentence, 0),
            Err(Error::FieldNotAvailable { index: 0 })
        );

        set_char_field(&mut sentence, 0, DataStatus::Active).unwrap();
        assert_eq!(sentence.get_string(0), Ok("A"));
        assert_eq!(get_char_field(&sentence, 0), Ok(DataStatus::Active));

        for malformed in ["X", "AV"] {
            sentence.set_string(0, malformed).unwrap();
            assert_eq!(
                get_char_field::<DataStatus>(&sentence, 0),
                Err(Error::malformed(0, malformed, "A or V status"))
            );
        }
    }
}
