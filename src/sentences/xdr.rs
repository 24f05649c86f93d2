#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{FieldGroups, Result, Sentence};

const MEASUREMENTS: FieldGroups = FieldGroups::new(0, 4);

/// XDR - Transducer Measurement
///
/// <https://gpsd.gitlab.io/gpsd/NMEA.html#_xdr_transducer_measurement>
///
/// ```text
///         1 2   3 4            n
///         | |   | |            |
///  $--XDR,a,x.x,a,c--c, ..... *hh<CR><LF>
/// ```
///
/// Carries any number of four-field measurement groups: transducer type, value,
/// units and transducer name.
///
/// ```rust
/// use nmea0183_sentence::{SentenceKind, sentences::XDR};
///
/// let xdr = XDR::parse("$IIXDR,C,19.52,C,TempAir,P,1.02481,B,Barometer*7E").unwrap();
/// let measurements = xdr.measurements().unwrap();
///
/// assert_eq!(measurements.len(), 2);
/// assert_eq!(measurements[1].value, Some(1.02481));
/// assert_eq!(measurements[1].name.as_deref(), Some("Barometer"));
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XDR {
    sentence: Sentence,
}

sentence_kind!(XDR, "XDR", 4);

/// One transducer measurement of an XDR sentence.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[derive(Debug, Clone, PartialEq)]
pub struct Measurement {
    /// Transducer type, e.g. `C` temperature, `P` pressure, `A` angular displacement
    pub transducer_type: Option<char>,
    pub value: Option<f64>,
    /// Units of the value, e.g. `C` degrees Celsius, `B` bars, `D` degrees
    pub units: Option<char>,
    /// Transducer name
    pub name: Option<String>,
}

impl Measurement {
    pub fn new(transducer_type: char, value: f64, units: char, name: &str) -> Self {
        Measurement {
            transducer_type: Some(transducer_type),
            value: Some(value),
            units: Some(units),
            name: Some(name.to_string()),
        }
    }

    fn to_fields(&self) -> [String; 4] {
        [
            self.transducer_type.map(String::from).unwrap_or_default(),
            self.value.map(|value| value.to_string()).unwrap_or_default(),
            self.units.map(String::from).unwrap_or_default(),
            self.name.clone().unwrap_or_default(),
        ]
    }
}

impl XDR {
    /// Number of measurement groups, including empty ones.
    pub fn measurement_count(&self) -> usize {
        MEASUREMENTS.count(&self.sentence)
    }

    /// Reads measurement group `n`.
    pub fn measurement(&self, n: usize) -> Result<Measurement> {
        MEASUREMENTS.get(&self.sentence, n)?;

        let first = MEASUREMENTS.start() + n * MEASUREMENTS.size();
        let optional = |index: usize| self.sentence.has_value(index).then_some(index);

        Ok(Measurement {
            transducer_type: optional(first)
                .map(|index| self.sentence.get_char(index))
                .transpose()?,
            value: optional(first + 1)
                .map(|index| self.sentence.get_double(index))
                .transpose()?,
            units: optional(first + 2)
                .map(|index| self.sentence.get_char(index))
                .transpose()?,
            name: optional(first + 3)
                .map(|index| self.sentence.get_string(index).map(str::to_string))
                .transpose()?,
        })
    }

    /// Reads every measurement group in order.
    pub fn measurements(&self) -> Result<Vec<Measurement>> {
        (0..self.measurement_count())
            .map(|n| self.measurement(n))
            .collect()
    }

    /// Overwrites measurement `n`, or appends one when `n` equals the current count.
    pub fn set_measurement(&mut self, n: usize, measurement: &Measurement) -> Result<()> {
        MEASUREMENTS.set(&mut self.sentence, n, &measurement.to_fields())
    }

    pub fn add_measurement(&mut self, measurement: &Measurement) -> Result<()> {
        let n = self.measurement_count();
        self.set_measurement(n, measurement)
    }

    /// Replaces all measurements. An empty list leaves one empty group.
    pub fn set_measurements(&mut self, measurements: &[Measurement]) -> Result<()> {
        if measurements.is_empty() {
            return self.sentence.set_fields(MEASUREMENTS.start(), &["", "", "", ""]);
        }

        let groups: Vec<[String; 4]> = measurements.iter().map(Measurement::to_fields).collect();
        MEASUREMENTS.set_all::<[String; 4], String>(&mut self.sentence, &groups)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Error, SentenceKind, SentenceView, TalkerId};

    #[test]
    fn test_xdr_parsing() {
        let xdr = XDR::parse("$IIXDR,A,-2.5,D,PITCH,,,,").unwrap();

        assert_eq!(xdr.measurement_count(), 2);
        assert_eq!(xdr.measurement(0), Ok(Measurement::new('A', -2.5, 'D', "PITCH")));
        assert_eq!(
            xdr.measurement(1),
            Ok(Measurement {
                transducer_type: None,
                value: None,
                units: None,
                name: None,
            })
        );
        assert_eq!(xdr.measurement(2), Err(Error::FieldNotAvailable { index: 8 }));
    }

    #[test]
    fn test_xdr_malformed_group() {
        let xdr = XDR::parse("$IIXDR,C,warm,C,TempAir").unwrap();
        assert!(matches!(xdr.measurements(), Err(Error::MalformedField { index: 1, .. })));

        // incomplete trailing groups are not counted
        let xdr = XDR::parse("$IIXDR,C,19.5,C,TempAir,P,1.02").unwrap();
        assert_eq!(xdr.measurement_count(), 1);
    }

    #[test]
    fn test_xdr_encoding() {
        let mut xdr = XDR::new(TalkerId::II).unwrap();
        assert_eq!(xdr.to_string(), "$IIXDR,,,,*4E");
        assert_eq!(xdr.measurement_count(), 1);

        xdr.set_measurement(0, &Measurement::new('C', 19.5, 'C', "TempAir")).unwrap();
        xdr.add_measurement(&Measurement::new('P', 1.0248, 'B', "Barometer")).unwrap();
        assert_eq!(xdr.to_string(), "$IIXDR,C,19.5,C,TempAir,P,1.0248,B,Barometer*7D");

        xdr.set_measurements(&[Measurement::new('A', -2.5, 'D', "PITCH")]).unwrap();
        assert_eq!(xdr.sentence().field_count(), 4);

        xdr.set_measurements(&[]).unwrap();
        assert_eq!(xdr.to_string(), "$IIXDR,,,,*4E");
    }
}
