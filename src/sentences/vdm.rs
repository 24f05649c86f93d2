use std::{any::Any, fmt};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    BeginChar, Error, FragmentHeader, Result, Sentence, SentenceKind, SentenceView,
};

const FRAGMENT_COUNT: usize = 0;
const FRAGMENT_NUMBER: usize = 1;
const MESSAGE_ID: usize = 2;
const RADIO_CHANNEL: usize = 3;
const PAYLOAD: usize = 4;
const FILL_BITS: usize = 5;

const MAX_FILL_BITS: u8 = 5;
const MAX_MESSAGE_ID: u8 = 9;

/// VDM/VDO - AIS VHF Data-link Message
///
/// <https://gpsd.gitlab.io/gpsd/AIVDM.html#_aivdmaivdo_sentence_layer>
///
/// ```text
///         1 2 3 4 5    6
///         | | | | |    |
///  !--VDM,x,x,x,a,s--s,x*hh<CR><LF>
/// ```
///
/// The envelope of an encapsulated AIS message: VDM carries messages received from
/// other stations, VDO reports the own vessel. Both share this layout, so one type
/// serves both ids. Long messages are split into fragments, see
/// [`FragmentAssembler`](crate::FragmentAssembler).
///
/// ```rust
/// use nmea0183_sentence::{SentenceKind, sentences::AisSentence};
///
/// let vdm = AisSentence::parse("!AIVDM,1,1,,A,13aEOK?P00PD2wVMdLDRhgvL289?,0*26").unwrap();
/// assert_eq!(vdm.payload().unwrap(), "13aEOK?P00PD2wVMdLDRhgvL289?");
/// assert_eq!(vdm.radio_channel().as_deref(), Some("A"));
/// assert_eq!(vdm.message_id(), None);
/// assert!(!vdm.is_own_ship());
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AisSentence {
    sentence: Sentence,
}

impl AisSentence {
    /// Sentence ids sharing the AIS envelope layout.
    pub const SENTENCE_IDS: [&'static str; 2] = ["VDM", "VDO"];

    /// Total number of fragments of the message
    pub fn number_of_fragments(&self) -> Result<u8> {
        self.get_u8(FRAGMENT_COUNT, "fragment count")
    }

    /// One-based index of this fragment
    pub fn fragment_number(&self) -> Result<u8> {
        self.get_u8(FRAGMENT_NUMBER, "fragment number")
    }

    /// Writes the fragment count and number.
    ///
    /// # Errors
    ///
    /// [`Error::ValueOutOfRange`] unless `1 <= number <= count`.
    pub fn set_fragments(&mut self, count: u8, number: u8) -> Result<()> {
        if count == 0 || !(1..=count).contains(&number) {
            return Err(Error::ValueOutOfRange {
                value: number.into(),
                min: 1.0,
                max: count.into(),
            });
        }

        self.sentence.set_int(FRAGMENT_COUNT, count.into(), 1)?;
        self.sentence.set_int(FRAGMENT_NUMBER, number.into(), 1)
    }

    /// Sequential message id, present on multi-fragment messages only.
    pub fn message_id(&self) -> Option<String> {
        self.optional(MESSAGE_ID)
    }

    pub fn set_message_id(&mut self, id: Option<u8>) -> Result<()> {
        match id {
            Some(id) if id > MAX_MESSAGE_ID => Err(Error::ValueOutOfRange {
                value: id.into(),
                min: 0.0,
                max: MAX_MESSAGE_ID.into(),
            }),
            Some(id) => self.sentence.set_int(MESSAGE_ID, id.into(), 1),
            None => self.sentence.set_string(MESSAGE_ID, None),
        }
    }

    /// Radio channel, `A` or `B`.
    pub fn radio_channel(&self) -> Option<String> {
        self.optional(RADIO_CHANNEL)
    }

    pub fn set_radio_channel(&mut self, channel: Option<&str>) -> Result<()> {
        self.sentence.set_string(RADIO_CHANNEL, channel)
    }

    /// The six-bit armored payload of this fragment.
    pub fn payload(&self) -> Result<&str> {
        self.sentence.get_string(PAYLOAD)
    }

    pub fn set_payload(&mut self, payload: &str) -> Result<()> {
        self.sentence.set_string(PAYLOAD, payload)
    }

    /// Number of padding bits appended to the payload, `0..=5`.
    pub fn fill_bits(&self) -> Result<u8> {
        let bits = self.get_u8(FILL_BITS, "fill bit count")?;

        if bits > MAX_FILL_BITS {
            return Err(Error::malformed(FILL_BITS, &bits.to_string(), "fill bit count"));
        }

        Ok(bits)
    }

    pub fn set_fill_bits(&mut self, bits: u8) -> Result<()> {
        if bits > MAX_FILL_BITS {
            return Err(Error::ValueOutOfRange {
                value: bits.into(),
                min: 0.0,
                max: MAX_FILL_BITS.into(),
            });
        }

        self.sentence.set_int(FILL_BITS, bits.into(), 1)
    }

    /// Sequencing information of this fragment.
    ///
    /// # Errors
    ///
    /// [`Error::MalformedField`] if the fragment number is not within the announced
    /// count, or field errors of the count and number fields.
    pub fn header(&self) -> Result<FragmentHeader> {
        let fragment_count = self.number_of_fragments()?;
        let fragment_number = self.fragment_number()?;

        if fragment_count == 0 {
            return Err(Error::malformed(FRAGMENT_COUNT, "0", "fragment count"));
        }

        if !(1..=fragment_count).contains(&fragment_number) {
            return Err(Error::malformed(
                FRAGMENT_NUMBER,
                &fragment_number.to_string(),
                "fragment number within count",
            ));
        }

        Ok(FragmentHeader {
            fragment_count,
            fragment_number,
            message_id: self.message_id(),
            radio_channel: self.radio_channel(),
        })
    }

    /// Whether the sentence reports the own vessel (VDO).
    pub fn is_own_ship(&self) -> bool {
        self.sentence.sentence_id() == "VDO"
    }

    fn get_u8(&self, index: usize, expected: &'static str) -> Result<u8> {
        let value = self.sentence.get_string(index)?;
        value
            .parse()
            .map_err(|_| Error::malformed(index, value, expected))
    }

    fn optional(&self, index: usize) -> Option<String> {
        self.sentence.get_string(index).ok().map(str::to_string)
    }
}

impl SentenceView for AisSentence {
    fn sentence(&self) -> &Sentence {
        &self.sentence
    }

    fn sentence_mut(&mut self) -> &mut Sentence {
        &mut self.sentence
    }

    fn into_sentence(self: Box<Self>) -> Sentence {
        self.sentence
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl SentenceKind for AisSentence {
    const SENTENCE_ID: &'static str = "VDM";
    const FIELD_COUNT: usize = 6;
    const BEGIN_CHAR: BeginChar = BeginChar::Encapsulated;

    fn from_sentence_unchecked(sentence: Sentence) -> Self {
        AisSentence { sentence }
    }

    fn accepts(sentence_id: &str) -> bool {
        AisSentence::SENTENCE_IDS.contains(&sentence_id)
    }
}

impl From<AisSentence> for Sentence {
    fn from(value: AisSentence) -> Self {
        value.sentence
    }
}

impl TryFrom<Sentence> for AisSentence {
    type Error = Error;

    fn try_from(sentence: Sentence) -> Result<Self> {
        AisSentence::try_from_sentence(sentence)
    }
}

impl fmt::Display for AisSentence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.sentence, f)
    }
}
