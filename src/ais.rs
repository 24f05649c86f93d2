//! # AIS Fragment Sequencing
//!
//! AIS messages longer than one NMEA line are split into fragments, each one an
//! encapsulated `!--VDM`/`!--VDO` sentence carrying the fragment count, the fragment
//! number, a sequential message id and the radio channel.
//!
//! [`FragmentHeader::is_continuation_of`] decides whether two fragments belong to the
//! same message; [`FragmentAssembler`] uses it to rebuild whole payloads from a stream
//! of sentences. Decoding the six-bit payload itself is left to AIS decoders.

use log::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Result, sentences::AisSentence};

/// Sequencing information of one AIS fragment.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FragmentHeader {
    /// Total number of fragments of the message, at least 1.
    pub fragment_count: u8,
    /// One-based index of this fragment.
    pub fragment_number: u8,
    /// Sequential message id, only present on multi-fragment messages.
    pub message_id: Option<String>,
    /// Radio channel, `A` or `B` (sometimes `1` or `2`).
    pub radio_channel: Option<String>,
}

impl FragmentHeader {
    /// Whether the message spans more than one fragment.
    pub fn is_fragmented(&self) -> bool {
        self.fragment_count > 1
    }

    pub fn is_first(&self) -> bool {
        self.fragment_number == 1
    }

    pub fn is_last(&self) -> bool {
        self.fragment_number == self.fragment_count
    }

    /// Whether `next` is a later fragment of the same message as `self`.
    ///
    /// Both fragments must announce the same count and `next` must come later. For
    /// directly adjacent fragments a matching radio channel *or* a matching message id
    /// is enough, as some devices drop one of the two on consecutive lines. Across a gap
    /// both must match. Absent keys compare equal.
    ///
    /// ```rust
    /// use nmea0183_sentence::FragmentHeader;
    ///
    /// let header = |count, number, channel: &str, id: &str| FragmentHeader {
    ///     fragment_count: count,
    ///     fragment_number: number,
    ///     message_id: Some(id.to_string()),
    ///     radio_channel: Some(channel.to_string()),
    /// };
    ///
    /// assert!(header(2, 1, "A", "1").is_continuation_of(&header(2, 2, "A", "2")));
    /// assert!(!header(3, 1, "A", "1").is_continuation_of(&header(3, 3, "B", "1")));
    /// ```
    pub fn is_continuation_of(&self, next: &FragmentHeader) -> bool {
        if self.fragment_count != next.fragment_count
            || self.fragment_number >= next.fragment_number
        {
            return false;
        }

        let same_channel = self.radio_channel == next.radio_channel;
        let same_message = self.message_id == next.message_id;

        if next.fragment_number == self.fragment_number + 1 {
            same_channel || same_message
        } else {
            same_channel && same_message
        }
    }
}

/// A reassembled AIS payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AisPayload {
    /// Six-bit armored payload of all fragments, in order.
    pub payload: String,
    /// Number of padding bits of the last six-bit character.
    pub fill_bits: u8,
    /// Number of fragments the payload was assembled from.
    pub fragment_count: u8,
    /// Radio channel of the first fragment.
    pub radio_channel: Option<String>,
}

/// Outcome of feeding a sentence to a [`FragmentAssembler`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Assembly {
    /// Unfragmented message, complete on its own.
    Single(AisPayload),
    /// Fragment accepted, further fragments are missing.
    Pending,
    /// Last fragment accepted, the message is complete.
    Complete(AisPayload),
    /// Sequence break: the pending message was dropped. A first fragment arriving out of
    /// sequence starts a new message.
    Discarded,
}

/// Rebuilds multi-fragment AIS messages from sentences fed in arrival order.
///
/// ```rust
/// use nmea0183_sentence::{Assembly, FragmentAssembler, SentenceKind, sentences::AisSentence};
///
/// let mut assembler = FragmentAssembler::new();
///
/// let first = AisSentence::parse(
///     "!AIVDM,2,1,3,B,55?MbV02;H;s<HtKR20EHE:0@T4@Dn2222222216L961O5Gf0NSQEp6ClRp8,0*1D",
/// ).unwrap();
/// assert_eq!(assembler.push(first).unwrap(), Assembly::Pending);
///
/// let second = AisSentence::parse("!AIVDM,2,2,3,B,88888888880,2*24").unwrap();
/// let Assembly::Complete(message) = assembler.push(second).unwrap() else {
///     panic!("message should be complete");
/// };
/// assert!(message.payload.ends_with("Rp888888888880"));
/// assert_eq!(message.fill_bits, 2);
/// ```
#[derive(Debug, Default)]
pub struct FragmentAssembler {
    pending: Vec<(FragmentHeader, AisSentence)>,
}

impl FragmentAssembler {
    pub fn new() -> Self {
        FragmentAssembler::default()
    }

    /// Number of fragments of the message being assembled.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Drops the message being assembled.
    pub fn reset(&mut self) {
        self.pending.clear();
    }

    /// Feeds the next sentence.
    ///
    /// # Errors
    ///
    /// Field errors of the sentence's sequencing fields, payload or fill bits. The
    /// assembler state is left untouched on error.
    pub fn push(&mut self, sentence: AisSentence) -> Result<Assembly> {
        let header = sentence.header()?;
        // validated before any state change
        sentence.payload()?;
        sentence.fill_bits()?;

        if !header.is_fragmented() {
            if !self.pending.is_empty() {
                debug!("dropping {} pending AIS fragment(s)", self.pending.len());
                self.reset();
            }
            return assemble(vec![(header, sentence)]).map(Assembly::Single);
        }

        let follows = match (self.pending.first(), self.pending.last()) {
            (Some((first, _)), Some((last, _))) => {
                first.is_continuation_of(&header)
                    && header.fragment_number == last.fragment_number + 1
            }
            _ => false,
        };

        if follows {
            let is_last = header.is_last();
            self.pending.push((header, sentence));

            if !is_last {
                return Ok(Assembly::Pending);
            }

            let fragments = std::mem::take(&mut self.pending);
            return assemble(fragments).map(Assembly::Complete);
        }

        let was_pending = !self.pending.is_empty();
        if was_pending {
            debug!(
                "AIS sequence break at fragment {}/{}, dropping {} pending fragment(s)",
                header.fragment_number,
                header.fragment_count,
                self.pending.len()
            );
            self.reset();
        }

        if header.is_first() {
            self.pending.push((header, sentence));
            Ok(if was_pending { Assembly::Discarded } else { Assembly::Pending })
        } else {
            Ok(Assembly::Discarded)
        }
    }
}

fn assemble(fragments: Vec<(FragmentHeader, AisSentence)>) -> Result<AisPayload> {
    let mut payload = String::new();
    let mut fill_bits = 0;

    for (_, sentence) in &fragments {
        payload.push_str(sentence.payload()?);
        fill_bits = sentence.fill_bits()?;
    }

    let (fragment_count, radio_channel) = fragments
        .first()
        .map(|(header, _)| (header.fragment_count, header.radio_channel.clone()))
        .unwrap_or_default();

    Ok(AisPayload {
        payload,
        fill_bits,
        fragment_count,
        radio_channel,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SentenceKind;

    fn header(count: u8, number: u8, channel: Option<&str>, id: Option<&str>) -> FragmentHeader {
        FragmentHeader {
            fragment_count: count,
            fragment_number: number,
            message_id: id.map(String::from),
            radio_channel: channel.map(String::from),
        }
    }

    fn fragment(count: u8, number: u8, id: &str, channel: &str, payload: &str, fill: u8) -> AisSentence {
        let line = format!("!AIVDM,{count},{number},{id},{channel},{payload},{fill}");
        AisSentence::parse(&line).unwrap()
    }

    #[test]
    fn test_header_predicates() {
        let single = header(1, 1, Some("A"), None);
        assert!(!single.is_fragmented());
        assert!(single.is_first() && single.is_last());

        let middle = header(3, 2, Some("A"), Some("1"));
        assert!(middle.is_fragmented());
        assert!(!middle.is_first() && !middle.is_last());
    }

    #[test]
    fn test_adjacent_continuation() {
        let a = header(2, 1, Some("A"), Some("1"));

        // channel matches
        assert!(a.is_continuation_of(&header(2, 2, Some("A"), Some("2"))));
        // message id matches
        assert!(a.is_continuation_of(&header(2, 2, Some("B"), Some("1"))));
        // neither
        assert!(!a.is_continuation_of(&header(2, 2, Some("B"), Some("2"))));
        // absent keys compare equal
        assert!(header(2, 1, None, None).is_continuation_of(&header(2, 2, Some("B"), None)));
    }

    #[test]
    fn test_gap_continuation() {
        let a = header(3, 1, Some("A"), Some("1"));

        assert!(a.is_continuation_of(&header(3, 3, Some("A"), Some("1"))));
        assert!(!a.is_continuation_of(&header(3, 3, Some("B"), Some("1"))));
        assert!(!a.is_continuation_of(&header(3, 3, Some("A"), Some("2"))));
    }

    #[test]
    fn test_continuation_requires_order_and_count() {
        let a = header(3, 2, Some("A"), Some("1"));

        assert!(!a.is_continuation_of(&header(3, 1, Some("A"), Some("1"))));
        assert!(!a.is_continuation_of(&header(3, 2, Some("A"), Some("1"))));
        assert!(!a.is_continuation_of(&header(2, 3, Some("A"), Some("1"))));
    }

    #[test]
    fn test_single() {
        let mut assembler = FragmentAssembler::new();
        let sentence = AisSentence::parse("!AIVDM,1,1,,A,13aEOK?P00PD2wVMdLDRhgvL289?,0*26").unwrap();

        assert_eq!(
            assembler.push(sentence).unwrap(),
            Assembly::Single(AisPayload {
                payload: "13aEOK?P00PD2wVMdLDRhgvL289?".to_string(),
                fill_bits: 0,
                fragment_count: 1,
                radio_channel: Some("A".to_string()),
            })
        );
        assert_eq!(assembler.pending(), 0);
    }

    #[test]
    fn test_three_fragments() {
        let mut assembler = FragmentAssembler::new();

        assert_eq!(assembler.push(fragment(3, 1, "7", "B", "aaa", 0)).unwrap(), Assembly::Pending);
        // channel dropped on an adjacent fragment, message id still matches
        assert_eq!(assembler.push(fragment(3, 2, "7", "", "bbb", 0)).unwrap(), Assembly::Pending);
        assert_eq!(assembler.pending(), 2);

        let Assembly::Complete(message) = assembler.push(fragment(3, 3, "7", "B", "cc", 4)).unwrap() else {
            panic!("message should be complete");
        };
        assert_eq!(message.payload, "aaabbbcc");
        assert_eq!(message.fill_bits, 4);
        assert_eq!(message.fragment_count, 3);
        assert_eq!(message.radio_channel.as_deref(), Some("B"));
        assert_eq!(assembler.pending(), 0);
    }

    #[test]
    fn test_sequence_breaks() {
        let mut assembler = FragmentAssembler::new();

        // orphan continuation
        assert_eq!(assembler.push(fragment(2, 2, "1", "A", "x", 0)).unwrap(), Assembly::Discarded);
        assert_eq!(assembler.pending(), 0);

        // skipped fragment
        assembler.push(fragment(3, 1, "1", "A", "x", 0)).unwrap();
        assert_eq!(assembler.push(fragment(3, 3, "1", "A", "z", 0)).unwrap(), Assembly::Discarded);
        assert_eq!(assembler.pending(), 0);

        // a new first fragment replaces the pending message
        assembler.push(fragment(2, 1, "1", "A", "x", 0)).unwrap();
        assert_eq!(assembler.push(fragment(2, 1, "2", "A", "y", 0)).unwrap(), Assembly::Discarded);
        assert_eq!(assembler.pending(), 1);

        let Assembly::Complete(message) = assembler.push(fragment(2, 2, "2", "A", "z", 2)).unwrap() else {
            panic!("message should be complete");
        };
        assert_eq!(message.payload, "yz");

        // an unfragmented message drops the pending one
        assembler.push(fragment(2, 1, "3", "A", "x", 0)).unwrap();
        assert!(matches!(
            assembler.push(fragment(1, 1, "", "A", "s", 0)).unwrap(),
            Assembly::Single(_)
        ));
        assert_eq!(assembler.pending(), 0);
    }

    #[test]
    fn test_invalid_fragment_leaves_state() {
        let mut assembler = FragmentAssembler::new();
        assembler.push(fragment(2, 1, "1", "A", "x", 0)).unwrap();

        let broken = AisSentence::parse("!AIVDM,2,2,1,A,,0").unwrap();
        assert!(assembler.push(broken).is_err());
        assert_eq!(assembler.pending(), 1);
    }
}
