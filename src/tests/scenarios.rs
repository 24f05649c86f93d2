use crate::{
    Assembly, BeginChar, Error, FragmentAssembler, FragmentHeader, ParserEntry, Position,
    PositionFields, Sentence, SentenceDecoder, SentenceKind, SentenceRegistry, SentenceView,
    TalkerId, checksum,
    sentences::{AisSentence, BOD, GGA},
};

fn header(count: u8, number: u8, channel: &str, id: &str) -> FragmentHeader {
    FragmentHeader {
        fragment_count: count,
        fragment_number: number,
        message_id: Some(id.to_string()),
        radio_channel: Some(channel.to_string()),
    }
}

#[test]
fn test_gga_position() {
    let sentence = SentenceDecoder::new()
        .decode("$GPGGA,120044,6011.552,N,02501.941,E,1,00,2.0,28.0,M,19.6,M,,*79")
        .unwrap();
    assert_eq!(sentence.talker_id(), TalkerId::GP);
    assert_eq!(sentence.sentence_id(), "GGA");

    let position = GGA::try_from_sentence(sentence).unwrap().position().unwrap();
    assert!((position.latitude() - 60.19253).abs() < 1e-5);
    assert!((position.longitude() - 25.03235).abs() < 1e-5);
}

#[test]
fn test_bod_checksum_reproduced() {
    let decoded = BOD::parse("$GPBOD,234.9,T,228.8,M,RUSKI,*1D").unwrap();

    let mut sentence = Sentence::new(BeginChar::Standard, TalkerId::GP, "BOD", 1).unwrap();
    sentence.set_fields(0, decoded.sentence().fields()).unwrap();

    let line = sentence.to_sentence().unwrap();
    assert_eq!(line, "$GPBOD,234.9,T,228.8,M,RUSKI,*1D");
    assert_eq!(checksum::calculate(&line), "1D");
}

#[test]
fn test_continuation() {
    // adjacent, the channel matches
    assert!(header(2, 1, "A", "1").is_continuation_of(&header(2, 2, "A", "2")));

    // across a gap the channel differs, although the message id matches
    assert!(!header(3, 1, "A", "1").is_continuation_of(&header(3, 3, "B", "1")));
}

#[test]
fn test_degree_bounds() {
    let mut sentence = Sentence::new(BeginChar::Standard, TalkerId::GP, "HDT", 2).unwrap();

    for value in [0.0, 0.04, 180.0, 359.96, 360.0] {
        assert_eq!(sentence.set_degrees(0, value), Ok(()), "value: {value}");
    }
    assert_eq!(sentence.get_string(0), Ok("360.0"));

    for value in [-0.1, -360.0, 360.01, 720.0, f64::NAN] {
        assert!(
            matches!(sentence.set_degrees(0, value), Err(Error::ValueOutOfRange { .. })),
            "value: {value}"
        );
    }
    assert_eq!(sentence.get_string(0), Ok("360.0"));
}

#[test]
fn test_field_absence() {
    let mut sentence = Sentence::new(BeginChar::Standard, TalkerId::GP, "TXT", 3).unwrap();
    sentence.set_string(0, "01").unwrap();
    sentence.set_string(0, "").unwrap();
    sentence.set_string(1, None).unwrap();

    for index in 0..3 {
        assert!(!sentence.has_value(index));
        assert_eq!(sentence.get_string(index), Err(Error::FieldNotAvailable { index }));
    }

    // out of range reads fail the same way
    assert!(!sentence.has_value(3));
    assert_eq!(sentence.get_int(3), Err(Error::FieldNotAvailable { index: 3 }));
}

#[test]
fn test_coordinate_round_trip() {
    const FIELDS: PositionFields = PositionFields::new(0, 1, 2, 3);
    let mut sentence = Sentence::new(BeginChar::Standard, TalkerId::GP, "GLL", 4).unwrap();

    for step in 0..=1800 {
        let latitude = -90.0 + f64::from(step) * 0.1;
        let longitude = (latitude * 2.0 - 0.123456).max(-180.0);

        let position = Position::new(latitude, longitude).unwrap();
        FIELDS.set(&mut sentence, &position).unwrap();

        let decoded = FIELDS.get(&sentence).unwrap();
        assert!((decoded.latitude() - latitude).abs() < 1e-4, "{latitude}");
        assert!((decoded.longitude() - longitude).abs() < 1e-4, "{longitude}");
    }
}

#[test]
fn test_bare_integer_pattern() {
    // both digit counts at zero round to a bare integer
    let mut sentence = Sentence::new(BeginChar::Standard, TalkerId::GP, "TXT", 1).unwrap();

    for (value, expected) in [(0.0, "0"), (0.4, "0"), (2.5, "3"), (12.3, "12"), (-7.6, "-8")] {
        sentence.set_double(0, value, 0, 0).unwrap();
        assert_eq!(sentence.get_string(0), Ok(expected), "value: {value}");
    }
}

#[test]
fn test_registry_override() {
    let registry = SentenceRegistry::with_builtins();

    let replacement = registry
        .register(
            "GGA",
            ParserEntry::new()
                .decode(|line| Ok(Box::new(Sentence::parse(line)?)))
                .encode(|talker_id, sentence_id| {
                    Ok(Box::new(Sentence::new(BeginChar::Standard, talker_id, sentence_id, 1)?))
                }),
        )
        .unwrap();

    let view = registry
        .create_parser("$GPGGA,120044,6011.552,N,02501.941,E,1,00,2.0,28.0,M,19.6,M,,*79")
        .unwrap();
    assert!(view.is::<Sentence>());
    assert!(!view.is::<GGA>());

    registry.unregister(&replacement);
    assert!(!registry.has("GGA"));

    // the AIS envelope serves two ids, unregistering it clears both
    let entry = registry.register_kind::<AisSentence>().unwrap();
    registry.unregister(&entry);
    assert!(!registry.has("VDM"));
    assert!(!registry.has("VDO"));

    registry
        .register_shared(&AisSentence::SENTENCE_IDS, ParserEntry::of::<AisSentence>())
        .unwrap();
    // an id remapped to another entry survives
    registry.register("VDO", ParserEntry::of::<GGA>()).unwrap();
    registry.unregister(&ParserEntry::of::<AisSentence>());
    assert!(!registry.has("VDM"));
    assert!(registry.has("VDO"));
}

#[test]
fn test_ais_assembly() {
    let decoder = SentenceDecoder::new();
    let mut assembler = FragmentAssembler::new();

    let lines = [
        "!AIVDM,1,1,,A,13aEOK?P00PD2wVMdLDRhgvL289?,0*26",
        "!AIVDM,2,1,4,A,55?MbV02;H;s<HtKR20EHE:0@T4@Dn2222222216L961O5Gf0NSQEp6ClRp8,0*19",
        "!AIVDM,2,2,4,A,88888888880,2*20",
    ];

    let mut messages = Vec::new();
    for line in lines {
        let sentence = AisSentence::try_from_sentence(decoder.decode(line).unwrap()).unwrap();
        match assembler.push(sentence).unwrap() {
            Assembly::Single(message) | Assembly::Complete(message) => messages.push(message),
            Assembly::Pending => assert_eq!(assembler.pending(), 1),
            Assembly::Discarded => panic!("unexpected sequence break at {line}"),
        }
    }

    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].payload, "13aEOK?P00PD2wVMdLDRhgvL289?");
    assert_eq!(messages[0].fragment_count, 1);
    assert_eq!(
        messages[1].payload,
        "55?MbV02;H;s<HtKR20EHE:0@T4@Dn2222222216L961O5Gf0NSQEp6ClRp888888888880"
    );
    assert_eq!(messages[1].fill_bits, 2);
    assert_eq!(messages[1].fragment_count, 2);
    assert_eq!(messages[1].radio_channel.as_deref(), Some("A"));
    assert_eq!(assembler.pending(), 0);
}
