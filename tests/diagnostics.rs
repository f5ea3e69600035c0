use ipv6_parse::{DiagEvent, DiagInfo, DiagnosticSink, ParseError, parse, parse_with_diagnostics};

#[derive(Default)]
struct Recorder {
    events: Vec<(DiagEvent, usize, String)>,
}

impl DiagnosticSink for Recorder {
    fn report(&mut self, event: DiagEvent, info: &DiagInfo<'_>) {
        assert_eq!(info.message, event.message());
        self.events.push((
            event,
            info.position,
            String::from_utf8_lossy(info.input).into_owned(),
        ));
    }
}

/// Parse `input`, expecting failure with exactly one diagnostic.
fn diagnose(input: &str) -> (DiagEvent, usize) {
    let mut rec = Recorder::default();
    assert_eq!(
        parse_with_diagnostics(input.as_bytes(), &mut rec),
        Err(ParseError),
        "{input} should fail"
    );
    assert_eq!(rec.events.len(), 1, "{input}: one diagnostic expected");
    let (event, position, echoed) = rec.events.remove(0);
    assert_eq!(echoed, input);
    assert!(
        position <= input.len(),
        "{input}: offset {position} out of bounds"
    );
    (event, position)
}

#[test]
fn nine_components() {
    assert_eq!(
        diagnose("0:0:0:0:0:0:0:0:0").0,
        DiagEvent::V6BadComponentCount
    );
}

#[test]
fn mask_above_128() {
    assert_eq!(diagnose("ffff::/129"), (DiagEvent::InvalidCidrMask, 7));
}

#[test]
fn octets_above_255() {
    assert_eq!(
        diagnose("111.222.333.444"),
        (DiagEvent::V4ComponentOutOfRange, 8)
    );
}

#[test]
fn every_event_is_reachable() {
    let cases = [
        ("", DiagEvent::InvalidInput, 0),
        ("1:2:3:4:5:6:7:", DiagEvent::InvalidInput, 14),
        ("[/64]", DiagEvent::InvalidInput, 1),
        ("::1x", DiagEvent::InvalidInputChar, 3),
        ("1:2:3:4:5:6:7:8%eth0", DiagEvent::InvalidInputChar, 15),
        (" ::1", DiagEvent::InvalidInputChar, 0),
        ("1:2:3:4:5:6:7", DiagEvent::V6BadComponentCount, 13),
        ("1:2:3:4:5:6:7:8:9", DiagEvent::V6BadComponentCount, 16),
        ("1::2::3", DiagEvent::InvalidAbbrev, 4),
        ("1:::2", DiagEvent::InvalidAbbrev, 3),
        ("1:2:3::5:6:7:8", DiagEvent::InvalidAbbrev, 5),
        ("1:2:3:4::5:6:7:8", DiagEvent::InvalidAbbrev, 7),
        ("1:10000::", DiagEvent::V6ComponentOutOfRange, 2),
        ("::/", DiagEvent::InvalidCidrMask, 3),
        ("::/x", DiagEvent::InvalidCidrMask, 3),
        ("[::1/64x]:80", DiagEvent::InvalidCidrMask, 7),
        ("[", DiagEvent::InvalidBrackets, 1),
        ("[::1", DiagEvent::InvalidBrackets, 4),
        ("::1]", DiagEvent::InvalidBrackets, 3),
        ("[[::1]]:80", DiagEvent::InvalidBrackets, 1),
        ("]::1[", DiagEvent::InvalidBrackets, 0),
        ("::1/64:80", DiagEvent::InvalidBrackets, 6),
        ("[::1]:", DiagEvent::InvalidPort, 6),
        ("[::1]:65536", DiagEvent::InvalidPort, 6),
        ("[::1]:http", DiagEvent::InvalidPort, 6),
        ("::ffff:1.2.3.4:1", DiagEvent::Ipv4IncorrectPosition, 14),
        (
            "[::ffff:1.2.3.4:1]:80",
            DiagEvent::Ipv4IncorrectPosition,
            15,
        ),
        ("1.2.3.4::1", DiagEvent::Ipv4IncorrectPosition, 7),
        ("1.2.3", DiagEvent::V4BadComponentCount, 5),
        ("1.2.3.4.5", DiagEvent::V4BadComponentCount, 7),
        ("::ffff:1.2.3", DiagEvent::V4BadComponentCount, 12),
        ("256.0.0.1", DiagEvent::V4ComponentOutOfRange, 0),
        ("::ffff:1.2.3.1000", DiagEvent::V4ComponentOutOfRange, 13),
    ];
    for (input, event, position) in cases {
        assert_eq!(diagnose(input), (event, position), "{input:?}");
    }

    let mut seen: Vec<DiagEvent> = cases.iter().map(|c| c.1).collect();
    seen.dedup();
    assert_eq!(seen, DiagEvent::ALL.to_vec());
}

#[test]
fn non_ascii_bytes_are_invalid_chars() {
    let mut rec = Recorder::default();
    assert!(parse_with_diagnostics(b"::\xff", &mut rec).is_err());
    assert_eq!(rec.events.len(), 1);
    assert_eq!(rec.events[0].0, DiagEvent::InvalidInputChar);
    assert_eq!(rec.events[0].1, 2);
}

#[test]
fn plain_parse_agrees_with_diagnostic_parse() {
    let inputs = [
        "::1",
        "[::1]:80",
        "1.2.3.4/24",
        "::/129",
        "1:2",
        "[::1",
        "x",
    ];
    for input in inputs {
        let mut rec = Recorder::default();
        let with = parse_with_diagnostics(input.as_bytes(), &mut rec);
        assert_eq!(parse(input.as_bytes()), with, "{input}");
        assert_eq!(rec.events.len(), usize::from(with.is_err()), "{input}");
    }
}

#[test]
fn prefix_lengths_are_checked_for_range_only() {
    // RFC 4291 calls these poor prefix spellings, but they are well formed.
    for input in ["2001:0DB8::CD30/60", "2001:0DB8::CD3/60"] {
        assert!(parse(input.as_bytes()).is_ok(), "{input}");
    }
    // Dropping trailing zero groups without `::` leaves too few groups.
    assert_eq!(
        diagnose("2001:0DB8:0:CD3/60"),
        (DiagEvent::V6BadComponentCount, 15)
    );
}
