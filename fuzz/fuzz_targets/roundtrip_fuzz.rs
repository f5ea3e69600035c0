#![no_main]
use ipv6_parse::{CompareResult, Flags, STRING_SIZE, compare, parse};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(rec) = parse(data) else {
        return;
    };

    let mut buf = [0u8; STRING_SIZE];
    let n = rec.format(&mut buf).unwrap();
    let again = parse(&buf[..n]).unwrap();
    assert_eq!(again, rec);
    assert_eq!(compare(&rec, &again, Flags::empty()), CompareResult::Ok);

    // Canonical form is a fixed point.
    let mut buf2 = [0u8; STRING_SIZE];
    let n2 = again.format(&mut buf2).unwrap();
    assert_eq!(&buf[..n], &buf2[..n2]);
});
