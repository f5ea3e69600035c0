#![no_main]
use ipv6_parse::{DiagEvent, DiagInfo, DiagnosticSink, parse, parse_with_diagnostics};
use libfuzzer_sys::fuzz_target;

struct Count(usize);

impl DiagnosticSink for Count {
    fn report(&mut self, _event: DiagEvent, info: &DiagInfo<'_>) {
        assert!(info.position <= info.input.len());
        self.0 += 1;
    }
}

fuzz_target!(|data: &[u8]| {
    let mut count = Count(0);
    let result = parse_with_diagnostics(data, &mut count);
    assert_eq!(count.0, usize::from(result.is_err()));
    assert_eq!(result, parse(data));
});
