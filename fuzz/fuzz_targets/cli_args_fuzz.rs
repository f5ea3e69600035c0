#![no_main]
use libfuzzer_sys::fuzz_target;

const SWITCHES: [&str; 6] = [
    "-q",
    "-v",
    "-vv",
    "--json",
    "--ignore=format,port",
    "--ignore=mask",
];

// First byte picks switches, the rest is the address operand.
fuzz_target!(|data: &[u8]| {
    let Some((&selector, address)) = data.split_first() else {
        return;
    };
    let mut args: Vec<String> = SWITCHES
        .iter()
        .enumerate()
        .filter(|&(bit, _)| selector & (1 << bit) != 0)
        .map(|(_, switch)| switch.to_string())
        .collect();
    args.push(String::from_utf8_lossy(address).into_owned());
    ipv6_parse::cli::fuzz_try_parse_args(&args);
});
