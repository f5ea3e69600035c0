fn main() {
    #[cfg(feature = "cli")]
    ipv6_parse::cli::run();

    #[cfg(not(feature = "cli"))]
    {
        eprintln!("ipv6-parse: CLI not enabled. Rebuild with `--features cli`.");
        std::process::exit(1);
    }
}
