//! CLI parse tests.

use super::install::{options_from, version_provider};
use super::Cli;
use clap::Parser;
use samples_core::config::SamplesConfig;
use std::path::Path;

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(args).unwrap()
}

#[test]
fn cli_parse_defaults() {
    let cli = parse(&["cntk-samples"]);
    assert!(cli.url.is_none());
    assert_eq!(cli.dir, Path::new("."));
    assert!(!cli.quiet);
    assert!(cli.module_version.is_none());
    assert!(cli.python.is_none());
}

#[test]
fn cli_parse_short_flags() {
    let cli = parse(&[
        "cntk-samples",
        "-u",
        "https://example.com/s.zip",
        "-d",
        "/tmp/samples",
        "-q",
    ]);
    assert_eq!(cli.url.as_deref(), Some("https://example.com/s.zip"));
    assert_eq!(cli.dir, Path::new("/tmp/samples"));
    assert!(cli.quiet);
}

#[test]
fn cli_parse_long_flags() {
    let cli = parse(&[
        "cntk-samples",
        "--url",
        "https://example.com/s.zip",
        "--dir",
        "out",
        "--quiet",
        "--module-version",
        "2.5.1+",
        "--python",
        "python3",
    ]);
    assert_eq!(cli.url.as_deref(), Some("https://example.com/s.zip"));
    assert_eq!(cli.dir, Path::new("out"));
    assert!(cli.quiet);
    assert_eq!(cli.module_version.as_deref(), Some("2.5.1+"));
    assert_eq!(cli.python.as_deref(), Some("python3"));
}

#[test]
fn cli_rejects_positional_args() {
    assert!(Cli::try_parse_from(["cntk-samples", "extra"]).is_err());
}

#[test]
fn options_carry_flags() {
    let cli = parse(&["cntk-samples", "-d", "out", "-q"]);
    let opts = options_from(&cli);
    assert!(opts.url.is_none());
    assert_eq!(opts.dir, Path::new("out"));
    assert!(opts.quiet);
}

#[test]
fn empty_url_falls_back_to_default() {
    let cli = parse(&["cntk-samples", "--url", ""]);
    assert!(options_from(&cli).url.is_none());
}

#[test]
fn module_version_flag_skips_python() {
    let cli = parse(&["cntk-samples", "--module-version", "2.7", "--python", "no-such-python"]);
    let provider = version_provider(&cli, &SamplesConfig::default());
    assert_eq!(provider.version().unwrap(), "2.7");
}
