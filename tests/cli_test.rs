use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;
use tmplcopy::cli::Args;

fn make_args(args: &[&str]) -> Vec<OsString> {
    let mut res = vec![OsString::from("tmplcopy")];
    res.extend(args.iter().map(OsString::from));
    res
}

#[test]
fn test_basic_args() {
    let args = make_args(&["./res-src", "./data.json", "./res"]);
    let parsed = Args::try_parse_from(args).unwrap();

    assert_eq!(parsed.source, PathBuf::from("./res-src"));
    assert_eq!(parsed.data, PathBuf::from("./data.json"));
    assert_eq!(parsed.target, PathBuf::from("./res"));
    assert_eq!(parsed.suffix, ".tmpl");
    assert!(!parsed.verbose);
    assert_eq!(parsed.copy_options().template_suffix, ".tmpl");
}

#[test]
fn test_all_flags() {
    let args = make_args(&["--verbose", "--suffix", ".in", "src", "data.json", "out"]);
    let parsed = Args::try_parse_from(args).unwrap();

    assert!(parsed.verbose);
    assert_eq!(parsed.suffix, ".in");
    assert_eq!(parsed.copy_options().template_suffix, ".in");
}

#[test]
fn test_short_flags() {
    let args = make_args(&["-v", "src", "data.json", "out"]);
    let parsed = Args::try_parse_from(args).unwrap();

    assert!(parsed.verbose);
}

#[test]
fn test_missing_args() {
    let args = make_args(&["src", "data.json"]);
    let err = Args::try_parse_from(args).unwrap_err();
    assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
}

#[test]
fn test_too_many_args() {
    let args = make_args(&["src", "data.json", "out", "extra"]);
    assert!(Args::try_parse_from(args).is_err());
}
