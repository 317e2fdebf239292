//! Tests for the dl subcommand.

use super::{parse, parse_err};
use crate::cli::{CliCommand, Origin};
use clap::error::ErrorKind;
use std::path::{Path, PathBuf};

#[test]
fn cli_parse_dl_from_url_defaults() {
    match parse(&[
        "grabber",
        "dl",
        "--from-url",
        "https://example.com/files/",
        "-o",
        "downloads",
    ]) {
        CliCommand::Dl {
            workers,
            debug,
            source,
            output,
        } => {
            assert!(workers.is_none());
            assert!(!debug);
            assert_eq!(output, PathBuf::from("downloads"));
            assert_eq!(
                source.origin().unwrap(),
                Origin::Url("https://example.com/files/".to_string())
            );
        }
        _ => panic!("expected Dl"),
    }
}

#[test]
fn cli_parse_dl_workers_and_debug() {
    match parse(&[
        "grabber",
        "dl",
        "--workers",
        "8",
        "-d",
        "--from-file",
        "links.txt",
        "--output",
        "/tmp/out",
    ]) {
        CliCommand::Dl {
            workers,
            debug,
            source,
            output,
        } => {
            assert_eq!(workers, Some(8));
            assert!(debug);
            assert_eq!(output, PathBuf::from("/tmp/out"));
            assert_eq!(source.from_file.as_deref(), Some(Path::new("links.txt")));
            assert!(source.from_url.is_none());
            assert!(source.from_html.is_none());
        }
        _ => panic!("expected Dl"),
    }
}

#[test]
fn cli_parse_dl_long_debug() {
    match parse(&["grabber", "dl", "--debug", "--from-html", "a.html", "-o", "x"]) {
        CliCommand::Dl { debug, .. } => assert!(debug),
        _ => panic!("expected Dl"),
    }
}

#[test]
fn cli_dl_requires_output() {
    assert_eq!(
        parse_err(&["grabber", "dl", "--from-url", "https://example.com/"]),
        ErrorKind::MissingRequiredArgument
    );
}

#[test]
fn cli_dl_requires_a_source() {
    assert_eq!(
        parse_err(&["grabber", "dl", "-o", "out"]),
        ErrorKind::MissingRequiredArgument
    );
}

#[test]
fn cli_dl_rejects_multiple_sources() {
    assert_eq!(
        parse_err(&[
            "grabber",
            "dl",
            "--from-url",
            "https://example.com/",
            "--from-html",
            "page.html",
            "-o",
            "out",
        ]),
        ErrorKind::ArgumentConflict
    );
}

#[test]
fn cli_dl_rejects_non_numeric_workers() {
    assert_eq!(
        parse_err(&[
            "grabber",
            "dl",
            "--workers",
            "many",
            "--from-url",
            "https://example.com/",
            "-o",
            "out",
        ]),
        ErrorKind::ValueValidation
    );
}
