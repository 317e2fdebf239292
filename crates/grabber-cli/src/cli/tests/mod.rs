//! CLI parse tests.

use super::{Cli, CliCommand, Origin};
use clap::Parser;

pub(super) fn parse(args: &[&str]) -> CliCommand {
    let cli = Cli::try_parse_from(args).unwrap();
    cli.command
}

pub(super) fn parse_err(args: &[&str]) -> clap::error::ErrorKind {
    Cli::try_parse_from(args).unwrap_err().kind()
}

mod dl;

#[test]
fn cli_unknown_command_is_usage_error() {
    assert_eq!(
        parse_err(&["grabber", "fetch", "--from-url", "https://example.com/"]),
        clap::error::ErrorKind::InvalidSubcommand
    );
}

#[test]
fn origin_from_single_flag() {
    match parse(&["grabber", "export", "--from-html", "page.html", "-o", "out.txt"]) {
        CliCommand::Export { source, .. } => {
            assert_eq!(
                source.origin().unwrap(),
                Origin::Html(std::path::PathBuf::from("page.html"))
            );
        }
        _ => panic!("expected Export"),
    }
}
