// SPDX-License-Identifier: GPL-3.0-only
// Copyright (C) 2025 Brian Hetro <whee@smaertness.net>

//! Command-line interface for markdown2lua.
//!
//! This binary provides the `markdown2lua` command for converting a Markdown
//! changelog into a Lua source file.

use lexopt::prelude::*;
use markdown2lua::{convert, lua};
use snafu::prelude::*;
use std::path::PathBuf;

struct Cli {
    input: PathBuf,
    output: PathBuf,
}

#[derive(Debug, Snafu)]
enum Error {
    #[snafu(display("failed to parse arguments: {source}"))]
    ParseArgs { source: lexopt::Error },

    #[snafu(transparent)]
    Convert { source: convert::ConvertError },
}

fn print_help() {
    println!(
        "\
{name} {version}
Convert a Markdown changelog to a Lua table source

Usage: {name} <INPUT> <OUTPUT>

Arguments:
  <INPUT>   Markdown changelog; its file stem becomes the version
  <OUTPUT>  Lua file to create or overwrite

Options:
  -h, --help     Print help
  -V, --version  Print version",
        name = env!("CARGO_PKG_NAME"),
        version = env!("CARGO_PKG_VERSION"),
    );
}

fn parse_args() -> Result<Cli, lexopt::Error> {
    // Show help if no arguments provided
    if std::env::args().len() == 1 {
        print_help();
        std::process::exit(0);
    }

    let mut input: Option<PathBuf> = None;
    let mut output: Option<PathBuf> = None;

    let mut parser = lexopt::Parser::from_env();
    while let Some(arg) = parser.next()? {
        match arg {
            Short('h') | Long("help") => {
                print_help();
                std::process::exit(0);
            }
            Short('V') | Long("version") => {
                println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            Value(val) if input.is_none() => input = Some(val.parse()?),
            Value(val) if output.is_none() => output = Some(val.parse()?),
            _ => return Err(arg.unexpected()),
        }
    }

    Ok(Cli {
        input: input.ok_or("missing required argument: <INPUT>")?,
        output: output.ok_or("missing required argument: <OUTPUT>")?,
    })
}

fn main() -> Result<(), Error> {
    let cli = parse_args().context(ParseArgsSnafu)?;

    let opts = convert::ConvertOptions::default();
    let changelog = convert::convert_file(&cli.input, &cli.output, &opts)?;

    if !lua::is_bare_value(&changelog.version) {
        eprintln!(
            "warning: version `{}` is not a valid Lua value; it is written unquoted",
            changelog.version
        );
    }
    eprintln!(
        "Wrote {} ({} lines)",
        cli.output.display(),
        changelog.description.len()
    );
    Ok(())
}
