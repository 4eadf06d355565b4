// SPDX-License-Identifier: GPL-3.0-only
// Copyright (C) 2025 Brian Hetro <whee@smaertness.net>

//! Lua source generation for converted changelogs.
//!
//! This module turns an already reflowed changelog into the Lua file the
//! game loads at startup: a fixed-width comment banner followed by a
//! `Changelog` table literal.
//!
//! # Output Format
//!
//! ```text
//! ######## ... ########
//! #  This file was autogenerated using markdown2lua  #
//! #            Source: changelogs/1.0.md             #
//! ######## ... ########
//!
//! Changelog = {
//!     version = 1.0,
//!     description = {
//!         "# Title",
//!         "",
//!         "Some text."
//!     }
//! },
//! ```
//!
//! # Example
//!
//! ```
//! use markdown2lua::lua::{Changelog, render_changelog};
//!
//! let changelog = Changelog::from_text("1.0", "Say \"hi\"\n");
//! let lua = render_changelog(&changelog);
//!
//! assert!(lua.contains("    version = 1.0,"));
//! assert!(lua.contains(r#"        "Say \"hi\"""#));
//! ```

use std::fmt::Write;

/// Indentation of the `version` and `description` keys.
const KEY_INDENT: &str = "    ";

/// Indentation of each description line.
const LINE_INDENT: &str = "        ";

/// A changelog ready to be written as a Lua table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Changelog {
    /// Version token, emitted bare as the table's `version` field.
    pub version: String,

    /// Description lines, already escaped for a double-quoted Lua string.
    pub description: Vec<String>,
}

impl Changelog {
    /// Builds a changelog from reflowed Markdown text.
    ///
    /// The text is escaped with [`escape_string`] and split into lines; every
    /// line becomes one description entry, including blank ones.
    #[must_use]
    pub fn from_text(version: impl Into<String>, formatted: &str) -> Self {
        Self {
            version: version.into(),
            description: escape_string(formatted)
                .lines()
                .map(str::to_owned)
                .collect(),
        }
    }
}

/// Escapes text for embedding inside a double-quoted Lua string literal.
///
/// Backslashes are doubled first and double quotes are escaped second, so the
/// backslashes introduced for quotes are not doubled again. Newlines are left
/// in place; callers split on them.
#[must_use]
pub fn escape_string(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Renders the comment banner placed at the top of every generated file.
///
/// Both text rows are centered between `#` borders; the banner is `width`
/// columns wide and is followed by one blank line.
#[must_use]
pub fn render_header(generator: &str, source: &str, width: usize) -> String {
    let separator = "#".repeat(width);
    let inner = width.saturating_sub(2);
    let title = format!("This file was autogenerated using {generator}");
    let source = format!("Source: {source}");

    let mut out = String::new();
    writeln!(out, "{separator}").unwrap();
    writeln!(out, "#{title:^inner$}#").unwrap();
    writeln!(out, "#{source:^inner$}#").unwrap();
    writeln!(out, "{separator}").unwrap();
    out.push('\n');
    out
}

/// Renders the `Changelog` table literal.
///
/// Description entries are comma separated; the last entry has no trailing
/// comma. The closing brace of the table is followed by a comma so several
/// generated files can be concatenated into one Lua list.
#[must_use]
pub fn render_changelog(changelog: &Changelog) -> String {
    let description = changelog
        .description
        .iter()
        .map(|line| format!("{LINE_INDENT}\"{line}\""))
        .collect::<Vec<_>>()
        .join(",\n");

    let mut out = String::new();
    writeln!(out, "Changelog = {{").unwrap();
    writeln!(out, "{KEY_INDENT}version = {},", changelog.version).unwrap();
    writeln!(out, "{KEY_INDENT}description = {{").unwrap();
    writeln!(out, "{description}").unwrap();
    writeln!(out, "{KEY_INDENT}}}").unwrap();
    writeln!(out, "}},").unwrap();
    out
}

/// Returns `true` if `token` is a valid Lua expression without quoting.
///
/// Accepts decimal and hexadecimal numerals, `true`, `false`, `nil`, and
/// dotted identifier paths such as `Versions.latest`. A dotted version like
/// `2.3.1` is not a Lua value.
#[must_use]
pub fn is_bare_value(token: &str) -> bool {
    matches!(token, "true" | "false" | "nil") || is_numeral(token) || is_identifier_path(token)
}

fn is_numeral(token: &str) -> bool {
    if let Some(hex) = token
        .strip_prefix("0x")
        .or_else(|| token.strip_prefix("0X"))
    {
        return is_digits(hex, |c| c.is_ascii_hexdigit(), 'p');
    }
    is_digits(token, |c| c.is_ascii_digit(), 'e')
}

/// Checks `mantissa[.fraction][exp[sign]digits]` with the given digit class.
fn is_digits(token: &str, is_digit: impl Fn(char) -> bool, exponent: char) -> bool {
    let (mantissa, exp) = match token.find([exponent, exponent.to_ascii_uppercase()]) {
        Some(i) => (&token[..i], Some(&token[i + 1..])),
        None => (token, None),
    };

    let (int, frac) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    if int.is_empty() && frac.is_empty() {
        return false;
    }
    if !int.chars().chain(frac.chars()).all(&is_digit) {
        return false;
    }

    exp.is_none_or(|exp| {
        let digits = exp.strip_prefix(['+', '-']).unwrap_or(exp);
        !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
    })
}

fn is_identifier_path(token: &str) -> bool {
    token.split('.').all(|part| {
        let mut chars = part.chars();
        chars
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
            && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
            && !is_keyword(part)
    })
}

fn is_keyword(word: &str) -> bool {
    matches!(
        word,
        "and"
            | "break"
            | "do"
            | "else"
            | "elseif"
            | "end"
            | "false"
            | "for"
            | "function"
            | "goto"
            | "if"
            | "in"
            | "local"
            | "nil"
            | "not"
            | "or"
            | "repeat"
            | "return"
            | "then"
            | "true"
            | "until"
            | "while"
    )
}
