// SPDX-License-Identifier: GPL-3.0-only
// Copyright (C) 2025 Brian Hetro <whee@smaertness.net>

//! Changelog conversion from Markdown files to Lua files.
//!
//! The pipeline is linear: read the Markdown file, reflow it, escape each
//! line, assemble the Lua document and write it out. Every step either
//! succeeds or aborts the whole conversion; nothing is written until the
//! document is complete.
//!
//! # Example
//!
//! ```
//! use markdown2lua::convert::{ConvertOptions, markdown_to_lua};
//! use markdown2lua::reflow::MarkdownReflow;
//!
//! let opts = ConvertOptions::default();
//! let lua = markdown_to_lua("1.0", "Fixed *everything*.\n", &MarkdownReflow, &opts).unwrap();
//!
//! assert!(lua.contains("        \"Fixed *everything*.\""));
//! ```

use crate::lua::{self, Changelog};
use crate::reflow::{MarkdownReflow, Reflow, ReflowError};
use snafu::prelude::*;
use std::path::{Path, PathBuf};

/// Maximum line width of reflowed changelog text and of the header banner.
pub const DEFAULT_WRAP_WIDTH: usize = 150;

/// Error type for conversion failures.
#[derive(Debug, Snafu)]
pub enum ConvertError {
    /// The input path has no file name to take the version from.
    #[snafu(display("invalid input filename {}: no file stem", path.display()))]
    InvalidFilename {
        /// The offending input path.
        path: PathBuf,
    },

    /// The input file could not be read as UTF-8 text.
    #[snafu(display("failed to read {}: {source}", path.display()))]
    ReadInput {
        /// The input path.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The Markdown could not be reflowed.
    #[snafu(display("failed to format {}: {source}", path.display()))]
    Reflow {
        /// The input path.
        path: PathBuf,
        /// The underlying reflow error.
        source: ReflowError,
    },

    /// The output file could not be written.
    #[snafu(display("failed to write {}: {source}", path.display()))]
    WriteOutput {
        /// The output path.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },
}

/// Configuration for a conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Maximum width of reflowed lines and of the header banner.
    pub wrap_width: usize,

    /// Name of the generating tool, shown in the header banner.
    pub generator: String,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            wrap_width: DEFAULT_WRAP_WIDTH,
            generator: env!("CARGO_PKG_NAME").to_owned(),
        }
    }
}

/// Returns the changelog version encoded in the input file name.
///
/// The version is the file stem, so `changelogs/2.3.1.md` yields `2.3.1`.
/// Non-UTF-8 names are converted lossily.
///
/// # Errors
///
/// Returns [`ConvertError::InvalidFilename`] if the path has no file stem.
pub fn version_from_path(path: &Path) -> Result<String, ConvertError> {
    let stem = path.file_stem().context(InvalidFilenameSnafu { path })?;
    Ok(stem.to_string_lossy().into_owned())
}

/// Reflows Markdown text and builds the changelog table from it.
///
/// # Errors
///
/// Returns an error if the reflow stage rejects the text.
pub fn build_changelog(
    version: &str,
    markdown: &str,
    reflow: &impl Reflow,
    opts: &ConvertOptions,
) -> Result<Changelog, ReflowError> {
    let formatted = reflow.reflow(markdown, opts.wrap_width)?;
    Ok(Changelog::from_text(version, &formatted))
}

/// Converts Markdown text into the `Changelog` table source, without header.
///
/// # Errors
///
/// Returns an error if the reflow stage rejects the text.
pub fn markdown_to_lua(
    version: &str,
    markdown: &str,
    reflow: &impl Reflow,
    opts: &ConvertOptions,
) -> Result<String, ReflowError> {
    build_changelog(version, markdown, reflow, opts)
        .map(|changelog| lua::render_changelog(&changelog))
}

/// Converts the Markdown file at `input` into a Lua file at `output`.
///
/// Uses [`MarkdownReflow`]. The output file is created or truncated; its
/// parent directory must exist. Returns the changelog that was written.
///
/// # Errors
///
/// Returns an error if the input cannot be read, the text cannot be reflowed,
/// or the output cannot be written. A failed write may leave a truncated
/// output file behind.
pub fn convert_file(
    input: &Path,
    output: &Path,
    opts: &ConvertOptions,
) -> Result<Changelog, ConvertError> {
    convert_file_with(input, output, &MarkdownReflow, opts)
}

/// Like [`convert_file`], with a custom reflow implementation.
///
/// # Errors
///
/// See [`convert_file`].
pub fn convert_file_with(
    input: &Path,
    output: &Path,
    reflow: &impl Reflow,
    opts: &ConvertOptions,
) -> Result<Changelog, ConvertError> {
    let version = version_from_path(input)?;
    let markdown = std::fs::read_to_string(input).context(ReadInputSnafu { path: input })?;
    let changelog = build_changelog(&version, &markdown, reflow, opts)
        .context(ReflowSnafu { path: input })?;

    let mut document = lua::render_header(
        &opts.generator,
        &input.display().to_string(),
        opts.wrap_width,
    );
    document.push_str(&lua::render_changelog(&changelog));

    std::fs::write(output, document).context(WriteOutputSnafu { path: output })?;
    Ok(changelog)
}
