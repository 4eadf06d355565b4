// SPDX-License-Identifier: GPL-3.0-only
// Copyright (C) 2025 Brian Hetro <whee@smaertness.net>

//! Markdown-aware paragraph reflow.
//!
//! Changelogs are written by hand with arbitrary line lengths. Before they are
//! embedded in Lua, the text is normalized and re-wrapped so every paragraph
//! line fits the target width while the document still renders the same.
//!
//! The conversion pipeline only depends on the [`Reflow`] trait, so any
//! Markdown-aware wrapper can be plugged in. [`MarkdownReflow`] is the
//! implementation used by the command-line tool.
//!
//! # Formatting Rules
//!
//! [`MarkdownReflow`] parses the input with `comrak` and writes it back with
//! comrak's CommonMark formatter:
//! - Paragraphs are wrapped at whitespace; container prefixes (`> `, list
//!   markers) count towards the width
//! - Bullets use `-`; code blocks are always fenced
//! - Headings and tables are never wrapped and may exceed the width
//! - Hard breaks inside headings are written as inline `<br />`, since an ATX
//!   heading cannot span lines
//!
//! After formatting, the input and output are rendered to HTML and compared.
//! If they differ, formatting is retried with a few narrower widths, which
//! moves the line breaks; when no width keeps the meaning, the result is
//! [`ReflowError::ChangedMeaning`] rather than a silently different document.
//!
//! # Example
//!
//! ```
//! use markdown2lua::reflow::{MarkdownReflow, Reflow};
//!
//! let text = "# Fixes\n\n* Fixed a crash\n  when saving.\n";
//! let formatted = MarkdownReflow.reflow(text, 150).unwrap();
//!
//! assert_eq!(formatted, "# Fixes\n\n- Fixed a crash when saving.\n");
//! ```

use comrak::nodes::{AstNode, NodeValue};
use comrak::{Arena, Options, format_commonmark, markdown_to_html, parse_document};
use snafu::{ensure, prelude::*};

/// Number of widths tried, counting down from the requested one.
const WIDTH_ATTEMPTS: usize = 8;

/// Replacement for a hard break inside a heading. The trailing space stands in
/// for the newline the HTML renderer emits after `<br />`.
const HEADING_BREAK: &str = "<br /> ";

/// Error type for reflow failures.
#[derive(Debug, Snafu)]
pub enum ReflowError {
    /// The requested wrap width cannot hold any text.
    #[snafu(display("wrap width must be at least 1"))]
    InvalidWidth,

    /// The formatter failed to write its output.
    #[snafu(display("failed to render markdown: {source}"))]
    Render {
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The reflowed document would render differently from the input.
    #[snafu(display("reflowing would change how the document renders"))]
    ChangedMeaning,
}

/// Re-wraps Markdown text to a maximum line width.
pub trait Reflow {
    /// Returns `text` re-wrapped so that lines fit within `max_width`
    /// characters, preserving the document's block structure.
    ///
    /// # Errors
    ///
    /// Returns an error if the text cannot be reflowed without changing its
    /// meaning.
    fn reflow(&self, text: &str, max_width: usize) -> Result<String, ReflowError>;
}

impl<F> Reflow for F
where
    F: Fn(&str, usize) -> Result<String, ReflowError>,
{
    fn reflow(&self, text: &str, max_width: usize) -> Result<String, ReflowError> {
        self(text, max_width)
    }
}

/// CommonMark reflow backed by `comrak`.
///
/// Tables, strikethrough and task lists are recognized in addition to plain
/// CommonMark.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownReflow;

impl Reflow for MarkdownReflow {
    fn reflow(&self, text: &str, max_width: usize) -> Result<String, ReflowError> {
        ensure!(max_width > 0, InvalidWidthSnafu);
        if text.trim().is_empty() {
            return Ok(String::new());
        }

        let expected = render_html(text);
        for width in (1..=max_width).rev().take(WIDTH_ATTEMPTS) {
            let formatted = format(text, width)?;
            if render_html(&formatted) == expected {
                return Ok(formatted);
            }
        }
        ChangedMeaningSnafu.fail()
    }
}

fn enable_extensions(options: &mut Options) {
    options.extension.table = true;
    options.extension.strikethrough = true;
    options.extension.tasklist = true;
}

/// Formats `text` as CommonMark wrapped at `width`.
fn format(text: &str, width: usize) -> Result<String, ReflowError> {
    let mut options = Options::default();
    enable_extensions(&mut options);
    options.render.width = width;
    options.render.prefer_fenced = true;

    let arena = Arena::new();
    let root = parse_document(&arena, text, &options);
    inline_heading_breaks(root);

    let mut out = Vec::new();
    format_commonmark(root, &options, &mut out).context(RenderSnafu)?;
    Ok(String::from_utf8_lossy(&out).into_owned())
}

/// Replaces hard breaks inside headings with inline `<br />` markup.
fn inline_heading_breaks<'a>(root: &'a AstNode<'a>) {
    for node in root.descendants() {
        let in_heading = node
            .ancestors()
            .any(|n| matches!(n.data.borrow().value, NodeValue::Heading(_)));
        let mut ast = node.data.borrow_mut();
        if in_heading && matches!(ast.value, NodeValue::LineBreak) {
            ast.value = NodeValue::HtmlInline(HEADING_BREAK.to_owned());
        }
    }
}

/// Renders Markdown to HTML with comments removed and whitespace runs
/// collapsed.
fn render_html(text: &str) -> String {
    let mut options = Options::default();
    enable_extensions(&mut options);
    options.render.unsafe_ = true;

    strip_comments(&markdown_to_html(text, &options))
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .replace("> <", "><")
}

/// Removes `<!-- ... -->` comments. The formatter inserts one between
/// adjacent lists to keep them apart; comments do not render.
fn strip_comments(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut rest = html;
    while let Some(start) = rest.find("<!--") {
        out.push_str(&rest[..start]);
        let Some(end) = rest[start..].find("-->") else {
            rest = &rest[start..];
            break;
        };
        rest = &rest[start + end + 3..];
    }
    out.push_str(rest);
    out
}
