// SPDX-License-Identifier: GPL-3.0-only
// Copyright (C) 2025 Brian Hetro <whee@smaertness.net>

//! Convert Markdown changelogs to Lua table sources.
//!
//! Release notes are written in Markdown and shipped to a Lua scripting layer
//! as a generated `Changelog` table. This crate provides the conversion.
//!
//! # Overview
//!
//! For each changelog file, this crate:
//!
//! 1. Takes the version from the file name (`1.2.md` becomes `1.2`)
//! 2. Reflows the Markdown to a fixed line width
//! 3. Escapes every line for a double-quoted Lua string
//! 4. Writes a Lua file with a generated header and the `Changelog` table
//!
//! # Example
//!
//! ```no_run
//! use markdown2lua::convert::{ConvertOptions, convert_file};
//! use std::path::Path;
//!
//! let changelog = convert_file(
//!     Path::new("changelogs/1.2.md"),
//!     Path::new("scripts/changelog.lua"),
//!     &ConvertOptions::default(),
//! )
//! .unwrap();
//!
//! println!("{} lines for version {}", changelog.description.len(), changelog.version);
//! ```
//!
//! # Modules
//!
//! - [`convert`]: The file-to-file pipeline and its options
//! - [`reflow`]: Markdown-aware line wrapping
//! - [`lua`]: String escaping and Lua source rendering

#![deny(missing_docs)]

pub mod convert;
pub mod lua;
pub mod reflow;
