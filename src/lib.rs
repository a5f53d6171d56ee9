//! html-i18n-injector
//!
//! Localizes a tree of HTML documents: every `[[key]]` placeholder in a
//! language folder is replaced with the matching string from that
//! language's JSON dictionaries.
//!
//! The pieces, leaf first:
//! - [`dictionary`]: loads, merges and sanitizes JSON sources
//! - [`language`]: maps a folder name to its dictionary files
//! - [`inject`]: the two-pass placeholder rewrite over documents
//! - [`workspace`]: file-tree walking, copying and clean-up
//! - [`localizer`]: one complete run over a target tree
//! - [`cli`]: the command-line front end

pub mod cli;
pub mod config;
pub mod dictionary;
pub mod inject;
pub mod language;
pub mod localizer;
pub mod types;
pub mod workspace;

mod test_utils;

pub use localizer::{
    Localizer,
    RunOptions,
    RunReport,
};
