//! outline-docs: turn an indented plain-text outline into a directory tree
//! of Markdown documents with YAML front matter.
//!
//! Layers, from the inside out:
//! - [`domain`]: outline tree, parser, node ids and name sanitization (pure)
//! - [`application`]: document rendering, outline loading and materialization
//! - [`infrastructure`]: filesystem seam and service wiring
//! - [`cli`]: argument parsing, dispatch and terminal output

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
