//! Exprmig - first-gen to next-gen pipeline expression migration
//!
//! Exprmig is a CLI tool and library that finds `${...}` expressions in
//! configuration and script files and rewrites them in place as next-gen
//! `<+...>` expressions, reporting what was translated and what was left
//! behind.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (arguments, commands, console report)
//! - `config`: Configuration file loading and parsing
//! - `core`: Translation engine (extract, resolve, replace)
//! - `logging`: Tracing subscriber setup
//! - `utils`: Shared utility functions

pub mod cli;
pub mod config;
pub mod core;
pub mod logging;
pub mod utils;
