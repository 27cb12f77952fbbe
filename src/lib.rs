//! Lingo - translation client for localization files
//!
//! Lingo takes one source locale file (JSON, JSONC or Flutter ARB), works out
//! how the project lays out its translations, and writes a translated copy
//! for every target language next to the existing ones.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (arguments, commands, reporting)
//! - `config`: Configuration file loading and parsing
//! - `core`: Language tags, layout detection, target paths and the translation run
//! - `translator`: Translation engine abstraction and its HTTP client

pub mod cli;
pub mod config;
pub mod core;
pub mod translator;
