//! Core of the translation client.
//!
//! - `locale`: language tags and language-bearing file names
//! - `layout`: project layout detection and target paths
//! - `messages`: localization documents (JSON, JSONC, ARB)
//! - `unique_path`: collision-free output paths
//! - `translate`: planning and parallel execution of a translation run

pub mod layout;
pub mod locale;
pub mod messages;
pub mod translate;
pub mod unique_path;
