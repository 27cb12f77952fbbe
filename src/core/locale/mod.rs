//! Language identifiers: tag grammar and file-name conventions.
//!
//! - `tag`: validation and normalization of `language[-Script][-Region]` tags
//! - `file_name`: extraction of tags from locale file names

pub mod file_name;
pub mod tag;

pub use file_name::{LocaleFileName, extract_language_tag};
pub use tag::{LanguageTag, is_valid_language_tag, normalize_language_tag, same_language};
