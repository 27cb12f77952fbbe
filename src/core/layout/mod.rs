//! Project layout resolution.
//!
//! ## Module Structure
//!
//! - `descriptor`: classification of a source file into a `SourceDescriptor`
//! - `detect`: sibling-language detection (pure decisions + directory scans)
//! - `target_path`: output path construction per layout

use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

pub mod descriptor;
pub mod detect;
pub mod target_path;

pub use descriptor::{SourceDescriptor, SourceNaming};
pub use detect::{
    DirectoryListing, LocaleDirectory, detect_target_languages, file_languages, folder_languages,
    scan_target_languages,
};
pub use target_path::build_target_path;

/// How a project stores its per-language files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
pub enum ProjectLayout {
    /// `locales/en/common.json`, `locales/es/common.json`
    #[serde(rename = "folder-based")]
    #[value(name = "folder-based")]
    Folder,
    /// `locales/en.json`, `locales/es.json`
    #[serde(rename = "file-based")]
    #[value(name = "file-based")]
    File,
    /// `lib/l10n/app_en.arb`, `lib/l10n/app_es.arb`
    #[serde(rename = "arb-file-based")]
    #[value(name = "arb-file-based")]
    Arb,
    /// `locales/en.default.json`, `locales/es.json`
    #[serde(rename = "shopify-theme")]
    #[value(name = "shopify-theme")]
    ShopifyTheme,
}

impl fmt::Display for ProjectLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Folder => "folder-based",
            Self::File => "file-based",
            Self::Arb => "arb-file-based",
            Self::ShopifyTheme => "shopify-theme",
        };
        f.write_str(name)
    }
}
