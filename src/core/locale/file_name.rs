//! Classification of locale file names.
//!
//! A single pass turns a file name into one of three naming conventions:
//!
//! - `Arb`: Flutter ARB files, `app_en_US.arb` (prefix + `_`-joined tag)
//! - `Shopify`: theme locales, `en.default.json` / `en.default.schema.json`
//! - `Plain`: JSON/JSONC files named after the tag, `en.json` / `en.schema.json`
//!
//! Precedence is ARB > Shopify > Plain: an ARB file is never read as a Shopify
//! file, and a `.default.` marker is checked before the plain stem.

use std::path::Path;

use super::tag::{LanguageTag, is_valid_language_tag, normalize_language_tag};
use crate::core::{layout::ProjectLayout, messages::MessageFormat};

const SHOPIFY_DEFAULT_MARKER: &str = ".default";
const SHOPIFY_SCHEMA_SUFFIX: &str = ".schema";

/// ARB tags are at most `language_Script_Region`.
const MAX_ARB_TAG_SEGMENTS: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocaleFileName {
    /// `{prefix}{tag}.arb`, where `prefix` keeps its trailing `_` (or is empty).
    Arb { prefix: String, tag: String },
    /// `{tag}.default[.schema].{ext}`
    Shopify {
        tag: String,
        schema: bool,
        format: MessageFormat,
    },
    /// `{tag}{suffix}.{ext}`, where `suffix` is empty or starts with `.`.
    Plain {
        tag: String,
        suffix: String,
        format: MessageFormat,
    },
}

/// Grouping key used to decide whether two locale files belong to the same set.
#[derive(Debug, PartialEq, Eq)]
enum Family<'a> {
    Arb { prefix: &'a str },
    Json { suffix: &'a str },
}

impl LocaleFileName {
    /// Classify a file name, returning `None` when it is not a locale file.
    pub fn parse(file_name: &str) -> Option<Self> {
        let (stem, extension) = file_name.rsplit_once('.')?;
        let format = MessageFormat::from_extension(extension)?;

        match format {
            MessageFormat::Arb => parse_arb_stem(stem),
            MessageFormat::Json | MessageFormat::Jsonc => {
                parse_shopify_stem(stem, format).or_else(|| parse_plain_stem(stem, format))
            }
        }
    }

    /// The language tag exactly as written in the file name.
    pub fn tag(&self) -> &str {
        match self {
            Self::Arb { tag, .. } | Self::Shopify { tag, .. } | Self::Plain { tag, .. } => tag,
        }
    }

    pub fn format(&self) -> MessageFormat {
        match self {
            Self::Arb { .. } => MessageFormat::Arb,
            Self::Shopify { format, .. } | Self::Plain { format, .. } => *format,
        }
    }

    pub fn layout(&self) -> ProjectLayout {
        match self {
            Self::Arb { .. } => ProjectLayout::Arb,
            Self::Shopify { .. } => ProjectLayout::ShopifyTheme,
            Self::Plain { .. } => ProjectLayout::File,
        }
    }

    /// Text preserved around the tag when renaming: the ARB prefix, or the
    /// suffix between the tag and the extension.
    pub fn fixed_text(&self) -> &str {
        match self {
            Self::Arb { prefix, .. } => prefix,
            Self::Shopify { schema: true, .. } => SHOPIFY_SCHEMA_SUFFIX,
            Self::Shopify { schema: false, .. } => "",
            Self::Plain { suffix, .. } => suffix,
        }
    }

    /// Build the file name for `target` following the same convention.
    ///
    /// Shopify's `.default` marker only belongs to the source locale, so it is
    /// dropped from the result.
    pub fn with_language(&self, target: &LanguageTag) -> String {
        match self {
            Self::Arb { prefix, .. } => format!("{}{}.arb", prefix, target.to_arb_suffix()),
            Self::Shopify { format, .. } | Self::Plain { format, .. } => format!(
                "{}{}.{}",
                target,
                self.fixed_text(),
                format.extension()
            ),
        }
    }

    /// Whether `other` is a sibling of `self` in a file-based layout.
    ///
    /// JSON and JSONC are interchangeable; ARB files must share the prefix.
    pub fn same_family(&self, other: &LocaleFileName) -> bool {
        self.family() == other.family()
    }

    fn family(&self) -> Family<'_> {
        match self {
            Self::Arb { prefix, .. } => Family::Arb { prefix },
            Self::Shopify { .. } | Self::Plain { .. } => Family::Json {
                suffix: self.fixed_text(),
            },
        }
    }
}

/// Extracts the language tag embedded in a file name.
///
/// Accepts a bare file name or a path; only the last component is inspected.
///
/// # Examples
///
/// ```
/// use lingo::core::locale::extract_language_tag;
///
/// assert_eq!(extract_language_tag("en.json").as_deref(), Some("en"));
/// assert_eq!(extract_language_tag("app_en_US.arb").as_deref(), Some("en_US"));
/// assert_eq!(extract_language_tag("en.default.schema.json").as_deref(), Some("en"));
/// assert_eq!(extract_language_tag("readme.md"), None);
/// ```
pub fn extract_language_tag(file_name: &str) -> Option<String> {
    let name = Path::new(file_name).file_name()?.to_str()?;
    LocaleFileName::parse(name).map(|parsed| parsed.tag().to_string())
}

fn parse_shopify_stem(stem: &str, format: MessageFormat) -> Option<LocaleFileName> {
    let (tag, rest) = stem.split_once(SHOPIFY_DEFAULT_MARKER)?;
    let schema = match rest {
        "" => false,
        SHOPIFY_SCHEMA_SUFFIX => true,
        _ => return None,
    };

    is_valid_language_tag(tag).then(|| LocaleFileName::Shopify {
        tag: tag.to_string(),
        schema,
        format,
    })
}

fn parse_plain_stem(stem: &str, format: MessageFormat) -> Option<LocaleFileName> {
    if is_valid_language_tag(stem) {
        return Some(LocaleFileName::Plain {
            tag: stem.to_string(),
            suffix: String::new(),
            format,
        });
    }

    let (tag, rest) = stem.split_once('.')?;
    (is_valid_language_tag(tag) && !rest.is_empty()).then(|| LocaleFileName::Plain {
        tag: tag.to_string(),
        suffix: format!(".{}", rest),
        format,
    })
}

/// The longest trailing tag after a non-empty prefix wins, so regions survive
/// in any case (`app_en_us` is `en_us`, `app_pt_br` is `pt_br`).
///
/// A trailing parse is skipped when it cannot be a real tag written by hand:
/// a language subtag in upper case (`US` in `en_US`), or a three-letter
/// language that only appears lowercase because it is part of the prefix
/// (`app_en` in `my_app_en`). The whole stem (`en.arb`, `en_US.arb`) is used
/// only when no trailing parse is left.
fn parse_arb_stem(stem: &str) -> Option<LocaleFileName> {
    let segments: Vec<&str> = stem.split('_').collect();
    let max_tag_segments = MAX_ARB_TAG_SEGMENTS.min(segments.len().saturating_sub(1));

    let prefixed: Vec<(String, String)> = (1..=max_tag_segments)
        .rev()
        .map(|tag_segments| {
            let split = segments.len() - tag_segments;
            (
                format!("{}_", segments[..split].join("_")),
                segments[split..].join("_"),
            )
        })
        .filter(|(_, tag)| is_valid_language_tag(tag))
        .collect();
    let whole = is_valid_language_tag(stem).then(|| (String::new(), stem.to_string()));

    let (prefix, tag) = prefixed
        .iter()
        .find(|(_, tag)| is_plausible_arb_tag(tag))
        .cloned()
        .or_else(|| whole.clone())
        .or_else(|| prefixed.first().cloned())?;

    Some(LocaleFileName::Arb { prefix, tag })
}

fn is_plausible_arb_tag(tag: &str) -> bool {
    let language = tag.split('_').next().unwrap_or_default();
    if language.chars().any(|c| c.is_ascii_uppercase()) {
        return false;
    }
    language.len() < 3 || is_canonical(tag)
}

fn is_canonical(tag: &str) -> bool {
    normalize_language_tag(tag).replace('-', "_") == tag.replace('-', "_")
}
