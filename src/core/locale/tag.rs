//! Language tag validation and normalization.
//!
//! Tags follow a simplified BCP-47 shape: `language[-Script][-Region]`.
//! Extensions and variants are not supported.

use std::{fmt, sync::LazyLock};

use regex::Regex;

static LANGUAGE_TAG_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(?P<language>[a-z]{2,3})(?:[-_](?P<script>[a-z]{4}))?(?:[-_](?P<region>[a-z]{2,3}|[0-9]{3}))?$",
    )
    .unwrap()
});

/// A structurally valid language tag, split into its subtags.
///
/// Subtags are stored in canonical casing, so `Display` always yields the
/// normalized form (`zh-Hans-CN`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LanguageTag {
    language: String,
    script: Option<String>,
    region: Option<String>,
}

impl LanguageTag {
    /// Parse a tag written with `-` or `_` separators in any case.
    ///
    /// Returns `None` when the candidate does not match the tag grammar.
    pub fn parse(candidate: &str) -> Option<Self> {
        let caps = LANGUAGE_TAG_REGEX.captures(candidate)?;
        Some(Self {
            language: caps["language"].to_ascii_lowercase(),
            script: caps.name("script").map(|m| title_case(m.as_str())),
            region: caps.name("region").map(|m| m.as_str().to_ascii_uppercase()),
        })
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn script(&self) -> Option<&str> {
        self.script.as_deref()
    }

    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    /// Join the subtags with `_`, the convention used by ARB file names.
    pub fn to_arb_suffix(&self) -> String {
        self.subtags().collect::<Vec<_>>().join("_")
    }

    fn subtags(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.language.as_str())
            .chain(self.script.as_deref())
            .chain(self.region.as_deref())
    }
}

impl fmt::Display for LanguageTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.subtags().collect::<Vec<_>>().join("-"))
    }
}

/// Checks whether `candidate` is a structurally valid language tag.
///
/// # Examples
///
/// ```
/// use lingo::core::locale::is_valid_language_tag;
///
/// assert!(is_valid_language_tag("en"));
/// assert!(is_valid_language_tag("zh_hans_cn"));
/// assert!(is_valid_language_tag("es-419"));
/// assert!(!is_valid_language_tag("en-US-Latn"));
/// assert!(!is_valid_language_tag(""));
/// ```
pub fn is_valid_language_tag(candidate: &str) -> bool {
    LANGUAGE_TAG_REGEX.is_match(candidate)
}

/// Canonicalizes the casing and separators of a language tag.
///
/// Invalid input is normalized segment by segment on a best-effort basis:
/// the first segment is lowercased, 4-letter alphabetic segments are
/// title-cased and everything else is uppercased. Empty segments are dropped.
///
/// # Examples
///
/// ```
/// use lingo::core::locale::normalize_language_tag;
///
/// assert_eq!(normalize_language_tag("en_US"), "en-US");
/// assert_eq!(normalize_language_tag("ZH_HANS_CN"), "zh-Hans-CN");
/// ```
pub fn normalize_language_tag(candidate: &str) -> String {
    if let Some(tag) = LanguageTag::parse(candidate) {
        return tag.to_string();
    }

    candidate
        .split(['-', '_'])
        .filter(|segment| !segment.is_empty())
        .enumerate()
        .map(|(index, segment)| {
            if index == 0 {
                segment.to_lowercase()
            } else if segment.len() == 4 && segment.chars().all(|c| c.is_ascii_alphabetic()) {
                title_case(segment)
            } else {
                segment.to_uppercase()
            }
        })
        .collect::<Vec<_>>()
        .join("-")
}

/// Two tags name the same language when their normalized forms are equal.
pub fn same_language(a: &str, b: &str) -> bool {
    normalize_language_tag(a) == normalize_language_tag(b)
}

fn title_case(segment: &str) -> String {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
