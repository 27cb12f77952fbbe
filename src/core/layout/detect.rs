//! Sibling-language detection.
//!
//! The decision of which entries count as locales (`folder_languages`,
//! `file_languages`) works on plain lists of names. `scan_target_languages`
//! is the only part that touches the file system.

use std::{
    collections::BTreeSet,
    fs,
    path::{Path, PathBuf},
};

use glob::Pattern;

use super::descriptor::{SourceDescriptor, SourceNaming};
use crate::core::{
    locale::{LocaleFileName, is_valid_language_tag, normalize_language_tag},
    messages::MessageFormat,
};

/// Entry names of a single directory, split into files and directories.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DirectoryListing {
    pub files: Vec<String>,
    pub dirs: Vec<String>,
}

impl DirectoryListing {
    /// List `dir`. Unreadable directories and non-UTF-8 names are skipped.
    pub fn read(dir: &Path) -> Self {
        let mut listing = Self::default();
        let Ok(entries) = fs::read_dir(dir) else {
            return listing;
        };

        for entry in entries.flatten() {
            let Ok(name) = entry.file_name().into_string() else {
                continue;
            };
            match entry.file_type() {
                Ok(file_type) if file_type.is_dir() => listing.dirs.push(name),
                Ok(_) => listing.files.push(name),
                Err(_) => {}
            }
        }

        listing
    }

    fn without_ignored(mut self, ignores: &[Pattern]) -> Self {
        let keep = |name: &String| !ignores.iter().any(|pattern| pattern.matches(name));
        self.files.retain(keep);
        self.dirs.retain(keep);
        self
    }
}

/// A language-named directory and the files it contains.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleDirectory {
    pub name: String,
    pub files: Vec<String>,
}

/// Detects the languages available next to `source`.
///
/// Returns normalized tags, sorted and deduplicated, without the source's own
/// language. Never fails: a source that cannot be classified or a directory
/// that cannot be read yields an empty list.
pub fn detect_target_languages(source: impl AsRef<Path>) -> Vec<String> {
    match SourceDescriptor::resolve(source.as_ref(), None) {
        Ok(descriptor) => scan_target_languages(&descriptor, &[]),
        Err(_) => Vec::new(),
    }
}

/// Scans the directories relevant to `source`'s layout.
///
/// Entry names matching one of `ignores` are skipped.
pub fn scan_target_languages(source: &SourceDescriptor, ignores: &[Pattern]) -> Vec<String> {
    let Some(root) = source.locale_root() else {
        return Vec::new();
    };
    let root = listing_dir(root);
    let listing = DirectoryListing::read(&root).without_ignored(ignores);

    match source.naming() {
        SourceNaming::Folder { .. } => {
            let dirs: Vec<LocaleDirectory> = listing
                .dirs
                .into_iter()
                .filter(|name| is_valid_language_tag(name))
                .map(|name| {
                    let files = DirectoryListing::read(&root.join(&name))
                        .without_ignored(ignores)
                        .files;
                    LocaleDirectory { name, files }
                })
                .collect();
            folder_languages(source, &dirs)
        }
        SourceNaming::File(_) => file_languages(source, &listing.files),
    }
}

/// Languages of `dirs` that hold a file named like the source.
pub fn folder_languages(source: &SourceDescriptor, dirs: &[LocaleDirectory]) -> Vec<String> {
    let file_name = source.file_name();
    let tags = dirs
        .iter()
        .filter(|dir| is_valid_language_tag(&dir.name))
        .filter(|dir| dir.files.iter().any(|f| same_folder_file(file_name, f)))
        .map(|dir| dir.name.as_str());

    collect_languages(source.language(), tags)
}

/// Languages of the locale files in `files` that share the source's naming family.
pub fn file_languages(source: &SourceDescriptor, files: &[String]) -> Vec<String> {
    let SourceNaming::File(naming) = source.naming() else {
        return Vec::new();
    };

    let siblings: Vec<LocaleFileName> = files
        .iter()
        .filter_map(|name| LocaleFileName::parse(name))
        .filter(|parsed| naming.same_family(parsed))
        .collect();

    collect_languages(source.language(), siblings.iter().map(|parsed| parsed.tag()))
}

fn collect_languages<'a>(source_language: &str, tags: impl Iterator<Item = &'a str>) -> Vec<String> {
    let languages: BTreeSet<String> = tags
        .map(normalize_language_tag)
        .filter(|tag| tag != source_language)
        .collect();
    languages.into_iter().collect()
}

/// Same name, or same stem with `.json`/`.jsonc` swapped.
fn same_folder_file(source: &str, candidate: &str) -> bool {
    if source == candidate {
        return true;
    }

    let (source, candidate) = (Path::new(source), Path::new(candidate));
    let json_family =
        |path: &Path| MessageFormat::from_path(path).is_some_and(MessageFormat::is_json_family);

    json_family(source) && json_family(candidate) && source.file_stem() == candidate.file_stem()
}

/// `Path::parent` returns an empty path for bare relative names.
fn listing_dir(dir: &Path) -> PathBuf {
    if dir.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        dir.to_path_buf()
    }
}
