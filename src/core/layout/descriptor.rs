use std::path::{Path, PathBuf};

use anyhow::{Result, anyhow, bail};

use super::{ProjectLayout, detect::scan_target_languages};
use crate::core::{
    locale::{LocaleFileName, is_valid_language_tag, normalize_language_tag},
    messages::MessageFormat,
};

/// Where the source's language is encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceNaming {
    /// The parent directory is named after the language; the file name is shared.
    Folder { file_name: String, locale_dir: String },
    /// The file name itself carries the language.
    File(LocaleFileName),
}

/// The resolved interpretation of one source path.
///
/// Created once per invocation and only read afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDescriptor {
    path: PathBuf,
    /// Normalized source language.
    language: String,
    format: MessageFormat,
    naming: SourceNaming,
}

impl SourceDescriptor {
    /// Classify `path` from its name alone.
    ///
    /// Without a declared layout the precedence is ARB > Shopify > plain file >
    /// folder. A declared layout must fit the path.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - The path is empty or has no file name
    /// - The extension is not `.json`, `.jsonc` or `.arb`
    /// - No layout (or not the declared one) matches the path
    pub fn classify(path: &Path, declared: Option<ProjectLayout>) -> Result<Self> {
        if path.as_os_str().is_empty() {
            bail!("Source path is empty.");
        }

        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| anyhow!("Source path '{}' has no file name.", path.display()))?;

        let Some(format) = MessageFormat::from_path(path) else {
            bail!(
                "Unsupported source file '{}'. Expected a .json, .jsonc or .arb file.",
                path.display()
            );
        };

        let from_file = LocaleFileName::parse(file_name);
        let from_folder = folder_locale(path);

        let naming = match declared {
            Some(ProjectLayout::Folder) => from_folder.map(|locale_dir| SourceNaming::Folder {
                file_name: file_name.to_string(),
                locale_dir,
            }),
            Some(layout) => from_file
                .filter(|parsed| parsed.layout() == layout)
                .map(SourceNaming::File),
            None => from_file.map(SourceNaming::File).or_else(|| {
                from_folder.map(|locale_dir| SourceNaming::Folder {
                    file_name: file_name.to_string(),
                    locale_dir,
                })
            }),
        };

        let Some(naming) = naming else {
            return Err(match declared {
                Some(layout) => anyhow!(
                    "Source file '{}' does not follow the {} layout.",
                    path.display(),
                    layout
                ),
                None => anyhow!(
                    "Cannot determine the localization layout of '{}'.\n\
                     Hint: name the file after its language (en.json, app_en.arb) \
                     or place it in a language-named directory (en/common.json).",
                    path.display()
                ),
            });
        };

        Ok(Self::new(path, format, naming))
    }

    /// Classify `path`, looking at the file system first.
    ///
    /// When the parent directory is named after a language and a sibling
    /// language directory holds a file with the same name, the source is
    /// folder-based, whatever its own file name looks like: `locales/en/ui.json`
    /// next to `locales/es/ui.json` is English, not the `ui` locale. Without
    /// that evidence the name-based precedence of [`Self::classify`] applies.
    pub fn resolve(path: &Path, declared: Option<ProjectLayout>) -> Result<Self> {
        if declared.is_some() {
            return Self::classify(path, declared);
        }

        if let Ok(folder) = Self::classify(path, Some(ProjectLayout::Folder))
            && !scan_target_languages(&folder, &[]).is_empty()
        {
            return Ok(folder);
        }

        Self::classify(path, None)
    }

    fn new(path: &Path, format: MessageFormat, naming: SourceNaming) -> Self {
        let language = match &naming {
            SourceNaming::Folder { locale_dir, .. } => normalize_language_tag(locale_dir),
            SourceNaming::File(parsed) => normalize_language_tag(parsed.tag()),
        };
        Self {
            path: path.to_path_buf(),
            language,
            format,
            naming,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn format(&self) -> MessageFormat {
        self.format
    }

    pub fn naming(&self) -> &SourceNaming {
        &self.naming
    }

    pub fn layout(&self) -> ProjectLayout {
        match &self.naming {
            SourceNaming::Folder { .. } => ProjectLayout::Folder,
            SourceNaming::File(parsed) => parsed.layout(),
        }
    }

    pub fn file_name(&self) -> &str {
        self.path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or_default()
    }

    /// Directory holding the per-language entries: the grandparent for the
    /// folder layout, the parent otherwise.
    pub fn locale_root(&self) -> Option<&Path> {
        let parent = self.path.parent()?;
        match self.naming {
            SourceNaming::Folder { .. } => parent.parent(),
            SourceNaming::File(_) => Some(parent),
        }
    }
}

/// The parent directory's name, when it is a valid language tag.
fn folder_locale(path: &Path) -> Option<String> {
    let name = path.parent()?.file_name()?.to_str()?;
    is_valid_language_tag(name).then(|| name.to_string())
}
