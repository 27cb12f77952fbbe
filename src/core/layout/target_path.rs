use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};

use super::descriptor::{SourceDescriptor, SourceNaming};
use crate::core::locale::LanguageTag;

impl SourceDescriptor {
    /// Output path for `target_language`.
    ///
    /// Pure: the result depends only on the descriptor and the target, and no
    /// directory is created. The target is normalized first, so `es_es` and
    /// `es-ES` produce the same path.
    ///
    /// - Folder: `locales/en/common.json` -> `locales/es/common.json`
    /// - File: `locales/en.schema.json` -> `locales/es.schema.json`
    /// - Shopify: `locales/en.default.schema.json` -> `locales/es.schema.json`
    /// - ARB: `lib/l10n/app_en_US.arb` -> `lib/l10n/app_es_ES.arb`
    pub fn target_path(&self, target_language: &str) -> Result<PathBuf> {
        let Some(target) = LanguageTag::parse(target_language) else {
            bail!("Invalid target language '{}'.", target_language);
        };

        match self.naming() {
            SourceNaming::Folder { file_name, .. } => {
                let root = self.locale_root().with_context(|| {
                    format!(
                        "Source file '{}' has no parent locale directory.",
                        self.path().display()
                    )
                })?;
                Ok(root.join(target.to_string()).join(file_name))
            }
            SourceNaming::File(naming) => Ok(self.path().with_file_name(naming.with_language(&target))),
        }
    }
}

/// Computes where the translation of `source` into `target_language` goes.
///
/// The layout is resolved with [`SourceDescriptor::resolve`].
///
/// # Errors
///
/// Fails when the source matches no known layout or the target is not a valid
/// language tag, rather than guessing a path.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use lingo::core::layout::build_target_path;
///
/// let path = build_target_path("lib/l10n/app_en_US.arb", "es_ES").unwrap();
/// assert_eq!(path, Path::new("lib/l10n/app_es_ES.arb"));
/// ```
pub fn build_target_path(source: impl AsRef<Path>, target_language: &str) -> Result<PathBuf> {
    SourceDescriptor::resolve(source.as_ref(), None)?.target_path(target_language)
}
