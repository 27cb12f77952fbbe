use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use glob::Pattern;
use serde::{Deserialize, Serialize};

use crate::core::{layout::ProjectLayout, locale::is_valid_language_tag};

pub const CONFIG_FILE_NAME: &str = ".lingorc.json";

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Languages to produce. Empty means "detect from the project".
    #[serde(default)]
    pub target_languages: Vec<String>,
    /// Declared layout; detected from the source path when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<ProjectLayout>,
    /// Glob patterns of file or directory names skipped during detection.
    #[serde(default)]
    pub ignores: Vec<String>,
    /// Base URL of the translation API.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Maximum number of languages translated at the same time.
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
    #[serde(default = "default_preserve_placeholders")]
    pub preserve_placeholders: bool,
    /// Free-form product description forwarded to the engine.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

fn default_concurrency() -> usize {
    4
}

fn default_preserve_placeholders() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            target_languages: Vec::new(),
            layout: None,
            ignores: Vec::new(),
            api_url: None,
            model: None,
            concurrency: default_concurrency(),
            preserve_placeholders: default_preserve_placeholders(),
            context: None,
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error if a glob pattern in `ignores` or a tag in
    /// `targetLanguages` is invalid, or if `concurrency` is zero.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.ignores {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", pattern))?;
        }

        for language in &self.target_languages {
            if !is_valid_language_tag(language) {
                bail!("Invalid language tag in 'targetLanguages': \"{}\"", language);
            }
        }

        if self.concurrency == 0 {
            bail!("'concurrency' must be at least 1.");
        }

        Ok(())
    }

    /// Compiled `ignores`. Invalid patterns are skipped; `validate` reports them.
    pub fn ignore_patterns(&self) -> Vec<Pattern> {
        self.ignores
            .iter()
            .filter_map(|pattern| Pattern::new(pattern).ok())
            .collect()
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// The file the config came from, `None` when using defaults.
    pub path: Option<PathBuf>,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
            config.validate()?;
            Ok(ConfigLoadResult {
                config,
                path: Some(path),
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            path: None,
        }),
    }
}
