use std::path::{self, Path, PathBuf};

use anyhow::{Context, Result, bail};
use colored::Colorize;

use super::super::args::CommonArgs;
use crate::{
    config::{Config, load_config},
    core::translate::PlanOptions,
};

/// Source path and configuration shared by the file commands.
pub struct Settings {
    /// Absolute source path.
    pub source: PathBuf,
    pub config: Config,
    pub config_path: Option<PathBuf>,
}

/// Resolve the source path and load the config file next to it.
///
/// The config file is searched from the source file's directory upwards.
pub fn load_settings(common: &CommonArgs) -> Result<Settings> {
    let source = path::absolute(&common.source)
        .with_context(|| format!("Invalid source path: {:?}", common.source))?;

    if !source.is_file() {
        bail!("Source file '{}' does not exist.", common.source.display());
    }

    let start_dir = source.parent().unwrap_or(Path::new("."));
    let loaded = load_config(start_dir)?;

    if common.verbose
        && let Some(path) = &loaded.path
    {
        eprintln!("{} using config {}", "info:".bold().cyan(), path.display());
    }

    Ok(Settings {
        source,
        config: loaded.config,
        config_path: loaded.path,
    })
}

/// Merge CLI arguments over the config file (CLI args > config file > defaults).
pub fn plan_options(
    common: &CommonArgs,
    languages: &[String],
    update: bool,
    config: &Config,
) -> PlanOptions {
    let languages = if languages.is_empty() {
        config.target_languages.clone()
    } else {
        languages.to_vec()
    };

    PlanOptions {
        languages,
        layout: common.layout.or(config.layout),
        update,
        ignores: config.ignore_patterns(),
    }
}
