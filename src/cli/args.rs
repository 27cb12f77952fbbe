//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `translate`: Translate a source locale file into the target languages
//! - `detect`: Show the resolved layout, languages and output paths
//! - `init`: Initialize lingo configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

use crate::core::layout::ProjectLayout;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Translate(cmd)) => cmd.args.common.verbose,
            Some(Command::Detect(cmd)) => cmd.args.common.verbose,
            Some(Command::Init) | None => false,
        }
    }
}

/// Common arguments shared by commands that work on a source file.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Source locale file (.json, .jsonc or .arb)
    pub source: PathBuf,

    /// Project layout (overrides config file; detected when omitted)
    #[arg(long, value_enum)]
    pub layout: Option<ProjectLayout>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Parser)]
pub struct TranslateArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Target languages, comma separated (overrides config file; detected when omitted)
    #[arg(short, long, value_delimiter = ',')]
    pub languages: Vec<String>,

    /// Update existing target files, translating only missing keys
    #[arg(long)]
    pub update: bool,

    /// Show the files that would be written without translating
    #[arg(long)]
    pub dry_run: bool,

    /// Base URL of the translation API (overrides config file)
    #[arg(long)]
    pub api_url: Option<String>,

    /// API key for the translation service
    #[arg(long, env = "LINGO_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Model requested from the translation service (overrides config file)
    #[arg(long)]
    pub model: Option<String>,

    /// Maximum number of languages translated at the same time (overrides config file)
    #[arg(long)]
    pub concurrency: Option<usize>,
}

#[derive(Debug, Args)]
pub struct TranslateCommand {
    #[command(flatten)]
    pub args: TranslateArgs,
}

#[derive(Debug, Parser)]
pub struct DetectArgs {
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct DetectCommand {
    #[command(flatten)]
    pub args: DetectArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Translate a source locale file into every target language
    Translate(TranslateCommand),
    /// Show the detected layout, target languages and output paths
    Detect(DetectCommand),
    /// Initialize a new .lingorc.json configuration file
    Init,
}
