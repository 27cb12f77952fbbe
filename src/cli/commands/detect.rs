use anyhow::Result;

use super::super::args::DetectCommand;
use super::helper::{load_settings, plan_options};
use super::{CommandResult, CommandSummary, DetectSummary};
use crate::core::translate::TranslationPlan;

/// Resolve the layout and the output paths without writing anything.
///
/// Uses the same planning as `translate --dry-run`, ignoring configured
/// target languages so the result always reflects the project on disk.
pub fn detect(cmd: DetectCommand) -> Result<CommandResult> {
    let common = &cmd.args.common;
    let settings = load_settings(common)?;

    let mut options = plan_options(common, &[], true, &settings.config);
    options.languages.clear();
    let plan = TranslationPlan::build(&settings.source, &options)?;

    Ok(CommandResult::new(CommandSummary::Detect(DetectSummary {
        plan,
        config_path: settings.config_path,
    })))
}
