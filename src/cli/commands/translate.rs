use anyhow::{Result, anyhow};

use super::super::args::TranslateCommand;
use super::helper::{load_settings, plan_options};
use super::{CommandResult, CommandSummary, TranslateSummary};
use crate::{
    core::translate::{ExecuteOptions, TranslationPlan, execute},
    translator::HttpTranslator,
};

pub fn translate(cmd: TranslateCommand) -> Result<CommandResult> {
    let args = &cmd.args;
    let settings = load_settings(&args.common)?;
    let config = &settings.config;

    let options = plan_options(&args.common, &args.languages, args.update, config);
    let plan = TranslationPlan::build(&settings.source, &options)?;

    if args.dry_run || plan.targets.is_empty() {
        return Ok(CommandResult::new(CommandSummary::Translate(
            TranslateSummary {
                plan,
                is_dry_run: args.dry_run,
                outcomes: Vec::new(),
                config_path: settings.config_path,
            },
        )));
    }

    let api_url = args
        .api_url
        .as_deref()
        .or(config.api_url.as_deref())
        .ok_or_else(|| {
            anyhow!(
                "No translation API configured.\n\
                 Hint: pass --api-url or set 'apiUrl' in .lingorc.json."
            )
        })?;
    let translator = HttpTranslator::new(
        api_url,
        args.api_key.clone().unwrap_or_default(),
        args.model.clone().or_else(|| config.model.clone()),
    )?;

    let execute_options = ExecuteOptions {
        concurrency: args.concurrency.unwrap_or(config.concurrency),
        preserve_placeholders: config.preserve_placeholders,
        context: config.context.clone(),
    };
    let outcomes = execute(&plan, &translator, &execute_options)?;

    Ok(CommandResult::new(CommandSummary::Translate(
        TranslateSummary {
            plan,
            is_dry_run: false,
            outcomes,
            config_path: settings.config_path,
        },
    )))
}
