use std::path::PathBuf;

use super::super::exit_status::ExitStatus;
use crate::core::translate::{TargetOutcome, TranslationPlan};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Translate,
    Detect,
    Init,
}

#[derive(Debug)]
pub enum CommandSummary {
    Translate(TranslateSummary),
    Detect(DetectSummary),
    Init(InitSummary),
}

#[derive(Debug)]
pub struct TranslateSummary {
    pub plan: TranslationPlan,
    pub is_dry_run: bool,
    /// One entry per planned target; empty for dry runs.
    pub outcomes: Vec<TargetOutcome>,
    /// Config file that was applied, if any.
    pub config_path: Option<PathBuf>,
}

#[derive(Debug)]
pub struct DetectSummary {
    pub plan: TranslationPlan,
    pub config_path: Option<PathBuf>,
}

#[derive(Debug)]
pub struct InitSummary {
    pub path: PathBuf,
    /// False when the file already existed.
    pub created: bool,
}

/// Result of running lingo commands
#[derive(Debug)]
pub struct CommandResult {
    pub kind: CommandKind,
    pub summary: CommandSummary,
    /// Targets (or files) that could not be produced.
    pub failure_count: usize,
}

impl CommandResult {
    pub fn new(summary: CommandSummary) -> Self {
        let (kind, failure_count) = match &summary {
            CommandSummary::Translate(summary) => {
                let failed = summary
                    .outcomes
                    .iter()
                    .filter(|outcome| outcome.result.is_err())
                    .count();
                let nothing_to_do = usize::from(summary.plan.targets.is_empty());
                (CommandKind::Translate, failed + nothing_to_do)
            }
            CommandSummary::Detect(summary) => (
                CommandKind::Detect,
                usize::from(summary.plan.targets.is_empty()),
            ),
            CommandSummary::Init(summary) => (CommandKind::Init, usize::from(!summary.created)),
        };

        Self {
            kind,
            summary,
            failure_count,
        }
    }

    pub fn exit_status(&self) -> ExitStatus {
        if self.failure_count > 0 {
            ExitStatus::Failure
        } else {
            ExitStatus::Success
        }
    }
}
