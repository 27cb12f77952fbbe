//! Report formatting and printing utilities.
//!
//! Kept separate from the commands so lingo can be used as a library.
//! Results go to stdout, warnings and hints to stderr.

use std::{
    env,
    io::{self, Write},
    path::{Path, PathBuf},
};

use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use super::commands::{
    CommandResult, CommandSummary, DetectSummary, InitSummary, TranslateSummary,
};
use crate::{
    config::CONFIG_FILE_NAME,
    core::translate::{PlannedTarget, TargetOutcome, TargetReport, TranslationPlan},
    translator::Usage,
};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

pub fn print(result: &CommandResult, verbose: bool) {
    let base = env::current_dir().unwrap_or_default();
    print_to(
        result,
        verbose,
        &base,
        &mut io::stdout().lock(),
        &mut io::stderr().lock(),
    );
}

/// Print a command result to custom writers.
///
/// Paths are shown relative to `base` when they live under it.
pub fn print_to<W: Write, E: Write>(
    result: &CommandResult,
    verbose: bool,
    base: &Path,
    out: &mut W,
    err: &mut E,
) {
    match &result.summary {
        CommandSummary::Translate(summary) => print_translate(summary, verbose, base, out, err),
        CommandSummary::Detect(summary) => print_detect(summary, base, out, err),
        CommandSummary::Init(summary) => print_init(summary, out, err),
    }
}

// ============================================================
// Internal Functions
// ============================================================

fn print_translate<W: Write, E: Write>(
    summary: &TranslateSummary,
    verbose: bool,
    base: &Path,
    out: &mut W,
    err: &mut E,
) {
    let plan = &summary.plan;
    print_source(plan, base, out);

    if plan.targets.is_empty() {
        print_no_targets(plan, err);
        return;
    }

    if summary.is_dry_run {
        let _ = writeln!(
            out,
            "{} {} file(s):",
            "Would write".yellow().bold(),
            plan.targets.len()
        );
        print_targets(&plan.targets, base, out);
        let _ = writeln!(out, "Run without {} to translate.", "--dry-run".cyan());
        return;
    }

    let width = language_width(summary.outcomes.iter().map(|o| o.language.as_str()));
    let mut total_usage = Usage::default();
    let mut succeeded = 0;

    for outcome in &summary.outcomes {
        match &outcome.result {
            Ok(report) => {
                succeeded += 1;
                total_usage += report.usage;
                print_success_line(outcome, report, width, base, out);
                print_report_warnings(outcome, report, err);
            }
            Err(error) => {
                let _ = writeln!(
                    out,
                    "{} {}  {}",
                    FAILURE_MARK.red(),
                    pad(&outcome.language, width).red(),
                    display_path(&outcome.path, base)
                );
                let _ = writeln!(err, "{} {}: {:#}", "error:".bold().red(), outcome.language, error);
            }
        }
    }

    let failed = summary.outcomes.len() - succeeded;
    if failed == 0 {
        let _ = writeln!(
            out,
            "{} {}",
            SUCCESS_MARK.green(),
            format!("Translated {} language(s)", succeeded).green()
        );
    } else {
        let _ = writeln!(
            out,
            "{} {}",
            FAILURE_MARK.red(),
            format!(
                "Translated {} of {} language(s), {} failed",
                succeeded,
                summary.outcomes.len(),
                failed
            )
            .red()
        );
    }

    if verbose {
        let _ = writeln!(
            out,
            "Usage: {} input unit(s), {} output unit(s), {} character(s)",
            total_usage.input_units, total_usage.output_units, total_usage.characters
        );
    }
}

fn print_success_line<W: Write>(
    outcome: &TargetOutcome,
    report: &TargetReport,
    width: usize,
    base: &Path,
    out: &mut W,
) {
    let detail = if !report.written {
        "up to date".dimmed().to_string()
    } else if report.kept > 0 {
        format!("{} translated, {} kept", report.translated, report.kept)
    } else {
        format!("{} translated", report.translated)
    };

    let _ = writeln!(
        out,
        "{} {}  {}  {}",
        SUCCESS_MARK.green(),
        pad(&outcome.language, width),
        display_path(&outcome.path, base),
        detail
    );
}

fn print_report_warnings<E: Write>(outcome: &TargetOutcome, report: &TargetReport, err: &mut E) {
    if let Some(reason) = &report.finish_reason
        && !reason.is_complete()
    {
        let _ = writeln!(
            err,
            "{} {}: translation stopped early ({})",
            "warning:".bold().yellow(),
            outcome.language,
            reason
        );
    }

    if report.missing > 0 {
        let _ = writeln!(
            err,
            "{} {}: {} message(s) came back untranslated",
            "warning:".bold().yellow(),
            outcome.language,
            report.missing
        );
    }
}

fn print_detect<W: Write, E: Write>(
    summary: &DetectSummary,
    base: &Path,
    out: &mut W,
    err: &mut E,
) {
    let plan = &summary.plan;
    print_source(plan, base, out);

    if let Some(path) = &summary.config_path {
        let _ = writeln!(out, "Config: {}", display_path(path, base));
    }

    if plan.targets.is_empty() {
        print_no_targets(plan, err);
        return;
    }

    let _ = writeln!(out, "Targets:");
    print_targets(&plan.targets, base, out);
}

fn print_init<W: Write, E: Write>(summary: &InitSummary, out: &mut W, err: &mut E) {
    if summary.created {
        let _ = writeln!(
            out,
            "{} {}",
            SUCCESS_MARK.green(),
            format!("Created {}", CONFIG_FILE_NAME).green()
        );
    } else {
        let _ = writeln!(
            err,
            "{} {} already exists",
            "warning:".bold().yellow(),
            summary.path.display()
        );
    }
}

fn print_source<W: Write>(plan: &TranslationPlan, base: &Path, out: &mut W) {
    let source = &plan.source;
    let _ = writeln!(
        out,
        "Source: {} ({}, {})",
        display_path(source.path(), base),
        source.language().bold(),
        source.layout()
    );
}

fn print_targets<W: Write>(targets: &[PlannedTarget], base: &Path, out: &mut W) {
    let width = language_width(targets.iter().map(|t| t.language.as_str()));
    for target in targets {
        let suffix = if target.exists {
            format!(" {}", "(update)".dimmed())
        } else {
            String::new()
        };
        let _ = writeln!(
            out,
            "  {}  {}{}",
            pad(&target.language, width),
            display_path(&target.path, base),
            suffix
        );
    }
}

fn print_no_targets<E: Write>(plan: &TranslationPlan, err: &mut E) {
    if plan.detected {
        let _ = writeln!(
            err,
            "{} no target languages found next to the source file",
            "warning:".bold().yellow()
        );
        let _ = writeln!(
            err,
            "Hint: pass {} or set 'targetLanguages' in {}.",
            "--languages".cyan(),
            CONFIG_FILE_NAME
        );
    } else {
        let _ = writeln!(
            err,
            "{} every requested language is the source language",
            "warning:".bold().yellow()
        );
    }
}

fn language_width<'a>(languages: impl Iterator<Item = &'a str>) -> usize {
    languages.map(UnicodeWidthStr::width).max().unwrap_or(0)
}

fn pad(text: &str, width: usize) -> String {
    let padding = width.saturating_sub(UnicodeWidthStr::width(text));
    format!("{}{}", text, " ".repeat(padding))
}

fn display_path(path: &Path, base: &Path) -> String {
    let shown: PathBuf = path
        .strip_prefix(base)
        .map(Path::to_path_buf)
        .unwrap_or_else(|_| path.to_path_buf());
    shown.display().to_string()
}

// ============================================================
// Tests
// ============================================================
