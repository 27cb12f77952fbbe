//! Translation planning and execution.
//!
//! A `TranslationPlan` decides, without touching any file content, which
//! languages to produce and where each output goes. `execute` then loads the
//! source once and translates every target in parallel; a failure in one
//! target is reported in its outcome and does not stop the others.

use std::{
    collections::{HashMap, HashSet},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use glob::Pattern;
use rayon::prelude::*;

use crate::{
    core::{
        layout::{ProjectLayout, SourceDescriptor, scan_target_languages},
        locale::{LanguageTag, is_valid_language_tag, normalize_language_tag},
        messages::MessageDocument,
        unique_path::unique_path,
    },
    translator::{FinishReason, FormatFlags, TranslationRequest, Translator, Usage},
};

/// Inputs for [`TranslationPlan::build`].
#[derive(Debug, Clone, Default)]
pub struct PlanOptions {
    /// Explicit target languages. Empty means "detect from the project".
    pub languages: Vec<String>,
    /// Declared layout; detected from the source path when `None`.
    pub layout: Option<ProjectLayout>,
    /// Update existing target files in place instead of writing new ones.
    pub update: bool,
    /// Entry names skipped during detection.
    pub ignores: Vec<Pattern>,
}

/// One language to produce and the file it goes to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedTarget {
    /// Normalized language tag.
    pub language: String,
    pub path: PathBuf,
    /// Whether `path` already exists (only possible in update mode).
    pub exists: bool,
}

#[derive(Debug, Clone)]
pub struct TranslationPlan {
    pub source: SourceDescriptor,
    pub targets: Vec<PlannedTarget>,
    /// True when the languages came from project detection.
    pub detected: bool,
    pub update: bool,
}

impl TranslationPlan {
    /// Resolve the source and compute every output path.
    ///
    /// Explicit languages are validated, normalized and deduplicated in the
    /// order given; the source language is dropped. Without `update`, paths
    /// that already exist get a ` (N)` disambiguator.
    ///
    /// An empty `targets` list is a valid plan; callers decide how to report it.
    ///
    /// # Errors
    ///
    /// Returns error if the source layout cannot be resolved or an explicit
    /// language is not a valid tag.
    pub fn build(source: &Path, options: &PlanOptions) -> Result<Self> {
        let source = SourceDescriptor::resolve(source, options.layout)?;

        let detected = options.languages.is_empty();
        let candidates = if detected {
            scan_target_languages(&source, &options.ignores)
        } else {
            options.languages.clone()
        };

        let invalid: Vec<&str> = candidates
            .iter()
            .map(String::as_str)
            .filter(|language| !is_valid_language_tag(language))
            .collect();
        if !invalid.is_empty() {
            bail!(
                "Invalid target language(s): {}.\n\
                 Hint: use tags like 'es', 'pt-BR' or 'zh-Hant-TW'.",
                invalid.join(", ")
            );
        }

        let mut seen = HashSet::new();
        let mut targets = Vec::new();
        for language in candidates.iter().map(|l| normalize_language_tag(l)) {
            if language == source.language() || !seen.insert(language.clone()) {
                continue;
            }

            let path = source.target_path(&language)?;
            let path = if options.update {
                path
            } else {
                unique_path(&path)?
            };
            let exists = options.update && path.exists();
            targets.push(PlannedTarget {
                language,
                path,
                exists,
            });
        }

        Ok(Self {
            source,
            targets,
            detected,
            update: options.update,
        })
    }
}

/// Inputs for [`execute`].
#[derive(Debug, Clone)]
pub struct ExecuteOptions {
    /// Maximum number of targets translated at the same time.
    pub concurrency: usize,
    pub preserve_placeholders: bool,
    pub context: Option<String>,
}

impl Default for ExecuteOptions {
    fn default() -> Self {
        Self {
            concurrency: 4,
            preserve_placeholders: true,
            context: None,
        }
    }
}

/// What happened for one target that was written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetReport {
    /// Units the engine returned a translation for.
    pub translated: usize,
    /// Units kept from an existing target file (update mode).
    pub kept: usize,
    /// Units sent to the engine that came back without a translation.
    pub missing: usize,
    pub usage: Usage,
    /// `None` when nothing had to be sent to the engine.
    pub finish_reason: Option<FinishReason>,
    /// False when an up-to-date target was left untouched.
    pub written: bool,
}

#[derive(Debug)]
pub struct TargetOutcome {
    pub language: String,
    pub path: PathBuf,
    pub result: Result<TargetReport>,
}

/// Translate and write every target of `plan`.
///
/// # Errors
///
/// Returns error only if the source file cannot be loaded or the worker pool
/// cannot be created; per-target failures are reported in the outcomes.
pub fn execute(
    plan: &TranslationPlan,
    translator: &dyn Translator,
    options: &ExecuteOptions,
) -> Result<Vec<TargetOutcome>> {
    let source = MessageDocument::load(plan.source.path())?;

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(options.concurrency.max(1))
        .build()
        .context("Failed to create translation worker pool")?;

    let outcomes = pool.install(|| {
        plan.targets
            .par_iter()
            .map(|target| TargetOutcome {
                language: target.language.clone(),
                path: target.path.clone(),
                result: translate_target(plan, &source, target, translator, options),
            })
            .collect()
    });

    Ok(outcomes)
}

fn translate_target(
    plan: &TranslationPlan,
    source: &MessageDocument,
    target: &PlannedTarget,
    translator: &dyn Translator,
    options: &ExecuteOptions,
) -> Result<TargetReport> {
    let tag = LanguageTag::parse(&target.language)
        .with_context(|| format!("Invalid target language '{}'", target.language))?;

    let existing = if plan.update && target.path.exists() {
        Some(MessageDocument::load(&target.path)?)
    } else {
        None
    };

    let total = source.flatten().len();
    let pending = match &existing {
        Some(existing) => source.missing_from(existing),
        None => source.flatten(),
    };
    let kept = total - pending.len();

    if pending.is_empty() && existing.is_some() {
        return Ok(TargetReport {
            translated: 0,
            kept,
            missing: 0,
            usage: Usage::default(),
            finish_reason: None,
            written: false,
        });
    }

    let (translations, usage, finish_reason) = if pending.is_empty() {
        (HashMap::new(), Usage::default(), None)
    } else {
        let request = TranslationRequest {
            source_language: plan.source.language().to_string(),
            target_language: target.language.clone(),
            units: pending.clone(),
            flags: FormatFlags {
                format: source.format(),
                preserve_placeholders: options.preserve_placeholders,
            },
            context: options.context.clone(),
        };
        let response = translator
            .translate(&request)
            .with_context(|| format!("Translation to '{}' failed", target.language))?;
        let usage = response.usage;
        let finish_reason = response.finish_reason.clone();
        (response.into_map(), usage, Some(finish_reason))
    };

    let translated = pending
        .iter()
        .filter(|unit| translations.contains_key(&unit.key))
        .count();

    source
        .translated(&tag, &translations, existing.as_ref())
        .save(&target.path)?;

    Ok(TargetReport {
        translated,
        kept,
        missing: pending.len() - translated,
        usage,
        finish_reason,
        written: true,
    })
}
