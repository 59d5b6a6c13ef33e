use std::fmt::Write as _;
use std::path::Path;

use serde::Serialize;
use tracing::info;

use crate::analysis::form_context::analyze_form;
use crate::analysis::question::{QuestionContext, analyze_question};
use crate::cli::config::AppConfig;
use crate::error::CopilotError;
use crate::field::knowledge::{FieldAspect, explain_field, field_aspect};
use crate::field::password::enhance_password_field;
use crate::field::purpose::{FieldPurpose, guess_field_purpose, sample_value};
use crate::form::cache::{ClassificationCache, FormKey};
use crate::form::classifier::FormClassifier;
use crate::form::form_model::{ClassificationResult, PageSnapshot};
use crate::form::patterns::PatternTable;
use crate::form::responder::respond_to_question;
use crate::trace::logger::TraceLogger;
use crate::trace::trace::TraceEvent;

// ============================================================================
// Shared setup
// ============================================================================

/// Read a page snapshot produced by the scraper.
pub fn load_snapshot(path: impl AsRef<Path>) -> Result<PageSnapshot, CopilotError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| CopilotError::Io {
        path: path.display().to_string(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| CopilotError::SnapshotParse {
        path: path.display().to_string(),
        source,
    })
}

/// Classifier, cache, and tracer resolved from CLI flags and config.
pub struct CommandContext {
    pub classifier: FormClassifier,
    pub cache: ClassificationCache,
    pub tracer: TraceLogger,
}

impl CommandContext {
    /// Trace path precedence: CLI flag > config file.
    pub fn from_config(config: &AppConfig, trace: Option<&str>) -> Result<Self, CopilotError> {
        let table = match &config.patterns {
            Some(path) => PatternTable::from_yaml_file(path)?,
            None => PatternTable::default(),
        };
        info!(patterns = table.len(), "pattern table ready");

        let tracer = match trace.or(config.trace.as_deref()) {
            Some(path) => TraceLogger::new(path),
            None => TraceLogger::disabled(),
        };

        Ok(Self {
            classifier: FormClassifier::new(table, config.scoring.clone()),
            cache: ClassificationCache::default(),
            tracer,
        })
    }

    /// Classify the snapshot's form once per page, logging the decision.
    pub fn classify(&mut self, snapshot: &PageSnapshot) -> ClassificationResult {
        let key = FormKey::from_attributes(snapshot.form.as_ref());
        self.cache.enter_page(&snapshot.page.url);

        if let Some(cached) = self.cache.get(&key) {
            return cached.clone();
        }

        let (result, candidates) = self.classifier.classify_with_candidates(
            &snapshot.page,
            &snapshot.fields,
            snapshot.form.as_ref(),
        );

        self.tracer.log(
            &TraceEvent::now(&snapshot.page.url)
                .with_form(&key)
                .with_candidates(&candidates)
                .with_result(&result),
        );

        self.cache.insert(key, result.clone());
        result
    }
}

fn to_json<T: Serialize>(value: &T, context: &str) -> Result<String, CopilotError> {
    serde_json::to_string_pretty(value).map_err(|source| CopilotError::JsonSerialize {
        context: context.to_string(),
        source,
    })
}

// ============================================================================
// classify subcommand
// ============================================================================

pub fn cmd_classify(
    ctx: &mut CommandContext,
    snapshot: &PageSnapshot,
    json: bool,
) -> Result<String, CopilotError> {
    let result = ctx.classify(snapshot);

    if json {
        return to_json(&result, "classification result");
    }

    Ok(format!(
        "{} ({:.0}% confidence)\npurpose: {}\n{}",
        result.form_type,
        result.confidence * 100.0,
        result.purpose,
        result.description
    ))
}

// ============================================================================
// ask subcommand
// ============================================================================

#[derive(Debug, Serialize)]
struct AskOutput<'a> {
    answer: String,
    analysis: &'a QuestionContext,
}

pub fn cmd_ask(
    ctx: &mut CommandContext,
    snapshot: &PageSnapshot,
    question: &str,
    json: bool,
) -> Result<String, CopilotError> {
    let result = ctx.classify(snapshot);
    let analysis = analyze_question(question);
    info!(
        question_type = ?analysis.question_type,
        focus = ?analysis.focus_areas,
        "answering question"
    );

    ctx.tracer.log(
        &TraceEvent::now(&snapshot.page.url)
            .with_form(&FormKey::from_attributes(snapshot.form.as_ref()))
            .with_result(&result)
            .with_question(question, &analysis),
    );

    let answer = respond_to_question(Some(question), Some(&result));
    if json {
        return to_json(
            &AskOutput {
                answer,
                analysis: &analysis,
            },
            "answer",
        );
    }
    Ok(answer)
}

// ============================================================================
// fields subcommand
// ============================================================================

pub fn cmd_fields(
    ctx: &mut CommandContext,
    snapshot: &PageSnapshot,
) -> Result<String, CopilotError> {
    let result = ctx.classify(snapshot);
    let mut out = String::new();

    for field in &snapshot.fields {
        let purpose = guess_field_purpose(&field.name, &field.id, &field.label, &field.r#type);
        let name = match field.display_name() {
            "" => "(unnamed)",
            n => n,
        };
        let _ = writeln!(
            out,
            "{}: {} (e.g. {:?})",
            name,
            purpose,
            sample_value(&purpose)
        );
        let _ = writeln!(out, "  {}", explain_field(field));
        if let Some(format) = field_aspect(&purpose, FieldAspect::Format) {
            let _ = writeln!(out, "  format: {}", format);
        }
        if let Some(privacy) = field_aspect(&purpose, FieldAspect::Privacy) {
            let _ = writeln!(out, "  privacy: {}", privacy);
        }

        if purpose == FieldPurpose::Password || field.r#type == "password" {
            let enhanced = enhance_password_field(
                field,
                &snapshot.fields,
                snapshot.form.as_ref(),
                Some(&result),
            );
            let _ = writeln!(out, "  {}", enhanced.guidance.purpose);
            for tip in enhanced.guidance.tips {
                let _ = writeln!(out, "  - {}", tip);
            }
        }
    }

    Ok(out)
}

// ============================================================================
// analyze subcommand
// ============================================================================

pub fn cmd_analyze(
    ctx: &mut CommandContext,
    snapshot: &PageSnapshot,
    json: bool,
) -> Result<String, CopilotError> {
    let result = ctx.classify(snapshot);
    let context = analyze_form(&snapshot.fields, &result, ctx.classifier.table());

    if json {
        return to_json(&context, "form context");
    }

    let mut out = String::new();
    let _ = writeln!(out, "form type: {}", context.form_type);
    let _ = writeln!(
        out,
        "fields: {} ({} required)",
        context.field_count, context.required_field_count
    );
    let _ = writeln!(out, "key fields: {}", context.key_fields.join(", "));
    let _ = writeln!(out, "privacy: {}", context.privacy_level.as_str());
    let _ = writeln!(out, "complexity: {}", context.complexity.as_str());
    let _ = writeln!(out, "estimated time: {}", context.estimated_completion_time);
    for (field, related) in &context.field_relationships {
        for rel in related {
            let _ = writeln!(out, "  {} <-> {}: {}", field, rel.field, rel.relationship);
        }
    }
    Ok(out)
}
