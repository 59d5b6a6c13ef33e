use serde::Serialize;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::analysis::question::{QuestionContext, QuestionType};
use crate::form::{
    cache::{FormKey, page_fingerprint},
    classifier::Candidate,
    form_model::ClassificationResult,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandidateScore {
    pub category: String,
    pub score: i32,
}

/// One classification decision, written as a JSONL line.
#[derive(Debug, Serialize)]
pub struct TraceEvent {
    pub timestamp_ms: u128,
    pub page: String,
    pub form: Option<String>,

    pub candidates: Vec<CandidateScore>,

    pub form_type: Option<String>,
    pub confidence: Option<f32>,
    pub question: Option<String>,
    pub question_type: Option<QuestionType>,
}

impl TraceEvent {
    pub fn now(url: &str) -> Self {
        Self {
            timestamp_ms: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis())
                .unwrap_or_default(),
            page: page_fingerprint(url),
            form: None,
            candidates: vec![],
            form_type: None,
            confidence: None,
            question: None,
            question_type: None,
        }
    }

    pub fn with_form(mut self, key: &FormKey) -> Self {
        self.form = match key {
            FormKey::Named(name) => Some(name.clone()),
            FormKey::AutoDetected => None,
        };
        self
    }

    pub fn with_candidates(mut self, candidates: &[Candidate<'_>]) -> Self {
        self.candidates = candidates
            .iter()
            .map(|c| CandidateScore {
                category: c.pattern.category.clone(),
                score: c.score,
            })
            .collect();
        self
    }

    pub fn with_result(mut self, result: &ClassificationResult) -> Self {
        self.form_type = Some(result.form_type.clone());
        self.confidence = Some(result.confidence);
        self
    }

    pub fn with_question(mut self, question: impl ToString, analysis: &QuestionContext) -> Self {
        self.question = Some(question.to_string());
        self.question_type = Some(analysis.question_type);
        self
    }
}
