use tracing::{debug, info};

use crate::form::form_model::{ClassificationResult, FieldDescriptor, FormAttributes, PageSignals};
use crate::form::patterns::{FormPattern, PatternTable, ScoringWeights};

/// A pattern paired with its score during one classification run.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate<'a> {
    pub pattern: &'a FormPattern,
    pub score: i32,
    pub confidence: f32,
}

/// Keyword-scoring form classifier over an injected pattern table.
#[derive(Debug, Clone, Default)]
pub struct FormClassifier {
    table: PatternTable,
    weights: ScoringWeights,
}

impl FormClassifier {
    pub fn new(table: PatternTable, weights: ScoringWeights) -> Self {
        Self { table, weights }
    }

    pub fn table(&self) -> &PatternTable {
        &self.table
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Guess what the form is for.
    pub fn classify(
        &self,
        page: &PageSignals,
        fields: &[FieldDescriptor],
        form: Option<&FormAttributes>,
    ) -> ClassificationResult {
        self.classify_with_candidates(page, fields, form).0
    }

    /// Same as [`classify`](Self::classify), also returning the ranked candidates.
    pub fn classify_with_candidates(
        &self,
        page: &PageSignals,
        fields: &[FieldDescriptor],
        form: Option<&FormAttributes>,
    ) -> (ClassificationResult, Vec<Candidate<'_>>) {
        let candidates = self.rank(page, fields, form);

        let result = match candidates.first() {
            Some(best) if best.score >= self.weights.min_score => ClassificationResult {
                form_type: format!("{} form", best.pattern.category),
                category: Some(best.pattern.category.clone()),
                purpose: best.pattern.purpose.clone(),
                description: best.pattern.description.clone(),
                confidence: best.confidence,
                field_count: 0,
                field_names: vec![],
                required_fields: vec![],
            },
            _ => ClassificationResult::unknown(),
        }
        .with_fields(fields);

        info!(
            form_type = %result.form_type,
            confidence = result.confidence,
            "classified form"
        );

        (result, candidates)
    }

    /// Score every pattern and sort best-first. Ties keep table order.
    pub fn rank(
        &self,
        page: &PageSignals,
        fields: &[FieldDescriptor],
        form: Option<&FormAttributes>,
    ) -> Vec<Candidate<'_>> {
        let url = page.url.to_lowercase();
        let title = page.title.to_lowercase();
        let field_keys: Vec<String> = fields.iter().flat_map(|f| f.match_keys()).collect();

        let mut candidates: Vec<Candidate<'_>> = self
            .table
            .patterns()
            .iter()
            .map(|pattern| {
                let score = self.score_url(pattern, &url)
                    + self.score_title(pattern, &title)
                    + self.score_fields(pattern, &field_keys)
                    + form.map_or(0, |f| self.score_form(pattern, f));

                debug!(category = %pattern.category, score, "scored pattern");

                Candidate {
                    pattern,
                    score,
                    confidence: 0.0,
                }
            })
            .collect();

        // `sort_by` is stable, so declaration order breaks ties.
        candidates.sort_by(|a, b| b.score.cmp(&a.score));

        if let Some(best) = candidates.first().map(|c| c.score) {
            let second = candidates.get(1).map_or(0, |c| c.score);
            candidates[0].confidence = self.weights.confidence(best - second);
        }

        candidates
    }

    fn score_url(&self, pattern: &FormPattern, url: &str) -> i32 {
        count_contained(&pattern.url_keywords, url) * self.weights.url_match
    }

    fn score_title(&self, pattern: &FormPattern, title: &str) -> i32 {
        count_contained(&pattern.title_keywords, title) * self.weights.title_match
    }

    fn score_fields(&self, pattern: &FormPattern, field_keys: &[String]) -> i32 {
        let present = |keyword: &String| {
            let keyword = keyword.to_lowercase();
            field_keys.iter().any(|k| k.contains(&keyword))
        };

        let required: i32 = pattern
            .required_field_keywords
            .iter()
            .map(|k| {
                if present(k) {
                    self.weights.required_present
                } else {
                    self.weights.required_missing
                }
            })
            .sum();

        let optional = pattern
            .optional_field_keywords
            .iter()
            .filter(|k| present(k))
            .count() as i32
            * self.weights.optional_present;

        required + optional
    }

    fn score_form(&self, pattern: &FormPattern, form: &FormAttributes) -> i32 {
        let attributes = form.attribute_text();
        let button = form.submit_button_text.to_lowercase();

        count_contained(&pattern.attribute_keywords, &attributes) * self.weights.attribute_match
            + count_contained(&pattern.button_keywords, &button) * self.weights.button_match
    }
}

/// Number of keywords found (case-insensitively) inside `haystack`.
fn count_contained(keywords: &[String], haystack: &str) -> i32 {
    if haystack.is_empty() {
        return 0;
    }
    keywords
        .iter()
        .filter(|k| !k.is_empty() && haystack.contains(&k.to_lowercase()))
        .count() as i32
}

/// Classify with the built-in pattern table and default weights.
pub fn classify(
    page: &PageSignals,
    fields: &[FieldDescriptor],
    form: Option<&FormAttributes>,
) -> ClassificationResult {
    FormClassifier::default().classify(page, fields, form)
}
