use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    Informational,
    Purpose,
    Procedural,
    Security,
    Requirement,
    ExampleRequest,
    General,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FocusArea {
    Privacy,
    Format,
    Purpose,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    Low,
    Normal,
    High,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sentiment {
    pub concern: Level,
    pub urgency: Level,
    pub frustration: Level,
    /// High when the question carries more than one `?`.
    pub emphasis: Level,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionContext {
    pub question_type: QuestionType,
    pub focus_areas: Vec<FocusArea>,
    pub sentiment: Sentiment,
}

fn contains_any(text: &str, terms: &[&str]) -> bool {
    terms.iter().any(|t| text.contains(t))
}

pub fn analyze_question(question: &str) -> QuestionContext {
    let q = question.to_lowercase();

    QuestionContext {
        question_type: classify_question_type(&q),
        focus_areas: focus_areas(&q),
        sentiment: analyze_sentiment(question),
    }
}

pub fn classify_question_type(question: &str) -> QuestionType {
    let q = question.to_lowercase();

    if contains_any(&q, &["what", "explain", "describe", "tell me about"]) {
        QuestionType::Informational
    } else if contains_any(&q, &["why", "reason", "purpose", "need"]) {
        QuestionType::Purpose
    } else if contains_any(&q, &["how", "format", "enter", "input"]) {
        QuestionType::Procedural
    } else if contains_any(&q, &["security", "secure", "privacy", "safe", "protected"]) {
        QuestionType::Security
    } else if contains_any(&q, &["required", "mandatory", "optional"]) {
        QuestionType::Requirement
    } else if contains_any(&q, &["example", "sample"]) {
        QuestionType::ExampleRequest
    } else {
        QuestionType::General
    }
}

fn focus_areas(q: &str) -> Vec<FocusArea> {
    let mut areas = Vec::new();
    if contains_any(
        q,
        &["privacy", "secure", "security", "share", "shared", "protect", "safe", "data"],
    ) {
        areas.push(FocusArea::Privacy);
    }
    if contains_any(
        q,
        &["format", "enter", "input", "valid", "correctly", "proper", "example"],
    ) {
        areas.push(FocusArea::Format);
    }
    if contains_any(q, &["why", "purpose", "reason", "what for", "needed", "necessary"]) {
        areas.push(FocusArea::Purpose);
    }
    areas
}

fn analyze_sentiment(question: &str) -> Sentiment {
    let q = question.to_lowercase();
    let flag = |terms: &[&str], raised: Level, base: Level| {
        if contains_any(&q, terms) { raised } else { base }
    };

    Sentiment {
        concern: flag(
            &[
                "worried",
                "concern",
                "problem",
                "issue",
                "error",
                "wrong",
                "confused",
                "don't understand",
            ],
            Level::High,
            Level::Low,
        ),
        urgency: flag(
            &["urgent", "quickly", "asap", "immediate", "now", "hurry", "deadline"],
            Level::High,
            Level::Normal,
        ),
        frustration: flag(
            &["frustrated", "annoying", "stupid", "ridiculous", "waste", "irritating"],
            Level::High,
            Level::Low,
        ),
        emphasis: if question.matches('?').count() > 1 {
            Level::High
        } else {
            Level::Normal
        },
    }
}
