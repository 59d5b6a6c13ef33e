use crate::form::form_model::ClassificationResult;

pub const FALLBACK_ANSWER: &str =
    "I need more information about this form to answer that question.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum QuestionIntent {
    FormType,
    Purpose,
    General,
}

fn detect_intent(question: &str) -> QuestionIntent {
    let q = question.to_lowercase();
    let asks_kind = q.contains("kind") || q.contains("type");

    if (q.contains("what") || q.contains("which")) && asks_kind {
        QuestionIntent::FormType
    } else if q.contains("purpose") || (q.contains("what") && q.contains("for")) {
        QuestionIntent::Purpose
    } else {
        QuestionIntent::General
    }
}

/// Answer a free-text question about a classified form with plain text.
pub fn respond_to_question(
    question: Option<&str>,
    result: Option<&ClassificationResult>,
) -> String {
    let (question, result) = match (question.map(str::trim), result) {
        (Some(q), Some(r)) if !q.is_empty() => (q, r),
        _ => return FALLBACK_ANSWER.to_string(),
    };

    match detect_intent(question) {
        QuestionIntent::FormType => describe_form_type(result),
        QuestionIntent::Purpose => describe_purpose(result),
        QuestionIntent::General => {
            if result.description.trim().is_empty() {
                format!(
                    "This is {} {} used for {}.",
                    article(&result.form_type),
                    result.form_type,
                    result.purpose
                )
            } else {
                result.description.clone()
            }
        }
    }
}

fn article(noun: &str) -> &'static str {
    match noun.chars().next().map(|c| c.to_ascii_lowercase()) {
        Some('a' | 'e' | 'i' | 'o' | 'u') => "an",
        _ => "a",
    }
}

fn describe_form_type(result: &ClassificationResult) -> String {
    let count = result.field_count;
    let mut answer = format!(
        "This appears to be {} {} for {}. It has {} field{}",
        article(&result.form_type),
        result.form_type,
        result.purpose,
        count,
        if count == 1 { "" } else { "s" }
    );

    if result.field_names.is_empty() {
        answer.push('.');
    } else {
        let shown: Vec<&str> = result.field_names.iter().take(3).map(String::as_str).collect();
        answer.push_str(&format!(", including {}.", shown.join(", ")));
    }
    answer
}

fn describe_purpose(result: &ClassificationResult) -> String {
    let mut answer = format!(
        "The purpose of this {} is {}.",
        result.form_type, result.purpose
    );

    let examples: Vec<&str> = result
        .required_fields
        .iter()
        .take(2)
        .map(String::as_str)
        .collect();
    if !examples.is_empty() {
        answer.push_str(&format!(
            " You will need to provide {}.",
            examples.join(" and ")
        ));
    }
    answer
}
