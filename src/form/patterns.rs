use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::CopilotError;

// ============================================================================
// FormPattern: one known category of web form
// ============================================================================

/// Detection signals and copy for one category of form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormPattern {
    pub category: String,
    #[serde(default)]
    pub field_keywords: Vec<String>,
    #[serde(default)]
    pub url_keywords: Vec<String>,
    #[serde(default)]
    pub title_keywords: Vec<String>,
    #[serde(default)]
    pub button_keywords: Vec<String>,
    #[serde(default)]
    pub attribute_keywords: Vec<String>,
    #[serde(default)]
    pub required_field_keywords: Vec<String>,
    #[serde(default)]
    pub optional_field_keywords: Vec<String>,
    pub purpose: String,
    pub description: String,
}

fn words(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

fn registration() -> FormPattern {
    FormPattern {
        category: "registration".into(),
        field_keywords: words(&[
            "email", "password", "confirm", "username", "first_name", "last_name", "name",
        ]),
        url_keywords: words(&["register", "signup", "sign-up", "join", "create-account"]),
        title_keywords: words(&["register", "sign up", "create account", "join"]),
        button_keywords: words(&["register", "sign up", "create account", "join"]),
        attribute_keywords: words(&["register", "signup", "registration"]),
        required_field_keywords: words(&["email", "password", "confirm"]),
        optional_field_keywords: words(&["name", "username", "phone", "terms"]),
        purpose: "creating a new account".into(),
        description: "This is a registration form for creating a new account. \
You will usually choose a password and confirm it, and provide an email address \
that the service uses to contact you and verify your identity."
            .into(),
    }
}

fn login() -> FormPattern {
    FormPattern {
        category: "login".into(),
        field_keywords: words(&["email", "username", "password"]),
        url_keywords: words(&["login", "signin", "sign-in", "log-in", "auth"]),
        title_keywords: words(&["login", "log in", "sign in"]),
        button_keywords: words(&["login", "log in", "sign in"]),
        attribute_keywords: words(&["login", "signin", "auth"]),
        required_field_keywords: words(&["password"]),
        optional_field_keywords: words(&["email", "username", "remember"]),
        purpose: "signing in to an existing account".into(),
        description: "This is a login form for accessing an account you already have. \
Enter the username or email address and the password you registered with."
            .into(),
    }
}

fn contact() -> FormPattern {
    FormPattern {
        category: "contact".into(),
        field_keywords: words(&["name", "email", "message", "subject", "phone"]),
        url_keywords: words(&["contact", "support", "feedback", "help"]),
        title_keywords: words(&["contact", "get in touch", "support", "feedback"]),
        button_keywords: words(&["send", "contact", "submit message"]),
        attribute_keywords: words(&["contact", "feedback"]),
        required_field_keywords: words(&["email", "message"]),
        optional_field_keywords: words(&["name", "phone", "subject"]),
        purpose: "sending a message to the site owner".into(),
        description: "This is a contact form for sending a message or inquiry. \
Provide a way to reach you, usually an email address, and describe your question \
in the message field."
            .into(),
    }
}

fn payment() -> FormPattern {
    FormPattern {
        category: "payment".into(),
        field_keywords: words(&["card", "credit_card", "card_number", "cvv", "expiration", "name"]),
        url_keywords: words(&["checkout", "payment", "pay", "billing", "order"]),
        title_keywords: words(&["checkout", "payment", "billing"]),
        button_keywords: words(&["pay", "place order", "purchase", "checkout"]),
        attribute_keywords: words(&["payment", "checkout", "billing"]),
        required_field_keywords: words(&["card", "cvv", "expir"]),
        optional_field_keywords: words(&["billing", "zip", "name"]),
        purpose: "completing a payment".into(),
        description: "This is a payment form for completing a purchase. \
It asks for card details; make sure the page is secure (https) before entering them."
            .into(),
    }
}

// ============================================================================
// PatternTable: the injected, read-only set of known patterns
// ============================================================================

/// Ordered set of patterns. Declaration order is the classifier's tie-break.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatternTable {
    patterns: Vec<FormPattern>,
}

impl Default for PatternTable {
    fn default() -> Self {
        Self {
            patterns: vec![registration(), login(), contact(), payment()],
        }
    }
}

impl PatternTable {
    /// Build a table, rejecting duplicate categories and empty tables.
    pub fn new(patterns: Vec<FormPattern>) -> Result<Self, CopilotError> {
        if patterns.is_empty() {
            return Err(CopilotError::EmptyPatternTable);
        }

        let mut seen = HashSet::new();
        for pattern in &patterns {
            if !seen.insert(pattern.category.to_lowercase()) {
                return Err(CopilotError::DuplicateCategory(pattern.category.clone()));
            }
        }

        Ok(Self { patterns })
    }

    /// Load a table from a YAML list of patterns.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, CopilotError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| CopilotError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml_str(&content).map_err(|e| match e {
            CopilotError::PatternParse { source, .. } => CopilotError::PatternParse {
                path: path.display().to_string(),
                source,
            },
            other => other,
        })
    }

    pub fn from_yaml_str(content: &str) -> Result<Self, CopilotError> {
        let patterns: Vec<FormPattern> =
            serde_yaml::from_str(content).map_err(|source| CopilotError::PatternParse {
                path: "<inline>".to_string(),
                source,
            })?;
        Self::new(patterns)
    }

    pub fn patterns(&self) -> &[FormPattern] {
        &self.patterns
    }

    pub fn get(&self, category: &str) -> Option<&FormPattern> {
        self.patterns
            .iter()
            .find(|p| p.category.eq_ignore_ascii_case(category))
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

// ============================================================================
// ScoringWeights: tunable constants of the heuristic
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    pub url_match: i32,
    pub title_match: i32,
    pub required_present: i32,
    pub required_missing: i32,
    pub optional_present: i32,
    pub attribute_match: i32,
    pub button_match: i32,
    /// Winning score below this yields an unknown form.
    pub min_score: i32,
    pub confidence_base: f32,
    pub confidence_divisor: f32,
    pub confidence_cap: f32,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            url_match: 3,
            title_match: 2,
            required_present: 2,
            required_missing: -1,
            optional_present: 1,
            attribute_match: 2,
            button_match: 2,
            min_score: 2,
            confidence_base: 0.5,
            confidence_divisor: 10.0,
            confidence_cap: 0.95,
        }
    }
}

impl ScoringWeights {
    /// `min(base + margin / divisor, cap)`.
    pub fn confidence(&self, margin: i32) -> f32 {
        let divisor = if self.confidence_divisor == 0.0 {
            1.0
        } else {
            self.confidence_divisor
        };
        (self.confidence_base + margin as f32 / divisor).min(self.confidence_cap)
    }
}
