use std::collections::BTreeMap;

use serde::Serialize;

use crate::form::form_model::{ClassificationResult, FieldDescriptor};
use crate::form::patterns::PatternTable;

// ============================================================================
// Form context model
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldCategory {
    PersonalInformation,
    ContactInformation,
    AccountCredentials,
    AddressInformation,
    PaymentInformation,
    Preferences,
    ProfessionalInformation,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PrivacyLevel {
    Low,
    Standard,
    High,
    #[serde(rename = "very high")]
    VeryHigh,
}

impl PrivacyLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            PrivacyLevel::Low => "low",
            PrivacyLevel::Standard => "standard",
            PrivacyLevel::High => "high",
            PrivacyLevel::VeryHigh => "very high",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Complexity {
    Simple,
    Medium,
    Complex,
    #[serde(rename = "very complex")]
    VeryComplex,
}

impl Complexity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Complexity::Simple => "simple",
            Complexity::Medium => "medium",
            Complexity::Complex => "complex",
            Complexity::VeryComplex => "very complex",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldRelationship {
    pub field: String,
    pub relationship: &'static str,
}

/// Structural insights about a form beyond its category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormContext {
    pub form_type: String,
    pub field_count: usize,
    pub required_field_count: usize,
    pub key_fields: Vec<String>,
    pub field_categories: BTreeMap<FieldCategory, Vec<String>>,
    pub privacy_level: PrivacyLevel,
    pub complexity: Complexity,
    pub estimated_completion_time: &'static str,
    /// Only fields with at least one relationship appear.
    pub field_relationships: BTreeMap<String, Vec<FieldRelationship>>,
}

// ============================================================================
// Analysis
// ============================================================================

pub fn analyze_form(
    fields: &[FieldDescriptor],
    result: &ClassificationResult,
    table: &PatternTable,
) -> FormContext {
    let key_keywords: &[String] = result
        .category
        .as_deref()
        .and_then(|c| table.get(c))
        .map(|p| p.field_keywords.as_slice())
        .unwrap_or(&[]);

    FormContext {
        form_type: result.form_type.clone(),
        field_count: fields.len(),
        required_field_count: fields.iter().filter(|f| f.is_required()).count(),
        key_fields: identify_key_fields(fields, key_keywords),
        field_categories: categorize_fields(fields),
        privacy_level: assess_privacy_level(fields),
        complexity: assess_complexity(fields),
        estimated_completion_time: estimate_completion_time(fields),
        field_relationships: analyze_relationships(fields),
    }
}

/// Fields matching the category's keywords, then every remaining required field.
pub fn identify_key_fields(fields: &[FieldDescriptor], keywords: &[String]) -> Vec<String> {
    let mut key_fields: Vec<String> = Vec::new();

    for keyword in keywords {
        let keyword = keyword.to_lowercase();
        for field in fields {
            if field.name.is_empty() {
                continue;
            }
            if field.name.to_lowercase().contains(&keyword) && !key_fields.contains(&field.name) {
                key_fields.push(field.name.clone());
            }
        }
    }

    for field in fields.iter().filter(|f| f.is_required()) {
        if !field.name.is_empty() && !key_fields.contains(&field.name) {
            key_fields.push(field.name.clone());
        }
    }

    key_fields
}

const CATEGORY_TERMS: &[(FieldCategory, &[&str])] = &[
    (
        FieldCategory::PersonalInformation,
        &["name", "first", "last", "gender", "dob", "birth", "ssn", "social"],
    ),
    (FieldCategory::ContactInformation, &["email", "phone", "tel", "mobile", "fax"]),
    (FieldCategory::AccountCredentials, &["password", "username", "login", "confirm"]),
    (
        FieldCategory::AddressInformation,
        &["address", "street", "city", "state", "zip", "postal", "country"],
    ),
    (
        FieldCategory::PaymentInformation,
        &["card", "credit", "payment", "cvv", "expir", "billing"],
    ),
    (
        FieldCategory::Preferences,
        &["preference", "option", "setting", "subscribe", "newsletter"],
    ),
    (
        FieldCategory::ProfessionalInformation,
        &["company", "job", "title", "position", "employer", "resume", "cv"],
    ),
];

pub fn categorize_fields(fields: &[FieldDescriptor]) -> BTreeMap<FieldCategory, Vec<String>> {
    let mut categories: BTreeMap<FieldCategory, Vec<String>> = BTreeMap::new();

    for field in fields {
        let name = field.name.to_lowercase();
        let category = CATEGORY_TERMS
            .iter()
            .find(|(_, terms)| terms.iter().any(|t| name.contains(t)))
            .map(|(c, _)| *c)
            .unwrap_or(FieldCategory::Other);
        categories.entry(category).or_default().push(field.name.clone());
    }

    categories
}

pub fn assess_privacy_level(fields: &[FieldDescriptor]) -> PrivacyLevel {
    const VERY_HIGH: &[&str] =
        &["ssn", "social security", "passport", "credit", "card", "cvv", "tax"];
    const HIGH: &[&str] = &["password", "dob", "birth", "driver", "license", "income"];
    const STANDARD: &[&str] = &["name", "email", "phone", "address", "city", "zip"];

    fields
        .iter()
        .map(|f| {
            let name = f.name.to_lowercase();
            if VERY_HIGH.iter().any(|t| name.contains(t)) {
                PrivacyLevel::VeryHigh
            } else if HIGH.iter().any(|t| name.contains(t)) {
                PrivacyLevel::High
            } else if STANDARD.iter().any(|t| name.contains(t)) {
                PrivacyLevel::Standard
            } else {
                PrivacyLevel::Low
            }
        })
        .max()
        .unwrap_or(PrivacyLevel::Low)
}

pub fn assess_complexity(fields: &[FieldDescriptor]) -> Complexity {
    let complex = fields
        .iter()
        .filter(|f| matches!(f.r#type.as_str(), "file" | "date" | "select" | "textarea"))
        .count();
    let required = fields.iter().filter(|f| f.is_required()).count();

    let score = fields.len() as f32 * 0.5 + complex as f32 * 1.5 + required as f32 * 0.8;

    if score < 5.0 {
        Complexity::Simple
    } else if score < 15.0 {
        Complexity::Medium
    } else if score < 30.0 {
        Complexity::Complex
    } else {
        Complexity::VeryComplex
    }
}

pub fn estimate_completion_time(fields: &[FieldDescriptor]) -> &'static str {
    let complex = fields
        .iter()
        .filter(|f| matches!(f.r#type.as_str(), "file" | "date" | "textarea"))
        .count();

    let minutes = fields.len() as f32 * 0.3 + complex as f32;

    if minutes < 2.0 {
        "1-2 minutes"
    } else if minutes < 5.0 {
        "2-5 minutes"
    } else if minutes < 10.0 {
        "5-10 minutes"
    } else if minutes < 20.0 {
        "10-20 minutes"
    } else {
        "20+ minutes"
    }
}

const RELATED_PAIRS: &[(&str, &str, &str)] = &[
    ("first_name", "last_name", "Personal name components"),
    ("email", "confirm_email", "Email verification pair"),
    ("password", "confirm_password", "Password verification pair"),
    ("address", "city", "Address components"),
    ("city", "state", "Geographic location components"),
    ("state", "zip", "Geographic location components"),
    ("country", "zip", "Geographic location components"),
    ("credit_card", "cvv", "Payment security components"),
    ("credit_card", "expiration", "Payment components"),
];

const COMPLEMENTARY_PREFIXES: &[(&str, &str)] = &[
    ("billing_", "shipping_"),
    ("shipping_", "billing_"),
    ("current_", "new_"),
    ("new_", "current_"),
];

pub fn analyze_relationships(
    fields: &[FieldDescriptor],
) -> BTreeMap<String, Vec<FieldRelationship>> {
    let names: Vec<&str> = fields
        .iter()
        .map(|f| f.name.as_str())
        .filter(|n| !n.is_empty())
        .collect();
    let mut relationships = BTreeMap::new();

    for &name in &names {
        let lower = name.to_lowercase();
        let mut related = Vec::new();

        for (first, second, relationship) in RELATED_PAIRS {
            if !lower.contains(first) {
                continue;
            }
            for &other in &names {
                if other != name && other.to_lowercase().contains(second) {
                    related.push(FieldRelationship {
                        field: other.to_string(),
                        relationship: *relationship,
                    });
                }
            }
        }

        for (prefix, complement) in COMPLEMENTARY_PREFIXES {
            if let Some(base) = lower.strip_prefix(prefix) {
                let wanted = format!("{}{}", complement, base);
                if let Some(&other) = names.iter().find(|n| n.to_lowercase() == wanted) {
                    related.push(FieldRelationship {
                        field: other.to_string(),
                        relationship: "Complementary information",
                    });
                }
            }
        }

        if !related.is_empty() {
            relationships.insert(name.to_string(), related);
        }
    }

    relationships
}
