use serde::{Deserialize, Serialize};

/// Page-level signals captured alongside a form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageSignals {
    pub url: String,
    pub title: String,
    #[serde(alias = "metaDescription")]
    pub meta_description: String,
}

impl PageSignals {
    pub fn new(url: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
            meta_description: String::new(),
        }
    }
}

/// One detected input element, normalized from the scraper's output.
///
/// `required` is tri-state: `None` means the scraper did not say, which
/// matters to the password enhancer (only an explicit `false` is kept).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldDescriptor {
    pub name: String,
    pub id: String,
    pub label: String,
    pub r#type: String,
    pub required: Option<bool>,
    pub value: String,
    pub placeholder: String,
    pub options: Vec<String>,
}

impl FieldDescriptor {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_type(mut self, input_type: impl Into<String>) -> Self {
        self.r#type = input_type.into();
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_required(mut self, required: bool) -> Self {
        self.required = Some(required);
        self
    }

    pub fn is_required(&self) -> bool {
        self.required.unwrap_or(false)
    }

    /// Best human-facing identifier: name, then id, then label.
    pub fn display_name(&self) -> &str {
        [&self.name, &self.id, &self.label]
            .into_iter()
            .map(|s| s.trim())
            .find(|s| !s.is_empty())
            .unwrap_or("")
    }

    /// Lowercased `name` and `id`, the text the classifier matches keywords against.
    pub(crate) fn match_keys(&self) -> [String; 2] {
        [self.name.to_lowercase(), self.id.to_lowercase()]
    }
}

/// Attributes of the `<form>` element itself, when one exists.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormAttributes {
    pub id: String,
    pub name: String,
    pub action: String,
    #[serde(alias = "className")]
    pub class_name: String,
    #[serde(alias = "submitButtonText")]
    pub submit_button_text: String,
}

impl FormAttributes {
    /// All attribute text joined and lowercased (button text excluded).
    pub(crate) fn attribute_text(&self) -> String {
        format!(
            "{} {} {} {}",
            self.id, self.name, self.action, self.class_name
        )
        .to_lowercase()
    }
}

/// Everything the scraper hands over for a single form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageSnapshot {
    pub page: PageSignals,
    pub fields: Vec<FieldDescriptor>,
    pub form: Option<FormAttributes>,
}

pub const UNKNOWN_FORM: &str = "unknown form";
pub const UNKNOWN_PURPOSE: &str = "collecting information";
pub const UNKNOWN_DESCRIPTION: &str = "This form collects information from you. \
Review each field carefully and only share what you are comfortable providing.";

/// Outcome of one classification call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub form_type: String,
    /// Winning pattern category; `None` for an unknown form.
    pub category: Option<String>,
    pub purpose: String,
    pub description: String,
    pub confidence: f32,
    /// Every classified field, named or not.
    #[serde(default)]
    pub field_count: usize,
    /// Names of the fields that have one; unnamed controls are left out.
    pub field_names: Vec<String>,
    pub required_fields: Vec<String>,
}

impl ClassificationResult {
    pub fn unknown() -> Self {
        Self {
            form_type: UNKNOWN_FORM.to_string(),
            category: None,
            purpose: UNKNOWN_PURPOSE.to_string(),
            description: UNKNOWN_DESCRIPTION.to_string(),
            confidence: 0.5,
            field_count: 0,
            field_names: vec![],
            required_fields: vec![],
        }
    }

    pub fn is_unknown(&self) -> bool {
        self.category.is_none()
    }

    /// Attach the names of the classified fields.
    pub(crate) fn with_fields(mut self, fields: &[FieldDescriptor]) -> Self {
        self.field_count = fields.len();
        self.field_names = fields
            .iter()
            .map(|f| f.display_name().to_string())
            .filter(|n| !n.is_empty())
            .collect();
        self.required_fields = fields
            .iter()
            .filter(|f| f.is_required())
            .map(|f| f.display_name().to_string())
            .filter(|n| !n.is_empty())
            .collect();
        self
    }
}
