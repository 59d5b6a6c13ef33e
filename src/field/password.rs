use serde::Serialize;

use crate::form::form_model::{ClassificationResult, FieldDescriptor, FormAttributes};

/// What a password field is being used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PasswordContext {
    Registration,
    Login,
    Unknown,
}

/// Static guidance shown next to a password field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PasswordGuidance {
    pub purpose: &'static str,
    pub tips: &'static [&'static str],
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnhancedField {
    pub field: FieldDescriptor,
    pub context: PasswordContext,
    pub guidance: PasswordGuidance,
}

const REGISTRATION_GUIDANCE: PasswordGuidance = PasswordGuidance {
    purpose: "Create a new password to secure your account.",
    tips: &[
        "Use at least 8 characters with upper and lower case letters.",
        "Mix in numbers and special characters.",
        "Do not reuse a password from another site.",
        "Consider using a password manager to generate and store it.",
    ],
};

const LOGIN_GUIDANCE: PasswordGuidance = PasswordGuidance {
    purpose: "Enter the password you chose when you created this account.",
    tips: &[
        "Passwords are case-sensitive; check that Caps Lock is off.",
        "Use the forgot-password link if you cannot remember it.",
        "Only sign in on pages served over https.",
    ],
};

const UNKNOWN_GUIDANCE: PasswordGuidance = PasswordGuidance {
    purpose: "This field asks for a password.",
    tips: &[
        "Check whether the site wants an existing or a new password.",
        "Never share your password with anyone.",
        "Only enter passwords on pages served over https.",
    ],
};

pub fn guidance_for(context: PasswordContext) -> PasswordGuidance {
    match context {
        PasswordContext::Registration => REGISTRATION_GUIDANCE,
        PasswordContext::Login => LOGIN_GUIDANCE,
        PasswordContext::Unknown => UNKNOWN_GUIDANCE,
    }
}

/// Mark a password field required and attach context-specific guidance.
pub fn enhance_password_field(
    field: &FieldDescriptor,
    all_fields: &[FieldDescriptor],
    form: Option<&FormAttributes>,
    result: Option<&ClassificationResult>,
) -> EnhancedField {
    let mut enhanced = field.clone();
    if enhanced.required != Some(false) {
        enhanced.required = Some(true);
    }

    let context = result
        .and_then(|r| context_from_form_type(&r.form_type))
        .unwrap_or_else(|| infer_password_context(all_fields, form));

    EnhancedField {
        field: enhanced,
        context,
        guidance: guidance_for(context),
    }
}

fn context_from_form_type(form_type: &str) -> Option<PasswordContext> {
    let lower = form_type.to_lowercase();
    if lower.contains("registration") {
        Some(PasswordContext::Registration)
    } else if lower.contains("login") {
        Some(PasswordContext::Login)
    } else {
        None
    }
}

/// Registration-vs-login vote over the surrounding fields and form text.
pub fn infer_password_context(
    all_fields: &[FieldDescriptor],
    form: Option<&FormAttributes>,
) -> PasswordContext {
    let field_text =
        |f: &FieldDescriptor| format!("{} {} {}", f.name, f.id, f.label).to_lowercase();

    let mut form_text = form
        .map(|f| format!("{} {}", f.attribute_text(), f.submit_button_text.to_lowercase()))
        .unwrap_or_default();
    for f in all_fields {
        form_text.push(' ');
        form_text.push_str(&f.label.to_lowercase());
    }

    let mut registration = 0;
    let mut login = 0;

    let has_confirm = all_fields.iter().any(|f| {
        let text = field_text(f);
        ["confirm", "verify", "repeat", "retype"]
            .iter()
            .any(|k| text.contains(k))
            && (text.contains("pass") || f.r#type == "password")
    });
    if has_confirm {
        registration += 2;
    }

    let has_terms = all_fields.iter().any(|f| {
        let text = field_text(f);
        f.r#type == "checkbox" && (text.contains("terms") || text.contains("agree"))
    });
    if has_terms {
        registration += 1;
    }

    if ["register", "sign up", "signup", "create account", "join"]
        .iter()
        .any(|k| form_text.contains(k))
    {
        registration += 2;
    }

    if form_text.contains("forgot") {
        login += 2;
    }

    if all_fields.iter().any(|f| field_text(f).contains("remember")) {
        login += 1;
    }

    if ["login", "log in", "sign in", "signin"]
        .iter()
        .any(|k| form_text.contains(k))
    {
        login += 2;
    }

    if all_fields.len() <= 3 {
        login += 1;
    }

    match registration.cmp(&login) {
        std::cmp::Ordering::Greater => PasswordContext::Registration,
        std::cmp::Ordering::Less => PasswordContext::Login,
        std::cmp::Ordering::Equal => PasswordContext::Unknown,
    }
}
