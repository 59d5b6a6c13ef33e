use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::field::purpose::{FieldPurpose, guess_field_purpose};
use crate::form::form_model::FieldDescriptor;

// ============================================================================
// Knowledge base
// ============================================================================

/// Static help text for one kind of field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldKnowledge {
    pub purpose: &'static str,
    pub format: &'static str,
    pub examples: &'static [&'static str],
    pub validation: Option<&'static str>,
    pub privacy: Option<&'static str>,
    pub tips: Option<&'static str>,
}

const EMAIL: FieldKnowledge = FieldKnowledge {
    purpose: "This field is for your email address, which the service uses for sign-in, \
account recovery, and messages to you.",
    format: "Enter a valid address in the form username@domain.com.",
    examples: &["john.doe@example.com", "jane_smith123@company.co.uk"],
    validation: Some("Must contain an @ symbol and a domain name."),
    privacy: Some("Often used as your unique identifier. Consider who you share it with."),
    tips: None,
};

const PASSWORD: FieldKnowledge = FieldKnowledge {
    purpose: "This field is for your password, which keeps other people out of your account.",
    format: "Use at least 8 characters mixing upper and lowercase letters, numbers, and symbols.",
    examples: &[],
    validation: Some("Sites often require a mix of letters, numbers, and symbols."),
    privacy: Some("Never share your password. Legitimate services will not ask for it."),
    tips: Some("Use a password you have not used elsewhere, ideally from a password manager."),
};

const CONFIRM_PASSWORD: FieldKnowledge = FieldKnowledge {
    purpose: "This field repeats your new password so typing mistakes are caught.",
    format: "Type exactly the same password as in the password field.",
    examples: &[],
    validation: Some("Must match the password field character for character."),
    privacy: None,
    tips: None,
};

const USERNAME: FieldKnowledge = FieldKnowledge {
    purpose: "This field is for the name you sign in with and that others may see.",
    format: "Pick a name using the letters, numbers, and punctuation the site allows.",
    examples: &["janedoe", "jane_doe_92"],
    validation: None,
    privacy: Some("Usernames are often public. Avoid including personal details."),
    tips: None,
};

const FIRST_NAME: FieldKnowledge = FieldKnowledge {
    purpose: "This field is for your first or given name only.",
    format: "Enter just your first name, without your family name.",
    examples: &["John", "María", "Li"],
    validation: None,
    privacy: Some("Basic personal information, usually used for personalization."),
    tips: None,
};

const LAST_NAME: FieldKnowledge = FieldKnowledge {
    purpose: "This field is for your last or family name only.",
    format: "Enter just your family name, without your first name.",
    examples: &["Smith", "García", "Zhang"],
    validation: None,
    privacy: Some("Basic personal information, usually used for identification."),
    tips: None,
};

const FULL_NAME: FieldKnowledge = FieldKnowledge {
    purpose: "This field is for your full name, which identifies you in the system.",
    format: "Enter your name as it appears on official documents.",
    examples: &["John Smith", "María García López"],
    validation: None,
    privacy: Some("Basic personal information required for identification."),
    tips: None,
};

const PHONE: FieldKnowledge = FieldKnowledge {
    purpose: "This field is for your phone number, which may be used for verification, \
two-factor authentication, or to contact you.",
    format: "Enter your number including the country code if the form asks for it.",
    examples: &["+1 555-123-4567", "(555) 123-4567"],
    validation: None,
    privacy: Some("Think about whether this site really needs a way to call you."),
    tips: None,
};

const ADDRESS: FieldKnowledge = FieldKnowledge {
    purpose: "This field is for your street address, used for shipping, billing, or \
identification.",
    format: "Enter the house or apartment number and the street name.",
    examples: &["123 Main Street Apt 4B", "1600 Pennsylvania Avenue NW"],
    validation: None,
    privacy: Some("Sensitive personal information. Be careful where you share it."),
    tips: None,
};

const CITY: FieldKnowledge = FieldKnowledge {
    purpose: "This field is for your city or town, part of your address.",
    format: "Enter the name of your city or town.",
    examples: &["New York", "London", "Tokyo"],
    validation: None,
    privacy: None,
    tips: None,
};

const STATE: FieldKnowledge = FieldKnowledge {
    purpose: "This field is for your state, province, or region, part of your address.",
    format: "Enter the full name or the standard abbreviation.",
    examples: &["California", "CA", "Ontario", "ON"],
    validation: None,
    privacy: None,
    tips: None,
};

const ZIP: FieldKnowledge = FieldKnowledge {
    purpose: "This field is for your postal or ZIP code, used for delivery and location checks.",
    format: "Enter the code in the format your country uses.",
    examples: &["90210", "SW1A 1AA"],
    validation: Some("Must match the city and state you entered."),
    privacy: None,
    tips: None,
};

const COUNTRY: FieldKnowledge = FieldKnowledge {
    purpose: "This field is for your country, which completes your address and may change \
the options or prices offered.",
    format: "Pick your country from the list or type its name.",
    examples: &["United States", "Canada", "Germany"],
    validation: None,
    privacy: None,
    tips: None,
};

const DATE_OF_BIRTH: FieldKnowledge = FieldKnowledge {
    purpose: "This field is for your date of birth, used to verify your identity and age.",
    format: "Enter the date in the format shown, typically MM/DD/YYYY in the US.",
    examples: &["01/15/1985", "15/01/1985"],
    validation: None,
    privacy: Some("Sensitive personal information often used for identity checks."),
    tips: Some("Check whether the form wants MM/DD/YYYY or DD/MM/YYYY."),
};

const DATE: FieldKnowledge = FieldKnowledge {
    purpose: "This field is for entering a specific date.",
    format: "Enter the date in the format shown, often MM/DD/YYYY in the US or DD/MM/YYYY \
elsewhere.",
    examples: &["05/15/2023", "15/05/2023"],
    validation: None,
    privacy: None,
    tips: None,
};

const CHECKBOX: FieldKnowledge = FieldKnowledge {
    purpose: "Checkboxes let you pick several options or agree to terms.",
    format: "Click the box to select it and click again to clear it.",
    examples: &["I agree to the Terms of Service", "Send me promotional emails"],
    validation: None,
    privacy: None,
    tips: None,
};

const RADIO: FieldKnowledge = FieldKnowledge {
    purpose: "Radio buttons let you pick exactly one option from a group.",
    format: "Click the option you want. Only one can be selected at a time.",
    examples: &["Yes / No", "Small / Medium / Large"],
    validation: None,
    privacy: None,
    tips: None,
};

const FILE: FieldKnowledge = FieldKnowledge {
    purpose: "This field lets you upload a document or image.",
    format: "Click to browse your files, or drag the file onto the field.",
    examples: &["Upload your ID", "Upload a profile picture"],
    validation: None,
    privacy: None,
    tips: None,
};

const SELECT: FieldKnowledge = FieldKnowledge {
    purpose: "This dropdown lets you choose one option from a fixed list.",
    format: "Open the list and pick the option that applies.",
    examples: &["Choose your country", "Select your preferred language"],
    validation: None,
    privacy: None,
    tips: None,
};

/// Knowledge for a purpose; unmatched fields are looked up by input type.
pub fn knowledge_for(purpose: &FieldPurpose) -> Option<&'static FieldKnowledge> {
    let knowledge = match purpose {
        FieldPurpose::Email => &EMAIL,
        FieldPurpose::Password => &PASSWORD,
        FieldPurpose::ConfirmPassword => &CONFIRM_PASSWORD,
        FieldPurpose::Username => &USERNAME,
        FieldPurpose::FirstName => &FIRST_NAME,
        FieldPurpose::LastName => &LAST_NAME,
        FieldPurpose::FullName => &FULL_NAME,
        FieldPurpose::Phone => &PHONE,
        FieldPurpose::Address => &ADDRESS,
        FieldPurpose::City => &CITY,
        FieldPurpose::State => &STATE,
        FieldPurpose::Zip => &ZIP,
        FieldPurpose::Country => &COUNTRY,
        FieldPurpose::DateOfBirth => &DATE_OF_BIRTH,
        FieldPurpose::Search => return None,
        FieldPurpose::InputType(t) => match t.as_str() {
            "email" => &EMAIL,
            "password" => &PASSWORD,
            "tel" => &PHONE,
            "date" => &DATE,
            "checkbox" => &CHECKBOX,
            "radio" => &RADIO,
            "file" => &FILE,
            "select" | "select-one" | "select-multiple" => &SELECT,
            _ => return None,
        },
    };
    Some(knowledge)
}

// ============================================================================
// Aspects
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldAspect {
    Purpose,
    Format,
    Examples,
    Validation,
    Privacy,
    Tips,
}

impl FieldAspect {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldAspect::Purpose => "purpose",
            FieldAspect::Format => "format",
            FieldAspect::Examples => "examples",
            FieldAspect::Validation => "validation",
            FieldAspect::Privacy => "privacy",
            FieldAspect::Tips => "tips",
        }
    }
}

/// One aspect of a field's knowledge, or `None` when nothing is known.
pub fn field_aspect(purpose: &FieldPurpose, aspect: FieldAspect) -> Option<String> {
    let knowledge = knowledge_for(purpose)?;
    let text = match aspect {
        FieldAspect::Purpose => Some(knowledge.purpose.to_string()),
        FieldAspect::Format => Some(knowledge.format.to_string()),
        FieldAspect::Examples if !knowledge.examples.is_empty() => {
            Some(knowledge.examples.join(", "))
        }
        FieldAspect::Examples => None,
        FieldAspect::Validation => knowledge.validation.map(str::to_string),
        FieldAspect::Privacy => knowledge.privacy.map(str::to_string),
        FieldAspect::Tips => knowledge.tips.map(str::to_string),
    };
    text.filter(|t| !t.is_empty())
}

// ============================================================================
// Explanation
// ============================================================================

pub const GENERIC_EXPLANATION: &str = "This field collects information the form needs.";

/// Explain what a field is for: knowledge base first, then its label or name.
pub fn explain_field(field: &FieldDescriptor) -> String {
    let purpose = guess_field_purpose(&field.name, &field.id, &field.label, &field.r#type);
    if let Some(text) = field_aspect(&purpose, FieldAspect::Purpose) {
        return text;
    }

    let label = match field.label.trim() {
        "" => field.display_name(),
        l => l,
    };
    if label.is_empty() {
        GENERIC_EXPLANATION.to_string()
    } else {
        format!("This field is for your {}.", label.to_lowercase())
    }
}

// ============================================================================
// Validation
// ============================================================================

static PHONE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d{3}[-.\s]?\d{3}[-.\s]?\d{4}$").expect("phone pattern is a valid regex")
});

pub const VALID_MESSAGE: &str = "Field looks valid.";
pub const EMAIL_MESSAGE: &str = "Email address must contain an @ symbol.";
pub const PASSWORD_MESSAGE: &str = "Password should be at least 8 characters.";
pub const PHONE_MESSAGE: &str = "Phone number should be in the format XXX-XXX-XXXX.";

const MIN_PASSWORD_CHARS: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldValidation {
    pub is_valid: bool,
    pub message: &'static str,
}

impl FieldValidation {
    fn valid() -> Self {
        Self {
            is_valid: true,
            message: VALID_MESSAGE,
        }
    }

    fn invalid(message: &'static str) -> Self {
        Self {
            is_valid: false,
            message,
        }
    }
}

impl fmt::Display for FieldValidation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message)
    }
}

/// Rule-based check of a value against what its field expects.
///
/// Only email, password, and phone fields carry rules; every other value passes.
pub fn validate_field(purpose: &FieldPurpose, value: &str) -> FieldValidation {
    let kind = match purpose {
        FieldPurpose::InputType(t) => t.as_str(),
        FieldPurpose::ConfirmPassword => "password",
        FieldPurpose::Phone => "tel",
        other => other.as_str(),
    };

    match kind {
        "email" if !value.contains('@') => FieldValidation::invalid(EMAIL_MESSAGE),
        "password" if value.chars().count() < MIN_PASSWORD_CHARS => {
            FieldValidation::invalid(PASSWORD_MESSAGE)
        }
        "tel" if !PHONE_PATTERN.is_match(value) => FieldValidation::invalid(PHONE_MESSAGE),
        _ => FieldValidation::valid(),
    }
}
