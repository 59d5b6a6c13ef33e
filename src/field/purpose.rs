use std::fmt;

// ============================================================================
// Field purpose classification
// ============================================================================

/// Semantic purpose of a form field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldPurpose {
    Email,
    Password,
    ConfirmPassword,
    Username,
    FirstName,
    LastName,
    FullName,
    Phone,
    Address,
    City,
    State,
    Zip,
    Country,
    DateOfBirth,
    Search,
    /// No keyword matched; carries the field's input type unchanged.
    InputType(String),
}

impl FieldPurpose {
    pub fn as_str(&self) -> &str {
        match self {
            FieldPurpose::Email => "email",
            FieldPurpose::Password => "password",
            FieldPurpose::ConfirmPassword => "confirm_password",
            FieldPurpose::Username => "username",
            FieldPurpose::FirstName => "first_name",
            FieldPurpose::LastName => "last_name",
            FieldPurpose::FullName => "full_name",
            FieldPurpose::Phone => "phone",
            FieldPurpose::Address => "address",
            FieldPurpose::City => "city",
            FieldPurpose::State => "state",
            FieldPurpose::Zip => "zip",
            FieldPurpose::Country => "country",
            FieldPurpose::DateOfBirth => "date_of_birth",
            FieldPurpose::Search => "search",
            FieldPurpose::InputType(t) => t,
        }
    }
}

impl fmt::Display for FieldPurpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Order matters: the first entry with a matching substring wins.
const PURPOSE_TABLE: &[(FieldPurpose, &[&str])] = &[
    (FieldPurpose::Email, &["email", "e-mail"]),
    (FieldPurpose::Password, &["password", "passwd", "pwd"]),
    (FieldPurpose::ConfirmPassword, &["confirm", "verify", "repeat", "retype"]),
    (FieldPurpose::Username, &["username", "user_name", "userid", "login"]),
    (FieldPurpose::FirstName, &["first", "fname", "given"]),
    (FieldPurpose::LastName, &["last", "lname", "surname", "family"]),
    (FieldPurpose::FullName, &["fullname", "full_name", "name"]),
    (FieldPurpose::Phone, &["phone", "tel", "mobile", "cell"]),
    (FieldPurpose::Address, &["address", "street", "addr"]),
    (FieldPurpose::City, &["city", "town"]),
    (FieldPurpose::State, &["state", "province", "region"]),
    (FieldPurpose::Zip, &["zip", "postal", "postcode"]),
    (FieldPurpose::Country, &["country", "nation"]),
    (FieldPurpose::DateOfBirth, &["birth", "dob", "birthday"]),
    (FieldPurpose::Search, &["search", "query"]),
];

/// Guess a field's purpose from its name, id, and label, falling back to its type.
pub fn guess_field_purpose(name: &str, id: &str, label: &str, input_type: &str) -> FieldPurpose {
    let text = format!("{} {} {}", name, id, label).to_lowercase();

    if let Some((purpose, _)) = PURPOSE_TABLE
        .iter()
        .find(|(_, needles)| needles.iter().any(|n| text.contains(n)))
    {
        return purpose.clone();
    }

    if input_type == "password" {
        return FieldPurpose::Password;
    }

    FieldPurpose::InputType(input_type.to_string())
}

// ============================================================================
// Auto-fill sample values
// ============================================================================

/// Placeholder value suitable for previewing an auto-fill of a field.
pub fn sample_value(purpose: &FieldPurpose) -> &'static str {
    match purpose {
        FieldPurpose::Email => "jane.doe@example.com",
        FieldPurpose::Password | FieldPurpose::ConfirmPassword => "Str0ng!Passphrase",
        FieldPurpose::Username => "janedoe",
        FieldPurpose::FirstName => "Jane",
        FieldPurpose::LastName => "Doe",
        FieldPurpose::FullName => "Jane Doe",
        FieldPurpose::Phone => "+1 555-0100",
        FieldPurpose::Address => "123 Main Street",
        FieldPurpose::City => "Springfield",
        FieldPurpose::State => "CA",
        FieldPurpose::Zip => "90210",
        FieldPurpose::Country => "United States",
        FieldPurpose::DateOfBirth => "1990-01-15",
        FieldPurpose::Search => "search terms",
        FieldPurpose::InputType(t) => match t.as_str() {
            "email" => "jane.doe@example.com",
            "password" => "Str0ng!Passphrase",
            "tel" => "+1 555-0100",
            "url" => "https://example.com",
            "number" => "42",
            "date" => "2025-01-15",
            _ => "",
        },
    }
}
