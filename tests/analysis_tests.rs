use form_copilot::analysis::form_context::{
    Complexity, FieldCategory, PrivacyLevel, analyze_form, analyze_relationships,
    assess_complexity, assess_privacy_level, estimate_completion_time,
};
use form_copilot::analysis::question::{
    FocusArea, Level, QuestionType, analyze_question, classify_question_type,
};
use form_copilot::form::classifier::classify;
use form_copilot::form::form_model::{FieldDescriptor, PageSignals};
use form_copilot::form::patterns::PatternTable;

// ============================================================================
// Helper builders
// ============================================================================

fn registration_fields() -> Vec<FieldDescriptor> {
    vec![
        FieldDescriptor::named("first_name"),
        FieldDescriptor::named("last_name"),
        FieldDescriptor::named("email").with_required(true),
        FieldDescriptor::named("password").with_type("password").with_required(true),
        FieldDescriptor::named("confirm_password").with_type("password").with_required(true),
        FieldDescriptor::named("terms").with_type("checkbox"),
    ]
}

fn named(names: &[&str]) -> Vec<FieldDescriptor> {
    names.iter().map(|n| FieldDescriptor::named(*n)).collect()
}

// ============================================================================
// analyze_form
// ============================================================================

#[test]
fn registration_form_context() {
    let fields = registration_fields();
    let result = classify(
        &PageSignals::new("https://x.com/signup", "Create Account"),
        &fields,
        None,
    );
    let ctx = analyze_form(&fields, &result, &PatternTable::default());

    assert_eq!(ctx.form_type, "registration form");
    assert_eq!(ctx.field_count, 6);
    assert_eq!(ctx.required_field_count, 3);
    assert_eq!(
        ctx.key_fields,
        vec!["email", "password", "confirm_password", "first_name", "last_name"]
    );
    assert_eq!(ctx.privacy_level, PrivacyLevel::High);
    assert_eq!(ctx.complexity, Complexity::Medium);
    assert_eq!(ctx.estimated_completion_time, "1-2 minutes");

    assert_eq!(
        ctx.field_categories[&FieldCategory::PersonalInformation],
        vec!["first_name", "last_name"]
    );
    assert_eq!(ctx.field_categories[&FieldCategory::ContactInformation], vec!["email"]);
    assert_eq!(
        ctx.field_categories[&FieldCategory::AccountCredentials],
        vec!["password", "confirm_password"]
    );
    assert_eq!(ctx.field_categories[&FieldCategory::Other], vec!["terms"]);
    assert!(!ctx.field_categories.contains_key(&FieldCategory::PaymentInformation));

    assert_eq!(ctx.field_relationships.len(), 2);
    assert_eq!(ctx.field_relationships["first_name"][0].field, "last_name");
    assert_eq!(
        ctx.field_relationships["password"][0].relationship,
        "Password verification pair"
    );
}

#[test]
fn unknown_form_key_fields_are_required_fields() {
    let fields = vec![
        FieldDescriptor::named("a").with_required(true),
        FieldDescriptor::named("b"),
        FieldDescriptor::named("c").with_required(true),
    ];
    let result = classify(&PageSignals::default(), &fields, None);
    let ctx = analyze_form(&fields, &result, &PatternTable::default());

    assert!(result.is_unknown());
    assert_eq!(ctx.key_fields, vec!["a", "c"]);
}

#[test]
fn empty_form_is_simple_and_low_privacy() {
    assert_eq!(assess_privacy_level(&[]), PrivacyLevel::Low);
    assert_eq!(assess_complexity(&[]), Complexity::Simple);
    assert_eq!(estimate_completion_time(&[]), "1-2 minutes");
    assert!(analyze_relationships(&[]).is_empty());
}

#[test]
fn card_fields_make_privacy_very_high() {
    let fields = named(&["name", "card_number", "password"]);
    assert_eq!(assess_privacy_level(&fields), PrivacyLevel::VeryHigh);
    assert_eq!(PrivacyLevel::VeryHigh.as_str(), "very high");

    assert_eq!(assess_privacy_level(&named(&["email"])), PrivacyLevel::Standard);
    assert_eq!(assess_privacy_level(&named(&["favorite_color"])), PrivacyLevel::Low);
}

#[test]
fn large_forms_are_very_complex_and_slow() {
    let fields: Vec<FieldDescriptor> = (0..20)
        .map(|i| {
            FieldDescriptor::named(format!("answer_{}", i))
                .with_type("textarea")
                .with_required(true)
        })
        .collect();

    assert_eq!(assess_complexity(&fields), Complexity::VeryComplex);
    assert_eq!(estimate_completion_time(&fields), "20+ minutes");
}

#[test]
fn completion_time_buckets() {
    let plain = |n: usize| -> Vec<FieldDescriptor> {
        (0..n).map(|i| FieldDescriptor::named(format!("f{}", i))).collect()
    };

    assert_eq!(estimate_completion_time(&plain(6)), "1-2 minutes");
    assert_eq!(estimate_completion_time(&plain(10)), "2-5 minutes");
    assert_eq!(estimate_completion_time(&plain(20)), "5-10 minutes");
    assert_eq!(estimate_completion_time(&plain(40)), "10-20 minutes");
}

#[test]
fn complementary_prefixes_are_related() {
    let rel = analyze_relationships(&named(&[
        "billing_zip",
        "shipping_zip",
        "current_password",
        "new_password",
    ]));

    assert_eq!(rel["billing_zip"][0].field, "shipping_zip");
    assert_eq!(rel["billing_zip"][0].relationship, "Complementary information");
    assert_eq!(rel["shipping_zip"][0].field, "billing_zip");
    assert!(
        rel["current_password"]
            .iter()
            .any(|r| r.field == "new_password" && r.relationship == "Complementary information")
    );
}

#[test]
fn form_context_serializes_to_json() {
    let fields = registration_fields();
    let result = classify(&PageSignals::new("https://x.com/signup", ""), &fields, None);
    let ctx = analyze_form(&fields, &result, &PatternTable::default());

    let json = serde_json::to_value(&ctx).unwrap();
    assert_eq!(json["privacy_level"], "high");
    assert!(json["field_categories"]["account_credentials"].is_array());
}

#[test]
fn json_levels_match_text_levels() {
    let fields = named(&["card_number", "cvv"]);
    let result = classify(&PageSignals::default(), &fields, None);
    let ctx = analyze_form(&fields, &result, &PatternTable::default());

    let json = serde_json::to_value(&ctx).unwrap();
    assert_eq!(json["privacy_level"], PrivacyLevel::VeryHigh.as_str());
    assert_eq!(
        serde_json::to_value(Complexity::VeryComplex).unwrap(),
        Complexity::VeryComplex.as_str()
    );
}

// ============================================================================
// analyze_question
// ============================================================================

#[test]
fn question_types_follow_priority() {
    assert_eq!(classify_question_type("What is a CVV?"), QuestionType::Informational);
    assert_eq!(classify_question_type("Why do you want this?"), QuestionType::Purpose);
    assert_eq!(classify_question_type("How should I enter the date?"), QuestionType::Procedural);
    assert_eq!(classify_question_type("Is this safe?"), QuestionType::Security);
    assert_eq!(classify_question_type("Is the phone mandatory?"), QuestionType::Requirement);
    assert_eq!(classify_question_type("Give me a sample"), QuestionType::ExampleRequest);
    assert_eq!(classify_question_type("Hello"), QuestionType::General);
}

#[test]
fn purpose_question_with_emphasis() {
    let ctx = analyze_question("Why do you need my phone number??");

    assert_eq!(ctx.question_type, QuestionType::Purpose);
    assert_eq!(ctx.focus_areas, vec![FocusArea::Purpose]);
    assert_eq!(ctx.sentiment.emphasis, Level::High);
    assert_eq!(ctx.sentiment.concern, Level::Low);
    assert_eq!(ctx.sentiment.urgency, Level::Normal);
}

#[test]
fn worried_privacy_question() {
    let ctx = analyze_question("Is my data safe? I'm worried");

    assert_eq!(ctx.question_type, QuestionType::Security);
    assert_eq!(ctx.focus_areas, vec![FocusArea::Privacy]);
    assert_eq!(ctx.sentiment.concern, Level::High);
    assert_eq!(ctx.sentiment.emphasis, Level::Normal);
    assert_eq!(ctx.sentiment.frustration, Level::Low);
}

#[test]
fn format_focus_is_detected() {
    let ctx = analyze_question("How do I enter this correctly? This is annoying");

    assert_eq!(ctx.question_type, QuestionType::Procedural);
    assert_eq!(ctx.focus_areas, vec![FocusArea::Format]);
    assert_eq!(ctx.sentiment.frustration, Level::High);
}
