use std::path::PathBuf;

use clap::Parser;
use form_copilot::cli::commands::{
    CommandContext, cmd_analyze, cmd_ask, cmd_classify, cmd_fields, load_snapshot,
};
use form_copilot::cli::config::{AppConfig, Cli, Commands, load_config, log_level};
use form_copilot::form::form_model::FieldDescriptor;
use form_copilot::CopilotError;

// ============================================================================
// Helpers
// ============================================================================

fn temp_file(name: &str, content: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "form_copilot_{}_{}",
        std::process::id(),
        name
    ));
    std::fs::write(&path, content).unwrap();
    path
}

const SIGNUP_SNAPSHOT: &str = r#"{
  "page": {
    "url": "https://x.com/signup",
    "title": "Create Account",
    "metaDescription": "Join us today"
  },
  "fields": [
    { "name": "email", "type": "email", "label": "Email", "required": true },
    { "name": "password", "type": "password", "label": "Password", "required": true },
    { "name": "confirm_password", "type": "password", "label": "Confirm password" }
  ],
  "form": { "id": "signup-form", "submitButtonText": "Sign Up" }
}"#;

fn default_context() -> CommandContext {
    CommandContext::from_config(&AppConfig::default(), None).unwrap()
}

// ============================================================================
// CLI Argument Parsing Tests
// ============================================================================

#[test]
fn cli_parse_classify() {
    let cli = Cli::parse_from(["form-copilot", "classify", "--snapshot", "page.json"]);
    match cli.command {
        Commands::Classify { snapshot, json } => {
            assert_eq!(snapshot, "page.json");
            assert!(!json);
        }
        _ => panic!("Expected Classify command"),
    }
    assert_eq!(cli.verbose, 0);
    assert!(cli.config.is_none());
}

#[test]
fn cli_parse_ask_with_globals() {
    let cli = Cli::parse_from([
        "form-copilot",
        "-vv",
        "--config",
        "custom.yaml",
        "ask",
        "--snapshot",
        "page.json",
        "-q",
        "What is this form for?",
        "--trace",
        "trace.jsonl",
    ]);
    match cli.command {
        Commands::Ask {
            snapshot,
            question,
            json,
        } => {
            assert_eq!(snapshot, "page.json");
            assert_eq!(question, "What is this form for?");
            assert!(!json);
        }
        _ => panic!("Expected Ask command"),
    }
    assert_eq!(cli.verbose, 2);
    assert_eq!(cli.config.as_deref(), Some("custom.yaml"));
    assert_eq!(cli.trace.as_deref(), Some("trace.jsonl"));
}

#[test]
fn cli_parse_analyze_json() {
    let cli = Cli::parse_from(["form-copilot", "analyze", "--snapshot", "p.json", "--json"]);
    assert!(matches!(cli.command, Commands::Analyze { json: true, .. }));
}

#[test]
fn cli_requires_snapshot() {
    assert!(Cli::try_parse_from(["form-copilot", "fields"]).is_err());
}

#[test]
fn verbosity_maps_to_log_level() {
    assert_eq!(log_level(0), "warn");
    assert_eq!(log_level(1), "info");
    assert_eq!(log_level(2), "debug");
    assert_eq!(log_level(9), "trace");
}

// ============================================================================
// Config Loading Tests
// ============================================================================

#[test]
fn missing_config_gives_defaults() {
    let config = load_config(Some("/nonexistent/form-copilot.yaml"));
    assert_eq!(config, AppConfig::default());
    assert_eq!(config.scoring.url_match, 3);
    assert_eq!(config.scoring.confidence_cap, 0.95);
}

#[test]
fn partial_config_keeps_other_defaults() {
    let path = temp_file(
        "partial.yaml",
        "scoring:\n  url_match: 5\ntrace: out.jsonl\n",
    );
    let config = load_config(path.to_str());

    assert_eq!(config.scoring.url_match, 5);
    assert_eq!(config.scoring.title_match, 2);
    assert_eq!(config.scoring.min_score, 2);
    assert_eq!(config.trace.as_deref(), Some("out.jsonl"));
    assert!(config.patterns.is_none());
}

#[test]
fn malformed_config_gives_defaults() {
    let path = temp_file("malformed.yaml", "scoring: [1, 2\n");
    assert_eq!(load_config(path.to_str()), AppConfig::default());
}

#[test]
fn missing_pattern_file_fails_context() {
    let config = AppConfig {
        patterns: Some("/nonexistent/patterns.yaml".into()),
        ..AppConfig::default()
    };
    assert!(matches!(
        CommandContext::from_config(&config, None),
        Err(CopilotError::Io { .. })
    ));
}

// ============================================================================
// Snapshot Loading Tests
// ============================================================================

#[test]
fn snapshot_accepts_camel_case_keys() {
    let path = temp_file("signup.json", SIGNUP_SNAPSHOT);
    let snapshot = load_snapshot(&path).unwrap();

    assert_eq!(snapshot.page.meta_description, "Join us today");
    assert_eq!(snapshot.fields.len(), 3);
    assert_eq!(snapshot.fields[0].r#type, "email");
    assert_eq!(snapshot.fields[2].required, None);
    let form = snapshot.form.unwrap();
    assert_eq!(form.id, "signup-form");
    assert_eq!(form.submit_button_text, "Sign Up");
}

#[test]
fn snapshot_with_missing_sections_defaults() {
    let path = temp_file("sparse.json", r#"{ "fields": [ { "name": "q" } ] }"#);
    let snapshot = load_snapshot(&path).unwrap();

    assert_eq!(snapshot.page.url, "");
    assert!(snapshot.form.is_none());
    assert_eq!(snapshot.fields[0], FieldDescriptor::named("q"));
}

#[test]
fn invalid_snapshot_is_an_error() {
    let path = temp_file("broken.json", "{ not json");
    assert!(matches!(
        load_snapshot(&path),
        Err(CopilotError::SnapshotParse { .. })
    ));
    assert!(matches!(
        load_snapshot("/nonexistent/page.json"),
        Err(CopilotError::Io { .. })
    ));
}

// ============================================================================
// Command Tests
// ============================================================================

#[test]
fn classify_command_prints_form_type() {
    let snapshot = load_snapshot(temp_file("classify.json", SIGNUP_SNAPSHOT)).unwrap();
    let mut ctx = default_context();

    let text = cmd_classify(&mut ctx, &snapshot, false).unwrap();
    assert!(text.starts_with("registration form (95% confidence)"), "{}", text);

    let json = cmd_classify(&mut ctx, &snapshot, true).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["form_type"], "registration form");
    assert_eq!(value["required_fields"][0], "email");
}

#[test]
fn repeated_classification_uses_cached_result() {
    let mut snapshot = load_snapshot(temp_file("cached.json", SIGNUP_SNAPSHOT)).unwrap();
    let mut ctx = default_context();

    let first = ctx.classify(&snapshot);
    // same page and form key: content changes are not seen
    snapshot.page.title = "Sign in".into();
    snapshot.fields.clear();
    let second = ctx.classify(&snapshot);
    assert_eq!(first, second);

    // a different page drops the cache
    snapshot.page.url = "https://x.com/other".into();
    let third = ctx.classify(&snapshot);
    assert_ne!(first, third);
}

#[test]
fn ask_command_answers_from_classification() {
    let snapshot = load_snapshot(temp_file("ask.json", SIGNUP_SNAPSHOT)).unwrap();
    let mut ctx = default_context();

    let answer = cmd_ask(&mut ctx, &snapshot, "What type of form is this?", false).unwrap();
    assert!(answer.contains("registration form"), "{}", answer);
    assert!(answer.contains("It has 3 fields"), "{}", answer);
}

#[test]
fn ask_json_includes_question_analysis() {
    let snapshot = load_snapshot(temp_file("ask_json.json", SIGNUP_SNAPSHOT)).unwrap();
    let mut ctx = default_context();

    let json = cmd_ask(&mut ctx, &snapshot, "Why do you need my email?", true).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["analysis"]["question_type"], "purpose");
    assert_eq!(value["analysis"]["focus_areas"][0], "purpose");
    assert!(value["answer"].as_str().is_some_and(|a| !a.is_empty()));
}

#[test]
fn fields_command_lists_purposes_and_password_tips() {
    let snapshot = load_snapshot(temp_file("fields.json", SIGNUP_SNAPSHOT)).unwrap();
    let mut ctx = default_context();

    let out = cmd_fields(&mut ctx, &snapshot).unwrap();
    assert!(out.contains("email: email"), "{}", out);
    assert!(out.contains("  This field is for your email address"), "{}", out);
    assert!(out.contains("  format: Enter a valid address"), "{}", out);
    assert!(out.contains("Create a new password to secure your account."), "{}", out);
}

#[test]
fn analyze_command_reports_privacy() {
    let snapshot = load_snapshot(temp_file("analyze.json", SIGNUP_SNAPSHOT)).unwrap();
    let mut ctx = default_context();

    let out = cmd_analyze(&mut ctx, &snapshot, false).unwrap();
    assert!(out.contains("privacy: high"), "{}", out);
    assert!(out.contains("fields: 3 (2 required)"), "{}", out);
}

#[test]
fn trace_file_records_each_new_classification() {
    let trace_path = std::env::temp_dir().join(format!(
        "form_copilot_{}_trace.jsonl",
        std::process::id()
    ));
    let _ = std::fs::remove_file(&trace_path);
    let snapshot = load_snapshot(temp_file("trace.json", SIGNUP_SNAPSHOT)).unwrap();

    let mut ctx = CommandContext::from_config(&AppConfig::default(), trace_path.to_str()).unwrap();
    cmd_classify(&mut ctx, &snapshot, false).unwrap();
    cmd_classify(&mut ctx, &snapshot, false).unwrap();

    let content = std::fs::read_to_string(&trace_path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 1, "cached result is not traced again");

    let event: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
    assert_eq!(event["form"], "signup-form");
    assert_eq!(event["form_type"], "registration form");
    assert_eq!(event["candidates"][0]["category"], "registration");
    assert_eq!(event["page"].as_str().map(str::len), Some(40));
}

#[test]
fn trace_file_records_question_type() {
    let trace_path = std::env::temp_dir().join(format!(
        "form_copilot_{}_ask_trace.jsonl",
        std::process::id()
    ));
    let _ = std::fs::remove_file(&trace_path);
    let snapshot = load_snapshot(temp_file("ask_trace.json", SIGNUP_SNAPSHOT)).unwrap();

    let mut ctx = CommandContext::from_config(&AppConfig::default(), trace_path.to_str()).unwrap();
    cmd_ask(&mut ctx, &snapshot, "Is this safe?", false).unwrap();

    let content = std::fs::read_to_string(&trace_path).unwrap();
    let question_event = content
        .lines()
        .map(|l| serde_json::from_str::<serde_json::Value>(l).unwrap())
        .find(|e| !e["question"].is_null())
        .expect("question event written");
    assert_eq!(question_event["question"], "Is this safe?");
    assert_eq!(question_event["question_type"], "security");
}
