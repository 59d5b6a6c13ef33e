use std::cell::Cell;

use form_copilot::form::cache::{ClassificationCache, FormKey, page_fingerprint};
use form_copilot::form::form_model::{ClassificationResult, FormAttributes};

fn attrs(id: &str, name: &str) -> FormAttributes {
    FormAttributes {
        id: id.into(),
        name: name.into(),
        ..Default::default()
    }
}

// ============================================================================
// FormKey
// ============================================================================

#[test]
fn form_key_prefers_id_then_name() {
    assert_eq!(
        FormKey::from_attributes(Some(&attrs("signup", "register"))),
        FormKey::Named("signup".into())
    );
    assert_eq!(
        FormKey::from_attributes(Some(&attrs("  ", "register"))),
        FormKey::Named("register".into())
    );
}

#[test]
fn form_key_falls_back_to_sentinel() {
    assert_eq!(FormKey::from_attributes(None), FormKey::AutoDetected);
    assert_eq!(FormKey::from_attributes(Some(&attrs("", ""))), FormKey::AutoDetected);
}

// ============================================================================
// ClassificationCache
// ============================================================================

#[test]
fn get_or_insert_with_classifies_once_per_key() {
    let calls = Cell::new(0);
    let mut cache = ClassificationCache::for_page("https://x.com/signup");
    let classify = || {
        calls.set(calls.get() + 1);
        ClassificationResult::unknown()
    };

    cache.get_or_insert_with(FormKey::AutoDetected, classify);
    cache.get_or_insert_with(FormKey::AutoDetected, classify);
    cache.get_or_insert_with(FormKey::Named("other".into()), classify);

    assert_eq!(calls.get(), 2);
    assert_eq!(cache.len(), 2);
}

#[test]
fn entries_survive_until_page_changes() {
    let mut cache = ClassificationCache::for_page("https://x.com/a");
    cache.insert(FormKey::AutoDetected, ClassificationResult::unknown());

    cache.enter_page("https://x.com/a");
    assert!(cache.get(&FormKey::AutoDetected).is_some());

    cache.enter_page("https://x.com/b");
    assert!(cache.is_empty());
}

#[test]
fn insert_replaces_existing_entry() {
    let mut cache = ClassificationCache::default();
    let mut updated = ClassificationResult::unknown();
    updated.form_type = "login form".into();

    cache.insert(FormKey::AutoDetected, ClassificationResult::unknown());
    cache.insert(FormKey::AutoDetected, updated.clone());

    assert_eq!(cache.len(), 1);
    assert_eq!(cache.get(&FormKey::AutoDetected), Some(&updated));
}

#[test]
fn fingerprint_is_stable_sha1_hex() {
    let a = page_fingerprint("https://x.com/signup");
    assert_eq!(a.len(), 40);
    assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
    assert_eq!(a, page_fingerprint("https://x.com/signup"));
    assert_ne!(a, page_fingerprint("https://x.com/login"));
}
