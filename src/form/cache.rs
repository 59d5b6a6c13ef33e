use std::collections::HashMap;

use tracing::debug;

use crate::form::form_model::{ClassificationResult, FormAttributes};

/// Identity of a form within one page.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FormKey {
    Named(String),
    /// Sentinel for inputs gathered without an enclosing `<form>` id/name.
    AutoDetected,
}

impl FormKey {
    /// Form id, else form name, else the auto-detected sentinel.
    pub fn from_attributes(form: Option<&FormAttributes>) -> Self {
        form.and_then(|f| {
            [&f.id, &f.name]
                .into_iter()
                .map(|s| s.trim())
                .find(|s| !s.is_empty())
                .map(|s| FormKey::Named(s.to_string()))
        })
        .unwrap_or(FormKey::AutoDetected)
    }
}

pub fn page_fingerprint(url: &str) -> String {
    use sha1::{Digest, Sha1};

    let mut hasher = Sha1::new();
    hasher.update(url.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Page-scoped cache of classification results.
///
/// Entries are never invalidated by content changes; moving to another page
/// drops them all.
#[derive(Debug, Default)]
pub struct ClassificationCache {
    page: Option<String>,
    entries: HashMap<FormKey, ClassificationResult>,
}

impl ClassificationCache {
    pub fn for_page(url: &str) -> Self {
        Self {
            page: Some(page_fingerprint(url)),
            entries: HashMap::new(),
        }
    }

    /// Rebind to `url`, clearing entries if it is a different page.
    pub fn enter_page(&mut self, url: &str) {
        let fingerprint = page_fingerprint(url);
        if self.page.as_deref() != Some(fingerprint.as_str()) {
            debug!(url, dropped = self.entries.len(), "page changed, clearing cache");
            self.entries.clear();
            self.page = Some(fingerprint);
        }
    }

    pub fn get(&self, key: &FormKey) -> Option<&ClassificationResult> {
        self.entries.get(key)
    }

    pub fn insert(&mut self, key: FormKey, result: ClassificationResult) {
        self.entries.insert(key, result);
    }

    /// Cached result for `key`, computing and storing it on first use.
    pub fn get_or_insert_with<F>(&mut self, key: FormKey, classify: F) -> &ClassificationResult
    where
        F: FnOnce() -> ClassificationResult,
    {
        self.entries.entry(key).or_insert_with(classify)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
