//! Persistent logger context
//!
//! This module provides:
//! - `BindingContext`: bindings, private values and the privacy prefix
//! - `BindingStore`: shared, lock-guarded handle to one `BindingContext`

use super::field_value::FieldValue;
use super::fields::Fields;
use super::error::Result;
use super::privacy::{classify, validate_privacy_prefix, Classification, DEFAULT_PRIVACY_PREFIX};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

/// State carried from one log call to the next
#[derive(Debug, Clone, PartialEq)]
pub struct BindingContext {
    bindings: HashMap<String, FieldValue>,
    private_values: Vec<FieldValue>,
    privacy_prefix: String,
}

impl BindingContext {
    pub fn new() -> Self {
        Self::with_prefix(DEFAULT_PRIVACY_PREFIX)
    }

    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            bindings: HashMap::new(),
            private_values: Vec::new(),
            privacy_prefix: prefix.into(),
        }
    }

    /// Classify and store each field: private values are appended to the
    /// private list, ordinary ones upserted into the bindings.
    pub fn bind(&mut self, fields: Fields) {
        for (key, value) in fields {
            match classify(&key, &self.privacy_prefix) {
                Classification::Private => self.private_values.push(value),
                Classification::Ordinary => {
                    self.bindings.insert(key, value);
                }
            }
        }
    }

    /// Split per-call fields: private values are appended permanently, the
    /// ordinary ones are handed back for the current record only.
    pub fn absorb_call_fields(&mut self, fields: Fields) -> Vec<(String, FieldValue)> {
        let mut ordinary = Vec::with_capacity(fields.len());
        for (key, value) in fields {
            match classify(&key, &self.privacy_prefix) {
                Classification::Private => self.private_values.push(value),
                Classification::Ordinary => ordinary.push((key, value)),
            }
        }
        ordinary
    }

    /// Empty bindings and private values together
    pub fn clear(&mut self) {
        self.bindings.clear();
        self.private_values.clear();
    }

    pub fn bindings(&self) -> &HashMap<String, FieldValue> {
        &self.bindings
    }

    pub fn private_values(&self) -> &[FieldValue] {
        &self.private_values
    }

    pub fn privacy_prefix(&self) -> &str {
        &self.privacy_prefix
    }

    /// Change the prefix; already stored values keep their classification
    ///
    /// The prefix is trimmed; an empty one is rejected and the old one kept.
    pub fn set_privacy_prefix(&mut self, prefix: &str) -> Result<()> {
        self.privacy_prefix = validate_privacy_prefix(prefix)?;
        Ok(())
    }
}

impl Default for BindingContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Thread-safe handle to a [`BindingContext`]
///
/// Every read and write goes through one mutex so a `clear()` can never be
/// observed half done and concurrent binds never lose updates.
///
/// # Example
///
/// ```
/// use chronicle_logger::core::{BindingStore, Fields};
///
/// let store = BindingStore::new();
/// store.bind(Fields::new().with_field("service", "api").with_field("private", "token"));
///
/// assert_eq!(store.snapshot().len(), 1);
/// assert_eq!(store.private_values().len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct BindingStore {
    context: Arc<Mutex<BindingContext>>,
}

impl BindingStore {
    pub fn new() -> Self {
        Self::from_context(BindingContext::new())
    }

    pub fn from_context(context: BindingContext) -> Self {
        Self {
            context: Arc::new(Mutex::new(context)),
        }
    }

    pub fn bind(&self, fields: Fields) {
        self.context.lock().bind(fields);
    }

    pub fn clear(&self) {
        self.context.lock().clear();
    }

    /// Copy of the current bindings
    pub fn snapshot(&self) -> HashMap<String, FieldValue> {
        self.context.lock().bindings.clone()
    }

    /// Copy of the collected private values, in call order
    pub fn private_values(&self) -> Vec<FieldValue> {
        self.context.lock().private_values.clone()
    }

    pub fn privacy_prefix(&self) -> String {
        self.context.lock().privacy_prefix.clone()
    }

    pub fn set_privacy_prefix(&self, prefix: &str) -> Result<()> {
        self.context.lock().set_privacy_prefix(prefix)
    }

    pub fn len(&self) -> usize {
        self.context.lock().bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        let context = self.context.lock();
        context.bindings.is_empty() && context.private_values.is_empty()
    }

    /// Run `f` with exclusive access to the context
    pub(crate) fn with_context<R>(&self, f: impl FnOnce(&mut BindingContext) -> R) -> R {
        let mut context = self.context.lock();
        f(&mut context)
    }
}
