//! Field-level validity collected into one save gate.

use std::collections::BTreeMap;
use std::fmt;

/// Called with the new aggregate after every change.
pub type ValidityListener = Box<dyn Fn(bool) + Send + Sync>;

/// Per-field validity of the open test, ANDed into one flag.
///
/// A field that never reported is absent, not invalid: with no reports at all
/// the aggregate is `true`.
#[derive(Default)]
pub struct ValidationAggregator {
    fields: BTreeMap<String, bool>,
    listener: Option<ValidityListener>,
}

impl ValidationAggregator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_listener(listener: impl Fn(bool) + Send + Sync + 'static) -> Self {
        Self {
            fields: BTreeMap::new(),
            listener: Some(Box::new(listener)),
        }
    }

    /// Upsert one field and return the new aggregate.
    pub fn set_validation_status_for_field(
        &mut self,
        field: impl Into<String>,
        is_valid: bool,
    ) -> bool {
        self.fields.insert(field.into(), is_valid);
        self.notify()
    }

    /// Forget every report, as when the editors of a new test mount.
    pub fn reset(&mut self) {
        self.fields.clear();
        self.notify();
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.fields.values().all(|valid| *valid)
    }

    #[must_use]
    pub fn status(&self, field: &str) -> Option<bool> {
        self.fields.get(field).copied()
    }

    /// Fields currently reported invalid, in name order.
    #[must_use]
    pub fn invalid_fields(&self) -> Vec<String> {
        self.fields
            .iter()
            .filter(|(_, valid)| !**valid)
            .map(|(field, _)| field.clone())
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    fn notify(&self) -> bool {
        let valid = self.is_valid();
        if let Some(listener) = &self.listener {
            listener(valid);
        }
        valid
    }
}

impl fmt::Debug for ValidationAggregator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidationAggregator")
            .field("fields", &self.fields)
            .field("has_listener", &self.listener.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    #[test]
    fn no_reports_means_valid() {
        let validation = ValidationAggregator::new();
        assert!(validation.is_valid());
        assert!(validation.is_empty());
        assert!(validation.invalid_fields().is_empty());
    }

    #[test]
    fn single_invalid_field_fails_the_aggregate() {
        let mut validation = ValidationAggregator::new();
        assert!(validation.set_validation_status_for_field("name", true));
        assert!(!validation.set_validation_status_for_field("variants.control.heading", false));
        assert!(!validation.is_valid());
        assert_eq!(validation.invalid_fields(), vec!["variants.control.heading"]);

        // upsert, not append
        assert!(validation.set_validation_status_for_field("variants.control.heading", true));
        assert_eq!(validation.len(), 2);
        assert_eq!(validation.status("variants.control.heading"), Some(true));
    }

    #[test]
    fn listener_sees_every_change() {
        let calls = Arc::new(AtomicUsize::new(0));
        let last = Arc::new(AtomicBool::new(true));
        let mut validation = {
            let calls = Arc::clone(&calls);
            let last = Arc::clone(&last);
            ValidationAggregator::with_listener(move |valid| {
                calls.fetch_add(1, Ordering::SeqCst);
                last.store(valid, Ordering::SeqCst);
            })
        };

        validation.set_validation_status_for_field("heading", false);
        assert!(!last.load(Ordering::SeqCst));

        validation.reset();
        assert!(last.load(Ordering::SeqCst));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(validation.status("heading"), None);
    }
}
