//! Profile Store
//!
//! The accumulated field-to-answer mapping for one wizard session.
//! Merges are shallow overwrite-by-key and never rejected; the store is
//! type-agnostic by design, matching the catalog's informally typed fields.
//! Durable persistence is the caller's concern (see `storage::session`).

use std::collections::HashMap;

use tracing::debug;

use crate::models::AnswerValue;

/// Session-scoped profile accumulator
#[derive(Debug, Clone, Default)]
pub struct ProfileStore {
    fields: HashMap<String, AnswerValue>,
}

impl ProfileStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a store from a persisted field map.
    pub fn from_fields(fields: HashMap<String, AnswerValue>) -> Self {
        Self { fields }
    }

    /// Shallow merge: keys in `partial` overwrite, everything else stays.
    /// Last write wins on repeated keys.
    pub fn merge(&mut self, partial: HashMap<String, AnswerValue>) {
        if partial.is_empty() {
            return;
        }
        debug!(fields = partial.len(), "merging profile update");
        self.fields.extend(partial);
    }

    /// Set a single field, overwriting any previous answer.
    pub fn set(&mut self, field: &str, value: AnswerValue) {
        self.fields.insert(field.to_string(), value);
    }

    /// Current value of a field, if answered.
    pub fn get(&self, field: &str) -> Option<&AnswerValue> {
        self.fields.get(field)
    }

    /// Whether a field has been answered at all.
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Whether a field's answer includes the given option value
    /// (equality for scalars, membership for multi-select lists).
    pub fn includes(&self, field: &str, option_value: &str) -> bool {
        self.get(field)
            .map(|v| v.includes(option_value))
            .unwrap_or(false)
    }

    /// Numeric value of a field, if it holds one.
    pub fn number(&self, field: &str) -> Option<f64> {
        self.get(field).and_then(AnswerValue::as_number)
    }

    /// Boolean value of a field, if it holds one.
    pub fn bool(&self, field: &str) -> Option<bool> {
        self.get(field).and_then(AnswerValue::as_bool)
    }

    /// Clear everything; used on "start over" and after completion hand-off.
    pub fn reset(&mut self) {
        self.fields.clear();
    }

    /// Number of answered fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether no field has been answered yet.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Borrow the raw field map (snapshots, scoring).
    pub fn fields(&self) -> &HashMap<String, AnswerValue> {
        &self.fields
    }

    /// Clone the raw field map for a snapshot.
    pub fn to_fields(&self) -> HashMap<String, AnswerValue> {
        self.fields.clone()
    }
}

/// Toggle helper for multi-select fields: the caller computes the full new
/// list and merges it back, the store only ever replaces by key.
pub fn toggled(current: Option<&AnswerValue>, option_value: &str) -> Vec<String> {
    let mut items: Vec<String> = current
        .and_then(AnswerValue::as_list)
        .map(|l| l.to_vec())
        .unwrap_or_default();
    if let Some(pos) = items.iter().position(|v| v == option_value) {
        items.remove(pos);
    } else {
        items.push(option_value.to_string());
    }
    items
}

#[cfg(test)]
mod tests {
    use super::*;

    fn update(field: &str, value: AnswerValue) -> HashMap<String, AnswerValue> {
        let mut map = HashMap::new();
        map.insert(field.to_string(), value);
        map
    }

    #[test]
    fn test_empty_merge_is_noop() {
        let mut store = ProfileStore::new();
        store.set("a", AnswerValue::from("1"));
        let before = store.to_fields();
        store.merge(HashMap::new());
        assert_eq!(store.to_fields(), before);
    }

    #[test]
    fn test_last_write_wins() {
        let mut store = ProfileStore::new();
        store.merge(update("a", AnswerValue::from(1.0)));
        store.merge(update("a", AnswerValue::from(2.0)));
        assert_eq!(store.number("a"), Some(2.0));
    }

    #[test]
    fn test_merge_keeps_untouched_keys() {
        let mut store = ProfileStore::new();
        store.merge(update("a", AnswerValue::from("x")));
        store.merge(update("b", AnswerValue::from("y")));
        assert_eq!(store.get("a"), Some(&AnswerValue::from("x")));
        assert_eq!(store.get("b"), Some(&AnswerValue::from("y")));
    }

    #[test]
    fn test_merge_never_rejects_unexpected_shapes() {
        let mut store = ProfileStore::new();
        store.merge(update("slider_field", AnswerValue::from("not a number")));
        assert!(store.contains("slider_field"));
    }

    #[test]
    fn test_reset_clears() {
        let mut store = ProfileStore::new();
        store.set("a", AnswerValue::from("1"));
        store.reset();
        assert!(store.is_empty());
    }

    #[test]
    fn test_toggle_adds_and_removes() {
        let first = toggled(None, "classes");
        assert_eq!(first, vec!["classes".to_string()]);

        let current = AnswerValue::from(first);
        let second = toggled(Some(&current), "services");
        assert_eq!(second, vec!["classes".to_string(), "services".to_string()]);

        let current = AnswerValue::from(second);
        let third = toggled(Some(&current), "classes");
        assert_eq!(third, vec!["services".to_string()]);
    }
}
