//! Answer Values
//!
//! The value shapes a profile field can hold. The store is deliberately
//! tolerant: any question may write any shape, matching the informally
//! typed field names declared in the catalog.

use serde::{Deserialize, Serialize};

/// A single answer value stored in the profile.
///
/// Serialized untagged so snapshots read as plain JSON scalars and arrays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    /// Yes/no answers
    Bool(bool),
    /// Slider answers
    Number(f64),
    /// Free text and single-choice option values
    Text(String),
    /// Multi-select option values
    List(Vec<String>),
}

impl AnswerValue {
    /// The text form, if this is a text answer.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// The numeric form, if this is a number answer.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// The boolean form, if this is a yes/no answer.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// The list form, if this is a multi-select answer.
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Whether this answer contains the given option value.
    ///
    /// A text answer matches on equality, a list answer on membership.
    /// Lets scoring and recommendation rules treat single-choice and
    /// multi-select renditions of the same field uniformly.
    pub fn includes(&self, option_value: &str) -> bool {
        match self {
            Self::Text(s) => s == option_value,
            Self::List(items) => items.iter().any(|v| v == option_value),
            _ => false,
        }
    }

    /// Whether this answer is an empty text or empty list.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(s) => s.is_empty(),
            Self::List(items) => items.is_empty(),
            _ => false,
        }
    }

    /// Number of selected options for list answers, 1 otherwise.
    pub fn selection_count(&self) -> usize {
        match self {
            Self::List(items) => items.len(),
            _ => 1,
        }
    }
}

impl From<&str> for AnswerValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for AnswerValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<bool> for AnswerValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<f64> for AnswerValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<Vec<String>> for AnswerValue {
    fn from(items: Vec<String>) -> Self {
        Self::List(items)
    }
}

impl From<Vec<&str>> for AnswerValue {
    fn from(items: Vec<&str>) -> Self {
        Self::List(items.into_iter().map(String::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_includes_matches_text_and_list() {
        let text = AnswerValue::from("billing-system");
        assert!(text.includes("billing-system"));
        assert!(!text.includes("cash"));

        let list = AnswerValue::from(vec!["cash", "billing-system"]);
        assert!(list.includes("billing-system"));
        assert!(!list.includes("digital-platforms"));
    }

    #[test]
    fn test_untagged_serialization() {
        let value = AnswerValue::from(vec!["classes", "services"]);
        let json = serde_json::to_string(&value).unwrap();
        assert_eq!(json, r#"["classes","services"]"#);

        let back: AnswerValue = serde_json::from_str(&json).unwrap();
        assert_eq!(back, value);
    }

    #[test]
    fn test_selection_count() {
        assert_eq!(AnswerValue::from(vec!["a", "b"]).selection_count(), 2);
        assert_eq!(AnswerValue::from("a").selection_count(), 1);
    }
}
