//! Choice Catalog Validation
//!
//! Defends against malformed choice questions: empty option sets, duplicate
//! labels, and option labels that pattern-match generation artifacts
//! accidentally inserted into the catalog. A failing question is demoted to
//! free text for rendering; the session never fails over one bad question.

use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;
use tracing::warn;

use crate::models::{AnswerType, Question};

/// Compiled artifact patterns (initialized once).
fn forbidden_label_patterns() -> &'static Vec<Regex> {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        [
            // Generator self-references leaking into option text
            r"(?i)\b(I'm|I am|as an AI|AI language model)\b",
            // Unfilled placeholders
            r"(?i)\[(PLACEHOLDER|TODO|INSERT)\]",
            // Unresolved template variables
            r"\{\{.*?\}\}",
            // Markup that must never reach a renderer as a label
            r"(?is)<script.*?>",
            r"(?i)javascript:",
        ]
        .iter()
        .filter_map(|p| Regex::new(p).ok())
        .collect()
    })
}

/// Whether a single option label matches any forbidden pattern.
pub fn label_is_forbidden(label: &str) -> bool {
    forbidden_label_patterns().iter().any(|p| p.is_match(label))
}

/// Whether a choice question's option set is renderable as a choice:
/// non-empty, duplicate-free labels, no artifact labels.
///
/// Non-choice questions are trivially valid.
pub fn choice_options_valid(question: &Question) -> bool {
    if !matches!(
        question.answer_type,
        AnswerType::SingleChoice | AnswerType::MultipleChoice
    ) {
        return true;
    }

    if question.options.is_empty() {
        return false;
    }

    let mut seen = HashSet::new();
    for option in &question.options {
        if !seen.insert(option.label.as_str()) {
            return false;
        }
        if label_is_forbidden(&option.label) {
            return false;
        }
    }
    true
}

/// The answer type the renderer should use: the declared type, or free
/// text when a choice question's option set is malformed.
pub fn effective_answer_type(question: &Question) -> AnswerType {
    if choice_options_valid(question) {
        question.answer_type
    } else {
        warn!(
            question_id = %question.id,
            "malformed choice options, falling back to free text"
        );
        AnswerType::Text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ChoiceOption;

    fn choice_question(options: Vec<ChoiceOption>) -> Question {
        Question::new("q1", "Pick one", AnswerType::SingleChoice, "field").with_options(options)
    }

    #[test]
    fn test_empty_option_set_is_invalid() {
        let q = choice_question(vec![]);
        assert!(!choice_options_valid(&q));
        assert_eq!(effective_answer_type(&q), AnswerType::Text);
    }

    #[test]
    fn test_duplicate_labels_are_invalid() {
        let q = choice_question(vec![
            ChoiceOption::new("a", "Yes", "a"),
            ChoiceOption::new("b", "Yes", "b"),
        ]);
        assert!(!choice_options_valid(&q));
    }

    #[test]
    fn test_artifact_labels_are_invalid() {
        for label in [
            "As an AI language model I cannot answer",
            "[PLACEHOLDER]",
            "{{option_label}}",
        ] {
            let q = choice_question(vec![ChoiceOption::new("a", label, "a")]);
            assert!(!choice_options_valid(&q), "label should fail: {label}");
        }
    }

    #[test]
    fn test_clean_options_are_valid() {
        let q = choice_question(vec![
            ChoiceOption::new("yes", "Yes", "yes"),
            ChoiceOption::new("no", "No", "no"),
        ]);
        assert!(choice_options_valid(&q));
        assert_eq!(effective_answer_type(&q), AnswerType::SingleChoice);
    }

    #[test]
    fn test_non_choice_questions_are_trivially_valid() {
        let q = Question::new("q2", "Describe", AnswerType::Text, "description");
        assert!(choice_options_valid(&q));
    }
}
