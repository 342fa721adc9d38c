//! Question Catalog Models
//!
//! Immutable, language-parameterized question banks: blocks of typed
//! questions with optional conditional visibility predicates. Pure data;
//! the navigator and catalog services supply all behavior.

use serde::{Deserialize, Serialize};

use super::answer::AnswerValue;

/// Supported catalog languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Es,
}

/// Catalog flavor a session commits to at start
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CatalogMode {
    /// Conversational flow with agent messages per block
    #[default]
    Fused,
    /// Classic step wizard with the quick/detailed bifurcation
    Wizard,
}

/// How a question expects to be answered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AnswerType {
    SingleChoice,
    MultipleChoice,
    Slider,
    Text,
    YesNo,
}

/// One selectable option of a choice question
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChoiceOption {
    /// Unique id within the question
    pub id: String,
    /// Display label
    pub label: String,
    /// Value written into the profile when selected
    pub value: String,
    /// Optional one-line elaboration shown under the label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ChoiceOption {
    pub fn new(id: &str, label: &str, value: &str) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            value: value.to_string(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }
}

/// Bounded numeric range for slider questions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SliderRange {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

/// Comparison operator of a visibility predicate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VisibilityOp {
    Equals,
    NotEquals,
    Includes,
    GreaterThan,
    LessThan,
    Exists,
    NotExists,
}

/// Conditional visibility predicate referencing another profile field.
///
/// A question carrying a rule is hidden until the rule holds against the
/// live profile. Absent fields satisfy only `NotExists`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisibilityRule {
    /// Profile field the predicate inspects
    pub field: String,
    /// Comparison operator
    pub op: VisibilityOp,
    /// Comparison operand; unused for Exists/NotExists
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<AnswerValue>,
}

impl VisibilityRule {
    /// Evaluate the predicate against a field's current value, if any.
    pub fn holds(&self, current: Option<&AnswerValue>) -> bool {
        match self.op {
            VisibilityOp::Exists => current.is_some(),
            VisibilityOp::NotExists => current.is_none(),
            VisibilityOp::Equals => match (current, &self.value) {
                (Some(actual), Some(expected)) => actual == expected,
                _ => false,
            },
            VisibilityOp::NotEquals => match (current, &self.value) {
                (Some(actual), Some(expected)) => actual != expected,
                _ => false,
            },
            VisibilityOp::Includes => match (current, &self.value) {
                (Some(actual), Some(expected)) => expected
                    .as_text()
                    .map(|needle| actual.includes(needle))
                    .unwrap_or(false),
                _ => false,
            },
            VisibilityOp::GreaterThan => Self::compare(current, &self.value, |a, b| a > b),
            VisibilityOp::LessThan => Self::compare(current, &self.value, |a, b| a < b),
        }
    }

    fn compare(
        current: Option<&AnswerValue>,
        expected: &Option<AnswerValue>,
        cmp: fn(f64, f64) -> bool,
    ) -> bool {
        match (current.and_then(AnswerValue::as_number), expected) {
            (Some(actual), Some(bound)) => bound
                .as_number()
                .map(|bound| cmp(actual, bound))
                .unwrap_or(false),
            _ => false,
        }
    }
}

/// A single question of a block
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    /// Unique id within the catalog
    pub id: String,
    /// Prompt text shown to the user
    pub prompt: String,
    /// Expected answer shape
    pub answer_type: AnswerType,
    /// Profile field this question writes
    pub field_name: String,
    /// Options for choice questions
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<ChoiceOption>,
    /// Range for slider questions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<SliderRange>,
    /// Whether an answer is required before advancing
    #[serde(default)]
    pub required: bool,
    /// Optional visibility predicate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visible_when: Option<VisibilityRule>,
}

impl Question {
    /// Build a bare question; options, range, and rules via the builders.
    pub fn new(id: &str, prompt: &str, answer_type: AnswerType, field_name: &str) -> Self {
        Self {
            id: id.to_string(),
            prompt: prompt.to_string(),
            answer_type,
            field_name: field_name.to_string(),
            options: Vec::new(),
            range: None,
            required: false,
            visible_when: None,
        }
    }

    pub fn with_options(mut self, options: Vec<ChoiceOption>) -> Self {
        self.options = options;
        self
    }

    pub fn with_range(mut self, min: f64, max: f64, step: f64) -> Self {
        self.range = Some(SliderRange { min, max, step });
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn visible_when(mut self, rule: VisibilityRule) -> Self {
        self.visible_when = Some(rule);
        self
    }
}

/// An ordered group of questions presented together
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Block {
    /// Unique id within the catalog
    pub id: String,
    /// Display title
    pub title: String,
    /// Conversational lead-in shown before the questions (fused mode)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_message: Option<String>,
    /// Ordered questions
    pub questions: Vec<Question>,
}

impl Block {
    pub fn new(id: &str, title: &str, questions: Vec<Question>) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            agent_message: None,
            questions,
        }
    }

    pub fn with_agent_message(mut self, message: &str) -> Self {
        self.agent_message = Some(message.to_string());
        self
    }

    /// Find a question by id.
    pub fn question(&self, question_id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == question_id)
    }
}

/// A conditional jump consulted by the navigator in place of a simple
/// block increment: after `after_block`, when `field` holds `value`, the
/// flow continues at `goto_block`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BranchRule {
    pub after_block: String,
    pub field: String,
    pub value: String,
    pub goto_block: String,
}

/// An ordered sequence of blocks, committed to one language and mode
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
    pub language: Language,
    pub mode: CatalogMode,
    pub blocks: Vec<Block>,
    /// Branch points, consulted by block id + branching field value
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub branch_rules: Vec<BranchRule>,
}

impl Catalog {
    /// Find a block by id.
    pub fn block(&self, block_id: &str) -> Option<&Block> {
        self.blocks.iter().find(|b| b.id == block_id)
    }

    /// Index of a block by id.
    pub fn block_index(&self, block_id: &str) -> Option<usize> {
        self.blocks.iter().position(|b| b.id == block_id)
    }

    /// The branch target after `block_id` given the branching field's
    /// current value, if a rule matches.
    pub fn branch_target(&self, block_id: &str, field_value: &str) -> Option<&str> {
        self.branch_rules
            .iter()
            .find(|r| r.after_block == block_id && r.value == field_value)
            .map(|r| r.goto_block.as_str())
    }
}
