//! Recommendation Models
//!
//! The recommendation result handed to the display and persistence layers:
//! tiered agent ids, legacy boolean flags, and personalized follow-up tasks.

use serde::{Deserialize, Serialize};

/// Priority tag of a personalized task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    High,
    Medium,
    Low,
}

/// A personalized follow-up task generated from profile gaps
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonalizedTask {
    /// Stable rule id, e.g. "first-sale"
    pub id: String,
    pub title: String,
    pub description: String,
    pub priority: TaskPriority,
    /// Category label, e.g. "validation", "market-fit"
    pub category: String,
    /// Human-readable effort estimate, e.g. "1-2 weeks"
    pub estimated_time: String,
}

/// Legacy boolean flags kept for backward-compatible consumers.
///
/// Derived from tier membership; admin and cultural are always set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacyAgentFlags {
    pub admin: bool,
    pub accounting: bool,
    pub legal: bool,
    pub operations: bool,
    pub cultural: bool,
}

/// The full recommendation produced at session completion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    /// Highest-priority agent ids, in promotion order
    pub primary: Vec<String>,
    /// Supporting agent ids, capped
    pub secondary: Vec<String>,
    /// Backward-compatible category flags
    pub legacy: LegacyAgentFlags,
    /// Personalized follow-up tasks, capped at five
    pub tasks: Vec<PersonalizedTask>,
}

impl Recommendation {
    /// Whether an agent id appears in either tier.
    pub fn includes_agent(&self, agent_id: &str) -> bool {
        self.primary.iter().any(|id| id == agent_id)
            || self.secondary.iter().any(|id| id == agent_id)
    }
}
