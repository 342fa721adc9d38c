//! Agent Models
//!
//! Static descriptors for the specialist support agents the
//! recommendation engine draws from.

use serde::{Deserialize, Serialize};

/// Functional grouping of an agent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentCategory {
    Financial,
    Legal,
    Diagnostic,
    Commercial,
    Operations,
    Community,
}

/// Registry priority of an agent
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AgentPriority {
    VeryLow,
    Low,
    Medium,
    MediumHigh,
    High,
}

/// One specialist agent descriptor in the static registry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentDescriptor {
    /// Stable id, e.g. "cost-calculator"
    pub id: String,
    /// Short registry code, e.g. "A01"
    pub code: String,
    /// Display name
    pub name: String,
    pub category: AgentCategory,
    /// Expected impact, 1 (low) to 4 (high)
    pub impact: u8,
    pub priority: AgentPriority,
    /// Industry values (profile field `industry`) this agent applies to;
    /// empty means generally applicable
    #[serde(default)]
    pub industries: Vec<String>,
}

impl AgentDescriptor {
    /// Whether this agent is flagged applicable to the given industry.
    pub fn applies_to_industry(&self, industry: &str) -> bool {
        self.industries.iter().any(|i| i == industry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_ordering() {
        assert!(AgentPriority::High > AgentPriority::MediumHigh);
        assert!(AgentPriority::MediumHigh > AgentPriority::Medium);
        assert!(AgentPriority::VeryLow < AgentPriority::Low);
    }
}
