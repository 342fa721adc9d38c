//! Agent Registry
//!
//! The static registry of the nineteen specialist agents and its lookup
//! helpers. Registry order is stable and meaningful: the recommendation
//! engine uses it to break ties deterministically.

use std::sync::OnceLock;

use crate::models::{AgentCategory, AgentDescriptor, AgentPriority};

fn agent(
    id: &str,
    code: &str,
    name: &str,
    category: AgentCategory,
    impact: u8,
    priority: AgentPriority,
    industries: &[&str],
) -> AgentDescriptor {
    AgentDescriptor {
        id: id.to_string(),
        code: code.to_string(),
        name: name.to_string(),
        category,
        impact,
        priority,
        industries: industries.iter().map(|i| i.to_string()).collect(),
    }
}

/// The full registry, in stable order.
pub fn registry() -> &'static Vec<AgentDescriptor> {
    static REGISTRY: OnceLock<Vec<AgentDescriptor>> = OnceLock::new();
    REGISTRY.get_or_init(|| {
        use AgentCategory::*;
        use AgentPriority::*;
        vec![
            agent(
                "master-coordinator",
                "M01",
                "Master Coordinator",
                Diagnostic,
                4,
                High,
                &["creative", "services", "retail", "tech", "education"],
            ),
            agent(
                "cost-calculator",
                "A01",
                "Cost & Profitability Calculator",
                Financial,
                4,
                High,
                &["creative", "retail"],
            ),
            agent(
                "collaboration-agreement",
                "A02",
                "Collaboration & Rights Agreement",
                Legal,
                4,
                High,
                &["creative", "services"],
            ),
            agent(
                "maturity-evaluator",
                "A03",
                "Business Maturity Evaluator",
                Diagnostic,
                3,
                Medium,
                &["creative", "services", "retail", "tech", "education"],
            ),
            agent(
                "cultural-consultant",
                "A04",
                "Creative Specialist",
                Operations,
                3,
                High,
                &["creative", "education"],
            ),
            agent(
                "project-manager",
                "A05",
                "Project Manager",
                Operations,
                3,
                Medium,
                &["creative", "services", "tech"],
            ),
            agent(
                "marketing-advisor",
                "A06",
                "Marketing Advisor",
                Commercial,
                3,
                Medium,
                &["creative", "retail", "services"],
            ),
            agent(
                "export-advisor",
                "A07",
                "Export & International Payments",
                Legal,
                4,
                MediumHigh,
                &["creative", "retail"],
            ),
            agent(
                "collaboration-pitch",
                "A08",
                "Collaboration Pitch Builder",
                Commercial,
                2,
                Low,
                &[],
            ),
            agent(
                "portfolio-catalog",
                "A09",
                "Portfolio & Product Catalog",
                Commercial,
                3,
                Low,
                &["creative", "retail"],
            ),
            agent(
                "artwork-description",
                "A10",
                "Optimized Work Descriptions",
                Commercial,
                2,
                VeryLow,
                &[],
            ),
            agent(
                "income-calculator",
                "A11",
                "Income & Expense Tracker",
                Financial,
                3,
                Low,
                &[],
            ),
            agent(
                "branding-strategy",
                "A12",
                "Branding & Exposure Strategy",
                Commercial,
                3,
                Low,
                &[],
            ),
            agent(
                "personal-brand-eval",
                "A13",
                "Personal Brand Evaluation",
                Diagnostic,
                2,
                VeryLow,
                &[],
            ),
            agent(
                "funding-routes",
                "A14",
                "Funding Routes & Open Calls",
                Legal,
                3,
                Medium,
                &[],
            ),
            agent(
                "contract-generator",
                "A15",
                "General Contract Generator",
                Legal,
                4,
                Medium,
                &[],
            ),
            agent(
                "tax-compliance",
                "A16",
                "Tax & Compliance Assistant",
                Legal,
                4,
                Medium,
                &[],
            ),
            agent(
                "social-impact-eval",
                "A17",
                "Social Media Impact Evaluator",
                Commercial,
                2,
                Low,
                &[],
            ),
            agent(
                "pricing-assistant",
                "A18",
                "Channel Pricing Assistant",
                Commercial,
                4,
                Medium,
                &[],
            ),
            agent(
                "stakeholder-matching",
                "A19",
                "Creative Stakeholder Matching",
                Community,
                4,
                High,
                &["creative", "services", "education"],
            ),
        ]
    })
}

/// Look up an agent by id.
pub fn by_id(id: &str) -> Option<&'static AgentDescriptor> {
    registry().iter().find(|a| a.id == id)
}

/// Agents in a category, in registry order.
pub fn by_category(category: AgentCategory) -> Vec<&'static AgentDescriptor> {
    registry().iter().filter(|a| a.category == category).collect()
}

/// Agents at exactly the given priority, in registry order.
pub fn by_priority(priority: AgentPriority) -> Vec<&'static AgentDescriptor> {
    registry().iter().filter(|a| a.priority == priority).collect()
}

/// All registered agent ids, in registry order.
pub fn all_ids() -> Vec<&'static str> {
    registry().iter().map(|a| a.id.as_str()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_has_nineteen_unique_agents() {
        let ids = all_ids();
        assert_eq!(ids.len(), 19);
        let unique: std::collections::HashSet<_> = ids.iter().collect();
        assert_eq!(unique.len(), 19);
    }

    #[test]
    fn test_high_priority_set() {
        let high: Vec<&str> = by_priority(AgentPriority::High)
            .iter()
            .map(|a| a.id.as_str())
            .collect();
        assert_eq!(
            high,
            vec![
                "master-coordinator",
                "cost-calculator",
                "collaboration-agreement",
                "cultural-consultant",
                "stakeholder-matching"
            ]
        );
    }

    #[test]
    fn test_lookup_by_id() {
        let found = by_id("pricing-assistant").unwrap();
        assert_eq!(found.code, "A18");
        assert_eq!(found.category, AgentCategory::Commercial);
        assert!(by_id("no-such-agent").is_none());
    }

    #[test]
    fn test_impact_within_bounds() {
        for descriptor in registry() {
            assert!((1..=4).contains(&descriptor.impact), "{}", descriptor.id);
        }
    }
}
