//! Recommendation Engine
//!
//! Pure derivation from scores + profile to tiered agent recommendations,
//! legacy flags, and personalized tasks. Determinism is the contract: ties
//! break on registry order, the task rule order is fixed, and the task list
//! truncates at the cap without re-sorting.

use tracing::debug;

use crate::models::{
    AgentPriority, CategoryScores, LegacyAgentFlags, PersonalizedTask, Recommendation,
    ScoreCategory, TaskPriority,
};
use crate::services::agents;
use crate::services::profile::ProfileStore;

/// Category scores below this are treated as needing help.
const NEED_THRESHOLD: u32 = 60;
/// At most this many need-based agents join the primary tier.
const NEED_PROMOTIONS: usize = 2;
/// At most this many industry-matched agents join the secondary tier.
const INDUSTRY_CAP: usize = 3;
/// At most this many medium-priority agents pad the secondary tier.
const PADDING_CAP: usize = 4;
/// At most this many personalized tasks are emitted.
const TASK_CAP: usize = 5;

/// The fixed category-linked need list: agent id and the category whose
/// total measures how much the user needs it. Listed in registry order so
/// equal scores promote deterministically.
const NEED_AGENTS: [(&str, ScoreCategory); 5] = [
    ("maturity-evaluator", ScoreCategory::IdeaValidation),
    ("marketing-advisor", ScoreCategory::MarketFit),
    ("export-advisor", ScoreCategory::MarketFit),
    ("contract-generator", ScoreCategory::UserExperience),
    ("pricing-assistant", ScoreCategory::Monetization),
];

/// Derive the full recommendation for a completed session.
pub fn recommend(scores: &CategoryScores, profile: &ProfileStore) -> Recommendation {
    let primary = primary_tier(scores);
    let secondary = secondary_tier(&primary, profile);
    let legacy = legacy_flags(&primary, &secondary);
    let tasks = personalized_tasks(profile);

    debug!(
        primary = primary.len(),
        secondary = secondary.len(),
        tasks = tasks.len(),
        "derived recommendation"
    );

    Recommendation {
        primary,
        secondary,
        legacy,
        tasks,
    }
}

fn primary_tier(scores: &CategoryScores) -> Vec<String> {
    let mut primary: Vec<String> = agents::by_priority(AgentPriority::High)
        .iter()
        .map(|a| a.id.clone())
        .collect();

    // Lowest scores first; stable sort keeps registry order on ties
    let mut needs: Vec<(&str, u32)> = NEED_AGENTS
        .iter()
        .map(|(id, category)| (*id, scores.get(*category)))
        .collect();
    needs.sort_by_key(|(_, score)| *score);

    let mut promoted = 0;
    for (agent_id, need_score) in needs {
        if promoted == NEED_PROMOTIONS {
            break;
        }
        if need_score >= NEED_THRESHOLD {
            continue;
        }
        if primary.iter().any(|id| id == agent_id) {
            continue;
        }
        primary.push(agent_id.to_string());
        promoted += 1;
    }

    primary
}

fn secondary_tier(primary: &[String], profile: &ProfileStore) -> Vec<String> {
    let mut secondary: Vec<String> = Vec::new();
    let push = |secondary: &mut Vec<String>, agent_id: &str| {
        if !primary.iter().any(|id| id == agent_id)
            && !secondary.iter().any(|id| id == agent_id)
        {
            secondary.push(agent_id.to_string());
        }
    };

    if let Some(industry) = profile.get("industry").and_then(|v| v.as_text()) {
        let matched: Vec<&str> = agents::registry()
            .iter()
            .filter(|a| a.applies_to_industry(industry))
            .filter(|a| !primary.iter().any(|id| id == &a.id))
            .take(INDUSTRY_CAP)
            .map(|a| a.id.as_str())
            .collect();
        for agent_id in matched {
            push(&mut secondary, agent_id);
        }
    }

    if profile.includes("paymentMethods", "billing-system") {
        push(&mut secondary, "income-calculator");
    }
    if profile.includes("collaborationTypes", "businesses")
        || profile.includes("collaborationTypes", "institutions")
    {
        push(&mut secondary, "contract-generator");
    }

    let padding: Vec<&str> = agents::registry()
        .iter()
        .filter(|a| {
            matches!(
                a.priority,
                AgentPriority::Medium | AgentPriority::MediumHigh
            )
        })
        .filter(|a| {
            !primary.iter().any(|id| id == &a.id) && !secondary.iter().any(|id| id == &a.id)
        })
        .take(PADDING_CAP)
        .map(|a| a.id.as_str())
        .collect();
    for agent_id in padding {
        push(&mut secondary, agent_id);
    }

    secondary
}

fn legacy_flags(primary: &[String], secondary: &[String]) -> LegacyAgentFlags {
    let in_either = |agent_id: &str| {
        primary.iter().any(|id| id == agent_id) || secondary.iter().any(|id| id == agent_id)
    };
    LegacyAgentFlags {
        admin: true,
        cultural: true,
        accounting: in_either("cost-calculator") || in_either("income-calculator"),
        legal: in_either("contract-generator") || in_either("collaboration-agreement"),
        operations: in_either("project-manager") || in_either("stakeholder-matching"),
    }
}

fn task(
    id: &str,
    title: &str,
    description: &str,
    priority: TaskPriority,
    category: &str,
    estimated_time: &str,
) -> PersonalizedTask {
    PersonalizedTask {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        priority,
        category: category.to_string(),
        estimated_time: estimated_time.to_string(),
    }
}

/// Gap rules in fixed order. Order is part of the contract: the list is
/// truncated at the cap first-fired-first-kept, never re-sorted.
fn personalized_tasks(profile: &ProfileStore) -> Vec<PersonalizedTask> {
    let mut tasks = Vec::new();

    if profile.bool("hasSold") == Some(false) {
        tasks.push(task(
            "first-sale",
            "Make your first sale",
            "Focus on getting your first customer and validating your value proposition",
            TaskPriority::High,
            "validation",
            "1-2 weeks",
        ));
    }
    if profile.number("customerClarity").map(|c| c < 3.0).unwrap_or(false) {
        tasks.push(task(
            "define-customer",
            "Define your ideal customer",
            "Create a detailed profile of your target customer",
            TaskPriority::High,
            "market-fit",
            "3-5 days",
        ));
    }
    if profile
        .number("marketingConfidence")
        .map(|c| c < 3.0)
        .unwrap_or(false)
    {
        tasks.push(task(
            "marketing-plan",
            "Develop a marketing strategy",
            "Create a marketing plan that builds your confidence",
            TaskPriority::Medium,
            "growth",
            "1 week",
        ));
    }
    if profile.includes("pricingMethod", "no-system") {
        tasks.push(task(
            "define-pricing",
            "Build a pricing system",
            "Work out your real costs and set prices with a margin you control",
            TaskPriority::High,
            "monetization",
            "3-5 days",
        ));
    }
    if profile.includes("salesConsistency", "rarely")
        || profile.includes("salesConsistency", "occasionally")
    {
        tasks.push(task(
            "consistent-sales",
            "Build a consistent sales rhythm",
            "Turn occasional sales into a repeatable routine with a simple weekly goal",
            TaskPriority::Medium,
            "monetization",
            "2-4 weeks",
        ));
    }
    if profile.includes("financialControl", "none") {
        tasks.push(task(
            "financial-tracking",
            "Start tracking your finances",
            "Record income and expenses in one place, even a simple spreadsheet",
            TaskPriority::Medium,
            "finances",
            "1 week",
        ));
    }
    if profile.includes("brandIdentity", "no") {
        tasks.push(task(
            "brand-identity",
            "Define your brand identity",
            "Settle on a name, a look, and a one-line story for your work",
            TaskPriority::Low,
            "branding",
            "1-2 weeks",
        ));
    }

    tasks.truncate(TASK_CAP);
    tasks
}
