//! Scoring Engine
//!
//! Pure recomputation from a profile to the four-category breakdown. Every
//! rule inspects explicitly answered fields only; an absent field fires
//! nothing. Tier rules on one field contribute at most one entry. Totals
//! clamp to 0-100, entries keep their raw points as the audit trail.

use tracing::debug;

use crate::models::{CategoryScores, Language, MaturityLevel, ScoreBreakdown, ScoreCategory};
use crate::services::profile::ProfileStore;

use ScoreCategory::{IdeaValidation, MarketFit, Monetization, UserExperience};

/// Compute a fresh breakdown from the current profile.
pub fn score(profile: &ProfileStore) -> ScoreBreakdown {
    let mut breakdown = ScoreBreakdown::default();

    idea_validation_rules(profile, &mut breakdown);
    user_experience_rules(profile, &mut breakdown);
    market_fit_rules(profile, &mut breakdown);
    monetization_rules(profile, &mut breakdown);
    detailed_path_rules(profile, &mut breakdown);

    debug!(
        idea_validation = breakdown.total(IdeaValidation),
        user_experience = breakdown.total(UserExperience),
        market_fit = breakdown.total(MarketFit),
        monetization = breakdown.total(Monetization),
        "computed maturity scores"
    );
    breakdown
}

fn idea_validation_rules(profile: &ProfileStore, breakdown: &mut ScoreBreakdown) {
    // Experience tiers, mutually exclusive
    if profile.includes("experience", "more-than-2-years") {
        breakdown.add(IdeaValidation, 30, "More than 2 years of experience");
    } else if profile.includes("experience", "6-months-to-2-years") {
        breakdown.add(IdeaValidation, 20, "Between 6 months and 2 years of experience");
    } else if profile.includes("experience", "less-than-6-months") {
        breakdown.add(IdeaValidation, 10, "Getting started, less than 6 months in");
    }

    if profile.includes("brandIdentity", "yes") {
        breakdown.add(IdeaValidation, 20, "Defined brand identity");
    } else if profile.includes("brandIdentity", "somewhat") {
        breakdown.add(IdeaValidation, 10, "Brand identity taking shape");
    }

    if let Some(description) = profile.get("businessDescription").and_then(|v| v.as_text()) {
        if description.len() > 50 {
            breakdown.add(IdeaValidation, 10, "Clear business description");
        }
    }

    if profile.contains("targetAudience") && !profile.includes("targetAudience", "unclear") {
        breakdown.add(IdeaValidation, 10, "Defined target audience");
    }
}

fn user_experience_rules(profile: &ProfileStore, breakdown: &mut ScoreBreakdown) {
    if let Some(activities) = profile.get("activities") {
        if !activities.is_empty() {
            breakdown.add(UserExperience, 5, "Active in your craft");
        }
    }
    if profile.includes("activities", "classes") || profile.includes("activities", "services") {
        breakdown.add(UserExperience, 15, "Direct customer-facing activities");
    }

    if profile.includes("brandIdentity", "yes") {
        breakdown.add(UserExperience, 25, "Consistent brand experience");
    } else if profile.includes("brandIdentity", "somewhat") {
        breakdown.add(UserExperience, 15, "Partial brand experience");
    }

    // Customer clarity tiers (fused path slider)
    match profile.number("customerClarity") {
        Some(clarity) if clarity >= 4.0 => {
            breakdown.add(UserExperience, 15, "Strong knowledge of your ideal customer");
        }
        Some(clarity) if clarity >= 3.0 => {
            breakdown.add(UserExperience, 10, "Working knowledge of your ideal customer");
        }
        _ => {}
    }
}

fn market_fit_rules(profile: &ProfileStore, breakdown: &mut ScoreBreakdown) {
    if profile.includes("activities", "selling-online") || profile.includes("activities", "export")
    {
        breakdown.add(MarketFit, 20, "Selling beyond your local circle");
    }
    if profile
        .get("activities")
        .map(|v| v.selection_count() > 1)
        .unwrap_or(false)
    {
        breakdown.add(MarketFit, 5, "Multiple activity lines");
    }

    if profile.includes("teamStructure", "team") {
        breakdown.add(MarketFit, 20, "Operating with a stable team");
    } else if profile.includes("teamStructure", "occasional") {
        breakdown.add(MarketFit, 10, "Getting occasional help");
    }

    if profile
        .number("marketingConfidence")
        .map(|c| c >= 3.0)
        .unwrap_or(false)
    {
        breakdown.add(MarketFit, 10, "Confident promoting your work");
    }
    if profile
        .get("promotionChannels")
        .map(|v| v.selection_count() > 1)
        .unwrap_or(false)
    {
        breakdown.add(MarketFit, 10, "Promoting on several channels");
    }
}

fn monetization_rules(profile: &ProfileStore, breakdown: &mut ScoreBreakdown) {
    // Highest-ranked payment method wins the tier
    if profile.includes("paymentMethods", "billing-system") {
        breakdown.add(Monetization, 25, "Formal billing system in place");
    } else if profile.includes("paymentMethods", "digital-platforms") {
        breakdown.add(Monetization, 15, "Charging through digital platforms");
    } else if profile.includes("paymentMethods", "cash-or-transfer") {
        breakdown.add(Monetization, 5, "Informal payment collection");
    }

    if profile.includes("financialControl", "detailed") {
        breakdown.add(Monetization, 25, "Detailed financial control");
    } else if profile.includes("financialControl", "somewhat") {
        breakdown.add(Monetization, 15, "Informal financial tracking");
    } else if profile.includes("financialControl", "none") {
        breakdown.add(Monetization, 5, "Finances not yet tracked");
    }

    if profile.bool("hasSold") == Some(true) {
        breakdown.add(Monetization, 15, "First sales already made");
    }
    if profile.includes("salesConsistency", "regularly")
        || profile.includes("salesConsistency", "consistently")
    {
        breakdown.add(Monetization, 15, "Selling on a regular basis");
    } else if profile.includes("salesConsistency", "occasionally") {
        breakdown.add(Monetization, 5, "Occasional sales");
    }

    if profile
        .number("profitClarity")
        .map(|c| c >= 3.0)
        .unwrap_or(false)
    {
        breakdown.add(Monetization, 10, "Clear view of actual earnings");
    }
}

/// Rules over the extended-analysis fields. Skipped when the session
/// explicitly chose the quick path; fused sessions never set the
/// preference and take these rules whenever the fields are answered.
fn detailed_path_rules(profile: &ProfileStore, breakdown: &mut ScoreBreakdown) {
    if profile.includes("analysisPreference", "quick") {
        return;
    }

    if profile.includes("pricingMethod", "myself") {
        breakdown.add(Monetization, 10, "Cost-based pricing method");
    }
    if profile.includes("internationalSales", "yes") {
        breakdown.add(MarketFit, 15, "International sales experience");
    }
    if profile.includes("formalizedBusiness", "yes") {
        breakdown.add(Monetization, 10, "Formally registered business");
        breakdown.add(MarketFit, 10, "Formal structure opens markets");
    }
    if profile.includes("collaboration", "yes") {
        breakdown.add(UserExperience, 10, "Collaborating with other creators");
    }
    if profile.includes("economicSustainability", "yes") {
        breakdown.add(MarketFit, 10, "Economically sustainable activity");
        breakdown.add(Monetization, 10, "Activity sustains itself");
    }
}

/// Band the average category score into a named maturity level.
pub fn maturity_level(scores: &CategoryScores, language: Language) -> MaturityLevel {
    let spanish = language == Language::Es;
    let average = scores.average();

    let (id, level, name, description) = if average <= 25.0 {
        (
            "starting",
            1,
            if spanish { "Iniciando" } else { "Starting" },
            if spanish {
                "Estás comenzando tu viaje emprendedor"
            } else {
                "You are starting your entrepreneurial journey"
            },
        )
    } else if average <= 50.0 {
        (
            "developing",
            2,
            if spanish { "Desarrollando" } else { "Developing" },
            if spanish {
                "Tu negocio está tomando forma"
            } else {
                "Your business is taking shape"
            },
        )
    } else if average <= 75.0 {
        (
            "growing",
            3,
            if spanish { "Creciendo" } else { "Growing" },
            if spanish {
                "Tu negocio está en crecimiento"
            } else {
                "Your business is growing"
            },
        )
    } else {
        (
            "advanced",
            4,
            if spanish { "Avanzado" } else { "Advanced" },
            if spanish {
                "Tienes un negocio maduro y establecido"
            } else {
                "You have a mature and established business"
            },
        )
    };

    MaturityLevel {
        id: id.to_string(),
        level,
        name: name.to_string(),
        description: description.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AnswerValue;

    fn profile(pairs: &[(&str, AnswerValue)]) -> ProfileStore {
        let mut store = ProfileStore::new();
        for (field, value) in pairs {
            store.set(field, value.clone());
        }
        store
    }

    #[test]
    fn test_empty_profile_scores_zero() {
        let breakdown = score(&ProfileStore::new());
        for category in ScoreCategory::all() {
            assert_eq!(breakdown.total(category), 0);
        }
    }

    #[test]
    fn test_experience_and_brand_contributions() {
        let breakdown = score(&profile(&[
            ("experience", AnswerValue::from("more-than-2-years")),
            ("brandIdentity", AnswerValue::from("yes")),
        ]));
        let points: Vec<u32> = breakdown
            .entries(IdeaValidation)
            .iter()
            .map(|e| e.points)
            .collect();
        assert!(points.contains(&30));
        assert!(points.contains(&20));
        assert_eq!(breakdown.total(IdeaValidation), 50);
    }

    #[test]
    fn test_experience_tiers_are_mutually_exclusive() {
        for (value, expected) in [
            ("less-than-6-months", 10),
            ("6-months-to-2-years", 20),
            ("more-than-2-years", 30),
        ] {
            let breakdown = score(&profile(&[("experience", AnswerValue::from(value))]));
            assert_eq!(breakdown.entries(IdeaValidation).len(), 1);
            assert_eq!(breakdown.total(IdeaValidation), expected);
        }
    }

    #[test]
    fn test_payment_methods_take_highest_tier_only() {
        let breakdown = score(&profile(&[(
            "paymentMethods",
            AnswerValue::from(vec!["cash-or-transfer", "billing-system"]),
        )]));
        assert_eq!(breakdown.entries(Monetization).len(), 1);
        assert_eq!(breakdown.total(Monetization), 25);
    }

    #[test]
    fn test_activities_fire_base_bonus_and_flags_together() {
        let breakdown = score(&profile(&[(
            "activities",
            AnswerValue::from(vec!["classes", "selling-online"]),
        )]));
        // base + customer-facing flag
        assert_eq!(breakdown.total(UserExperience), 20);
        // reach flag + count bonus
        assert_eq!(breakdown.total(MarketFit), 25);
    }

    #[test]
    fn test_quick_path_skips_detailed_rules() {
        let answers = [
            ("analysisPreference", AnswerValue::from("quick")),
            ("internationalSales", AnswerValue::from("yes")),
        ];
        let breakdown = score(&profile(&answers));
        assert_eq!(breakdown.total(MarketFit), 0);

        let mut answers = answers;
        answers[0].1 = AnswerValue::from("detailed");
        let breakdown = score(&profile(&answers));
        assert_eq!(breakdown.total(MarketFit), 15);
    }

    #[test]
    fn test_fused_fields_score_without_analysis_preference() {
        let breakdown = score(&profile(&[
            ("pricingMethod", AnswerValue::from("myself")),
            ("profitClarity", AnswerValue::from(4.0)),
        ]));
        assert_eq!(breakdown.total(Monetization), 20);
    }

    #[test]
    fn test_determinism_across_passes() {
        let store = profile(&[
            ("experience", AnswerValue::from("6-months-to-2-years")),
            ("brandIdentity", AnswerValue::from("somewhat")),
            ("hasSold", AnswerValue::Bool(true)),
            ("teamStructure", AnswerValue::from("occasional")),
        ]);
        assert_eq!(score(&store), score(&store));
    }

    #[test]
    fn test_totals_clamp_but_entries_keep_raw_points() {
        let store = profile(&[
            ("paymentMethods", AnswerValue::from(vec!["billing-system"])),
            ("financialControl", AnswerValue::from("detailed")),
            ("hasSold", AnswerValue::Bool(true)),
            ("salesConsistency", AnswerValue::from("consistently")),
            ("profitClarity", AnswerValue::from(5.0)),
            ("pricingMethod", AnswerValue::from("myself")),
            ("formalizedBusiness", AnswerValue::from("yes")),
            ("economicSustainability", AnswerValue::from("yes")),
        ]);
        let breakdown = score(&store);
        let raw: u32 = breakdown
            .entries(Monetization)
            .iter()
            .map(|e| e.points)
            .sum();
        assert!(raw > 100);
        assert_eq!(breakdown.total(Monetization), 100);
    }

    #[test]
    fn test_maturity_level_banding() {
        let banded = |value: u32| {
            maturity_level(
                &CategoryScores {
                    idea_validation: value,
                    user_experience: value,
                    market_fit: value,
                    monetization: value,
                },
                Language::En,
            )
        };
        assert_eq!(banded(10).id, "starting");
        assert_eq!(banded(25).id, "starting");
        assert_eq!(banded(40).id, "developing");
        assert_eq!(banded(75).id, "growing");
        assert_eq!(banded(90).id, "advanced");
        assert_eq!(banded(90).level, 4);
    }

    #[test]
    fn test_maturity_level_localized() {
        let scores = CategoryScores {
            idea_validation: 80,
            user_experience: 80,
            market_fit: 80,
            monetization: 80,
        };
        assert_eq!(maturity_level(&scores, Language::Es).name, "Avanzado");
        assert_eq!(maturity_level(&scores, Language::En).name, "Advanced");
    }
}
