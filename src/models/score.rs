//! Score Models
//!
//! The four-category maturity score breakdown with auditable point
//! contributions, plus the derived maturity level banding.

use serde::{Deserialize, Serialize};

/// The four fixed scoring categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScoreCategory {
    IdeaValidation,
    UserExperience,
    MarketFit,
    Monetization,
}

impl ScoreCategory {
    /// All categories in display order.
    pub fn all() -> [ScoreCategory; 4] {
        [
            Self::IdeaValidation,
            Self::UserExperience,
            Self::MarketFit,
            Self::Monetization,
        ]
    }
}

/// One point contribution with its human-readable justification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub points: u32,
    pub reason: String,
}

/// Clamped per-category totals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryScores {
    pub idea_validation: u32,
    pub user_experience: u32,
    pub market_fit: u32,
    pub monetization: u32,
}

impl CategoryScores {
    /// The score for one category.
    pub fn get(&self, category: ScoreCategory) -> u32 {
        match category {
            ScoreCategory::IdeaValidation => self.idea_validation,
            ScoreCategory::UserExperience => self.user_experience,
            ScoreCategory::MarketFit => self.market_fit,
            ScoreCategory::Monetization => self.monetization,
        }
    }

    /// Unweighted average across the four categories.
    pub fn average(&self) -> f64 {
        f64::from(
            self.idea_validation + self.user_experience + self.market_fit + self.monetization,
        ) / 4.0
    }
}

/// Audit trail of one scoring pass: per-category contribution entries.
///
/// Entries are append-only within a pass; a fresh pass starts empty.
/// Totals are the clamped (0-100) sums of the entry points.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub idea_validation: Vec<ScoreEntry>,
    pub user_experience: Vec<ScoreEntry>,
    pub market_fit: Vec<ScoreEntry>,
    pub monetization: Vec<ScoreEntry>,
}

impl ScoreBreakdown {
    /// Append a contribution to a category.
    pub fn add(&mut self, category: ScoreCategory, points: u32, reason: impl Into<String>) {
        let entry = ScoreEntry {
            points,
            reason: reason.into(),
        };
        self.entries_mut(category).push(entry);
    }

    /// Contribution entries for a category, in the order they fired.
    pub fn entries(&self, category: ScoreCategory) -> &[ScoreEntry] {
        match category {
            ScoreCategory::IdeaValidation => &self.idea_validation,
            ScoreCategory::UserExperience => &self.user_experience,
            ScoreCategory::MarketFit => &self.market_fit,
            ScoreCategory::Monetization => &self.monetization,
        }
    }

    fn entries_mut(&mut self, category: ScoreCategory) -> &mut Vec<ScoreEntry> {
        match category {
            ScoreCategory::IdeaValidation => &mut self.idea_validation,
            ScoreCategory::UserExperience => &mut self.user_experience,
            ScoreCategory::MarketFit => &mut self.market_fit,
            ScoreCategory::Monetization => &mut self.monetization,
        }
    }

    /// The clamped total for one category.
    pub fn total(&self, category: ScoreCategory) -> u32 {
        let sum: u32 = self.entries(category).iter().map(|e| e.points).sum();
        sum.min(100)
    }

    /// All four clamped totals.
    pub fn totals(&self) -> CategoryScores {
        CategoryScores {
            idea_validation: self.total(ScoreCategory::IdeaValidation),
            user_experience: self.total(ScoreCategory::UserExperience),
            market_fit: self.total(ScoreCategory::MarketFit),
            monetization: self.total(ScoreCategory::Monetization),
        }
    }
}

/// Named maturity band derived from the average category score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaturityLevel {
    /// Stable id: "starting", "developing", "growing", "advanced"
    pub id: String,
    /// 1-based band number
    pub level: u8,
    /// Display name in the session language
    pub name: String,
    /// One-line description in the session language
    pub description: String,
}
