//! Maturity Wizard - Business Onboarding Core
//!
//! This library implements the wizard core behind a business maturity
//! onboarding flow. It includes:
//! - Bilingual question catalogs (fused conversational and classic wizard)
//! - Profile accumulation with last-write-wins merge semantics
//! - The navigator state machine with conditional visibility and branching
//! - Pure scoring and recommendation engines
//! - A SQLite session store for save/resume

pub mod models;
pub mod services;
pub mod storage;
pub mod utils;

// Re-export the core API surface
pub use models::{
    AnswerType, AnswerValue, Block, Catalog, CatalogMode, CategoryScores, Language,
    LegacyAgentFlags, MaturityLevel, PersonalizedTask, Question, Recommendation, ScoreBreakdown,
    ScoreCategory, SessionSnapshot, TaskPriority,
};
pub use services::{
    load_catalog, maturity_level, recommend, score, toggled, ProfileStore, Progress,
    WizardNavigator,
};
pub use storage::{PersistedSession, SessionStore};
pub use utils::error::{AppError, AppResult};
