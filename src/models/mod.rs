//! Data Models
//!
//! Pure data structures shared across the wizard core: catalog definitions,
//! answer values, scores, agents, recommendations, and session snapshots.

pub mod agent;
pub mod answer;
pub mod catalog;
pub mod recommendation;
pub mod score;
pub mod snapshot;

pub use agent::{AgentCategory, AgentDescriptor, AgentPriority};
pub use answer::AnswerValue;
pub use catalog::{
    AnswerType, Block, BranchRule, Catalog, CatalogMode, ChoiceOption, Language, Question,
    SliderRange, VisibilityOp, VisibilityRule,
};
pub use recommendation::{LegacyAgentFlags, PersonalizedTask, Recommendation, TaskPriority};
pub use score::{CategoryScores, MaturityLevel, ScoreBreakdown, ScoreCategory, ScoreEntry};
pub use snapshot::SessionSnapshot;
