//! Wizard Navigator
//!
//! The session state machine: a cursor over a catalog's visible questions,
//! driven by the live profile. Visibility is re-derived from the profile on
//! every read, never cached across answers, so hiding a controlling answer
//! immediately hides its dependents. Branch rules are consulted only at
//! block boundaries.

use std::collections::{HashMap, HashSet};

use tracing::{debug, warn};

use crate::models::{AnswerValue, Block, Catalog, Question, SessionSnapshot};
use crate::services::profile::ProfileStore;
use crate::utils::{AppError, AppResult};

/// Coarse completion meter over the block sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    /// 1-based block position
    pub current: usize,
    /// Total block count of the catalog
    pub total: usize,
    /// Rounded percentage of `current / total`
    pub percentage: u8,
}

/// Cursor over one wizard session
#[derive(Debug, Clone)]
pub struct WizardNavigator {
    catalog: Catalog,
    profile: ProfileStore,
    block_index: usize,
    question_index: usize,
    /// Block indices already left behind, in visit order. Lets `previous`
    /// retrace a branched path instead of assuming adjacency.
    visited: Vec<usize>,
    /// Trigger keys whose dynamic questions were already injected
    applied_augmentations: HashSet<String>,
    completed: bool,
}

impl WizardNavigator {
    /// Start a fresh session at the first block.
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            profile: ProfileStore::new(),
            block_index: 0,
            question_index: 0,
            visited: Vec::new(),
            applied_augmentations: HashSet::new(),
            completed: false,
        }
    }

    /// The catalog this session runs on.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The live profile.
    pub fn profile(&self) -> &ProfileStore {
        &self.profile
    }

    /// The block the cursor is in.
    pub fn current_block(&self) -> &Block {
        &self.catalog.blocks[self.block_index]
    }

    /// Whether the session reached past the final block.
    pub fn is_complete(&self) -> bool {
        self.completed
    }

    /// Questions of the current block whose visibility predicate holds
    /// against the live profile, in catalog order.
    pub fn visible_questions(&self) -> Vec<&Question> {
        Self::visible_in(self.current_block(), &self.profile)
    }

    fn visible_in<'a>(block: &'a Block, profile: &ProfileStore) -> Vec<&'a Question> {
        block
            .questions
            .iter()
            .filter(|q| match &q.visible_when {
                Some(rule) => rule.holds(profile.get(&rule.field)),
                None => true,
            })
            .collect()
    }

    /// Visible questions of any block by id; empty for unknown blocks.
    pub fn visible_questions_in(&self, block_id: &str) -> Vec<&Question> {
        self.catalog
            .block(block_id)
            .map(|block| Self::visible_in(block, &self.profile))
            .unwrap_or_default()
    }

    /// The question under the cursor, if the current block has any visible.
    pub fn current_question(&self) -> Option<&Question> {
        let visible = self.visible_questions();
        if visible.is_empty() {
            return None;
        }
        // An earlier answer may have hidden questions behind the cursor
        let index = self.question_index.min(visible.len() - 1);
        Some(visible[index])
    }

    /// Record an answer for a currently visible question.
    ///
    /// A stale id, whether foreign to the block or hidden by its visibility
    /// predicate, is ignored without moving the cursor; the caller decides
    /// when to advance.
    pub fn answer(&mut self, question_id: &str, value: AnswerValue) {
        let field = self
            .visible_questions()
            .iter()
            .find(|q| q.id == question_id)
            .map(|q| q.field_name.clone());
        match field {
            Some(field) => self.profile.set(&field, value),
            None => {
                debug!(%question_id, "ignoring answer for question not currently visible");
            }
        }
    }

    /// Merge a partial profile update without touching the cursor.
    pub fn merge_profile(&mut self, partial: HashMap<String, AnswerValue>) {
        self.profile.merge(partial);
    }

    /// Advance one visible question, or cross into the next block when the
    /// current one is exhausted. Branch rules on the leaving block override
    /// the default increment. No-op once complete.
    pub fn next(&mut self) {
        if self.completed {
            return;
        }

        let visible_count = self.visible_questions().len();
        if visible_count > 0 && self.question_index + 1 < visible_count {
            self.question_index = self.question_index.min(visible_count - 1) + 1;
            return;
        }

        match self.next_block_index() {
            Some(target) => {
                self.visited.push(self.block_index);
                self.block_index = target;
                self.question_index = 0;
            }
            None => {
                self.completed = true;
            }
        }
    }

    fn next_block_index(&self) -> Option<usize> {
        let leaving = self.current_block();
        let branch = self
            .catalog
            .branch_rules
            .iter()
            .filter(|r| r.after_block == leaving.id)
            .find_map(|rule| {
                let value = self.profile.get(&rule.field)?;
                value
                    .includes(&rule.value)
                    .then(|| self.catalog.block_index(&rule.goto_block))
                    .flatten()
            });
        if let Some(target) = branch {
            return Some(target);
        }
        let next = self.block_index + 1;
        (next < self.catalog.blocks.len()).then_some(next)
    }

    /// Step back one visible question, retracing the visited block path at
    /// block boundaries. A no-op at the very first question.
    ///
    /// The cursor is clamped into the current visible list before moving;
    /// a cursor stranded past a shrunken list sits on its last question.
    pub fn previous(&mut self) {
        self.completed = false;

        let visible_count = self.visible_questions().len();
        let clamped = self.question_index.min(visible_count.saturating_sub(1));
        if visible_count > 0 && clamped > 0 {
            self.question_index = clamped - 1;
            return;
        }

        match self.visited.pop() {
            Some(previous_block) => {
                self.block_index = previous_block;
                let visible = self.visible_questions().len();
                self.question_index = visible.saturating_sub(1);
            }
            None => {
                self.question_index = 0;
            }
        }
    }

    /// Start over: clear the profile and return to the first question.
    /// Augmented questions stay in the catalog; their trigger keys do too.
    pub fn reset(&mut self) {
        self.profile.reset();
        self.block_index = 0;
        self.question_index = 0;
        self.visited.clear();
        self.completed = false;
    }

    /// Inject extra questions at the end of a block, keyed by trigger.
    ///
    /// Repeating a trigger key is a no-op, so re-firing the same dynamic
    /// rule cannot duplicate questions. Blocks the cursor already left
    /// refuse augmentation.
    pub fn augment_block(
        &mut self,
        block_id: &str,
        trigger_key: &str,
        questions: Vec<Question>,
    ) -> AppResult<()> {
        if self.applied_augmentations.contains(trigger_key) {
            debug!(%trigger_key, "augmentation already applied");
            return Ok(());
        }

        let target = self
            .catalog
            .block_index(block_id)
            .ok_or_else(|| AppError::not_found(format!("block '{block_id}'")))?;

        if target < self.block_index || self.visited.contains(&target) {
            warn!(%block_id, "refusing to augment a block already passed");
            return Err(AppError::validation(format!(
                "block '{block_id}' was already passed"
            )));
        }

        self.catalog.blocks[target].questions.extend(questions);
        self.applied_augmentations.insert(trigger_key.to_string());
        Ok(())
    }

    /// Coarse progress over the block sequence.
    pub fn progress(&self) -> Progress {
        let total = self.catalog.blocks.len();
        let current = if self.completed {
            total
        } else {
            self.block_index + 1
        };
        let percentage = if total == 0 {
            0
        } else {
            ((current as f64 / total as f64) * 100.0).round() as u8
        };
        Progress {
            current,
            total,
            percentage,
        }
    }

    /// Freeze position and profile for persistence. Visibility and the
    /// visited path are intentionally left out; `restore` re-derives both.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            block_index: self.block_index,
            question_index: self.question_index,
            profile: self.profile.to_fields(),
        }
    }

    /// Rebuild a navigator from a snapshot, replaying branch rules against
    /// the restored profile to recover the visited block path.
    pub fn restore(catalog: Catalog, snapshot: SessionSnapshot) -> Self {
        let mut navigator = Self::new(catalog);
        navigator.profile = ProfileStore::from_fields(snapshot.profile);

        let block_index = snapshot
            .block_index
            .min(navigator.catalog.blocks.len().saturating_sub(1));
        while navigator.block_index < block_index {
            match navigator.next_block_index() {
                Some(target) if target <= block_index => {
                    navigator.visited.push(navigator.block_index);
                    navigator.block_index = target;
                }
                _ => break,
            }
        }

        let visible = navigator.visible_questions().len();
        navigator.question_index = snapshot.question_index.min(visible.saturating_sub(1));
        navigator
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AnswerType, CatalogMode, Language, VisibilityOp, VisibilityRule};
    use crate::services::catalog::load_catalog;

    fn wizard_navigator() -> WizardNavigator {
        WizardNavigator::new(load_catalog(Language::En, CatalogMode::Wizard))
    }

    fn answer_current(navigator: &mut WizardNavigator, value: AnswerValue) {
        let id = navigator.current_question().unwrap().id.clone();
        navigator.answer(&id, value);
        navigator.next();
    }

    fn finish_block(navigator: &mut WizardNavigator, answers: &[(&str, AnswerValue)]) {
        for (id, value) in answers {
            navigator.answer(id, value.clone());
        }
        let block = navigator.current_block().id.clone();
        while navigator.current_block().id == block && !navigator.is_complete() {
            navigator.next();
        }
    }

    #[test]
    fn test_previous_at_origin_is_noop() {
        let mut navigator = wizard_navigator();
        navigator.previous();
        assert_eq!(navigator.current_block().id, "profile");
        assert_eq!(navigator.current_question().unwrap().id, "industry");
    }

    #[test]
    fn test_next_walks_visible_questions_in_order() {
        let mut navigator = wizard_navigator();
        assert_eq!(navigator.current_question().unwrap().id, "industry");
        navigator.next();
        assert_eq!(navigator.current_question().unwrap().id, "activities");
        navigator.previous();
        assert_eq!(navigator.current_question().unwrap().id, "industry");
    }

    #[test]
    fn test_conditional_question_hidden_until_controller_answered() {
        let mut navigator = wizard_navigator();
        finish_block(&mut navigator, &[]);
        assert_eq!(navigator.current_block().id, "business");

        let visible: Vec<&str> = navigator
            .visible_questions()
            .iter()
            .map(|q| q.id.as_str())
            .collect();
        assert!(!visible.contains(&"sales-consistency"));

        navigator.answer("has-sold", AnswerValue::Bool(true));
        let visible: Vec<&str> = navigator
            .visible_questions()
            .iter()
            .map(|q| q.id.as_str())
            .collect();
        assert!(visible.contains(&"sales-consistency"));
    }

    #[test]
    fn test_hiding_controller_clamps_cursor() {
        let mut navigator = wizard_navigator();
        finish_block(&mut navigator, &[]);
        navigator.answer("has-sold", AnswerValue::Bool(true));
        // Walk to the last visible question of the block
        for _ in 0..3 {
            navigator.next();
        }
        assert_eq!(navigator.current_block().id, "business");

        // Flipping the controller shrinks the visible list under the cursor
        navigator.answer("has-sold", AnswerValue::Bool(false));
        assert!(navigator.current_question().is_some());
        navigator.previous();
        assert_eq!(navigator.current_block().id, "business");
    }

    #[test]
    fn test_previous_with_cursor_past_shrunken_list() {
        let catalog = Catalog {
            language: Language::En,
            mode: CatalogMode::Wizard,
            blocks: vec![Block::new(
                "setup",
                "Setup",
                vec![
                    Question::new("ready", "Ready to launch?", AnswerType::SingleChoice, "ready"),
                    Question::new("launch-date", "When?", AnswerType::Text, "launchDate")
                        .visible_when(VisibilityRule {
                            field: "ready".to_string(),
                            op: VisibilityOp::Equals,
                            value: Some(AnswerValue::from("yes")),
                        }),
                ],
            )],
            branch_rules: vec![],
        };
        let mut navigator = WizardNavigator::new(catalog);
        navigator.answer("ready", AnswerValue::from("yes"));
        navigator.next();
        assert_eq!(navigator.current_question().unwrap().id, "launch-date");

        // An external merge hides the question under the cursor
        navigator.merge_profile(HashMap::from([(
            "ready".to_string(),
            AnswerValue::from("no"),
        )]));
        navigator.previous();
        assert_eq!(navigator.current_question().unwrap().id, "ready");
    }

    #[test]
    fn test_answer_for_hidden_question_is_ignored() {
        let mut navigator = wizard_navigator();
        finish_block(&mut navigator, &[]);
        assert_eq!(navigator.current_block().id, "business");

        // sales-consistency stays hidden until has-sold is answered
        navigator.answer("sales-consistency", AnswerValue::from("recurring"));
        assert!(!navigator.profile().contains("salesConsistency"));
    }

    #[test]
    fn test_quick_branch_skips_detailed_analysis() {
        let mut navigator = wizard_navigator();
        finish_block(&mut navigator, &[]);
        finish_block(&mut navigator, &[]);
        finish_block(&mut navigator, &[]);
        assert_eq!(navigator.current_block().id, "analysis-choice");

        answer_current(&mut navigator, AnswerValue::from("quick"));
        assert_eq!(navigator.current_block().id, "results");
    }

    #[test]
    fn test_detailed_branch_enters_detailed_analysis() {
        let mut navigator = wizard_navigator();
        finish_block(&mut navigator, &[]);
        finish_block(&mut navigator, &[]);
        finish_block(&mut navigator, &[]);
        answer_current(&mut navigator, AnswerValue::from("detailed"));
        assert_eq!(navigator.current_block().id, "detailed-analysis");
    }

    #[test]
    fn test_previous_retraces_branch_path() {
        let mut navigator = wizard_navigator();
        finish_block(&mut navigator, &[]);
        finish_block(&mut navigator, &[]);
        finish_block(&mut navigator, &[]);
        answer_current(&mut navigator, AnswerValue::from("quick"));
        assert_eq!(navigator.current_block().id, "results");

        // Back out of results lands on the block we actually came from
        navigator.previous();
        assert_eq!(navigator.current_block().id, "analysis-choice");
    }

    #[test]
    fn test_next_past_final_block_terminates() {
        let mut navigator = wizard_navigator();
        for _ in 0..5 {
            finish_block(&mut navigator, &[]);
        }
        // Walking off a no-branch path ends at results, then completes
        while !navigator.is_complete() {
            navigator.next();
        }
        let position = navigator.snapshot();
        navigator.next();
        assert!(navigator.is_complete());
        assert_eq!(navigator.snapshot(), position);
    }

    #[test]
    fn test_reset_returns_to_origin_with_empty_profile() {
        let mut navigator = wizard_navigator();
        finish_block(&mut navigator, &[]);
        navigator.answer("has-sold", AnswerValue::Bool(true));
        navigator.reset();
        assert_eq!(navigator.current_block().id, "profile");
        assert!(navigator.profile().is_empty());
        assert!(!navigator.is_complete());
    }

    #[test]
    fn test_stale_answer_is_ignored() {
        let mut navigator = wizard_navigator();
        let before = navigator.snapshot();
        navigator.answer("has-sold", AnswerValue::Bool(true));
        assert_eq!(navigator.snapshot(), before);
    }

    #[test]
    fn test_augmentation_is_idempotent_per_trigger() {
        let mut navigator = wizard_navigator();
        let extra = Question::new("extra", "Extra?", AnswerType::Text, "extraField");

        navigator
            .augment_block("business", "trigger-a", vec![extra.clone()])
            .unwrap();
        navigator
            .augment_block("business", "trigger-a", vec![extra])
            .unwrap();

        let count = navigator
            .catalog()
            .block("business")
            .unwrap()
            .questions
            .iter()
            .filter(|q| q.id == "extra")
            .count();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_augmenting_passed_block_is_refused() {
        let mut navigator = wizard_navigator();
        finish_block(&mut navigator, &[]);
        let extra = Question::new("extra", "Extra?", AnswerType::Text, "extraField");
        assert!(navigator
            .augment_block("profile", "trigger-b", vec![extra])
            .is_err());
    }

    #[test]
    fn test_progress_is_monotonic_over_blocks() {
        let mut navigator = wizard_navigator();
        let start = navigator.progress();
        assert_eq!(start.current, 1);
        assert_eq!(start.total, 6);
        assert_eq!(start.percentage, 17);

        finish_block(&mut navigator, &[]);
        assert_eq!(navigator.progress().current, 2);
    }

    #[test]
    fn test_snapshot_restore_round_trip_on_branch() {
        let mut navigator = wizard_navigator();
        finish_block(&mut navigator, &[]);
        navigator.answer("has-sold", AnswerValue::Bool(true));
        finish_block(&mut navigator, &[]);
        finish_block(&mut navigator, &[]);
        answer_current(&mut navigator, AnswerValue::from("quick"));
        assert_eq!(navigator.current_block().id, "results");

        let snapshot = navigator.snapshot();
        let catalog = load_catalog(Language::En, CatalogMode::Wizard);
        let mut restored = WizardNavigator::restore(catalog, snapshot);

        assert_eq!(restored.current_block().id, "results");
        restored.previous();
        assert_eq!(restored.current_block().id, "analysis-choice");
    }
}
