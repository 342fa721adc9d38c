//! Session Snapshot
//!
//! The serializable hand-off between the wizard core and the persistence
//! collaborator. Visibility state is never persisted; a restored navigator
//! re-derives it from the profile.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::answer::AnswerValue;

/// Resumable wizard position plus the accumulated profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub block_index: usize,
    pub question_index: usize,
    pub profile: HashMap<String, AnswerValue>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_round_trip() {
        let mut profile = HashMap::new();
        profile.insert("experience".to_string(), AnswerValue::from("expert"));
        profile.insert("customerClarity".to_string(), AnswerValue::from(4.0));

        let snapshot = SessionSnapshot {
            block_index: 2,
            question_index: 1,
            profile,
        };

        let json = serde_json::to_string(&snapshot).unwrap();
        let back: SessionSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snapshot);
    }
}
