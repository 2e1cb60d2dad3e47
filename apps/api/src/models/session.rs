use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Sessions expire one hour after creation, regardless of activity.
pub const SESSION_TTL_SECS: i64 = 3600;

/// Append-only audit record of a submitted answer. The log can hold entries
/// beyond the `answers` map when legacy callers are involved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawAnswer {
    pub question_id: String,
    pub answer: String,
}

/// Full per-token interview state.
///
/// Round-trips losslessly through serde, so the durable store can treat the
/// whole thing as a JSON document keyed by token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionState {
    pub created_at: DateTime<Utc>,
    pub last_activity: DateTime<Utc>,
    pub completed: bool,
    /// Questions already issued. Membership here is required before an
    /// answer to that question is accepted.
    pub asked_question_ids: HashSet<String>,
    /// Issuance order audit trail; duplicates the set but preserves order.
    pub question_order: Vec<String>,
    /// One answer per question id, write-once.
    pub answers: HashMap<String, String>,
    pub raw_answer_log: Vec<RawAnswer>,
    /// Issuance cursor; kept equal to `question_order.len()`.
    pub current_question_index: usize,
}

impl SessionState {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            created_at: now,
            last_activity: now,
            completed: false,
            asked_question_ids: HashSet::new(),
            question_order: Vec::new(),
            answers: HashMap::new(),
            raw_answer_log: Vec::new(),
            current_question_index: 0,
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.created_at + Duration::seconds(SESSION_TTL_SECS)
    }

    pub fn questions_asked(&self) -> usize {
        self.asked_question_ids.len()
    }

    pub fn questions_answered(&self) -> usize {
        self.answers.len()
    }

    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.last_activity = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_session_is_empty_and_live() {
        let now = Utc::now();
        let state = SessionState::new(now);
        assert!(!state.completed);
        assert_eq!(state.questions_asked(), 0);
        assert_eq!(state.questions_answered(), 0);
        assert_eq!(state.current_question_index, 0);
        assert!(!state.is_expired(now));
    }

    #[test]
    fn test_session_expires_after_ttl() {
        let created = Utc::now();
        let state = SessionState::new(created);
        assert!(!state.is_expired(created + Duration::seconds(SESSION_TTL_SECS)));
        assert!(state.is_expired(created + Duration::seconds(SESSION_TTL_SECS + 1)));
        assert!(state.is_expired(created + Duration::hours(2)));
    }

    #[test]
    fn test_touch_updates_last_activity_only() {
        let created = Utc::now();
        let mut state = SessionState::new(created);
        let later = created + Duration::minutes(5);
        state.touch(later);
        assert_eq!(state.last_activity, later);
        assert_eq!(state.created_at, created);
    }

    #[test]
    fn test_state_round_trips_through_json() {
        let mut state = SessionState::new(Utc::now());
        state.asked_question_ids.insert("q_1".to_string());
        state.asked_question_ids.insert("q_2".to_string());
        state.question_order = vec!["q_1".to_string(), "q_2".to_string()];
        state
            .answers
            .insert("q_1".to_string(), "a serious answer".to_string());
        state.raw_answer_log.push(RawAnswer {
            question_id: "q_1".to_string(),
            answer: "a serious answer".to_string(),
        });
        state.current_question_index = 2;
        state.completed = true;

        let json = serde_json::to_string(&state).unwrap();
        let back: SessionState = serde_json::from_str(&json).unwrap();

        assert_eq!(back.created_at, state.created_at);
        assert_eq!(back.last_activity, state.last_activity);
        assert_eq!(back.completed, state.completed);
        assert_eq!(back.asked_question_ids, state.asked_question_ids);
        assert_eq!(back.question_order, state.question_order);
        assert_eq!(back.answers, state.answers);
        assert_eq!(back.raw_answer_log, state.raw_answer_log);
        assert_eq!(back.current_question_index, state.current_question_index);
    }
}
