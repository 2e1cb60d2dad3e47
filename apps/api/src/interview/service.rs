//! Session state machine. Owns every live interview session, enforces the
//! progression rules (fixed bank order, write-once answers, expiry,
//! completion) and keeps the durable store in step on a best-effort basis.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::errors::ApiError;
use crate::generation::{fallback_question, GenerationContext, QuestionGenerator};
use crate::interview::bank::{self, BANK_SIZE};
use crate::interview::report::{self, Glyph};
use crate::models::question::QuestionCategory;
use crate::models::session::{RawAnswer, SessionState};
use crate::store::SessionStore;

/// Minimum trimmed answer length accepted by submit_answer.
const MIN_ANSWER_CHARS: usize = 10;

/// A question as issued to a candidate.
#[derive(Debug, Clone, Serialize)]
pub struct IssuedQuestion {
    pub id: String,
    pub text: String,
    pub category: QuestionCategory,
}

/// Outcome of a next-question request. Running out of questions is a normal
/// terminal signal, not an error.
#[derive(Debug, Clone)]
pub enum NextQuestion {
    Issued {
        question: IssuedQuestion,
        remaining: usize,
        ai_generated: bool,
    },
    Completed {
        questions_asked: usize,
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct AnswerReceipt {
    pub answers_saved: usize,
    pub remaining: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionStatus {
    pub created_at: DateTime<Utc>,
    pub completed: bool,
    pub questions_answered: usize,
    pub questions_asked: usize,
    pub total_questions: usize,
    pub current_performance: u32,
}

/// Post-interview result view. Served without an expiry check: recruiters
/// read results after the candidate's window has closed.
#[derive(Debug, Clone, Serialize)]
pub struct InterviewResult {
    pub session_id: String,
    pub total_time_seconds: i64,
    pub questions_answered: usize,
    pub completion_rate: f64,
    pub average_time_per_question: i64,
    pub performance_score: u32,
    pub created_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ServiceStats {
    pub sessions: usize,
    pub answers: usize,
    pub avg_score: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionSummary {
    pub token: String,
    pub created_at: DateTime<Utc>,
    pub last_activity: DateTime<Utc>,
    pub completed: bool,
    pub answers: usize,
    pub questions_asked: usize,
}

type SessionHandle = Arc<Mutex<SessionState>>;

/// One logical owner per token: the per-session mutex serializes same-token
/// operations (including the durable write, so writes stay ordered) while
/// distinct tokens proceed independently.
pub struct InterviewService {
    sessions: RwLock<HashMap<String, SessionHandle>>,
    store: Option<Arc<dyn SessionStore>>,
    generator: Option<Arc<dyn QuestionGenerator>>,
}

impl InterviewService {
    pub fn new(
        store: Option<Arc<dyn SessionStore>>,
        generator: Option<Arc<dyn QuestionGenerator>>,
    ) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            store,
            generator,
        }
    }

    /// Creates a fresh session under a new unguessable token.
    pub async fn create_session(&self) -> String {
        let token = Uuid::new_v4().to_string();
        let state = SessionState::new(Utc::now());

        self.persist(&token, &state).await;
        self.sessions
            .write()
            .await
            .insert(token.clone(), Arc::new(Mutex::new(state)));

        info!("created session {token}");
        token
    }

    /// Issues the next question in fixed bank order, or the completed signal
    /// once ten questions have been asked.
    pub async fn next_question(&self, token: &str) -> Result<NextQuestion, ApiError> {
        let handle = self.session_handle(token).await?;
        let mut state = handle.lock().await;
        let now = Utc::now();

        if state.is_expired(now) {
            return Err(ApiError::Expired);
        }
        if state.completed {
            return Err(ApiError::AlreadyCompleted);
        }
        if state.questions_asked() >= BANK_SIZE {
            return Ok(NextQuestion::Completed {
                questions_asked: state.questions_asked(),
            });
        }

        // The count of already-asked questions is the next bank index.
        let index = state.questions_asked();
        let (question, ai_generated) = match bank::question_at(index) {
            Some(q) => (
                IssuedQuestion {
                    id: q.id.to_string(),
                    text: q.text.to_string(),
                    category: q.category,
                },
                false,
            ),
            // Unreachable under correct sequencing; recovered via the
            // generation collaborator rather than corrupting the order.
            None => (self.generate_question(&state).await?, true),
        };

        state.asked_question_ids.insert(question.id.clone());
        state.question_order.push(question.id.clone());
        state.current_question_index = state.question_order.len();
        state.touch(now);
        self.persist(token, &state).await;

        debug!("issued question {} to session {token}", question.id);

        let remaining = BANK_SIZE.saturating_sub(state.questions_asked());
        Ok(NextQuestion::Issued {
            question,
            remaining,
            ai_generated,
        })
    }

    async fn generate_question(&self, state: &SessionState) -> Result<IssuedQuestion, ApiError> {
        let technical_asked = state
            .asked_question_ids
            .iter()
            .filter(|id| {
                bank::find(id).is_some_and(|q| q.category == QuestionCategory::Technical)
            })
            .count();
        let ctx = GenerationContext {
            questions_asked: state.questions_asked(),
            technical_asked,
            soft_asked: state.questions_asked() - technical_asked,
        };

        let generated = match &self.generator {
            Some(generator) => match generator.generate(&ctx).await {
                Ok(q) => q,
                Err(_) => fallback_question(),
            },
            None => fallback_question(),
        };

        // The fallback is a single fixed question; a session that already
        // holds its id has nowhere left to go.
        if state.asked_question_ids.contains(&generated.id) {
            return Err(ApiError::BankExhausted);
        }

        Ok(IssuedQuestion {
            id: generated.id,
            text: generated.text,
            category: generated.category,
        })
    }

    /// Records an answer for a previously issued, not-yet-answered question.
    pub async fn submit_answer(
        &self,
        token: &str,
        question_id: &str,
        answer: &str,
    ) -> Result<AnswerReceipt, ApiError> {
        let handle = self.session_handle(token).await?;
        let mut state = handle.lock().await;
        let now = Utc::now();

        if state.is_expired(now) {
            return Err(ApiError::Expired);
        }
        if state.completed {
            return Err(ApiError::AlreadyCompleted);
        }
        if !state.asked_question_ids.contains(question_id) {
            return Err(ApiError::QuestionNotIssued(question_id.to_string()));
        }
        if state.answers.contains_key(question_id) {
            return Err(ApiError::DuplicateAnswer(question_id.to_string()));
        }
        if answer.is_empty() {
            return Err(ApiError::InvalidAnswer("answer text is empty".to_string()));
        }
        if answer.trim().chars().count() < MIN_ANSWER_CHARS {
            return Err(ApiError::InvalidAnswer(format!(
                "answer must be at least {MIN_ANSWER_CHARS} characters"
            )));
        }

        state
            .answers
            .insert(question_id.to_string(), answer.to_string());
        state.raw_answer_log.push(RawAnswer {
            question_id: question_id.to_string(),
            answer: answer.to_string(),
        });
        state.touch(now);
        self.persist(token, &state).await;

        debug!(
            "saved answer for question {question_id} in session {token} ({} answered)",
            state.questions_answered()
        );

        Ok(AnswerReceipt {
            answers_saved: state.questions_answered(),
            remaining: BANK_SIZE.saturating_sub(state.questions_answered()),
        })
    }

    /// Marks the session completed. Monotonic: repeated calls keep the flag
    /// set and never report an error.
    pub async fn complete(&self, token: &str) -> Result<(), ApiError> {
        let handle = self.session_handle(token).await?;
        let mut state = handle.lock().await;
        let now = Utc::now();

        if state.is_expired(now) {
            return Err(ApiError::Expired);
        }

        state.completed = true;
        state.touch(now);
        self.persist(token, &state).await;

        info!("session {token} completed");
        Ok(())
    }

    pub async fn status(&self, token: &str) -> Result<SessionStatus, ApiError> {
        let handle = self.session_handle(token).await?;
        let state = handle.lock().await;

        if state.is_expired(Utc::now()) {
            return Err(ApiError::Expired);
        }

        Ok(SessionStatus {
            created_at: state.created_at,
            completed: state.completed,
            questions_answered: state.questions_answered(),
            questions_asked: state.questions_asked(),
            total_questions: BANK_SIZE,
            current_performance: report::performance_score(&state),
        })
    }

    pub async fn glyph(&self, token: &str) -> Result<Glyph, ApiError> {
        let handle = self.session_handle(token).await?;
        let state = handle.lock().await;

        if state.is_expired(Utc::now()) {
            return Err(ApiError::Expired);
        }

        Ok(report::classify(&state))
    }

    pub async fn summary(&self, token: &str) -> Result<String, ApiError> {
        let handle = self.session_handle(token).await?;
        let state = handle.lock().await;
        let now = Utc::now();

        if state.is_expired(now) {
            return Err(ApiError::Expired);
        }

        Ok(report::summary_report(&state, now))
    }

    pub async fn result(&self, token: &str) -> Result<InterviewResult, ApiError> {
        let handle = self.session_handle(token).await?;
        let state = handle.lock().await;
        let now = Utc::now();

        let total_time = (now - state.created_at).num_seconds();
        let answered = state.questions_answered();

        Ok(InterviewResult {
            session_id: token.to_string(),
            total_time_seconds: total_time,
            questions_answered: answered,
            completion_rate: answered as f64 / BANK_SIZE as f64 * 100.0,
            average_time_per_question: if answered > 0 {
                total_time / answered as i64
            } else {
                0
            },
            performance_score: report::performance_score(&state),
            created_at: state.created_at,
            completed_at: now,
        })
    }

    /// Process-wide counters over the live session registry.
    pub async fn stats(&self) -> ServiceStats {
        let handles: Vec<SessionHandle> = self.sessions.read().await.values().cloned().collect();

        let mut answers = 0usize;
        let mut score_sum = 0u64;
        for handle in &handles {
            let state = handle.lock().await;
            answers += state.questions_answered();
            score_sum += u64::from(report::performance_score(&state));
        }

        let avg_score = if handles.is_empty() {
            0
        } else {
            (score_sum / handles.len() as u64) as u32
        };

        ServiceStats {
            sessions: handles.len(),
            answers,
            avg_score,
        }
    }

    pub async fn session_summaries(&self) -> Vec<SessionSummary> {
        let entries: Vec<(String, SessionHandle)> = self
            .sessions
            .read()
            .await
            .iter()
            .map(|(token, handle)| (token.clone(), handle.clone()))
            .collect();

        let mut summaries = Vec::with_capacity(entries.len());
        for (token, handle) in entries {
            let state = handle.lock().await;
            summaries.push(SessionSummary {
                token,
                created_at: state.created_at,
                last_activity: state.last_activity,
                completed: state.completed,
                answers: state.questions_answered(),
                questions_asked: state.questions_asked(),
            });
        }
        summaries
    }

    /// Administrative removal. Idempotent: deleting an unknown token is not
    /// an error.
    pub async fn delete_session(&self, token: &str) -> Result<(), ApiError> {
        self.sessions.write().await.remove(token);
        if let Some(store) = &self.store {
            if let Err(e) = store.delete(token).await {
                warn!("failed to delete session {token} from store: {e}");
            }
        }
        info!("deleted session {token}");
        Ok(())
    }

    /// Registry lookup with a store-backed miss path. A store read failure
    /// is logged and treated as absent.
    async fn session_handle(&self, token: &str) -> Result<SessionHandle, ApiError> {
        if let Some(handle) = self.sessions.read().await.get(token) {
            return Ok(handle.clone());
        }

        let Some(store) = &self.store else {
            return Err(ApiError::SessionNotFound);
        };
        let loaded = match store.load(token).await {
            Ok(state) => state,
            Err(e) => {
                warn!("failed to load session {token} from store: {e}");
                None
            }
        };
        let Some(state) = loaded else {
            return Err(ApiError::SessionNotFound);
        };

        let mut sessions = self.sessions.write().await;
        // A concurrent request may have populated the entry while we were
        // reading the store.
        let handle = sessions
            .entry(token.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(state)))
            .clone();
        Ok(handle)
    }

    /// Best-effort durable write. The in-memory copy stays authoritative: a
    /// store failure is logged, never propagated.
    async fn persist(&self, token: &str, state: &SessionState) {
        if let Some(store) = &self.store {
            if let Err(e) = store.save(token, state).await {
                warn!("failed to persist session {token}: {e}");
            }
        }
    }
}
