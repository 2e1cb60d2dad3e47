//! Admin surface: JSON session listings, stats and a CSV export. There is
//! deliberately no HTML view layer here.

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Serialize;

use crate::errors::ApiError;
use crate::interview::service::SessionSummary;
use crate::state::AppState;

/// GET /admin/sessions
pub async fn handle_list_sessions(State(state): State<AppState>) -> Json<Vec<SessionSummary>> {
    Json(state.interviews.session_summaries().await)
}

#[derive(Serialize)]
pub struct AdminStats {
    pub total: usize,
    pub completed: usize,
    pub active: usize,
    pub total_answers: usize,
}

/// GET /admin/stats
pub async fn handle_admin_stats(State(state): State<AppState>) -> Json<AdminStats> {
    let summaries = state.interviews.session_summaries().await;
    let completed = summaries.iter().filter(|s| s.completed).count();

    Json(AdminStats {
        total: summaries.len(),
        completed,
        active: summaries.len() - completed,
        total_answers: summaries.iter().map(|s| s.answers).sum(),
    })
}

/// DELETE /admin/sessions/:token
pub async fn handle_delete_session(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.interviews.delete_session(&token).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /admin/export/sessions
/// Streams the session listing as a CSV download.
pub async fn handle_export_sessions(State(state): State<AppState>) -> impl IntoResponse {
    let summaries = state.interviews.session_summaries().await;
    (
        [
            (header::CONTENT_TYPE, "text/csv"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=sessions.csv",
            ),
        ],
        sessions_csv(&summaries),
    )
}

fn sessions_csv(summaries: &[SessionSummary]) -> String {
    let mut csv =
        String::from("token,created_at,last_activity,completed,questions_asked,answers\n");
    for s in summaries {
        csv.push_str(&format!(
            "{},{},{},{},{},{}\n",
            s.token,
            s.created_at.to_rfc3339(),
            s.last_activity.to_rfc3339(),
            s.completed,
            s.questions_asked,
            s.answers,
        ));
    }
    csv
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_csv_has_header_and_one_row_per_session() {
        let now = Utc::now();
        let summaries = vec![SessionSummary {
            token: "abc".to_string(),
            created_at: now,
            last_activity: now,
            completed: true,
            answers: 4,
            questions_asked: 6,
        }];

        let csv = sessions_csv(&summaries);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("token,"));
        assert!(lines[1].starts_with("abc,"));
        assert!(lines[1].ends_with(",true,6,4"));
    }

    #[test]
    fn test_csv_with_no_sessions_is_header_only() {
        assert_eq!(sessions_csv(&[]).lines().count(), 1);
    }
}
