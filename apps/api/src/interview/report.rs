//! Performance aggregation — turns a session's recorded answers into a
//! single score, a glyph classification, and a recruiter-facing summary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::interview::analysis::{analyze_answer, QualityReport};
use crate::interview::bank::{self, BANK_SIZE};
use crate::models::question::QuestionCategory;
use crate::models::session::SessionState;

/// Categorical performance tier plus narrative profile.
#[derive(Debug, Clone, Serialize)]
pub struct Glyph {
    pub glyph: String,
    pub profile: String,
}

/// Quality reports for every answer whose question resolves in the bank,
/// scored against that question's keywords. Answers to generated questions
/// have no keyword set on record and are left out.
fn scored_answers(state: &SessionState) -> Vec<QualityReport> {
    state
        .answers
        .iter()
        .filter_map(|(question_id, answer)| {
            bank::find(question_id).map(|q| analyze_answer(answer, q.keywords))
        })
        .collect()
}

fn average_quality(reports: &[QualityReport]) -> f64 {
    if reports.is_empty() {
        return 0.0;
    }
    reports.iter().map(|r| f64::from(r.score)).sum::<f64>() / reports.len() as f64
}

fn answered_category_counts(state: &SessionState) -> (usize, usize) {
    let technical = state
        .answers
        .keys()
        .filter(|id| {
            bank::find(id).is_some_and(|q| q.category == QuestionCategory::Technical)
        })
        .count();
    (technical, state.answers.len() - technical)
}

/// Aggregate performance score for a session: average answer quality plus a
/// completion bonus of `(answered / 10) * 20`, clamped to `[0, 100]`.
/// Zero when nothing has been answered.
pub fn performance_score(state: &SessionState) -> u32 {
    let reports = scored_answers(state);
    if reports.is_empty() {
        return 0;
    }

    let avg_quality = average_quality(&reports);
    let completion_bonus = (reports.len() as f64 / BANK_SIZE as f64) * 20.0;

    (avg_quality + completion_bonus).clamp(0.0, 100.0) as u32
}

/// Buckets average answer quality into four tiers (80/65/50) and builds the
/// narrative profile from completion rate, category counts and the average.
pub fn classify(state: &SessionState) -> Glyph {
    if state.answers.is_empty() {
        return Glyph {
            glyph: "🚀 Starter-Potential".to_string(),
            profile: "The candidate has only just begun the interview. \
                      Not enough data yet for a full assessment."
                .to_string(),
        };
    }

    let reports = scored_answers(state);
    let avg_quality = average_quality(&reports);
    let completion_rate = state.answers.len() as f64 / BANK_SIZE as f64 * 100.0;
    let (technical, soft) = answered_category_counts(state);

    let (glyph, opening) = if avg_quality >= 80.0 {
        (
            "🎯 Master-Leader",
            format!(
                "An exceptional candidate with outstanding skills. \
                 Average quality score: {avg_quality:.1}/100. \
                 Shows deep understanding of the questions and a high level of \
                 professional maturity. Ready for leadership positions and complex tasks."
            ),
        )
    } else if avg_quality >= 65.0 {
        (
            "⚡ Expert-Driver",
            format!(
                "A strong candidate with good professional skills. \
                 Average quality score: {avg_quality:.1}/100. \
                 Demonstrates analytical thinking and works through complex tasks \
                 effectively, alone or in a team."
            ),
        )
    } else if avg_quality >= 50.0 {
        (
            "🌟 Rising-Potential",
            format!(
                "A promising candidate with good potential. \
                 Average quality score: {avg_quality:.1}/100. \
                 Shows solid baseline skills and motivation to grow. \
                 A good match for positions with room to develop."
            ),
        )
    } else {
        (
            "🚀 Starter-Enthusiast",
            format!(
                "A candidate at an early stage of development. \
                 Average quality score: {avg_quality:.1}/100. \
                 Shows enthusiasm and willingness to learn. \
                 Recommended for junior positions with mentoring support."
            ),
        )
    };

    let profile = format!(
        "{opening}\n\n\
         Analysis details:\n\
         - Completion: {completion_rate:.1}% ({answered}/{BANK_SIZE})\n\
         - Technical questions: {technical}, soft skills: {soft}\n\
         - Average answer quality: {avg_quality:.1}/100",
        answered = state.answers.len(),
    );

    Glyph {
        glyph: glyph.to_string(),
        profile,
    }
}

/// Recruiter-facing summary of a full session.
pub fn summary_report(state: &SessionState, now: DateTime<Utc>) -> String {
    let total_answers = state.answers.len();
    if total_answers == 0 {
        return "Interview analysis started. Answer the questions to receive a detailed report."
            .to_string();
    }

    let reports = scored_answers(state);
    let avg_quality = average_quality(&reports);
    let score = performance_score(state);
    let minutes = (now - state.created_at).num_minutes();
    let with_examples = reports.iter().filter(|r| r.has_examples).count();
    let avg_relevance = if reports.is_empty() {
        0.0
    } else {
        reports.iter().map(|r| r.keyword_ratio).sum::<f64>() / reports.len() as f64 * 100.0
    };

    let (quality_level, recommendation) = if avg_quality >= 80.0 {
        ("excellent", "Strongly recommended for hire")
    } else if avg_quality >= 65.0 {
        ("strong", "Recommended for hire")
    } else if avg_quality >= 50.0 {
        ("good", "Suitable for consideration")
    } else {
        ("basic", "A follow-up interview is recommended")
    };

    format!(
        "Interview summary\n\n\
         Overall:\n\
         - Answered {total_answers} of {BANK_SIZE} questions ({completion:.1}%)\n\
         - Interview duration: {minutes} minutes\n\
         - Performance score: {score}/100\n\n\
         Answer quality:\n\
         - Quality level: {quality_level}\n\
         - Average quality score: {avg_quality:.1}/100\n\
         - Answers with examples: {with_examples}/{total_answers}\n\
         - Average keyword relevance: {avg_relevance:.1}%\n\n\
         Assessment: {recommendation}",
        completion = total_answers as f64 / BANK_SIZE as f64 * 100.0,
    )
}

/// Answer record accepted by the legacy, token-less glyph endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct LegacyAnswerRecord {
    #[serde(default)]
    pub answer: String,
}

/// Legacy classifier retained for token-less callers: buckets mean answer
/// character length into three coarse labels. Not to be confused with the
/// per-session scorer above.
pub fn legacy_classify(records: &[LegacyAnswerRecord]) -> Glyph {
    if records.is_empty() {
        return Glyph {
            glyph: "🚀 Starter-Enthusiast".to_string(),
            profile: "Not enough data for an assessment.".to_string(),
        };
    }

    let avg_len = records
        .iter()
        .map(|r| r.answer.chars().count())
        .sum::<usize>() as f64
        / records.len() as f64;

    if avg_len > 100.0 {
        Glyph {
            glyph: "🎯 Leader-Analyst".to_string(),
            profile: "The candidate showed excellent analytical ability and depth of thought."
                .to_string(),
        }
    } else if avg_len > 50.0 {
        Glyph {
            glyph: "⚡ Rising-Potential".to_string(),
            profile: "The candidate demonstrates good potential and communication skills."
                .to_string(),
        }
    } else {
        Glyph {
            glyph: "🚀 Starter-Enthusiast".to_string(),
            profile: "The candidate showed baseline skills and motivation to develop.".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interview::bank;

    fn make_session(pairs: &[(&str, &str)]) -> SessionState {
        let mut state = SessionState::new(Utc::now());
        for (question_id, answer) in pairs {
            state.asked_question_ids.insert(question_id.to_string());
            state.question_order.push(question_id.to_string());
            state.answers.insert(question_id.to_string(), answer.to_string());
        }
        state.current_question_index = state.question_order.len();
        state
    }

    /// 50+ words, full keyword coverage, an example marker, a specificity
    /// marker and three sentences: analyzer score 95.
    fn strong_answer(keywords: &[&str]) -> String {
        let mut text = format!(
            "For example, in my previous position I worked with {} every single day. ",
            keywords.join(" and ")
        );
        while text.split_whitespace().count() < 50 {
            text.push_str("I kept improving the outcome step by step. ");
        }
        text.push_str("Specifically, the results were measurable.");
        text
    }

    /// 20+ words, full keyword coverage, an example marker, one sentence:
    /// analyzer score 65.
    fn mid_answer(keywords: &[&str]) -> String {
        format!(
            "For example I combined {} while delivering steady measurable outcomes \
             across several projects and teams over the last few years.",
            keywords.join(" and ")
        )
    }

    #[test]
    fn test_performance_score_zero_without_answers() {
        let state = make_session(&[]);
        assert_eq!(performance_score(&state), 0);
    }

    #[test]
    fn test_performance_score_adds_completion_bonus() {
        let q = bank::find("q_1").unwrap();
        let answer = strong_answer(q.keywords);
        let quality = analyze_answer(&answer, q.keywords).score;

        let state = make_session(&[("q_1", answer.as_str())]);
        // one answer of ten: bonus is 2
        assert_eq!(performance_score(&state), quality + 2);
    }

    #[test]
    fn test_performance_score_caps_at_one_hundred() {
        let pairs: Vec<(&str, String)> = bank::all()
            .iter()
            .map(|q| (q.id, strong_answer(q.keywords)))
            .collect();
        let borrowed: Vec<(&str, &str)> =
            pairs.iter().map(|(id, a)| (*id, a.as_str())).collect();
        let state = make_session(&borrowed);
        assert_eq!(performance_score(&state), 100);
    }

    #[test]
    fn test_completion_bonus_grows_with_answer_count() {
        let q1 = bank::find("q_1").unwrap();
        let q3 = bank::find("q_3").unwrap();
        let one = make_session(&[("q_1", &strong_answer(q1.keywords))]);
        let two = make_session(&[
            ("q_1", &strong_answer(q1.keywords)),
            ("q_3", &strong_answer(q3.keywords)),
        ]);
        assert!(performance_score(&two) >= performance_score(&one));
    }

    #[test]
    fn test_classify_empty_session_is_starter() {
        let glyph = classify(&make_session(&[]));
        assert!(glyph.glyph.contains("Starter-Potential"));
    }

    #[test]
    fn test_classify_top_tier() {
        let q = bank::find("q_1").unwrap();
        let state = make_session(&[("q_1", &strong_answer(q.keywords))]);
        let glyph = classify(&state);
        assert!(glyph.glyph.contains("Master-Leader"), "got {}", glyph.glyph);
        assert!(glyph.profile.contains("95.0/100"));
    }

    #[test]
    fn test_classify_strong_tier_at_boundary() {
        let q = bank::find("q_1").unwrap();
        let answer = mid_answer(q.keywords);
        assert_eq!(analyze_answer(&answer, q.keywords).score, 65);

        let state = make_session(&[("q_1", answer.as_str())]);
        let glyph = classify(&state);
        assert!(glyph.glyph.contains("Expert-Driver"), "got {}", glyph.glyph);
    }

    #[test]
    fn test_classify_entry_tier_for_weak_answers() {
        let state = make_session(&[("q_1", "I worked with computers for about six years in total")]);
        let glyph = classify(&state);
        assert!(
            glyph.glyph.contains("Starter-Enthusiast"),
            "got {}",
            glyph.glyph
        );
    }

    #[test]
    fn test_classify_reports_category_split() {
        let q1 = bank::find("q_1").unwrap();
        let q2 = bank::find("q_2").unwrap();
        let state = make_session(&[
            ("q_1", &strong_answer(q1.keywords)),
            ("q_2", &strong_answer(q2.keywords)),
        ]);
        let glyph = classify(&state);
        assert!(glyph.profile.contains("Technical questions: 1, soft skills: 1"));
    }

    #[test]
    fn test_summary_reports_score_and_counts() {
        let q = bank::find("q_1").unwrap();
        let state = make_session(&[("q_1", &strong_answer(q.keywords))]);
        let summary = summary_report(&state, Utc::now());
        assert!(summary.contains("Answered 1 of 10 questions"));
        assert!(summary.contains("/100"));
        assert!(summary.contains("Strongly recommended for hire"));
    }

    #[test]
    fn test_summary_for_fresh_session() {
        let summary = summary_report(&make_session(&[]), Utc::now());
        assert!(summary.contains("Interview analysis started"));
    }

    #[test]
    fn test_legacy_classifier_buckets_by_length() {
        let record = |len: usize| LegacyAnswerRecord {
            answer: "x".repeat(len),
        };
        assert!(legacy_classify(&[record(150)]).glyph.contains("Leader-Analyst"));
        assert!(legacy_classify(&[record(80)]).glyph.contains("Rising-Potential"));
        assert!(legacy_classify(&[record(20)]).glyph.contains("Starter-Enthusiast"));
        assert!(legacy_classify(&[]).glyph.contains("Starter-Enthusiast"));
    }

    #[test]
    fn test_legacy_classifier_uses_mean_length() {
        let records = vec![
            LegacyAnswerRecord {
                answer: "x".repeat(200),
            },
            LegacyAnswerRecord {
                answer: "x".repeat(10),
            },
        ];
        // mean 105: top bucket
        assert!(legacy_classify(&records).glyph.contains("Leader-Analyst"));
    }
}
