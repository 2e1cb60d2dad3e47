//! Answer quality analysis — a deterministic heuristic over lexical
//! features. No external calls; the same text and keywords always produce
//! the same report.

use serde::Serialize;

/// Tokens that signal the candidate backed the answer with an example.
const EXAMPLE_MARKERS: &[&str] = &["for example", "instance", "case", "situation"];

/// Tokens that signal the candidate was specific rather than vague.
const SPECIFICITY_MARKERS: &[&str] = &["specifically", "exactly", "precisely"];

/// Scoring breakdown for a single answer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QualityReport {
    /// Final quality score, 0 to 100.
    pub score: u32,
    pub word_count: usize,
    pub sentence_count: usize,
    pub keyword_matches: usize,
    pub keyword_ratio: f64,
    pub has_examples: bool,
    pub has_specifics: bool,
    /// Set when the input was empty or whitespace; everything else is zeroed.
    pub empty: bool,
}

impl QualityReport {
    fn empty_answer() -> Self {
        Self {
            score: 0,
            word_count: 0,
            sentence_count: 0,
            keyword_matches: 0,
            keyword_ratio: 0.0,
            has_examples: false,
            has_specifics: false,
            empty: true,
        }
    }
}

/// Scores a free-text answer against a question's keyword set.
///
/// The components and their exact thresholds are the contract:
/// - length: 50+ words +30, 20+ words +20, 10+ words +10
/// - relevance: `min(30, keyword_ratio * 100)` when keywords are supplied,
///   otherwise `min(30, word_count)` as a length proxy
/// - structure: any example marker +15, any specificity marker +10
/// - sentences: 3+ gives +10, exactly 2 gives +5
/// - answers under 5 words are clamped to at most 10
pub fn analyze_answer(answer: &str, keywords: &[&str]) -> QualityReport {
    if answer.trim().is_empty() {
        return QualityReport::empty_answer();
    }

    let lower = answer.to_lowercase();
    let word_count = answer.split_whitespace().count();
    let sentence_count = answer
        .split('.')
        .filter(|segment| !segment.trim().is_empty())
        .count();

    let (keyword_matches, keyword_ratio) = if keywords.is_empty() {
        (0, 0.0)
    } else {
        let matches = keywords
            .iter()
            .filter(|keyword| lower.contains(&keyword.to_lowercase()))
            .count();
        (matches, matches as f64 / keywords.len() as f64)
    };

    let has_examples = EXAMPLE_MARKERS.iter().any(|m| lower.contains(m));
    let has_specifics = SPECIFICITY_MARKERS.iter().any(|m| lower.contains(m));

    let mut score: f64 = if word_count >= 50 {
        30.0
    } else if word_count >= 20 {
        20.0
    } else if word_count >= 10 {
        10.0
    } else {
        0.0
    };

    if keywords.is_empty() {
        score += (word_count as f64 / 100.0 * 100.0).min(30.0);
    } else {
        score += (keyword_ratio * 100.0).min(30.0);
    }

    if has_examples {
        score += 15.0;
    }
    if has_specifics {
        score += 10.0;
    }

    if sentence_count >= 3 {
        score += 10.0;
    } else if sentence_count == 2 {
        score += 5.0;
    }

    // One-liners never score well no matter how many markers they hit.
    if word_count < 5 {
        score = score.min(10.0);
    }

    QualityReport {
        score: score.clamp(0.0, 100.0) as u32,
        word_count,
        sentence_count,
        keyword_matches,
        keyword_ratio,
        has_examples,
        has_specifics,
        empty: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_answer_scores_zero() {
        let report = analyze_answer("", &["team"]);
        assert_eq!(report.score, 0);
        assert!(report.empty);

        let report = analyze_answer("   \n\t ", &[]);
        assert_eq!(report.score, 0);
        assert!(report.empty);
    }

    #[test]
    fn test_one_word_answer_is_clamped() {
        let report = analyze_answer("Да", &[]);
        assert!(report.score <= 10, "score was {}", report.score);
        assert_eq!(report.word_count, 1);
        assert!(!report.empty);
    }

    #[test]
    fn test_marker_rich_short_answer_still_clamped() {
        // 4 words: markers alone must not rescue a one-liner
        let report = analyze_answer("Specifically, for example, precisely.", &[]);
        assert!(report.has_examples);
        assert!(report.has_specifics);
        assert!(report.score <= 10, "score was {}", report.score);
    }

    #[test]
    fn test_word_and_sentence_counting() {
        let report = analyze_answer("One two three. Four five. Six seven eight nine ten.", &[]);
        assert_eq!(report.word_count, 10);
        assert_eq!(report.sentence_count, 3);
    }

    #[test]
    fn test_trailing_dot_does_not_add_a_sentence() {
        let report = analyze_answer("First part here. Second part there.", &[]);
        assert_eq!(report.sentence_count, 2);
    }

    #[test]
    fn test_keyword_matching_is_case_insensitive_substring() {
        let report = analyze_answer(
            "I value TEAMWORK and my colleagues appreciate that attitude greatly.",
            &["team", "colleagues", "stress"],
        );
        assert_eq!(report.keyword_matches, 2);
        assert!((report.keyword_ratio - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_relevance_component_is_capped_at_thirty() {
        // 10 words, all keywords matched: 10 length + 30 relevance cap
        let report = analyze_answer(
            "My team and my role rely on daily collaboration together",
            &["team", "role", "collaboration"],
        );
        assert_eq!(report.keyword_matches, 3);
        assert_eq!(report.score, 40);
    }

    #[test]
    fn test_length_proxy_when_no_keywords() {
        // 12 words, no keywords: 10 length + 12 proxy
        let report = analyze_answer(
            "I spent twelve months building and operating services for a large retailer",
            &[],
        );
        assert_eq!(report.word_count, 12);
        assert_eq!(report.score, 22);
    }

    #[test]
    fn test_two_sentence_bonus_is_five() {
        // 10 words across 2 sentences, no keywords: 10 + 10 proxy + 5
        let report = analyze_answer("Five words are right here. Five more words follow now.", &[]);
        assert_eq!(report.sentence_count, 2);
        assert_eq!(report.score, 25);
    }

    #[test]
    fn test_long_relevant_structured_answer_scores_high() {
        let keywords = ["team", "role", "collaboration", "colleagues"];
        let mut text = String::from(
            "For example, my team trusted my role as coordinator and collaboration came naturally. ",
        );
        while text.split_whitespace().count() < 60 {
            text.push_str("We shipped useful software together every quarter without drama. ");
        }
        text.push_str("That is how we worked.");

        let report = analyze_answer(&text, &keywords);
        assert!(report.word_count >= 60);
        assert!(report.keyword_matches >= 3);
        assert!(report.has_examples);
        assert!(report.score >= 80, "score was {}", report.score);
    }

    #[test]
    fn test_score_never_exceeds_one_hundred() {
        let keywords = ["work"];
        let mut text = String::from("Specifically, for example, my work history covers many cases. ");
        while text.split_whitespace().count() < 120 {
            text.push_str("More detailed work stories follow here. ");
        }
        let report = analyze_answer(&text, &keywords);
        assert!(report.score <= 100);
    }

    #[test]
    fn test_partial_keyword_ratio_is_fractional() {
        let report = analyze_answer(
            "The problem needed a structured approach before anything else happened",
            &["problem", "solution", "analysis", "approach"],
        );
        assert_eq!(report.keyword_matches, 2);
        assert!((report.keyword_ratio - 0.5).abs() < 1e-9);
    }
}
