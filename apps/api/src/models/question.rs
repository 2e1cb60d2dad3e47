use serde::{Deserialize, Serialize};

/// Category tag carried by every interview question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionCategory {
    Technical,
    Soft,
}

impl QuestionCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            QuestionCategory::Technical => "technical",
            QuestionCategory::Soft => "soft",
        }
    }
}

/// A fixed question from the static bank. The bank is compiled in, so all
/// fields borrow from the binary.
#[derive(Debug, Clone, Copy)]
pub struct BankQuestion {
    pub id: &'static str,
    pub text: &'static str,
    pub category: QuestionCategory,
    /// Matched case-insensitively against answer text when scoring relevance.
    pub keywords: &'static [&'static str],
}

/// A question produced by the generation collaborator when the fixed bank
/// cannot serve the request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedQuestion {
    pub id: String,
    pub text: String,
    pub category: QuestionCategory,
    pub keywords: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&QuestionCategory::Technical).unwrap(),
            "\"technical\""
        );
        assert_eq!(
            serde_json::to_string(&QuestionCategory::Soft).unwrap(),
            "\"soft\""
        );
    }

    #[test]
    fn test_category_as_str_matches_serde() {
        for category in [QuestionCategory::Technical, QuestionCategory::Soft] {
            let json = serde_json::to_string(&category).unwrap();
            assert_eq!(json.trim_matches('"'), category.as_str());
        }
    }
}
