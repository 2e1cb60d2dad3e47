//! Prompts for the question generation collaborator.

use crate::models::question::QuestionCategory;

pub const SYSTEM: &str = "You are an experienced HR specialist conducting a structured interview. \
     Respond with valid JSON only.";

pub fn build_question_prompt(category: QuestionCategory, questions_asked: usize) -> String {
    format!(
        "Generate one professional interview question for a candidate.\n\n\
         Question category: {category}\n\
         Questions already asked: {questions_asked}\n\n\
         The question must be open-ended, relevant to the category, and not a \
         repeat of a standard screening question.\n\n\
         Return JSON in exactly this shape:\n\
         {{\"text\": \"the question\", \"category\": \"{category}\", \
         \"keywords\": [\"keywords\", \"for\", \"relevance\", \"scoring\"]}}",
        category = category.as_str(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_names_the_requested_category() {
        let prompt = build_question_prompt(QuestionCategory::Technical, 4);
        assert!(prompt.contains("technical"));
        assert!(prompt.contains("Questions already asked: 4"));
    }
}
