use crate::models::question::{BankQuestion, QuestionCategory};

/// Number of questions every interview runs through. Also the completion
/// denominator for performance scoring.
pub const BANK_SIZE: usize = 10;

/// The fixed question pool, issued strictly in declaration order.
const BANK: [BankQuestion; BANK_SIZE] = [
    BankQuestion {
        id: "q_1",
        text: "Tell us about yourself and your professional experience. \
               Which skills and achievements do you consider most important?",
        category: QuestionCategory::Technical,
        keywords: &["skills", "experience", "achievements", "professional"],
    },
    BankQuestion {
        id: "q_2",
        text: "Describe your ideal working day. What would you do and how would you feel?",
        category: QuestionCategory::Soft,
        keywords: &["motivation", "ideal", "comfort", "working day"],
    },
    BankQuestion {
        id: "q_3",
        text: "Tell us about a time you had to solve a difficult problem. \
               How did you approach the solution?",
        category: QuestionCategory::Technical,
        keywords: &["problem", "solution", "analysis", "approach"],
    },
    BankQuestion {
        id: "q_4",
        text: "How do you cope with stress and pressure at work? Give a concrete example.",
        category: QuestionCategory::Soft,
        keywords: &["stress", "pressure", "example", "cope"],
    },
    BankQuestion {
        id: "q_5",
        text: "Tell us about your experience working in a team. \
               What role do you usually play in a group?",
        category: QuestionCategory::Soft,
        keywords: &["team", "role", "collaboration", "colleagues"],
    },
    BankQuestion {
        id: "q_6",
        text: "Which technologies, methods or skills have you picked up over the past year? \
               What do you plan to learn next?",
        category: QuestionCategory::Technical,
        keywords: &["technologies", "learning", "plans", "growth"],
    },
    BankQuestion {
        id: "q_7",
        text: "Describe a situation where you had to adapt to serious changes. \
               How did you handle it?",
        category: QuestionCategory::Soft,
        keywords: &["adaptation", "changes", "flexibility", "adjust"],
    },
    BankQuestion {
        id: "q_8",
        text: "Tell us about your career goals. Where do you see yourself in two to three years?",
        category: QuestionCategory::Soft,
        keywords: &["career", "goals", "plans", "future"],
    },
    BankQuestion {
        id: "q_9",
        text: "What motivates you most at work? What gives you energy for professional growth?",
        category: QuestionCategory::Soft,
        keywords: &["motivation", "energy", "growth", "drive"],
    },
    BankQuestion {
        id: "q_10",
        text: "Why are you interested in working at our company? \
               What contribution do you want to make?",
        category: QuestionCategory::Soft,
        keywords: &["interest", "company", "contribution", "value"],
    },
];

pub fn question_at(index: usize) -> Option<&'static BankQuestion> {
    BANK.get(index)
}

pub fn find(id: &str) -> Option<&'static BankQuestion> {
    BANK.iter().find(|q| q.id == id)
}

pub fn all() -> &'static [BankQuestion] {
    &BANK
}
