//! Questions View

use serde::{Deserialize, Serialize};

use crate::store::Question;

/// A question with its 1-based position
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionItem {
    pub index: usize,
    pub text: String,
}

/// Render model of the questions section
#[derive(Debug, Clone, Serialize)]
pub struct QuestionsView {
    pub items: Vec<QuestionItem>,
}

impl QuestionsView {
    pub fn build(questions: &[Question]) -> Self {
        let items = questions
            .iter()
            .enumerate()
            .map(|(i, q)| QuestionItem {
                index: i + 1,
                text: q.text.clone(),
            })
            .collect();

        Self { items }
    }
}

/// Form body of the add-question form
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuestionSubmission {
    #[serde(default)]
    pub question: String,
}

impl QuestionSubmission {
    /// Text to append as one line, `None` if there is nothing to store
    pub fn into_line(self) -> Option<String> {
        if self.question.trim().is_empty() {
            return None;
        }
        Some(self.question.replace(['\r', '\n'], " "))
    }
}
