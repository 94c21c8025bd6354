use crate::models;
use serde::{Deserialize, Serialize};
use serde_valid::Validate;
use sqlx::types::Json;

#[derive(Serialize, Deserialize, Debug, Validate)]
pub struct Quiz {
    #[validate(min_length = 1)]
    #[validate(max_length = 200)]
    pub title: String,
    #[validate(minimum = 0)]
    #[validate(maximum = 100)]
    pub pass_percentage: Option<i32>,
    #[validate(min_items = 1)]
    #[validate]
    pub questions: Vec<Question>,
}

#[derive(Serialize, Deserialize, Debug, Validate)]
pub struct Question {
    #[validate(min_length = 1)]
    #[validate(max_length = 2000)]
    pub prompt: String,
    #[validate(min_items = 2)]
    #[validate(max_items = 10)]
    pub options: Vec<String>,
    #[validate(minimum = 0)]
    pub correct_option: i32,
}

impl Quiz {
    /// Checks that cannot be expressed as field attributes.
    pub fn check(&self) -> Result<(), String> {
        for (idx, question) in self.questions.iter().enumerate() {
            if question.correct_option as usize >= question.options.len() {
                return Err(format!(
                    "question {}: correct_option {} is out of range",
                    idx + 1,
                    question.correct_option
                ));
            }
            if question.options.iter().any(|o| o.trim().is_empty()) {
                return Err(format!("question {}: options must not be empty", idx + 1));
            }
        }
        Ok(())
    }

    pub fn into_models(self, course_id: i32) -> (models::Quiz, Vec<models::QuizQuestion>) {
        let mut quiz = models::Quiz::default();
        quiz.course_id = course_id;
        quiz.title = self.title.trim().to_string();
        quiz.pass_percentage = self.pass_percentage.unwrap_or(60);
        quiz.created_at = chrono::Utc::now();
        quiz.updated_at = chrono::Utc::now();

        let questions = self
            .questions
            .into_iter()
            .enumerate()
            .map(|(position, q)| models::QuizQuestion {
                id: 0,
                quiz_id: 0,
                prompt: q.prompt,
                options: Json(q.options),
                correct_option: q.correct_option,
                position: position as i32,
            })
            .collect();

        (quiz, questions)
    }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct Attempt {
    /// One entry per question in order; `null` for unanswered.
    pub answers: Vec<Option<i32>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(options: &[&str], correct_option: i32) -> Question {
        Question {
            prompt: "Which?".to_string(),
            options: options.iter().map(|o| o.to_string()).collect(),
            correct_option,
        }
    }

    #[test]
    fn single_option_question_is_invalid() {
        let form = Quiz {
            title: "Basics".to_string(),
            pass_percentage: None,
            questions: vec![question(&["only"], 0)],
        };
        assert!(form.validate().is_err());
    }

    #[test]
    fn correct_option_must_point_at_an_option() {
        let form = Quiz {
            title: "Basics".to_string(),
            pass_percentage: Some(50),
            questions: vec![question(&["a", "b"], 2)],
        };
        assert!(form.validate().is_ok());
        assert!(form.check().is_err());
    }

    #[test]
    fn questions_keep_their_order() {
        let form = Quiz {
            title: "Basics".to_string(),
            pass_percentage: None,
            questions: vec![question(&["a", "b"], 0), question(&["c", "d"], 1)],
        };
        assert!(form.check().is_ok());
        let (quiz, questions) = form.into_models(4);
        assert_eq!(quiz.course_id, 4);
        assert_eq!(quiz.pass_percentage, 60);
        assert_eq!(questions[1].position, 1);
        assert_eq!(questions[1].correct_option, 1);
    }
}
