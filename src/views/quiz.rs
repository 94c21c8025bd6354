use crate::models;
use serde::Serialize;

/// Question without its answer.
#[derive(Debug, Serialize, Default)]
pub struct Question {
    pub id: i32,
    pub prompt: String,
    pub options: Vec<String>,
}

impl From<models::QuizQuestion> for Question {
    fn from(question: models::QuizQuestion) -> Self {
        Self {
            id: question.id,
            prompt: question.prompt,
            options: question.options.0,
        }
    }
}

#[derive(Debug, Serialize, Default)]
pub struct Quiz {
    pub id: i32,
    pub course_id: i32,
    pub title: String,
    pub pass_percentage: i32,
    pub questions: Vec<Question>,
}

impl Quiz {
    pub fn new(quiz: models::Quiz, questions: Vec<models::QuizQuestion>) -> Self {
        Self {
            id: quiz.id,
            course_id: quiz.course_id,
            title: quiz.title,
            pass_percentage: quiz.pass_percentage,
            questions: questions.into_iter().map(Into::into).collect(),
        }
    }
}
