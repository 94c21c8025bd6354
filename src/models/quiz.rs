use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Quiz {
    pub id: i32,
    pub course_id: i32,
    pub title: String,
    pub pass_percentage: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct QuizQuestion {
    pub id: i32,
    pub quiz_id: i32,
    pub prompt: String,
    pub options: Json<Vec<String>>,
    pub correct_option: i32,
    pub position: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct QuizAttempt {
    pub id: i32,
    pub quiz_id: i32,
    pub user_id: i32,
    pub score: i32,
    pub total: i32,
    pub passed: bool,
    pub created_at: DateTime<Utc>,
}

/// Scores answers positionally against the questions. Missing or
/// out-of-range answers count as wrong; extra answers are ignored.
pub fn grade(questions: &[QuizQuestion], answers: &[Option<i32>]) -> (i32, i32) {
    let score = questions
        .iter()
        .enumerate()
        .filter(|(idx, question)| {
            answers
                .get(*idx)
                .copied()
                .flatten()
                .map_or(false, |answer| answer == question.correct_option)
        })
        .count() as i32;

    (score, questions.len() as i32)
}

pub fn is_passing(score: i32, total: i32, pass_percentage: i32) -> bool {
    if total == 0 {
        return false;
    }
    i64::from(score) * 100 >= i64::from(total) * i64::from(pass_percentage)
}
