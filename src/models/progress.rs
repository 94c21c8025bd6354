use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct CourseProgress {
    pub id: i32,
    pub user_id: i32,
    pub course_id: i32,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct LectureProgress {
    pub id: i32,
    pub progress_id: i32,
    pub lecture_id: i32,
    pub viewed: bool,
    pub updated_at: DateTime<Utc>,
}

/// A course counts as completed once every one of its lectures is viewed.
/// A course without lectures is never completed by viewing.
pub fn all_lectures_viewed(lecture_ids: &[i32], progress: &[LectureProgress]) -> bool {
    if lecture_ids.is_empty() {
        return false;
    }

    let viewed: HashSet<i32> = progress
        .iter()
        .filter(|p| p.viewed)
        .map(|p| p.lecture_id)
        .collect();

    lecture_ids.iter().all(|id| viewed.contains(id))
}
