use crate::models;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct Progress {
    pub course: models::Course,
    pub lectures: Vec<models::Lecture>,
    pub viewed_lecture_ids: Vec<i32>,
    pub completed: bool,
}

impl Progress {
    /// Builds the report; a user who never opened the course has empty progress.
    pub fn new(
        course: models::Course,
        lectures: Vec<models::Lecture>,
        progress: Option<(models::CourseProgress, Vec<models::LectureProgress>)>,
    ) -> Self {
        let (completed, viewed_lecture_ids) = match progress {
            Some((course_progress, lecture_progress)) => (
                course_progress.completed,
                lecture_progress
                    .into_iter()
                    .filter(|p| p.viewed)
                    .map(|p| p.lecture_id)
                    .collect(),
            ),
            None => (false, vec![]),
        };

        Self {
            course,
            lectures,
            viewed_lecture_ids,
            completed,
        }
    }
}
