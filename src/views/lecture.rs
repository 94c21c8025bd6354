use crate::models;
use serde::Serialize;

/// A lecture as shown to someone who may not have bought the course.
#[derive(Debug, Serialize, Default)]
pub struct Lecture {
    pub id: i32,
    pub course_id: i32,
    pub title: String,
    pub video_url: Option<String>,
    pub is_preview_free: bool,
    pub position: i32,
    pub locked: bool,
}

impl Lecture {
    pub fn from_model(lecture: models::Lecture, has_access: bool) -> Self {
        let locked = !(has_access || lecture.is_preview_free);
        Self {
            id: lecture.id,
            course_id: lecture.course_id,
            title: lecture.title,
            video_url: if locked { None } else { lecture.video_url },
            is_preview_free: lecture.is_preview_free,
            position: lecture.position,
            locked,
        }
    }
}
