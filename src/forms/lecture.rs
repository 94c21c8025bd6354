use crate::models;
use serde::{Deserialize, Serialize};
use serde_valid::Validate;

#[derive(Serialize, Deserialize, Debug, Validate)]
pub struct Lecture {
    #[validate(min_length = 1)]
    #[validate(max_length = 200)]
    pub title: String,
    #[validate(max_length = 2048)]
    pub video_url: Option<String>,
    pub is_preview_free: Option<bool>,
    #[validate(minimum = 0)]
    pub position: Option<i32>,
}

impl Lecture {
    pub fn trimmed(mut self) -> Self {
        self.title = self.title.trim().to_string();
        self
    }

    pub fn into_model(self, course_id: i32) -> models::Lecture {
        let mut lecture = models::Lecture::default();
        lecture.course_id = course_id;
        self.update(&mut lecture);
        lecture.created_at = chrono::Utc::now();
        lecture
    }

    pub fn update(self, lecture: &mut models::Lecture) {
        lecture.title = self.title.trim().to_string();
        if self.video_url.is_some() {
            lecture.video_url = self.video_url;
        }
        if let Some(is_preview_free) = self.is_preview_free {
            lecture.is_preview_free = is_preview_free;
        }
        if let Some(position) = self.position {
            lecture.position = position;
        }
        lecture.updated_at = chrono::Utc::now();
    }
}
