use crate::models;
use crate::views::lecture::Lecture;
use serde::Serialize;

/// Course page: the course, its lectures as the caller may see them, and
/// whether the caller owns it.
#[derive(Debug, Serialize)]
pub struct CourseDetail {
    pub course: models::Course,
    pub lectures: Vec<Lecture>,
    pub purchased: bool,
}

impl CourseDetail {
    pub fn new(course: models::Course, lectures: Vec<models::Lecture>, purchased: bool, has_access: bool) -> Self {
        Self {
            course,
            lectures: lectures
                .into_iter()
                .map(|lecture| Lecture::from_model(lecture, has_access))
                .collect(),
            purchased,
        }
    }
}
