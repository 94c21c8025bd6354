use crate::models;
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Serialize, Default)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub role: String,
    pub photo_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<models::User> for User {
    fn from(user: models::User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
            photo_url: user.photo_url,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Serialize, Default)]
pub struct Profile {
    #[serde(flatten)]
    pub user: User,
    pub enrolled_courses: Vec<models::Course>,
}

#[derive(Debug, Serialize)]
pub struct Session {
    pub user: User,
    pub access_token: String,
    pub refresh_token: String,
}
