use crate::models;
use serde::{Deserialize, Serialize};
use serde_valid::Validate;

#[derive(Serialize, Deserialize, Debug, Validate)]
pub struct Register {
    #[validate(min_length = 1)]
    #[validate(max_length = 100)]
    pub name: String,
    #[validate(pattern = r"^[^@\s]+@[^@\s]+\.[^@\s]+$")]
    #[validate(max_length = 255)]
    pub email: String,
    #[validate(min_length = 8)]
    #[validate(max_length = 128)]
    pub password: String,
}

impl Register {
    pub fn into_user(self, password_hash: String) -> models::User {
        let mut user = models::User::default();
        user.name = self.name.trim().to_string();
        user.email = normalize_email(&self.email);
        user.password_hash = password_hash;
        user.role = models::UserRole::Student.to_string();
        user.created_at = chrono::Utc::now();
        user.updated_at = chrono::Utc::now();
        user
    }
}

#[derive(Serialize, Deserialize, Debug, Validate)]
pub struct Login {
    #[validate(min_length = 1)]
    pub email: String,
    #[validate(min_length = 1)]
    pub password: String,
}

#[derive(Serialize, Deserialize, Debug, Default)]
pub struct RefreshToken {
    pub refresh_token: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Validate)]
pub struct UpdateProfile {
    #[validate(min_length = 1)]
    #[validate(max_length = 100)]
    pub name: Option<String>,
    #[validate(max_length = 2048)]
    pub photo_url: Option<String>,
}

impl UpdateProfile {
    pub fn update(self, user: &mut models::User) {
        if let Some(name) = self.name {
            user.name = name.trim().to_string();
        }
        if let Some(photo_url) = self.photo_url {
            user.photo_url = Some(photo_url).filter(|url| !url.trim().is_empty());
        }
    }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ChangeRole {
    pub role: models::UserRole,
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
