use crate::models;
use serde::{Deserialize, Serialize};
use serde_valid::Validate;

#[derive(Serialize, Deserialize, Debug, Validate)]
pub struct Contact {
    #[validate(min_length = 1)]
    #[validate(max_length = 100)]
    pub name: String,
    #[validate(pattern = r"^[^@\s]+@[^@\s]+\.[^@\s]+$")]
    #[validate(max_length = 255)]
    pub email: String,
    #[validate(min_length = 1)]
    #[validate(max_length = 200)]
    pub subject: String,
    #[validate(min_length = 1)]
    #[validate(max_length = 5000)]
    pub message: String,
}

impl Contact {
    pub fn trimmed(mut self) -> Self {
        self.name = self.name.trim().to_string();
        self.email = self.email.trim().to_string();
        self.subject = self.subject.trim().to_string();
        self.message = self.message.trim().to_string();
        self
    }
}

impl Into<models::ContactMessage> for Contact {
    fn into(self) -> models::ContactMessage {
        let mut item = models::ContactMessage::default();
        item.name = self.name.trim().to_string();
        item.email = self.email.trim().to_lowercase();
        item.subject = self.subject.trim().to_string();
        item.message = self.message;
        item.created_at = chrono::Utc::now();
        item
    }
}
