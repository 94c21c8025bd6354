use actix_web::rt;
use serde_json::json;

pub struct ContactCommand {
    url: String,
    name: String,
    email: String,
    subject: String,
    message: String,
}

impl ContactCommand {
    pub fn new(url: String, name: String, email: String, subject: String, message: String) -> Self {
        Self {
            url,
            name,
            email,
            subject,
            message,
        }
    }
}

impl crate::console::commands::CallableTrait for ContactCommand {
    fn call(&self) -> Result<(), Box<dyn std::error::Error>> {
        rt::System::new().block_on(self.run())
    }
}

impl ContactCommand {
    async fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        let url = super::endpoint(&self.url, "/api/v1/contact");
        let response = reqwest::Client::new()
            .post(&url)
            .json(&json!({
                "name": self.name,
                "email": self.email,
                "subject": self.subject,
                "message": self.message,
            }))
            .send()
            .await?;

        let status = response.status();
        println!("status: {}", status);
        println!("body: {}", response.text().await?);

        if status.is_success() {
            Ok(())
        } else {
            Err(format!("contact returned {}", status).into())
        }
    }
}
