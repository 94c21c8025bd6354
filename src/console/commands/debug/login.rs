use actix_web::rt;
use serde_json::json;

pub struct LoginCommand {
    url: String,
    email: String,
    password: String,
}

impl LoginCommand {
    pub fn new(url: String, email: String, password: String) -> Self {
        Self {
            url,
            email,
            password,
        }
    }
}

impl crate::console::commands::CallableTrait for LoginCommand {
    fn call(&self) -> Result<(), Box<dyn std::error::Error>> {
        rt::System::new().block_on(self.run())
    }
}

impl LoginCommand {
    async fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        let url = super::endpoint(&self.url, "/api/v1/user/login");
        let response = reqwest::Client::new()
            .post(&url)
            .json(&json!({ "email": self.email, "password": self.password }))
            .send()
            .await?;

        let status = response.status();
        println!("status: {}", status);
        for cookie in response.headers().get_all(reqwest::header::SET_COOKIE) {
            println!("set-cookie: {}", cookie.to_str().unwrap_or("<binary>"));
        }
        println!("body: {}", response.text().await?);

        if status.is_success() {
            Ok(())
        } else {
            Err(format!("login returned {}", status).into())
        }
    }
}
