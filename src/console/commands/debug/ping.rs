use actix_web::rt;

pub struct PingCommand {
    url: String,
}

impl PingCommand {
    pub fn new(url: String) -> Self {
        Self { url }
    }
}

impl crate::console::commands::CallableTrait for PingCommand {
    fn call(&self) -> Result<(), Box<dyn std::error::Error>> {
        rt::System::new().block_on(self.run())
    }
}

impl PingCommand {
    async fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        let url = super::endpoint(&self.url, "/health_check");
        let started = std::time::Instant::now();
        let response = reqwest::get(&url).await?;

        println!(
            "{} -> {} in {} ms",
            url,
            response.status(),
            started.elapsed().as_millis()
        );

        if response.status().is_success() {
            Ok(())
        } else {
            Err(format!("health check returned {}", response.status()).into())
        }
    }
}
