use crate::configuration::{get_configuration, Settings};

pub struct CheckCommand;

impl CheckCommand {
    pub fn new() -> Self {
        Self
    }
}

/// Required settings that are empty, secrets first.
pub fn missing_settings(settings: &Settings) -> Vec<&'static str> {
    let mut missing = settings.missing_secrets();
    let database = &settings.database;
    if database.host.trim().is_empty() {
        missing.push("APP_DATABASE__HOST");
    }
    if database.username.trim().is_empty() {
        missing.push("APP_DATABASE__USERNAME");
    }
    if database.database_name.trim().is_empty() {
        missing.push("APP_DATABASE__DATABASE_NAME");
    }
    missing
}

impl crate::console::commands::CallableTrait for CheckCommand {
    fn call(&self) -> Result<(), Box<dyn std::error::Error>> {
        let settings = get_configuration()?;
        let missing = missing_settings(&settings);

        println!("environment: {}", settings.environment);
        println!(
            "database: {}@{}:{}/{}",
            settings.database.username,
            settings.database.host,
            settings.database.port,
            settings.database.database_name
        );
        for name in [
            "SECRET_KEY",
            "PAYMENT_KEY_ID",
            "PAYMENT_KEY_SECRET",
            "PAYMENT_WEBHOOK_SECRET",
            "APP_DATABASE__HOST",
            "APP_DATABASE__USERNAME",
            "APP_DATABASE__DATABASE_NAME",
        ] {
            let state = if missing.contains(&name) { "MISSING" } else { "ok" };
            println!("{:<28} {}", name, state);
        }

        if missing.is_empty() {
            Ok(())
        } else {
            Err(format!("missing required settings: {}", missing.join(", ")).into())
        }
    }
}
