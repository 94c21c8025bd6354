use serde;

#[derive(Debug, Clone, serde::Deserialize)]
pub struct Settings {
    pub database: DatabaseSettings,
    pub app_port: u16,
    pub app_host: String,
    #[serde(default = "default_environment")]
    pub environment: String,
    #[serde(default)]
    pub frontend_url: Option<String>,
    pub auth: AuthSettings,
    pub payment: PaymentSettings,
    pub certificates: CertificateSettings,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct DatabaseSettings {
    pub username: String,
    pub password: String,
    pub host: String,
    pub port: u16,
    pub database_name: String,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct AuthSettings {
    #[serde(default)]
    pub secret_key: String,
    pub access_token_ttl_secs: i64,
    pub refresh_token_ttl_secs: i64,
    pub refresh_min_interval_secs: u64,
    #[serde(default)]
    pub secure_cookies: bool,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct PaymentSettings {
    pub base_url: String,
    #[serde(default)]
    pub key_id: String,
    #[serde(default)]
    pub key_secret: String,
    #[serde(default)]
    pub webhook_secret: String,
    pub currency: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct CertificateSettings {
    pub storage_dir: String,
    pub issuer: String,
}

fn default_environment() -> String {
    "development".to_string()
}

impl DatabaseSettings {
    // Connection string: postgresql://<username>:<password>@<host>:<port>/<database_name>
    pub fn connection_string(&self) -> String {
        format!(
            "postgresql://{}:{}@{}:{}/{}",
            self.username, self.password, self.host, self.port, self.database_name,
        )
    }

    pub fn connection_string_without_db(&self) -> String {
        format!(
            "postgresql://{}:{}@{}:{}",
            self.username, self.password, self.host, self.port,
        )
    }
}

impl Settings {
    pub fn is_production(&self) -> bool {
        self.environment.eq_ignore_ascii_case("production")
    }

    /// Secrets never live in `configuration.yaml` in production; they are
    /// taken from the environment (or `.env`) when present.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(value) = std::env::var("SECRET_KEY") {
            self.auth.secret_key = value;
        }
        if let Ok(value) = std::env::var("PAYMENT_KEY_ID") {
            self.payment.key_id = value;
        }
        if let Ok(value) = std::env::var("PAYMENT_KEY_SECRET") {
            self.payment.key_secret = value;
        }
        if let Ok(value) = std::env::var("PAYMENT_WEBHOOK_SECRET") {
            self.payment.webhook_secret = value;
        }
        if let Ok(value) = std::env::var("FRONTEND_URL") {
            self.frontend_url = Some(value);
        }
        if let Ok(value) = std::env::var("APP_ENVIRONMENT") {
            self.environment = value;
        }
    }

    /// Names of required settings that are empty after all sources are merged.
    pub fn missing_secrets(&self) -> Vec<&'static str> {
        let mut missing = vec![];
        if self.auth.secret_key.trim().is_empty() {
            missing.push("SECRET_KEY");
        }
        if self.payment.key_id.trim().is_empty() {
            missing.push("PAYMENT_KEY_ID");
        }
        if self.payment.key_secret.trim().is_empty() {
            missing.push("PAYMENT_KEY_SECRET");
        }
        if self.payment.webhook_secret.trim().is_empty() {
            missing.push("PAYMENT_WEBHOOK_SECRET");
        }
        missing
    }
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let settings = config::Config::builder()
        .add_source(config::File::with_name("configuration"))
        // APP_DATABASE__HOST=... overrides database.host
        .add_source(config::Environment::with_prefix("APP").separator("__"))
        .build()?;

    let mut config: Settings = settings.try_deserialize()?;
    config.apply_env_overrides();

    Ok(config)
}
