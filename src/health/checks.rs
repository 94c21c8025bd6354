use super::models::{ComponentHealth, HealthCheckResponse};
use sqlx::PgPool;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tokio::time::timeout;

const CHECK_TIMEOUT: Duration = Duration::from_secs(5);
const SLOW_RESPONSE_THRESHOLD_MS: u64 = 1000;
const WRITE_CHECK_FILE: &str = ".health_write_check";

pub struct HealthChecker {
    pg_pool: PgPool,
    storage_dir: PathBuf,
    start_time: Instant,
}

impl HealthChecker {
    pub fn new(pg_pool: PgPool, storage_dir: PathBuf) -> Self {
        Self {
            pg_pool,
            storage_dir,
            start_time: Instant::now(),
        }
    }

    pub async fn check_all(&self) -> HealthCheckResponse {
        let version = env!("CARGO_PKG_VERSION").to_string();
        let uptime = self.start_time.elapsed().as_secs();
        let mut response = HealthCheckResponse::new(version, uptime);

        let (db_result, storage_result) = tokio::join!(
            timeout(CHECK_TIMEOUT, self.check_database()),
            timeout(CHECK_TIMEOUT, self.check_storage()),
        );

        response.add_component(
            "database",
            db_result.unwrap_or_else(|_| ComponentHealth::unhealthy("Timeout")),
        );
        response.add_component(
            "certificate_storage",
            storage_result.unwrap_or_else(|_| ComponentHealth::unhealthy("Timeout")),
        );

        response
    }

    #[tracing::instrument(name = "Check database health", skip(self))]
    async fn check_database(&self) -> ComponentHealth {
        let start = Instant::now();

        match sqlx::query("SELECT 1 as health_check")
            .fetch_one(&self.pg_pool)
            .await
        {
            Ok(_) => {
                let elapsed = start.elapsed().as_millis() as u64;
                let health = if elapsed > SLOW_RESPONSE_THRESHOLD_MS {
                    ComponentHealth::degraded("Database responding slowly", Some(elapsed))
                } else {
                    ComponentHealth::healthy(elapsed)
                };

                let pool_size = self.pg_pool.size();
                let idle_connections = self.pg_pool.num_idle();
                health
                    .with_detail("pool_size", serde_json::json!(pool_size))
                    .with_detail("idle_connections", serde_json::json!(idle_connections))
            }
            Err(e) => {
                tracing::error!("Database health check failed: {:?}", e);
                ComponentHealth::unhealthy(format!("Database error: {}", e))
            }
        }
    }

    /// The certificate directory must exist and accept writes.
    #[tracing::instrument(name = "Check certificate storage", skip(self))]
    async fn check_storage(&self) -> ComponentHealth {
        let start = Instant::now();
        let marker = self.storage_dir.join(WRITE_CHECK_FILE);

        let result = async {
            tokio::fs::write(&marker, b"ok").await?;
            tokio::fs::remove_file(&marker).await
        }
        .await;

        match result {
            Ok(()) => ComponentHealth::healthy(start.elapsed().as_millis() as u64).with_detail(
                "path",
                serde_json::json!(self.storage_dir.display().to_string()),
            ),
            Err(e) => {
                tracing::error!("Certificate storage is not writable: {:?}", e);
                ComponentHealth::unhealthy(format!(
                    "{} is not writable: {}",
                    self.storage_dir.display(),
                    e
                ))
            }
        }
    }
}
