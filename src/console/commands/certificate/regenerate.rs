use crate::configuration::get_configuration;
use crate::db;
use crate::services::certificate;
use actix_web::rt;
use sqlx::PgPool;
use uuid::Uuid;

pub struct RegenerateCommand {
    id: Option<Uuid>,
    missing_only: bool,
}

impl RegenerateCommand {
    pub fn new(id: Option<Uuid>, missing_only: bool) -> Self {
        Self { id, missing_only }
    }
}

impl crate::console::commands::CallableTrait for RegenerateCommand {
    fn call(&self) -> Result<(), Box<dyn std::error::Error>> {
        rt::System::new().block_on(self.run())
    }
}

impl RegenerateCommand {
    async fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        let settings = get_configuration()?;
        let db_pool = PgPool::connect(&settings.database.connection_string()).await?;

        let certificates = match self.id {
            Some(id) => match db::certificate::fetch(&db_pool, id).await? {
                Some(details) => vec![details],
                None => return Err(format!("certificate {} not found", id).into()),
            },
            None => db::certificate::fetch_all(&db_pool).await?,
        };

        std::fs::create_dir_all(&settings.certificates.storage_dir)?;
        let report =
            certificate::regenerate(&settings.certificates, &certificates, self.missing_only)
                .await;

        println!(
            "rendered: {}, skipped: {}, failed: {}",
            report.rendered, report.skipped, report.failed
        );

        if report.failed > 0 {
            return Err(format!("{} certificates failed to render", report.failed).into());
        }
        Ok(())
    }
}
