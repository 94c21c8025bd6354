use crate::configuration::Settings;
use crate::connectors::{self, PaymentGateway};
use crate::health::HealthChecker;
use crate::helpers::{JsonResponse, RefreshThrottle, TokenService};
use crate::middleware;
use crate::routes;
use actix_cors::Cors;
use actix_web::{dev::Server, error, http, web, App, HttpServer};
use sqlx::{Pool, Postgres};
use std::io::{Error as IoError, ErrorKind};
use std::net::TcpListener;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_actix_web::TracingLogger;

pub async fn run(
    listener: TcpListener,
    pg_pool: Pool<Postgres>,
    settings: Settings,
) -> Result<Server, IoError> {
    let payment_gateway = connectors::init_payment_gateway(&settings)
        .map_err(|err| IoError::new(ErrorKind::Other, err.to_string()))?;

    run_with_gateway(listener, pg_pool, settings, payment_gateway).await
}

/// Same as [`run`] with the payment connector supplied by the caller.
pub async fn run_with_gateway(
    listener: TcpListener,
    pg_pool: Pool<Postgres>,
    settings: Settings,
    payment_gateway: web::Data<Arc<dyn PaymentGateway>>,
) -> Result<Server, IoError> {
    if settings.auth.secret_key.trim().is_empty() {
        return Err(IoError::new(ErrorKind::InvalidInput, "SECRET_KEY is not set"));
    }

    let token_service = web::Data::new(TokenService::new(&settings.auth));
    let refresh_throttle = web::Data::new(RefreshThrottle::new(Duration::from_secs(
        settings.auth.refresh_min_interval_secs,
    )));

    let health_checker = Arc::new(HealthChecker::new(
        pg_pool.clone(),
        PathBuf::from(&settings.certificates.storage_dir),
    ));
    let health_checker = web::Data::new(health_checker);

    let frontend_url = settings.frontend_url.clone();
    let settings = web::Data::new(settings);
    let pg_pool = web::Data::new(pg_pool);

    let access_control = middleware::authorization::AccessControl::from_default_files().await?;
    let json_config = web::JsonConfig::default().error_handler(|err, _req| {
        let msg: String = match err {
            error::JsonPayloadError::Deserialize(err) => format!(
                "Invalid JSON at line {}, column {}: {}",
                err.line(),
                err.column(),
                err
            ),
            _ => err.to_string(),
        };
        JsonResponse::<String>::bad_request(msg)
    });

    let server = HttpServer::new(move || {
        let cors = match frontend_url.as_deref() {
            Some(origin) => Cors::default()
                .allowed_origin(origin)
                .allowed_methods(vec!["GET", "POST", "PUT", "PATCH", "DELETE"])
                .allowed_headers(vec![
                    http::header::AUTHORIZATION,
                    http::header::ACCEPT,
                    http::header::CONTENT_TYPE,
                ])
                .supports_credentials()
                .max_age(3600),
            None => Cors::permissive(),
        };

        App::new()
            .wrap(TracingLogger::default())
            .wrap(access_control.clone())
            .wrap(middleware::authentication::Manager::new())
            .wrap(actix_web::middleware::Compress::default())
            .wrap(cors)
            .app_data(health_checker.clone())
            .service(
                web::scope("/health_check")
                    .service(routes::health_check)
                    .service(routes::health_status),
            )
            .service(
                web::scope("/api/v1")
                    .service(
                        web::scope("/user")
                            .service(routes::user::register_handler)
                            .service(routes::user::login_handler)
                            .service(routes::user::refresh_token_handler)
                            .service(routes::user::logout_handler)
                            .service(routes::user::profile_handler)
                            .service(routes::user::update_profile_handler),
                    )
                    .service(
                        web::scope("/course")
                            .service(routes::course::published_handler)
                            .service(routes::course::search_handler)
                            .service(routes::course::creator_list_handler)
                            .service(routes::course::add_handler)
                            .service(routes::course::item_handler)
                            .service(routes::course::update_handler)
                            .service(routes::course::publish_handler)
                            .service(routes::course::delete_handler)
                            .service(routes::course::lecture::add_handler)
                            .service(routes::course::lecture::list_handler)
                            .service(routes::course::lecture::update_handler)
                            .service(routes::course::lecture::delete_handler),
                    )
                    .service(
                        web::scope("/purchase")
                            .service(routes::purchase::checkout_handler)
                            .service(routes::purchase::verify_handler)
                            .service(routes::purchase::webhook_handler)
                            .service(routes::purchase::detail_with_status_handler)
                            .service(routes::purchase::list_handler),
                    )
                    .service(
                        web::scope("/progress")
                            .service(routes::progress::item_handler)
                            .service(routes::progress::view_lecture_handler)
                            .service(routes::progress::complete_handler)
                            .service(routes::progress::incomplete_handler),
                    )
                    .service(
                        web::scope("/bookmark")
                            .service(routes::bookmark::list_handler)
                            .service(routes::bookmark::add_handler)
                            .service(routes::bookmark::clear_handler)
                            .service(routes::bookmark::delete_handler)
                            .service(routes::bookmark::toggle_handler),
                    )
                    .service(
                        web::scope("/certificate")
                            .service(routes::certificate::verify_handler)
                            .service(routes::certificate::list_handler)
                            .service(routes::certificate::download_handler)
                            .service(routes::certificate::issue_handler),
                    )
                    .service(web::scope("/contact").service(routes::contact::add_handler))
                    .service(
                        web::scope("/quiz")
                            .service(routes::quiz::add_handler)
                            .service(routes::quiz::list_handler)
                            .service(routes::quiz::attempt_handler)
                            .service(routes::quiz::attempts_handler),
                    )
                    .service(
                        web::scope("/admin")
                            .service(
                                web::scope("/user")
                                    .service(routes::user::admin_change_role_handler),
                            )
                            .service(routes::contact::admin_list_handler)
                            .service(routes::purchase::admin_list_handler),
                    ),
            )
            .app_data(json_config.clone())
            .app_data(pg_pool.clone())
            .app_data(settings.clone())
            .app_data(token_service.clone())
            .app_data(refresh_throttle.clone())
            .app_data(payment_gateway.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
