#![allow(dead_code)]

use actix_web::web;
use learnhub::configuration::{get_configuration, DatabaseSettings, Settings};
use learnhub::connectors::{MockPaymentGateway, PaymentGateway};
use serde_json::{json, Value};
use sqlx::{Connection, Executor, PgConnection, PgPool};
use std::sync::Arc;

pub const PASSWORD: &str = "correct horse battery";
pub const KEY_SECRET: &str = "test_key_secret";
pub const WEBHOOK_SECRET: &str = "test_webhook_secret";

pub struct TestApp {
    pub address: String,
    pub db_pool: PgPool,
    pub client: reqwest::Client,
    pub settings: Settings,
    // removed with the app
    _storage: tempfile::TempDir,
}

pub struct TestUser {
    pub id: i32,
    pub email: String,
    pub token: String,
}

pub async fn spawn_app_with_configuration(mut configuration: Settings) -> Option<TestApp> {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");

    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);
    configuration.database.database_name = uuid::Uuid::new_v4().to_string();

    let storage = tempfile::tempdir().expect("Failed to create certificate dir");
    configuration.certificates.storage_dir = storage.path().to_string_lossy().into_owned();
    configuration.payment.key_secret = KEY_SECRET.to_string();
    configuration.payment.webhook_secret = WEBHOOK_SECRET.to_string();

    let connection_pool = match configure_database(&configuration.database).await {
        Ok(pool) => pool,
        Err(err) => {
            eprintln!("Skipping tests: failed to connect to postgres: {}", err);
            return None;
        }
    };

    let gateway: Arc<dyn PaymentGateway> =
        Arc::new(MockPaymentGateway::new(KEY_SECRET, WEBHOOK_SECRET));
    let server = learnhub::startup::run_with_gateway(
        listener,
        connection_pool.clone(),
        configuration.clone(),
        web::Data::new(gateway),
    )
    .await
    .expect("Failed to bind address.");

    let _ = tokio::spawn(server);
    println!("Used Port: {}", port);

    Some(TestApp {
        address,
        db_pool: connection_pool,
        client: reqwest::Client::new(),
        settings: configuration,
        _storage: storage,
    })
}

pub async fn spawn_app() -> Option<TestApp> {
    let mut configuration = get_configuration().expect("Failed to get configuration");
    if configuration.auth.secret_key.trim().is_empty() {
        configuration.auth.secret_key = "integration-test-secret".to_string();
    }

    spawn_app_with_configuration(configuration).await
}

pub async fn configure_database(config: &DatabaseSettings) -> Result<PgPool, sqlx::Error> {
    let mut connection = PgConnection::connect(&config.connection_string_without_db()).await?;

    connection
        .execute(format!(r#"CREATE DATABASE "{}""#, config.database_name).as_str())
        .await?;

    let connection_pool = PgPool::connect(&config.connection_string()).await?;

    sqlx::migrate!("./migrations")
        .run(&connection_pool)
        .await?;

    Ok(connection_pool)
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    pub async fn register(&self, name: &str, email: &str) -> reqwest::Response {
        self.client
            .post(self.url("/api/v1/user/register"))
            .json(&json!({ "name": name, "email": email, "password": PASSWORD }))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn login(&self, email: &str, password: &str) -> reqwest::Response {
        self.client
            .post(self.url("/api/v1/user/login"))
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    /// Registers a user, gives them `role` and logs them in.
    pub async fn signup(&self, email: &str, role: &str) -> TestUser {
        let response = self.register("Test User", email).await;
        assert_eq!(201, response.status().as_u16());
        let body: Value = response.json().await.unwrap();
        let id = body["id"].as_i64().unwrap() as i32;

        if role != "student" {
            sqlx::query("UPDATE users SET role=$2 WHERE id=$1")
                .bind(id)
                .bind(role)
                .execute(&self.db_pool)
                .await
                .expect("Failed to change role");
        }

        let response = self.login(email, PASSWORD).await;
        assert_eq!(200, response.status().as_u16());
        let body: Value = response.json().await.unwrap();
        let token = body["item"]["access_token"].as_str().unwrap().to_string();

        TestUser {
            id,
            email: email.to_string(),
            token,
        }
    }

    pub async fn get(&self, path: &str, token: Option<&str>) -> reqwest::Response {
        let mut request = self.client.get(self.url(path));
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        request.send().await.expect("Failed to execute request.")
    }

    pub async fn post(&self, path: &str, token: Option<&str>, body: Value) -> reqwest::Response {
        let mut request = self.client.post(self.url(path)).json(&body);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        request.send().await.expect("Failed to execute request.")
    }

    pub async fn delete(&self, path: &str, token: &str) -> reqwest::Response {
        self.client
            .delete(self.url(path))
            .bearer_auth(token)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn create_course(&self, token: &str, title: &str, price: i32) -> i32 {
        let response = self
            .post(
                "/api/v1/course",
                Some(token),
                json!({ "title": title, "category": "Programming", "price": price }),
            )
            .await;
        assert_eq!(201, response.status().as_u16());
        let body: Value = response.json().await.unwrap();
        body["id"].as_i64().unwrap() as i32
    }

    pub async fn add_lecture(&self, token: &str, course_id: i32, title: &str, position: i32) -> i32 {
        let response = self
            .post(
                &format!("/api/v1/course/{}/lecture", course_id),
                Some(token),
                json!({
                    "title": title,
                    "video_url": format!("https://videos.example.com/{}.mp4", position),
                    "position": position,
                }),
            )
            .await;
        assert_eq!(201, response.status().as_u16());
        let body: Value = response.json().await.unwrap();
        body["id"].as_i64().unwrap() as i32
    }

    pub async fn publish(&self, token: &str, course_id: i32) -> reqwest::Response {
        self.client
            .patch(self.url(&format!("/api/v1/course/{}/publish?publish=true", course_id)))
            .bearer_auth(token)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    /// Published course with `lectures` lectures; returns (course id, lecture ids).
    pub async fn published_course(&self, token: &str, price: i32, lectures: i32) -> (i32, Vec<i32>) {
        let course_id = self.create_course(token, "Rust from scratch", price).await;
        let mut lecture_ids = vec![];
        for position in 0..lectures {
            lecture_ids.push(
                self.add_lecture(token, course_id, &format!("Lecture {}", position), position)
                    .await,
            );
        }
        assert_eq!(200, self.publish(token, course_id).await.status().as_u16());
        (course_id, lecture_ids)
    }

    /// Enrolls the user in a free course through checkout.
    pub async fn enroll_free(&self, token: &str, course_id: i32) {
        let response = self
            .post(
                "/api/v1/purchase/checkout",
                Some(token),
                json!({ "course_id": course_id }),
            )
            .await;
        assert_eq!(201, response.status().as_u16());
    }
}
