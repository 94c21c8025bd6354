mod common;

use serde_json::{json, Value};

#[tokio::test]
async fn anyone_can_send_a_message_and_admins_read_them() {
    let app = match common::spawn_app().await {
        Some(app) => app,
        None => return,
    };

    for subject in ["First", "Second"] {
        let response = app
            .post(
                "/api/v1/contact",
                None,
                json!({
                    "name": "Visitor",
                    "email": "visitor@example.com",
                    "subject": subject,
                    "message": "Do you offer team plans?"
                }),
            )
            .await;
        assert_eq!(201, response.status().as_u16());
    }

    let student = app.signup("student@example.com", "student").await;
    assert_eq!(
        403,
        app.get("/api/v1/admin/contact", Some(&student.token)).await.status().as_u16()
    );
    assert_eq!(401, app.get("/api/v1/admin/contact", None).await.status().as_u16());

    let admin = app.signup("admin@example.com", "admin").await;
    let response = app.get("/api/v1/admin/contact", Some(&admin.token)).await;
    assert_eq!(200, response.status().as_u16());
    let body: Value = response.json().await.unwrap();
    let list = body["list"].as_array().unwrap();
    assert_eq!(2, list.len());
    assert_eq!("Second", list[0]["subject"]);
}

#[tokio::test]
async fn invalid_message_is_rejected() {
    let app = match common::spawn_app().await {
        Some(app) => app,
        None => return,
    };

    let response = app
        .post(
            "/api/v1/contact",
            None,
            json!({ "name": "", "email": "nope", "subject": "Hi", "message": "Hello" }),
        )
        .await;
    assert_eq!(422, response.status().as_u16());
}
