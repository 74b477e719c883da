use serde_json::{Value, json};
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, ResponseTemplate};

use crate::helpers::{COURSE_ID, TestApp, TestAppOptions};
use aspects_adapters::config::CatalogEntry;

async fn mount_superset(app: &TestApp, guest_token_body: Value, expected_guest_token_calls: u64) {
    Mock::given(method("POST"))
        .and(path("/api/v1/security/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "access_token": "access" })))
        .mount(&app.superset_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/security/csrf_token/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "result": "csrf" })))
        .mount(&app.superset_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/v1/security/guest_token/"))
        .and(body_partial_json(guest_token_body))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "token": "tok123" })))
        .expect(expected_guest_token_calls)
        .mount(&app.superset_server)
        .await;
}

async fn error_message(response: reqwest::Response) -> String {
    let body: Value = response.json().await.expect("Failed to parse error body");
    body["error"].as_str().unwrap_or_default().to_string()
}

#[tokio::test]
async fn should_return_200_with_guest_token_for_course_staff() {
    let app = TestApp::new(TestAppOptions::with_staff("staff")).await;
    mount_superset(
        &app,
        json!({
            "user": { "username": "staff" },
            "rls": [
                { "clause": "org = 'Org'" },
                { "clause": "course_name = ''" },
                { "clause": "course_run = '2024'" },
            ],
        }),
        1,
    )
    .await;

    let response = app.post_guest_token(COURSE_ID, Some("staff")).await;

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "guestToken": "tok123" }));
}

#[tokio::test]
async fn should_return_401_without_session() {
    let app = TestApp::new(TestAppOptions::with_staff("staff")).await;
    mount_superset(&app, json!({}), 0).await;

    let response = app.post_guest_token(COURSE_ID, None).await;

    assert_eq!(response.status().as_u16(), 401);
}

#[tokio::test]
async fn should_return_404_for_invalid_course_id() {
    let app = TestApp::new(TestAppOptions::with_staff("staff")).await;
    mount_superset(&app, json!({}), 0).await;

    let response = app.post_guest_token("not-a-course", Some("staff")).await;

    assert_eq!(response.status().as_u16(), 404);
    assert_eq!(
        error_message(response).await,
        "Invalid course id: 'not-a-course'"
    );
}

#[tokio::test]
async fn should_return_403_for_non_staff() {
    let app = TestApp::new(TestAppOptions::with_staff("staff")).await;
    mount_superset(&app, json!({}), 0).await;

    let response = app.post_guest_token(COURSE_ID, Some("learner")).await;

    assert_eq!(response.status().as_u16(), 403);
}

#[tokio::test]
async fn should_return_403_when_no_staff_is_configured() {
    let app = TestApp::new(TestAppOptions::default()).await;
    mount_superset(&app, json!({}), 0).await;

    let response = app.post_guest_token(COURSE_ID, Some("staff")).await;

    assert_eq!(response.status().as_u16(), 403);
}

#[tokio::test]
async fn should_use_catalog_display_name_and_extra_filters() {
    let app = TestApp::new(TestAppOptions {
        catalog: Some(vec![CatalogEntry {
            course_id: COURSE_ID.to_string(),
            display_name: "Intro to Rust".to_string(),
        }]),
        extra_filters: vec!["username = '{user.username}'".to_string()],
        ..TestAppOptions::with_staff("staff")
    })
    .await;
    mount_superset(
        &app,
        json!({
            "rls": [
                { "clause": "org = 'Org'" },
                { "clause": "course_name = 'Intro to Rust'" },
                { "clause": "course_run = '2024'" },
                { "clause": "username = 'staff'" },
            ],
        }),
        1,
    )
    .await;

    let response = app.post_guest_token(COURSE_ID, Some("staff")).await;

    assert_eq!(response.status().as_u16(), 200);
}

#[tokio::test]
async fn should_return_404_for_course_missing_from_catalog() {
    let app = TestApp::new(TestAppOptions {
        catalog: Some(vec![]),
        ..TestAppOptions::with_staff("staff")
    })
    .await;
    mount_superset(&app, json!({}), 0).await;

    let response = app.post_guest_token(COURSE_ID, Some("staff")).await;

    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn should_return_500_when_superset_rejects_the_request() {
    let app = TestApp::new(TestAppOptions::with_staff("staff")).await;
    Mock::given(method("POST"))
        .and(path("/api/v1/security/login"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&app.superset_server)
        .await;

    let response = app.post_guest_token(COURSE_ID, Some("staff")).await;

    assert_eq!(response.status().as_u16(), 500);
    let message = error_message(response).await;
    assert!(message.contains("Unable to fetch Superset guest token"));
    assert!(message.contains("401"));
}

#[tokio::test]
async fn should_return_405_for_get() {
    let app = TestApp::new(TestAppOptions::with_staff("staff")).await;

    let response = app
        .http_client
        .get(app.token_url(COURSE_ID))
        .header("cookie", app.session_cookie("staff"))
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(response.status().as_u16(), 405);
    assert_eq!(
        response.headers().get("allow").unwrap(),
        "POST, OPTIONS, HEAD"
    );
}

#[tokio::test]
async fn should_return_404_for_course_id_that_is_not_utf8() {
    let app = TestApp::new(TestAppOptions::with_staff("staff")).await;
    mount_superset(&app, json!({}), 0).await;

    let response = app
        .post_guest_token("course-v1:Org+%FF+2024", Some("staff"))
        .await;

    assert_eq!(response.status().as_u16(), 404);
    assert_eq!(
        error_message(response).await,
        "Invalid course id: 'course-v1:Org+%FF+2024'"
    );
}

#[tokio::test]
async fn should_accept_deprecated_course_id_with_slashes() {
    let app = TestApp::new(TestAppOptions::with_staff_on("staff", "Org/101/2024")).await;
    mount_superset(
        &app,
        json!({
            "rls": [
                { "clause": "org = 'Org'" },
                { "clause": "course_name = ''" },
                { "clause": "course_run = '2024'" },
            ],
        }),
        2,
    )
    .await;

    for course_id in ["Org/101/2024", "Org%2F101%2F2024"] {
        let response = app.post_guest_token(course_id, Some("staff")).await;

        assert_eq!(response.status().as_u16(), 200, "{course_id}");
        let body: Value = response.json().await.unwrap();
        assert_eq!(body, json!({ "guestToken": "tok123" }));
    }
}

#[tokio::test]
async fn should_mount_under_base_path_without_leading_slash() {
    for base_path in ["aspects", "/aspects/"] {
        let app = TestApp::new(TestAppOptions {
            base_path: Some(base_path.to_string()),
            ..TestAppOptions::with_staff("staff")
        })
        .await;
        mount_superset(&app, json!({}), 1).await;

        let response = app.post_guest_token(COURSE_ID, Some("staff")).await;

        assert_eq!(response.status().as_u16(), 200, "{base_path:?}");
    }
}
