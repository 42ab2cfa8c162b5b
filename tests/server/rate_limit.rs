use decor::application::errors::{NO_FILE_MESSAGE, RATE_LIMITED_MESSAGE};
use decor::domain::responses::ErrorResponse;
use reqwest::StatusCode;
use reqwest::multipart::Form;

use crate::helpers::{TestOptions, post_decor, spawn_app_with};

#[tokio::test]
async fn decor_is_limited_per_client() {
    let app = spawn_app_with(TestOptions {
        rate_limit_per_minute: 2,
        ..TestOptions::default()
    })
    .await;

    for _ in 0..2 {
        let response = post_decor(&app, Form::new().text("style", "zen")).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: ErrorResponse = response.json().await.unwrap();
        assert_eq!(body.error, NO_FILE_MESSAGE);
    }

    let response = post_decor(&app, Form::new().text("style", "zen")).await;
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    let body: ErrorResponse = response.json().await.unwrap();
    assert_eq!(body.error, RATE_LIMITED_MESSAGE);
}

#[tokio::test]
async fn liveness_is_not_limited() {
    let app = spawn_app_with(TestOptions {
        rate_limit_per_minute: 1,
        ..TestOptions::default()
    })
    .await;

    for _ in 0..5 {
        let response = reqwest::get(app.api_url("/test")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}

#[tokio::test]
async fn zero_disables_the_limit() {
    let app = spawn_app_with(TestOptions {
        rate_limit_per_minute: 0,
        ..TestOptions::default()
    })
    .await;

    for _ in 0..40 {
        let response = post_decor(&app, Form::new()).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
