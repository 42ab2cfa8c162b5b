use reqwest::StatusCode;

use crate::helpers::{spawn_app, tiny_png};

#[tokio::test]
async fn missing_upload_is_not_found() {
    let app = spawn_app().await;

    let response = reqwest::get(app.page_url("/uploads/1700000000000-42.png"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn files_in_upload_dir_are_served() {
    let app = spawn_app().await;
    std::fs::write(app.upload_dir.path().join("1-1.png"), tiny_png()).unwrap();

    let response = reqwest::get(app.page_url("/uploads/1-1.png")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["content-type"], "image/png");
    assert_eq!(response.bytes().await.unwrap().as_ref(), tiny_png().as_slice());
}

#[tokio::test]
async fn encoded_traversal_stays_inside_upload_dir() {
    let app = spawn_app().await;

    let response = reqwest::get(app.page_url("/uploads/..%2f..%2fCargo.toml"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
