use decor::application::errors::{MISSING_CREDENTIAL_MESSAGE, UNSUPPORTED_MEDIA_TYPE_MESSAGE};
use decor::infrastructure::client::DecorClient;
use wiremock::Mock;
use wiremock::matchers::{method, path};

use crate::helpers::{
    CHAT_COMPLETIONS_PATH, mock_chat_response, spawn_app, spawn_app_without_api_key, tiny_png,
};

#[tokio::test]
async fn client_pings_server() {
    let app = spawn_app().await;
    let client = DecorClient::from_base_url(&app.address).unwrap();

    let body = client.ping().await.unwrap();

    assert_eq!(body, serde_json::json!({ "ok": true }));
}

#[tokio::test]
async fn client_uploads_photo_and_reads_suggestions() {
    let app = spawn_app().await;
    Mock::given(method("POST"))
        .and(path(CHAT_COMPLETIONS_PATH))
        .respond_with(mock_chat_response(
            r#"{"suggestions": ["Mur vert sauge", "Fauteuil en rotin"]}"#,
        ))
        .mount(&app.mock_server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let photo = dir.path().join("salon.png");
    std::fs::write(&photo, tiny_png()).unwrap();

    let client = DecorClient::from_base_url(&app.address).unwrap();
    let response = client.decorate(&photo, Some("bohème")).await.unwrap();

    assert_eq!(response.suggestions, vec!["Mur vert sauge", "Fauteuil en rotin"]);
    assert!(response.image_url.ends_with(".png"));
    assert_eq!(app.stored_files().len(), 1);
}

#[tokio::test]
async fn client_surfaces_server_error_message() {
    let app = spawn_app_without_api_key().await;

    let dir = tempfile::tempdir().unwrap();
    let photo = dir.path().join("salon.png");
    std::fs::write(&photo, tiny_png()).unwrap();

    let client = DecorClient::from_base_url(&app.address).unwrap();
    let err = client.decorate(&photo, None).await.unwrap_err();

    let message = err.to_string();
    assert!(message.contains("500"), "{message}");
    assert!(message.contains(MISSING_CREDENTIAL_MESSAGE), "{message}");
}

#[tokio::test]
async fn client_sends_guessed_media_type() {
    let app = spawn_app().await;

    let dir = tempfile::tempdir().unwrap();
    let notes = dir.path().join("notes.txt");
    std::fs::write(&notes, "pas une image").unwrap();

    let client = DecorClient::from_base_url(&app.address).unwrap();
    let err = client.decorate(&notes, None).await.unwrap_err();

    assert!(err.to_string().contains(UNSUPPORTED_MEDIA_TYPE_MESSAGE));
}

#[tokio::test]
async fn client_reports_unreadable_photo() {
    let app = spawn_app().await;
    let client = DecorClient::from_base_url(&app.address).unwrap();

    let err = client
        .decorate(std::path::Path::new("/definitely/not/here.png"), None)
        .await
        .unwrap_err();

    assert!(err.to_string().contains("failed to read"));
}
