use std::time::Duration;

use decor::application::routes::app_router;
use decor::application::state::{AppState, AppStateConfig};
use decor::infrastructure::ai::GenerationConfig;
use decor::infrastructure::storage::LocalAssetStore;
use reqwest::multipart::{Form, Part};
use tempfile::TempDir;
use tokio::net::TcpListener;
use tokio::task::AbortHandle;
use wiremock::{MockServer, ResponseTemplate};

pub const TEST_API_KEY: &str = "sk-test";
pub const CHAT_COMPLETIONS_PATH: &str = "/v1/chat/completions";

pub struct TestApp {
    pub address: String,
    pub mock_server: MockServer,
    pub upload_dir: TempDir,
    server_handle: AbortHandle,
}

impl TestApp {
    pub fn api_url(&self, path: &str) -> String {
        format!("{}/api{}", self.address, path)
    }

    pub fn page_url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    /// Names of the files currently in the upload directory.
    pub fn stored_files(&self) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(self.upload_dir.path())
            .expect("upload dir readable")
            .map(|entry| {
                entry
                    .expect("dir entry")
                    .file_name()
                    .to_string_lossy()
                    .into_owned()
            })
            .collect();
        names.sort();
        names
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        self.server_handle.abort();
    }
}

pub struct TestOptions {
    pub api_key: &'static str,
    pub rate_limit_per_minute: u32,
    pub upstream_timeout: Duration,
}

impl Default for TestOptions {
    fn default() -> Self {
        Self {
            api_key: TEST_API_KEY,
            rate_limit_per_minute: 0,
            upstream_timeout: GenerationConfig::default().timeout,
        }
    }
}

/// App with a configured key, talking to a wiremock chat-completions endpoint.
pub async fn spawn_app() -> TestApp {
    spawn_app_with(TestOptions::default()).await
}

pub async fn spawn_app_without_api_key() -> TestApp {
    spawn_app_with(TestOptions {
        api_key: "",
        ..TestOptions::default()
    })
    .await
}

pub async fn spawn_app_with(options: TestOptions) -> TestApp {
    let mock_server = MockServer::start().await;
    let upload_dir = tempfile::tempdir().expect("Failed to create upload dir");

    let store = LocalAssetStore::init(upload_dir.path())
        .await
        .expect("Failed to prepare upload dir");

    let state = AppState::from_store(
        store,
        AppStateConfig {
            openai_api_key: options.api_key.to_string(),
            generation: GenerationConfig {
                endpoint_url: format!("{}{CHAT_COMPLETIONS_PATH}", mock_server.uri()),
                timeout: options.upstream_timeout,
                ..GenerationConfig::default()
            },
            decor_rate_limit_per_minute: options.rate_limit_per_minute,
        },
    );

    let app = app_router(state);

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");

    let local_addr = listener.local_addr().expect("Failed to get local address");
    let address = format!("http://{local_addr}");

    let server_handle = tokio::spawn(async move {
        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<std::net::SocketAddr>(),
        )
        .await
        .expect("Server failed to start");
    })
    .abort_handle();

    TestApp {
        address,
        mock_server,
        upload_dir,
        server_handle,
    }
}

/// Chat completion body with a single assistant message.
pub fn mock_chat_response(content: &str) -> ResponseTemplate {
    let body = serde_json::json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "model": "gpt-3.5-turbo",
        "choices": [{
            "index": 0,
            "message": {
                "role": "assistant",
                "content": content
            },
            "finish_reason": "stop"
        }],
        "usage": {
            "prompt_tokens": 120,
            "completion_tokens": 80,
            "total_tokens": 200
        }
    });
    ResponseTemplate::new(200).set_body_json(body)
}

/// A minimal valid 2x2 PNG.
pub fn tiny_png() -> Vec<u8> {
    use image::{ImageBuffer, Rgba};

    let img = ImageBuffer::from_pixel(2, 2, Rgba([200u8, 180, 150, 255]));
    let mut buf = Vec::new();
    let encoder = image::codecs::png::PngEncoder::new(&mut buf);
    image::ImageEncoder::write_image(encoder, img.as_raw(), 2, 2, image::ColorType::Rgba8.into())
        .expect("failed to encode test PNG");
    buf
}

pub fn photo_form(bytes: Vec<u8>, filename: &str, media_type: &str) -> Form {
    let part = Part::bytes(bytes)
        .file_name(filename.to_string())
        .mime_str(media_type)
        .expect("valid media type");
    Form::new().part("photo", part)
}

pub fn png_form(style: Option<&str>) -> Form {
    let form = photo_form(tiny_png(), "salon.png", "image/png");
    match style {
        Some(style) => form.text("style", style.to_string()),
        None => form,
    }
}

pub async fn post_decor(app: &TestApp, form: Form) -> reqwest::Response {
    reqwest::Client::new()
        .post(app.api_url("/decor"))
        .multipart(form)
        .send()
        .await
        .expect("Failed to execute request")
}
