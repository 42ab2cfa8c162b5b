use std::path::Path;

use anyhow::{Context, Result, anyhow};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Url};

use crate::domain::responses::{DecorResponse, ErrorResponse};

/// HTTP client for a running decor server.
pub struct DecorClient {
    base_url: Url,
    http: Client,
}

impl DecorClient {
    pub fn new(base_url: Url) -> Result<Self> {
        let mut normalized = base_url;
        if !normalized.path().ends_with('/') {
            normalized.set_path(&format!("{}/", normalized.path().trim_end_matches('/')));
        }

        let http = Client::builder()
            .user_agent("decor-cli/0.1")
            .build()
            .context("failed to configure HTTP client")?;

        Ok(Self {
            base_url: normalized,
            http,
        })
    }

    pub fn from_base_url(base_url: &str) -> Result<Self> {
        let url = Url::parse(base_url).with_context(|| format!("invalid API url: {base_url}"))?;
        Self::new(url)
    }

    /// Call the liveness probe.
    pub async fn ping(&self) -> Result<serde_json::Value> {
        let url = self.endpoint("api/test")?;
        let response = self.http.get(url).send().await?;
        self.handle_response(response).await
    }

    /// Upload a photo and return the server's suggestions.
    pub async fn decorate(&self, photo: &Path, style: Option<&str>) -> Result<DecorResponse> {
        let bytes = tokio::fs::read(photo)
            .await
            .with_context(|| format!("failed to read {}", photo.display()))?;
        let filename = photo
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("photo")
            .to_string();
        let media_type = mime_guess::from_path(photo).first_or_octet_stream();

        let part = Part::bytes(bytes)
            .file_name(filename)
            .mime_str(media_type.as_ref())
            .context("invalid media type")?;
        let mut form = Form::new().part("photo", part);
        if let Some(style) = style {
            form = form.text("style", style.to_string());
        }

        let url = self.endpoint("api/decor")?;
        let response = self.http.post(url).multipart(form).send().await?;
        self.handle_response(response).await
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .with_context(|| format!("invalid API path: {path}"))
    }

    async fn handle_response<T>(&self, response: reqwest::Response) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        if response.status().is_success() {
            response
                .json::<T>()
                .await
                .context("failed to deserialize response body")
        } else {
            Err(self.response_error(response).await)
        }
    }

    async fn response_error(&self, response: reqwest::Response) -> anyhow::Error {
        let status = response.status();
        let bytes = response.bytes().await.unwrap_or_default();

        if let Ok(err) = serde_json::from_slice::<ErrorResponse>(&bytes) {
            return anyhow!("request failed ({status}): {}", err.error);
        }

        let message = String::from_utf8_lossy(&bytes);
        anyhow!("request failed ({status}): {message}")
    }
}
