//! JSON bodies exchanged over `/api`, shared by the server and the client.

use serde::{Deserialize, Serialize};

/// Successful `POST /api/decor` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecorResponse {
    pub suggestions: Vec<String>,
    pub image_url: String,
}

/// Body of every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
