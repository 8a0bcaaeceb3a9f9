//! Contract with the external text generator that names new tracks.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::future::Future;
use thiserror::Error;

use super::catalog::COMPOSE_PROMPT;

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("generator unavailable: {0}")]
    Transport(String),
    #[error("response is not the expected JSON: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("response failed validation: {0}")]
    Invalid(String),
}

/// One request to the generator: a prompt plus the JSON shape the answer
/// must have.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationRequest {
    pub prompt: String,
    pub schema: Value,
}

impl GenerationRequest {
    /// The fixed compose request
    pub fn compose() -> Self {
        Self {
            prompt: COMPOSE_PROMPT.to_string(),
            schema: json!({
                "type": "object",
                "properties": {
                    "title": { "type": "string" },
                    "artist": { "type": "string" },
                    "description": { "type": "string" },
                    "hexColor": { "type": "string", "description": "A hex color code" }
                },
                "required": ["title", "artist", "description", "hexColor"]
            }),
        }
    }
}

/// Fields the generator returns for a new track
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedTrack {
    pub title: String,
    pub artist: String,
    pub description: String,
    #[serde(rename = "hexColor")]
    pub hex_color: String,
}

impl GeneratedTrack {
    /// Parse and validate a raw generator response
    pub fn parse(text: &str) -> Result<Self, GenerationError> {
        let generated: GeneratedTrack = serde_json::from_str(text.trim())?;

        if generated.title.trim().is_empty() {
            return Err(GenerationError::Invalid("title is empty".to_string()));
        }
        if generated.artist.trim().is_empty() {
            return Err(GenerationError::Invalid("artist is empty".to_string()));
        }

        Ok(generated)
    }

    /// The colour to show, or `fallback` when the response has no usable
    /// `#rgb`/`#rrggbb` value
    pub fn accent_color(&self, fallback: &str) -> String {
        let color = self.hex_color.trim();
        if is_hex_color(color) {
            color.to_string()
        } else {
            fallback.to_string()
        }
    }
}

fn is_hex_color(value: &str) -> bool {
    match value.strip_prefix('#') {
        Some(digits) => {
            matches!(digits.len(), 3 | 6) && digits.chars().all(|c| c.is_ascii_hexdigit())
        }
        None => false,
    }
}

/// A service that answers a prompt with JSON text matching the request's
/// schema.
pub trait TextGenerator {
    fn generate(
        &self,
        request: &GenerationRequest,
    ) -> impl Future<Output = Result<String, GenerationError>> + Send;
}
