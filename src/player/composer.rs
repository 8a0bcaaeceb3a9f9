//! Offline stand-in for a hosted text generator.

use rand::{Rng, SeedableRng, rngs::StdRng, seq::SliceRandom};
use serde_json::json;
use std::future::Future;
use std::sync::Mutex;
use std::time::Duration;

use super::generator::{GenerationError, GenerationRequest, TextGenerator};

const ADJECTIVES: &[&str] = &[
    "Chrome", "Neon", "Velvet", "Static", "Hollow", "Lunar", "Pixel", "Quartz", "Magnetic",
    "Infinite",
];
const NOUNS: &[&str] = &[
    "Horizon", "Arcade", "Tide", "Mainframe", "Mirage", "Circuit", "Skyline", "Signal", "Garden",
    "Cassette",
];
const ARTISTS: &[&str] = &[
    "Vapor Unit 9",
    "Dial-Up Dreams",
    "Sector Echo",
    "Null Pointer Choir",
    "Mall Ghost",
    "Cathode Kid",
];
const PLACES: &[&str] = &[
    "an abandoned shopping mall",
    "a rain-soaked rooftop in 2099",
    "the last open arcade on Mars",
    "a server farm under the ocean",
    "a highway made of light",
];
const COLORS: &[&str] = &["#22d3ee", "#ec4899", "#a855f7", "#f59e0b", "#10b981", "#f43f5e"];

/// Composes track metadata from word lists after a fixed delay.
///
/// Answers the compose request with the same JSON shape a hosted model
/// would return.
pub struct LocalComposer {
    latency: Duration,
    rng: Mutex<StdRng>,
}

impl LocalComposer {
    pub fn new(latency: Duration) -> Self {
        Self {
            latency,
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    pub fn with_seed(latency: Duration, seed: u64) -> Self {
        Self {
            latency,
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    fn compose(&self, request: &GenerationRequest) -> Result<String, GenerationError> {
        if request.prompt.trim().is_empty() {
            return Err(GenerationError::Invalid("empty prompt".to_string()));
        }

        let mut guard = self
            .rng
            .lock()
            .map_err(|_| GenerationError::Transport("composer state poisoned".to_string()))?;
        let rng: &mut StdRng = &mut guard;

        let title = format!("{} {}", pick(rng, ADJECTIVES), pick(rng, NOUNS));
        let artist = pick(rng, ARTISTS);
        let description = format!(
            "Recorded live in {}, looped {} times.",
            pick(rng, PLACES),
            rng.gen_range(2..99)
        );
        let color = pick(rng, COLORS);

        let body = json!({
            "title": title,
            "artist": artist,
            "description": description,
            "hexColor": color,
        });

        Ok(body.to_string())
    }
}

fn pick<R: Rng>(rng: &mut R, words: &[&'static str]) -> &'static str {
    words.choose(rng).copied().unwrap_or_default()
}

impl TextGenerator for LocalComposer {
    fn generate(
        &self,
        request: &GenerationRequest,
    ) -> impl Future<Output = Result<String, GenerationError>> + Send {
        let latency = self.latency;
        let answer = self.compose(request);

        async move {
            tokio::time::sleep(latency).await;
            answer
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::generator::GeneratedTrack;

    #[tokio::test]
    async fn test_composer_answers_with_valid_json() {
        let composer = LocalComposer::with_seed(Duration::ZERO, 42);
        let text = composer
            .generate(&GenerationRequest::compose())
            .await
            .unwrap();

        let generated = GeneratedTrack::parse(&text).unwrap();
        assert!(!generated.title.is_empty());
        assert!(ARTISTS.contains(&generated.artist.as_str()));
        assert!(COLORS.contains(&generated.hex_color.as_str()));
    }

    #[tokio::test]
    async fn test_seeded_composer_is_deterministic() {
        let a = LocalComposer::with_seed(Duration::ZERO, 5);
        let b = LocalComposer::with_seed(Duration::ZERO, 5);
        let request = GenerationRequest::compose();

        assert_eq!(
            a.generate(&request).await.unwrap(),
            b.generate(&request).await.unwrap()
        );
    }

    #[tokio::test]
    async fn test_empty_prompt_fails() {
        let composer = LocalComposer::with_seed(Duration::ZERO, 1);
        let request = GenerationRequest {
            prompt: " ".to_string(),
            schema: serde_json::Value::Null,
        };
        assert!(matches!(
            composer.generate(&request).await,
            Err(GenerationError::Invalid(_))
        ));
    }
}
