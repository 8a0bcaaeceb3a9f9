use serde::{Deserialize, Serialize};

use super::catalog::{AUDIO_POOL, FALLBACK_COLOR};

/// Settings for composing new tracks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerConfig {
    /// Audio URLs a composed track may be assigned
    pub audio_pool: Vec<String>,
    /// Accent colour when the generator leaves it blank
    pub fallback_color: String,
    /// Shortest composed duration, inclusive
    pub min_duration_secs: u32,
    /// Longest composed duration, exclusive
    pub max_duration_secs: u32,
    /// Simulated latency of the offline composer
    pub compose_latency_ms: u64,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            audio_pool: AUDIO_POOL.iter().map(|url| url.to_string()).collect(),
            fallback_color: FALLBACK_COLOR.to_string(),
            min_duration_secs: 180,
            max_duration_secs: 240,
            compose_latency_ms: 1_500,
        }
    }
}

impl PlayerConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.audio_pool.is_empty() {
            return Err("audio_pool must not be empty".to_string());
        }

        if self.min_duration_secs >= self.max_duration_secs {
            return Err(format!(
                "duration range [{}, {}) is empty",
                self.min_duration_secs, self.max_duration_secs
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PlayerConfig::default();
        assert_eq!(config.audio_pool.len(), 6);
        assert_eq!(config.min_duration_secs, 180);
        assert_eq!(config.max_duration_secs, 240);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate() {
        let config = PlayerConfig {
            audio_pool: Vec::new(),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = PlayerConfig {
            min_duration_secs: 240,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
