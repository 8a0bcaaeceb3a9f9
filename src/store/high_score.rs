use anyhow::{Context, Result};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

/// Key under which the high score is stored
pub const HIGH_SCORE_KEY: &str = "snakeHighScore";

/// Where the best score survives between runs
pub trait HighScoreStore {
    /// Read the stored high score, 0 when nothing was saved yet
    fn load(&self) -> Result<u32>;

    fn save(&mut self, score: u32) -> Result<()>;
}

impl<S: HighScoreStore + ?Sized> HighScoreStore for Box<S> {
    fn load(&self) -> Result<u32> {
        (**self).load()
    }

    fn save(&mut self, score: u32) -> Result<()> {
        (**self).save(score)
    }
}

/// In-process store, forgotten on exit
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    value: Option<u32>,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_score(score: u32) -> Self {
        Self {
            value: Some(score),
            writes: 0,
        }
    }

    /// Number of successful saves
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl HighScoreStore for MemoryStore {
    fn load(&self) -> Result<u32> {
        Ok(self.value.unwrap_or(0))
    }

    fn save(&mut self, score: u32) -> Result<()> {
        self.value = Some(score);
        self.writes += 1;
        Ok(())
    }
}

/// A JSON object on disk used as a small key-value store.
///
/// Only [`HIGH_SCORE_KEY`] is written; any other keys already in the file
/// are kept as they are.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> Result<Map<String, Value>> {
        if !self.path.exists() {
            return Ok(Map::new());
        }

        let text = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read store {:?}", self.path))?;
        if text.trim().is_empty() {
            return Ok(Map::new());
        }

        let value: Value = serde_json::from_str(&text)
            .with_context(|| format!("Store {:?} is not valid JSON", self.path))?;
        match value {
            Value::Object(map) => Ok(map),
            _ => anyhow::bail!("Store {:?} does not hold a JSON object", self.path),
        }
    }
}

impl HighScoreStore for JsonFileStore {
    fn load(&self) -> Result<u32> {
        let map = self.read_map()?;
        let Some(value) = map.get(HIGH_SCORE_KEY) else {
            return Ok(0);
        };

        // Tolerate the score being stored as a string.
        let score = match value {
            Value::Number(n) => n.as_u64(),
            Value::String(s) => s.trim().parse::<u64>().ok(),
            _ => None,
        };

        score
            .and_then(|s| u32::try_from(s).ok())
            .with_context(|| format!("Invalid {HIGH_SCORE_KEY} value {value} in {:?}", self.path))
    }

    fn save(&mut self, score: u32) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory: {:?}", parent))?;
            }
        }

        let mut map = self.read_map()?;
        map.insert(HIGH_SCORE_KEY.to_string(), Value::from(score));

        let json = serde_json::to_string_pretty(&Value::Object(map))
            .context("Failed to serialize store")?;
        std::fs::write(&self.path, json)
            .with_context(|| format!("Failed to write store {:?}", self.path))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_memory_store() {
        let mut store = MemoryStore::new();
        assert_eq!(store.load().unwrap(), 0);

        store.save(40).unwrap();
        assert_eq!(store.load().unwrap(), 40);
        assert_eq!(store.writes(), 1);
    }

    #[test]
    fn test_missing_file_reads_zero() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("scores.json"));
        assert_eq!(store.load().unwrap(), 0);
    }

    #[test]
    fn test_file_store_persists() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("scores.json");

        let mut store = JsonFileStore::new(&path);
        store.save(130).unwrap();

        let reopened = JsonFileStore::new(&path);
        assert_eq!(reopened.load().unwrap(), 130);
    }

    #[test]
    fn test_file_store_keeps_other_keys() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("scores.json");
        std::fs::write(&path, r#"{"theme": "teal", "snakeHighScore": "20"}"#).unwrap();

        let mut store = JsonFileStore::new(&path);
        assert_eq!(store.load().unwrap(), 20);
        store.save(30).unwrap();

        let map: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(map["theme"], "teal");
        assert_eq!(map[HIGH_SCORE_KEY], 30);
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("scores.json");
        std::fs::write(&path, "[1, 2").unwrap();

        assert!(JsonFileStore::new(&path).load().is_err());
    }
}
