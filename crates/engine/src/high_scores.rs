//! High-score list and its persistence
//!
//! The list keeps the best [`HIGH_SCORE_LIMIT`] results, highest first.
//! Stores only move whole lists in and out; ordering and capping live in
//! [`HighScores`].

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use blockfall_types::HIGH_SCORE_LIMIT;

/// Key under which the list is kept in the store file
pub const HIGH_SCORES_KEY: &str = "tetrisHighScores";

/// One finished game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub score: u32,
    /// Local date, `YYYY-MM-DD`
    pub date: String,
}

impl HighScoreEntry {
    pub fn new(score: u32, date: impl Into<String>) -> Self {
        Self {
            score,
            date: date.into(),
        }
    }
}

/// Sorted, capped list of high scores
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HighScores {
    entries: Vec<HighScoreEntry>,
}

impl HighScores {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from stored entries in any order
    pub fn from_entries(entries: Vec<HighScoreEntry>) -> Self {
        let mut scores = Self { entries };
        scores.normalize();
        scores
    }

    /// Add a result, keeping the list sorted and capped
    pub fn record(&mut self, entry: HighScoreEntry) {
        self.entries.push(entry);
        self.normalize();
    }

    pub fn entries(&self) -> &[HighScoreEntry] {
        &self.entries
    }

    pub fn best(&self) -> Option<&HighScoreEntry> {
        self.entries.first()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // Stable sort: equal scores keep insertion order.
    fn normalize(&mut self) {
        self.entries.sort_by(|a, b| b.score.cmp(&a.score));
        self.entries.truncate(HIGH_SCORE_LIMIT);
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("score store I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("score store is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("score store has unexpected layout: {0}")]
    Format(String),
}

/// Persistence collaborator for the high-score list
pub trait ScoreStore {
    fn load(&self) -> Result<Vec<HighScoreEntry>, StoreError>;
    fn save(&mut self, entries: &[HighScoreEntry]) -> Result<(), StoreError>;
}

impl<S: ScoreStore + ?Sized> ScoreStore for &mut S {
    fn load(&self) -> Result<Vec<HighScoreEntry>, StoreError> {
        (**self).load()
    }

    fn save(&mut self, entries: &[HighScoreEntry]) -> Result<(), StoreError> {
        (**self).save(entries)
    }
}

/// In-memory store
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Vec<HighScoreEntry>,
    saves: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries(entries: Vec<HighScoreEntry>) -> Self {
        Self {
            entries,
            saves: 0,
        }
    }

    pub fn entries(&self) -> &[HighScoreEntry] {
        &self.entries
    }

    /// Number of successful saves
    pub fn saves(&self) -> usize {
        self.saves
    }
}

impl ScoreStore for MemoryStore {
    fn load(&self) -> Result<Vec<HighScoreEntry>, StoreError> {
        Ok(self.entries.clone())
    }

    fn save(&mut self, entries: &[HighScoreEntry]) -> Result<(), StoreError> {
        self.entries = entries.to_vec();
        self.saves += 1;
        Ok(())
    }
}

/// JSON object of key -> value in a single file
///
/// The list lives under [`HIGH_SCORES_KEY`]; any other keys in the file are
/// left as they are. A missing file reads as an empty list.
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

    fn read_object(&self) -> Result<Map<String, Value>, StoreError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => return Err(e.into()),
        };
        if text.trim().is_empty() {
            return Ok(Map::new());
        }
        match serde_json::from_str::<Value>(&text)? {
            Value::Object(map) => Ok(map),
            other => Err(StoreError::Format(format!(
                "expected a JSON object at the top level, found {}",
                json_kind(&other)
            ))),
        }
    }
}

impl ScoreStore for JsonFileStore {
    fn load(&self) -> Result<Vec<HighScoreEntry>, StoreError> {
        let mut map = self.read_object()?;
        match map.remove(HIGH_SCORES_KEY) {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(value @ Value::Array(_)) => Ok(serde_json::from_value(value)?),
            Some(other) => Err(StoreError::Format(format!(
                "expected an array under {:?}, found {}",
                HIGH_SCORES_KEY,
                json_kind(&other)
            ))),
        }
    }

    /// Write the list under its key, keeping other keys
    ///
    /// A file that is not a JSON object is replaced rather than blocking
    /// every later save.
    fn save(&mut self, entries: &[HighScoreEntry]) -> Result<(), StoreError> {
        let mut map = match self.read_object() {
            Ok(map) => map,
            Err(e @ (StoreError::Json(_) | StoreError::Format(_))) => {
                log::warn!("replacing unreadable {}: {}", self.path.display(), e);
                Map::new()
            }
            Err(e) => return Err(e),
        };
        map.insert(HIGH_SCORES_KEY.to_string(), serde_json::to_value(entries)?);
        let text = serde_json::to_string_pretty(&Value::Object(map))?;
        fs::write(&self.path, text)?;
        Ok(())
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
