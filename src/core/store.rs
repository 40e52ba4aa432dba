//! Mood store: persisted date→entry history plus derived statistics
//!
//! Persistence contract:
//! - loading never fails; missing or corrupt data yields an empty history
//! - save failures are logged and swallowed, never surfaced to the caller

use chrono::{DateTime, Duration, NaiveDate, Utc};
use log::warn;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use crate::core::classifier;
use crate::types::{MoodEntry, MoodHistory, MoodStats, StoredEntry};
use crate::DEFAULT_SERIES_POINTS;

/// Sample history for first runs, oldest day first
const DEMO_MOODS: [&str; 14] = [
    "happy",
    "neutral",
    "happy",
    "very-happy",
    "sad",
    "neutral",
    "happy",
    "very-happy",
    "happy",
    "neutral",
    "sad",
    "happy",
    "very-happy",
    "happy",
];

// =============================================================================
// ERRORS
// =============================================================================

/// Why a storage operation failed. Callers of `log_mood` never see this;
/// the store degrades to in-memory operation instead.
#[derive(Debug)]
pub enum StorageError {
    Io(std::io::Error),
    Serialize(serde_json::Error),
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::Io(e) => write!(f, "storage unavailable: {}", e),
            StorageError::Serialize(e) => write!(f, "history serialization failed: {}", e),
        }
    }
}

impl std::error::Error for StorageError {}

// =============================================================================
// PORTS
// =============================================================================

/// Device-local key/value storage holding one JSON blob
pub trait Storage: Send {
    /// Read the blob; `Ok(None)` when nothing has been stored yet
    fn read(&self) -> Result<Option<String>, StorageError>;
    /// Replace the blob
    fn write(&self, contents: &str) -> Result<(), StorageError>;
}

/// File-backed storage at a fixed path
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Storage for FileStorage {
    fn read(&self) -> Result<Option<String>, StorageError> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::Io(e)),
        }
    }

    fn write(&self, contents: &str) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(StorageError::Io)?;
            }
        }
        std::fs::write(&self.path, contents).map_err(StorageError::Io)
    }
}

/// In-memory storage, used by tests and as the degraded fallback
#[derive(Default)]
pub struct MemoryStorage {
    blob: Mutex<Option<String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn read(&self) -> Result<Option<String>, StorageError> {
        Ok(self.blob.lock().unwrap().clone())
    }

    fn write(&self, contents: &str) -> Result<(), StorageError> {
        *self.blob.lock().unwrap() = Some(contents.to_string());
        Ok(())
    }
}

/// Source of "now" and "today", injected so date logic is testable
pub trait Clock: Send {
    fn now(&self) -> DateTime<Utc>;

    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

/// Wall clock
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Settable clock for tests and demos. Clones share the same instant.
#[derive(Clone)]
pub struct FixedClock {
    now: Arc<Mutex<DateTime<Utc>>>,
}

impl FixedClock {
    pub fn at(now: DateTime<Utc>) -> Self {
        Self {
            now: Arc::new(Mutex::new(now)),
        }
    }

    pub fn set(&self, now: DateTime<Utc>) {
        *self.now.lock().unwrap() = now;
    }

    pub fn advance_days(&self, days: i64) {
        let mut now = self.now.lock().unwrap();
        *now = *now + Duration::days(days);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}

// =============================================================================
// STORE
// =============================================================================

/// Owner of the persisted mood history
pub struct MoodStore {
    history: MoodHistory,
    storage: Box<dyn Storage>,
    clock: Box<dyn Clock>,
}

impl MoodStore {
    /// Load the history from storage. Any read or parse failure falls back
    /// to an empty history.
    pub fn new(storage: Box<dyn Storage>, clock: Box<dyn Clock>) -> Self {
        let history = match storage.read() {
            Ok(Some(blob)) => match serde_json::from_str::<MoodHistory>(&blob) {
                Ok(history) => history,
                Err(e) => {
                    warn!("mood history unreadable, starting empty: {}", e);
                    MoodHistory::new()
                }
            },
            Ok(None) => MoodHistory::new(),
            Err(e) => {
                warn!("mood history unreadable, starting empty: {}", e);
                MoodHistory::new()
            }
        };
        Self {
            history,
            storage,
            clock,
        }
    }

    /// Log a mood for today. Overwrites any entry already logged today;
    /// the score is looked up once and frozen into the entry.
    pub fn log_mood(&mut self, label: &str) -> MoodEntry {
        let today = self.clock.today();
        let stored = StoredEntry {
            mood: label.to_string(),
            score: classifier::score_of(label),
            timestamp: self.clock.now(),
        };
        self.history.insert(today, stored.clone());
        self.persist();
        MoodEntry {
            date: today,
            mood: stored.mood,
            score: stored.score,
            timestamp: stored.timestamp,
        }
    }

    /// Derived statistics over the whole history
    pub fn stats(&self) -> MoodStats {
        MoodStats {
            streak: self.streak(),
            average_label: self.average_label(),
            total_entries: self.history.len(),
        }
    }

    /// Consecutive logged days ending today. A day without an entry today
    /// breaks the run immediately, even if yesterday starts an unbroken one.
    fn streak(&self) -> u32 {
        let today = self.clock.today();
        (0i64..)
            .take_while(|k| self.history.contains_key(&(today - Duration::days(*k))))
            .count() as u32
    }

    fn average_label(&self) -> String {
        if self.history.is_empty() {
            return "No Data".to_string();
        }
        let sum: u64 = self.history.values().map(|e| e.score as u64).sum();
        let avg = sum as f64 / self.history.len() as f64;
        classifier::bucket_average(avg).to_string()
    }

    /// Chart series: all entries date-ascending, truncated to the most
    /// recent `max_points`
    pub fn series(&self, max_points: Option<usize>) -> Vec<(NaiveDate, u8)> {
        let max_points = max_points.unwrap_or(DEFAULT_SERIES_POINTS);
        let skip = self.history.len().saturating_sub(max_points);
        self.history
            .iter()
            .skip(skip)
            .map(|(date, entry)| (*date, entry.score))
            .collect()
    }

    pub fn total_entries(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// Seed two weeks of sample data on first runs. No-op when any
    /// history exists.
    pub fn seed_demo_history(&mut self) {
        if !self.history.is_empty() {
            return;
        }
        let today = self.clock.today();
        for (i, mood) in DEMO_MOODS.iter().enumerate() {
            let date = today - Duration::days((DEMO_MOODS.len() - 1 - i) as i64);
            let timestamp = date
                .and_hms_opt(12, 0, 0)
                .unwrap_or_default()
                .and_utc();
            self.history.insert(
                date,
                StoredEntry {
                    mood: mood.to_string(),
                    score: classifier::score_of(mood),
                    timestamp,
                },
            );
        }
        self.persist();
    }

    /// Write the full history back to storage; failures are logged only
    fn persist(&self) {
        let result = serde_json::to_string_pretty(&self.history)
            .map_err(StorageError::Serialize)
            .and_then(|blob| self.storage.write(&blob));
        if let Err(e) = result {
            warn!("could not save mood history: {}", e);
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
