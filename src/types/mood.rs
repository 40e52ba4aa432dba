//! Mood data model: labels, entries, derived stats

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

/// The five ordinal mood labels, worst to best
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MoodLabel {
    VerySad,
    Sad,
    Neutral,
    Happy,
    VeryHappy,
}

/// All labels, score order
pub const ALL_MOODS: [MoodLabel; 5] = [
    MoodLabel::VerySad,
    MoodLabel::Sad,
    MoodLabel::Neutral,
    MoodLabel::Happy,
    MoodLabel::VeryHappy,
];

impl MoodLabel {
    /// Wire form, matching the persisted `mood` field
    pub fn as_str(&self) -> &'static str {
        match self {
            MoodLabel::VerySad => "very-sad",
            MoodLabel::Sad => "sad",
            MoodLabel::Neutral => "neutral",
            MoodLabel::Happy => "happy",
            MoodLabel::VeryHappy => "very-happy",
        }
    }

    /// Emoji for terminal display
    pub fn emoji(&self) -> &'static str {
        match self {
            MoodLabel::VerySad => "😢",
            MoodLabel::Sad => "😕",
            MoodLabel::Neutral => "😐",
            MoodLabel::Happy => "🙂",
            MoodLabel::VeryHappy => "😄",
        }
    }
}

impl FromStr for MoodLabel {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "very-sad" => Ok(MoodLabel::VerySad),
            "sad" => Ok(MoodLabel::Sad),
            "neutral" => Ok(MoodLabel::Neutral),
            "happy" => Ok(MoodLabel::Happy),
            "very-happy" => Ok(MoodLabel::VeryHappy),
            _ => Err(()),
        }
    }
}

impl std::fmt::Display for MoodLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One logged mood, keyed by calendar date. Replaced wholesale on re-log;
/// the score is frozen at write time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodEntry {
    /// Calendar date the entry belongs to
    pub date: NaiveDate,
    /// Raw label as submitted (unrecognized labels are kept verbatim)
    pub mood: String,
    /// Classifier score at write time, 1..=5
    pub score: u8,
    /// Wall-clock moment the entry was logged
    pub timestamp: DateTime<Utc>,
}

/// On-disk form of an entry; the date lives in the map key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredEntry {
    pub mood: String,
    pub score: u8,
    pub timestamp: DateTime<Utc>,
}

/// Date → entry mapping as persisted. BTreeMap keeps reads date-sorted,
/// and `NaiveDate` keys serialize to ISO `YYYY-MM-DD` strings.
pub type MoodHistory = BTreeMap<NaiveDate, StoredEntry>;

/// Derived statistics over the whole history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodStats {
    /// Consecutive logged days ending today; 0 when today has no entry
    pub streak: u32,
    /// Bucketed mean of all scores, or "No Data"
    pub average_label: String,
    /// Number of dates with an entry
    pub total_entries: usize,
}
