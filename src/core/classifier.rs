//! Mood classifier: fixed label→score and label→display tables
//!
//! Pure lookups, no state. Unrecognized labels never error; they fall back
//! to the neutral score and an "Unknown" display label.

use crate::types::MoodLabel;
use crate::{AVG_HAPPY, AVG_NEUTRAL, AVG_SAD, AVG_VERY_HAPPY, DEFAULT_MOOD_SCORE};

/// Numeric score for a mood label, 1 (very-sad) .. 5 (very-happy).
/// Unrecognized labels score `DEFAULT_MOOD_SCORE`.
pub fn score_of(label: &str) -> u8 {
    match label.parse::<MoodLabel>() {
        Ok(MoodLabel::VerySad) => 1,
        Ok(MoodLabel::Sad) => 2,
        Ok(MoodLabel::Neutral) => 3,
        Ok(MoodLabel::Happy) => 4,
        Ok(MoodLabel::VeryHappy) => 5,
        Err(()) => DEFAULT_MOOD_SCORE,
    }
}

/// Human-readable form of a mood label, "Unknown" for anything unrecognized
pub fn display_label_of(label: &str) -> &'static str {
    match label.parse::<MoodLabel>() {
        Ok(MoodLabel::VerySad) => "Very Sad",
        Ok(MoodLabel::Sad) => "Sad",
        Ok(MoodLabel::Neutral) => "Neutral",
        Ok(MoodLabel::Happy) => "Happy",
        Ok(MoodLabel::VeryHappy) => "Very Happy",
        Err(()) => "Unknown",
    }
}

/// Bucket a mean score to the nearest mood display label.
/// Thresholds sit halfway between adjacent scores so the buckets stay
/// symmetric with the score table above.
pub fn bucket_average(avg: f64) -> &'static str {
    if avg >= AVG_VERY_HAPPY {
        "Very Happy"
    } else if avg >= AVG_HAPPY {
        "Happy"
    } else if avg >= AVG_NEUTRAL {
        "Neutral"
    } else if avg >= AVG_SAD {
        "Sad"
    } else {
        "Very Sad"
    }
}

/// Encouragement line shown right after a mood is logged
pub fn feedback_for(label: &str) -> &'static str {
    match label.parse::<MoodLabel>() {
        Ok(MoodLabel::VerySad) => {
            "I'm here for you. Consider reaching out for support if you need it."
        }
        Ok(MoodLabel::Sad) => {
            "It's okay to have difficult days. You're doing great by tracking your mood."
        }
        Ok(MoodLabel::Neutral) => "Every day is a step forward. Keep taking care of yourself.",
        Ok(MoodLabel::Happy) => {
            "Great to see you're feeling good today! Keep up the positive momentum."
        }
        Ok(MoodLabel::VeryHappy) => "Wonderful! I'm so glad you're having such a great day!",
        Err(()) => "Thanks for checking in. Every log helps you see your own patterns.",
    }
}

// =============================================================================
// TESTS
// =============================================================================
