//! Core types for MindBridge

mod chat;
mod exercise;
mod mood;

pub use chat::{Author, Category, ChatMessage, ChatReply};
pub use exercise::{BreathingPhase, BreathingUpdate, GroundingUpdate};
pub use mood::{MoodEntry, MoodHistory, MoodLabel, MoodStats, StoredEntry, ALL_MOODS};
