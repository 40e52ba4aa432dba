//! MindBridge core: mood history, supportive chat responder, guided exercises
//!
//! The library is the headless core; `main.rs` is the terminal view on top of it.

pub mod core;
pub mod types;

// =============================================================================
// BREATHING TIMINGS
// =============================================================================

/// Dwell before the first inhale (milliseconds)
pub const PREPARE_MS: u64 = 1000;

/// Inhale phase duration (milliseconds)
pub const INHALE_MS: u64 = 4000;

/// Hold phase duration (milliseconds)
pub const HOLD_MS: u64 = 7000;

/// Exhale phase duration (milliseconds)
pub const EXHALE_MS: u64 = 8000;

/// Full inhale→hold→exhale cycles per exercise
pub const BREATHING_CYCLES: u8 = 5;

// =============================================================================
// MOOD SCORING
// =============================================================================

/// Score assigned to labels the classifier does not recognize
pub const DEFAULT_MOOD_SCORE: u8 = 3;

/// Average-score thresholds for the bucketed trend label.
/// Must stay consistent with the per-label score table in `core::classifier`.
pub const AVG_VERY_HAPPY: f64 = 4.5;
pub const AVG_HAPPY: f64 = 3.5;
pub const AVG_NEUTRAL: f64 = 2.5;
pub const AVG_SAD: f64 = 1.5;

/// Chart series length when the caller does not ask for more
pub const DEFAULT_SERIES_POINTS: usize = 30;

// =============================================================================
// CHAT
// =============================================================================

/// Simulated "thinking" delay bounds for assistant replies (milliseconds).
/// The view sleeps a uniform pick from this range before rendering.
pub const TYPING_DELAY_MIN_MS: u64 = 1000;
pub const TYPING_DELAY_MAX_MS: u64 = 3000;

// =============================================================================
// PERSISTENCE
// =============================================================================

/// Default on-disk location of the mood history blob
pub const DEFAULT_HISTORY_FILE: &str = "./mindbridge-mood-history.json";

// =============================================================================
// VERSION
// =============================================================================

pub const VERSION: &str = "1.0.0";
