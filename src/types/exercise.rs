//! Exercise state: breathing phases and grounding step reports

use serde::{Deserialize, Serialize};

/// One stage of the paced-breathing cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BreathingPhase {
    /// Not running
    Idle,
    /// Brief settling pause before the first inhale
    Prepare,
    Inhale,
    Hold,
    Exhale,
}

impl BreathingPhase {
    /// Instruction line shown to the user while in this phase
    pub fn instruction(&self) -> &'static str {
        match self {
            BreathingPhase::Idle => "Exercise stopped. You did great!",
            BreathingPhase::Prepare => "Get ready...",
            BreathingPhase::Inhale => "Breathe in slowly...",
            BreathingPhase::Hold => "Hold your breath...",
            BreathingPhase::Exhale => "Breathe out slowly...",
        }
    }

    /// ANSI color for terminal display
    pub fn color_code(&self) -> &'static str {
        match self {
            BreathingPhase::Idle => "\x1b[90m",    // Gray
            BreathingPhase::Prepare => "\x1b[33m", // Yellow
            BreathingPhase::Inhale => "\x1b[36m",  // Cyan
            BreathingPhase::Hold => "\x1b[35m",    // Magenta
            BreathingPhase::Exhale => "\x1b[32m",  // Green
        }
    }

    /// Reset ANSI color
    pub fn color_reset() -> &'static str {
        "\x1b[0m"
    }
}

impl std::fmt::Display for BreathingPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            BreathingPhase::Idle => "IDLE",
            BreathingPhase::Prepare => "PREPARE",
            BreathingPhase::Inhale => "INHALE",
            BreathingPhase::Hold => "HOLD",
            BreathingPhase::Exhale => "EXHALE",
        };
        write!(f, "{}", name)
    }
}

/// Phase-change event delivered to breathing subscribers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreathingUpdate {
    pub phase: BreathingPhase,
    /// Completed inhale→hold→exhale cycles so far, 0..=5
    pub cycles_completed: u8,
    /// True exactly once, on the transition back to idle after the last cycle
    pub completed: bool,
}

/// Report returned after every grounding transition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroundingUpdate {
    /// Current step, 1-based
    pub step_index: u8,
    pub total_steps: u8,
    /// Whether the view should show the "previous" control
    pub can_go_back: bool,
    /// True when `next()` was called on the final step; the pointer has
    /// already reset to step 1
    pub completed: bool,
}
