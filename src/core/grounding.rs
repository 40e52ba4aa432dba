//! Grounding exercise: bounded pointer over the 5-4-3-2-1 steps

use crate::types::GroundingUpdate;

/// Step prompts, in order. The 5-4-3-2-1 technique walks the senses.
pub const GROUNDING_STEPS: &[&str] = &[
    "Name 5 things you can see around you.",
    "Name 4 things you can touch.",
    "Name 3 things you can hear.",
    "Name 2 things you can smell.",
    "Name 1 thing you can taste.",
];

/// Bounded step pointer. `next()` past the last step signals completion and
/// resets to step 1; `prev()` at step 1 is a no-op.
#[derive(Debug)]
pub struct GroundingExercise {
    step_index: u8,
}

impl Default for GroundingExercise {
    fn default() -> Self {
        Self::new()
    }
}

impl GroundingExercise {
    pub fn new() -> Self {
        Self { step_index: 1 }
    }

    pub fn total_steps(&self) -> u8 {
        GROUNDING_STEPS.len() as u8
    }

    pub fn step_index(&self) -> u8 {
        self.step_index
    }

    /// Prompt text for the current step
    pub fn current_step(&self) -> &'static str {
        GROUNDING_STEPS[self.step_index as usize - 1]
    }

    /// Advance one step; at the final step, report completion and reset
    pub fn next(&mut self) -> GroundingUpdate {
        if self.step_index < self.total_steps() {
            self.step_index += 1;
            self.report(false)
        } else {
            self.step_index = 1;
            self.report(true)
        }
    }

    /// Go back one step; no-op at the first step
    pub fn prev(&mut self) -> GroundingUpdate {
        if self.step_index > 1 {
            self.step_index -= 1;
        }
        self.report(false)
    }

    /// Restart from step 1, e.g. when the exercise modal reopens
    pub fn reset(&mut self) -> GroundingUpdate {
        self.step_index = 1;
        self.report(false)
    }

    fn report(&self, completed: bool) -> GroundingUpdate {
        GroundingUpdate {
            step_index: self.step_index,
            total_steps: self.total_steps(),
            can_go_back: self.step_index > 1,
            completed,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
