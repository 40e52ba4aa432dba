//! Paced-breathing engine: timed state machine with cancellation tokens
//!
//! State transitions:
//! - IDLE → PREPARE on start (immediate)
//! - PREPARE → INHALE after 1s
//! - INHALE → HOLD after 4s
//! - HOLD → EXHALE after 7s
//! - EXHALE → INHALE after 8s (cycle++), or → IDLE once 5 cycles are done
//!
//! The engine itself is synchronous; a driver (see `core::session`) sleeps
//! the returned delay and calls `advance` with the generation it captured.
//! `start` and `stop` bump the generation, so a callback scheduled before
//! either is a guaranteed no-op. That makes cancellation race-free without
//! flags or timer handles.

use std::time::Duration;

use crate::types::{BreathingPhase, BreathingUpdate};
use crate::{BREATHING_CYCLES, EXHALE_MS, HOLD_MS, INHALE_MS, PREPARE_MS};

/// One step of the exercise: the update to publish, how long the current
/// phase lasts, and the generation the next `advance` call must present.
#[derive(Debug, Clone, PartialEq)]
pub struct BreathingTick {
    pub update: BreathingUpdate,
    /// Dwell of the phase just entered; `None` when the exercise is over
    pub next_delay: Option<Duration>,
    pub generation: u64,
}

/// Breathing exercise state machine
#[derive(Debug)]
pub struct BreathingEngine {
    phase: BreathingPhase,
    cycles_completed: u8,
    generation: u64,
}

impl Default for BreathingEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl BreathingEngine {
    pub fn new() -> Self {
        Self {
            phase: BreathingPhase::Idle,
            cycles_completed: 0,
            generation: 0,
        }
    }

    /// Begin a new exercise. Always restarts: any transition scheduled for
    /// an earlier run is invalidated by the generation bump.
    pub fn start(&mut self) -> BreathingTick {
        self.generation += 1;
        self.phase = BreathingPhase::Prepare;
        self.cycles_completed = 0;
        BreathingTick {
            update: self.update(false),
            next_delay: Some(Duration::from_millis(PREPARE_MS)),
            generation: self.generation,
        }
    }

    /// Apply the next timed transition. Returns `None` when the presented
    /// generation is stale or the engine is idle; the caller must then stop
    /// driving.
    pub fn advance(&mut self, generation: u64) -> Option<BreathingTick> {
        if generation != self.generation || self.phase == BreathingPhase::Idle {
            return None;
        }

        let (next_phase, completed) = match self.phase {
            BreathingPhase::Prepare => (BreathingPhase::Inhale, false),
            BreathingPhase::Inhale => (BreathingPhase::Hold, false),
            BreathingPhase::Hold => (BreathingPhase::Exhale, false),
            BreathingPhase::Exhale => {
                self.cycles_completed += 1;
                if self.cycles_completed >= BREATHING_CYCLES {
                    (BreathingPhase::Idle, true)
                } else {
                    (BreathingPhase::Inhale, false)
                }
            }
            BreathingPhase::Idle => unreachable!(),
        };

        self.phase = next_phase;
        let next_delay = match next_phase {
            BreathingPhase::Inhale => Some(Duration::from_millis(INHALE_MS)),
            BreathingPhase::Hold => Some(Duration::from_millis(HOLD_MS)),
            BreathingPhase::Exhale => Some(Duration::from_millis(EXHALE_MS)),
            BreathingPhase::Idle => None,
            BreathingPhase::Prepare => unreachable!(),
        };

        Some(BreathingTick {
            update: self.update(completed),
            next_delay,
            generation: self.generation,
        })
    }

    /// Force the engine back to idle and invalidate pending transitions
    pub fn stop(&mut self) -> BreathingUpdate {
        self.generation += 1;
        self.phase = BreathingPhase::Idle;
        self.update(false)
    }

    pub fn phase(&self) -> BreathingPhase {
        self.phase
    }

    pub fn cycles_completed(&self) -> u8 {
        self.cycles_completed
    }

    pub fn is_active(&self) -> bool {
        self.phase != BreathingPhase::Idle
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    fn update(&self, completed: bool) -> BreathingUpdate {
        BreathingUpdate {
            phase: self.phase,
            cycles_completed: self.cycles_completed,
            completed,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// Drive the engine to completion, collecting every phase
    fn run_to_completion(engine: &mut BreathingEngine) -> Vec<BreathingUpdate> {
        let tick = engine.start();
        let generation = tick.generation;
        let mut updates = vec![tick.update];
        while let Some(tick) = engine.advance(generation) {
            updates.push(tick.update.clone());
            if tick.next_delay.is_none() {
                break;
            }
        }
        updates
    }

    #[test]
    fn test_initial_state_is_idle() {
        let engine = BreathingEngine::new();
        assert_eq!(engine.phase(), BreathingPhase::Idle);
        assert!(!engine.is_active());
    }

    #[test]
    fn test_start_enters_prepare_with_one_second_dwell() {
        let mut engine = BreathingEngine::new();
        let tick = engine.start();
        assert_eq!(tick.update.phase, BreathingPhase::Prepare);
        assert_eq!(tick.next_delay, Some(Duration::from_millis(1000)));
        assert!(engine.is_active());
    }

    #[test]
    fn test_phase_sequence_of_one_cycle() {
        let mut engine = BreathingEngine::new();
        let generation = engine.start().generation;

        let inhale = engine.advance(generation).unwrap();
        assert_eq!(inhale.update.phase, BreathingPhase::Inhale);
        assert_eq!(inhale.next_delay, Some(Duration::from_millis(4000)));

        let hold = engine.advance(generation).unwrap();
        assert_eq!(hold.update.phase, BreathingPhase::Hold);
        assert_eq!(hold.next_delay, Some(Duration::from_millis(7000)));

        let exhale = engine.advance(generation).unwrap();
        assert_eq!(exhale.update.phase, BreathingPhase::Exhale);
        assert_eq!(exhale.next_delay, Some(Duration::from_millis(8000)));

        // End of first exhale loops back to inhale
        let next = engine.advance(generation).unwrap();
        assert_eq!(next.update.phase, BreathingPhase::Inhale);
        assert_eq!(next.update.cycles_completed, 1);
    }

    #[test]
    fn test_completes_after_five_cycles() {
        let mut engine = BreathingEngine::new();
        let updates = run_to_completion(&mut engine);

        let last = updates.last().unwrap();
        assert_eq!(last.phase, BreathingPhase::Idle);
        assert!(last.completed);
        assert_eq!(last.cycles_completed, BREATHING_CYCLES);
        assert!(!engine.is_active());

        // prepare + 5 * (inhale, hold, exhale) with the final exhale
        // transitioning to idle
        let exhales = updates
            .iter()
            .filter(|u| u.phase == BreathingPhase::Exhale)
            .count();
        assert_eq!(exhales, BREATHING_CYCLES as usize);
    }

    #[test]
    fn test_completed_signals_exactly_once() {
        let mut engine = BreathingEngine::new();
        let updates = run_to_completion(&mut engine);
        assert_eq!(updates.iter().filter(|u| u.completed).count(), 1);
    }

    #[test]
    fn test_stale_generation_is_noop() {
        let mut engine = BreathingEngine::new();
        let old = engine.start().generation;
        engine.advance(old).unwrap();

        // Restart invalidates the old token
        let fresh = engine.start().generation;
        assert!(engine.advance(old).is_none());
        assert_eq!(engine.phase(), BreathingPhase::Prepare);

        // The fresh token still works
        assert!(engine.advance(fresh).is_some());
    }

    #[test]
    fn test_stop_forces_idle_and_cancels() {
        let mut engine = BreathingEngine::new();
        let generation = engine.start().generation;
        engine.advance(generation).unwrap(); // inhale
        engine.advance(generation).unwrap(); // hold

        let update = engine.stop();
        assert_eq!(update.phase, BreathingPhase::Idle);
        assert!(!update.completed);

        // The scheduled hold→exhale transition can never fire now
        assert!(engine.advance(generation).is_none());
        assert_eq!(engine.phase(), BreathingPhase::Idle);
    }

    #[test]
    fn test_advance_when_idle_is_noop() {
        let mut engine = BreathingEngine::new();
        assert!(engine.advance(0).is_none());
    }
}
