//! Wellness session: the single context object the view talks to
//!
//! Owns the mood store, chat responder and both exercises. Breathing runs on
//! a spawned tokio task that sleeps each phase dwell and advances the engine;
//! phase changes fan out over a broadcast channel. All mutation goes through
//! `&mut self` or the engine mutex, so a stats read can never reenter
//! `log_mood`.

use chrono::NaiveDate;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::broadcast;

use crate::core::breathing::{BreathingEngine, BreathingTick};
use crate::core::grounding::GroundingExercise;
use crate::core::responder::ChatResponder;
use crate::core::store::{Clock, MoodStore, Storage};
use crate::types::{BreathingPhase, BreathingUpdate, ChatReply, GroundingUpdate, MoodEntry, MoodStats};

/// Buffered phase-change events per subscriber
const BREATHING_CHANNEL_CAPACITY: usize = 100;

/// One session = one running instance of the companion
pub struct WellnessSession {
    store: MoodStore,
    responder: ChatResponder,
    breathing: Arc<Mutex<BreathingEngine>>,
    grounding: GroundingExercise,
    breathing_tx: broadcast::Sender<BreathingUpdate>,
}

impl WellnessSession {
    /// Session with an entropy-seeded responder
    pub fn new(storage: Box<dyn Storage>, clock: Box<dyn Clock>) -> Self {
        Self::with_responder(storage, clock, ChatResponder::new())
    }

    /// Session with a caller-supplied responder (e.g. seeded for tests)
    pub fn with_responder(
        storage: Box<dyn Storage>,
        clock: Box<dyn Clock>,
        responder: ChatResponder,
    ) -> Self {
        let (breathing_tx, _) = broadcast::channel(BREATHING_CHANNEL_CAPACITY);
        Self {
            store: MoodStore::new(storage, clock),
            responder,
            breathing: Arc::new(Mutex::new(BreathingEngine::new())),
            grounding: GroundingExercise::new(),
            breathing_tx,
        }
    }

    // =========================================================================
    // MOOD
    // =========================================================================

    pub fn log_mood(&mut self, label: &str) -> MoodEntry {
        self.store.log_mood(label)
    }

    pub fn stats(&self) -> MoodStats {
        self.store.stats()
    }

    pub fn series(&self, max_points: Option<usize>) -> Vec<(NaiveDate, u8)> {
        self.store.series(max_points)
    }

    pub fn seed_demo_history(&mut self) {
        self.store.seed_demo_history()
    }

    pub fn store(&self) -> &MoodStore {
        &self.store
    }

    // =========================================================================
    // CHAT
    // =========================================================================

    pub fn classify_and_reply(&mut self, text: &str) -> ChatReply {
        self.responder.classify_and_reply(text)
    }

    // =========================================================================
    // BREATHING
    // =========================================================================

    /// Phase-change events for the current and all future breathing runs
    pub fn subscribe_breathing(&self) -> broadcast::Receiver<BreathingUpdate> {
        self.breathing_tx.subscribe()
    }

    /// Start (or restart) the breathing exercise. Must be called from within
    /// a tokio runtime; the phase driver is spawned here.
    pub fn start_breathing(&self) -> BreathingUpdate {
        let tick = self.breathing.lock().unwrap().start();
        let BreathingTick {
            update,
            next_delay,
            generation,
        } = tick;
        let _ = self.breathing_tx.send(update.clone());
        if let Some(delay) = next_delay {
            spawn_breathing_driver(
                Arc::clone(&self.breathing),
                self.breathing_tx.clone(),
                delay,
                generation,
            );
        }
        update
    }

    /// Stop the exercise and cancel any scheduled phase transition
    pub fn stop_breathing(&self) -> BreathingUpdate {
        let update = self.breathing.lock().unwrap().stop();
        let _ = self.breathing_tx.send(update.clone());
        update
    }

    pub fn breathing_phase(&self) -> BreathingPhase {
        self.breathing.lock().unwrap().phase()
    }

    // =========================================================================
    // GROUNDING
    // =========================================================================

    pub fn grounding_next(&mut self) -> GroundingUpdate {
        self.grounding.next()
    }

    pub fn grounding_prev(&mut self) -> GroundingUpdate {
        self.grounding.prev()
    }

    pub fn grounding_reset(&mut self) -> GroundingUpdate {
        self.grounding.reset()
    }

    pub fn grounding_step_text(&self) -> &'static str {
        self.grounding.current_step()
    }
}

/// Sleep out each phase dwell and advance the engine. The captured
/// generation goes stale the moment the engine is stopped or restarted;
/// a stale advance returns `None` and the driver exits without firing.
fn spawn_breathing_driver(
    engine: Arc<Mutex<BreathingEngine>>,
    tx: broadcast::Sender<BreathingUpdate>,
    first_delay: Duration,
    generation: u64,
) {
    tokio::spawn(async move {
        let mut delay = first_delay;
        loop {
            tokio::time::sleep(delay).await;
            let tick = engine.lock().unwrap().advance(generation);
            let Some(BreathingTick {
                update, next_delay, ..
            }) = tick
            else {
                break;
            };
            let _ = tx.send(update);
            match next_delay {
                Some(d) => delay = d,
                None => break,
            }
        }
    });
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::store::{FixedClock, MemoryStorage};
    use crate::types::Category;
    use chrono::{TimeZone, Utc};

    fn session() -> WellnessSession {
        WellnessSession::with_responder(
            Box::new(MemoryStorage::new()),
            Box::new(FixedClock::at(
                Utc.with_ymd_and_hms(2025, 6, 15, 10, 0, 0).unwrap(),
            )),
            ChatResponder::seeded(1),
        )
    }

    #[test]
    fn test_mood_flow_through_session() {
        let mut session = session();
        session.log_mood("happy");
        let stats = session.stats();
        assert_eq!(stats.total_entries, 1);
        assert_eq!(stats.streak, 1);
    }

    #[test]
    fn test_chat_flow_through_session() {
        let mut session = session();
        let reply = session.classify_and_reply("I feel hopeless");
        assert!(reply.is_crisis);
        assert_eq!(reply.category, Category::Crisis);
    }

    #[test]
    fn test_grounding_flow_through_session() {
        let mut session = session();
        assert_eq!(session.grounding_next().step_index, 2);
        assert_eq!(session.grounding_prev().step_index, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_breathing_full_cycle_events() {
        let session = session();
        let mut rx = session.subscribe_breathing();

        let first = session.start_breathing();
        assert_eq!(first.phase, BreathingPhase::Prepare);

        let mut updates = Vec::new();
        loop {
            let update = rx.recv().await.unwrap();
            let done = update.completed;
            updates.push(update);
            if done {
                break;
            }
        }

        // prepare + 5 * (inhale, hold, exhale); final exhale ends in idle
        assert_eq!(updates[0].phase, BreathingPhase::Prepare);
        assert_eq!(updates[1].phase, BreathingPhase::Inhale);
        assert_eq!(updates[2].phase, BreathingPhase::Hold);
        assert_eq!(updates[3].phase, BreathingPhase::Exhale);
        let last = updates.last().unwrap();
        assert_eq!(last.phase, BreathingPhase::Idle);
        assert_eq!(last.cycles_completed, 5);
        assert_eq!(session.breathing_phase(), BreathingPhase::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_during_hold_cancels_transition() {
        let session = session();
        let mut rx = session.subscribe_breathing();
        session.start_breathing();

        // prepare → inhale → hold
        assert_eq!(rx.recv().await.unwrap().phase, BreathingPhase::Prepare);
        assert_eq!(rx.recv().await.unwrap().phase, BreathingPhase::Inhale);
        assert_eq!(rx.recv().await.unwrap().phase, BreathingPhase::Hold);

        // Stop before the 7s hold dwell elapses
        let update = session.stop_breathing();
        assert_eq!(update.phase, BreathingPhase::Idle);
        assert_eq!(rx.recv().await.unwrap().phase, BreathingPhase::Idle);

        // Let the stale driver wake up; hold→exhale must never fire
        tokio::time::sleep(Duration::from_secs(60)).await;
        assert!(matches!(
            rx.try_recv(),
            Err(broadcast::error::TryRecvError::Empty)
        ));
        assert_eq!(session.breathing_phase(), BreathingPhase::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_invalidates_previous_run() {
        let session = session();
        let mut rx = session.subscribe_breathing();

        session.start_breathing();
        assert_eq!(rx.recv().await.unwrap().phase, BreathingPhase::Prepare);
        assert_eq!(rx.recv().await.unwrap().phase, BreathingPhase::Inhale);

        // Restart mid-run: the old driver dies on its stale generation
        session.start_breathing();
        assert_eq!(rx.recv().await.unwrap().phase, BreathingPhase::Prepare);
        assert_eq!(rx.recv().await.unwrap().phase, BreathingPhase::Inhale);
        assert_eq!(session.breathing_phase(), BreathingPhase::Inhale);
    }
}
