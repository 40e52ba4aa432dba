//! Core modules for MindBridge

pub mod breathing;
pub mod classifier;
pub mod grounding;
pub mod responder;
pub mod session;
pub mod store;

pub use breathing::{BreathingEngine, BreathingTick};
pub use classifier::{bucket_average, display_label_of, feedback_for, score_of};
pub use grounding::{GroundingExercise, GROUNDING_STEPS};
pub use responder::{ChatResponder, CRISIS_PHRASES, CRISIS_RESPONSE, WELCOME_MESSAGE};
pub use session::WellnessSession;
pub use store::{Clock, FileStorage, FixedClock, MemoryStorage, MoodStore, Storage, SystemClock};
