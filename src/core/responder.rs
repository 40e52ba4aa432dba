//! Chat responder: keyword classification and canned-reply selection
//!
//! Classification is case-insensitive substring matching, first match wins:
//! crisis → greeting → anxiety → depression → stress → positive → coping →
//! mood → support. The crisis check runs before everything else and can
//! never be shadowed by another category.

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

use crate::types::{Category, ChatReply};

// =============================================================================
// KEYWORD TABLES
// =============================================================================

/// High-risk phrases. Deliberately broad (some terms like "give up" will
/// false-positive); tune with care, erring toward over-triggering.
pub const CRISIS_PHRASES: &[&str] = &[
    "suicide",
    "kill myself",
    "end it all",
    "want to die",
    "hurt myself",
    "self harm",
    "cutting",
    "overdose",
    "jump",
    "bridge",
    "pills",
    "worthless",
    "hopeless",
    "no point",
    "give up",
    "can't go on",
];

/// Topical keywords, checked in priority order after the crisis pass
const CATEGORY_KEYWORDS: &[(Category, &[&str])] = &[
    (Category::Greeting, &["hello", "hi", "hey"]),
    (Category::Anxiety, &["anxious", "anxiety", "worried", "panic"]),
    (Category::Depression, &["depressed", "depression", "sad", "down"]),
    (Category::Stress, &["stressed", "stress", "overwhelmed"]),
    (Category::Positive, &["happy", "good", "great", "better"]),
    (Category::Coping, &["cope", "coping", "help"]),
    (Category::Mood, &["feel", "feeling", "mood"]),
];

// =============================================================================
// REPLY POOLS
// =============================================================================

/// Fixed crisis response; never drawn from the random pools
pub const CRISIS_RESPONSE: &str = "I'm very concerned about what you've shared. Please know that \
    you matter and help is available. Consider calling 988 (Suicide & Crisis Lifeline) or texting \
    HOME to 741741 for immediate support. Would you like me to help you find local crisis resources?";

/// First assistant message of a chat session
pub const WELCOME_MESSAGE: &str = "Welcome to MindBridge AI! I'm here to provide support and \
    listen to whatever is on your mind. Feel free to share how you're feeling today.";

fn pool(category: Category) -> &'static [&'static str] {
    match category {
        Category::Crisis => &[CRISIS_RESPONSE],
        Category::Greeting => &[
            "Hello! I'm here to listen and support you. How are you feeling today?",
            "Hi there! Thanks for reaching out. What's on your mind?",
            "Hello! I'm glad you're here. How can I help you today?",
        ],
        Category::Anxiety => &[
            "Anxiety can feel overwhelming, but remember that you're stronger than you think. Let's try some grounding techniques.",
            "I understand anxiety can be difficult. Have you tried the 4-7-8 breathing technique? It can be very helpful.",
            "Anxiety is treatable and you don't have to face it alone. Would you like to explore some coping strategies?",
        ],
        Category::Depression => &[
            "Depression can make everything feel heavy, but you're taking a positive step by talking about it.",
            "I want you to know that what you're experiencing is real and valid. Have you considered speaking with a professional?",
            "Thank you for trusting me with this. Remember, depression is treatable and things can get better.",
        ],
        Category::Stress => &[
            "Stress is a normal part of life, but it's important to manage it healthy ways. What's been causing you the most stress lately?",
            "It sounds like you're dealing with a lot right now. Let's think about some ways to help you cope with stress.",
            "Stress can affect us physically and mentally. Have you tried any relaxation techniques recently?",
        ],
        Category::Positive => &[
            "I'm so glad to hear you're feeling good! What's been going well for you lately?",
            "That's wonderful! It's important to acknowledge and celebrate positive moments.",
            "I love hearing when people are doing well. What's contributing to these positive feelings?",
        ],
        Category::Coping => &[
            "Developing healthy coping strategies takes time and practice. What has helped you in the past?",
            "There are many effective coping techniques we can explore together. Are you interested in learning some new ones?",
            "It's great that you're thinking about coping strategies. This shows real self-awareness and growth.",
        ],
        Category::Mood => &[
            "Thank you for sharing how you're feeling. It takes courage to open up about our emotions.",
            "I appreciate you telling me about your mood. Your feelings are valid and important.",
            "It's really helpful that you're being honest about how you feel. That's a big step.",
        ],
        Category::Support => &[
            "You're not alone in this. Many people your age face similar challenges, and it's okay to ask for help.",
            "I'm here to support you, and there are many resources available to help you through difficult times.",
            "Reaching out shows real strength. You're taking care of yourself by seeking support.",
        ],
    }
}

// =============================================================================
// RESPONDER
// =============================================================================

/// Classifies free-text messages and selects replies. The RNG used for pool
/// selection is injected so tests can pin it down.
pub struct ChatResponder {
    rng: Box<dyn RngCore + Send>,
}

impl Default for ChatResponder {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatResponder {
    /// Responder with an entropy-seeded RNG
    pub fn new() -> Self {
        Self {
            rng: Box::new(StdRng::from_entropy()),
        }
    }

    /// Responder with a deterministic RNG
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Box::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// Responder over any RNG source
    pub fn with_rng(rng: Box<dyn RngCore + Send>) -> Self {
        Self { rng }
    }

    /// Does the text contain any high-risk phrase?
    pub fn contains_crisis_phrase(text: &str) -> bool {
        let lower = text.to_lowercase();
        CRISIS_PHRASES.iter().any(|phrase| lower.contains(phrase))
    }

    /// Classify a message into its response category
    pub fn classify(&self, text: &str) -> Category {
        if Self::contains_crisis_phrase(text) {
            return Category::Crisis;
        }
        let lower = text.to_lowercase();
        for (category, keywords) in CATEGORY_KEYWORDS {
            if keywords.iter().any(|kw| lower.contains(kw)) {
                return *category;
            }
        }
        Category::Support
    }

    /// Pick a reply for a category. Crisis always returns the fixed
    /// hotline response; every other category draws uniformly from its pool.
    pub fn reply(&mut self, category: Category) -> String {
        if category == Category::Crisis {
            return CRISIS_RESPONSE.to_string();
        }
        let pool = pool(category);
        let idx = self.rng.gen_range(0..pool.len());
        pool[idx].to_string()
    }

    /// Classify and reply in one step, flagging crisis for the caller
    pub fn classify_and_reply(&mut self, text: &str) -> ChatReply {
        let category = self.classify(text);
        let text = self.reply(category);
        ChatReply {
            category,
            text,
            is_crisis: category == Category::Crisis,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_category_has_keywords_and_pool() {
        for (category, keywords) in CATEGORY_KEYWORDS {
            assert!(!keywords.is_empty());
            assert!(pool(*category).len() >= 3, "{} pool too small", category);
        }
        assert!(pool(Category::Support).len() >= 3);
    }

    #[test]
    fn test_classification_buckets() {
        let responder = ChatResponder::seeded(1);
        assert_eq!(responder.classify("hello there"), Category::Greeting);
        assert_eq!(responder.classify("I've been so anxious"), Category::Anxiety);
        assert_eq!(responder.classify("feeling sad lately"), Category::Depression);
        assert_eq!(responder.classify("work stress is a lot"), Category::Stress);
        assert_eq!(responder.classify("today was great"), Category::Positive);
        assert_eq!(responder.classify("how do I cope"), Category::Coping);
        assert_eq!(responder.classify("my mood swings"), Category::Mood);
        assert_eq!(responder.classify("xyzzy"), Category::Support);
    }

    #[test]
    fn test_classification_is_case_insensitive() {
        let responder = ChatResponder::seeded(1);
        assert_eq!(responder.classify("HELLO"), Category::Greeting);
        assert_eq!(responder.classify("I Feel Hopeless"), Category::Crisis);
    }

    #[test]
    fn test_crisis_overrides_other_keywords() {
        let responder = ChatResponder::seeded(1);
        // "hopeless" plus a positive keyword must still classify as crisis
        assert_eq!(
            responder.classify("I feel hopeless and happy"),
            Category::Crisis
        );
        assert_eq!(
            responder.classify("hello, I want to die"),
            Category::Crisis
        );
    }

    #[test]
    fn test_crisis_reply_is_fixed() {
        let mut responder = ChatResponder::seeded(1);
        let reply = responder.classify_and_reply("there's no point anymore");
        assert!(reply.is_crisis);
        assert_eq!(reply.category, Category::Crisis);
        assert_eq!(reply.text, CRISIS_RESPONSE);
    }

    #[test]
    fn test_reply_comes_from_pool() {
        let mut responder = ChatResponder::seeded(42);
        for _ in 0..20 {
            let text = responder.reply(Category::Anxiety);
            assert!(pool(Category::Anxiety).contains(&text.as_str()));
        }
    }

    #[test]
    fn test_seeded_replies_are_deterministic() {
        let mut a = ChatResponder::seeded(7);
        let mut b = ChatResponder::seeded(7);
        for _ in 0..10 {
            assert_eq!(a.reply(Category::Support), b.reply(Category::Support));
        }
    }

    #[test]
    fn test_greeting_beats_later_categories() {
        let responder = ChatResponder::seeded(1);
        // Both greeting and anxiety keywords present; greeting is checked first
        assert_eq!(
            responder.classify("hey, I'm worried about tomorrow"),
            Category::Greeting
        );
    }

    #[test]
    fn test_substring_matching_is_literal() {
        let responder = ChatResponder::seeded(1);
        // "hi" inside "this" matches, as substring matching implies
        assert_eq!(responder.classify("this weather"), Category::Greeting);
    }
}
