pub mod arithmetic;
pub mod controller;
pub mod session;
pub mod timer;
pub mod view;

use std::time::Duration;

/// Number of questions in one session.
pub const TOTAL_QUESTIONS: usize = 10;
/// Seconds the player has to answer a single question.
pub const TIME_PER_QUESTION: u32 = 10;

pub const TICK_INTERVAL: Duration = Duration::from_secs(1);
/// Pause after a timeout, long enough to read the revealed answer.
pub const TIMEOUT_GRACE: Duration = Duration::from_secs(2);
/// Pause after a selection, just long enough to see the feedback.
pub const ANSWER_GRACE: Duration = Duration::from_millis(1500);

/// A single multiple-choice question. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Question {
    prompt: String,
    options: Vec<String>,
    correct_option: String,
}

impl Question {
    pub(crate) fn new(prompt: String, options: Vec<String>, correct_option: String) -> Self {
        debug_assert!(options.contains(&correct_option));
        Self {
            prompt,
            options,
            correct_option,
        }
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn correct_option(&self) -> &str {
        &self.correct_option
    }

    pub fn is_correct(&self, option: &str) -> bool {
        self.correct_option == option
    }
}

/// What happened to one question slot of the session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    #[default]
    Unanswered,
    Correct,
    Wrong,
}
