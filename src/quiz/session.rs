use std::time::Duration;

use log::{debug, info, warn};
use rand::Rng;

use crate::quiz::{
    self, arithmetic, Outcome, ANSWER_GRACE, TICK_INTERVAL, TIMEOUT_GRACE, TIME_PER_QUESTION,
    TOTAL_QUESTIONS,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Countdown running, waiting for a selection.
    Active,
    /// Countdown hit zero before a selection; grace delay running.
    TimedOut,
    /// A selection was recorded; grace delay running.
    Answered,
    Finished,
}

/// What an event did to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// The event is not accepted in the current phase.
    Ignored,
    Ticked { time_remaining: u32 },
    TimedOut,
    Answered { correct: bool },
    Advanced { question_number: usize },
    Finished { score: usize },
    Restarted,
}

/// Timer the owner of a session must keep armed for the current phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alarm {
    Tick,
    Grace,
}

/// Single-player quiz session.
///
/// Every transition is a total function over the phases; events that do not
/// apply to the current phase come back as [`Transition::Ignored`].
pub struct Session<R> {
    rng: R,
    question: quiz::Question,
    question_number: usize,
    time_remaining: u32,
    selected_option: Option<String>,
    outcomes: Vec<Outcome>,
    phase: Phase,
}

impl<R: Rng> Session<R> {
    pub fn new(mut rng: R) -> Self {
        let question = arithmetic::generate(&mut rng);
        info!("Starting a session of {} questions", TOTAL_QUESTIONS);
        Self {
            rng,
            question,
            question_number: 1,
            time_remaining: TIME_PER_QUESTION,
            selected_option: None,
            outcomes: vec![Outcome::Unanswered; TOTAL_QUESTIONS],
            phase: Phase::Active,
        }
    }

    pub fn tick(&mut self) -> Transition {
        if self.phase != Phase::Active {
            debug!("Tick ignored in {:?}", self.phase);
            return Transition::Ignored;
        }

        self.time_remaining = self.time_remaining.saturating_sub(1);
        if self.time_remaining > 0 {
            return Transition::Ticked {
                time_remaining: self.time_remaining,
            };
        }

        // Leaving Active here closes the question to any late selection
        self.outcomes[self.question_number - 1] = Outcome::Unanswered;
        self.phase = Phase::TimedOut;
        info!("Question {} timed out", self.question_number);
        Transition::TimedOut
    }

    pub fn select(&mut self, option: &str) -> Transition {
        if self.phase != Phase::Active || self.selected_option.is_some() {
            debug!("Selection {:?} ignored in {:?}", option, self.phase);
            return Transition::Ignored;
        }

        if !self.question.options().iter().any(|o| o == option) {
            warn!(
                "Selection {:?} is not an option of {:?}, counting it as wrong",
                option,
                self.question.prompt()
            );
        }

        let correct = self.question.is_correct(option);
        self.selected_option = Some(option.to_string());
        self.outcomes[self.question_number - 1] = if correct {
            Outcome::Correct
        } else {
            Outcome::Wrong
        };
        self.phase = Phase::Answered;
        info!(
            "Question {} answered {} ({})",
            self.question_number,
            option,
            if correct { "correct" } else { "wrong" }
        );
        Transition::Answered { correct }
    }

    pub fn grace_elapsed(&mut self) -> Transition {
        if !matches!(self.phase, Phase::TimedOut | Phase::Answered) {
            debug!("Grace ignored in {:?}", self.phase);
            return Transition::Ignored;
        }

        if self.question_number >= TOTAL_QUESTIONS {
            self.phase = Phase::Finished;
            let score = self.score();
            info!("Session finished with {}/{}", score, TOTAL_QUESTIONS);
            return Transition::Finished { score };
        }

        self.question_number += 1;
        self.next_question();
        debug!("Advanced to question {}", self.question_number);
        Transition::Advanced {
            question_number: self.question_number,
        }
    }

    /// Accepted from any phase.
    pub fn restart(&mut self) -> Transition {
        self.question_number = 1;
        self.outcomes.fill(Outcome::Unanswered);
        self.next_question();
        info!("Session restarted");
        Transition::Restarted
    }

    fn next_question(&mut self) {
        self.question = arithmetic::generate(&mut self.rng);
        self.time_remaining = TIME_PER_QUESTION;
        self.selected_option = None;
        self.phase = Phase::Active;
    }
}

impl<R> Session<R> {
    pub fn question(&self) -> &quiz::Question {
        &self.question
    }

    /// 1-based, stays at the last question once finished.
    pub fn question_number(&self) -> usize {
        self.question_number
    }

    pub fn total_questions(&self) -> usize {
        self.outcomes.len()
    }

    pub fn time_remaining(&self) -> u32 {
        self.time_remaining
    }

    pub fn selected_option(&self) -> Option<&str> {
        self.selected_option.as_deref()
    }

    pub fn outcomes(&self) -> &[Outcome] {
        &self.outcomes
    }

    /// Count of correct outcomes.
    pub fn score(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| **o == Outcome::Correct)
            .count()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn timed_out(&self) -> bool {
        self.phase == Phase::TimedOut
    }

    pub fn finished(&self) -> bool {
        self.phase == Phase::Finished
    }

    /// The single timer that must be pending for the current phase.
    pub fn pending_alarm(&self) -> Option<(Alarm, Duration)> {
        match self.phase {
            Phase::Active => Some((Alarm::Tick, TICK_INTERVAL)),
            Phase::TimedOut => Some((Alarm::Grace, TIMEOUT_GRACE)),
            Phase::Answered => Some((Alarm::Grace, ANSWER_GRACE)),
            Phase::Finished => None,
        }
    }
}
