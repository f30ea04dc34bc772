//! Read-only projection of a session for the presentation layer.

use serde::Serialize;

use crate::quiz::session::{Phase, Session};
use crate::quiz::Outcome;

/// At or below this many seconds the countdown is shown as urgent.
pub const LOW_TIME_THRESHOLD: u32 = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewModel {
    pub phase: Phase,
    pub question_number: usize,
    pub total_questions: usize,
    pub prompt: String,
    pub options: Vec<OptionView>,
    pub time_remaining: u32,
    pub time_running_low: bool,
    pub score: usize,
    pub outcomes: Vec<Outcome>,
    pub banner: Option<Banner>,
    /// No selection is accepted right now.
    pub input_locked: bool,
    pub timed_out: bool,
    pub finished: bool,
    pub verdict: Option<Verdict>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionView {
    pub label: char,
    pub text: String,
    pub state: OptionState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionState {
    Idle,
    SelectedCorrect,
    SelectedWrong,
    /// The correct option, shown after the countdown ran out.
    Revealed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Banner {
    Correct,
    Wrong,
    TimeUp { correct_option: String },
}

/// Qualitative feedback on a finished session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Perfect,
    Excellent,
    Good,
    KeepPracticing,
}

impl Verdict {
    /// Perfect for a full score, then 80% and 60% thresholds.
    pub fn for_score(score: usize, total: usize) -> Verdict {
        if score >= total {
            Verdict::Perfect
        } else if score * 10 >= total * 8 {
            Verdict::Excellent
        } else if score * 10 >= total * 6 {
            Verdict::Good
        } else {
            Verdict::KeepPracticing
        }
    }
}

pub fn render<R>(session: &Session<R>) -> ViewModel {
    let question = session.question();
    let selected = session.selected_option();
    let timed_out = session.timed_out();
    let finished = session.finished();
    let score = session.score();

    let options = question
        .options()
        .iter()
        .zip('A'..='Z')
        .map(|(text, label)| {
            let is_correct = question.is_correct(text);
            let state = match selected {
                Some(choice) if choice == text && is_correct => OptionState::SelectedCorrect,
                Some(choice) if choice == text => OptionState::SelectedWrong,
                _ if timed_out && is_correct => OptionState::Revealed,
                _ => OptionState::Idle,
            };
            OptionView {
                label,
                text: text.clone(),
                state,
            }
        })
        .collect();

    let banner = match (finished, selected) {
        (true, _) => None,
        (false, Some(choice)) if question.is_correct(choice) => Some(Banner::Correct),
        (false, Some(_)) => Some(Banner::Wrong),
        (false, None) if timed_out => Some(Banner::TimeUp {
            correct_option: question.correct_option().to_string(),
        }),
        (false, None) => None,
    };

    ViewModel {
        phase: session.phase(),
        question_number: session.question_number(),
        total_questions: session.total_questions(),
        prompt: question.prompt().to_string(),
        options,
        time_remaining: session.time_remaining(),
        time_running_low: session.time_remaining() <= LOW_TIME_THRESHOLD,
        score,
        outcomes: session.outcomes().to_vec(),
        banner,
        input_locked: session.phase() != Phase::Active,
        timed_out,
        finished,
        verdict: finished.then(|| Verdict::for_score(score, session.total_questions())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::{TIME_PER_QUESTION, TOTAL_QUESTIONS};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn session(seed: u64) -> Session<StdRng> {
        Session::new(StdRng::seed_from_u64(seed))
    }

    fn states(view: &ViewModel) -> Vec<OptionState> {
        view.options.iter().map(|o| o.state).collect()
    }

    fn time_out(session: &mut Session<StdRng>) {
        for _ in 0..TIME_PER_QUESTION {
            session.tick();
        }
    }

    #[test]
    fn fresh_question_is_open() {
        let view = render(&session(1));

        assert_eq!(view.phase, Phase::Active);
        assert_eq!(view.question_number, 1);
        assert_eq!(view.total_questions, TOTAL_QUESTIONS);
        assert_eq!(view.time_remaining, TIME_PER_QUESTION);
        assert!(!view.time_running_low);
        assert!(!view.input_locked);
        assert_eq!(view.banner, None);
        assert_eq!(view.verdict, None);
        assert_eq!(states(&view), vec![OptionState::Idle; 4]);
        let labels: Vec<char> = view.options.iter().map(|o| o.label).collect();
        assert_eq!(labels, vec!['A', 'B', 'C', 'D']);
    }

    #[test]
    fn countdown_turns_urgent_at_five() {
        let mut session = session(2);
        for _ in 0..4 {
            session.tick();
        }
        assert!(!render(&session).time_running_low);
        session.tick();
        let view = render(&session);
        assert_eq!(view.time_remaining, 5);
        assert!(view.time_running_low);
    }

    #[test]
    fn correct_selection_marks_only_the_choice() {
        let mut session = session(3);
        let correct = session.question().correct_option().to_string();
        session.select(&correct);
        let view = render(&session);

        assert!(view.input_locked);
        assert_eq!(view.banner, Some(Banner::Correct));
        let marked: Vec<&OptionView> = view
            .options
            .iter()
            .filter(|o| o.state != OptionState::Idle)
            .collect();
        assert_eq!(marked.len(), 1);
        assert_eq!(marked[0].text, correct);
        assert_eq!(marked[0].state, OptionState::SelectedCorrect);
    }

    #[test]
    fn wrong_selection_does_not_reveal_the_answer() {
        let mut session = session(4);
        let wrong = session
            .question()
            .options()
            .iter()
            .find(|o| !session.question().is_correct(o))
            .unwrap()
            .clone();
        session.select(&wrong);
        let view = render(&session);

        assert_eq!(view.banner, Some(Banner::Wrong));
        assert!(!states(&view).contains(&OptionState::Revealed));
        assert!(!states(&view).contains(&OptionState::SelectedCorrect));
        assert!(states(&view).contains(&OptionState::SelectedWrong));
    }

    #[test]
    fn timeout_reveals_the_answer() {
        let mut session = session(5);
        time_out(&mut session);
        let view = render(&session);
        let correct = session.question().correct_option().to_string();

        assert!(view.timed_out);
        assert!(view.input_locked);
        assert_eq!(
            view.banner,
            Some(Banner::TimeUp {
                correct_option: correct.clone()
            })
        );
        let revealed: Vec<&OptionView> = view
            .options
            .iter()
            .filter(|o| o.state == OptionState::Revealed)
            .collect();
        assert_eq!(revealed.len(), 1);
        assert_eq!(revealed[0].text, correct);
    }

    #[test]
    fn finished_view_carries_the_verdict() {
        let mut session = session(6);
        for _ in 0..TOTAL_QUESTIONS {
            time_out(&mut session);
            session.grace_elapsed();
        }
        let view = render(&session);

        assert!(view.finished);
        assert!(view.input_locked);
        assert_eq!(view.banner, None);
        assert_eq!(view.verdict, Some(Verdict::KeepPracticing));
    }

    #[test]
    fn verdict_thresholds() {
        assert_eq!(Verdict::for_score(10, 10), Verdict::Perfect);
        assert_eq!(Verdict::for_score(9, 10), Verdict::Excellent);
        assert_eq!(Verdict::for_score(8, 10), Verdict::Excellent);
        assert_eq!(Verdict::for_score(7, 10), Verdict::Good);
        assert_eq!(Verdict::for_score(6, 10), Verdict::Good);
        assert_eq!(Verdict::for_score(5, 10), Verdict::KeepPracticing);
        assert_eq!(Verdict::for_score(0, 10), Verdict::KeepPracticing);
    }

    #[test]
    fn serializes_for_external_renderers() {
        let mut session = session(7);
        time_out(&mut session);
        let json = serde_json::to_value(render(&session)).unwrap();

        assert_eq!(json["phase"], "timed_out");
        assert_eq!(json["banner"]["kind"], "time_up");
        assert_eq!(json["outcomes"][0], "unanswered");
        assert_eq!(json["options"].as_array().unwrap().len(), 4);
    }
}
