use std::fmt::Write;

use crate::quiz::controller::Event;
use crate::quiz::view::{Banner, OptionState, Verdict, ViewModel};
use crate::quiz::Outcome;

const TITLE: &str = "Matematika Testi";
const QUESTION_LABEL: &str = "Savol";
const SCORE_LABEL: &str = "To'g'ri javoblar:";
const TOTAL_LABEL: &str = "Umumiy:";
const CORRECT_TEXT: &str = "✅ To'g'ri! Ajoyib javob!";
const WRONG_TEXT: &str = "❌ Noto'g'ri. Keyingi safar yaxshiroq urinib ko'ring!";
const TIME_UP_TEXT: &str = "⏰ Vaqt tugadi! To'g'ri javob:";
const FINISHED_TEXT: &str = "Test Yakunlandi!";
const RESTART_TEXT: &str = "[r] Testni Qayta Boshlash";
const HELP_TEXT: &str = "A-D yoki javob sonini kiriting, r - qayta boshlash, q - chiqish";
const FOOTER_TEXT: &str = "Matematika bilimingizni sinab ko'ring";

const CLEAR_SCREEN: &str = "\x1B[2J\x1B[H";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Play(Event),
    Quit,
}

fn verdict_text(verdict: Verdict) -> &'static str {
    match verdict {
        Verdict::Perfect => "💯 Ajoyib natija! Siz barcha savollarga to'g'ri javob berdingiz!",
        Verdict::Excellent => "🎉 Juda yaxshi! Siz matematikada juda zo'rsiz!",
        Verdict::Good => "👍 Yaxshi natija! Biroz mashq qilishingiz kerak!",
        Verdict::KeepPracticing => {
            "✏️ O'rganishda davom eting! Keyingi safar yaxshiroq natija ko'rsatasiz!"
        }
    }
}

fn progress_line(outcomes: &[Outcome]) -> String {
    outcomes
        .iter()
        .enumerate()
        .map(|(i, outcome)| match outcome {
            Outcome::Correct => "(✓)".to_string(),
            Outcome::Wrong => "(✗)".to_string(),
            Outcome::Unanswered => format!("({})", i + 1),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Draws one full screen for `view`, starting with a clear-screen sequence.
pub fn draw(view: &ViewModel) -> String {
    // Writing into a String cannot fail
    let mut screen = String::from(CLEAR_SCREEN);

    let clock = if view.time_running_low { "⏳" } else { "🕑" };
    let _ = writeln!(
        screen,
        "{}  [{} {}/{}]  {} {}s",
        TITLE, QUESTION_LABEL, view.question_number, view.total_questions, clock, view.time_remaining
    );
    let _ = writeln!(screen, "{}", progress_line(&view.outcomes));
    let _ = writeln!(
        screen,
        "{} {}   {} {}",
        SCORE_LABEL, view.score, TOTAL_LABEL, view.total_questions
    );
    let _ = writeln!(screen);

    if view.finished {
        let _ = writeln!(screen, "{}", FINISHED_TEXT);
        let _ = writeln!(screen, "{}/{}", view.score, view.total_questions);
        if let Some(verdict) = view.verdict {
            let _ = writeln!(screen, "{}", verdict_text(verdict));
        }
        let _ = writeln!(screen);
        let _ = writeln!(screen, "{}", RESTART_TEXT);
    } else {
        let _ = writeln!(screen, "    {}", view.prompt);
        let _ = writeln!(screen);
        for option in &view.options {
            let mark = match option.state {
                OptionState::Idle => "  ",
                OptionState::SelectedCorrect => "✅",
                OptionState::SelectedWrong => "❌",
                OptionState::Revealed => "👉",
            };
            let _ = writeln!(screen, "  {} {}) {}", mark, option.label, option.text);
        }
        let _ = writeln!(screen);

        match &view.banner {
            Some(Banner::Correct) => {
                let _ = writeln!(screen, "{}", CORRECT_TEXT);
            }
            Some(Banner::Wrong) => {
                let _ = writeln!(screen, "{}", WRONG_TEXT);
            }
            Some(Banner::TimeUp { correct_option }) => {
                let _ = writeln!(screen, "{} {}", TIME_UP_TEXT, correct_option);
            }
            None => {}
        }
        if !view.input_locked {
            let _ = writeln!(screen, "{}", HELP_TEXT);
        }
    }

    let _ = writeln!(screen);
    let _ = writeln!(screen, "{}", FOOTER_TEXT);
    screen
}

/// Reads a typed line as a command.
///
/// `a`..`d` pick the option with that label, a bare number is taken as the
/// option value itself. Anything else is not a command.
pub fn parse_command(line: &str, view: &ViewModel) -> Option<Command> {
    let input = line.trim();
    match input.to_lowercase().as_str() {
        "" => return None,
        "q" => return Some(Command::Quit),
        "r" => return Some(Command::Play(Event::Restart)),
        _ => {}
    }

    let mut chars = input.chars();
    if let (Some(letter), None) = (chars.next(), chars.next()) {
        let label = letter.to_ascii_uppercase();
        if let Some(option) = view.options.iter().find(|o| o.label == label) {
            return Some(Command::Play(Event::Select(option.text.clone())));
        }
    }

    input
        .parse::<i64>()
        .ok()
        .map(|value| Command::Play(Event::Select(value.to_string())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::session::Session;
    use crate::quiz::view::render;
    use crate::quiz::{TIME_PER_QUESTION, TOTAL_QUESTIONS};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn session(seed: u64) -> Session<StdRng> {
        Session::new(StdRng::seed_from_u64(seed))
    }

    #[test]
    fn letters_pick_options_by_label() {
        let view = render(&session(1));

        for (input, index) in [("a", 0), ("B", 1), (" c ", 2), ("d\n", 3)] {
            assert_eq!(
                parse_command(input, &view),
                Some(Command::Play(Event::Select(view.options[index].text.clone())))
            );
        }
    }

    #[test]
    fn numbers_are_taken_literally() {
        let view = render(&session(2));
        assert_eq!(
            parse_command("-4", &view),
            Some(Command::Play(Event::Select("-4".to_string())))
        );
        assert_eq!(
            parse_command("07", &view),
            Some(Command::Play(Event::Select("7".to_string())))
        );
    }

    #[test]
    fn control_keys_and_noise() {
        let view = render(&session(3));
        assert_eq!(parse_command("q", &view), Some(Command::Quit));
        assert_eq!(parse_command("R", &view), Some(Command::Play(Event::Restart)));
        assert_eq!(parse_command("   ", &view), None);
        assert_eq!(parse_command("x", &view), None);
        assert_eq!(parse_command("hello", &view), None);
    }

    #[test]
    fn question_screen() {
        let session = session(4);
        let screen = draw(&render(&session));

        assert!(screen.starts_with(CLEAR_SCREEN));
        assert!(screen.contains("Savol 1/10"));
        assert!(screen.contains(session.question().prompt()));
        assert!(screen.contains("A) "));
        assert!(screen.contains("D) "));
        assert!(screen.contains(HELP_TEXT));
        assert!(screen.contains("(1) (2) (3)"));
    }

    #[test]
    fn time_up_screen_names_the_answer() {
        let mut session = session(5);
        for _ in 0..TIME_PER_QUESTION {
            session.tick();
        }
        let screen = draw(&render(&session));

        let expected = format!("{} {}", TIME_UP_TEXT, session.question().correct_option());
        assert!(screen.contains(&expected));
        assert!(!screen.contains(HELP_TEXT));
    }

    #[test]
    fn final_screen() {
        let mut session = session(6);
        for _ in 0..TOTAL_QUESTIONS {
            let correct = session.question().correct_option().to_string();
            session.select(&correct);
            session.grace_elapsed();
        }
        let screen = draw(&render(&session));

        assert!(screen.contains(FINISHED_TEXT));
        assert!(screen.contains("10/10"));
        assert!(screen.contains(verdict_text(Verdict::Perfect)));
        assert!(screen.contains(RESTART_TEXT));
        assert!(screen.contains("(✓) (✓)"));
        assert!(!screen.contains(session.question().prompt()));
    }
}
