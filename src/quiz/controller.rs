use log::debug;
use rand::Rng;

use crate::quiz::session::{Alarm, Session, Transition};
use crate::quiz::timer::Timer;
use crate::quiz::view::{self, ViewModel};

/// Input the controller reacts to, either from the player or from its own timer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Tick,
    GraceElapsed,
    Select(String),
    Restart,
}

impl From<Alarm> for Event {
    fn from(alarm: Alarm) -> Self {
        match alarm {
            Alarm::Tick => Event::Tick,
            Alarm::Grace => Event::GraceElapsed,
        }
    }
}

/// Owns a [`Session`] and the one timer that drives it.
///
/// After every accepted transition the timer is re-armed for the new phase,
/// which also cancels whatever was pending for the old one.
pub struct QuizController<R> {
    session: Session<R>,
    timer: Timer<Alarm>,
}

impl<R: Rng> QuizController<R> {
    /// Starts question 1 and arms its countdown. Needs a tokio runtime.
    pub fn start(rng: R) -> Self {
        let mut controller = Self {
            session: Session::new(rng),
            timer: Timer::new(),
        };
        controller.arm();
        controller
    }

    pub fn dispatch(&mut self, event: Event) -> Transition {
        let transition = match &event {
            Event::Tick => self.session.tick(),
            Event::GraceElapsed => self.session.grace_elapsed(),
            Event::Select(option) => self.session.select(option),
            Event::Restart => self.session.restart(),
        };

        if transition != Transition::Ignored {
            self.arm();
        }
        debug!("{:?} -> {:?}", event, transition);
        transition
    }

    fn arm(&mut self) {
        match self.session.pending_alarm() {
            Some((alarm, delay)) => self.timer.schedule(delay, alarm),
            None => self.timer.cancel(),
        }
    }
}

impl<R> QuizController<R> {
    /// Waits for the next live alarm. Never resolves once the session is finished.
    pub async fn next_alarm(&mut self) -> Option<Event> {
        self.timer.fired().await.map(Event::from)
    }

    pub fn view(&self) -> ViewModel {
        view::render(&self.session)
    }

    pub fn session(&self) -> &Session<R> {
        &self.session
    }
}
