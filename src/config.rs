use std::env;

use log::warn;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// How each render reaches stdout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputMode {
    /// Redrawn text screen for a person at a terminal.
    #[default]
    Text,
    /// One JSON-encoded view per line, for another program to present.
    Json,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Config {
    pub seed: Option<u64>,
    pub output: OutputMode,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_vars(env::var("QUIZ_SEED").ok(), env::var("QUIZ_OUTPUT").ok())
    }

    fn from_vars(seed: Option<String>, output: Option<String>) -> Self {
        let seed = seed.and_then(|s| match s.trim().parse() {
            Ok(seed) => Some(seed),
            Err(_) => {
                warn!("QUIZ_SEED={:?} is not a number, using a random seed", s);
                None
            }
        });
        let output = match output.as_deref().map(str::trim) {
            None | Some("") | Some("text") => OutputMode::Text,
            Some("json") => OutputMode::Json,
            Some(other) => {
                warn!("Unknown QUIZ_OUTPUT={:?}, falling back to text", other);
                OutputMode::Text
            }
        };
        Self { seed, output }
    }

    /// Seeded when `QUIZ_SEED` is set, so a session can be replayed.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}
