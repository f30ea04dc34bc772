use rand::seq::SliceRandom;
use rand::Rng;

use crate::quiz;

const OPTIONS_PER_QUESTION: usize = 4;
const MAX_OPERAND: i32 = 10;
const MAX_DISTRACTOR_OFFSET: i32 = 5;

/// Draws a fresh arithmetic question from `rng`.
pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> quiz::Question {
    Operation::random(rng).generate_question(rng)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
}

impl Operator {
    const ALL: [Operator; 3] = [Operator::Add, Operator::Subtract, Operator::Multiply];

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Operator {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Subtract => "-",
            Operator::Multiply => "×",
        }
    }

    pub fn apply(&self, a: i32, b: i32) -> i32 {
        match self {
            Operator::Add => a + b,
            // No clamping, 3 - 8 is -5
            Operator::Subtract => a - b,
            Operator::Multiply => a * b,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operation {
    pub a: i32,
    pub b: i32,
    pub operator: Operator,
}

impl Operation {
    pub fn new(a: i32, operator: Operator, b: i32) -> Self {
        Self { a, b, operator }
    }

    /// Both operands are uniform in `1..=10`.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let a = rng.gen_range(1..=MAX_OPERAND);
        let b = rng.gen_range(1..=MAX_OPERAND);
        let operator = Operator::random(rng);
        Self { a, b, operator }
    }

    pub fn answer(&self) -> i32 {
        self.operator.apply(self.a, self.b)
    }

    pub fn prompt(&self) -> String {
        format!("{} {} {} = ?", self.a, self.operator.symbol(), self.b)
    }

    pub fn generate_question<R: Rng + ?Sized>(&self, rng: &mut R) -> quiz::Question {
        let answer = self.answer();

        // Distractors sit within 5 of the answer, on either side.
        // A Vec keeps insertion order stable so seeded runs are reproducible.
        let mut options = vec![answer];
        while options.len() < OPTIONS_PER_QUESTION {
            let offset = rng.gen_range(1..=MAX_DISTRACTOR_OFFSET);
            let sign = if rng.gen_bool(0.5) { 1 } else { -1 };
            let distractor = answer + sign * offset;
            if !options.contains(&distractor) {
                options.push(distractor);
            }
        }

        // We shuffle the options so the correct one isn't always the first one
        options.shuffle(rng);

        quiz::Question::new(
            self.prompt(),
            options.iter().map(|o| o.to_string()).collect(),
            answer.to_string(),
        )
    }
}
