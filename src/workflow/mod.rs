pub mod generate_flow;

pub use generate_flow::{QuizGenerator, SubmitOutcome, RECOMMENDED_MIN_TEXT_CHARS};
