//! Questions, answer checking and the daily challenge.

mod daily;
mod entity;

pub use daily::pick_daily;
pub use entity::{
    NewQuestion, Question, QuestionKind, MAX_ANSWER_LEN, MAX_EXPLANATION_LEN, MAX_OPTIONS,
    MAX_PASSAGE_LEN, MAX_PROMPT_LEN, MIN_OPTIONS,
};
