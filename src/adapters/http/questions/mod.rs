//! HTTP adapter for questions and the daily challenge.

mod dto;
mod handlers;
mod routes;

pub use dto::{AnswerRequest, CreateQuestionRequest, DailyAnswerResponse, QuestionResponse};
pub use routes::question_routes;
