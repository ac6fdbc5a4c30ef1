//! HTTP routes for questions and the daily challenge.

use axum::{
    routing::{get, post},
    Router,
};

use crate::adapters::http::state::AppState;

use super::handlers::{
    answer_daily_challenge, answer_question, create_question, daily_challenge, delete_question,
    get_question, list_level_questions,
};

pub fn question_routes() -> Router<AppState> {
    Router::new()
        .route("/levels/:id/questions", get(list_level_questions))
        .route("/questions", post(create_question))
        .route("/questions/:id", get(get_question).delete(delete_question))
        .route("/questions/:id/answer", post(answer_question))
        .route("/daily-challenge", get(daily_challenge))
        .route("/daily-challenge/answer", post(answer_daily_challenge))
}
