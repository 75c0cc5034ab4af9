// src/store/mod.rs
//! Persistence boundary for questions and choices.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::AppResult;
use crate::models::{Choice, NewChoice, NewQuestion, Question};

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[async_trait]
pub trait PollStore: Send + Sync {
    /// Questions with `publish_at <= now`, newest first, at most `limit`.
    async fn published_questions(&self, now: DateTime<Utc>, limit: i64)
        -> AppResult<Vec<Question>>;

    /// A question regardless of its publish time.
    async fn question(&self, id: i64) -> AppResult<Option<Question>>;

    /// Choices of a question ordered by id.
    async fn choices(&self, question_id: i64) -> AppResult<Vec<Choice>>;

    /// Adds one vote to `choice_id` if it belongs to `question_id`, as a
    /// single update. Returns whether a choice was counted.
    async fn cast_vote(&self, question_id: i64, choice_id: i64) -> AppResult<bool>;

    async fn create_question(&self, question: NewQuestion) -> AppResult<Question>;

    async fn create_choice(&self, choice: NewChoice) -> AppResult<Choice>;

    /// Removes a question together with its choices.
    async fn delete_question(&self, id: i64) -> AppResult<bool>;
}
