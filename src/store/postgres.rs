// src/store/postgres.rs
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use super::PollStore;
use crate::error::AppResult;
use crate::models::{Choice, NewChoice, NewQuestion, Question};

#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PollStore for PgStore {
    #[tracing::instrument(skip(self))]
    async fn published_questions(
        &self,
        now: DateTime<Utc>,
        limit: i64,
    ) -> AppResult<Vec<Question>> {
        let questions = sqlx::query_as::<_, Question>(
            r#"
            SELECT id, text, publish_at
            FROM questions
            WHERE publish_at <= $1
            ORDER BY publish_at DESC
            LIMIT $2
            "#,
        )
        .bind(now)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(questions)
    }

    async fn question(&self, id: i64) -> AppResult<Option<Question>> {
        let question = sqlx::query_as::<_, Question>(
            "SELECT id, text, publish_at FROM questions WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(question)
    }

    async fn choices(&self, question_id: i64) -> AppResult<Vec<Choice>> {
        let choices = sqlx::query_as::<_, Choice>(
            r#"
            SELECT id, question_id, text, vote_count
            FROM choices
            WHERE question_id = $1
            ORDER BY id
            "#,
        )
        .bind(question_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(choices)
    }

    #[tracing::instrument(skip(self))]
    async fn cast_vote(&self, question_id: i64, choice_id: i64) -> AppResult<bool> {
        // Increment in place so concurrent votes on one choice can't clobber each other.
        let result = sqlx::query(
            r#"
            UPDATE choices
            SET vote_count = vote_count + 1
            WHERE id = $1 AND question_id = $2
            "#,
        )
        .bind(choice_id)
        .bind(question_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn create_question(&self, question: NewQuestion) -> AppResult<Question> {
        let question = sqlx::query_as::<_, Question>(
            r#"
            INSERT INTO questions (text, publish_at)
            VALUES ($1, $2)
            RETURNING id, text, publish_at
            "#,
        )
        .bind(question.text)
        .bind(question.publish_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(question)
    }

    async fn create_choice(&self, choice: NewChoice) -> AppResult<Choice> {
        let choice = sqlx::query_as::<_, Choice>(
            r#"
            INSERT INTO choices (question_id, text)
            VALUES ($1, $2)
            RETURNING id, question_id, text, vote_count
            "#,
        )
        .bind(choice.question_id)
        .bind(choice.text)
        .fetch_one(&self.pool)
        .await?;

        Ok(choice)
    }

    async fn delete_question(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM questions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
