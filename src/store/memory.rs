// src/store/memory.rs
use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use super::PollStore;
use crate::error::{AppError, AppResult};
use crate::models::{Choice, NewChoice, NewQuestion, Question};

#[derive(Debug, Default)]
struct Tables {
    next_id: i64,
    questions: BTreeMap<i64, Question>,
    choices: BTreeMap<i64, Choice>,
}

impl Tables {
    fn allocate_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

/// Process-local store, used when no database is configured.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PollStore for MemoryStore {
    async fn published_questions(
        &self,
        now: DateTime<Utc>,
        limit: i64,
    ) -> AppResult<Vec<Question>> {
        let tables = self.tables.read().await;
        let mut questions: Vec<Question> = tables
            .questions
            .values()
            .filter(|q| q.is_published(now))
            .cloned()
            .collect();
        questions.sort_by(|a, b| b.publish_at.cmp(&a.publish_at));
        questions.truncate(usize::try_from(limit).unwrap_or(0));
        Ok(questions)
    }

    async fn question(&self, id: i64) -> AppResult<Option<Question>> {
        Ok(self.tables.read().await.questions.get(&id).cloned())
    }

    async fn choices(&self, question_id: i64) -> AppResult<Vec<Choice>> {
        let tables = self.tables.read().await;
        Ok(tables
            .choices
            .values()
            .filter(|c| c.question_id == question_id)
            .cloned()
            .collect())
    }

    async fn cast_vote(&self, question_id: i64, choice_id: i64) -> AppResult<bool> {
        let mut tables = self.tables.write().await;
        match tables.choices.get_mut(&choice_id) {
            Some(choice) if choice.question_id == question_id => {
                choice.vote_count = choice.vote_count.saturating_add(1);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn create_question(&self, question: NewQuestion) -> AppResult<Question> {
        let mut tables = self.tables.write().await;
        let question = Question {
            id: tables.allocate_id(),
            text: question.text,
            publish_at: question.publish_at,
        };
        tables.questions.insert(question.id, question.clone());
        Ok(question)
    }

    async fn create_choice(&self, choice: NewChoice) -> AppResult<Choice> {
        let mut tables = self.tables.write().await;
        if !tables.questions.contains_key(&choice.question_id) {
            return Err(AppError::not_found(choice.question_id));
        }
        let choice = Choice {
            id: tables.allocate_id(),
            question_id: choice.question_id,
            text: choice.text,
            vote_count: 0,
        };
        tables.choices.insert(choice.id, choice.clone());
        Ok(choice)
    }

    async fn delete_question(&self, id: i64) -> AppResult<bool> {
        let mut tables = self.tables.write().await;
        if tables.questions.remove(&id).is_none() {
            return Ok(false);
        }
        tables.choices.retain(|_, c| c.question_id != id);
        Ok(true)
    }
}
