// models.rs
use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// A poll prompt with a scheduled publish time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Question {
    pub id: i64,
    pub text: String,
    pub publish_at: DateTime<Utc>,
}

impl Question {
    /// Whether the question may be listed or shown at `now`.
    pub fn is_published(&self, now: DateTime<Utc>) -> bool {
        self.publish_at <= now
    }

    /// Whether the question went live within the last day.
    ///
    /// Only drives the "new" badge. A question published a week ago is still
    /// listed, it just isn't recent.
    pub fn is_recent(&self, now: DateTime<Utc>) -> bool {
        now - Duration::days(1) <= self.publish_at && self.publish_at <= now
    }
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Choice {
    pub id: i64,
    pub question_id: i64,
    pub text: String,
    pub vote_count: i32,
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewQuestion {
    pub text: String,
    pub publish_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewChoice {
    pub question_id: i64,
    pub text: String,
}

/// Form body of a vote submission. `choice` stays raw so that a missing or
/// garbled value can be reported back on the detail page.
#[derive(Debug, Default, Deserialize)]
pub struct VoteForm {
    pub choice: Option<String>,
}

impl VoteForm {
    pub fn choice_id(&self) -> Option<i64> {
        self.choice.as_deref()?.trim().parse().ok()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PollResults {
    pub id: i64,
    pub text: String,
    pub publish_at: DateTime<Utc>,
    pub choices: Vec<Choice>,
    pub total_votes: i64,
}

impl PollResults {
    pub fn new(question: Question, choices: Vec<Choice>) -> Self {
        let total_votes = choices.iter().map(|c| i64::from(c.vote_count)).sum();
        Self {
            id: question.id,
            text: question.text,
            publish_at: question.publish_at,
            choices,
            total_votes,
        }
    }
}
