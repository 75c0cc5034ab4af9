// src/seed.rs
//! Demo polls for running without a database.

use chrono::{DateTime, Duration, Utc};
use tracing::info;

use crate::error::AppResult;
use crate::models::{NewChoice, NewQuestion, Question};
use crate::store::PollStore;

const DEMO_POLLS: &[(&str, i64, &[&str])] = &[
    ("What's new?", 0, &["Not much", "The sky", "Just hacking again"]),
    ("Tabs or spaces?", 3, &["Tabs", "Spaces"]),
    ("Which release should ship next?", -7, &["1.0", "0.9.1"]),
];

/// Adds a few questions with choices. One goes live a week after `now`, so
/// it only shows up once its publish time has passed.
pub async fn seed_demo(store: &dyn PollStore, now: DateTime<Utc>) -> AppResult<Vec<Question>> {
    let mut created = Vec::with_capacity(DEMO_POLLS.len());

    for &(text, days_ago, choices) in DEMO_POLLS {
        let question = store
            .create_question(NewQuestion {
                text: text.to_string(),
                publish_at: now - Duration::days(days_ago),
            })
            .await?;

        for &choice in choices {
            store
                .create_choice(NewChoice {
                    question_id: question.id,
                    text: choice.to_string(),
                })
                .await?;
        }
        created.push(question);
    }

    info!(count = created.len(), "Seeded demo polls");
    Ok(created)
}
