// services.rs
use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::error::{AppError, AppResult};
use crate::models::{Choice, Question};
use crate::store::PollStore;

/// How many questions the index page shows.
pub const LATEST_QUESTIONS_LIMIT: i64 = 5;

pub const NO_CHOICE_SELECTED: &str = "You didn't select a choice";

#[derive(Debug, Clone)]
pub struct QuestionPage {
    pub question: Question,
    pub choices: Vec<Choice>,
}

#[derive(Debug)]
pub enum VoteOutcome {
    Counted,
    /// Nothing was counted; the question is handed back for re-rendering.
    InvalidSelection(QuestionPage),
}

pub async fn latest_questions(
    store: &dyn PollStore,
    now: DateTime<Utc>,
) -> AppResult<Vec<Question>> {
    store.published_questions(now, LATEST_QUESTIONS_LIMIT).await
}

/// Unpublished questions are reported exactly like missing ones.
pub async fn question_detail(
    store: &dyn PollStore,
    id: i64,
    now: DateTime<Utc>,
) -> AppResult<QuestionPage> {
    let question = store
        .question(id)
        .await?
        .filter(|q| q.is_published(now))
        .ok_or_else(|| AppError::not_found(id))?;

    let choices = store.choices(question.id).await?;
    Ok(QuestionPage { question, choices })
}

/// Results are looked up by id alone, without the publish check `question_detail` applies.
pub async fn question_results(store: &dyn PollStore, id: i64) -> AppResult<QuestionPage> {
    let question = store
        .question(id)
        .await?
        .ok_or_else(|| AppError::not_found(id))?;

    let choices = store.choices(question.id).await?;
    Ok(QuestionPage { question, choices })
}

pub async fn vote(
    store: &dyn PollStore,
    question_id: i64,
    choice_id: Option<i64>,
) -> AppResult<VoteOutcome> {
    let question = store
        .question(question_id)
        .await?
        .ok_or_else(|| AppError::not_found(question_id))?;

    if let Some(choice_id) = choice_id {
        if store.cast_vote(question.id, choice_id).await? {
            info!(question_id, choice_id, "Vote recorded");
            return Ok(VoteOutcome::Counted);
        }
    }

    debug!(question_id, ?choice_id, "Rejected vote without a valid choice");
    let choices = store.choices(question.id).await?;
    Ok(VoteOutcome::InvalidSelection(QuestionPage { question, choices }))
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;
    use crate::models::{NewChoice, NewQuestion};
    use crate::store::MemoryStore;

    async fn create_question(store: &MemoryStore, text: &str, days: i64) -> Question {
        store
            .create_question(NewQuestion {
                text: text.to_string(),
                publish_at: Utc::now() + Duration::days(days),
            })
            .await
            .unwrap()
    }

    async fn create_choice(store: &MemoryStore, question: &Question, text: &str) -> Choice {
        store
            .create_choice(NewChoice {
                question_id: question.id,
                text: text.to_string(),
            })
            .await
            .unwrap()
    }

    fn texts(questions: &[Question]) -> Vec<String> {
        questions.iter().map(ToString::to_string).collect()
    }

    #[tokio::test]
    async fn no_questions() {
        let store = MemoryStore::new();
        assert!(latest_questions(&store, Utc::now()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn past_question_is_listed() {
        let store = MemoryStore::new();
        create_question(&store, "Past question.", -30).await;
        let listed = latest_questions(&store, Utc::now()).await.unwrap();
        assert_eq!(texts(&listed), ["Past question."]);
    }

    #[tokio::test]
    async fn future_question_is_not_listed() {
        let store = MemoryStore::new();
        create_question(&store, "Future question.", 30).await;
        assert!(latest_questions(&store, Utc::now()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn future_and_past_question() {
        let store = MemoryStore::new();
        create_question(&store, "Past question.", -30).await;
        create_question(&store, "Future question.", 30).await;
        let listed = latest_questions(&store, Utc::now()).await.unwrap();
        assert_eq!(texts(&listed), ["Past question."]);
    }

    #[tokio::test]
    async fn two_past_questions_newest_first() {
        let store = MemoryStore::new();
        create_question(&store, "Past question 2", -20).await;
        create_question(&store, "Past question 1", -10).await;
        let listed = latest_questions(&store, Utc::now()).await.unwrap();
        assert_eq!(texts(&listed), ["Past question 1", "Past question 2"]);
    }

    #[tokio::test]
    async fn listing_keeps_only_the_latest_five() {
        let store = MemoryStore::new();
        for days in 1..=7 {
            create_question(&store, &format!("{days} days ago"), -days).await;
        }
        let listed = latest_questions(&store, Utc::now()).await.unwrap();
        assert_eq!(listed.len(), 5);
        assert_eq!(listed[0].text, "1 days ago");
        assert_eq!(listed[4].text, "5 days ago");
    }

    #[tokio::test]
    async fn detail_hides_future_questions() {
        let store = MemoryStore::new();
        let future = create_question(&store, "Future question", 20).await;
        let err = question_detail(&store, future.id, Utc::now()).await.unwrap_err();
        assert!(matches!(err, AppError::QuestionNotFound(_)));
    }

    #[tokio::test]
    async fn detail_includes_choices() {
        let store = MemoryStore::new();
        let past = create_question(&store, "Past question", -10).await;
        create_choice(&store, &past, "Yes").await;
        create_choice(&store, &past, "No").await;

        let page = question_detail(&store, past.id, Utc::now()).await.unwrap();
        assert_eq!(page.question, past);
        let labels: Vec<_> = page.choices.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(labels, ["Yes", "No"]);
    }

    #[tokio::test]
    async fn results_skip_publish_check() {
        let store = MemoryStore::new();
        let future = create_question(&store, "Future question", 20).await;
        let page = question_results(&store, future.id).await.unwrap();
        assert_eq!(page.question.id, future.id);

        let err = question_results(&store, future.id + 100).await.unwrap_err();
        assert!(matches!(err, AppError::QuestionNotFound(_)));
    }

    #[tokio::test]
    async fn vote_increments_by_one() {
        let store = MemoryStore::new();
        let question = create_question(&store, "Pick one", -1).await;
        let choice = create_choice(&store, &question, "This one").await;

        let outcome = vote(&store, question.id, Some(choice.id)).await.unwrap();
        assert!(matches!(outcome, VoteOutcome::Counted));
        vote(&store, question.id, Some(choice.id)).await.unwrap();

        assert_eq!(store.choices(question.id).await.unwrap()[0].vote_count, 2);
    }

    #[tokio::test]
    async fn vote_without_valid_choice_changes_nothing() {
        let store = MemoryStore::new();
        let question = create_question(&store, "Pick one", -1).await;
        let other = create_question(&store, "Another", -1).await;
        create_choice(&store, &question, "This one").await;
        let foreign = create_choice(&store, &other, "Elsewhere").await;

        for choice_id in [None, Some(foreign.id), Some(-1)] {
            match vote(&store, question.id, choice_id).await.unwrap() {
                VoteOutcome::InvalidSelection(page) => assert_eq!(page.question.id, question.id),
                VoteOutcome::Counted => panic!("vote for {choice_id:?} should be rejected"),
            }
        }

        assert_eq!(store.choices(question.id).await.unwrap()[0].vote_count, 0);
        assert_eq!(store.choices(other.id).await.unwrap()[0].vote_count, 0);
    }

    #[tokio::test]
    async fn vote_on_missing_question_is_not_found() {
        let store = MemoryStore::new();
        let err = vote(&store, 404, Some(1)).await.unwrap_err();
        assert!(matches!(err, AppError::QuestionNotFound(_)));
    }
}
