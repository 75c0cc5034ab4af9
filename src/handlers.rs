// handlers.rs
use std::sync::Arc;

use askama::Template;
use axum::{
    extract::{rejection::FormRejection, Path, State},
    response::{Html, IntoResponse, Redirect, Response},
    Form, Json,
};
use chrono::Utc;

use crate::config::normalize_mount_path;
use crate::error::{AppError, AppResult};
use crate::models::{PollResults, VoteForm};
use crate::services::{self, VoteOutcome, NO_CHOICE_SELECTED};
use crate::store::PollStore;
use crate::views::{DetailTemplate, IndexTemplate, ResultsTemplate, Urls};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn PollStore>,
    pub mount_path: Arc<str>,
}

impl AppState {
    pub fn new(store: Arc<dyn PollStore>, mount_path: &str) -> Self {
        Self {
            store,
            mount_path: Arc::from(normalize_mount_path(mount_path)),
        }
    }

    fn urls(&self) -> Urls<'_> {
        Urls::new(&self.mount_path)
    }
}

/// Ids that aren't integers can't name a question.
fn parse_id(raw: &str) -> AppResult<i64> {
    raw.parse().map_err(|_| AppError::not_found(raw))
}

/// List the latest published questions
#[tracing::instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> AppResult<Html<String>> {
    let now = Utc::now();
    let questions = services::latest_questions(state.store.as_ref(), now).await?;
    let page = IndexTemplate::new(state.urls(), &questions, now).render()?;
    Ok(Html(page))
}

/// Show a published question with its voting form
#[tracing::instrument(skip(state))]
pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Html<String>> {
    let id = parse_id(&id)?;
    let page = services::question_detail(state.store.as_ref(), id, Utc::now()).await?;
    let html = DetailTemplate::new(state.urls(), &page, None).render()?;
    Ok(Html(html))
}

/// Show the vote counts of a question
#[tracing::instrument(skip(state))]
pub async fn results(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Html<String>> {
    let id = parse_id(&id)?;
    let page = services::question_results(state.store.as_ref(), id).await?;
    let html = ResultsTemplate::new(state.urls(), &page).render()?;
    Ok(Html(html))
}

/// Vote for a choice
///
/// A body that can't be read as a form counts as a vote without a choice, so
/// the question lookup still decides between 404 and the re-rendered form.
#[tracing::instrument(skip(state, form))]
pub async fn vote(
    State(state): State<AppState>,
    Path(id): Path<String>,
    form: Result<Form<VoteForm>, FormRejection>,
) -> AppResult<Response> {
    let id = parse_id(&id)?;
    let form = match form {
        Ok(Form(form)) => form,
        Err(rejection) => {
            tracing::debug!(%rejection, "Unreadable vote form");
            VoteForm::default()
        }
    };

    match services::vote(state.store.as_ref(), id, form.choice_id()).await? {
        VoteOutcome::Counted => Ok(Redirect::to(&state.urls().results(id)).into_response()),
        VoteOutcome::InvalidSelection(page) => {
            let html =
                DetailTemplate::new(state.urls(), &page, Some(NO_CHOICE_SELECTED)).render()?;
            Ok(Html(html).into_response())
        }
    }
}

/// Send the bare mount path to the index page
pub async fn index_redirect(State(state): State<AppState>) -> Redirect {
    Redirect::permanent(&state.urls().index())
}

/// Vote counts as JSON
#[tracing::instrument(skip(state))]
pub async fn results_json(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let lookup = async {
        let id = parse_id(&id)?;
        services::question_results(state.store.as_ref(), id).await
    };

    match lookup.await {
        Ok(page) => Json(PollResults::new(page.question, page.choices)).into_response(),
        Err(e) => e.into_json_response(),
    }
}
