// views.rs
//! Page templates. The markup lives under `templates/`.

use askama::Template;
use chrono::{DateTime, Utc};

use crate::models::{Choice, Question};
use crate::services::QuestionPage;

/// Builds paths under the configured mount point.
#[derive(Debug, Clone, Copy)]
pub struct Urls<'a> {
    mount: &'a str,
}

impl<'a> Urls<'a> {
    pub fn new(mount: &'a str) -> Self {
        Self { mount }
    }

    pub fn index(&self) -> String {
        format!("{}/", self.mount)
    }

    pub fn detail(&self, id: i64) -> String {
        format!("{}/{id}/", self.mount)
    }

    pub fn results(&self, id: i64) -> String {
        format!("{}/{id}/results/", self.mount)
    }

    pub fn vote(&self, id: i64) -> String {
        format!("{}/{id}/vote/", self.mount)
    }
}

pub struct ListedQuestion<'a> {
    pub question: &'a Question,
    pub recent: bool,
    pub url: String,
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate<'a> {
    pub questions: Vec<ListedQuestion<'a>>,
}

impl<'a> IndexTemplate<'a> {
    pub fn new(urls: Urls<'_>, questions: &'a [Question], now: DateTime<Utc>) -> Self {
        let questions = questions
            .iter()
            .map(|question| ListedQuestion {
                question,
                recent: question.is_recent(now),
                url: urls.detail(question.id),
            })
            .collect();
        Self { questions }
    }
}

#[derive(Template)]
#[template(path = "detail.html")]
pub struct DetailTemplate<'a> {
    pub question: &'a Question,
    pub choices: &'a [Choice],
    pub vote_url: String,
    pub index_url: String,
    pub error_message: Option<&'static str>,
}

impl<'a> DetailTemplate<'a> {
    pub fn new(
        urls: Urls<'_>,
        page: &'a QuestionPage,
        error_message: Option<&'static str>,
    ) -> Self {
        Self {
            question: &page.question,
            choices: &page.choices,
            vote_url: urls.vote(page.question.id),
            index_url: urls.index(),
            error_message,
        }
    }
}

#[derive(Template)]
#[template(path = "results.html")]
pub struct ResultsTemplate<'a> {
    pub question: &'a Question,
    pub choices: &'a [Choice],
    pub detail_url: String,
    pub index_url: String,
}

impl<'a> ResultsTemplate<'a> {
    pub fn new(urls: Urls<'_>, page: &'a QuestionPage) -> Self {
        Self {
            question: &page.question,
            choices: &page.choices,
            detail_url: urls.detail(page.question.id),
            index_url: urls.index(),
        }
    }
}

#[derive(Template)]
#[template(path = "not_found.html")]
pub struct NotFoundTemplate;
