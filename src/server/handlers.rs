#[cfg(test)]
#[path = "handlers_test.rs"]
mod tests;

use axum::{
    Json,
    extract::{Path, State},
    http::{HeaderMap, Method, StatusCode, header::ACCEPT},
    response::{IntoResponse, Response},
};
use uuid::Uuid;

use crate::config::APP_NAME;
use crate::config::constants::{CONNECTION_FAILED_PREFIX, PREPARE_FAILED_PREFIX};
use crate::models::{Article, ArticleSummary, OutcomeCode, SubmissionOutcome};
use crate::storage::StoreError;

use super::AppState;
use super::extract::SubmittedForm;

/// Body format picked from the `Accept` header. Plain text keeps the marker
/// contract for clients that only look at the body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseFormat {
    Text,
    Json,
}

impl ResponseFormat {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let wants_json = headers
            .get_all(ACCEPT)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .any(|v| v.contains("application/json"));
        if wants_json {
            ResponseFormat::Json
        } else {
            ResponseFormat::Text
        }
    }

    pub fn respond(self, status: StatusCode, outcome: SubmissionOutcome) -> Response {
        match self {
            ResponseFormat::Json => (status, Json(outcome)).into_response(),
            ResponseFormat::Text => (status, outcome.message).into_response(),
        }
    }
}

pub async fn root() -> String {
    format!("Welcome to {}!", APP_NAME)
}

pub async fn save_message(
    State(state): State<AppState>,
    headers: HeaderMap,
    SubmittedForm(form): SubmittedForm,
) -> Response {
    let request_id = Uuid::new_v4();
    let format = ResponseFormat::from_headers(&headers);
    log::debug!("[{}] Received contact form: {:?}", request_id, form);

    // Every outcome answers 200. The body carries the signal.
    let messages = &state.messages;
    let outcome = match state.store.insert_message(form).await {
        Ok(record) => {
            log::info!(
                "[{}] Message #{} saved (from {:?})",
                request_id,
                record.id(),
                record.form().email()
            );
            SubmissionOutcome::saved(&messages.success)
        }
        Err(StoreError::Execute(err)) => {
            log::warn!("[{}] Failed to save message: {}", request_id, err);
            SubmissionOutcome::failed(
                OutcomeCode::ExecuteFailed,
                format!("{}{}", messages.failure_prefix, err),
            )
        }
        Err(StoreError::Prepare(err)) => {
            log::error!("[{}] Failed to prepare insert: {}", request_id, err);
            SubmissionOutcome::failed(
                OutcomeCode::PrepareFailed,
                format!("{}{}", PREPARE_FAILED_PREFIX, err),
            )
        }
        Err(StoreError::Connection(err)) => {
            log::error!("[{}] Failed to connect to the store: {}", request_id, err);
            SubmissionOutcome::failed(
                OutcomeCode::ConnectionFailed,
                format!("{}{}", CONNECTION_FAILED_PREFIX, err),
            )
        }
    };

    format.respond(StatusCode::OK, outcome)
}

/// Any method other than POST on the contact endpoint. Answers with the
/// informational text and never touches the store.
pub async fn not_posted(
    State(state): State<AppState>,
    method: Method,
    headers: HeaderMap,
) -> Response {
    log::debug!("Contact endpoint called with {}", method);
    ResponseFormat::from_headers(&headers).respond(
        StatusCode::OK,
        SubmissionOutcome::failed(OutcomeCode::MethodNotAllowed, &state.messages.not_post),
    )
}

pub async fn list_articles(State(state): State<AppState>) -> Json<Vec<ArticleSummary>> {
    Json(state.content.list())
}

pub async fn get_article(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<Article>, StatusCode> {
    state.content.get(&key).map(Json).ok_or(StatusCode::NOT_FOUND)
}
