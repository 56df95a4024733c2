use std::sync::Arc;

use reqwest::multipart;

use crate::config::MessagesConfig;
use crate::config::constants::{ENDPOINT_PATH, FAILURE_MARKER, NOT_POST_MESSAGE, SUCCESS_MARKER};
use crate::content::StaticContent;
use crate::models::{ContactForm, MessageRecord};
use crate::server::{AppState, spawn_test_server};
use crate::storage::MockMessageStore;

use super::*;

async fn setup(store: MockMessageStore) -> String {
    let content = StaticContent::load("./testdata/articles.toml").expect("load articles");
    let state = AppState::new(Arc::new(store), Arc::new(content), MessagesConfig::default());
    let (url, _token) = spawn_test_server(state, ENDPOINT_PATH).await;
    url
}

fn contact_form() -> multipart::Form {
    multipart::Form::new()
        .text("name", "Al'ice")
        .text("email", "a@b.com")
        .text("subject", "<script>")
        .text("message", "x")
}

#[tokio::test]
async fn test_save_message_multipart() {
    let mut store = MockMessageStore::new();
    store
        .expect_insert_message()
        .withf(|form| {
            *form
                == ContactForm::new()
                    .with_name("Al'ice")
                    .with_email("a@b.com")
                    .with_subject("<script>")
                    .with_message("x")
        })
        .times(1)
        .returning(|form| Box::pin(async move { Ok(MessageRecord::new(1, form)) }));
    let url = setup(store).await;

    let res = reqwest::Client::new()
        .post(format!("{url}{ENDPOINT_PATH}"))
        .multipart(contact_form())
        .send()
        .await
        .expect("send request");
    assert_eq!(res.status(), reqwest::StatusCode::OK);
    let body = res.text().await.expect("read body");
    assert!(body.starts_with(SUCCESS_MARKER), "{body}");
}

#[tokio::test]
async fn test_save_message_missing_fields_default_to_empty() {
    let mut store = MockMessageStore::new();
    store
        .expect_insert_message()
        .withf(|form| *form == ContactForm::new().with_email("only@email"))
        .times(1)
        .returning(|form| Box::pin(async move { Ok(MessageRecord::new(1, form)) }));
    let url = setup(store).await;

    let form = multipart::Form::new()
        .text("email", "only@email")
        .text("unknown", "ignored");
    let res = reqwest::Client::new()
        .post(format!("{url}{ENDPOINT_PATH}"))
        .multipart(form)
        .send()
        .await
        .expect("send request");
    assert!(res.text().await.expect("read body").contains(SUCCESS_MARKER));
}

#[tokio::test]
async fn test_save_message_urlencoded_and_empty_body() {
    let mut store = MockMessageStore::new();
    store
        .expect_insert_message()
        .withf(|form| *form == ContactForm::new().with_name("Bob").with_subject("Hi"))
        .times(1)
        .returning(|form| Box::pin(async move { Ok(MessageRecord::new(1, form)) }));
    store
        .expect_insert_message()
        .withf(|form| form.is_empty())
        .times(1)
        .returning(|form| Box::pin(async move { Ok(MessageRecord::new(2, form)) }));
    let url = setup(store).await;

    let client = reqwest::Client::new();
    let res = client
        .post(format!("{url}{ENDPOINT_PATH}"))
        .form(&[("name", "Bob"), ("subject", "Hi")])
        .send()
        .await
        .expect("send request");
    assert!(res.text().await.expect("read body").contains(SUCCESS_MARKER));

    let res = client
        .post(format!("{url}{ENDPOINT_PATH}"))
        .send()
        .await
        .expect("send request");
    assert!(res.text().await.expect("read body").contains(SUCCESS_MARKER));
}

#[tokio::test]
async fn test_save_message_execute_failure() {
    let mut store = MockMessageStore::new();
    store.expect_insert_message().times(1).returning(|_| {
        Box::pin(async { Err(StoreError::Execute("UNIQUE constraint failed".to_string())) })
    });
    let url = setup(store).await;

    let res = reqwest::Client::new()
        .post(format!("{url}{ENDPOINT_PATH}"))
        .multipart(contact_form())
        .send()
        .await
        .expect("send request");
    assert_eq!(res.status(), reqwest::StatusCode::OK);
    let body = res.text().await.expect("read body");
    assert!(body.starts_with(FAILURE_MARKER), "{body}");
    assert!(body.ends_with("UNIQUE constraint failed"), "{body}");
    assert!(!body.contains(SUCCESS_MARKER));
}

#[tokio::test]
async fn test_save_message_fatal_failures_as_json() {
    let mut store = MockMessageStore::new();
    store.expect_insert_message().times(1).returning(|_| {
        Box::pin(async { Err(StoreError::Connection("unable to open database file".to_string())) })
    });
    store.expect_insert_message().times(1).returning(|_| {
        Box::pin(async { Err(StoreError::Prepare("no such table: messages".to_string())) })
    });
    let url = setup(store).await;

    let client = reqwest::Client::new();
    let mut outcomes = vec![];
    for _ in 0..2 {
        let res = client
            .post(format!("{url}{ENDPOINT_PATH}"))
            .header("Accept", "application/json")
            .multipart(contact_form())
            .send()
            .await
            .expect("send request");
        assert_eq!(res.status(), reqwest::StatusCode::OK);
        let outcome: SubmissionOutcome = res.json().await.expect("parse outcome");
        outcomes.push(outcome);
    }

    assert!(!outcomes[0].success);
    assert_eq!(outcomes[0].code, Some(OutcomeCode::ConnectionFailed));
    assert!(outcomes[0].message.starts_with(CONNECTION_FAILED_PREFIX));
    assert!(outcomes[0].message.contains("unable to open database file"));
    assert!(outcomes[0].is_fatal());

    assert!(!outcomes[1].success);
    assert_eq!(outcomes[1].code, Some(OutcomeCode::PrepareFailed));
    assert!(outcomes[1].message.starts_with(PREPARE_FAILED_PREFIX));
    assert!(outcomes[1].message.contains("no such table: messages"));
    assert!(outcomes[1].is_fatal());
}

#[tokio::test]
async fn test_save_message_urlencoded_repeated_field_keeps_last() {
    let mut store = MockMessageStore::new();
    store
        .expect_insert_message()
        .withf(|form| *form == ContactForm::new().with_name("b").with_message("m"))
        .times(1)
        .returning(|form| Box::pin(async move { Ok(MessageRecord::new(1, form)) }));
    let url = setup(store).await;

    let res = reqwest::Client::new()
        .post(format!("{url}{ENDPOINT_PATH}"))
        .header("Content-Type", "application/x-www-form-urlencoded")
        .body("name=a&name=b&message=m&phone=0123")
        .send()
        .await
        .expect("send request");
    assert_eq!(res.status(), reqwest::StatusCode::OK);
    let body = res.text().await.expect("read body");
    assert!(body.starts_with(SUCCESS_MARKER), "{body}");
}

#[tokio::test]
async fn test_save_message_json_success() {
    let mut store = MockMessageStore::new();
    store
        .expect_insert_message()
        .times(1)
        .returning(|form| Box::pin(async move { Ok(MessageRecord::new(42, form)) }));
    let url = setup(store).await;

    let res = reqwest::Client::new()
        .post(format!("{url}{ENDPOINT_PATH}"))
        .header("Accept", "application/json, text/plain;q=0.9")
        .multipart(contact_form())
        .send()
        .await
        .expect("send request");
    let outcome: SubmissionOutcome = res.json().await.expect("parse outcome");
    assert!(outcome.success);
    assert!(outcome.code.is_none());
    assert!(outcome.message.contains(SUCCESS_MARKER));
}

#[tokio::test]
async fn test_non_post_never_touches_store() {
    let mut store = MockMessageStore::new();
    store.expect_insert_message().never();
    let url = setup(store).await;

    let client = reqwest::Client::new();
    for method in [reqwest::Method::GET, reqwest::Method::PUT, reqwest::Method::DELETE] {
        let res = client
            .request(method, format!("{url}{ENDPOINT_PATH}"))
            .send()
            .await
            .expect("send request");
        assert_eq!(res.status(), reqwest::StatusCode::OK);
        assert_eq!(res.text().await.expect("read body"), NOT_POST_MESSAGE);
    }

    let res = client
        .get(format!("{url}{ENDPOINT_PATH}"))
        .header("Accept", "application/json")
        .send()
        .await
        .expect("send request");
    let outcome: SubmissionOutcome = res.json().await.expect("parse outcome");
    assert_eq!(outcome.code, Some(OutcomeCode::MethodNotAllowed));
    assert_eq!(outcome.message, NOT_POST_MESSAGE);
}

#[tokio::test]
async fn test_articles() {
    let url = setup(MockMessageStore::new()).await;
    let client = reqwest::Client::new();

    let summaries: Vec<ArticleSummary> = client
        .get(format!("{url}/api/articles"))
        .send()
        .await
        .expect("send request")
        .json()
        .await
        .expect("parse summaries");
    assert_eq!(summaries.len(), 3);
    assert_eq!(summaries[0].key, "JavaBasic");

    let article: Article = client
        .get(format!("{url}/api/articles/OOP"))
        .send()
        .await
        .expect("send request")
        .json()
        .await
        .expect("parse article");
    assert_eq!(article.category, "Java");
    assert!(!article.content.is_empty());

    let res = client
        .get(format!("{url}/api/articles/unknown"))
        .send()
        .await
        .expect("send request");
    assert_eq!(res.status(), reqwest::StatusCode::NOT_FOUND);
}

#[test]
fn test_response_format_from_headers() {
    let mut headers = HeaderMap::new();
    assert_eq!(ResponseFormat::from_headers(&headers), ResponseFormat::Text);

    headers.insert(ACCEPT, "text/html".parse().expect("header value"));
    assert_eq!(ResponseFormat::from_headers(&headers), ResponseFormat::Text);

    headers.append(ACCEPT, "application/json".parse().expect("header value"));
    assert_eq!(ResponseFormat::from_headers(&headers), ResponseFormat::Json);
}
