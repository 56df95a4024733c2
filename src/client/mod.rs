pub mod capture;

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;

pub use capture::SubmissionCapture;

use std::time;

use reqwest::{
    header::{ACCEPT, CONTENT_TYPE},
    multipart,
};
use thiserror::Error;

use crate::config::{ClientConfig, user_agent};
use crate::models::{ContactForm, SubmissionOutcome};

#[derive(Error, Debug)]
pub enum ClientError {
    /// No response arrived.
    #[error("sending contact form: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Transport half of Submission Capture: posts the form as multipart data and
/// turns the response into a [`SubmissionOutcome`].
#[derive(Debug, Clone, Default)]
pub struct SubmissionClient {
    endpoint: String,
    timeout: Option<time::Duration>,
    http: reqwest::Client,
}

impl From<&ClientConfig> for SubmissionClient {
    fn from(value: &ClientConfig) -> Self {
        let mut client = SubmissionClient::new().with_endpoint(&value.endpoint);
        if let Some(secs) = value.timeout_secs {
            client = client.with_timeout(time::Duration::from_secs(secs));
        }
        client
    }
}

impl SubmissionClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = endpoint.to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: time::Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn timeout(&self) -> Option<time::Duration> {
        self.timeout
    }

    pub async fn submit(&self, form: &ContactForm) -> Result<SubmissionOutcome, ClientError> {
        let payload = form
            .fields()
            .into_iter()
            .fold(multipart::Form::new(), |payload, (name, value)| {
                payload.text(name, value.to_string())
            });

        let mut req = self
            .http
            .post(&self.endpoint)
            .header("User-Agent", user_agent())
            .header(ACCEPT, "application/json, text/plain;q=0.9")
            .multipart(payload);

        if let Some(timeout) = self.timeout {
            req = req.timeout(timeout);
        }

        let res = req.send().await?;
        let status = res.status();
        let is_json = res
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.starts_with("application/json"));
        let body = res.text().await?;
        log::debug!("Contact endpoint answered {} ({} bytes)", status, body.len());

        if is_json {
            match serde_json::from_str(&body) {
                Ok(outcome) => return Ok(outcome),
                Err(err) => log::warn!("Response is not a submission outcome: {}", err),
            }
        }
        Ok(SubmissionOutcome::from_text(body))
    }
}
