#[cfg(test)]
#[path = "capture_test.rs"]
mod tests;

use std::sync::atomic::{AtomicBool, Ordering};

use uuid::Uuid;

use crate::config::MessagesConfig;
use crate::models::{ContactForm, Notice};

use super::SubmissionClient;

/// Submission Capture: sends one form at a time and turns the result into
/// the notice shown under the form.
pub struct SubmissionCapture {
    client: SubmissionClient,
    in_flight: AtomicBool,
    network_error: String,
    in_progress: String,
}

/// Held while a submission is in flight. Dropping it frees the slot.
pub struct InFlightGuard<'a> {
    flag: &'a AtomicBool,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

impl SubmissionCapture {
    pub fn new(client: SubmissionClient, messages: &MessagesConfig) -> Self {
        Self {
            client,
            in_flight: AtomicBool::new(false),
            network_error: messages.network_error.clone(),
            in_progress: messages.in_progress.clone(),
        }
    }

    pub fn try_begin(&self) -> Option<InFlightGuard<'_>> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| InFlightGuard {
                flag: &self.in_flight,
            })
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Submits the form. On success the form is cleared; on any failure it
    /// keeps its values. A call made while another submission is pending is
    /// not sent.
    pub async fn submit(&self, form: &mut ContactForm) -> Notice {
        let Some(_guard) = self.try_begin() else {
            log::debug!("Submission already in flight, ignoring");
            return Notice::info(&self.in_progress);
        };

        let submission_id = Uuid::new_v4();
        log::debug!(
            "[{}] Submitting contact form to {}",
            submission_id,
            self.client.endpoint()
        );

        match self.client.submit(form).await {
            Ok(outcome) if outcome.success => {
                log::info!("[{}] Contact form saved", submission_id);
                form.reset();
                Notice::success(outcome.message)
            }
            Ok(outcome) => {
                log::warn!(
                    "[{}] Contact form rejected ({:?}): {}",
                    submission_id,
                    outcome.code,
                    outcome.message
                );
                Notice::error(outcome.message)
            }
            Err(err) => {
                log::error!("[{}] {}", submission_id, err);
                Notice::error(&self.network_error)
            }
        }
    }
}
