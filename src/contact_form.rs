use std::{collections::BTreeMap, sync::Arc, time::Duration};

use secrecy::Secret;
use tokio::{sync::watch, task::JoinHandle};

use crate::{
    configuration::FormApiSettings,
    domain::{validate_field, ContactFormData, ContactSubmission, Field},
    form_api_client::FormApiClient,
    submission::{deliver_submission, SubmissionError},
};

/// How long the success message stays up before the form goes back to idle.
pub const DEFAULT_RESET_AFTER: Duration = Duration::from_secs(5);

pub const SUCCESS_MESSAGE: &str = "Thank you! Your message has been sent successfully.";
pub const UNAVAILABLE_MESSAGE: &str =
    "The contact form is currently unavailable. Please try again later.";
pub const FAILURE_MESSAGE: &str = "Something went wrong. Please try again.";

/// What the visitor currently sees around the submit button.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FormStatus {
    Idle,
    Submitting,
    Success,
    Error { message: String },
}

impl FormStatus {
    pub fn message(&self) -> Option<&str> {
        match self {
            FormStatus::Success => Some(SUCCESS_MESSAGE),
            FormStatus::Error { message } => Some(message.as_str()),
            FormStatus::Idle | FormStatus::Submitting => None,
        }
    }
}

/// Headless state of the contact form on the visitor's side.
///
/// Submits straight to the form API with the public (client) access key.
/// Failures never escape: they end up in [`FormStatus`].
#[derive(Debug)]
pub struct ContactForm {
    client: Arc<FormApiClient>,
    access_key: Option<Secret<String>>,
    reset_after: Duration,
    values: ContactFormData,
    errors: BTreeMap<Field, String>,
    status: Arc<watch::Sender<FormStatus>>,
    pending_reset: Option<JoinHandle<()>>,
}

impl ContactForm {
    pub fn new(client: Arc<FormApiClient>, access_key: Option<Secret<String>>) -> Self {
        let (status, _) = watch::channel(FormStatus::Idle);
        Self {
            client,
            access_key,
            reset_after: DEFAULT_RESET_AFTER,
            values: ContactFormData::default(),
            errors: BTreeMap::new(),
            status: Arc::new(status),
            pending_reset: None,
        }
    }

    /// Build a form wired to the configured API with the client access key.
    pub fn from_settings(settings: &FormApiSettings) -> Result<Self, reqwest::Error> {
        let form = Self::new(
            Arc::new(settings.client()?),
            settings.client_access_key().cloned(),
        );
        Ok(match settings.reset_after() {
            Some(reset_after) => form.with_reset_after(reset_after),
            None => form,
        })
    }

    pub fn with_reset_after(mut self, reset_after: Duration) -> Self {
        self.reset_after = reset_after;
        self
    }

    pub fn values(&self) -> &ContactFormData {
        &self.values
    }

    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        self.values.set(field, value.into());
    }

    /// Inline error currently shown for `field`.
    pub fn error(&self, field: Field) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn status(&self) -> FormStatus {
        self.status.borrow().clone()
    }

    /// Observe status changes, including the automatic reset after a success.
    pub fn subscribe(&self) -> watch::Receiver<FormStatus> {
        self.status.subscribe()
    }

    /// Validate a single field when the visitor leaves it.
    pub fn blur(&mut self, field: Field) -> Option<&str> {
        match validate_field(field, &self.values) {
            Ok(()) => {
                self.errors.remove(&field);
            }
            Err(message) => {
                self.errors.insert(field, message);
            }
        }
        self.error(field)
    }

    /// Validate everything and, if the form is valid, send it.
    ///
    /// An invalid form only updates the inline errors; the status is left alone
    /// and nothing is sent. The exclusive borrow keeps a second submit out
    /// until this one has finished.
    #[tracing::instrument(name = "Submitting the contact form from the client", skip(self))]
    pub async fn submit(&mut self) -> FormStatus {
        let submission = match ContactSubmission::parse(self.values.clone()) {
            Ok(submission) => {
                self.errors.clear();
                submission
            }
            Err(e) => {
                self.errors = e
                    .fields()
                    .filter_map(|field| Some((field, e.messages(field).first()?.clone())))
                    .collect();
                tracing::debug!("Blocked an invalid submission: {}", e);
                return self.status();
            }
        };

        self.cancel_pending_reset();
        self.status.send_replace(FormStatus::Submitting);

        let outcome =
            deliver_submission(&self.client, self.access_key.as_ref(), &submission).await;

        let status = match outcome {
            Ok(_) => {
                self.values = ContactFormData::default();
                self.schedule_reset();
                FormStatus::Success
            }
            Err(e) => {
                tracing::warn!(
                    error.cause_chain = ?e,
                    error.message = %e,
                    "Contact form submission failed"
                );
                FormStatus::Error {
                    message: failure_message(e),
                }
            }
        };
        self.status.send_replace(status.clone());
        status
    }

    fn cancel_pending_reset(&mut self) {
        if let Some(handle) = self.pending_reset.take() {
            handle.abort();
        }
    }

    fn schedule_reset(&mut self) {
        let status = Arc::clone(&self.status);
        let reset_after = self.reset_after;
        self.pending_reset = Some(tokio::spawn(async move {
            tokio::time::sleep(reset_after).await;
            // Only a success that is still on screen goes back to idle
            status.send_if_modified(|current| {
                if *current == FormStatus::Success {
                    *current = FormStatus::Idle;
                    true
                } else {
                    false
                }
            });
        }));
    }
}

impl Drop for ContactForm {
    fn drop(&mut self) {
        self.cancel_pending_reset();
    }
}

fn failure_message(error: SubmissionError) -> String {
    match error {
        SubmissionError::Configuration => UNAVAILABLE_MESSAGE.to_owned(),
        SubmissionError::Rejected {
            message: Some(message),
        } if !message.is_empty() => message,
        _ => FAILURE_MESSAGE.to_owned(),
    }
}
