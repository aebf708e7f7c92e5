use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use tracing::{field::display, Span};
use uuid::Uuid;

use crate::{
    domain::{ContactFormData, ContactSubmission, ValidationError},
    error_chain_fmt,
    form_api_client::FormApiClient,
};

pub const NOT_CONFIGURED_MESSAGE: &str = "Form service is not configured";

/// The normalized outcome of one delivery attempt.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionResult {
    pub success: bool,
    pub message: String,
}

#[derive(thiserror::Error)]
pub enum SubmissionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("The form API access key is not configured")]
    Configuration,
    #[error("Failed to reach the form API")]
    Network(#[source] reqwest::Error),
    #[error("The form API rejected the submission")]
    Rejected { message: Option<String> },
}

impl std::fmt::Debug for SubmissionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

/// Deliver a validated submission: at most one call to the form API.
///
/// Returns the message the API sent back, if any. A blank access key counts
/// as missing and short-circuits before any network traffic.
#[tracing::instrument(
    name = "Delivering a contact submission",
    skip_all,
    fields(
        submission_id = %Uuid::new_v4(),
        contact_email = %submission.email(),
        remote_message = tracing::field::Empty,
    )
)]
pub async fn deliver_submission(
    client: &FormApiClient,
    access_key: Option<&Secret<String>>,
    submission: &ContactSubmission,
) -> Result<Option<String>, SubmissionError> {
    let access_key = access_key
        .filter(|key| !key.expose_secret().trim().is_empty())
        .ok_or(SubmissionError::Configuration)?;

    let response = client
        .submit(access_key, submission)
        .await
        .map_err(SubmissionError::Network)?;

    if let Some(message) = &response.message {
        Span::current().record("remote_message", &display(message));
    }

    if response.success {
        Ok(response.message)
    } else {
        Err(SubmissionError::Rejected {
            message: response.message,
        })
    }
}

/// Trusted entry point for contact submissions.
///
/// Invalid input is returned as an error the caller has to handle. Every other
/// failure is folded into an unsuccessful [`SubmissionResult`].
#[tracing::instrument(name = "Submitting the contact form", skip_all)]
pub async fn submit_contact_form(
    client: &FormApiClient,
    access_key: Option<&Secret<String>>,
    data: ContactFormData,
) -> Result<SubmissionResult, ValidationError> {
    let submission: ContactSubmission = data.try_into()?;

    let result = match deliver_submission(client, access_key, &submission).await {
        Ok(message) => SubmissionResult {
            success: true,
            message: message.unwrap_or_default(),
        },
        Err(SubmissionError::Configuration) => {
            tracing::error!("Contact form submitted but no server access key is configured");
            SubmissionResult {
                success: false,
                message: NOT_CONFIGURED_MESSAGE.to_owned(),
            }
        }
        Err(SubmissionError::Rejected { message }) => {
            tracing::warn!(
                remote_message = message.as_deref().unwrap_or_default(),
                "The form API rejected a contact submission"
            );
            SubmissionResult {
                success: false,
                message: message.unwrap_or_default(),
            }
        }
        Err(e) => {
            tracing::error!(
                error.cause_chain = ?e,
                error.message = %e,
                "Failed to deliver a contact submission"
            );
            SubmissionResult {
                success: false,
                message: String::new(),
            }
        }
    };

    Ok(result)
}
