use std::time::Duration;

use reqwest::{header, Client};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};

use crate::domain::ContactSubmission;

/// Client for the third-party form API that delivers contact messages by email.
#[derive(Debug)]
pub struct FormApiClient {
    base_url: String,
    http_client: Client,
}

impl FormApiClient {
    pub fn new(base_url: String, timeout: Option<Duration>) -> Result<Self, reqwest::Error> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_owned(),
            http_client: builder.build()?,
        })
    }

    /// Send one submission. Non-2xx statuses and unparsable bodies are errors.
    #[tracing::instrument(name = "Calling the form API", skip_all)]
    pub async fn submit(
        &self,
        access_key: &Secret<String>,
        submission: &ContactSubmission,
    ) -> Result<FormApiResponse, reqwest::Error> {
        let url = format!("{}/submit", self.base_url);

        let request_body = SubmitRequest {
            access_key: access_key.expose_secret(),
            name: submission.full_name(),
            email: submission.email().as_ref(),
            subject: submission.subject(),
            message: submission.message(),
        };

        let response = self
            .http_client
            .post(&url)
            .header(header::ACCEPT, "application/json")
            .json(&request_body)
            .send()
            .await?
            .error_for_status()?
            .json::<SubmitResponse>()
            .await?;

        Ok(response.into())
    }
}

/// The envelope returned by the form API.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormApiResponse {
    pub success: bool,
    pub message: Option<String>,
}

#[derive(Serialize)]
struct SubmitRequest<'a> {
    access_key: &'a str,
    name: String,
    email: &'a str,
    subject: &'a str,
    message: &'a str,
}

#[derive(Deserialize)]
struct SubmitResponse {
    #[serde(default)]
    success: serde_json::Value,
    #[serde(default)]
    message: serde_json::Value,
}

impl From<SubmitResponse> for FormApiResponse {
    fn from(value: SubmitResponse) -> Self {
        let message = match value.message {
            serde_json::Value::Null => None,
            serde_json::Value::String(message) => Some(message),
            other => Some(other.to_string()),
        };
        Self {
            success: is_truthy(&value.success),
            message,
        }
    }
}

/// The API is loosely typed, so `success` follows JavaScript truthiness.
fn is_truthy(value: &serde_json::Value) -> bool {
    match value {
        serde_json::Value::Null => false,
        serde_json::Value::Bool(b) => *b,
        serde_json::Value::Number(n) => n.as_f64().map_or(false, |n| n != 0.0),
        serde_json::Value::String(s) => !s.is_empty(),
        serde_json::Value::Array(_) | serde_json::Value::Object(_) => true,
    }
}
