use std::sync::Arc;

use axum::{extract::State, Json};
use axum_macros::debug_handler;

use crate::{
    domain::ContactFormData,
    form_api_client::FormApiClient,
    startup::ServerAccessKey,
    submission::{submit_contact_form, SubmissionResult},
};

pub use contact_errors::ContactError;

#[cfg_attr(any(test, debug_assertions), debug_handler(state = crate::startup::AppState))]
#[tracing::instrument(
    name = "Handling a contact form submission",
    skip(form_api_client, access_key, form),
    fields(contact_email = %form.email)
)]
pub async fn contact(
    State(form_api_client): State<Arc<FormApiClient>>,
    State(access_key): State<ServerAccessKey>,
    Json(form): Json<ContactFormData>,
) -> Result<Json<SubmissionResult>, ContactError> {
    let result = submit_contact_form(&form_api_client, access_key.0.as_ref(), form).await?;
    if result.success {
        tracing::info!("Contact submission delivered.");
    }
    Ok(Json(result))
}

mod contact_errors {
    use axum::{
        response::{IntoResponse, Response},
        Json,
    };
    use http::StatusCode;

    use crate::{domain::ValidationError, error_chain_fmt};

    #[derive(thiserror::Error)]
    pub enum ContactError {
        #[error(transparent)]
        ValidationError(#[from] ValidationError),
    }

    impl std::fmt::Debug for ContactError {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            error_chain_fmt(self, f)
        }
    }

    impl IntoResponse for ContactError {
        fn into_response(self) -> Response {
            tracing::warn!("{:?}", self);
            match self {
                ContactError::ValidationError(e) => {
                    (StatusCode::UNPROCESSABLE_ENTITY, Json(e)).into_response()
                }
            }
        }
    }
}
