pub mod configuration;
pub mod contact_form;
pub mod domain;
mod error;
pub mod form_api_client;
pub mod routes;
pub mod startup;
pub mod submission;
pub mod telemetry;

pub use error::error_chain_fmt;
