mod contact_email;
mod contact_form_data;
mod contact_message;
mod contact_name;
mod contact_subject;
mod contact_submission;
mod validation_error;

pub use contact_email::ContactEmail;
pub use contact_form_data::{ContactFormData, Field};
pub use contact_message::ContactMessage;
pub use contact_name::ContactName;
pub use contact_subject::ContactSubject;
pub use contact_submission::{validate_field, ContactSubmission};
pub use validation_error::ValidationError;
