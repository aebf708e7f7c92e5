use super::{
    ContactEmail, ContactFormData, ContactMessage, ContactName, ContactSubject, Field,
    ValidationError,
};

/// A contact submission that satisfied every field constraint.
///
/// The only way to obtain one is [`ContactSubmission::parse`].
#[derive(Clone, Debug)]
pub struct ContactSubmission {
    first_name: ContactName,
    last_name: ContactName,
    email: ContactEmail,
    subject: ContactSubject,
    message: ContactMessage,
}

impl ContactSubmission {
    /// Validate every field of `data`, reporting all failures at once.
    pub fn parse(data: ContactFormData) -> Result<Self, ValidationError> {
        let mut errors = ValidationError::default();

        let first_name = ContactName::parse(data.first_name, "First name")
            .map_err(|e| errors.add(Field::FirstName, e));
        let last_name = ContactName::parse(data.last_name, "Last name")
            .map_err(|e| errors.add(Field::LastName, e));
        let email = ContactEmail::parse(data.email).map_err(|e| errors.add(Field::Email, e));
        let message =
            ContactMessage::parse(data.message).map_err(|e| errors.add(Field::Message, e));
        let subject = ContactSubject::parse(data.subject);

        match (first_name, last_name, email, message) {
            (Ok(first_name), Ok(last_name), Ok(email), Ok(message)) => Ok(Self {
                first_name,
                last_name,
                email,
                subject,
                message,
            }),
            _ => Err(errors),
        }
    }

    /// First and last name joined by a space, without surrounding whitespace.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.as_ref(), self.last_name.as_ref())
            .trim()
            .to_owned()
    }

    pub fn email(&self) -> &ContactEmail {
        &self.email
    }

    pub fn subject(&self) -> &str {
        self.subject.as_ref()
    }

    pub fn message(&self) -> &str {
        self.message.as_ref()
    }
}

impl TryFrom<ContactFormData> for ContactSubmission {
    type Error = ValidationError;

    fn try_from(value: ContactFormData) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

/// Check a single field, as done when the visitor leaves an input.
///
/// Uses the same rules as [`ContactSubmission::parse`].
pub fn validate_field(field: Field, data: &ContactFormData) -> Result<(), String> {
    match field {
        Field::FirstName => ContactName::parse(data.first_name.clone(), "First name").map(drop),
        Field::LastName => ContactName::parse(data.last_name.clone(), "Last name").map(drop),
        Field::Email => ContactEmail::parse(data.email.clone()).map(drop),
        Field::Subject => Ok(()),
        Field::Message => ContactMessage::parse(data.message.clone()).map(drop),
    }
}
