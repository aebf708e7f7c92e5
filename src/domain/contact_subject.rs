/// Subject used when the visitor leaves the field blank.
pub const DEFAULT_SUBJECT: &str = "Contact Form Submission";

#[derive(Clone, Debug)]
pub struct ContactSubject(String);

impl ContactSubject {
    /// The subject is optional, so parsing never fails.
    pub fn parse(value: Option<String>) -> ContactSubject {
        match value {
            Some(subject) if !subject.trim().is_empty() => Self(subject),
            _ => Self(DEFAULT_SUBJECT.to_owned()),
        }
    }
}

impl AsRef<str> for ContactSubject {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
