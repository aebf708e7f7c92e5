use validator::validate_email;

#[derive(Clone, Debug)]
pub struct ContactEmail(String);

impl ContactEmail {
    /// Construct a valid [`ContactEmail`] from a String. Surrounding whitespace is dropped.
    pub fn parse(value: String) -> Result<ContactEmail, String> {
        let value = value.trim();
        if value.is_empty() {
            return Err("Email is required".into());
        }
        if validate_email(value) {
            Ok(Self(value.to_owned()))
        } else {
            Err("Please enter a valid email address".into())
        }
    }
}

impl AsRef<str> for ContactEmail {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ContactEmail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
