#[derive(Clone, Debug)]
pub struct ContactName(String);

impl ContactName {
    /// Construct a valid [`ContactName`] from a String.
    ///
    /// `label` names the field in the error message, e.g. "First name".
    pub fn parse(value: String, label: &str) -> Result<ContactName, String> {
        if value.is_empty() {
            Err(format!("{label} is required"))
        } else {
            Ok(Self(value))
        }
    }
}

impl AsRef<str> for ContactName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
