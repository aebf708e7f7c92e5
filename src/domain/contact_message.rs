use unicode_segmentation::UnicodeSegmentation;

/// Shortest message accepted, in user-perceived characters.
pub const MIN_MESSAGE_LENGTH: usize = 10;

#[derive(Clone, Debug)]
pub struct ContactMessage(String);

impl ContactMessage {
    /// Construct a valid [`ContactMessage`] from a String.
    pub fn parse(value: String) -> Result<ContactMessage, String> {
        // Count graphemes so that accented or combined characters count once
        let length = value.graphemes(true).count();
        if length < MIN_MESSAGE_LENGTH {
            Err(format!(
                "Message must be at least {MIN_MESSAGE_LENGTH} characters"
            ))
        } else {
            Ok(Self(value))
        }
    }
}

impl AsRef<str> for ContactMessage {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
