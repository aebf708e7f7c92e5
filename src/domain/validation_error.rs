use std::collections::BTreeMap;

use serde::Serialize;

use super::Field;

/// One or more fields failed validation.
///
/// Messages are keyed by field so they can be shown next to the input they refer to.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    errors: BTreeMap<Field, Vec<String>>,
}

impl ValidationError {
    pub fn add(&mut self, field: Field, message: impl Into<String>) {
        self.errors.entry(field).or_default().push(message.into());
    }

    pub fn contains(&self, field: Field) -> bool {
        self.errors.contains_key(&field)
    }

    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.errors.keys().copied()
    }

    pub fn messages(&self, field: Field) -> &[String] {
        self.errors.get(&field).map(Vec::as_slice).unwrap_or_default()
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid contact submission")?;
        for (field, messages) in &self.errors {
            write!(f, "; {}: {}", field, messages.join(", "))?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}
