//! Validated names for the tables that hold each document collection.

use std::{fmt::Display, str::FromStr};

use crate::Error;

/// A validated table name.
///
/// Table names are 3 to 255 characters long and only use ASCII letters,
/// digits, underscores, hyphens and full stops. This also makes them safe to
/// quote as SQL identifiers.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TableName(String);

impl TableName {
    /// Create a table name.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::InvalidTableName] if `name` breaks the naming rules.
    pub fn new(name: &str) -> Result<Self, Error> {
        let name = name.trim();
        let valid_length = (3..=255).contains(&name.len());
        let valid_chars = name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));

        if valid_length && valid_chars {
            Ok(Self(name.to_owned()))
        } else {
            Err(Error::InvalidTableName(name.to_owned()))
        }
    }
}

impl AsRef<str> for TableName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for TableName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TableName::new(s)
    }
}

impl Display for TableName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
