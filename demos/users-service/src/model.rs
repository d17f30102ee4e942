//! Users and their ids.

use std::fmt;
use std::num::ParseIntError;

use apiary::extract::FromParam;
use serde::{Deserialize, Serialize};

/// Identifier of a user, decoded from decimal path text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub i64);

impl FromParam for UserId {
    type Error = ParseIntError;

    fn from_param(text: &str) -> Result<Self, Self::Error> {
        text.parse().map(Self)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A stored user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique id.
    pub id: UserId,
    /// Display name.
    pub name: String,
}

impl User {
    /// Creates a user.
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id: UserId(id),
            name: name.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_id_from_param() {
        assert_eq!(UserId::from_param("42").unwrap(), UserId(42));
        assert_eq!(UserId::from_param("-1").unwrap(), UserId(-1));
        assert!(UserId::from_param("abc").is_err());
        assert!(UserId::from_param("").is_err());
    }

    #[test]
    fn test_user_json_shape() {
        let json = serde_json::to_string(&User::new(2, "Bob")).unwrap();
        assert_eq!(json, r#"{"id":2,"name":"Bob"}"#);

        let user: User = serde_json::from_str(r#"{"id":1,"name":"X"}"#).unwrap();
        assert_eq!(user, User::new(1, "X"));
    }
}
