//! Access levels of a [`User`](super::User).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Authorization tier associated with a user account.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Access {
    #[default]
    User,
    Admin,
}

/// Stored name of every access level.
const ACCESS_LEVELS: &[(&str, Access)] =
    &[("user", Access::User), ("admin", Access::Admin)];

/// Stored value is not a known access level.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown access level {0:?}")]
pub struct UnknownAccess(pub String);

impl Access {
    /// Name of the level as stored in the `users.access` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            Access::User => "user",
            Access::Admin => "admin",
        }
    }
}

impl fmt::Display for Access {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Access {
    type Err = UnknownAccess;

    /// Case-insensitive.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let needle = value.to_lowercase();

        ACCESS_LEVELS
            .iter()
            .find(|(name, _)| *name == needle)
            .map(|(_, access)| *access)
            .ok_or_else(|| UnknownAccess(value.to_owned()))
    }
}
