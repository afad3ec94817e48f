mod access;
mod criteria;
mod memory;
mod repository;

pub use access::*;
pub use criteria::*;
pub use memory::*;
pub use repository::*;

use serde::{Deserialize, Serialize};

/// User as saved on database.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Assigned by the database on insert.
    #[serde(default)]
    pub id: i32,
    pub login: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub name: String,
    pub access: Access,
}

impl User {
    /// Create a new [`User`] not yet persisted.
    pub fn new(
        login: impl Into<String>,
        password: impl Into<String>,
        name: impl Into<String>,
        access: Access,
    ) -> Self {
        Self {
            id: 0,
            login: login.into(),
            password: password.into(),
            name: name.into(),
            access,
        }
    }
}
