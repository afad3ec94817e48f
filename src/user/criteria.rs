//! Search filter over the `users` table.

use serde::Deserialize;
use sqlx::{Postgres, QueryBuilder};

use super::{Access, User};

/// Filter on users. Absent fields do not constrain the result.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct UserSearchCriteria {
    pub login: Option<String>,
    pub access: Option<Access>,
    pub name: Option<String>,
}

/// Searchable column of `users`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Login,
    Access,
    Name,
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Field::Login => write!(f, "login"),
            Field::Access => write!(f, "access"),
            Field::Name => write!(f, "name"),
        }
    }
}

impl UserSearchCriteria {
    /// Create an empty [`UserSearchCriteria`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Constrain on `login`.
    pub fn login(mut self, login: impl Into<String>) -> Self {
        self.login = Some(login.into());
        self
    }

    /// Constrain on `access`.
    pub fn access(mut self, access: Access) -> Self {
        self.access = Some(access);
        self
    }

    /// Constrain on `name`.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Whether no field constrains the search.
    pub fn is_empty(&self) -> bool {
        self.login.is_none() && self.access.is_none() && self.name.is_none()
    }

    /// Present fields with the value to bind, in `login`, `access`, `name`
    /// order.
    pub fn parameters(&self) -> Vec<(Field, &str)> {
        [
            (Field::Login, self.login.as_deref()),
            (Field::Access, self.access.as_ref().map(Access::as_str)),
            (Field::Name, self.name.as_deref()),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.map(|value| (field, value)))
        .collect()
    }

    /// Whether `user` satisfies every present field.
    pub fn matches(&self, user: &User) -> bool {
        self.parameters().into_iter().all(|(field, value)| match field {
            Field::Login => user.login == value,
            Field::Access => user.access.as_str() == value,
            Field::Name => user.name == value,
        })
    }

    /// Build the parameterized `SELECT` for this criteria.
    ///
    /// Column names come from [`Field`]; every value is bound.
    pub fn query(&self) -> QueryBuilder<'_, Postgres> {
        let mut builder =
            QueryBuilder::new(format!("{SELECT_USERS} WHERE true"));

        for (field, value) in self.parameters() {
            builder
                .push(format_args!(" AND users.{field} = "))
                .push_bind(value);
        }

        builder
    }
}

pub(crate) const SELECT_USERS: &str =
    "SELECT id, login, password, name, access FROM users";
