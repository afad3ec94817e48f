//! Handle database requests.

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};

use crate::error::{Error, Result};
use crate::user::criteria::SELECT_USERS;
use crate::user::{UnknownAccess, User, UserSearchCriteria};

/// Port for user persistence.
///
/// Every call is a single independent statement. `update` and `delete` do
/// not fail when no row carries the id; they return the number of rows
/// touched instead.
#[async_trait]
pub trait UserDao: Send + Sync {
    /// Insert [`User`] and return the id assigned by the database.
    async fn insert(&self, user: &User) -> Result<i32>;
    /// Find exactly one [`User`] by `id`.
    async fn select(&self, id: i32) -> Result<User>;
    /// Every stored [`User`].
    async fn select_all(&self) -> Result<Vec<User>>;
    /// Overwrite every mutable field of the row with `user.id`.
    async fn update(&self, user: &User) -> Result<u64>;
    /// Delete the row with `id`.
    async fn delete(&self, id: i32) -> Result<u64>;
    /// Users satisfying every present field of `criteria`.
    async fn find_by_criteria(
        &self,
        criteria: &UserSearchCriteria,
    ) -> Result<Vec<User>>;
}

/// PostgreSQL user repository.
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    /// Create a new [`PgUserRepository`].
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// User record as stored in the database.
#[derive(Debug, Clone, FromRow)]
struct UserRecord {
    id: i32,
    login: String,
    password: String,
    name: String,
    access: String,
}

impl TryFrom<UserRecord> for User {
    type Error = UnknownAccess;

    fn try_from(record: UserRecord) -> std::result::Result<Self, Self::Error> {
        Ok(Self {
            id: record.id,
            access: record.access.parse()?,
            login: record.login,
            password: record.password,
            name: record.name,
        })
    }
}

fn into_users(records: Vec<UserRecord>) -> Result<Vec<User>> {
    records
        .into_iter()
        .map(|record| Ok(User::try_from(record)?))
        .collect()
}

/// Reduce a lookup by `id` to its single row.
pub(crate) fn single_row<T>(id: i32, rows: Vec<T>) -> Result<T> {
    let actual = rows.len();
    let mut rows = rows.into_iter();

    match (rows.next(), actual) {
        (None, _) => Err(Error::NotFound { id }),
        (Some(row), 1) => Ok(row),
        _ => Err(Error::IncorrectResultSize {
            expected: 1,
            actual,
        }),
    }
}

#[async_trait]
impl UserDao for PgUserRepository {
    async fn insert(&self, user: &User) -> Result<i32> {
        let id = sqlx::query_scalar::<_, i32>(
            r#"INSERT INTO users (login, password, name, access)
                VALUES ($1, $2, $3, $4)
                RETURNING id"#,
        )
        .bind(&user.login)
        .bind(&user.password)
        .bind(&user.name)
        .bind(user.access.as_str())
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!(id, login = %user.login, "user inserted");

        Ok(id)
    }

    async fn select(&self, id: i32) -> Result<User> {
        let records = sqlx::query_as::<_, UserRecord>(&format!(
            "{SELECT_USERS} WHERE id = $1"
        ))
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        Ok(User::try_from(single_row(id, records)?)?)
    }

    async fn select_all(&self) -> Result<Vec<User>> {
        let records = sqlx::query_as::<_, UserRecord>(SELECT_USERS)
            .fetch_all(&self.pool)
            .await?;

        into_users(records)
    }

    async fn update(&self, user: &User) -> Result<u64> {
        let result = sqlx::query(
            r#"UPDATE users
                SET login = $1, password = $2, name = $3, access = $4
                WHERE id = $5"#,
        )
        .bind(&user.login)
        .bind(&user.password)
        .bind(&user.name)
        .bind(user.access.as_str())
        .bind(user.id)
        .execute(&self.pool)
        .await?;

        tracing::debug!(
            id = user.id,
            rows = result.rows_affected(),
            "user updated"
        );

        Ok(result.rows_affected())
    }

    async fn delete(&self, id: i32) -> Result<u64> {
        let result = sqlx::query(r#"DELETE FROM users WHERE id = $1"#)
            .bind(id)
            .execute(&self.pool)
            .await?;

        tracing::debug!(id, rows = result.rows_affected(), "user deleted");

        Ok(result.rows_affected())
    }

    async fn find_by_criteria(
        &self,
        criteria: &UserSearchCriteria,
    ) -> Result<Vec<User>> {
        if criteria.is_empty() {
            return self.select_all().await;
        }

        let records = criteria
            .query()
            .build_query_as::<UserRecord>()
            .fetch_all(&self.pool)
            .await?;

        into_users(records)
    }
}
