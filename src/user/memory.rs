//! In-memory user repository.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use crate::error::{Error, Result};
use crate::user::repository::single_row;
use crate::user::{User, UserDao, UserSearchCriteria};

#[derive(Debug, Default)]
struct Table {
    rows: BTreeMap<i32, User>,
    sequence: i32,
}

impl Table {
    fn login_taken(&self, login: &str, except: Option<i32>) -> bool {
        self.rows
            .values()
            .any(|user| user.login == login && Some(user.id) != except)
    }
}

/// [`UserDao`] backed by an ordered map. Ids start at 1 and are never
/// reused, like a `SERIAL` column.
#[derive(Debug, Default)]
pub struct MemoryUserRepository {
    table: Mutex<Table>,
}

impl MemoryUserRepository {
    /// Create an empty [`MemoryUserRepository`].
    pub fn new() -> Self {
        Self::default()
    }

    fn table(&self) -> MutexGuard<'_, Table> {
        self.table.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl UserDao for MemoryUserRepository {
    async fn insert(&self, user: &User) -> Result<i32> {
        let mut table = self.table();
        if table.login_taken(&user.login, None) {
            return Err(Error::UniqueViolation { column: "login" });
        }

        table.sequence += 1;
        let id = table.sequence;
        table.rows.insert(id, User { id, ..user.clone() });

        Ok(id)
    }

    async fn select(&self, id: i32) -> Result<User> {
        let rows = self.table().rows.get(&id).cloned().into_iter().collect();
        single_row(id, rows)
    }

    async fn select_all(&self) -> Result<Vec<User>> {
        Ok(self.table().rows.values().cloned().collect())
    }

    async fn update(&self, user: &User) -> Result<u64> {
        let mut table = self.table();
        if !table.rows.contains_key(&user.id) {
            return Ok(0);
        }
        if table.login_taken(&user.login, Some(user.id)) {
            return Err(Error::UniqueViolation { column: "login" });
        }

        table.rows.insert(user.id, user.clone());
        Ok(1)
    }

    async fn delete(&self, id: i32) -> Result<u64> {
        Ok(self.table().rows.remove(&id).map_or(0, |_| 1))
    }

    async fn find_by_criteria(
        &self,
        criteria: &UserSearchCriteria,
    ) -> Result<Vec<User>> {
        if criteria.is_empty() {
            return self.select_all().await;
        }

        Ok(self
            .table()
            .rows
            .values()
            .filter(|user| criteria.matches(user))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::user::Access;

    async fn seeded() -> MemoryUserRepository {
        let repository = MemoryUserRepository::new();
        for user in [
            User::new("alice", "wonderland", "Alice A", Access::Admin),
            User::new("bob", "pw1", "Bob B", Access::User),
            User::new("carol", "hunter2", "Carol C", Access::User),
        ] {
            repository.insert(&user).await.unwrap();
        }
        repository
    }

    #[tokio::test]
    async fn test_insert_then_select() {
        let repository = MemoryUserRepository::new();
        let user = User::new("bob", "pw1", "Bob B", Access::User);

        let id = repository.insert(&user).await.unwrap();
        assert_eq!(id, 1);
        assert_eq!(repository.select(id).await.unwrap(), User { id, ..user });
    }

    #[tokio::test]
    async fn test_ids_are_not_reused() {
        let repository = seeded().await;
        repository.delete(3).await.unwrap();

        let id = repository
            .insert(&User::new("dave", "pw", "Dave D", Access::User))
            .await
            .unwrap();
        assert_eq!(id, 4);
    }

    #[tokio::test]
    async fn test_duplicate_login() {
        let repository = seeded().await;

        let err = repository
            .insert(&User::new("bob", "pw", "Other Bob", Access::User))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DataAccess);

        let mut carol = repository.select(3).await.unwrap();
        carol.login = "alice".into();
        let err = repository.update(&carol).await.unwrap_err();
        assert!(err.is_unique_violation());
    }

    #[tokio::test]
    async fn test_select_unknown_id() {
        let repository = seeded().await;
        assert_eq!(
            repository.select(42).await.unwrap_err().kind(),
            ErrorKind::NotFound
        );
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let repository = seeded().await;

        let mut bob = repository.select(2).await.unwrap();
        bob.name = "Robert B".into();
        bob.access = Access::Admin;
        assert_eq!(repository.update(&bob).await.unwrap(), 1);
        assert_eq!(repository.select(2).await.unwrap(), bob);

        let ghost = User {
            id: 42,
            ..User::new("ghost", "pw", "Ghost", Access::User)
        };
        assert_eq!(repository.update(&ghost).await.unwrap(), 0);
        assert_eq!(repository.select_all().await.unwrap().len(), 3);

        assert_eq!(repository.delete(2).await.unwrap(), 1);
        assert_eq!(repository.delete(2).await.unwrap(), 0);
        assert_eq!(
            repository.select(2).await.unwrap_err().kind(),
            ErrorKind::NotFound
        );
    }

    #[tokio::test]
    async fn test_find_by_criteria() {
        let repository = seeded().await;

        assert_eq!(
            repository
                .find_by_criteria(&UserSearchCriteria::new())
                .await
                .unwrap(),
            repository.select_all().await.unwrap()
        );

        let found = repository
            .find_by_criteria(&UserSearchCriteria::new().login("alice"))
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].login, "alice");

        let found = repository
            .find_by_criteria(&UserSearchCriteria::new().access(Access::User))
            .await
            .unwrap();
        let logins: Vec<_> = found.iter().map(|u| u.login.as_str()).collect();
        assert_eq!(logins, ["bob", "carol"]);
    }

    #[tokio::test]
    async fn test_as_trait_object() {
        let repository: Box<dyn UserDao> = Box::new(seeded().await);
        assert_eq!(repository.select_all().await.unwrap().len(), 3);
    }
}
