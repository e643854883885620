//! In-memory repository implementation for the domain port.
//!
//! Records live in a single table guarded by a `parking_lot::RwLock`; the
//! lock is never held across an await point. The table keeps its own email
//! index and refuses duplicate emails, mirroring a unique constraint.

use std::collections::HashMap;

use anyhow::bail;
use parking_lot::RwLock;
use uuid::Uuid;

use crate::contract::model::User;
use crate::domain::repo::UsersRepository;

#[derive(Default)]
struct UsersTable {
    rows: HashMap<Uuid, User>,
    // insertion order for stable listing
    order: Vec<Uuid>,
    emails: HashMap<String, Uuid>,
}

#[derive(Default)]
pub struct InMemoryUsersRepository {
    table: RwLock<UsersTable>,
}

impl InMemoryUsersRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl UsersRepository for InMemoryUsersRepository {
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>> {
        Ok(self.table.read().rows.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        let table = self.table.read();
        Ok(table
            .emails
            .get(email)
            .and_then(|id| table.rows.get(id))
            .cloned())
    }

    async fn list_all(&self) -> anyhow::Result<Vec<User>> {
        let table = self.table.read();
        Ok(table
            .order
            .iter()
            .filter_map(|id| table.rows.get(id))
            .cloned()
            .collect())
    }

    async fn insert(&self, u: User) -> anyhow::Result<()> {
        let mut table = self.table.write();
        if table.rows.contains_key(&u.id) {
            bail!("duplicate user id {}", u.id);
        }
        if table.emails.contains_key(&u.email) {
            bail!("unique violation on email");
        }
        table.emails.insert(u.email.clone(), u.id);
        table.order.push(u.id);
        table.rows.insert(u.id, u);
        Ok(())
    }

    async fn update(&self, u: User) -> anyhow::Result<()> {
        let mut table = self.table.write();
        let Some(old_email) = table.rows.get(&u.id).map(|row| row.email.clone()) else {
            bail!("user {} does not exist", u.id);
        };
        if table.emails.get(&u.email).is_some_and(|owner| *owner != u.id) {
            bail!("unique violation on email");
        }
        table.emails.remove(&old_email);
        table.emails.insert(u.email.clone(), u.id);
        table.rows.insert(u.id, u);
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
        let mut table = self.table.write();
        let Some(removed) = table.rows.remove(&id) else {
            return Ok(false);
        };
        table.emails.remove(&removed.email);
        table.order.retain(|other| *other != id);
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn user(email: &str) -> User {
        let now = Utc::now();
        User {
            id: Uuid::new_v4(),
            name: "Test User".into(),
            email: email.into(),
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn insert_find_and_list_in_order() {
        let repo = InMemoryUsersRepository::new();
        let a = user("a@example.com");
        let b = user("b@example.com");
        repo.insert(a.clone()).await.unwrap();
        repo.insert(b.clone()).await.unwrap();

        assert_eq!(repo.find_by_id(a.id).await.unwrap(), Some(a.clone()));
        assert_eq!(
            repo.find_by_email("b@example.com").await.unwrap(),
            Some(b.clone())
        );
        assert_eq!(repo.list_all().await.unwrap(), vec![a, b]);
    }

    #[tokio::test]
    async fn duplicate_email_is_refused() {
        let repo = InMemoryUsersRepository::new();
        repo.insert(user("dup@example.com")).await.unwrap();
        assert!(repo.insert(user("dup@example.com")).await.is_err());
        assert_eq!(repo.list_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn update_reindexes_email() {
        let repo = InMemoryUsersRepository::new();
        let mut a = user("old@example.com");
        repo.insert(a.clone()).await.unwrap();

        a.email = "new@example.com".into();
        repo.update(a.clone()).await.unwrap();

        assert!(repo.find_by_email("old@example.com").await.unwrap().is_none());
        assert_eq!(
            repo.find_by_email("new@example.com").await.unwrap().map(|u| u.id),
            Some(a.id)
        );

        // the released address is free again
        repo.insert(user("old@example.com")).await.unwrap();
    }

    #[tokio::test]
    async fn update_refuses_foreign_email_and_missing_rows() {
        let repo = InMemoryUsersRepository::new();
        let a = user("a@example.com");
        let mut b = user("b@example.com");
        repo.insert(a).await.unwrap();
        repo.insert(b.clone()).await.unwrap();

        b.email = "a@example.com".into();
        assert!(repo.update(b).await.is_err());
        assert!(repo.update(user("ghost@example.com")).await.is_err());
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let repo = InMemoryUsersRepository::new();
        let a = user("a@example.com");
        repo.insert(a.clone()).await.unwrap();

        assert!(repo.delete(a.id).await.unwrap());
        assert!(!repo.delete(a.id).await.unwrap());
        assert!(repo.find_by_id(a.id).await.unwrap().is_none());
        assert!(repo.find_by_email("a@example.com").await.unwrap().is_none());
        assert!(repo.list_all().await.unwrap().is_empty());
    }
}
