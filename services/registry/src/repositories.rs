//! In-memory user repository

use std::sync::Arc;

use common::config::IdStrategy;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::models::{NewUser, User};

/// Records in insertion order plus the next id for [`IdStrategy::Monotonic`]
#[derive(Debug)]
struct UserStore {
    users: Vec<User>,
    next_id: i64,
}

impl UserStore {
    fn assign_id(&mut self, strategy: IdStrategy) -> i64 {
        match strategy {
            IdStrategy::Monotonic => {
                let id = self.next_id;
                self.next_id += 1;
                id
            }
            IdStrategy::CollectionSize => self.users.len() as i64 + 1,
        }
    }

    fn position(&self, id: i64) -> Option<usize> {
        self.users.iter().position(|u| u.id == id)
    }
}

/// User repository
///
/// Clones share the same store. Every read and write takes the one store
/// lock for the duration of the in-memory operation only.
#[derive(Debug, Clone)]
pub struct UserRepository {
    id_strategy: IdStrategy,
    store: Arc<Mutex<UserStore>>,
}

impl Default for UserRepository {
    fn default() -> Self {
        Self::new(IdStrategy::default())
    }
}

impl UserRepository {
    /// Create an empty repository
    pub fn new(id_strategy: IdStrategy) -> Self {
        Self {
            id_strategy,
            store: Arc::new(Mutex::new(UserStore {
                users: Vec::new(),
                next_id: 1,
            })),
        }
    }

    /// Get all users in insertion order
    pub async fn get_all(&self) -> Vec<User> {
        self.store.lock().await.users.clone()
    }

    /// Number of stored users
    pub async fn len(&self) -> usize {
        self.store.lock().await.users.len()
    }

    /// Whether the repository holds no users
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Find a user by ID
    pub async fn find_by_id(&self, id: i64) -> Option<User> {
        let store = self.store.lock().await;
        let user = store.users.iter().find(|u| u.id == id).cloned();
        if user.is_none() {
            debug!("User {} not found", id);
        }
        user
    }

    /// Create a new user and return the stored record
    pub async fn create(&self, new_user: NewUser) -> User {
        let mut store = self.store.lock().await;
        let id = store.assign_id(self.id_strategy);
        let user = User::from_new(id, new_user);
        store.users.push(user.clone());
        info!("Created user {} ({})", user.id, user.username);
        user
    }

    /// Replace the mutable fields of an existing user
    ///
    /// Returns the updated record, or `None` if no user has this id.
    pub async fn update(&self, id: i64, new_user: NewUser) -> Option<User> {
        let mut store = self.store.lock().await;
        let Some(index) = store.position(id) else {
            debug!("Update of unknown user {}", id);
            return None;
        };

        let user = &mut store.users[index];
        user.replace_fields(new_user);
        info!("Updated user {}", id);
        Some(user.clone())
    }

    /// Delete a user by ID
    pub async fn delete(&self, id: i64) -> bool {
        let mut store = self.store.lock().await;
        match store.position(id) {
            Some(index) => {
                store.users.remove(index);
                info!("Deleted user {}", id);
                true
            }
            None => {
                debug!("Delete of unknown user {}", id);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(username: &str) -> NewUser {
        NewUser {
            username: username.to_string(),
            email: format!("{username}@example.com"),
            name: username.to_uppercase(),
        }
    }

    #[tokio::test]
    async fn test_create_then_find_returns_same_fields() {
        let repo = UserRepository::default();
        let created = repo.create(new_user("ann01")).await;

        assert_eq!(created.id, 1);
        let found = repo.find_by_id(created.id).await.expect("user exists");
        assert_eq!(found, created);
        assert_eq!(found.username, "ann01");
        assert_eq!(found.email, "ann01@example.com");
        assert_eq!(found.name, "ANN01");
    }

    #[tokio::test]
    async fn test_get_all_preserves_insertion_order() {
        let repo = UserRepository::default();
        assert!(repo.is_empty().await);
        for name in ["carol", "alice", "bob"] {
            repo.create(new_user(name)).await;
        }

        let names: Vec<String> = repo.get_all().await.into_iter().map(|u| u.username).collect();
        assert_eq!(names, vec!["carol", "alice", "bob"]);
    }

    #[tokio::test]
    async fn test_update_replaces_fields_but_keeps_id() {
        let repo = UserRepository::default();
        let created = repo.create(new_user("ann01")).await;

        let updated = repo
            .update(created.id, new_user("annie"))
            .await
            .expect("user exists");
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.username, "annie");
        assert_eq!(repo.find_by_id(created.id).await, Some(updated));
    }

    #[tokio::test]
    async fn test_unknown_ids_are_not_found() {
        let repo = UserRepository::default();
        repo.create(new_user("ann01")).await;

        for id in [99, 0, -1] {
            assert!(repo.find_by_id(id).await.is_none());
            assert!(repo.update(id, new_user("annie")).await.is_none());
            assert!(!repo.delete(id).await);
        }
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn test_delete_then_find_is_not_found() {
        let repo = UserRepository::default();
        let created = repo.create(new_user("ann01")).await;

        assert!(repo.delete(created.id).await);
        assert!(repo.find_by_id(created.id).await.is_none());
        assert!(!repo.delete(created.id).await);
    }

    #[tokio::test]
    async fn test_monotonic_ids_are_not_reused_after_delete() {
        let repo = UserRepository::new(IdStrategy::Monotonic);
        let first = repo.create(new_user("ann01")).await;
        let second = repo.create(new_user("bob02")).await;
        assert_eq!((first.id, second.id), (1, 2));

        repo.delete(first.id).await;
        let third = repo.create(new_user("cat03")).await;
        assert_eq!(third.id, 3);
    }

    #[tokio::test]
    async fn test_collection_size_ids_collide_after_delete() {
        let repo = UserRepository::new(IdStrategy::CollectionSize);
        let first = repo.create(new_user("ann01")).await;
        let second = repo.create(new_user("bob02")).await;
        assert_eq!((first.id, second.id), (1, 2));

        repo.delete(first.id).await;
        let third = repo.create(new_user("cat03")).await;
        // count is 1 after the delete, so the new record reuses id 2
        assert_eq!(third.id, 2);
        assert_eq!(repo.len().await, 2);
    }

    #[tokio::test]
    async fn test_concurrent_creates_get_distinct_ids() {
        let repo = UserRepository::default();
        let handles: Vec<_> = (0..32)
            .map(|i| {
                let repo = repo.clone();
                tokio::spawn(async move { repo.create(new_user(&format!("user{i:02}"))).await.id })
            })
            .collect();

        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.expect("task completed"));
        }
        ids.sort_unstable();
        assert_eq!(ids, (1..=32).collect::<Vec<i64>>());
    }
}
