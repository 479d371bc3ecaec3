//! In-memory user store

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use uuid::Uuid;

use crate::domain::{
    DomainError, DomainResult, FindUsers, FoundUsers, NewUser, User, UserSort, UserStore,
};

struct StoredUser {
    /// Insertion order, breaks ties between equal `created_at` values.
    seq: u64,
    user: User,
}

/// In-memory user store for development and testing.
///
/// Email uniqueness is enforced atomically through the email index, so it
/// behaves like a database unique constraint under concurrent inserts.
pub struct InMemoryUserStore {
    users: DashMap<String, StoredUser>,
    emails: DashMap<String, String>,
    sequence: AtomicU64,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self {
            users: DashMap::new(),
            emails: DashMap::new(),
            sequence: AtomicU64::new(0),
        }
    }

    /// Inserts a record with an explicit creation time (fixtures, imports).
    pub fn seed(&self, user: NewUser, created_at: DateTime<Utc>) -> DomainResult<User> {
        self.insert_at(user, created_at)
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    fn insert_at(&self, new_user: NewUser, at: DateTime<Utc>) -> DomainResult<User> {
        match self.emails.entry(new_user.email.clone()) {
            Entry::Occupied(_) => Err(DomainError::Conflict {
                field: "email",
                value: new_user.email,
            }),
            Entry::Vacant(slot) => {
                let user = User {
                    id: Uuid::now_v7().to_string(),
                    name: new_user.name,
                    email: new_user.email,
                    phone: new_user.phone,
                    user_type: new_user.user_type,
                    is_active: new_user.is_active,
                    profile_completed: new_user.profile_completed,
                    created_at: at,
                    updated_at: at,
                };
                let seq = self.sequence.fetch_add(1, Ordering::SeqCst);
                self.users.insert(
                    user.id.clone(),
                    StoredUser {
                        seq,
                        user: user.clone(),
                    },
                );
                slot.insert(user.id.clone());
                Ok(user)
            }
        }
    }
}

impl Default for InMemoryUserStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn insert(&self, user: NewUser) -> DomainResult<User> {
        self.insert_at(user, Utc::now())
    }

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>> {
        let Some(id) = self.emails.get(email) else {
            return Ok(None);
        };
        Ok(self.users.get(id.value()).map(|s| s.user.clone()))
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<User>> {
        Uuid::parse_str(id).map_err(|_| DomainError::InvalidIdentifier(id.to_string()))?;
        Ok(self.users.get(id).map(|s| s.user.clone()))
    }

    async fn find(&self, query: FindUsers) -> DomainResult<FoundUsers> {
        let mut matches: Vec<(u64, User)> = self
            .users
            .iter()
            .filter(|entry| query.filter.matches(&entry.user))
            .map(|entry| (entry.seq, entry.user.clone()))
            .collect();

        matches.sort_by(|(a_seq, a), (b_seq, b)| {
            let oldest_first = a.created_at.cmp(&b.created_at).then(a_seq.cmp(b_seq));
            match query.sort {
                UserSort::OldestFirst => oldest_first,
                UserSort::NewestFirst => oldest_first.reverse(),
            }
        });

        let total = matches.len() as u64;
        let skip = usize::try_from(query.skip).unwrap_or(usize::MAX);
        let limit = usize::try_from(query.limit).unwrap_or(usize::MAX);
        let users = matches
            .into_iter()
            .skip(skip)
            .take(limit)
            .map(|(_, user)| user)
            .collect();

        Ok(FoundUsers { users, total })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    use crate::domain::{UserFilter, UserType};

    fn new_user(name: &str, email: &str, user_type: UserType) -> NewUser {
        NewUser {
            name: name.into(),
            email: email.into(),
            phone: None,
            user_type,
            is_active: true,
            profile_completed: false,
        }
    }

    fn query(filter: UserFilter, sort: UserSort, limit: u64, skip: u64) -> FindUsers {
        FindUsers {
            filter,
            sort,
            limit,
            skip,
        }
    }

    #[tokio::test]
    async fn insert_assigns_id_and_equal_timestamps() {
        let store = InMemoryUserStore::new();
        let user = store
            .insert(new_user("Ana", "ana@ex.com", UserType::Rider))
            .await
            .unwrap();

        assert!(Uuid::parse_str(&user.id).is_ok());
        assert_eq!(user.created_at, user.updated_at);
        assert_eq!(store.find_by_id(&user.id).await.unwrap(), Some(user.clone()));
        assert_eq!(store.find_by_email("ana@ex.com").await.unwrap(), Some(user));
    }

    #[tokio::test]
    async fn duplicate_email_is_a_conflict() {
        let store = InMemoryUserStore::new();
        store
            .insert(new_user("Ana", "ana@ex.com", UserType::Rider))
            .await
            .unwrap();

        let err = store
            .insert(new_user("Other", "ana@ex.com", UserType::Driver))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict { field: "email", .. }));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn malformed_id_is_rejected() {
        let store = InMemoryUserStore::new();
        let err = store.find_by_id("42").await.unwrap_err();
        assert!(matches!(err, DomainError::InvalidIdentifier(_)));
        assert_eq!(
            store.find_by_id(&Uuid::now_v7().to_string()).await.unwrap(),
            None
        );
    }

    #[tokio::test]
    async fn find_sorts_and_pages_with_total() {
        let store = InMemoryUserStore::new();
        let base = Utc::now();
        for i in 0..5 {
            store
                .seed(
                    new_user(&format!("U{i}"), &format!("u{i}@ex.com"), UserType::Rider),
                    base + Duration::seconds(i),
                )
                .unwrap();
        }

        let newest = store
            .find(query(UserFilter::default(), UserSort::NewestFirst, 2, 1))
            .await
            .unwrap();
        let names: Vec<_> = newest.users.iter().map(|u| u.name.as_str()).collect();
        assert_eq!(names, ["U3", "U2"]);
        assert_eq!(newest.total, 5);

        let oldest = store
            .find(query(UserFilter::default(), UserSort::OldestFirst, 10, 3))
            .await
            .unwrap();
        let names: Vec<_> = oldest.users.iter().map(|u| u.name.as_str()).collect();
        assert_eq!(names, ["U3", "U4"]);
    }

    #[tokio::test]
    async fn equal_timestamps_keep_insertion_order() {
        let store = InMemoryUserStore::new();
        let at = Utc::now();
        for name in ["First", "Second", "Third"] {
            store
                .seed(
                    new_user(name, &format!("{}@ex.com", name.to_lowercase()), UserType::Rider),
                    at,
                )
                .unwrap();
        }

        let found = store
            .find(query(UserFilter::default(), UserSort::NewestFirst, 10, 0))
            .await
            .unwrap();
        let names: Vec<_> = found.users.iter().map(|u| u.name.as_str()).collect();
        assert_eq!(names, ["Third", "Second", "First"]);
    }

    #[tokio::test]
    async fn find_applies_every_filter() {
        let store = InMemoryUserStore::new();
        store
            .insert(new_user("Ana", "ana@ex.com", UserType::Driver))
            .await
            .unwrap();
        store
            .insert(new_user("Bob", "bob@ex.com", UserType::Driver))
            .await
            .unwrap();
        store
            .insert(new_user("Hana", "h@ex.com", UserType::Admin))
            .await
            .unwrap();

        let filter = UserFilter {
            search: Some("ANA".into()),
            user_type: Some(UserType::Driver),
            is_active: Some(true),
        };
        let found = store
            .find(query(filter, UserSort::NewestFirst, 10, 0))
            .await
            .unwrap();
        assert_eq!(found.total, 1);
        assert_eq!(found.users[0].name, "Ana");
    }

    #[tokio::test]
    async fn skip_past_end_returns_empty_page_with_total() {
        let store = InMemoryUserStore::new();
        store
            .insert(new_user("Ana", "ana@ex.com", UserType::Rider))
            .await
            .unwrap();

        let found = store
            .find(query(UserFilter::default(), UserSort::NewestFirst, 10, 10))
            .await
            .unwrap();
        assert!(found.users.is_empty());
        assert_eq!(found.total, 1);
    }
}
