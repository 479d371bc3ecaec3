use super::{User, UserType};

/// Composable user filter; every supplied criterion must hold.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserFilter {
    /// Case-insensitive literal substring of `name` OR `email`.
    pub search: Option<String>,
    pub user_type: Option<UserType>,
    pub is_active: Option<bool>,
}

impl UserFilter {
    pub fn matches(&self, user: &User) -> bool {
        if let Some(ref search) = self.search {
            let needle = search.to_lowercase();
            if !user.name.to_lowercase().contains(&needle)
                && !user.email.to_lowercase().contains(&needle)
            {
                return false;
            }
        }
        if let Some(user_type) = self.user_type {
            if user.user_type != user_type {
                return false;
            }
        }
        if let Some(is_active) = self.is_active {
            if user.is_active != is_active {
                return false;
            }
        }
        true
    }
}

/// Result ordering by creation time
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UserSort {
    #[default]
    NewestFirst,
    OldestFirst,
}

/// A filtered, sorted, paged query against the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FindUsers {
    pub filter: UserFilter,
    pub sort: UserSort,
    pub limit: u64,
    pub skip: u64,
}

/// One page of matches plus the unpaged match count.
#[derive(Debug, Clone)]
pub struct FoundUsers {
    pub users: Vec<User>,
    pub total: u64,
}
