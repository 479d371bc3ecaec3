use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};

use crate::shared::DomainError;

/// Account type of a user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum UserType {
    #[default]
    Rider,
    Driver,
    Admin,
}

impl UserType {
    pub const ALL: [UserType; 3] = [UserType::Rider, UserType::Driver, UserType::Admin];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rider => "rider",
            Self::Driver => "driver",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for UserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rider" => Ok(Self::Rider),
            "driver" => Ok(Self::Driver),
            "admin" => Ok(Self::Admin),
            other => Err(DomainError::validation(
                "userType",
                format!("'{}' is not a valid user type (rider, driver, admin)", other),
            )),
        }
    }
}

/// A stored user record
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub user_type: UserType,
    pub is_active: bool,
    pub profile_completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A validated record that has not been stored yet; the store assigns the id
/// and timestamps on insert.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub user_type: UserType,
    pub is_active: bool,
    pub profile_completed: bool,
}

/// Condensed view of a user, used for log lines and client summaries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileSummary {
    pub id: String,
    pub name: String,
    pub email: String,
    pub user_type: UserType,
    pub profile_completed: bool,
}

impl User {
    pub fn profile_summary(&self) -> ProfileSummary {
        ProfileSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
            user_type: self.user_type,
            profile_completed: self.profile_completed,
        }
    }
}
