//! Typed user operations
//!
//! Every request names exactly one [`Action`]. Unknown tags are kept as
//! [`Action::Unsupported`] so the dispatcher can answer them explicitly.

/// Action tags accepted by the dispatcher, in the order they are advertised.
pub const ACTION_NAMES: [&str; 4] = ["getAll", "create", "login", "getById"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    GetAll(ListUsersInput),
    Create(CreateUserInput),
    Login(LoginInput),
    GetById(GetUserInput),
    /// The tag as received, or `None` if the request carried none.
    Unsupported(Option<String>),
}

impl Action {
    /// Stable label for logs and metrics.
    pub fn name(&self) -> &'static str {
        match self {
            Self::GetAll(_) => "getAll",
            Self::Create(_) => "create",
            Self::Login(_) => "login",
            Self::GetById(_) => "getById",
            Self::Unsupported(_) => "unsupported",
        }
    }
}

/// `getAll` parameters. Defaults are applied by the dispatcher.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListUsersInput {
    pub search: Option<String>,
    pub user_type: Option<String>,
    pub is_active: Option<bool>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateUserInput {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub user_type: Option<String>,
}

#[derive(Clone, Default, PartialEq, Eq)]
pub struct LoginInput {
    pub email: Option<String>,
    pub password: Option<String>,
}

impl std::fmt::Debug for LoginInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginInput")
            .field("email", &self.email)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetUserInput {
    pub user_id: Option<String>,
}
