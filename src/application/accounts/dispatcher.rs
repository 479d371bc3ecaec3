//! User operation dispatcher: application-layer orchestration
//!
//! All branching for the multiplexed user endpoint lives here. HTTP handlers
//! only translate the wire envelope into an [`Action`] and the result back.

use std::sync::Arc;
use std::time::Instant;

use tracing::{error, info, warn};

use super::action::{Action, CreateUserInput, GetUserInput, ListUsersInput, LoginInput};
use super::error::OperationError;
use crate::domain::{
    normalize_email, DomainError, FindUsers, User, UserCandidate, UserFilter, UserSort, UserStore,
    UserType,
};
use crate::shared::PaginatedResult;

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_PAGE_LIMIT: i64 = 10;

/// Successful result of one action.
#[derive(Debug, Clone)]
pub enum Outcome {
    UsersList(PaginatedResult<User>),
    UserCreated(User),
    LoginSuccess(User),
    UserDetails(User),
}

/// Dispatches user operations against an injected store.
///
/// Holds no per-request state; one instance serves all concurrent requests.
pub struct UserDispatcher {
    store: Arc<dyn UserStore>,
}

impl UserDispatcher {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }

    /// Runs one action to completion. Store failures are not retried.
    pub async fn dispatch(&self, action: Action) -> Result<Outcome, OperationError> {
        let name = action.name();
        let started = Instant::now();
        info!(action = name, "User operation requested");

        let result = match action {
            Action::GetAll(input) => self.list_users(input).await,
            Action::Create(input) => self.create_user(input).await,
            Action::Login(input) => self.login(input).await,
            Action::GetById(input) => self.get_user(input).await,
            Action::Unsupported(tag) => {
                warn!(action = ?tag, "Invalid action requested");
                Err(OperationError::InvalidAction(tag))
            }
        };

        let outcome = match &result {
            Ok(_) => "success",
            Err(e) if e.is_client_error() => "rejected",
            Err(e) => {
                error!(action = name, error = %e, "User operation failed");
                "error"
            }
        };
        metrics::counter!("user_operations_total", "action" => name, "outcome" => outcome)
            .increment(1);
        metrics::histogram!("user_operation_duration_seconds", "action" => name)
            .record(started.elapsed().as_secs_f64());

        result
    }

    // ── getAll ──────────────────────────────────────────────────

    async fn list_users(&self, input: ListUsersInput) -> Result<Outcome, OperationError> {
        let page = positive("page", input.page.unwrap_or(DEFAULT_PAGE))?;
        let limit = positive("limit", input.limit.unwrap_or(DEFAULT_PAGE_LIMIT))?;
        // Stores bind OFFSET as a signed 64-bit integer
        let skip = (page - 1)
            .checked_mul(limit)
            .filter(|skip| i64::try_from(*skip).is_ok())
            .ok_or_else(|| OperationError::Validation("page is out of range".into()))?;

        let user_type = present(input.user_type)
            .map(|raw| raw.parse::<UserType>())
            .transpose()?;
        let filter = UserFilter {
            search: present(input.search),
            user_type,
            is_active: input.is_active,
        };

        info!(?filter, page, limit, "Listing users");
        let found = self
            .store
            .find(FindUsers {
                filter,
                sort: UserSort::NewestFirst,
                limit,
                skip,
            })
            .await?;

        info!(count = found.users.len(), total = found.total, "Users found");
        Ok(Outcome::UsersList(PaginatedResult::new(
            found.users,
            found.total,
            page,
            limit,
        )))
    }

    // ── create ──────────────────────────────────────────────────

    async fn create_user(&self, input: CreateUserInput) -> Result<Outcome, OperationError> {
        let (Some(name), Some(email)) = (present(input.name), present(input.email)) else {
            return Err(OperationError::MissingField("Name and email are required"));
        };

        // Pre-check only; two concurrent creates can both pass it, and the
        // store's unique index decides which one wins.
        if self
            .store
            .find_by_email(&normalize_email(&email))
            .await?
            .is_some()
        {
            warn!(email = %email, "User with this email already exists");
            return Err(OperationError::DuplicateEmail);
        }

        let candidate = UserCandidate {
            name,
            email,
            phone: input.phone,
            user_type: present(input.user_type),
        };
        let new_user = self.store.validate(candidate)?;

        match self.store.insert(new_user).await {
            Ok(user) => {
                info!(profile = ?user.profile_summary(), "User created");
                Ok(Outcome::UserCreated(user))
            }
            Err(DomainError::Conflict { field: "email", value }) => {
                warn!(email = %value, "Email was taken between pre-check and insert");
                Err(OperationError::DuplicateEmail)
            }
            Err(e) => Err(e.into()),
        }
    }

    // ── login ───────────────────────────────────────────────────

    /// Looks the user up by email.
    ///
    /// **The password is never checked**: any non-empty password is accepted
    /// for an existing email. This keeps compatibility with existing clients
    /// and must not be relied on as authentication.
    async fn login(&self, input: LoginInput) -> Result<Outcome, OperationError> {
        let (Some(email), Some(_password)) = (present(input.email), present(input.password))
        else {
            return Err(OperationError::MissingField("Email and password are required"));
        };

        let Some(user) = self.store.find_by_email(&normalize_email(&email)).await? else {
            warn!(email = %email, "Login failed: user not found");
            return Err(OperationError::Authentication);
        };

        info!(profile = ?user.profile_summary(), "Login successful (password not verified)");
        Ok(Outcome::LoginSuccess(user))
    }

    // ── getById ─────────────────────────────────────────────────

    async fn get_user(&self, input: GetUserInput) -> Result<Outcome, OperationError> {
        let Some(user_id) = present(input.user_id) else {
            return Err(OperationError::NotFound);
        };
        info!(user_id = %user_id, "Getting user by id");

        match self.store.find_by_id(&user_id).await {
            Ok(Some(user)) => Ok(Outcome::UserDetails(user)),
            Ok(None) | Err(DomainError::InvalidIdentifier(_)) => Err(OperationError::NotFound),
            Err(e) => Err(e.into()),
        }
    }
}

/// Empty strings count as absent.
fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn positive(field: &str, value: i64) -> Result<u64, OperationError> {
    u64::try_from(value)
        .ok()
        .filter(|v| *v >= 1)
        .ok_or_else(|| OperationError::Validation(format!("{} must be a positive integer", field)))
}
