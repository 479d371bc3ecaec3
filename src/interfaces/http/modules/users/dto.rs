//! User operation DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::accounts::{
    Action, CreateUserInput, GetUserInput, ListUsersInput, LoginInput,
};
use crate::application::Outcome;
use crate::domain::User;
use crate::interfaces::http::common::{ApiResponse, PaginationMeta, ResponseKind};

/// User API representation
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// rider, driver or admin
    pub user_type: String,
    pub is_active: bool,
    pub profile_completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserDto {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            name: u.name,
            email: u.email,
            phone: u.phone,
            user_type: u.user_type.as_str().to_string(),
            is_active: u.is_active,
            profile_completed: u.profile_completed,
            created_at: u.created_at,
            updated_at: u.updated_at,
        }
    }
}

/// Nested `data` object of the request; which fields matter depends on the action.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OperationPayload {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    /// rider (default), driver or admin
    pub user_type: Option<String>,
    pub password: Option<String>,
}

/// Request envelope shared by every action
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OperationRequest {
    /// One of `getAll`, `create`, `login`, `getById`
    pub action: Option<String>,
    /// Record fields for `create` and credentials for `login`
    pub data: Option<OperationPayload>,
    /// Target of `getById`
    pub user_id: Option<String>,
    /// Page number for `getAll` (1-based). Default: 1
    pub page: Option<i64>,
    /// Page size for `getAll`. Default: 10
    pub limit: Option<i64>,
    /// Case-insensitive substring of name or email
    pub search: Option<String>,
    /// `getAll` filter on user type
    pub user_type: Option<String>,
    /// `getAll` filter on the active flag
    pub is_active: Option<bool>,
}

impl From<OperationRequest> for Action {
    fn from(req: OperationRequest) -> Self {
        let OperationRequest {
            action,
            data,
            user_id,
            page,
            limit,
            search,
            user_type,
            is_active,
        } = req;
        let data = data.unwrap_or_default();

        match action.as_deref() {
            Some("getAll") => Action::GetAll(ListUsersInput {
                search,
                user_type,
                is_active,
                page,
                limit,
            }),
            Some("create") => Action::Create(CreateUserInput {
                name: data.name,
                email: data.email,
                phone: data.phone,
                user_type: data.user_type,
            }),
            Some("login") => Action::Login(LoginInput {
                email: data.email,
                password: data.password,
            }),
            Some("getById") => Action::GetById(GetUserInput { user_id }),
            _ => Action::Unsupported(action.clone()),
        }
    }
}

/// Payload of a successful response: a page of users or a single user.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum OperationData {
    Users(Vec<UserDto>),
    User(UserDto),
}

impl From<Outcome> for ApiResponse<OperationData> {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::UsersList(page) => {
                let pagination = PaginationMeta::from(&page);
                let users = page.items.into_iter().map(UserDto::from).collect();
                ApiResponse::success(OperationData::Users(users), ResponseKind::UsersList)
                    .with_pagination(pagination)
            }
            Outcome::UserCreated(user) => ApiResponse::success(
                OperationData::User(user.into()),
                ResponseKind::UserCreated,
            )
            .with_message("User created successfully"),
            Outcome::LoginSuccess(user) => ApiResponse::success(
                OperationData::User(user.into()),
                ResponseKind::LoginSuccess,
            )
            .with_message("Login successful"),
            Outcome::UserDetails(user) => {
                ApiResponse::success(OperationData::User(user.into()), ResponseKind::UserDetails)
            }
        }
    }
}
