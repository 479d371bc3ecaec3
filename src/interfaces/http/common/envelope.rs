//! Response envelope shared by every user operation
//!
//! Success: `{"success": true, "data": ..., "type": "users_list", ...}`;
//! failure: `{"success": false, "error": "..."}`.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::shared::PaginatedResult;

/// Tags the payload shape of a successful response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ResponseKind {
    UsersList,
    UserCreated,
    LoginSuccess,
    UserDetails,
}

/// Paging metadata attached to `getAll` responses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    /// Current page (1-based)
    pub current: u64,
    pub total_pages: u64,
    /// Number of users matching the filter across all pages
    pub total_users: u64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl<T> From<&PaginatedResult<T>> for PaginationMeta {
    fn from(page: &PaginatedResult<T>) -> Self {
        Self {
            current: page.page,
            total_pages: page.total_pages,
            total_users: page.total,
            has_next: page.has_next(),
            has_prev: page.has_prev(),
        }
    }
}

/// Uniform response wrapper
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PaginationMeta>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<ResponseKind>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T, kind: ResponseKind) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            message: None,
            pagination: None,
            kind: Some(kind),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
            message: None,
            pagination: None,
            kind: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_pagination(mut self, pagination: PaginationMeta) -> Self {
        self.pagination = Some(pagination);
        self
    }
}

/// Placeholder payload for error envelopes
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct EmptyData {}
