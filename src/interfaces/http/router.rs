//! API Router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::application::UserDispatcher;
use crate::domain::UserStore;
use crate::interfaces::http::common::{ApiResponse, EmptyData, PaginationMeta, ResponseKind};

use super::modules::metrics::{http_metrics_middleware, prometheus_metrics, MetricsState};
use super::modules::request_id::request_id_middleware;
use super::modules::{health, users};

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        users::user_operations,
    ),
    components(
        schemas(
            ApiResponse<users::OperationData>,
            ApiResponse<EmptyData>,
            PaginationMeta,
            ResponseKind,
            users::OperationRequest,
            users::OperationPayload,
            users::OperationData,
            users::UserDto,
            health::HealthResponse,
            health::ComponentHealth,
        )
    ),
    tags(
        (name = "Health", description = "Service health check"),
        (name = "Users", description = "Multiplexed user operations: getAll, create, login, getById"),
    ),
    info(
        title = "SafeDrive Accounts API",
        version = "1.0.0",
        description = "User account service behind a single action-tagged endpoint",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes
pub fn create_api_router(store: Arc<dyn UserStore>, metrics_handle: PrometheusHandle) -> Router {
    let user_state = users::UserHandlerState {
        dispatcher: Arc::new(UserDispatcher::new(store.clone())),
    };
    let health_state = health::HealthState {
        store,
        started_at: Arc::new(Instant::now()),
    };

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let user_routes = Router::new()
        .route("/operations", post(users::user_operations))
        .with_state(user_state);

    let health_routes = Router::new()
        .route("/health", get(health::health_check))
        .with_state(health_state);

    let metrics_routes = Router::new()
        .route("/metrics", get(prometheus_metrics))
        .with_state(MetricsState {
            handle: metrics_handle,
        });

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    Router::new()
        .merge(swagger_routes)
        .merge(health_routes)
        .merge(metrics_routes)
        .nest("/api/users", user_routes)
        // Middleware
        .layer(middleware::from_fn(http_metrics_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use chrono::{Duration, Utc};
    use metrics_exporter_prometheus::PrometheusBuilder;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::domain::{
        DomainError, DomainResult, FindUsers, FoundUsers, NewUser, User, UserType,
    };
    use crate::infrastructure::InMemoryUserStore;

    fn handle() -> PrometheusHandle {
        PrometheusBuilder::new().build_recorder().handle()
    }

    fn app_with(store: Arc<dyn UserStore>) -> Router {
        create_api_router(store, handle())
    }

    fn app() -> Router {
        app_with(Arc::new(InMemoryUserStore::new()))
    }

    async fn post_json(app: Router, body: Value) -> (StatusCode, Value) {
        let req = Request::builder()
            .method("POST")
            .uri("/api/users/operations")
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn new_user(name: &str, email: &str) -> NewUser {
        NewUser {
            name: name.into(),
            email: email.into(),
            phone: None,
            user_type: UserType::Rider,
            is_active: true,
            profile_completed: false,
        }
    }

    #[tokio::test]
    async fn create_then_duplicate_in_other_case() {
        let app = app();
        let (status, body) = post_json(
            app.clone(),
            json!({"action": "create", "data": {"name": "Al", "email": "AL@EX.com"}}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["type"], "user_created");
        assert_eq!(body["message"], "User created successfully");
        assert_eq!(body["data"]["email"], "al@ex.com");
        assert_eq!(body["data"]["userType"], "rider");
        assert_eq!(body["data"]["isActive"], true);
        assert_eq!(body["data"]["profileCompleted"], false);
        assert_eq!(body["data"]["createdAt"], body["data"]["updatedAt"]);

        let (status, body) = post_json(
            app,
            json!({"action": "create", "data": {"name": "Al2", "email": "al@ex.com"}}),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(
            body,
            json!({"success": false, "error": "User with this email already exists"})
        );
    }

    #[tokio::test]
    async fn create_missing_fields_is_400() {
        let (status, body) =
            post_json(app(), json!({"action": "create", "data": {"name": "Al"}})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Name and email are required");
    }

    #[tokio::test]
    async fn create_with_bad_email_is_400() {
        let (status, body) = post_json(
            app(),
            json!({"action": "create", "data": {"name": "Al", "email": "nope"}}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body["error"],
            "User validation failed: email: Please enter a valid email"
        );
    }

    #[tokio::test]
    async fn get_all_on_empty_store() {
        let (status, body) = post_json(app(), json!({"action": "getAll"})).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({
                "success": true,
                "data": [],
                "pagination": {
                    "current": 1,
                    "totalPages": 0,
                    "totalUsers": 0,
                    "hasNext": false,
                    "hasPrev": false
                },
                "type": "users_list"
            })
        );
    }

    #[tokio::test]
    async fn get_all_second_page_of_25() {
        let store = Arc::new(InMemoryUserStore::new());
        let base = Utc::now();
        for i in 1..=25 {
            store
                .seed(
                    new_user(&format!("User {i}"), &format!("user{i}@ex.com")),
                    base + Duration::seconds(i),
                )
                .unwrap();
        }

        let (status, body) = post_json(
            app_with(store),
            json!({"action": "getAll", "page": 2, "limit": 10}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let names: Vec<&str> = body["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|u| u["name"].as_str().unwrap())
            .collect();
        let expected: Vec<String> = (6..=15).rev().map(|i| format!("User {i}")).collect();
        assert_eq!(names, expected);
        assert_eq!(body["pagination"]["current"], 2);
        assert_eq!(body["pagination"]["totalPages"], 3);
        assert_eq!(body["pagination"]["totalUsers"], 25);
        assert_eq!(body["pagination"]["hasNext"], true);
        assert_eq!(body["pagination"]["hasPrev"], true);
    }

    #[tokio::test]
    async fn login_accepts_any_password_for_known_email() {
        let store = Arc::new(InMemoryUserStore::new());
        store
            .seed(new_user("Ana", "ana@ex.com"), Utc::now())
            .unwrap();
        let app = app_with(store);

        let (status, body) = post_json(
            app.clone(),
            json!({"action": "login", "data": {"email": "ana@ex.com", "password": "anything"}}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["type"], "login_success");
        assert_eq!(body["message"], "Login successful");

        let (status, body) = post_json(
            app.clone(),
            json!({"action": "login", "data": {"email": "bob@ex.com", "password": "x"}}),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "Invalid email or password");

        let (status, body) = post_json(
            app,
            json!({"action": "login", "data": {"email": "ana@ex.com"}}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Email and password are required");
    }

    #[tokio::test]
    async fn get_by_id_found_and_missing() {
        let store = Arc::new(InMemoryUserStore::new());
        let user = store
            .seed(new_user("Ana", "ana@ex.com"), Utc::now())
            .unwrap();
        let app = app_with(store);

        let (status, body) =
            post_json(app.clone(), json!({"action": "getById", "userId": &user.id})).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["type"], "user_details");
        assert_eq!(body["data"]["id"], user.id);
        assert!(body.get("message").is_none());

        let (status, body) =
            post_json(app, json!({"action": "getById", "userId": "not-an-id"})).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"success": false, "error": "User not found"}));
    }

    #[tokio::test]
    async fn unknown_action_lists_valid_ones() {
        let (status, body) = post_json(app(), json!({"action": "delete"})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body["error"],
            "Invalid action. Use: 'getAll', 'create', 'login', or 'getById'"
        );
    }

    #[tokio::test]
    async fn malformed_body_is_400_envelope() {
        let req = Request::builder()
            .method("POST")
            .uri("/api/users/operations")
            .header("content-type", "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let resp = app().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert!(resp.headers().contains_key("x-request-id"));
    }

    /// Store whose every call fails, as if the database were unreachable.
    struct DownStore;

    #[async_trait]
    impl UserStore for DownStore {
        async fn insert(&self, _: NewUser) -> DomainResult<User> {
            Err(DomainError::Database("connection refused".into()))
        }
        async fn find_by_email(&self, _: &str) -> DomainResult<Option<User>> {
            Err(DomainError::Database("connection refused".into()))
        }
        async fn find_by_id(&self, _: &str) -> DomainResult<Option<User>> {
            Err(DomainError::Database("connection refused".into()))
        }
        async fn find(&self, _: FindUsers) -> DomainResult<FoundUsers> {
            Err(DomainError::Database("connection refused".into()))
        }
        async fn ping(&self) -> DomainResult<()> {
            Err(DomainError::Database("connection refused".into()))
        }
    }

    #[tokio::test]
    async fn store_failure_is_500_with_message() {
        let (status, body) = post_json(app_with(Arc::new(DownStore)), json!({"action": "getAll"})).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body["error"],
            "Server error: Database error: connection refused"
        );
    }

    #[tokio::test]
    async fn health_reports_store_state() {
        let req = || Request::builder().uri("/health").body(Body::empty()).unwrap();

        let resp = app().oneshot(req()).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], "ok");
        assert_eq!(body["database"]["status"], "ok");

        let resp = app_with(Arc::new(DownStore)).oneshot(req()).await.unwrap();
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn openapi_document_lists_operations_path() {
        let req = Request::builder()
            .uri("/api-doc/openapi.json")
            .body(Body::empty())
            .unwrap();
        let resp = app().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let doc: Value = serde_json::from_slice(&bytes).unwrap();
        assert!(doc["paths"]["/api/users/operations"]["post"].is_object());
    }

    #[tokio::test]
    async fn metrics_endpoint_serves_text() {
        let req = Request::builder().uri("/metrics").body(Body::empty()).unwrap();
        let resp = app().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(resp.headers()["content-type"]
            .to_str()
            .unwrap()
            .starts_with("text/plain"));
    }
}
