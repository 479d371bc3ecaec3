use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::{Expr, LikeExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Select, Set, SqlErr, Statement,
};
use uuid::Uuid;

use crate::domain::{
    DomainError, DomainResult, FindUsers, FoundUsers, NewUser, User, UserFilter, UserSort,
    UserStore, UserType,
};
use crate::infrastructure::database::entities::user;

/// SeaORM-backed user store
pub struct SeaOrmUserStore {
    db: DatabaseConnection,
}

impl SeaOrmUserStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn entity_type_to_domain(user_type: user::UserType) -> UserType {
    match user_type {
        user::UserType::Rider => UserType::Rider,
        user::UserType::Driver => UserType::Driver,
        user::UserType::Admin => UserType::Admin,
    }
}

fn domain_type_to_entity(user_type: UserType) -> user::UserType {
    match user_type {
        UserType::Rider => user::UserType::Rider,
        UserType::Driver => user::UserType::Driver,
        UserType::Admin => user::UserType::Admin,
    }
}

fn user_model_to_domain(model: user::Model) -> User {
    User {
        id: model.id,
        name: model.name,
        email: model.email,
        phone: model.phone,
        user_type: entity_type_to_domain(model.user_type),
        is_active: model.is_active,
        profile_completed: model.profile_completed,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Database(e.to_string())
}

/// Escapes LIKE wildcards so the term matches literally (escape char `\`).
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn filtered(filter: &UserFilter) -> Select<user::Entity> {
    let mut query = user::Entity::find();

    // Search: case-insensitive substring on name OR email, against the
    // columns lowercased on insert
    if let Some(ref search) = filter.search {
        let pattern = format!("%{}%", escape_like(&search.to_lowercase()));
        let contains = |column: user::Column| {
            Expr::col(column).like(LikeExpr::new(pattern.clone()).escape('\\'))
        };
        query = query.filter(
            Condition::any()
                .add(contains(user::Column::NameSearch))
                .add(contains(user::Column::EmailSearch)),
        );
    }

    if let Some(user_type) = filter.user_type {
        query = query.filter(user::Column::UserType.eq(domain_type_to_entity(user_type)));
    }

    if let Some(is_active) = filter.is_active {
        query = query.filter(user::Column::IsActive.eq(is_active));
    }

    query
}

// ── Store implementation ────────────────────────────────────────

#[async_trait]
impl UserStore for SeaOrmUserStore {
    async fn insert(&self, dto: NewUser) -> DomainResult<User> {
        let now = Utc::now();
        let email = dto.email.clone();

        let new_user = user::ActiveModel {
            id: Set(Uuid::now_v7().to_string()),
            name_search: Set(dto.name.to_lowercase()),
            email_search: Set(dto.email.to_lowercase()),
            name: Set(dto.name),
            email: Set(dto.email),
            phone: Set(dto.phone),
            user_type: Set(domain_type_to_entity(dto.user_type)),
            is_active: Set(dto.is_active),
            profile_completed: Set(dto.profile_completed),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = new_user.insert(&self.db).await.map_err(|e| {
            if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
                DomainError::Conflict {
                    field: "email",
                    value: email,
                }
            } else {
                db_err(e)
            }
        })?;

        Ok(user_model_to_domain(model))
    }

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>> {
        let model = user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(model.map(user_model_to_domain))
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<User>> {
        Uuid::parse_str(id).map_err(|_| DomainError::InvalidIdentifier(id.to_string()))?;

        let model = user::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(model.map(user_model_to_domain))
    }

    async fn find(&self, query: FindUsers) -> DomainResult<FoundUsers> {
        // The SQLite binder takes LIMIT and OFFSET as i64
        for (field, value) in [("skip", query.skip), ("limit", query.limit)] {
            if i64::try_from(value).is_err() {
                return Err(DomainError::validation(field, "out of range"));
            }
        }

        let filtered = filtered(&query.filter);

        // Count total with the same filter, no paging
        let total = filtered.clone().count(&self.db).await.map_err(db_err)?;

        // UUIDv7 ids are time-ordered, so they break created_at ties
        let sorted = match query.sort {
            UserSort::NewestFirst => filtered
                .order_by_desc(user::Column::CreatedAt)
                .order_by_desc(user::Column::Id),
            UserSort::OldestFirst => filtered
                .order_by_asc(user::Column::CreatedAt)
                .order_by_asc(user::Column::Id),
        };

        let models = sorted
            .offset(query.skip)
            .limit(query.limit)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(FoundUsers {
            users: models.into_iter().map(user_model_to_domain).collect(),
            total,
        })
    }

    async fn ping(&self) -> DomainResult<()> {
        self.db
            .execute(Statement::from_string(
                self.db.get_database_backend(),
                "SELECT 1".to_string(),
            ))
            .await
            .map_err(db_err)?;
        Ok(())
    }
}
