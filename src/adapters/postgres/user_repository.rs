//! PostgreSQL implementation of UserRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::rows::db_error;
use crate::domain::account::{Email, PasswordHash, User, Username};
use crate::domain::foundation::{DomainError, ErrorCode, Role, Timestamp, UserId};
use crate::ports::UserRepository;

pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const USER_COLUMNS: &str =
    "id, username, fullname, email, password_hash, role, refresh_token, created_at";

#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    username: String,
    fullname: String,
    email: String,
    password_hash: String,
    role: String,
    refresh_token: Option<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = DomainError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let invalid = |column: &str, e: &dyn std::fmt::Display| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Invalid {} value: {}", column, e),
            )
        };

        Ok(User {
            id: UserId::from_uuid(row.id),
            username: Username::try_new("username", row.username)
                .map_err(|e| invalid("username", &e))?,
            fullname: Username::try_new("fullname", row.fullname)
                .map_err(|e| invalid("fullname", &e))?,
            email: Email::try_new(row.email).map_err(|e| invalid("email", &e))?,
            password_hash: PasswordHash::new(row.password_hash),
            role: row.role.parse::<Role>().map_err(|e| invalid("role", &e))?,
            refresh_token: row.refresh_token,
            created_at: Timestamp::from_datetime(row.created_at),
        })
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, user: &User) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO users (
                id, username, fullname, email, password_hash, role, refresh_token, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(user.id.as_uuid())
        .bind(user.username.as_str())
        .bind(user.fullname.as_str())
        .bind(user.email.as_str())
        .bind(user.password_hash.as_str())
        .bind(user.role.as_str())
        .bind(&user.refresh_token)
        .bind(user.created_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.constraint() == Some("users_email_key") {
                    return DomainError::new(ErrorCode::EmailTaken, "Email already registered");
                }
            }
            DomainError::database(format!("Failed to insert user: {}", e))
        })?;

        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        let row: Option<UserRow> =
            sqlx::query_as(&format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS))
                .bind(id.as_uuid())
                .fetch_optional(&self.pool)
                .await
                .map_err(db_error("fetch user"))?;

        row.map(User::try_from).transpose()
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, DomainError> {
        let row: Option<UserRow> =
            sqlx::query_as(&format!("SELECT {} FROM users WHERE email = $1", USER_COLUMNS))
                .bind(email.as_str())
                .fetch_optional(&self.pool)
                .await
                .map_err(db_error("fetch user by email"))?;

        row.map(User::try_from).transpose()
    }

    async fn set_refresh_token(&self, id: &UserId, token: Option<&str>) -> Result<(), DomainError> {
        let result = sqlx::query("UPDATE users SET refresh_token = $2 WHERE id = $1")
            .bind(id.as_uuid())
            .bind(token)
            .execute(&self.pool)
            .await
            .map_err(db_error("store refresh token"))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(ErrorCode::UserNotFound, "User not found")
                .with_detail("user_id", id.to_string()));
        }

        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<User>, DomainError> {
        let rows: Vec<UserRow> = sqlx::query_as(&format!(
            "SELECT {} FROM users ORDER BY created_at ASC",
            USER_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("list users"))?;

        rows.into_iter().map(User::try_from).collect()
    }
}
