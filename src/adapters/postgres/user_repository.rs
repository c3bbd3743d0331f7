//! PostgreSQL implementation of UserRepository.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;

use super::column;
use crate::domain::foundation::{DomainError, ErrorCode, Role, Timestamp, UserId};
use crate::domain::user::{NewUser, User};
use crate::ports::UserRepository;

const USER_COLUMNS: &str = "id, username, email, password_hash, role, created_at";

/// Unique constraint names declared in the schema.
const EMAIL_UNIQUE_CONSTRAINT: &str = "users_email_key";

/// PostgreSQL implementation of UserRepository.
#[derive(Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn find_one(&self, clause: &str, value: &str) -> Result<Option<User>, DomainError> {
        let sql = format!("SELECT {} FROM users WHERE {} = $1", USER_COLUMNS, clause);

        let row = sqlx::query(&sql)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to fetch user", e))?;

        row.as_ref().map(row_to_user).transpose()
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn insert(&self, user: &NewUser) -> Result<User, DomainError> {
        let sql = format!(
            r#"
            INSERT INTO users (username, email, password_hash, role)
            VALUES ($1, $2, $3, $4)
            RETURNING {}
            "#,
            USER_COLUMNS
        );

        let row = sqlx::query(&sql)
            .bind(user.username())
            .bind(user.email())
            .bind(user.password_hash())
            .bind(user.role().as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                    if db.constraint() == Some(EMAIL_UNIQUE_CONSTRAINT) {
                        DomainError::conflict("email", "Email already registered")
                    } else {
                        DomainError::conflict("username", "Username already registered")
                    }
                }
                other => DomainError::database("Failed to insert user", other),
            })?;

        row_to_user(&row)
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, DomainError> {
        let sql = format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS);

        let row = sqlx::query(&sql)
            .bind(id.as_i64())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to fetch user", e))?;

        row.as_ref().map(row_to_user).transpose()
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        self.find_one("username", username).await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        self.find_one("email", email).await
    }
}

fn row_to_user(row: &PgRow) -> Result<User, DomainError> {
    let role: String = column(row, "role")?;
    let role = role.parse::<Role>().map_err(|e| {
        DomainError::new(ErrorCode::DatabaseError, format!("Invalid user role: {}", e))
    })?;
    let created_at: chrono::DateTime<chrono::Utc> = column(row, "created_at")?;

    Ok(User::reconstitute(
        UserId::new(column(row, "id")?),
        column(row, "username")?,
        column(row, "email")?,
        column(row, "password_hash")?,
        role,
        Timestamp::from_datetime(created_at),
    ))
}
