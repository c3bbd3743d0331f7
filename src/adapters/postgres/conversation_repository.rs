//! PostgreSQL implementation of ConversationRepository.
//!
//! Deleting a conversation runs in one transaction: its messages go first,
//! linked tickets are unlinked, then the conversation row is removed.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;

use super::column;
use crate::domain::conversation::{
    Conversation, ConversationStatus, Message, MessageRole, NewConversation, NewMessage,
};
use crate::domain::decision::DecisionAction;
use crate::domain::foundation::{
    ConversationId, DomainError, ErrorCode, MessageId, Timestamp, UserId,
};
use crate::ports::{ConversationFilter, ConversationRepository};

const CONVERSATION_COLUMNS: &str = "id, title, status, user_id, created_at, updated_at";
const MESSAGE_COLUMNS: &str =
    "id, conversation_id, role, content, ai_confidence, ai_action, created_at";

/// PostgreSQL implementation of ConversationRepository.
#[derive(Clone)]
pub struct PostgresConversationRepository {
    pool: PgPool,
}

impl PostgresConversationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn not_found(id: ConversationId) -> DomainError {
    DomainError::new(
        ErrorCode::ConversationNotFound,
        format!("Conversation not found: {}", id),
    )
}

#[async_trait]
impl ConversationRepository for PostgresConversationRepository {
    async fn insert(&self, conversation: &NewConversation) -> Result<Conversation, DomainError> {
        let sql = format!(
            "INSERT INTO conversations (title, status, user_id) VALUES ($1, $2, $3) RETURNING {}",
            CONVERSATION_COLUMNS
        );

        let row = sqlx::query(&sql)
            .bind(conversation.title())
            .bind(ConversationStatus::Active.as_str())
            .bind(conversation.user_id().map(|id| id.as_i64()))
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to insert conversation", e))?;

        row_to_conversation(&row)
    }

    async fn find_by_id(&self, id: ConversationId) -> Result<Option<Conversation>, DomainError> {
        let sql = format!(
            "SELECT {} FROM conversations WHERE id = $1",
            CONVERSATION_COLUMNS
        );

        let row = sqlx::query(&sql)
            .bind(id.as_i64())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to fetch conversation", e))?;

        row.as_ref().map(row_to_conversation).transpose()
    }

    async fn list(&self, filter: &ConversationFilter) -> Result<Vec<Conversation>, DomainError> {
        let sql = format!(
            r#"
            SELECT {}
            FROM conversations
            WHERE ($1::BIGINT IS NULL OR user_id = $1)
              AND ($2::TEXT IS NULL OR status = $2)
            ORDER BY created_at DESC, id DESC
            OFFSET $3
            LIMIT $4
            "#,
            CONVERSATION_COLUMNS
        );

        let rows = sqlx::query(&sql)
            .bind(filter.owner.map(|id| id.as_i64()))
            .bind(filter.status.map(|s| s.as_str()))
            .bind(i64::from(filter.page.skip()))
            .bind(i64::from(filter.page.limit()))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to list conversations", e))?;

        rows.iter().map(row_to_conversation).collect()
    }

    async fn update(&self, conversation: &Conversation) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE conversations SET
                title = $2,
                status = $3,
                updated_at = $4
            WHERE id = $1
            "#,
        )
        .bind(conversation.id().as_i64())
        .bind(conversation.title())
        .bind(conversation.status().as_str())
        .bind(conversation.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to update conversation", e))?;

        if result.rows_affected() == 0 {
            return Err(not_found(conversation.id()));
        }

        Ok(())
    }

    async fn delete(&self, id: ConversationId) -> Result<bool, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::database("Failed to start transaction", e))?;

        sqlx::query("DELETE FROM messages WHERE conversation_id = $1")
            .bind(id.as_i64())
            .execute(&mut *tx)
            .await
            .map_err(|e| DomainError::database("Failed to delete messages", e))?;

        sqlx::query("UPDATE tickets SET conversation_id = NULL WHERE conversation_id = $1")
            .bind(id.as_i64())
            .execute(&mut *tx)
            .await
            .map_err(|e| DomainError::database("Failed to unlink tickets", e))?;

        let result = sqlx::query("DELETE FROM conversations WHERE id = $1")
            .bind(id.as_i64())
            .execute(&mut *tx)
            .await
            .map_err(|e| DomainError::database("Failed to delete conversation", e))?;

        tx.commit()
            .await
            .map_err(|e| DomainError::database("Failed to commit transaction", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn append_message(
        &self,
        conversation_id: ConversationId,
        message: &NewMessage,
    ) -> Result<Message, DomainError> {
        let sql = format!(
            r#"
            INSERT INTO messages (conversation_id, role, content, ai_confidence, ai_action)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {}
            "#,
            MESSAGE_COLUMNS
        );

        let row = sqlx::query(&sql)
            .bind(conversation_id.as_i64())
            .bind(message.role().as_str())
            .bind(message.content())
            .bind(message.ai_confidence())
            .bind(message.ai_action().map(|a| a.as_str()))
            .fetch_one(&self.pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(ref db) if db.is_foreign_key_violation() => {
                    not_found(conversation_id)
                }
                other => DomainError::database("Failed to insert message", other),
            })?;

        row_to_message(&row)
    }

    async fn messages(&self, conversation_id: ConversationId) -> Result<Vec<Message>, DomainError> {
        let sql = format!(
            "SELECT {} FROM messages WHERE conversation_id = $1 ORDER BY created_at ASC, id ASC",
            MESSAGE_COLUMNS
        );

        let rows = sqlx::query(&sql)
            .bind(conversation_id.as_i64())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to fetch messages", e))?;

        rows.iter().map(row_to_message).collect()
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Helper functions
// ════════════════════════════════════════════════════════════════════════════

fn row_to_conversation(row: &PgRow) -> Result<Conversation, DomainError> {
    let status: String = column(row, "status")?;
    let status = status.parse::<ConversationStatus>().map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid conversation status: {}", e),
        )
    })?;

    let user_id: Option<i64> = column(row, "user_id")?;
    let created_at: chrono::DateTime<chrono::Utc> = column(row, "created_at")?;
    let updated_at: chrono::DateTime<chrono::Utc> = column(row, "updated_at")?;

    Ok(Conversation::reconstitute(
        ConversationId::new(column(row, "id")?),
        column(row, "title")?,
        status,
        user_id.map(UserId::new),
        Timestamp::from_datetime(created_at),
        Timestamp::from_datetime(updated_at),
    ))
}

fn row_to_message(row: &PgRow) -> Result<Message, DomainError> {
    let role: String = column(row, "role")?;
    let role = role.parse::<MessageRole>().map_err(|e| {
        DomainError::new(ErrorCode::DatabaseError, format!("Invalid message role: {}", e))
    })?;

    let ai_action: Option<String> = column(row, "ai_action")?;
    let created_at: chrono::DateTime<chrono::Utc> = column(row, "created_at")?;

    Ok(Message::reconstitute(
        MessageId::new(column(row, "id")?),
        ConversationId::new(column(row, "conversation_id")?),
        role,
        column(row, "content")?,
        column(row, "ai_confidence")?,
        ai_action.as_deref().map(DecisionAction::from_label),
        Timestamp::from_datetime(created_at),
    ))
}
