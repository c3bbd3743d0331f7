//! PostgreSQL implementation of TicketRepository.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;

use super::{column, like_pattern};
use crate::domain::foundation::{
    ConversationId, DomainError, ErrorCode, TicketId, Timestamp, UserId,
};
use crate::domain::ticket::{NewTicket, Ticket, TicketStatus};
use crate::ports::{TicketFilter, TicketRepository};

const TICKET_COLUMNS: &str =
    "id, title, description, status, user_id, conversation_id, created_at, updated_at";

/// PostgreSQL implementation of TicketRepository.
#[derive(Clone)]
pub struct PostgresTicketRepository {
    pool: PgPool,
}

impl PostgresTicketRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TicketRepository for PostgresTicketRepository {
    async fn insert(&self, ticket: &NewTicket) -> Result<Ticket, DomainError> {
        let sql = format!(
            r#"
            INSERT INTO tickets (title, description, status, user_id, conversation_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {}
            "#,
            TICKET_COLUMNS
        );

        let row = sqlx::query(&sql)
            .bind(ticket.title())
            .bind(ticket.description())
            .bind(TicketStatus::Open.as_str())
            .bind(ticket.user_id().map(|id| id.as_i64()))
            .bind(ticket.conversation_id().map(|id| id.as_i64()))
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to insert ticket", e))?;

        row_to_ticket(&row)
    }

    async fn find_by_id(&self, id: TicketId) -> Result<Option<Ticket>, DomainError> {
        let sql = format!("SELECT {} FROM tickets WHERE id = $1", TICKET_COLUMNS);

        let row = sqlx::query(&sql)
            .bind(id.as_i64())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to fetch ticket", e))?;

        row.as_ref().map(row_to_ticket).transpose()
    }

    async fn list(&self, filter: &TicketFilter) -> Result<Vec<Ticket>, DomainError> {
        let sql = format!(
            r#"
            SELECT {}
            FROM tickets
            WHERE ($1::BIGINT IS NULL OR user_id = $1)
              AND ($2::TEXT IS NULL OR status = $2)
              AND ($3::TEXT IS NULL OR title ILIKE $3 OR description ILIKE $3)
            ORDER BY id ASC
            OFFSET $4
            LIMIT $5
            "#,
            TICKET_COLUMNS
        );

        let pattern = filter
            .query
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(like_pattern);

        let rows = sqlx::query(&sql)
            .bind(filter.owner.map(|id| id.as_i64()))
            .bind(filter.status.map(|s| s.as_str()))
            .bind(pattern)
            .bind(i64::from(filter.page.skip()))
            .bind(i64::from(filter.page.limit()))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to list tickets", e))?;

        rows.iter().map(row_to_ticket).collect()
    }

    async fn update(&self, ticket: &Ticket) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE tickets SET
                title = $2,
                description = $3,
                status = $4,
                updated_at = $5
            WHERE id = $1
            "#,
        )
        .bind(ticket.id().as_i64())
        .bind(ticket.title())
        .bind(ticket.description())
        .bind(ticket.status().as_str())
        .bind(ticket.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to update ticket", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::TicketNotFound,
                format!("Ticket not found: {}", ticket.id()),
            ));
        }

        Ok(())
    }

    async fn delete(&self, id: TicketId) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM tickets WHERE id = $1")
            .bind(id.as_i64())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to delete ticket", e))?;

        Ok(result.rows_affected() > 0)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Helper functions
// ════════════════════════════════════════════════════════════════════════════

fn row_to_ticket(row: &PgRow) -> Result<Ticket, DomainError> {
    let status: String = column(row, "status")?;
    let status = status.parse::<TicketStatus>().map_err(|e| {
        DomainError::new(ErrorCode::DatabaseError, format!("Invalid ticket status: {}", e))
    })?;

    let user_id: Option<i64> = column(row, "user_id")?;
    let conversation_id: Option<i64> = column(row, "conversation_id")?;
    let created_at: chrono::DateTime<chrono::Utc> = column(row, "created_at")?;
    let updated_at: chrono::DateTime<chrono::Utc> = column(row, "updated_at")?;

    Ok(Ticket::reconstitute(
        TicketId::new(column(row, "id")?),
        column(row, "title")?,
        column(row, "description")?,
        status,
        user_id.map(UserId::new),
        conversation_id.map(ConversationId::new),
        Timestamp::from_datetime(created_at),
        Timestamp::from_datetime(updated_at),
    ))
}
