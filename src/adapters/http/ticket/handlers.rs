//! HTTP handlers for ticket endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::{error_response, invalid_id};
use crate::adapters::http::middleware::RequireAuth;
use crate::application::handlers::ticket::{
    CreateTicketCommand, CreateTicketHandler, DeleteTicketCommand, DeleteTicketHandler,
    GetTicketHandler, GetTicketQuery, ListTicketsHandler, ListTicketsQuery, UpdateTicketCommand,
    UpdateTicketHandler,
};
use crate::domain::foundation::TicketId;
use crate::domain::ticket::TicketError;

use super::dto::{CreateTicketRequest, ListTicketsParams, TicketResponse, UpdateTicketRequest};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct TicketHandlers {
    create_handler: Arc<CreateTicketHandler>,
    get_handler: Arc<GetTicketHandler>,
    list_handler: Arc<ListTicketsHandler>,
    update_handler: Arc<UpdateTicketHandler>,
    delete_handler: Arc<DeleteTicketHandler>,
}

impl TicketHandlers {
    pub fn new(
        create_handler: Arc<CreateTicketHandler>,
        get_handler: Arc<GetTicketHandler>,
        list_handler: Arc<ListTicketsHandler>,
        update_handler: Arc<UpdateTicketHandler>,
        delete_handler: Arc<DeleteTicketHandler>,
    ) -> Self {
        Self {
            create_handler,
            get_handler,
            list_handler,
            update_handler,
            delete_handler,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/tickets - Open a ticket owned by the caller
pub async fn create_ticket(
    State(handlers): State<TicketHandlers>,
    RequireAuth(user): RequireAuth,
    Json(req): Json<CreateTicketRequest>,
) -> Response {
    let cmd = CreateTicketCommand {
        title: req.title,
        description: req.description,
    };

    match handlers.create_handler.handle(cmd, &user).await {
        Ok(ticket) => (StatusCode::CREATED, Json(TicketResponse::from(ticket))).into_response(),
        Err(e) => handle_ticket_error(e),
    }
}

/// GET /api/tickets - List visible tickets
pub async fn list_tickets(
    State(handlers): State<TicketHandlers>,
    RequireAuth(user): RequireAuth,
    Query(params): Query<ListTicketsParams>,
) -> Response {
    let query = ListTicketsQuery {
        page: params.page(),
        q: params.q,
        status: params.status,
    };

    match handlers.list_handler.handle(query, &user).await {
        Ok(tickets) => {
            let response: Vec<TicketResponse> = tickets.into_iter().map(Into::into).collect();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_ticket_error(e),
    }
}

/// GET /api/tickets/:id
pub async fn get_ticket(
    State(handlers): State<TicketHandlers>,
    RequireAuth(user): RequireAuth,
    Path(ticket_id): Path<String>,
) -> Response {
    let ticket_id = match ticket_id.parse::<TicketId>() {
        Ok(id) => id,
        Err(_) => return invalid_id("ticket", &ticket_id),
    };

    match handlers
        .get_handler
        .handle(GetTicketQuery { ticket_id }, &user)
        .await
    {
        Ok(ticket) => (StatusCode::OK, Json(TicketResponse::from(ticket))).into_response(),
        Err(e) => handle_ticket_error(e),
    }
}

/// PATCH /api/tickets/:id - Partial update
pub async fn update_ticket(
    State(handlers): State<TicketHandlers>,
    RequireAuth(user): RequireAuth,
    Path(ticket_id): Path<String>,
    Json(req): Json<UpdateTicketRequest>,
) -> Response {
    let ticket_id = match ticket_id.parse::<TicketId>() {
        Ok(id) => id,
        Err(_) => return invalid_id("ticket", &ticket_id),
    };

    let cmd = UpdateTicketCommand {
        ticket_id,
        update: req.into(),
    };

    match handlers.update_handler.handle(cmd, &user).await {
        Ok(ticket) => (StatusCode::OK, Json(TicketResponse::from(ticket))).into_response(),
        Err(e) => handle_ticket_error(e),
    }
}

/// DELETE /api/tickets/:id - Admin only
pub async fn delete_ticket(
    State(handlers): State<TicketHandlers>,
    RequireAuth(user): RequireAuth,
    Path(ticket_id): Path<String>,
) -> Response {
    let ticket_id = match ticket_id.parse::<TicketId>() {
        Ok(id) => id,
        Err(_) => return invalid_id("ticket", &ticket_id),
    };

    match handlers
        .delete_handler
        .handle(DeleteTicketCommand { ticket_id }, &user)
        .await
    {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => handle_ticket_error(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

fn handle_ticket_error(error: TicketError) -> Response {
    match &error {
        TicketError::NotFound(_) => error_response(error.code(), "Ticket not found"),
        _ => error_response(error.code(), error.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ValidationError;

    #[test]
    fn not_found_maps_to_404() {
        let response = handle_ticket_error(TicketError::not_found(TicketId::new(9)));
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn forbidden_maps_to_403() {
        assert_eq!(
            handle_ticket_error(TicketError::Forbidden).status(),
            StatusCode::FORBIDDEN
        );
    }

    #[test]
    fn validation_maps_to_400() {
        let error = TicketError::Validation(ValidationError::empty_field("title"));
        assert_eq!(handle_ticket_error(error).status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn infrastructure_maps_to_500() {
        let error = TicketError::infrastructure("pool timed out");
        assert_eq!(
            handle_ticket_error(error).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
