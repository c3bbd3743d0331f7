//! HTTP routes for ticket endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    create_ticket, delete_ticket, get_ticket, list_tickets, update_ticket, TicketHandlers,
};

/// Creates the ticket router, mounted at `/api/tickets`.
pub fn ticket_routes(handlers: TicketHandlers) -> Router {
    Router::new()
        .route("/", post(create_ticket).get(list_tickets))
        .route(
            "/:id",
            get(get_ticket).patch(update_ticket).delete(delete_ticket),
        )
        .with_state(handlers)
}
