//! Axum router configuration for admin endpoints.

use axum::{
    routing::{get, put},
    Router,
};

use super::super::state::AppState;
use super::handlers::{
    apply_discount, create_event, delete_discount, delete_event, event_attendees, get_event,
    list_discounts, list_events, list_payments, list_registrations, list_users, update_discount,
    update_event,
};

/// Create the admin API router, mounted at `/api/admin`.
///
/// # Routes
///
/// ## Public
/// - `GET /events/:id` - Event details
/// - `GET /discounts` - Every discount
///
/// ## Admin only
/// - `GET /events`, `POST /events` - List and create events
/// - `PUT /events/:id`, `DELETE /events/:id` - Revise and delete an event
/// - `POST /discounts` - Attach a discount
/// - `PUT /discounts/:id`, `DELETE /discounts/:id` - Revise and remove a discount
/// - `GET /stats/users|registrations|payments` - Full listings
/// - `GET /stats/:id` - Attendees of one event
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/events", get(list_events).post(create_event))
        .route(
            "/events/:id",
            get(get_event).put(update_event).delete(delete_event),
        )
        .route("/discounts", get(list_discounts).post(apply_discount))
        .route("/discounts/:id", put(update_discount).delete(delete_discount))
        .route("/stats/users", get(list_users))
        .route("/stats/registrations", get(list_registrations))
        .route("/stats/payments", get(list_payments))
        .route("/stats/:id", get(event_attendees))
}
