//! Axum router configuration for attendee endpoints.

use axum::{
    routing::{get, patch, post},
    Router,
};

use super::super::state::AppState;
use super::handlers::{
    attend, event_discounts, event_reviews, get_event, get_user, list_discounts, list_events,
    pay, register, review, user_registrations, user_reviews,
};

/// Create the attendee API router, mounted at `/api/user`.
///
/// # Routes
///
/// ## Public
/// - `GET /events` - Catalogue with `search`, `category`, `location` filters
/// - `GET /events/discount` - Every discount
/// - `GET /reviews/event/:id` - Reviews of an event
///
/// ## USER role
/// - `GET /events/:id`, `GET /events/discount/:id`
/// - `GET /users/:id`, `GET /registrations/:id` - Caller's own data only
/// - `GET /reviews/user/:id`
/// - `POST /register`, `POST /payments`, `POST /reviews`
/// - `PATCH /attend/:id`
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/events", get(list_events))
        .route("/events/discount", get(list_discounts))
        .route("/events/discount/:id", get(event_discounts))
        .route("/events/:id", get(get_event))
        .route("/users/:id", get(get_user))
        .route("/registrations/:id", get(user_registrations))
        .route("/reviews", post(review))
        .route("/reviews/event/:id", get(event_reviews))
        .route("/reviews/user/:id", get(user_reviews))
        .route("/register", post(register))
        .route("/payments", post(pay))
        .route("/attend/:id", patch(attend))
}
