//! HTTP handlers for attendee endpoints.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Json, Path, Query, State};
use axum::response::IntoResponse;

use crate::application::handlers::{
    GetEventQuery, GetUserQuery, ListEventsQuery, ListUserRegistrationsQuery, MarkAttendedCommand,
    RegisterForEventCommand, SettlePaymentCommand, SubmitReviewCommand,
};
use crate::domain::event::EventFilter;
use crate::domain::foundation::{EventId, RegistrationId, UserId};

use super::super::account::UserResponse;
use super::super::middleware::RequireUser;
use super::super::response::{ApiError, ApiResponse};
use super::super::state::AppState;
use super::dto::{PaymentRequest, RegisterRequest, RegistrationResponse, ReviewRequest};

// ════════════════════════════════════════════════════════════════════════════════
// Public Queries
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/user/events - Browse the catalogue
///
/// Query parameters: `search` (title), `category`, `location`.
pub async fn list_events(
    State(state): State<AppState>,
    filter: Result<Query<EventFilter>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Query(filter) = filter?;
    let events = state
        .list_events_handler()
        .handle(ListEventsQuery { filter })
        .await?;
    Ok(ApiResponse::ok("Events retrieved", events))
}

/// GET /api/user/events/discount - Every discount
pub async fn list_discounts(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let discounts = state.list_discounts_handler().all().await?;
    Ok(ApiResponse::ok("Discounts retrieved", discounts))
}

/// GET /api/user/reviews/event/:id - Reviews of an event with usernames
pub async fn event_reviews(
    State(state): State<AppState>,
    id: Result<Path<EventId>, PathRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Path(event_id) = id?;
    let reviews = state.list_reviews_handler().for_event(&event_id).await?;
    Ok(ApiResponse::ok("Reviews retrieved", reviews))
}

// ════════════════════════════════════════════════════════════════════════════════
// Authenticated Queries
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/user/events/:id
pub async fn get_event(
    State(state): State<AppState>,
    RequireUser(_): RequireUser,
    id: Result<Path<EventId>, PathRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Path(event_id) = id?;
    let event = state
        .get_event_handler()
        .handle(GetEventQuery { event_id })
        .await?;
    Ok(ApiResponse::ok("Event retrieved", event))
}

/// GET /api/user/events/discount/:id - Discounts of one event
pub async fn event_discounts(
    State(state): State<AppState>,
    RequireUser(_): RequireUser,
    id: Result<Path<EventId>, PathRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Path(event_id) = id?;
    let discounts = state.list_discounts_handler().for_event(&event_id).await?;
    let message = if discounts.is_empty() {
        format!("No discount found for event id {}", event_id)
    } else {
        format!("Discount for event id {} was found", event_id)
    };
    Ok(ApiResponse::ok(message, discounts))
}

/// GET /api/user/users/:id - The caller's own account
pub async fn get_user(
    State(state): State<AppState>,
    RequireUser(principal): RequireUser,
    id: Result<Path<UserId>, PathRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Path(user_id) = id?;
    let user = state
        .get_user_handler()
        .handle(GetUserQuery { principal, user_id })
        .await?;
    Ok(ApiResponse::ok("User retrieved", UserResponse::from(user)))
}

/// GET /api/user/registrations/:id - The caller's registrations
pub async fn user_registrations(
    State(state): State<AppState>,
    RequireUser(principal): RequireUser,
    id: Result<Path<UserId>, PathRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Path(user_id) = id?;
    let registrations = state
        .list_user_registrations_handler()
        .handle(ListUserRegistrationsQuery { principal, user_id })
        .await?;
    Ok(ApiResponse::ok("Registrations retrieved", registrations))
}

/// GET /api/user/reviews/user/:id - Reviews written by a user
pub async fn user_reviews(
    State(state): State<AppState>,
    RequireUser(_): RequireUser,
    id: Result<Path<UserId>, PathRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Path(user_id) = id?;
    let reviews = state.list_reviews_handler().for_user(&user_id).await?;
    Ok(ApiResponse::ok("Reviews retrieved", reviews))
}

// ════════════════════════════════════════════════════════════════════════════════
// Commands
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/user/register - Claim seats for an event
pub async fn register(
    State(state): State<AppState>,
    RequireUser(principal): RequireUser,
    body: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = body?;
    let result = state
        .register_for_event_handler()
        .handle(RegisterForEventCommand {
            principal,
            user_id: request.user_id,
            event_id: request.event_id,
            input: request.input,
        })
        .await?;

    Ok(ApiResponse::created(
        "Registration successful",
        RegistrationResponse::from(result),
    ))
}

/// POST /api/user/payments - Settle the payment of a registration
pub async fn pay(
    State(state): State<AppState>,
    RequireUser(principal): RequireUser,
    body: Result<Json<PaymentRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = body?;
    let payment = state
        .settle_payment_handler()
        .handle(SettlePaymentCommand {
            principal,
            registration_id: request.registration_id,
            input: request.input,
        })
        .await?;
    Ok(ApiResponse::ok("Payment successful", payment))
}

/// POST /api/user/reviews - Review an event the caller registered for
pub async fn review(
    State(state): State<AppState>,
    RequireUser(principal): RequireUser,
    body: Result<Json<ReviewRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = body?;
    let review = state
        .submit_review_handler()
        .handle(SubmitReviewCommand {
            principal,
            user_id: request.user_id,
            registration_id: request.registration_id,
            input: request.input,
        })
        .await?;
    Ok(ApiResponse::created("Review submitted", review))
}

/// PATCH /api/user/attend/:id - Mark a registration as attended
pub async fn attend(
    State(state): State<AppState>,
    RequireUser(principal): RequireUser,
    id: Result<Path<RegistrationId>, PathRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Path(registration_id) = id?;
    let registration = state
        .mark_attended_handler()
        .handle(MarkAttendedCommand {
            principal,
            registration_id,
        })
        .await?;
    Ok(ApiResponse::ok("Attendance recorded", registration))
}
