//! HTTP handlers for admin endpoints.
//!
//! Every handler except the two public catalogue reads takes `RequireAdmin`.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Json, Path, Query, State};
use axum::response::IntoResponse;

use crate::application::handlers::{
    ApplyDiscountCommand, CreateEventCommand, DeleteDiscountCommand, DeleteEventCommand,
    GetEventAttendeesQuery, GetEventQuery, ListEventsQuery, UpdateDiscountCommand,
    UpdateEventCommand,
};
use crate::domain::event::EventFilter;
use crate::domain::foundation::{DiscountId, EventId};
use crate::domain::validation::DiscountInput;

use super::super::account::UserResponse;
use super::super::middleware::RequireAdmin;
use super::super::response::{ApiError, ApiResponse};
use super::super::state::AppState;
use super::dto::{DiscountRequest, DiscountResponse};
use super::form::EventForm;

// ════════════════════════════════════════════════════════════════════════════════
// Events
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/admin/events - List every event, optionally filtered
pub async fn list_events(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
    filter: Result<Query<EventFilter>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Query(filter) = filter?;
    let events = state
        .list_events_handler()
        .handle(ListEventsQuery { filter })
        .await?;
    Ok(ApiResponse::ok("Events retrieved", events))
}

/// GET /api/admin/events/:id - Public event lookup
pub async fn get_event(
    State(state): State<AppState>,
    id: Result<Path<EventId>, PathRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Path(event_id) = id?;
    let event = state
        .get_event_handler()
        .handle(GetEventQuery { event_id })
        .await?;
    Ok(ApiResponse::ok("Event retrieved", event))
}

/// POST /api/admin/events - Create an event, optionally with a poster
pub async fn create_event(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    form: EventForm,
) -> Result<impl IntoResponse, ApiError> {
    let result = state
        .create_event_handler()
        .handle(CreateEventCommand {
            input: form.input,
            image: form.image,
        })
        .await?;

    tracing::info!(event_id = %result.event.id, admin_id = %admin.id, "event created");
    Ok(ApiResponse::created("Event created", result.event))
}

/// PUT /api/admin/events/:id - Revise an event
pub async fn update_event(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
    id: Result<Path<EventId>, PathRejection>,
    form: EventForm,
) -> Result<impl IntoResponse, ApiError> {
    let Path(event_id) = id?;
    let result = state
        .update_event_handler()
        .handle(UpdateEventCommand {
            event_id,
            input: form.input,
            image: form.image,
        })
        .await?;

    let message = if result.discounts_cleared {
        "Event updated; discounts removed because the event is now free"
    } else {
        "Event updated"
    };
    Ok(ApiResponse::ok(message, result.event))
}

/// DELETE /api/admin/events/:id - Delete an event and everything under it
pub async fn delete_event(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    id: Result<Path<EventId>, PathRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Path(event_id) = id?;
    state
        .delete_event_handler()
        .handle(DeleteEventCommand { event_id })
        .await?;

    tracing::info!(%event_id, admin_id = %admin.id, "event deleted");
    Ok(ApiResponse::message("Event deleted"))
}

// ════════════════════════════════════════════════════════════════════════════════
// Discounts
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/admin/discounts - Public discount listing
pub async fn list_discounts(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let discounts = state.list_discounts_handler().all().await?;
    Ok(ApiResponse::ok("Discounts retrieved", discounts))
}

/// POST /api/admin/discounts - Attach a discount to an event
pub async fn apply_discount(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
    body: Result<Json<DiscountRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = body?;
    let result = state
        .apply_discount_handler()
        .handle(ApplyDiscountCommand {
            event_id: request.event_id,
            input: request.terms,
        })
        .await?;

    Ok(ApiResponse::created(
        "Discount applied",
        DiscountResponse {
            discount: result.discount,
            event: result.event,
        },
    ))
}

/// PUT /api/admin/discounts/:id - Change a discount's terms
pub async fn update_discount(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
    id: Result<Path<DiscountId>, PathRejection>,
    body: Result<Json<DiscountInput>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Path(discount_id) = id?;
    let Json(input) = body?;
    let result = state
        .update_discount_handler()
        .handle(UpdateDiscountCommand { discount_id, input })
        .await?;

    Ok(ApiResponse::ok(
        "Discount updated",
        DiscountResponse {
            discount: result.discount,
            event: result.event,
        },
    ))
}

/// DELETE /api/admin/discounts/:id - Remove a discount, resetting the price
pub async fn delete_discount(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
    id: Result<Path<DiscountId>, PathRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Path(discount_id) = id?;
    let event = state
        .delete_discount_handler()
        .handle(DeleteDiscountCommand { discount_id })
        .await?;
    Ok(ApiResponse::ok("Discount deleted", event))
}

// ════════════════════════════════════════════════════════════════════════════════
// Statistics
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/admin/stats/users
pub async fn list_users(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
) -> Result<impl IntoResponse, ApiError> {
    let users: Vec<UserResponse> = state
        .admin_listings_handler()
        .users()
        .await?
        .into_iter()
        .map(UserResponse::from)
        .collect();
    Ok(ApiResponse::ok("Users retrieved", users))
}

/// GET /api/admin/stats/registrations
pub async fn list_registrations(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
) -> Result<impl IntoResponse, ApiError> {
    let registrations = state.admin_listings_handler().registrations().await?;
    Ok(ApiResponse::ok("Registrations retrieved", registrations))
}

/// GET /api/admin/stats/payments
pub async fn list_payments(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
) -> Result<impl IntoResponse, ApiError> {
    let payments = state.admin_listings_handler().payments().await?;
    Ok(ApiResponse::ok("Payments retrieved", payments))
}

/// GET /api/admin/stats/:id - Attendees of one event
pub async fn event_attendees(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
    id: Result<Path<EventId>, PathRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Path(event_id) = id?;
    let attendees = state
        .event_attendees_handler()
        .handle(GetEventAttendeesQuery { event_id })
        .await?;
    Ok(ApiResponse::ok("Registrations for event retrieved", attendees))
}
