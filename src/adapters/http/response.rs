//! Response envelope and error conversion shared by every endpoint.
//!
//! Every body, success or failure, has the shape
//!
//! ```text
//! { "message": "...", "status": 200, "data": ..., "detail": ... }
//! ```
//!
//! `data` is omitted on errors; `detail` is omitted on success.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::Value;

use crate::domain::discount::DiscountError;
use crate::domain::event::EventError;
use crate::domain::foundation::{AuthError, DomainError, ErrorCode};
use crate::domain::registration::RegistrationError;
use crate::domain::review::ReviewError;
use crate::domain::validation::ValidationReport;

#[derive(Debug, Serialize)]
pub struct Envelope<T: Serialize> {
    pub message: String,
    pub status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<Value>,
}

/// Successful response wrapped in the envelope.
#[derive(Debug)]
pub struct ApiResponse<T> {
    status: StatusCode,
    message: String,
    data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            status: StatusCode::OK,
            message: message.into(),
            data: Some(data),
        }
    }

    pub fn created(message: impl Into<String>, data: T) -> Self {
        Self {
            status: StatusCode::CREATED,
            message: message.into(),
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    /// Envelope without a `data` member.
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::OK,
            message: message.into(),
            data: None,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let body = Envelope {
            message: self.message,
            status: self.status.as_u16(),
            data: self.data,
            detail: None,
        };
        (self.status, Json(body)).into_response()
    }
}

/// Maps an error code to its HTTP status.
pub fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::ValidationFailed
        | ErrorCode::EmptyField
        | ErrorCode::OutOfRange
        | ErrorCode::InvalidFormat
        | ErrorCode::PastEvent
        | ErrorCode::InvalidRange
        | ErrorCode::InvalidStateTransition => StatusCode::BAD_REQUEST,

        ErrorCode::EventNotFound
        | ErrorCode::DiscountNotFound
        | ErrorCode::UserNotFound
        | ErrorCode::RegistrationNotFound
        | ErrorCode::PaymentNotFound => StatusCode::NOT_FOUND,

        ErrorCode::InsufficientSeats | ErrorCode::DuplicateReview | ErrorCode::EmailTaken => {
            StatusCode::CONFLICT
        }

        ErrorCode::Unauthorized | ErrorCode::InvalidCredentials | ErrorCode::InvalidToken => {
            StatusCode::UNAUTHORIZED
        }
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,

        ErrorCode::StorageError => StatusCode::BAD_GATEWAY,
        ErrorCode::DatabaseError | ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// API error type that converts workflow errors to enveloped HTTP responses.
#[derive(Debug, Clone)]
pub struct ApiError {
    status: StatusCode,
    code: ErrorCode,
    message: String,
    fields: Option<ValidationReport>,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            status: status_for(code),
            code,
            message: message.into(),
            fields: None,
        }
    }

    pub fn validation(report: ValidationReport) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            code: ErrorCode::ValidationFailed,
            message: "Validation failed".to_string(),
            fields: Some(report),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationFailed, message)
    }

    pub fn unauthenticated(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unauthorized, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Forbidden, message)
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = if self.status.is_server_error() {
            tracing::error!(code = %self.code, error = %self.message, "request failed");
            "Something went wrong, please try again later".to_string()
        } else {
            self.message
        };

        let detail = match self.fields {
            Some(report) => serde_json::to_value(report).unwrap_or(Value::Null),
            None => Value::String(self.code.to_string()),
        };

        let body: Envelope<()> = Envelope {
            message,
            status: self.status.as_u16(),
            data: None,
            detail: Some(detail),
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<ValidationReport> for ApiError {
    fn from(report: ValidationReport) -> Self {
        Self::validation(report)
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self::new(err.code, err.message)
    }
}

impl From<EventError> for ApiError {
    fn from(err: EventError) -> Self {
        match err {
            EventError::Validation(report) => Self::validation(report),
            EventError::ImageUpload(reason) => {
                tracing::warn!(%reason, "image upload rejected");
                Self::new(ErrorCode::StorageError, "Image upload failed")
            }
            other => Self::new(other.code(), other.message()),
        }
    }
}

impl From<DiscountError> for ApiError {
    fn from(err: DiscountError) -> Self {
        match err {
            DiscountError::Validation(report) => Self::validation(report),
            other => Self::new(other.code(), other.message()),
        }
    }
}

impl From<RegistrationError> for ApiError {
    fn from(err: RegistrationError) -> Self {
        match err {
            RegistrationError::Validation(report) => Self::validation(report),
            other => Self::new(other.code(), other.message()),
        }
    }
}

impl From<ReviewError> for ApiError {
    fn from(err: ReviewError) -> Self {
        match err {
            ReviewError::Validation(report) => Self::validation(report),
            other => Self::new(other.code(), other.message()),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Validation(report) => Self::validation(report),
            other => Self::new(other.code(), other.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        Self::bad_request(err.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{EventId, RegistrationId, UserId};

    async fn body_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn status_mapping_covers_business_rules() {
        assert_eq!(status_for(ErrorCode::PastEvent), StatusCode::BAD_REQUEST);
        assert_eq!(status_for(ErrorCode::InvalidRange), StatusCode::BAD_REQUEST);
        assert_eq!(status_for(ErrorCode::InsufficientSeats), StatusCode::CONFLICT);
        assert_eq!(status_for(ErrorCode::DuplicateReview), StatusCode::CONFLICT);
        assert_eq!(status_for(ErrorCode::InvalidToken), StatusCode::UNAUTHORIZED);
        assert_eq!(status_for(ErrorCode::Forbidden), StatusCode::FORBIDDEN);
        assert_eq!(status_for(ErrorCode::StorageError), StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn success_envelope_carries_numeric_status_and_data() {
        let response = ApiResponse::created("Registered", serde_json::json!({"id": 1})).into_response();
        assert_eq!(response.status(), StatusCode::CREATED);

        let body = body_json(response).await;
        assert_eq!(body["status"], 201);
        assert_eq!(body["message"], "Registered");
        assert_eq!(body["data"]["id"], 1);
        assert!(body.get("detail").is_none());
    }

    #[tokio::test]
    async fn validation_error_lists_fields() {
        let report = ValidationReport::single("quantity", "Quantity must be between 1 and 5");
        let response = ApiError::from(RegistrationError::Validation(report)).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["status"], 400);
        assert_eq!(body["detail"][0]["field"], "quantity");
        assert!(body.get("data").is_none());
    }

    #[tokio::test]
    async fn insufficient_seats_is_conflict() {
        let err = RegistrationError::insufficient_seats(Some(2), 3);
        let response = ApiError::from(err).into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let body = body_json(response).await;
        assert_eq!(body["detail"], "INSUFFICIENT_SEATS");
    }

    #[tokio::test]
    async fn infrastructure_message_is_hidden() {
        let err = RegistrationError::infrastructure("connection refused on 10.0.0.3");
        let response = ApiError::from(err).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert!(!body["message"].as_str().unwrap().contains("10.0.0.3"));
    }

    #[test]
    fn not_found_variants_map_to_404() {
        let event = ApiError::from(EventError::not_found(EventId::new()));
        let registration =
            ApiError::from(RegistrationError::registration_not_found(RegistrationId::new()));
        let user = ApiError::from(AuthError::UserNotFound(UserId::new()));
        for err in [event, registration, user] {
            assert_eq!(err.status(), StatusCode::NOT_FOUND);
        }
    }

    #[test]
    fn bad_credentials_are_unauthorized() {
        let err = ApiError::from(AuthError::InvalidCredentials);
        assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(err.message(), "Invalid Credentials");
    }
}
