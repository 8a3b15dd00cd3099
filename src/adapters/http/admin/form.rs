//! Event form extractor.
//!
//! Event writes arrive either as `multipart/form-data` (with an optional
//! `image` part) or as a plain JSON body.

use async_trait::async_trait;
use axum::extract::{FromRequest, Multipart, Request};
use axum::http::header::CONTENT_TYPE;
use axum::Json;

use crate::domain::validation::{EventInput, ValidationReport};
use crate::ports::ImageUpload;

use super::super::response::ApiError;

/// Name of the multipart part carrying the poster.
pub const IMAGE_FIELD: &str = "image";

#[derive(Debug, Clone, Default)]
pub struct EventForm {
    pub input: EventInput,
    pub image: Option<ImageUpload>,
}

impl EventForm {
    async fn from_multipart(mut multipart: Multipart) -> Result<Self, ApiError> {
        let mut form = EventForm::default();
        let mut report = ValidationReport::new();

        while let Some(field) = multipart.next_field().await? {
            let name = field.name().unwrap_or_default().to_string();

            if name == IMAGE_FIELD {
                let filename = field.file_name().unwrap_or("upload").to_string();
                let content_type = field.content_type().map(str::to_string);
                let bytes = field.bytes().await?;
                if !bytes.is_empty() {
                    form.image = Some(ImageUpload {
                        filename,
                        content_type,
                        bytes: bytes.to_vec(),
                    });
                }
                continue;
            }

            let value = field.text().await?;
            form.set(&name, value, &mut report);
        }

        report.into_result()?;
        Ok(form)
    }

    fn set(&mut self, name: &str, value: String, report: &mut ValidationReport) {
        let input = &mut self.input;
        match name {
            "title" | "event_title" => input.title = value,
            "description" => input.description = value,
            "category" => input.category = value,
            "date" => input.date = value,
            "time" => input.time = value,
            "location" => input.location = value,
            "price" => {
                if let Some(n) = parse_number(name, &value, report) {
                    input.price = n;
                }
            }
            "discounted_price" => {
                if !value.trim().is_empty() {
                    input.discounted_price = parse_number(name, &value, report);
                }
            }
            "seat_quantity" => {
                if let Some(n) = parse_number(name, &value, report) {
                    input.seat_quantity = n;
                }
            }
            other => tracing::debug!(field = other, "ignoring unknown event form field"),
        }
    }
}

fn parse_number(field: &str, value: &str, report: &mut ValidationReport) -> Option<i64> {
    match value.trim().parse::<i64>() {
        Ok(n) => Some(n),
        Err(_) => {
            report.add(field, "Must be a whole number");
            None
        }
    }
}

fn is_multipart(req: &Request) -> bool {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map_or(false, |ct| ct.starts_with("multipart/form-data"))
}

#[async_trait]
impl<S> FromRequest<S> for EventForm
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if is_multipart(&req) {
            let multipart = Multipart::from_request(req, state)
                .await
                .map_err(|e| ApiError::bad_request(e.body_text()))?;
            return Self::from_multipart(multipart).await;
        }

        let Json(input) = Json::<EventInput>::from_request(req, state).await?;
        Ok(EventForm { input, image: None })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    const BOUNDARY: &str = "X-EVENT-FORM";

    fn multipart_request(parts: &[(&str, Option<&str>, &str)]) -> Request {
        let mut body = String::new();
        for (name, filename, value) in parts {
            body.push_str(&format!("--{}\r\n", BOUNDARY));
            match filename {
                Some(f) => body.push_str(&format!(
                    "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: image/png\r\n\r\n",
                    name, f
                )),
                None => body.push_str(&format!(
                    "Content-Disposition: form-data; name=\"{}\"\r\n\r\n",
                    name
                )),
            }
            body.push_str(value);
            body.push_str("\r\n");
        }
        body.push_str(&format!("--{}--\r\n", BOUNDARY));

        axum::http::Request::builder()
            .method("POST")
            .uri("/events")
            .header(
                CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", BOUNDARY),
            )
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn multipart_fields_and_image_are_read() {
        let req = multipart_request(&[
            ("title", None, "RustConf"),
            ("price", None, "12000"),
            ("seat_quantity", None, "40"),
            ("image", Some("poster.png"), "PNGDATA"),
        ]);

        let form = EventForm::from_request(req, &()).await.unwrap();
        assert_eq!(form.input.title, "RustConf");
        assert_eq!(form.input.price, 12_000);
        assert_eq!(form.input.seat_quantity, 40);

        let image = form.image.unwrap();
        assert_eq!(image.filename, "poster.png");
        assert_eq!(image.content_type.as_deref(), Some("image/png"));
        assert_eq!(image.bytes, b"PNGDATA".to_vec());
    }

    #[tokio::test]
    async fn non_numeric_price_is_reported() {
        let req = multipart_request(&[("price", None, "twelve")]);
        let err = EventForm::from_request(req, &()).await.unwrap_err();
        assert_eq!(err.status(), axum::http::StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn json_body_is_accepted_without_image() {
        let req = axum::http::Request::builder()
            .method("PUT")
            .uri("/events/1")
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"title":"Meetup","price":0,"seat_quantity":10}"#))
            .unwrap();

        let form = EventForm::from_request(req, &()).await.unwrap();
        assert_eq!(form.input.title, "Meetup");
        assert!(form.image.is_none());
    }
}
