use serde::Deserialize;

use crate::domain::event::{Category, EventDetails};
use crate::domain::foundation::{Money, ValidationError};

use super::{parse_date, ValidationReport};

/// Largest accepted price, in minor units. Keeps every charge for the
/// maximum quantity well inside `i64`.
pub const MAX_PRICE: i64 = 1_000_000_000_000;

/// Seat counts are stored in a 32-bit signed column.
pub const MAX_SEATS: i64 = i32::MAX as i64;

/// Event fields as submitted by an admin.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventInput {
    #[serde(default, alias = "event_title")]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    /// Minor units. Zero or negative makes the event free.
    #[serde(default)]
    pub price: i64,
    #[serde(default)]
    pub discounted_price: Option<i64>,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub seat_quantity: i64,
}

fn required(report: &mut ValidationReport, field: &str, value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        report.push(ValidationError::empty_field(field));
        None
    } else {
        Some(trimmed.to_string())
    }
}

pub fn validate_event(input: &EventInput) -> Result<EventDetails, ValidationReport> {
    let mut report = ValidationReport::new();

    let title = required(&mut report, "title", &input.title);
    let description = required(&mut report, "description", &input.description);
    let category = report.check(input.category.parse::<Category>());
    let date = report.check(parse_date("date", &input.date));
    let time = required(&mut report, "time", &input.time);
    let location = required(&mut report, "location", &input.location);

    let seat_quantity = if input.seat_quantity <= 0 {
        report.add("seat_quantity", "Seat quantity must be greater than 0");
        None
    } else {
        report.check(
            u32::try_from(input.seat_quantity)
                .ok()
                .filter(|seats| i64::from(*seats) <= MAX_SEATS)
                .ok_or_else(|| {
                    ValidationError::out_of_range("seat_quantity", 1, MAX_SEATS, input.seat_quantity)
                }),
        )
    };

    let price = if input.price > MAX_PRICE {
        report.push(ValidationError::out_of_range("price", 0, MAX_PRICE, input.price));
        None
    } else {
        Some(Money::from_minor(input.price))
    };

    let discounted_price = match input.discounted_price {
        Some(v) if v > MAX_PRICE => {
            report.push(ValidationError::out_of_range("discounted_price", 0, MAX_PRICE, v));
            None
        }
        Some(v) => report
            .check(Money::try_non_negative("discounted_price", v))
            .map(Some),
        None => Some(None),
    };

    match (title, description, category, price, date, time, location, seat_quantity, discounted_price) {
        (
            Some(title),
            Some(description),
            Some(category),
            Some(price),
            Some(date),
            Some(time),
            Some(location),
            Some(seat_quantity),
            Some(discounted_price),
        ) if report.is_ok() => Ok(EventDetails {
            title,
            description,
            category,
            price,
            discounted_price,
            date,
            time,
            location,
            seat_quantity,
        }),
        _ => Err(report),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> EventInput {
        EventInput {
            title: "Jazz Night".to_string(),
            description: "Live jazz".to_string(),
            category: "MUSIC".to_string(),
            price: 15_000,
            discounted_price: None,
            date: "2030-01-15".to_string(),
            time: "20:00".to_string(),
            location: "Bandung".to_string(),
            seat_quantity: 40,
        }
    }

    #[test]
    fn valid_input_produces_details() {
        let details = validate_event(&input()).unwrap();
        assert_eq!(details.category, Category::Music);
        assert_eq!(details.seat_quantity, 40);
        assert_eq!(details.price, Money::from_minor(15_000));
    }

    #[test]
    fn negative_price_is_accepted_for_free_events() {
        let mut i = input();
        i.price = -1;
        assert!(validate_event(&i).is_ok());
    }

    #[test]
    fn reports_every_missing_field() {
        let report = validate_event(&EventInput::default()).unwrap_err();
        for field in ["title", "description", "category", "date", "time", "location", "seat_quantity"] {
            assert!(report.has_error_for(field), "missing error for {}", field);
        }
    }

    #[test]
    fn zero_seats_rejected() {
        let mut i = input();
        i.seat_quantity = 0;
        let report = validate_event(&i).unwrap_err();
        assert_eq!(report.errors().len(), 1);
        assert!(report.has_error_for("seat_quantity"));
    }

    #[test]
    fn seats_are_capped_at_the_column_range() {
        let mut i = input();
        i.seat_quantity = MAX_SEATS;
        assert_eq!(validate_event(&i).unwrap().seat_quantity, i32::MAX as u32);

        for seats in [MAX_SEATS + 1, 3_000_000_000, i64::MAX] {
            i.seat_quantity = seats;
            let report = validate_event(&i).unwrap_err();
            assert!(report.has_error_for("seat_quantity"), "accepted {}", seats);
        }
    }

    #[test]
    fn prices_above_the_ceiling_rejected() {
        let mut i = input();
        i.price = MAX_PRICE;
        assert!(validate_event(&i).is_ok());

        i.price = i64::MAX;
        assert!(validate_event(&i).unwrap_err().has_error_for("price"));

        i.price = 10_000;
        i.discounted_price = Some(MAX_PRICE + 1);
        assert!(validate_event(&i).unwrap_err().has_error_for("discounted_price"));
    }

    #[test]
    fn accepts_legacy_event_title_key() {
        let json = serde_json::json!({
            "event_title": "Derby", "description": "d", "category": "SPORTS",
            "date": "2030-01-01", "time": "15:00", "location": "Solo", "seat_quantity": 10
        });
        let i: EventInput = serde_json::from_value(json).unwrap();
        assert_eq!(validate_event(&i).unwrap().title, "Derby");
    }

    #[test]
    fn negative_discounted_price_rejected() {
        let mut i = input();
        i.discounted_price = Some(-10);
        assert!(validate_event(&i).unwrap_err().has_error_for("discounted_price"));
    }
}
