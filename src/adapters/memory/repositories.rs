//! Repository port implementations for `InMemoryStore`.

use async_trait::async_trait;

use super::{InMemoryStore, Tables};
use crate::domain::account::{Email, User};
use crate::domain::discount::Discount;
use crate::domain::event::{Event, EventDetails, EventFilter};
use crate::domain::foundation::{
    DiscountId, DomainError, ErrorCode, EventId, Percentage, RegistrationId, UserId,
};
use crate::domain::registration::{Payment, Registration};
use crate::domain::review::Review;
use crate::ports::{
    DiscountRepository, EventRepository, EventRevision, EventSummary, PaymentRecord, PaymentRepository,
    RegistrationRecord, RegistrationRepository, ReviewRepository, ReviewWithAuthor,
    UserRegistration, UserRepository,
};

fn event_not_found(id: &EventId) -> DomainError {
    DomainError::new(ErrorCode::EventNotFound, "Event not found").with_detail("event_id", id.to_string())
}

fn discount_not_found(id: &DiscountId) -> DomainError {
    DomainError::new(ErrorCode::DiscountNotFound, "Discount not found")
        .with_detail("discount_id", id.to_string())
}

impl Tables {
    fn event_mut(&mut self, id: &EventId) -> Option<&mut Event> {
        self.events.iter_mut().find(|e| &e.id == id)
    }

    fn reprice(&mut self, event_id: &EventId, pct: Option<Percentage>) -> Option<Event> {
        let event = self.event_mut(event_id)?;
        match pct {
            Some(pct) => event.apply_discount(pct),
            None => event.clear_discount(),
        }
        Some(event.clone())
    }

    fn summary(&self, event_id: &EventId) -> Option<EventSummary> {
        self.events.iter().find(|e| &e.id == event_id).map(|e| EventSummary {
            id: e.id,
            title: e.title.clone(),
            date: e.date,
            location: e.location.clone(),
        })
    }

    fn email_of(&self, user_id: &UserId) -> Option<String> {
        self.users
            .iter()
            .find(|u| &u.id == user_id)
            .map(|u| u.email.as_str().to_string())
    }

    fn title_of(&self, event_id: &EventId) -> Option<String> {
        self.events.iter().find(|e| &e.id == event_id).map(|e| e.title.clone())
    }
}

#[async_trait]
impl EventRepository for InMemoryStore {
    async fn create(&self, event: &Event) -> Result<(), DomainError> {
        self.tables.lock().await.events.push(event.clone());
        Ok(())
    }

    async fn revise(
        &self,
        id: &EventId,
        details: EventDetails,
        image_url: Option<String>,
    ) -> Result<EventRevision, DomainError> {
        let mut tables = self.tables.lock().await;
        let first_discount = tables
            .discounts
            .iter()
            .find(|d| &d.event_id == id)
            .map(|d| d.percentage);

        let event = tables.event_mut(id).ok_or_else(|| event_not_found(id))?;
        if image_url.is_some() {
            event.image_url = image_url;
        }
        let discounts_cleared = event.revise(details, first_discount);
        let event = event.clone();

        if discounts_cleared {
            tables.discounts.retain(|d| &d.event_id != id);
        }
        Ok(EventRevision {
            event,
            discounts_cleared,
        })
    }

    async fn delete(&self, id: &EventId) -> Result<(), DomainError> {
        let mut tables = self.tables.lock().await;
        if !tables.events.iter().any(|e| &e.id == id) {
            return Err(event_not_found(id));
        }

        let registration_ids: Vec<RegistrationId> = tables
            .registrations
            .iter()
            .filter(|r| &r.event_id == id)
            .map(|r| r.id)
            .collect();

        tables.reviews.retain(|r| !registration_ids.contains(&r.registration_id));
        tables.payments.retain(|p| !registration_ids.contains(&p.registration_id));
        tables.registrations.retain(|r| &r.event_id != id);
        tables.discounts.retain(|d| &d.event_id != id);
        tables.events.retain(|e| &e.id != id);
        Ok(())
    }

    async fn find_by_id(&self, id: &EventId) -> Result<Option<Event>, DomainError> {
        let tables = self.tables.lock().await;
        Ok(tables.events.iter().find(|e| &e.id == id).cloned())
    }

    async fn list(&self, filter: &EventFilter) -> Result<Vec<Event>, DomainError> {
        let tables = self.tables.lock().await;
        let mut events: Vec<Event> = tables.events.iter().filter(|e| filter.matches(e)).cloned().collect();
        events.sort_by_key(|e| e.date);
        Ok(events)
    }
}

#[async_trait]
impl DiscountRepository for InMemoryStore {
    async fn apply(&self, discount: &Discount) -> Result<Event, DomainError> {
        let mut tables = self.tables.lock().await;
        if tables.event_mut(&discount.event_id).is_none() {
            return Err(event_not_found(&discount.event_id));
        }
        tables.discounts.push(discount.clone());
        tables
            .reprice(&discount.event_id, Some(discount.percentage))
            .ok_or_else(|| event_not_found(&discount.event_id))
    }

    async fn amend(&self, discount: &Discount) -> Result<Event, DomainError> {
        let mut tables = self.tables.lock().await;
        let stored = tables
            .discounts
            .iter_mut()
            .find(|d| d.id == discount.id)
            .ok_or_else(|| discount_not_found(&discount.id))?;
        stored.amend(discount.percentage, discount.window);
        let event_id = stored.event_id;
        tables
            .reprice(&event_id, Some(discount.percentage))
            .ok_or_else(|| discount_not_found(&discount.id))
    }

    async fn remove(&self, id: &DiscountId) -> Result<Event, DomainError> {
        let mut tables = self.tables.lock().await;
        let position = tables
            .discounts
            .iter()
            .position(|d| &d.id == id)
            .ok_or_else(|| discount_not_found(id))?;
        let removed = tables.discounts.remove(position);
        tables
            .reprice(&removed.event_id, None)
            .ok_or_else(|| discount_not_found(id))
    }

    async fn find_by_id(&self, id: &DiscountId) -> Result<Option<Discount>, DomainError> {
        let tables = self.tables.lock().await;
        Ok(tables.discounts.iter().find(|d| &d.id == id).cloned())
    }

    async fn list_for_event(&self, event_id: &EventId) -> Result<Vec<Discount>, DomainError> {
        let tables = self.tables.lock().await;
        Ok(tables
            .discounts
            .iter()
            .filter(|d| &d.event_id == event_id)
            .cloned()
            .collect())
    }

    async fn list_all(&self) -> Result<Vec<Discount>, DomainError> {
        Ok(self.tables.lock().await.discounts.clone())
    }
}

#[async_trait]
impl RegistrationRepository for InMemoryStore {
    async fn register(
        &self,
        registration: &Registration,
        payment: &Payment,
    ) -> Result<u32, DomainError> {
        let mut tables = self.tables.lock().await;
        let event = tables
            .event_mut(&registration.event_id)
            .ok_or_else(|| event_not_found(&registration.event_id))?;
        event.claim_seats(registration.quantity.seats())?;
        let remaining = event.seat_quantity;

        tables.registrations.push(registration.clone());
        tables.payments.push(payment.clone());
        Ok(remaining)
    }

    async fn update(&self, registration: &Registration) -> Result<(), DomainError> {
        let mut tables = self.tables.lock().await;
        let stored = tables
            .registrations
            .iter_mut()
            .find(|r| r.id == registration.id)
            .ok_or_else(|| {
                DomainError::new(ErrorCode::RegistrationNotFound, "Registration not found")
                    .with_detail("registration_id", registration.id.to_string())
            })?;
        stored.status = registration.status;
        Ok(())
    }

    async fn find_by_id(&self, id: &RegistrationId) -> Result<Option<Registration>, DomainError> {
        let tables = self.tables.lock().await;
        Ok(tables.registrations.iter().find(|r| &r.id == id).cloned())
    }

    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<UserRegistration>, DomainError> {
        let tables = self.tables.lock().await;
        Ok(tables
            .registrations
            .iter()
            .rev()
            .filter(|r| &r.user_id == user_id)
            .filter_map(|r| {
                Some(UserRegistration {
                    registration: r.clone(),
                    payment: tables.payments.iter().find(|p| p.registration_id == r.id).cloned(),
                    event: tables.summary(&r.event_id)?,
                })
            })
            .collect())
    }

    async fn list_for_event(&self, event_id: &EventId) -> Result<Vec<Registration>, DomainError> {
        let tables = self.tables.lock().await;
        Ok(tables
            .registrations
            .iter()
            .filter(|r| &r.event_id == event_id)
            .cloned()
            .collect())
    }

    async fn list_all(&self) -> Result<Vec<RegistrationRecord>, DomainError> {
        let tables = self.tables.lock().await;
        Ok(tables
            .registrations
            .iter()
            .rev()
            .filter_map(|r| {
                Some(RegistrationRecord {
                    registration: r.clone(),
                    user_email: tables.email_of(&r.user_id)?,
                    event_title: tables.title_of(&r.event_id)?,
                })
            })
            .collect())
    }
}

#[async_trait]
impl PaymentRepository for InMemoryStore {
    async fn find_by_registration(
        &self,
        registration_id: &RegistrationId,
    ) -> Result<Option<Payment>, DomainError> {
        let tables = self.tables.lock().await;
        Ok(tables
            .payments
            .iter()
            .find(|p| &p.registration_id == registration_id)
            .cloned())
    }

    async fn update(&self, payment: &Payment) -> Result<(), DomainError> {
        let mut tables = self.tables.lock().await;
        let stored = tables
            .payments
            .iter_mut()
            .find(|p| p.id == payment.id)
            .ok_or_else(|| {
                DomainError::new(ErrorCode::PaymentNotFound, "Payment not found")
                    .with_detail("registration_id", payment.registration_id.to_string())
            })?;
        stored.status = payment.status;
        stored.method = payment.method;
        stored.payment_date = payment.payment_date;
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<PaymentRecord>, DomainError> {
        let tables = self.tables.lock().await;
        Ok(tables
            .payments
            .iter()
            .rev()
            .filter_map(|p| {
                let registration = tables
                    .registrations
                    .iter()
                    .find(|r| r.id == p.registration_id)?;
                Some(PaymentRecord {
                    payment: p.clone(),
                    registration: registration.clone(),
                    user_email: tables.email_of(&registration.user_id)?,
                    event_title: tables.title_of(&registration.event_id)?,
                })
            })
            .collect())
    }
}

#[async_trait]
impl ReviewRepository for InMemoryStore {
    async fn create(&self, review: &Review) -> Result<(), DomainError> {
        let mut tables = self.tables.lock().await;
        let duplicate = tables
            .reviews
            .iter()
            .any(|r| r.registration_id == review.registration_id && r.user_id == review.user_id);
        if duplicate {
            return Err(DomainError::new(
                ErrorCode::DuplicateReview,
                "You have already reviewed this event.",
            )
            .with_detail("registration_id", review.registration_id.to_string())
            .with_detail("user_id", review.user_id.to_string()));
        }
        tables.reviews.push(review.clone());
        Ok(())
    }

    async fn find_by_registration_and_user(
        &self,
        registration_id: &RegistrationId,
        user_id: &UserId,
    ) -> Result<Option<Review>, DomainError> {
        let tables = self.tables.lock().await;
        Ok(tables
            .reviews
            .iter()
            .find(|r| &r.registration_id == registration_id && &r.user_id == user_id)
            .cloned())
    }

    async fn list_for_event(&self, event_id: &EventId) -> Result<Vec<ReviewWithAuthor>, DomainError> {
        let tables = self.tables.lock().await;
        Ok(tables
            .reviews
            .iter()
            .rev()
            .filter(|rv| {
                tables
                    .registrations
                    .iter()
                    .any(|r| r.id == rv.registration_id && &r.event_id == event_id)
            })
            .filter_map(|rv| {
                let author = tables.users.iter().find(|u| u.id == rv.user_id)?;
                Some(ReviewWithAuthor {
                    review: rv.clone(),
                    username: author.username.as_str().to_string(),
                })
            })
            .collect())
    }

    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<Review>, DomainError> {
        let tables = self.tables.lock().await;
        Ok(tables
            .reviews
            .iter()
            .rev()
            .filter(|r| &r.user_id == user_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn create(&self, user: &User) -> Result<(), DomainError> {
        let mut tables = self.tables.lock().await;
        if tables.users.iter().any(|u| u.email == user.email) {
            return Err(DomainError::new(ErrorCode::EmailTaken, "Email already registered"));
        }
        tables.users.push(user.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        let tables = self.tables.lock().await;
        Ok(tables.users.iter().find(|u| &u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, DomainError> {
        let tables = self.tables.lock().await;
        Ok(tables.users.iter().find(|u| &u.email == email).cloned())
    }

    async fn set_refresh_token(&self, id: &UserId, token: Option<&str>) -> Result<(), DomainError> {
        let mut tables = self.tables.lock().await;
        let user = tables.users.iter_mut().find(|u| &u.id == id).ok_or_else(|| {
            DomainError::new(ErrorCode::UserNotFound, "User not found").with_detail("user_id", id.to_string())
        })?;
        user.refresh_token = token.map(str::to_string);
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<User>, DomainError> {
        Ok(self.tables.lock().await.users.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::account::{PasswordHash, Username};
    use crate::domain::discount::DiscountWindow;
    use crate::domain::event::test_details;
    use crate::domain::foundation::{Money, PaymentId, Rating, ReviewId, Role, Timestamp};
    use crate::domain::registration::Quantity;
    use crate::domain::review::ReviewComment;

    fn event(price: i64, seats: u32) -> Event {
        let mut details = test_details(price);
        details.seat_quantity = seats;
        Event::create(EventId::new(), details, None)
    }

    fn user(email: &str) -> User {
        User::new(
            UserId::new(),
            Username::try_new("username", "ana").unwrap(),
            Username::try_new("fullname", "Ana Lima").unwrap(),
            Email::try_new(email).unwrap(),
            PasswordHash::new("hash"),
            Role::User,
        )
    }

    fn registration(user_id: UserId, event_id: EventId, qty: i64) -> (Registration, Payment) {
        let registration =
            Registration::new(RegistrationId::new(), user_id, event_id, Quantity::try_new(qty).unwrap());
        let payment = Payment::pending(PaymentId::new(), registration.id, Money::from_minor(100));
        (registration, payment)
    }

    fn discount(event_id: EventId, pct: i64) -> Discount {
        let now = Timestamp::now();
        Discount::new(
            DiscountId::new(),
            event_id,
            Percentage::try_new(pct).unwrap(),
            DiscountWindow::new(now.minus_days(1), now.plus_days(1)).unwrap(),
        )
    }

    #[tokio::test]
    async fn register_claims_seats_and_stores_payment() {
        let store = InMemoryStore::new();
        let ev = event(100, 5);
        EventRepository::create(&store, &ev).await.unwrap();

        let (reg, pay) = registration(UserId::new(), ev.id, 3);
        let remaining = store.register(&reg, &pay).await.unwrap();

        assert_eq!(remaining, 2);
        assert_eq!(store.seats_left(&ev.id).await, Some(2));
        assert!(store.find_by_registration(&reg.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn register_rejects_oversubscription_without_side_effects() {
        let store = InMemoryStore::new();
        let ev = event(100, 2);
        EventRepository::create(&store, &ev).await.unwrap();

        let (reg, pay) = registration(UserId::new(), ev.id, 3);
        let err = store.register(&reg, &pay).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::InsufficientSeats);
        assert_eq!(store.seats_left(&ev.id).await, Some(2));
        assert_eq!(store.registration_count().await, 0);
    }

    #[tokio::test]
    async fn register_unknown_event_is_not_found() {
        let store = InMemoryStore::new();
        let (reg, pay) = registration(UserId::new(), EventId::new(), 1);
        let err = store.register(&reg, &pay).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::EventNotFound);
    }

    #[tokio::test]
    async fn discount_writes_reprice_event() {
        let store = InMemoryStore::new();
        let ev = event(10_000, 10);
        EventRepository::create(&store, &ev).await.unwrap();

        let mut d = discount(ev.id, 20);
        let updated = store.apply(&d).await.unwrap();
        assert_eq!(updated.discounted_price, Money::from_minor(8_000));

        d.amend(Percentage::try_new(50).unwrap(), d.window);
        let updated = store.amend(&d).await.unwrap();
        assert_eq!(updated.discounted_price, Money::from_minor(5_000));

        let updated = store.remove(&d.id).await.unwrap();
        assert!(updated.discounted_price.is_zero());
        assert!(DiscountRepository::find_by_id(&store, &d.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn discount_on_missing_event_is_rejected() {
        let store = InMemoryStore::new();
        let err = store.apply(&discount(EventId::new(), 10)).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::EventNotFound);

        let err = store.remove(&DiscountId::new()).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::DiscountNotFound);
    }

    #[tokio::test]
    async fn delete_event_cascades() {
        let store = InMemoryStore::new();
        let ev = event(100, 10);
        let u = user("ana@example.com");
        EventRepository::create(&store, &ev).await.unwrap();
        UserRepository::create(&store, &u).await.unwrap();
        store.apply(&discount(ev.id, 10)).await.unwrap();
        let (reg, pay) = registration(u.id, ev.id, 1);
        store.register(&reg, &pay).await.unwrap();
        let review = Review::new(
            ReviewId::new(),
            reg.id,
            u.id,
            Rating::try_new(5).unwrap(),
            ReviewComment::try_new("great").unwrap(),
        );
        ReviewRepository::create(&store, &review).await.unwrap();

        EventRepository::delete(&store, &ev.id).await.unwrap();

        assert!(EventRepository::find_by_id(&store, &ev.id).await.unwrap().is_none());
        assert!(RegistrationRepository::list_for_user(&store, &u.id).await.unwrap().is_empty());
        assert!(DiscountRepository::list_all(&store).await.unwrap().is_empty());
        assert!(PaymentRepository::list_all(&store).await.unwrap().is_empty());
        assert!(ReviewRepository::list_for_user(&store, &u.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn duplicate_review_is_rejected_by_store() {
        let store = InMemoryStore::new();
        let reg_id = RegistrationId::new();
        let user_id = UserId::new();
        let make = || {
            Review::new(
                ReviewId::new(),
                reg_id,
                user_id,
                Rating::try_new(4).unwrap(),
                ReviewComment::try_new("ok").unwrap(),
            )
        };
        ReviewRepository::create(&store, &make()).await.unwrap();
        let err = ReviewRepository::create(&store, &make()).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::DuplicateReview);
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected() {
        let store = InMemoryStore::new();
        UserRepository::create(&store, &user("ana@example.com")).await.unwrap();
        let err = UserRepository::create(&store, &user("ana@example.com")).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::EmailTaken);
    }

    #[tokio::test]
    async fn list_for_user_includes_payment_and_event() {
        let store = InMemoryStore::new();
        let ev = event(100, 10);
        let u = user("ana@example.com");
        EventRepository::create(&store, &ev).await.unwrap();
        UserRepository::create(&store, &u).await.unwrap();
        let (reg, pay) = registration(u.id, ev.id, 2);
        store.register(&reg, &pay).await.unwrap();

        let listed = RegistrationRepository::list_for_user(&store, &u.id).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].event.title, ev.title);
        assert_eq!(listed[0].payment.as_ref().map(|p| p.id), Some(pay.id));

        let records = RegistrationRepository::list_all(&store).await.unwrap();
        assert_eq!(records[0].user_email, "ana@example.com");
    }
}
