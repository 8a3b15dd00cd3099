//! Fakes and fixtures shared by handler tests.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::adapters::memory::InMemoryStore;
use crate::domain::account::{Email, PasswordHash, User, Username};
use crate::domain::event::{test_details, Event};
use crate::domain::foundation::{
    AuthError, DomainError, ErrorCode, EventId, PaymentId, Principal, RegistrationId, Role,
    Timestamp, UserId,
};
use crate::domain::registration::{Payment, Quantity, Registration};
use crate::ports::{
    EventRepository, ImageStorage, ImageUpload, IssuedToken, PasswordHasher,
    RegistrationRepository, TokenService, UserRepository,
};

// ════════════════════════════════════════════════════════════════════════════
// Fixtures
// ════════════════════════════════════════════════════════════════════════════

pub(crate) fn paid_event(price: i64, seats: u32) -> Event {
    let mut details = test_details(price);
    details.seat_quantity = seats;
    Event::create(EventId::new(), details, None)
}

pub(crate) async fn seed_event(store: &InMemoryStore, price: i64, seats: u32) -> Event {
    let event = paid_event(price, seats);
    EventRepository::create(store, &event).await.unwrap();
    event
}

pub(crate) async fn seed_past_event(store: &InMemoryStore) -> Event {
    let mut details = test_details(1_000);
    details.date = Timestamp::now().minus_days(1);
    let event = Event::create(EventId::new(), details, None);
    EventRepository::create(store, &event).await.unwrap();
    event
}

pub(crate) async fn seed_user(store: &InMemoryStore, email: &str, role: Role) -> User {
    let user = User::new(
        UserId::new(),
        Username::try_new("username", email.split('@').next().unwrap_or("user")).unwrap(),
        Username::try_new("fullname", "Test User").unwrap(),
        Email::try_new(email).unwrap(),
        PasswordHash::new(format!("hashed:{}", "secret1")),
        role,
    );
    UserRepository::create(store, &user).await.unwrap();
    user
}

/// Registers `user_id` for `quantity` seats at full price.
pub(crate) async fn seed_registration(
    store: &InMemoryStore,
    user_id: UserId,
    event: &Event,
    quantity: i64,
) -> (Registration, Payment) {
    let quantity = Quantity::try_new(quantity).unwrap();
    let registration = Registration::new(RegistrationId::new(), user_id, event.id, quantity);
    let payment = Payment::pending(
        PaymentId::new(),
        registration.id,
        event.price.times(quantity.value()),
    );
    RegistrationRepository::register(store, &registration, &payment)
        .await
        .unwrap();
    (registration, payment)
}

pub(crate) fn principal_of(user: &User) -> Principal {
    Principal::new(user.id, user.role)
}

// ════════════════════════════════════════════════════════════════════════════
// Fakes
// ════════════════════════════════════════════════════════════════════════════

/// Stores `hashed:<password>`; verification is a string compare.
pub(crate) struct FakeHasher;

#[async_trait]
impl PasswordHasher for FakeHasher {
    async fn hash(&self, password: &str) -> Result<PasswordHash, DomainError> {
        Ok(PasswordHash::new(format!("hashed:{}", password)))
    }

    async fn verify(&self, password: &str, hash: &PasswordHash) -> bool {
        hash.as_str() == format!("hashed:{}", password)
    }
}

/// Tokens of the form `access:<id>:<role>` and `refresh:<id>:<n>`.
/// Refresh tokens listed in `expired` fail verification.
#[derive(Default)]
pub(crate) struct FakeTokens {
    issued: AtomicUsize,
    pub expired: Mutex<Vec<String>>,
}

impl TokenService for FakeTokens {
    fn issue_access_token(&self, principal: &Principal) -> Result<IssuedToken, DomainError> {
        Ok(IssuedToken {
            token: format!("access:{}:{}", principal.id, principal.role),
            expires_at: Timestamp::now().plus_seconds(3600),
        })
    }

    fn issue_refresh_token(&self, user_id: &UserId) -> Result<IssuedToken, DomainError> {
        let n = self.issued.fetch_add(1, Ordering::SeqCst);
        Ok(IssuedToken {
            token: format!("refresh:{}:{}", user_id, n),
            expires_at: Timestamp::now().plus_days(7),
        })
    }

    fn verify_access_token(&self, token: &str) -> Result<Principal, AuthError> {
        let mut parts = token.split(':');
        match (parts.next(), parts.next(), parts.next()) {
            (Some("access"), Some(id), Some(role)) => Ok(Principal::new(
                id.parse().map_err(|_| AuthError::Unauthenticated)?,
                role.parse().map_err(|_| AuthError::Unauthenticated)?,
            )),
            _ => Err(AuthError::Unauthenticated),
        }
    }

    fn verify_refresh_token(&self, token: &str) -> Result<UserId, AuthError> {
        if self.expired.lock().unwrap().iter().any(|t| t == token) {
            return Err(AuthError::InvalidToken);
        }
        let mut parts = token.split(':');
        match (parts.next(), parts.next()) {
            (Some("refresh"), Some(id)) => id.parse().map_err(|_| AuthError::InvalidToken),
            _ => Err(AuthError::InvalidToken),
        }
    }
}

/// Records uploads; optionally fails every call.
#[derive(Default)]
pub(crate) struct MockImageStorage {
    pub uploads: Mutex<Vec<ImageUpload>>,
    pub fail: bool,
}

impl MockImageStorage {
    pub fn failing() -> Self {
        Self {
            uploads: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn upload_count(&self) -> usize {
        self.uploads.lock().unwrap().len()
    }
}

#[async_trait]
impl ImageStorage for MockImageStorage {
    async fn upload(&self, image: ImageUpload) -> Result<String, DomainError> {
        if self.fail {
            return Err(DomainError::new(ErrorCode::StorageError, "upload timed out"));
        }
        let url = format!("/uploads/{}", image.filename);
        self.uploads.lock().unwrap().push(image);
        Ok(url)
    }
}

/// Every call fails as the database would.
pub(crate) struct FailingEventRepository;

#[async_trait]
impl EventRepository for FailingEventRepository {
    async fn create(&self, _event: &Event) -> Result<(), DomainError> {
        Err(DomainError::database("connection refused"))
    }

    async fn revise(
        &self,
        _id: &EventId,
        _details: crate::domain::event::EventDetails,
        _image_url: Option<String>,
    ) -> Result<crate::ports::EventRevision, DomainError> {
        Err(DomainError::database("connection refused"))
    }

    async fn delete(&self, _id: &EventId) -> Result<(), DomainError> {
        Err(DomainError::database("connection refused"))
    }

    async fn find_by_id(&self, _id: &EventId) -> Result<Option<Event>, DomainError> {
        Err(DomainError::database("connection refused"))
    }

    async fn list(
        &self,
        _filter: &crate::domain::event::EventFilter,
    ) -> Result<Vec<Event>, DomainError> {
        Err(DomainError::database("connection refused"))
    }
}
