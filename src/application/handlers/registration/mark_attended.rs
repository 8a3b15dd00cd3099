//! MarkAttendedHandler - Command handler for recording attendance.

use std::sync::Arc;

use crate::domain::foundation::{ErrorCode, OwnedByUser, Principal, RegistrationId};
use crate::domain::registration::{Registration, RegistrationError};
use crate::domain::validation::ValidationReport;
use crate::ports::RegistrationRepository;

#[derive(Debug, Clone)]
pub struct MarkAttendedCommand {
    pub principal: Principal,
    pub registration_id: RegistrationId,
}

/// Moves a registration to ATTENDED. Payment state is not consulted.
pub struct MarkAttendedHandler {
    registrations: Arc<dyn RegistrationRepository>,
}

impl MarkAttendedHandler {
    pub fn new(registrations: Arc<dyn RegistrationRepository>) -> Self {
        Self { registrations }
    }

    pub async fn handle(&self, cmd: MarkAttendedCommand) -> Result<Registration, RegistrationError> {
        let mut registration = self
            .registrations
            .find_by_id(&cmd.registration_id)
            .await?
            .ok_or_else(|| RegistrationError::registration_not_found(cmd.registration_id))?;
        registration.check_ownership(&cmd.principal)?;

        registration
            .mark_attended()
            .map_err(ValidationReport::from)?;

        self.registrations
            .update(&registration)
            .await
            .map_err(|e| match e.code {
                ErrorCode::RegistrationNotFound => {
                    RegistrationError::registration_not_found(cmd.registration_id)
                }
                _ => e.into(),
            })?;

        tracing::info!(registration_id = %registration.id, "Attendance recorded");
        Ok(registration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryStore;
    use crate::application::handlers::test_support::{seed_event, seed_registration};
    use crate::domain::foundation::{Role, UserId};
    use crate::domain::registration::{PaymentStatus, RegistrationStatus};
    use crate::ports::PaymentRepository;

    #[tokio::test]
    async fn marks_attended_without_payment() {
        let store = Arc::new(InMemoryStore::new());
        let event = seed_event(&store, 100, 10).await;
        let owner = Principal::new(UserId::new(), Role::User);
        let (registration, _) = seed_registration(&store, owner.id, &event, 1).await;

        let updated = MarkAttendedHandler::new(store.clone())
            .handle(MarkAttendedCommand {
                principal: owner,
                registration_id: registration.id,
            })
            .await
            .unwrap();

        assert_eq!(updated.status, RegistrationStatus::Attended);
        let payment = store.find_by_registration(&registration.id).await.unwrap().unwrap();
        assert_eq!(payment.status, PaymentStatus::Pending);
    }

    #[tokio::test]
    async fn repeated_attendance_is_accepted() {
        let store = Arc::new(InMemoryStore::new());
        let event = seed_event(&store, 100, 10).await;
        let owner = Principal::new(UserId::new(), Role::User);
        let (registration, _) = seed_registration(&store, owner.id, &event, 1).await;
        let handler = MarkAttendedHandler::new(store.clone());
        let cmd = MarkAttendedCommand {
            principal: owner,
            registration_id: registration.id,
        };

        handler.handle(cmd.clone()).await.unwrap();
        let again = handler.handle(cmd).await.unwrap();

        assert_eq!(again.status, RegistrationStatus::Attended);
    }

    #[tokio::test]
    async fn stranger_is_forbidden() {
        let store = Arc::new(InMemoryStore::new());
        let event = seed_event(&store, 100, 10).await;
        let (registration, _) = seed_registration(&store, UserId::new(), &event, 1).await;

        let err = MarkAttendedHandler::new(store.clone())
            .handle(MarkAttendedCommand {
                principal: Principal::new(UserId::new(), Role::User),
                registration_id: registration.id,
            })
            .await
            .unwrap_err();

        assert_eq!(err.code(), ErrorCode::Forbidden);
    }

    #[tokio::test]
    async fn unknown_registration_is_not_found() {
        let id = RegistrationId::new();
        let err = MarkAttendedHandler::new(Arc::new(InMemoryStore::new()))
            .handle(MarkAttendedCommand {
                principal: Principal::new(UserId::new(), Role::User),
                registration_id: id,
            })
            .await
            .unwrap_err();
        assert_eq!(err, RegistrationError::RegistrationNotFound(id));
    }
}
