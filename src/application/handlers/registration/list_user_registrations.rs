//! ListUserRegistrationsHandler - Query handler for a user's tickets.

use std::sync::Arc;

use crate::domain::foundation::{authorize_ownership, Principal, UserId};
use crate::domain::registration::RegistrationError;
use crate::ports::{RegistrationRepository, UserRegistration};

#[derive(Debug, Clone)]
pub struct ListUserRegistrationsQuery {
    pub principal: Principal,
    pub user_id: UserId,
}

/// Lists a user's registrations with payment and event summary.
/// Only the user themselves may list them.
pub struct ListUserRegistrationsHandler {
    registrations: Arc<dyn RegistrationRepository>,
}

impl ListUserRegistrationsHandler {
    pub fn new(registrations: Arc<dyn RegistrationRepository>) -> Self {
        Self { registrations }
    }

    pub async fn handle(
        &self,
        query: ListUserRegistrationsQuery,
    ) -> Result<Vec<UserRegistration>, RegistrationError> {
        let access = authorize_ownership(&query.principal, &query.user_id);
        if !access.is_granted() {
            tracing::warn!(
                caller = %query.principal.id,
                resource = %access.resource,
                "Registration listing denied"
            );
        }
        access.into_result()?;

        Ok(self.registrations.list_for_user(&query.user_id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryStore;
    use crate::application::handlers::test_support::{seed_event, seed_registration};
    use crate::domain::foundation::{ErrorCode, Role};

    #[tokio::test]
    async fn owner_sees_registrations_with_payment_and_event() {
        let store = Arc::new(InMemoryStore::new());
        let event = seed_event(&store, 100, 10).await;
        let owner = Principal::new(UserId::new(), Role::User);
        seed_registration(&store, owner.id, &event, 2).await;
        seed_registration(&store, UserId::new(), &event, 1).await;

        let list = ListUserRegistrationsHandler::new(store.clone())
            .handle(ListUserRegistrationsQuery {
                principal: owner,
                user_id: owner.id,
            })
            .await
            .unwrap();

        assert_eq!(list.len(), 1);
        assert_eq!(list[0].event.id, event.id);
        assert!(list[0].payment.is_some());
    }

    #[tokio::test]
    async fn user_a_cannot_list_user_b() {
        let store = Arc::new(InMemoryStore::new());
        let a = Principal::new(UserId::new(), Role::User);
        let b = UserId::new();

        let err = ListUserRegistrationsHandler::new(store)
            .handle(ListUserRegistrationsQuery {
                principal: a,
                user_id: b,
            })
            .await
            .unwrap_err();

        assert_eq!(err.code(), ErrorCode::Forbidden);
    }
}
