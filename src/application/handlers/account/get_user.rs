//! GetUserHandler - Query handler for the caller's own account.

use std::sync::Arc;

use crate::domain::account::User;
use crate::domain::foundation::{authorize_ownership, AuthError, Principal, UserId};
use crate::ports::UserRepository;

#[derive(Debug, Clone)]
pub struct GetUserQuery {
    pub principal: Principal,
    pub user_id: UserId,
}

pub struct GetUserHandler {
    users: Arc<dyn UserRepository>,
}

impl GetUserHandler {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub async fn handle(&self, query: GetUserQuery) -> Result<User, AuthError> {
        authorize_ownership(&query.principal, &query.user_id).into_result()?;

        self.users
            .find_by_id(&query.user_id)
            .await?
            .ok_or(AuthError::UserNotFound(query.user_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryStore;
    use crate::application::handlers::test_support::{principal_of, seed_user};
    use crate::domain::foundation::{ErrorCode, Role};

    #[tokio::test]
    async fn owner_reads_own_account() {
        let store = Arc::new(InMemoryStore::new());
        let user = seed_user(&store, "ana@example.com", Role::User).await;

        let found = GetUserHandler::new(store)
            .handle(GetUserQuery {
                principal: principal_of(&user),
                user_id: user.id,
            })
            .await
            .unwrap();

        assert_eq!(found.email, user.email);
    }

    #[tokio::test]
    async fn other_account_is_forbidden() {
        let store = Arc::new(InMemoryStore::new());
        let a = seed_user(&store, "a@example.com", Role::User).await;
        let b = seed_user(&store, "b@example.com", Role::User).await;

        let err = GetUserHandler::new(store)
            .handle(GetUserQuery {
                principal: principal_of(&a),
                user_id: b.id,
            })
            .await
            .unwrap_err();

        assert_eq!(err.code(), ErrorCode::Forbidden);
    }

    #[tokio::test]
    async fn deleted_account_is_not_found() {
        let id = UserId::new();
        let err = GetUserHandler::new(Arc::new(InMemoryStore::new()))
            .handle(GetUserQuery {
                principal: Principal::new(id, Role::User),
                user_id: id,
            })
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::UserNotFound);
    }
}
