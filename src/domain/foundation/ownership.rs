//! Ownership trait for user-owned records.
//!
//! Registrations, payments (through their registration), reviews and the
//! account record itself all have exactly one owning user.

use super::{authorize_ownership, DomainError, Principal, UserId};

/// Trait for records that have a single owner.
pub trait OwnedByUser {
    /// Returns the ID of the user who owns this record.
    fn owner_id(&self) -> &UserId;

    /// Returns `true` if `user_id` matches `owner_id()`.
    fn is_owner(&self, user_id: &UserId) -> bool {
        self.owner_id() == user_id
    }

    /// Validates that the principal owns this record.
    ///
    /// Returns `Err(Forbidden)` otherwise.
    fn check_ownership(&self, principal: &Principal) -> Result<(), DomainError> {
        authorize_ownership(principal, self.owner_id()).into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{ErrorCode, Role};

    struct Ticket {
        holder: UserId,
    }

    impl OwnedByUser for Ticket {
        fn owner_id(&self) -> &UserId {
            &self.holder
        }
    }

    #[test]
    fn owner_passes_check() {
        let holder = UserId::new();
        let ticket = Ticket { holder };
        assert!(ticket.is_owner(&holder));
        assert!(ticket
            .check_ownership(&Principal::new(holder, Role::User))
            .is_ok());
    }

    #[test]
    fn stranger_is_forbidden() {
        let ticket = Ticket {
            holder: UserId::new(),
        };
        let err = ticket
            .check_ownership(&Principal::new(UserId::new(), Role::User))
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::Forbidden);
    }
}
