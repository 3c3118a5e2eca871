use thiserror::Error;

use gemforge_core::UserId;

use crate::account::Account;

/// Authorization failure: the caller is authenticated but not permitted.
///
/// An unauthenticated caller never reaches these checks; resolving the
/// current account is the transport layer's job.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    #[error("forbidden: {0}")]
    Forbidden(&'static str),
}

/// Require the seller flag (listing creation, seller-scoped queries).
///
/// - No IO
/// - No panics
/// - Pure policy check
pub fn require_seller(account: &Account) -> Result<(), AuthzError> {
    if !account.is_seller() {
        return Err(AuthzError::Forbidden("seller account required"));
    }
    Ok(())
}

/// Authorize mutating (update/patch/delete) a listing: the caller must be a
/// seller **and** the listing's recorded owner.
pub fn authorize_mutation(account: &Account, owner: UserId) -> Result<(), AuthzError> {
    require_seller(account)?;
    if account.id != owner {
        return Err(AuthzError::Forbidden("listing belongs to another seller"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn account(is_seller: bool) -> Account {
        Account {
            id: UserId::new(),
            username: "pearl".to_string(),
            email: "pearl@example.com".to_string(),
            password_hash: "$2b$04$abcdefghijklmnopqrstuv".to_string(),
            is_seller,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn sellers_pass_the_seller_gate() {
        assert!(require_seller(&account(true)).is_ok());
    }

    #[test]
    fn non_sellers_fail_the_seller_gate() {
        let err = require_seller(&account(false)).unwrap_err();
        assert!(matches!(err, AuthzError::Forbidden(_)));
    }

    #[test]
    fn owner_may_mutate_own_listing() {
        let seller = account(true);
        assert!(authorize_mutation(&seller, seller.id).is_ok());
    }

    #[test]
    fn seller_may_not_mutate_another_sellers_listing() {
        let seller = account(true);
        let err = authorize_mutation(&seller, UserId::new()).unwrap_err();
        assert!(matches!(err, AuthzError::Forbidden(_)));
    }

    #[test]
    fn non_seller_owner_may_not_mutate() {
        // Seller flag was revoked while listings still exist: still forbidden.
        let account = account(false);
        let err = authorize_mutation(&account, account.id).unwrap_err();
        assert!(matches!(err, AuthzError::Forbidden(_)));
    }
}
