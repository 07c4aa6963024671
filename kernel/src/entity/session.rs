mod expiry;
mod token;

pub use self::{expiry::*, token::*};
use crate::entity::{AccountId, Email};
use destructure::Destructure;
use time::OffsetDateTime;
use vodca::References;

#[derive(Debug, Clone, Eq, PartialEq, References, Destructure)]
pub struct Session {
    token: SessionToken,
    account_id: AccountId,
    email: Email,
    expires_at: ExpiresAt,
}

impl Session {
    pub fn new(
        token: SessionToken,
        account_id: AccountId,
        email: Email,
        expires_at: ExpiresAt,
    ) -> Self {
        Self {
            token,
            account_id,
            email,
            expires_at,
        }
    }

    pub fn is_expired(&self, now: OffsetDateTime) -> bool {
        self.expires_at.as_ref() <= &now
    }
}
