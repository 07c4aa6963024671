use time::OffsetDateTime;
use uuid::Uuid;

use kernel::prelude::entity::{DestructSession, Session};

/// Identity of the signed-in administrator, handed to every gated operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    pub token: Uuid,
    pub account_id: Uuid,
    pub email: String,
    pub expires_at: OffsetDateTime,
}

impl From<Session> for SessionContext {
    fn from(value: Session) -> Self {
        let DestructSession {
            token,
            account_id,
            email,
            expires_at,
        } = value.into_destruct();
        Self {
            token: token.into(),
            account_id: account_id.into(),
            email: email.into(),
            expires_at: expires_at.into(),
        }
    }
}

pub struct SignInDto {
    pub email: String,
    pub password: String,
}

pub struct SignOutDto {
    pub token: Uuid,
}

pub struct CurrentSessionDto {
    pub token: Uuid,
}

pub struct RegisterAccountDto {
    pub email: String,
    pub password: String,
}
