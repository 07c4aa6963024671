mod email;
mod id;
mod password;

pub use self::{email::*, id::*, password::*};
use crate::entity::common::CreatedAt;
use destructure::Destructure;
use vodca::References;

#[derive(Debug, Clone, Eq, PartialEq, References, Destructure)]
pub struct Account {
    id: AccountId,
    email: Email,
    password_hash: PasswordHash,
    disabled: bool,
    created_at: CreatedAt<Account>,
}

impl Account {
    pub fn new(
        id: AccountId,
        email: Email,
        password_hash: PasswordHash,
        disabled: bool,
        created_at: CreatedAt<Account>,
    ) -> Self {
        Self {
            id,
            email,
            password_hash,
            disabled,
            created_at,
        }
    }
}
