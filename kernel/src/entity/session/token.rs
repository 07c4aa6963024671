use std::str::FromStr;

use error_stack::Report;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use vodca::{AsRefln, Fromln};

use crate::KernelError;

#[derive(Debug, Clone, Hash, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct SessionToken(Uuid);

impl SessionToken {
    pub fn new(token: impl Into<Uuid>) -> Self {
        Self(token.into())
    }

    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl FromStr for SessionToken {
    type Err = Report<KernelError>;
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(value)
            .map(Self)
            .map_err(|e| Report::from(e).change_context(KernelError::Validation))
    }
}
