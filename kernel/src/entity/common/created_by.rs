use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

pub static PUBLIC_REGISTRATION: &str = "Public Registration";

/// Email of the administrator who wrote the record, or the public registration marker.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Fromln, AsRefln, Serialize, Deserialize)]
pub struct CreatedBy(String);

impl CreatedBy {
    pub fn new(by: impl Into<String>) -> Self {
        Self(by.into())
    }

    pub fn public_registration() -> Self {
        Self::new(PUBLIC_REGISTRATION)
    }
}
