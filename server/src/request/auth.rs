use serde::Deserialize;
use uuid::Uuid;

use application::transfer::{SignInDto, SignOutDto};

use crate::controller::Intake;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SignInForm {
    email: String,
    password: String,
}

#[derive(Debug)]
pub struct SignOutRequest {
    token: Uuid,
}

impl SignOutRequest {
    pub fn new(token: Uuid) -> Self {
        Self { token }
    }
}

pub struct AuthTransformer;

impl Intake<SignInForm> for AuthTransformer {
    type To = SignInDto;
    fn emit(&self, input: SignInForm) -> Self::To {
        SignInDto {
            email: input.email,
            password: input.password,
        }
    }
}

impl Intake<SignOutRequest> for AuthTransformer {
    type To = SignOutDto;
    fn emit(&self, input: SignOutRequest) -> Self::To {
        SignOutDto { token: input.token }
    }
}
