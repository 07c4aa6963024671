use axum::http::StatusCode;
use axum::response::Response;
use serde::Serialize;
use uuid::Uuid;

use application::transfer::BeneficiaryDto;
use kernel::prelude::entity::Gender;

use crate::controller::Exhaust;
use crate::response::{found, timestamp, CreatedResponse};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BeneficiaryResponse {
    id: Uuid,
    name: String,
    father_name: String,
    gender: Gender,
    date_of_birth: String,
    age: i32,
    address: String,
    contact: String,
    notes: Option<String>,
    created_by: String,
    created_at: String,
}

impl From<BeneficiaryDto> for BeneficiaryResponse {
    fn from(value: BeneficiaryDto) -> Self {
        Self {
            id: value.id,
            name: value.name,
            father_name: value.father_name,
            gender: value.gender,
            date_of_birth: value.date_of_birth.to_string(),
            age: value.age,
            address: value.address,
            contact: value.contact,
            notes: value.notes,
            created_by: value.created_by,
            created_at: timestamp(value.created_at),
        }
    }
}

pub struct BeneficiaryPresenter;

impl Exhaust<Uuid> for BeneficiaryPresenter {
    type To = CreatedResponse;
    fn emit(&self, input: Uuid) -> Self::To {
        CreatedResponse::new(input)
    }
}

impl Exhaust<()> for BeneficiaryPresenter {
    type To = StatusCode;
    fn emit(&self, _: ()) -> Self::To {
        StatusCode::NO_CONTENT
    }
}

impl Exhaust<Option<BeneficiaryDto>> for BeneficiaryPresenter {
    type To = Response;
    fn emit(&self, input: Option<BeneficiaryDto>) -> Self::To {
        found(input.map(BeneficiaryResponse::from))
    }
}

impl Exhaust<Vec<BeneficiaryDto>> for BeneficiaryPresenter {
    type To = axum::Json<Vec<BeneficiaryResponse>>;
    fn emit(&self, input: Vec<BeneficiaryDto>) -> Self::To {
        axum::Json(input.into_iter().map(BeneficiaryResponse::from).collect())
    }
}
