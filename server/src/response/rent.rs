use serde::Serialize;
use uuid::Uuid;

use application::transfer::RentDto;
use kernel::prelude::entity::EquipmentCondition;

use crate::controller::Exhaust;
use crate::response::{timestamp, CreatedResponse};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RentResponse {
    id: Uuid,
    beneficiary_id: Uuid,
    beneficiary_name: String,
    equipment_id: Uuid,
    equipment_name: String,
    serial_number: String,
    condition_on_given: EquipmentCondition,
    rent_date: String,
    created_by: String,
    created_at: String,
}

impl From<RentDto> for RentResponse {
    fn from(value: RentDto) -> Self {
        Self {
            id: value.id,
            beneficiary_id: value.beneficiary_id,
            beneficiary_name: value.beneficiary_name,
            equipment_id: value.equipment_id,
            equipment_name: value.equipment_name,
            serial_number: value.serial_number,
            condition_on_given: value.condition_on_given,
            rent_date: value.rent_date.to_string(),
            created_by: value.created_by,
            created_at: timestamp(value.created_at),
        }
    }
}

pub struct RentPresenter;

impl Exhaust<Uuid> for RentPresenter {
    type To = CreatedResponse;
    fn emit(&self, input: Uuid) -> Self::To {
        CreatedResponse::new(input)
    }
}

impl Exhaust<Vec<RentDto>> for RentPresenter {
    type To = axum::Json<Vec<RentResponse>>;
    fn emit(&self, input: Vec<RentDto>) -> Self::To {
        axum::Json(input.into_iter().map(RentResponse::from).collect())
    }
}
