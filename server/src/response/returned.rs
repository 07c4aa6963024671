use serde::Serialize;
use uuid::Uuid;

use application::transfer::ReturnDto;
use kernel::prelude::entity::EquipmentCondition;

use crate::controller::Exhaust;
use crate::response::{timestamp, CreatedResponse};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReturnResponse {
    id: Uuid,
    rent_id: Uuid,
    beneficiary_id: Uuid,
    beneficiary_name: String,
    equipment_id: Uuid,
    equipment_name: String,
    serial_number: String,
    condition_on_given: EquipmentCondition,
    condition_on_return: EquipmentCondition,
    rent_date: String,
    return_date: String,
    notes: Option<String>,
    created_by: String,
    created_at: String,
}

impl From<ReturnDto> for ReturnResponse {
    fn from(value: ReturnDto) -> Self {
        Self {
            id: value.id,
            rent_id: value.rent_id,
            beneficiary_id: value.beneficiary_id,
            beneficiary_name: value.beneficiary_name,
            equipment_id: value.equipment_id,
            equipment_name: value.equipment_name,
            serial_number: value.serial_number,
            condition_on_given: value.condition_on_given,
            condition_on_return: value.condition_on_return,
            rent_date: value.rent_date.to_string(),
            return_date: value.return_date.to_string(),
            notes: value.notes,
            created_by: value.created_by,
            created_at: timestamp(value.created_at),
        }
    }
}

pub struct ReturnPresenter;

impl Exhaust<Uuid> for ReturnPresenter {
    type To = CreatedResponse;
    fn emit(&self, input: Uuid) -> Self::To {
        CreatedResponse::new(input)
    }
}

impl Exhaust<Vec<ReturnDto>> for ReturnPresenter {
    type To = axum::Json<Vec<ReturnResponse>>;
    fn emit(&self, input: Vec<ReturnDto>) -> Self::To {
        axum::Json(input.into_iter().map(ReturnResponse::from).collect())
    }
}
