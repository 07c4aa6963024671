use axum::http::StatusCode;
use axum::response::Response;
use serde::Serialize;
use uuid::Uuid;

use application::transfer::{EquipmentDto, ReturnDto};
use kernel::prelude::entity::{EquipmentCondition, EquipmentSource, EquipmentStatus};

use crate::controller::Exhaust;
use crate::response::{found, timestamp, CreatedResponse, ReturnResponse};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentResponse {
    id: Uuid,
    name: String,
    serial_number: String,
    manufacturing_date: String,
    expiry_date: String,
    status: EquipmentStatus,
    source: EquipmentSource,
    condition: EquipmentCondition,
    created_by: String,
    created_at: String,
}

impl From<EquipmentDto> for EquipmentResponse {
    fn from(value: EquipmentDto) -> Self {
        Self {
            id: value.id,
            name: value.name,
            serial_number: value.serial_number,
            manufacturing_date: value.manufacturing_date.to_string(),
            expiry_date: value.expiry_date.to_string(),
            status: value.status,
            source: value.source,
            condition: value.condition,
            created_by: value.created_by,
            created_at: timestamp(value.created_at),
        }
    }
}

pub struct EquipmentPresenter;

impl Exhaust<Uuid> for EquipmentPresenter {
    type To = CreatedResponse;
    fn emit(&self, input: Uuid) -> Self::To {
        CreatedResponse::new(input)
    }
}

impl Exhaust<()> for EquipmentPresenter {
    type To = StatusCode;
    fn emit(&self, _: ()) -> Self::To {
        StatusCode::NO_CONTENT
    }
}

impl Exhaust<Option<EquipmentDto>> for EquipmentPresenter {
    type To = Response;
    fn emit(&self, input: Option<EquipmentDto>) -> Self::To {
        found(input.map(EquipmentResponse::from))
    }
}

impl Exhaust<Vec<EquipmentDto>> for EquipmentPresenter {
    type To = axum::Json<Vec<EquipmentResponse>>;
    fn emit(&self, input: Vec<EquipmentDto>) -> Self::To {
        axum::Json(input.into_iter().map(EquipmentResponse::from).collect())
    }
}

/// Completed rentals of one unit.
impl Exhaust<Vec<ReturnDto>> for EquipmentPresenter {
    type To = axum::Json<Vec<ReturnResponse>>;
    fn emit(&self, input: Vec<ReturnDto>) -> Self::To {
        axum::Json(input.into_iter().map(ReturnResponse::from).collect())
    }
}
