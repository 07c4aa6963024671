use serde::Deserialize;
use uuid::Uuid;

use application::transfer::{
    CreateEquipmentDto, DeleteEquipmentDto, EquipmentFieldsDto, GetAllEquipmentDto,
    GetEquipmentDto, GetEquipmentHistoryDto, SessionContext, UpdateEquipmentDto,
};
use kernel::prelude::entity::EquipmentStatus;
use kernel::KernelError;

use crate::controller::{Intake, TryIntake};
use crate::request::{
    parse_choice, parse_date, DeleteByIdRequest, GetByIdRequest, SearchRequest,
};

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EquipmentForm {
    name: String,
    serial_number: String,
    manufacturing_date: String,
    expiry_date: String,
    /// Administrator's choice; absent or empty means `Available`.
    status: Option<String>,
    source: String,
    condition: String,
}

#[derive(Debug)]
pub struct EquipmentHistoryRequest {
    id: Uuid,
}

impl EquipmentHistoryRequest {
    pub fn new(id: Uuid) -> Self {
        Self { id }
    }
}

pub struct EquipmentTransformer;

impl TryIntake<EquipmentForm> for EquipmentTransformer {
    type To = EquipmentFieldsDto;
    type Error = error_stack::Report<KernelError>;
    fn emit(&self, input: EquipmentForm) -> Result<Self::To, Self::Error> {
        let status = match input.status.as_deref() {
            Some(status) if !status.trim().is_empty() => parse_choice(status)?,
            _ => EquipmentStatus::Available,
        };
        Ok(EquipmentFieldsDto {
            name: input.name,
            serial_number: input.serial_number,
            manufacturing_date: parse_date("manufacturingDate", &input.manufacturing_date)?,
            expiry_date: parse_date("expiryDate", &input.expiry_date)?,
            status,
            source: parse_choice(&input.source)?,
            condition: parse_choice(&input.condition)?,
        })
    }
}

impl TryIntake<(SessionContext, EquipmentForm)> for EquipmentTransformer {
    type To = CreateEquipmentDto;
    type Error = error_stack::Report<KernelError>;
    fn emit(&self, (session, form): (SessionContext, EquipmentForm)) -> Result<Self::To, Self::Error> {
        Ok(CreateEquipmentDto {
            created_by: session.email,
            fields: TryIntake::<EquipmentForm>::emit(self, form)?,
        })
    }
}

impl TryIntake<(SessionContext, Uuid, EquipmentForm)> for EquipmentTransformer {
    type To = UpdateEquipmentDto;
    type Error = error_stack::Report<KernelError>;
    fn emit(
        &self,
        (session, id, form): (SessionContext, Uuid, EquipmentForm),
    ) -> Result<Self::To, Self::Error> {
        Ok(UpdateEquipmentDto {
            id,
            edited_by: session.email,
            fields: TryIntake::<EquipmentForm>::emit(self, form)?,
        })
    }
}

impl Intake<SearchRequest> for EquipmentTransformer {
    type To = GetAllEquipmentDto;
    fn emit(&self, input: SearchRequest) -> Self::To {
        GetAllEquipmentDto { query: input.query }
    }
}

impl Intake<GetByIdRequest> for EquipmentTransformer {
    type To = GetEquipmentDto;
    fn emit(&self, input: GetByIdRequest) -> Self::To {
        GetEquipmentDto { id: input.id }
    }
}

impl Intake<DeleteByIdRequest> for EquipmentTransformer {
    type To = DeleteEquipmentDto;
    fn emit(&self, input: DeleteByIdRequest) -> Self::To {
        DeleteEquipmentDto { id: input.id }
    }
}

impl Intake<EquipmentHistoryRequest> for EquipmentTransformer {
    type To = GetEquipmentHistoryDto;
    fn emit(&self, input: EquipmentHistoryRequest) -> Self::To {
        GetEquipmentHistoryDto {
            equipment_id: input.id,
        }
    }
}
