use time::{Date, OffsetDateTime};
use uuid::Uuid;

use kernel::prelude::entity::{DestructReturn, EquipmentCondition, Return};

#[derive(Debug, Clone)]
pub struct ReturnDto {
    pub id: Uuid,
    pub rent_id: Uuid,
    pub beneficiary_id: Uuid,
    pub beneficiary_name: String,
    pub equipment_id: Uuid,
    pub equipment_name: String,
    pub serial_number: String,
    pub condition_on_given: EquipmentCondition,
    pub condition_on_return: EquipmentCondition,
    pub rent_date: Date,
    pub return_date: Date,
    pub notes: Option<String>,
    pub created_by: String,
    pub created_at: OffsetDateTime,
}

impl From<Return> for ReturnDto {
    fn from(value: Return) -> Self {
        let DestructReturn {
            id,
            rent_id,
            beneficiary_id,
            beneficiary_name,
            equipment_id,
            equipment_name,
            serial_number,
            condition_on_given,
            condition_on_return,
            rent_date,
            return_date,
            notes,
            created_by,
            created_at,
        } = value.into_destruct();
        Self {
            id: id.into(),
            rent_id: rent_id.into(),
            beneficiary_id: beneficiary_id.into(),
            beneficiary_name: beneficiary_name.into(),
            equipment_id: equipment_id.into(),
            equipment_name: equipment_name.into(),
            serial_number: serial_number.into(),
            condition_on_given,
            condition_on_return,
            rent_date: rent_date.into(),
            return_date: return_date.into(),
            notes: notes.map(Into::into),
            created_by: created_by.into(),
            created_at: created_at.into(),
        }
    }
}

pub struct CreateReturnDto {
    pub rent_id: Uuid,
    pub condition_on_return: EquipmentCondition,
    pub return_date: Date,
    pub notes: Option<String>,
    pub created_by: String,
}

pub struct GetEquipmentHistoryDto {
    pub equipment_id: Uuid,
}
