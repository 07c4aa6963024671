use time::{Date, OffsetDateTime};
use uuid::Uuid;

use kernel::prelude::entity::{DestructRent, EquipmentCondition, Rent};

#[derive(Debug, Clone)]
pub struct RentDto {
    pub id: Uuid,
    pub beneficiary_id: Uuid,
    pub beneficiary_name: String,
    pub equipment_id: Uuid,
    pub equipment_name: String,
    pub serial_number: String,
    pub condition_on_given: EquipmentCondition,
    pub rent_date: Date,
    pub created_by: String,
    pub created_at: OffsetDateTime,
}

impl From<Rent> for RentDto {
    fn from(value: Rent) -> Self {
        let DestructRent {
            id,
            beneficiary_id,
            beneficiary_name,
            equipment_id,
            equipment_name,
            serial_number,
            condition_on_given,
            rent_date,
            created_by,
            created_at,
        } = value.into_destruct();
        Self {
            id: id.into(),
            beneficiary_id: beneficiary_id.into(),
            beneficiary_name: beneficiary_name.into(),
            equipment_id: equipment_id.into(),
            equipment_name: equipment_name.into(),
            serial_number: serial_number.into(),
            condition_on_given,
            rent_date: rent_date.into(),
            created_by: created_by.into(),
            created_at: created_at.into(),
        }
    }
}

pub struct CreateRentDto {
    pub beneficiary_id: Uuid,
    pub equipment_id: Uuid,
    pub condition_on_given: EquipmentCondition,
    pub rent_date: Date,
    pub created_by: String,
}
