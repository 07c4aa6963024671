use time::{Date, OffsetDateTime};
use uuid::Uuid;

use kernel::prelude::entity::{
    DestructEquipment, Equipment, EquipmentCondition, EquipmentSource, EquipmentStatus,
};

#[derive(Debug, Clone)]
pub struct EquipmentDto {
    pub id: Uuid,
    pub name: String,
    pub serial_number: String,
    pub manufacturing_date: Date,
    pub expiry_date: Date,
    pub status: EquipmentStatus,
    pub source: EquipmentSource,
    pub condition: EquipmentCondition,
    pub created_by: String,
    pub created_at: OffsetDateTime,
}

impl From<Equipment> for EquipmentDto {
    fn from(value: Equipment) -> Self {
        let DestructEquipment {
            id,
            name,
            serial_number,
            manufacturing_date,
            expiry_date,
            status,
            source,
            condition,
            created_by,
            created_at,
        } = value.into_destruct();
        Self {
            id: id.into(),
            name: name.into(),
            serial_number: serial_number.into(),
            manufacturing_date: manufacturing_date.into(),
            expiry_date: expiry_date.into(),
            status,
            source,
            condition,
            created_by: created_by.into(),
            created_at: created_at.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct EquipmentFieldsDto {
    pub name: String,
    pub serial_number: String,
    pub manufacturing_date: Date,
    pub expiry_date: Date,
    pub status: EquipmentStatus,
    pub source: EquipmentSource,
    pub condition: EquipmentCondition,
}

pub struct GetEquipmentDto {
    pub id: Uuid,
}

pub struct GetAllEquipmentDto {
    pub query: Option<String>,
}

pub struct CreateEquipmentDto {
    pub created_by: String,
    pub fields: EquipmentFieldsDto,
}

pub struct UpdateEquipmentDto {
    pub id: Uuid,
    pub edited_by: String,
    pub fields: EquipmentFieldsDto,
}

pub struct DeleteEquipmentDto {
    pub id: Uuid,
}
