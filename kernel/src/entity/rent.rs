mod date;
mod id;

pub use self::{date::*, id::*};
use crate::entity::{
    Beneficiary, BeneficiaryId, BeneficiaryName, CreatedAt, CreatedBy, Equipment,
    EquipmentCondition, EquipmentId, EquipmentName, SerialNumber,
};
use destructure::Destructure;
use vodca::References;

/// An open rental. Beneficiary and equipment display fields are copies taken
/// when the rental was opened and are not refreshed afterwards.
#[derive(Debug, Clone, Eq, PartialEq, References, Destructure)]
pub struct Rent {
    id: RentId,
    beneficiary_id: BeneficiaryId,
    beneficiary_name: BeneficiaryName,
    equipment_id: EquipmentId,
    equipment_name: EquipmentName,
    serial_number: SerialNumber,
    condition_on_given: EquipmentCondition,
    rent_date: RentDate,
    created_by: CreatedBy,
    created_at: CreatedAt<Rent>,
}

impl Rent {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: RentId,
        beneficiary_id: BeneficiaryId,
        beneficiary_name: BeneficiaryName,
        equipment_id: EquipmentId,
        equipment_name: EquipmentName,
        serial_number: SerialNumber,
        condition_on_given: EquipmentCondition,
        rent_date: RentDate,
        created_by: CreatedBy,
        created_at: CreatedAt<Rent>,
    ) -> Self {
        Self {
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
        }
    }

    pub fn open(
        id: RentId,
        beneficiary: &Beneficiary,
        equipment: &Equipment,
        condition_on_given: EquipmentCondition,
        rent_date: RentDate,
        created_by: CreatedBy,
    ) -> Self {
        Self::new(
            id,
            beneficiary.id().clone(),
            beneficiary.name().clone(),
            equipment.id().clone(),
            equipment.name().clone(),
            equipment.serial_number().clone(),
            condition_on_given,
            rent_date,
            created_by,
            CreatedAt::now(),
        )
    }
}
