mod date;
mod id;

pub use self::{date::*, id::*};
use crate::entity::{
    BeneficiaryId, BeneficiaryName, CreatedAt, CreatedBy, DestructRent, EquipmentCondition,
    EquipmentId, EquipmentName, Notes, Rent, RentDate, RentId, SerialNumber,
};
use destructure::Destructure;
use vodca::References;

/// Permanent history entry written when a rental is closed.
#[derive(Debug, Clone, Eq, PartialEq, References, Destructure)]
pub struct Return {
    id: ReturnId,
    rent_id: RentId,
    beneficiary_id: BeneficiaryId,
    beneficiary_name: BeneficiaryName,
    equipment_id: EquipmentId,
    equipment_name: EquipmentName,
    serial_number: SerialNumber,
    condition_on_given: EquipmentCondition,
    condition_on_return: EquipmentCondition,
    rent_date: RentDate,
    return_date: ReturnDate,
    notes: Option<Notes>,
    created_by: CreatedBy,
    created_at: CreatedAt<Return>,
}

impl Return {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: ReturnId,
        rent_id: RentId,
        beneficiary_id: BeneficiaryId,
        beneficiary_name: BeneficiaryName,
        equipment_id: EquipmentId,
        equipment_name: EquipmentName,
        serial_number: SerialNumber,
        condition_on_given: EquipmentCondition,
        condition_on_return: EquipmentCondition,
        rent_date: RentDate,
        return_date: ReturnDate,
        notes: Option<Notes>,
        created_by: CreatedBy,
        created_at: CreatedAt<Return>,
    ) -> Self {
        Self {
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
        }
    }

    /// Copies every field of the closed rental.
    pub fn close(
        id: ReturnId,
        rent: Rent,
        condition_on_return: EquipmentCondition,
        return_date: ReturnDate,
        notes: Option<Notes>,
        created_by: CreatedBy,
    ) -> Self {
        let DestructRent {
            id: rent_id,
            beneficiary_id,
            beneficiary_name,
            equipment_id,
            equipment_name,
            serial_number,
            condition_on_given,
            rent_date,
            ..
        } = rent.into_destruct();
        Self::new(
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
            CreatedAt::now(),
        )
    }
}
