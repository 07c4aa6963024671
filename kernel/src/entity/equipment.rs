mod date;
mod id;
mod name;
mod state;

pub use self::{date::*, id::*, name::*, state::*};
use crate::entity::common::{CreatedAt, CreatedBy};
use crate::KernelError;
use destructure::Destructure;
use vodca::References;

#[derive(Debug, Clone, Eq, PartialEq, References, Destructure)]
pub struct Equipment {
    id: EquipmentId,
    name: EquipmentName,
    serial_number: SerialNumber,
    manufacturing_date: ManufacturingDate,
    expiry_date: ExpiryDate,
    status: EquipmentStatus,
    source: EquipmentSource,
    condition: EquipmentCondition,
    created_by: CreatedBy,
    created_at: CreatedAt<Equipment>,
}

impl Equipment {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: EquipmentId,
        name: EquipmentName,
        serial_number: SerialNumber,
        manufacturing_date: ManufacturingDate,
        expiry_date: ExpiryDate,
        status: EquipmentStatus,
        source: EquipmentSource,
        condition: EquipmentCondition,
        created_by: CreatedBy,
        created_at: CreatedAt<Equipment>,
    ) -> Self {
        Self {
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
        }
    }

    /// Marks the unit as handed out. Fails unless it is currently `Available`.
    pub fn hand_out(&mut self) -> error_stack::Result<(), KernelError> {
        self.status = self.status.rent()?;
        Ok(())
    }

    /// Marks the unit as back in stock with the condition observed on return.
    /// Returns the status it had before.
    pub fn take_back(&mut self, condition: EquipmentCondition) -> EquipmentStatus {
        let previous = self.status;
        self.status = EquipmentStatus::Available;
        self.condition = condition;
        previous
    }

    pub fn is_available(&self) -> bool {
        self.status == EquipmentStatus::Available
    }

    /// Case-insensitive substring match on name or serial number.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.name.as_ref().to_lowercase().contains(&query)
            || self.serial_number.as_ref().to_lowercase().contains(&query)
    }
}

#[cfg(test)]
mod test {
    use time::macros::{date, datetime};
    use uuid::Uuid;

    use super::*;
    use crate::KernelError;

    fn wheel_chair() -> Equipment {
        Equipment::new(
            EquipmentId::new(Uuid::new_v4()),
            EquipmentName::new("Wheel Chair"),
            SerialNumber::new("WC-0042"),
            ManufacturingDate::new(date!(2022 - 03 - 01)),
            ExpiryDate::new(date!(2030 - 03 - 01)),
            EquipmentStatus::Available,
            EquipmentSource::Donated,
            EquipmentCondition::Ok,
            CreatedBy::new("admin@example.org"),
            CreatedAt::new(datetime!(2024-01-01 0:00 UTC)),
        )
    }

    #[test]
    fn rent_and_return_cycle() {
        let mut equipment = wheel_chair();
        equipment.hand_out().unwrap();
        assert_eq!(equipment.status(), &EquipmentStatus::Rented);

        let error = equipment.hand_out().unwrap_err();
        assert!(matches!(error.current_context(), KernelError::Conflict));

        let previous = equipment.take_back(EquipmentCondition::UnOk);
        assert_eq!(previous, EquipmentStatus::Rented);
        assert_eq!(equipment.status(), &EquipmentStatus::Available);
        assert_eq!(equipment.condition(), &EquipmentCondition::UnOk);
        assert!(equipment.is_available());
    }

    #[test]
    fn search_matches_name_or_serial() {
        let equipment = wheel_chair();
        assert!(equipment.matches("whe"));
        assert!(equipment.matches("wc-00"));
        assert!(!equipment.matches("bed"));
    }

    #[test]
    fn enum_labels_round_trip() {
        assert_eq!("UnOk".parse::<EquipmentCondition>().unwrap(), EquipmentCondition::UnOk);
        assert_eq!("Donated".parse::<EquipmentSource>().unwrap(), EquipmentSource::Donated);
        assert!("rented".parse::<EquipmentStatus>().is_err());
    }
}
