use uuid::Uuid;

use crate::transfer::{RentDto, ReturnDto};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatisticsDto {
    pub total_beneficiaries: usize,
    pub total_equipment: usize,
    pub active_rents: usize,
    pub total_returns: usize,
    pub available_equipment: usize,
    pub rented_equipment: usize,
}

#[derive(Debug, Clone)]
pub struct ReportDto {
    pub statistics: StatisticsDto,
    pub rents: Vec<RentDto>,
    pub returns: Vec<ReturnDto>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InconsistencyDto {
    /// Equipment marked `Rented` with no open rent.
    RentedWithoutRent { equipment_id: Uuid },
    /// Open rent whose equipment record no longer exists.
    RentWithoutEquipment { rent_id: Uuid, equipment_id: Uuid },
    /// Open rent whose equipment is marked `Available`.
    RentOnAvailableEquipment { rent_id: Uuid, equipment_id: Uuid },
    /// Equipment referenced by more than one open rent.
    MultipleRents { equipment_id: Uuid, rent_ids: Vec<Uuid> },
}
