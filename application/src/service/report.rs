use std::collections::HashMap;

use kernel::interface::database::{DatabaseConnection, DependOnDatabaseConnection};
use kernel::interface::query::{
    BeneficiaryQuery, DependOnBeneficiaryQuery, DependOnEquipmentQuery, DependOnRentQuery,
    DependOnReturnQuery, EquipmentQuery, RentQuery, ReturnQuery,
};
use kernel::prelude::entity::{EquipmentId, EquipmentStatus, Rent};
use kernel::KernelError;

use crate::transfer::{InconsistencyDto, RentDto, ReportDto, ReturnDto, StatisticsDto};

#[async_trait::async_trait]
pub trait ReportService:
    'static
    + Sync
    + Send
    + DependOnDatabaseConnection
    + DependOnBeneficiaryQuery
    + DependOnEquipmentQuery
    + DependOnRentQuery
    + DependOnReturnQuery
{
    /// Dashboard counters plus the open rents and the return history.
    async fn get_report(&self) -> error_stack::Result<ReportDto, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let beneficiaries = self.beneficiary_query().find_all(&mut connection).await?;
        let equipment = self.equipment_query().find_all(&mut connection).await?;
        let rents = self.rent_query().find_all(&mut connection).await?;
        let returns = self.return_query().find_all(&mut connection).await?;

        let available = equipment.iter().filter(|e| e.is_available()).count();
        let statistics = StatisticsDto {
            total_beneficiaries: beneficiaries.len(),
            total_equipment: equipment.len(),
            active_rents: rents.len(),
            total_returns: returns.len(),
            available_equipment: available,
            rented_equipment: equipment.len() - available,
        };

        Ok(ReportDto {
            statistics,
            rents: rents.into_iter().map(RentDto::from).collect(),
            returns: returns.into_iter().map(ReturnDto::from).collect(),
        })
    }

    /// Cross-checks equipment status against the open rents. Read only.
    async fn check_consistency(&self) -> error_stack::Result<Vec<InconsistencyDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let equipment = self.equipment_query().find_all(&mut connection).await?;
        let rents = self.rent_query().find_all(&mut connection).await?;

        let mut by_equipment: HashMap<&EquipmentId, Vec<&Rent>> = HashMap::new();
        for rent in &rents {
            by_equipment.entry(rent.equipment_id()).or_default().push(rent);
        }

        let mut found = Vec::new();
        for unit in &equipment {
            let open = by_equipment.remove(unit.id()).unwrap_or_default();
            let equipment_id = *unit.id().as_ref();
            match (unit.status(), open.as_slice()) {
                (EquipmentStatus::Rented, []) => {
                    found.push(InconsistencyDto::RentedWithoutRent { equipment_id })
                }
                (EquipmentStatus::Available, open) => {
                    found.extend(open.iter().map(|rent| {
                        InconsistencyDto::RentOnAvailableEquipment {
                            rent_id: *rent.id().as_ref(),
                            equipment_id,
                        }
                    }))
                }
                _ => {}
            }
            if open.len() > 1 {
                found.push(InconsistencyDto::MultipleRents {
                    equipment_id,
                    rent_ids: open.iter().map(|rent| *rent.id().as_ref()).collect(),
                });
            }
        }

        // Whatever is left references equipment that no longer exists.
        let mut orphans = by_equipment.into_values().flatten().collect::<Vec<_>>();
        orphans.sort_by_key(|rent| *rent.created_at().as_ref());
        found.extend(
            orphans
                .into_iter()
                .map(|rent| InconsistencyDto::RentWithoutEquipment {
                    rent_id: *rent.id().as_ref(),
                    equipment_id: *rent.equipment_id().as_ref(),
                }),
        );

        if !found.is_empty() {
            tracing::warn!(count = found.len(), "Equipment and rents are out of sync");
        }
        Ok(found)
    }
}

impl<T> ReportService for T where
    T: DependOnDatabaseConnection
        + DependOnBeneficiaryQuery
        + DependOnEquipmentQuery
        + DependOnRentQuery
        + DependOnReturnQuery
{
}

#[cfg(test)]
mod test {
    use time::macros::date;

    use driver::database::InMemoryDatabase;
    use kernel::prelude::entity::EquipmentCondition;
    use kernel::KernelError;

    use crate::service::fixture::{beneficiary, equipment, rented, ADMIN};
    use crate::service::{DeleteEquipmentService, ReportService, ReturnEquipmentService};
    use crate::transfer::{CreateReturnDto, DeleteEquipmentDto, InconsistencyDto, StatisticsDto};

    #[tokio::test]
    async fn statistics_follow_the_lifecycle() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new();
        let (first, _) = rented(&db).await;
        rented(&db).await;
        beneficiary(&db, "Bilal").await;
        equipment(&db, "Crutches").await;

        db.return_equipment(&CreateReturnDto {
            rent_id: first,
            condition_on_return: EquipmentCondition::Ok,
            return_date: date!(2024 - 07 - 01),
            notes: None,
            created_by: ADMIN.to_string(),
        })
        .await?;

        let report = db.get_report().await?;
        assert_eq!(
            report.statistics,
            StatisticsDto {
                total_beneficiaries: 3,
                total_equipment: 3,
                active_rents: 1,
                total_returns: 1,
                available_equipment: 2,
                rented_equipment: 1,
            }
        );
        assert_eq!(report.rents.len(), 1);
        assert_eq!(report.returns[0].rent_id, first);
        Ok(())
    }

    #[tokio::test]
    async fn empty_store_reports_zeroes() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new();
        let report = db.get_report().await?;
        assert_eq!(report.statistics, StatisticsDto::default());
        assert!(db.check_consistency().await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn consistent_store_has_no_findings() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new();
        rented(&db).await;
        equipment(&db, "Walker").await;
        assert!(db.check_consistency().await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn rent_of_deleted_equipment_is_reported() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new();
        let (rent_id, equipment_id) = rented(&db).await;
        db.delete_equipment(&DeleteEquipmentDto { id: equipment_id })
            .await?;

        let found = db.check_consistency().await?;
        assert_eq!(
            found,
            vec![InconsistencyDto::RentWithoutEquipment {
                rent_id,
                equipment_id
            }]
        );
        Ok(())
    }
}
