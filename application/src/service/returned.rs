use error_stack::Report;
use uuid::Uuid;

use kernel::interface::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use kernel::interface::query::{
    DependOnEquipmentQuery, DependOnRentQuery, DependOnReturnQuery, EquipmentQuery, RentQuery,
    ReturnQuery,
};
use kernel::interface::update::{
    DependOnEquipmentModifier, DependOnRentModifier, DependOnReturnModifier, EquipmentModifier,
    RentModifier, ReturnModifier,
};
use kernel::prelude::entity::{
    CreatedBy, EquipmentId, EquipmentStatus, Notes, RentId, Return, ReturnDate, ReturnId,
};
use kernel::KernelError;

use crate::service::require;
use crate::transfer::{CreateReturnDto, GetEquipmentHistoryDto, ReturnDto};

#[async_trait::async_trait]
pub trait GetReturnService:
    'static + Sync + Send + DependOnDatabaseConnection + DependOnReturnQuery
{
    async fn get_returns(&self) -> error_stack::Result<Vec<ReturnDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let returns = self.return_query().find_all(&mut connection).await?;

        Ok(returns.into_iter().map(ReturnDto::from).collect())
    }

    /// Completed rentals of one unit, oldest first.
    async fn get_equipment_history(
        &self,
        dto: &GetEquipmentHistoryDto,
    ) -> error_stack::Result<Vec<ReturnDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let equipment_id = EquipmentId::new(dto.equipment_id);
        let returns = self
            .return_query()
            .find_by_equipment_id(&mut connection, &equipment_id)
            .await?;

        Ok(returns.into_iter().map(ReturnDto::from).collect())
    }
}

impl<T> GetReturnService for T where T: DependOnDatabaseConnection + DependOnReturnQuery {}

#[async_trait::async_trait]
pub trait ReturnEquipmentService:
    'static
    + Sync
    + Send
    + DependOnDatabaseConnection
    + DependOnEquipmentQuery
    + DependOnEquipmentModifier
    + DependOnRentQuery
    + DependOnRentModifier
    + DependOnReturnModifier
{
    /// Closes an open rent.
    ///
    /// Writes the return record, puts the unit back in stock with the observed
    /// condition, then deletes the rent. All three commit together.
    async fn return_equipment(
        &self,
        dto: &CreateReturnDto,
    ) -> error_stack::Result<Uuid, KernelError> {
        let created_by = CreatedBy::new(require("created by", &dto.created_by)?);
        let rent_id = RentId::new(dto.rent_id);

        let mut connection = self.database_connection().transact().await?;

        let rent = self
            .rent_query()
            .find_by_id(&mut connection, &rent_id)
            .await?
            .ok_or_else(|| {
                Report::new(KernelError::NotFound)
                    .attach_printable(format!("Rent {} not found", dto.rent_id))
            })?;
        let equipment_id = rent.equipment_id().clone();

        let uuid = Uuid::new_v4();
        let returned = Return::close(
            ReturnId::new(uuid),
            rent,
            dto.condition_on_return,
            ReturnDate::new(dto.return_date),
            dto.notes.as_deref().and_then(Notes::optional),
            created_by,
        );
        self.return_modifier()
            .create(&mut connection, &returned)
            .await?;

        match self
            .equipment_query()
            .find_by_id(&mut connection, &equipment_id)
            .await?
        {
            Some(mut equipment) => {
                let previous = equipment.take_back(dto.condition_on_return);
                if previous != EquipmentStatus::Rented {
                    tracing::warn!(
                        equipment_id = %equipment_id.as_ref(),
                        status = %previous,
                        "Returned equipment was not marked Rented"
                    );
                }
                self.equipment_modifier()
                    .transition(&mut connection, &equipment, &previous)
                    .await?;
            }
            None => {
                tracing::warn!(
                    equipment_id = %equipment_id.as_ref(),
                    rent_id = %dto.rent_id,
                    "Equipment of returned rent no longer exists"
                );
            }
        }

        self.rent_modifier().delete(&mut connection, &rent_id).await?;
        connection.commit().await?;

        tracing::info!(return_id = %uuid, rent_id = %dto.rent_id, "Equipment returned");
        Ok(uuid)
    }
}

impl<T> ReturnEquipmentService for T where
    T: DependOnDatabaseConnection
        + DependOnEquipmentQuery
        + DependOnEquipmentModifier
        + DependOnRentQuery
        + DependOnRentModifier
        + DependOnReturnModifier
{
}

#[cfg(test)]
mod test {
    use error_stack::Report;
    use time::macros::date;

    use driver::database::{
        InMemoryDatabase, InMemoryEquipmentRepository, InMemoryRentRepository,
        InMemoryReturnRepository, MemoryConnection,
    };
    use kernel::interface::database::DatabaseConnection;
    use kernel::interface::query::{DependOnEquipmentQuery, DependOnRentQuery};
    use kernel::interface::update::{
        DependOnEquipmentModifier, DependOnRentModifier, DependOnReturnModifier, RentModifier,
    };
    use kernel::prelude::entity::{EquipmentCondition, EquipmentStatus, Rent, RentId};
    use kernel::KernelError;

    use crate::service::fixture::{rented, ADMIN};
    use crate::service::{
        DeleteEquipmentService, GetEquipmentService, GetRentService, GetReturnService,
        ReturnEquipmentService,
    };
    use crate::transfer::{
        CreateReturnDto, DeleteEquipmentDto, GetEquipmentDto, GetEquipmentHistoryDto,
    };

    fn return_request(rent_id: uuid::Uuid) -> CreateReturnDto {
        CreateReturnDto {
            rent_id,
            condition_on_return: EquipmentCondition::UnOk,
            return_date: date!(2024 - 06 - 01),
            notes: Some("wheel squeaks".to_string()),
            created_by: ADMIN.to_string(),
        }
    }

    #[tokio::test]
    async fn rent_then_return_restores_available() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new();
        let (rent_id, equipment_id) = rented(&db).await;

        db.return_equipment(&return_request(rent_id)).await?;

        let found = db
            .get_equipment(&GetEquipmentDto { id: equipment_id })
            .await?
            .unwrap();
        assert_eq!(found.status, EquipmentStatus::Available);
        assert_eq!(found.condition, EquipmentCondition::UnOk);
        assert!(db.get_rents().await?.is_empty());

        let history = db
            .get_equipment_history(&GetEquipmentHistoryDto { equipment_id })
            .await?;
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].rent_id, rent_id);
        assert_eq!(history[0].beneficiary_name, "Amina");
        assert_eq!(history[0].condition_on_given, EquipmentCondition::Ok);
        assert_eq!(history[0].rent_date, date!(2024 - 05 - 01));
        assert_eq!(history[0].notes.as_deref(), Some("wheel squeaks"));
        Ok(())
    }

    #[tokio::test]
    async fn closed_rent_cannot_be_returned_again() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new();
        let (rent_id, _) = rented(&db).await;
        db.return_equipment(&return_request(rent_id)).await?;

        let error = db
            .return_equipment(&return_request(rent_id))
            .await
            .unwrap_err();
        assert!(matches!(error.current_context(), KernelError::NotFound));
        assert_eq!(db.get_returns().await?.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn return_of_deleted_equipment_still_closes_rent() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new();
        let (rent_id, equipment_id) = rented(&db).await;
        db.delete_equipment(&DeleteEquipmentDto { id: equipment_id })
            .await?;

        db.return_equipment(&return_request(rent_id)).await?;
        assert!(db.get_rents().await?.is_empty());
        assert_eq!(db.get_returns().await?.len(), 1);
        Ok(())
    }

    struct BrokenRentModifier;

    #[async_trait::async_trait]
    impl RentModifier for BrokenRentModifier {
        type Transaction = MemoryConnection;

        async fn create(
            &self,
            _con: &mut MemoryConnection,
            _rent: &Rent,
        ) -> error_stack::Result<(), KernelError> {
            Err(Report::new(KernelError::Internal))
        }

        async fn delete(
            &self,
            _con: &mut MemoryConnection,
            _rent_id: &RentId,
        ) -> error_stack::Result<(), KernelError> {
            Err(Report::new(KernelError::Internal))
        }
    }

    /// Delegates to the in-memory store, except that deleting a rent always fails.
    struct FailingRentDelete(InMemoryDatabase);

    #[async_trait::async_trait]
    impl DatabaseConnection for FailingRentDelete {
        type Transaction = MemoryConnection;
        async fn transact(&self) -> error_stack::Result<MemoryConnection, KernelError> {
            self.0.transact().await
        }
    }

    impl DependOnEquipmentQuery for FailingRentDelete {
        type EquipmentQuery = InMemoryEquipmentRepository;
        fn equipment_query(&self) -> &Self::EquipmentQuery {
            self.0.equipment_query()
        }
    }

    impl DependOnEquipmentModifier for FailingRentDelete {
        type EquipmentModifier = InMemoryEquipmentRepository;
        fn equipment_modifier(&self) -> &Self::EquipmentModifier {
            self.0.equipment_modifier()
        }
    }

    impl DependOnRentQuery for FailingRentDelete {
        type RentQuery = InMemoryRentRepository;
        fn rent_query(&self) -> &Self::RentQuery {
            self.0.rent_query()
        }
    }

    impl DependOnRentModifier for FailingRentDelete {
        type RentModifier = BrokenRentModifier;
        fn rent_modifier(&self) -> &Self::RentModifier {
            &BrokenRentModifier
        }
    }

    impl DependOnReturnModifier for FailingRentDelete {
        type ReturnModifier = InMemoryReturnRepository;
        fn return_modifier(&self) -> &Self::ReturnModifier {
            self.0.return_modifier()
        }
    }

    #[tokio::test]
    async fn failing_step_leaves_store_unchanged() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new();
        let (rent_id, equipment_id) = rented(&db).await;

        let failing = FailingRentDelete(db.clone());
        let error = failing
            .return_equipment(&return_request(rent_id))
            .await
            .unwrap_err();
        assert!(matches!(error.current_context(), KernelError::Internal));

        assert_eq!(db.get_rents().await?.len(), 1);
        assert!(db.get_returns().await?.is_empty());
        let found = db
            .get_equipment(&GetEquipmentDto { id: equipment_id })
            .await?
            .unwrap();
        assert_eq!(found.status, EquipmentStatus::Rented);
        assert_eq!(found.condition, EquipmentCondition::Ok);
        Ok(())
    }
}
