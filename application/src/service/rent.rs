use error_stack::Report;
use uuid::Uuid;

use kernel::interface::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use kernel::interface::query::{
    BeneficiaryQuery, DependOnBeneficiaryQuery, DependOnEquipmentQuery, DependOnRentQuery,
    EquipmentQuery, RentQuery,
};
use kernel::interface::update::{
    DependOnEquipmentModifier, DependOnRentModifier, EquipmentModifier, RentModifier,
};
use kernel::prelude::entity::{
    BeneficiaryId, CreatedBy, EquipmentId, EquipmentStatus, Rent, RentDate, RentId,
};
use kernel::KernelError;

use crate::service::require;
use crate::transfer::{CreateRentDto, RentDto};

#[async_trait::async_trait]
pub trait GetRentService: 'static + Sync + Send + DependOnDatabaseConnection + DependOnRentQuery {
    /// Open rents, i.e. the selection list of the return form.
    async fn get_rents(&self) -> error_stack::Result<Vec<RentDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let rents = self.rent_query().find_all(&mut connection).await?;

        Ok(rents.into_iter().map(RentDto::from).collect())
    }
}

impl<T> GetRentService for T where T: DependOnDatabaseConnection + DependOnRentQuery {}

#[async_trait::async_trait]
pub trait RentEquipmentService:
    'static
    + Sync
    + Send
    + DependOnDatabaseConnection
    + DependOnBeneficiaryQuery
    + DependOnEquipmentQuery
    + DependOnEquipmentModifier
    + DependOnRentQuery
    + DependOnRentModifier
{
    /// Hands an `Available` unit out to a beneficiary.
    ///
    /// The rent record and the status change commit together. The status
    /// update is conditional on the unit still being `Available`, so a
    /// concurrent rental of the same unit fails instead of double-booking it.
    async fn rent_equipment(&self, dto: &CreateRentDto) -> error_stack::Result<Uuid, KernelError> {
        let created_by = CreatedBy::new(require("created by", &dto.created_by)?);
        let beneficiary_id = BeneficiaryId::new(dto.beneficiary_id);
        let equipment_id = EquipmentId::new(dto.equipment_id);

        let mut connection = self.database_connection().transact().await?;

        let beneficiary = self
            .beneficiary_query()
            .find_by_id(&mut connection, &beneficiary_id)
            .await?
            .ok_or_else(|| {
                Report::new(KernelError::NotFound)
                    .attach_printable(format!("Beneficiary {} not found", dto.beneficiary_id))
            })?;
        let mut equipment = self
            .equipment_query()
            .find_by_id(&mut connection, &equipment_id)
            .await?
            .ok_or_else(|| {
                Report::new(KernelError::NotFound)
                    .attach_printable(format!("Equipment {} not found", dto.equipment_id))
            })?;

        let open = self
            .rent_query()
            .find_by_equipment_id(&mut connection, &equipment_id)
            .await?;
        if !open.is_empty() {
            return Err(Report::new(KernelError::Conflict).attach_printable(format!(
                "Equipment {} already has an open rent",
                dto.equipment_id
            )));
        }
        equipment.hand_out()?;

        let uuid = Uuid::new_v4();
        let rent = Rent::open(
            RentId::new(uuid),
            &beneficiary,
            &equipment,
            dto.condition_on_given,
            RentDate::new(dto.rent_date),
            created_by,
        );
        self.rent_modifier().create(&mut connection, &rent).await?;
        self.equipment_modifier()
            .transition(&mut connection, &equipment, &EquipmentStatus::Available)
            .await?;
        connection.commit().await?;

        tracing::info!(
            rent_id = %uuid,
            equipment_id = %dto.equipment_id,
            beneficiary_id = %dto.beneficiary_id,
            "Equipment rented"
        );
        Ok(uuid)
    }
}

impl<T> RentEquipmentService for T where
    T: DependOnDatabaseConnection
        + DependOnBeneficiaryQuery
        + DependOnEquipmentQuery
        + DependOnEquipmentModifier
        + DependOnRentQuery
        + DependOnRentModifier
{
}
