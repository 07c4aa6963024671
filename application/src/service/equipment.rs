use error_stack::Report;
use uuid::Uuid;

use kernel::interface::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use kernel::interface::query::{
    DependOnEquipmentQuery, DependOnRentQuery, EquipmentQuery, RentQuery,
};
use kernel::interface::update::{DependOnEquipmentModifier, EquipmentModifier};
use kernel::prelude::entity::{
    CreatedAt, CreatedBy, Equipment, EquipmentId, EquipmentName, EquipmentStatus, ExpiryDate,
    ManufacturingDate, SerialNumber,
};
use kernel::KernelError;

use crate::service::require;
use crate::transfer::{
    CreateEquipmentDto, DeleteEquipmentDto, EquipmentDto, EquipmentFieldsDto,
    GetAllEquipmentDto, GetEquipmentDto, UpdateEquipmentDto,
};

fn build_equipment(
    id: EquipmentId,
    fields: &EquipmentFieldsDto,
    created_by: CreatedBy,
) -> error_stack::Result<Equipment, KernelError> {
    if fields.expiry_date < fields.manufacturing_date {
        return Err(Report::new(KernelError::Validation)
            .attach_printable("Expiry date precedes manufacturing date"));
    }
    Ok(Equipment::new(
        id,
        EquipmentName::new(require("name", &fields.name)?),
        SerialNumber::new(require("serial number", &fields.serial_number)?),
        ManufacturingDate::new(fields.manufacturing_date),
        ExpiryDate::new(fields.expiry_date),
        fields.status,
        fields.source,
        fields.condition,
        created_by,
        CreatedAt::now(),
    ))
}

#[async_trait::async_trait]
pub trait GetEquipmentService:
    'static + Sync + Send + DependOnDatabaseConnection + DependOnEquipmentQuery
{
    async fn get_equipment(
        &self,
        dto: &GetEquipmentDto,
    ) -> error_stack::Result<Option<EquipmentDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let id = EquipmentId::new(dto.id);
        let found = self
            .equipment_query()
            .find_by_id(&mut connection, &id)
            .await?;

        Ok(found.map(EquipmentDto::from))
    }

    async fn get_all_equipment(
        &self,
        dto: &GetAllEquipmentDto,
    ) -> error_stack::Result<Vec<EquipmentDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let all = self.equipment_query().find_all(&mut connection).await?;
        let query = dto.query.as_deref().map(str::trim).unwrap_or_default();

        Ok(all
            .into_iter()
            .filter(|equipment| equipment.matches(query))
            .map(EquipmentDto::from)
            .collect())
    }

    /// Selection list for the rent form.
    async fn get_available_equipment(&self) -> error_stack::Result<Vec<EquipmentDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let available = self
            .equipment_query()
            .find_by_status(&mut connection, &EquipmentStatus::Available)
            .await?;

        Ok(available.into_iter().map(EquipmentDto::from).collect())
    }
}

impl<T> GetEquipmentService for T where T: DependOnDatabaseConnection + DependOnEquipmentQuery {}

#[async_trait::async_trait]
pub trait CreateEquipmentService:
    'static + Sync + Send + DependOnDatabaseConnection + DependOnEquipmentModifier
{
    async fn create_equipment(
        &self,
        dto: &CreateEquipmentDto,
    ) -> error_stack::Result<Uuid, KernelError> {
        let uuid = Uuid::new_v4();
        let created_by = CreatedBy::new(require("created by", &dto.created_by)?);
        let equipment = build_equipment(EquipmentId::new(uuid), &dto.fields, created_by)?;

        let mut connection = self.database_connection().transact().await?;
        self.equipment_modifier()
            .create(&mut connection, &equipment)
            .await?;
        connection.commit().await?;

        if equipment.status() != &EquipmentStatus::Available {
            tracing::warn!(equipment_id = %uuid, status = %equipment.status(), "Equipment registered without a rent");
        }
        tracing::info!(equipment_id = %uuid, "Equipment created");
        Ok(uuid)
    }
}

impl<T> CreateEquipmentService for T where
    T: DependOnDatabaseConnection + DependOnEquipmentModifier
{
}

#[async_trait::async_trait]
pub trait UpdateEquipmentService:
    'static
    + Sync
    + Send
    + DependOnDatabaseConnection
    + DependOnEquipmentQuery
    + DependOnRentQuery
    + DependOnEquipmentModifier
{
    /// Full-record edit, status included. The write only lands if no rent or return
    /// changed the status since it was read.
    async fn update_equipment(
        &self,
        dto: &UpdateEquipmentDto,
    ) -> error_stack::Result<(), KernelError> {
        let id = EquipmentId::new(dto.id);
        let edited_by = CreatedBy::new(require("edited by", &dto.edited_by)?);
        let equipment = build_equipment(id.clone(), &dto.fields, edited_by)?;

        let mut connection = self.database_connection().transact().await?;
        let stored = self
            .equipment_query()
            .find_by_id(&mut connection, &id)
            .await?
            .ok_or_else(|| {
                Report::new(KernelError::NotFound)
                    .attach_printable(format!("Equipment {} not found", dto.id))
            })?;

        let open = self
            .rent_query()
            .find_by_equipment_id(&mut connection, &id)
            .await?;
        let implied = if open.is_empty() {
            EquipmentStatus::Available
        } else {
            EquipmentStatus::Rented
        };
        if equipment.status() != &implied {
            tracing::warn!(
                equipment_id = %dto.id,
                status = %equipment.status(),
                open_rents = open.len(),
                "Equipment status set against its open rents"
            );
        }

        self.equipment_modifier()
            .update(&mut connection, &equipment, stored.status())
            .await?;
        connection.commit().await?;

        tracing::info!(equipment_id = %dto.id, "Equipment updated");
        Ok(())
    }
}

impl<T> UpdateEquipmentService for T where
    T: DependOnDatabaseConnection
        + DependOnEquipmentQuery
        + DependOnRentQuery
        + DependOnEquipmentModifier
{
}

#[async_trait::async_trait]
pub trait DeleteEquipmentService:
    'static + Sync + Send + DependOnDatabaseConnection + DependOnEquipmentModifier
{
    async fn delete_equipment(
        &self,
        dto: &DeleteEquipmentDto,
    ) -> error_stack::Result<(), KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let id = EquipmentId::new(dto.id);
        self.equipment_modifier()
            .delete(&mut connection, &id)
            .await?;
        connection.commit().await?;

        tracing::info!(equipment_id = %dto.id, "Equipment deleted");
        Ok(())
    }
}

impl<T> DeleteEquipmentService for T where
    T: DependOnDatabaseConnection + DependOnEquipmentModifier
{
}

#[cfg(test)]
mod test {
    use time::macros::date;

    use driver::database::InMemoryDatabase;
    use kernel::prelude::entity::{EquipmentCondition, EquipmentSource, EquipmentStatus};
    use kernel::KernelError;

    use crate::service::{
        CreateEquipmentService, GetEquipmentService, ReportService, UpdateEquipmentService,
    };
    use crate::transfer::{
        CreateEquipmentDto, EquipmentFieldsDto, GetAllEquipmentDto, GetEquipmentDto,
        InconsistencyDto, UpdateEquipmentDto,
    };

    fn fields(name: &str, serial: &str) -> EquipmentFieldsDto {
        EquipmentFieldsDto {
            name: name.to_string(),
            serial_number: serial.to_string(),
            manufacturing_date: date!(2022 - 01 - 01),
            expiry_date: date!(2032 - 01 - 01),
            status: EquipmentStatus::Available,
            source: EquipmentSource::Purchased,
            condition: EquipmentCondition::Ok,
        }
    }

    async fn create(db: &InMemoryDatabase, name: &str, serial: &str) -> uuid::Uuid {
        db.create_equipment(&CreateEquipmentDto {
            created_by: "admin@example.org".to_string(),
            fields: fields(name, serial),
        })
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn search_hits_name_or_serial_only() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new();
        create(&db, "Wheel Chair", "WC-1").await;
        create(&db, "Walking Stick", "WS-1").await;
        create(&db, "Bed", "WHE-77").await;

        let hits = db
            .get_all_equipment(&GetAllEquipmentDto {
                query: Some("whe".to_string()),
            })
            .await?;
        let names = hits.into_iter().map(|e| e.name).collect::<Vec<_>>();
        assert_eq!(names.len(), 2);
        assert!(names.contains(&"Wheel Chair".to_string()));
        assert!(names.contains(&"Bed".to_string()));

        let all = db
            .get_all_equipment(&GetAllEquipmentDto { query: None })
            .await?;
        assert_eq!(all.len(), 3);
        Ok(())
    }

    #[tokio::test]
    async fn admin_chosen_status_is_kept_and_reported() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new();
        let mut rented = fields("Oxygen Concentrator", "OC-1");
        rented.status = EquipmentStatus::Rented;
        let id = db
            .create_equipment(&CreateEquipmentDto {
                created_by: "admin@example.org".to_string(),
                fields: rented,
            })
            .await?;

        let stored = db.get_equipment(&GetEquipmentDto { id }).await?.unwrap();
        assert_eq!(stored.status, EquipmentStatus::Rented);
        assert!(db.get_available_equipment().await?.is_empty());
        assert_eq!(
            db.check_consistency().await?,
            vec![InconsistencyDto::RentedWithoutRent { equipment_id: id }]
        );
        Ok(())
    }

    #[tokio::test]
    async fn edit_writes_the_chosen_status_and_condition() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new();
        let id = create(&db, "Walker", "WK-1").await;

        let mut rented = fields("Walker", "WK-1");
        rented.status = EquipmentStatus::Rented;
        rented.condition = EquipmentCondition::UnOk;
        db.update_equipment(&UpdateEquipmentDto {
            id,
            edited_by: "other@example.org".to_string(),
            fields: rented,
        })
        .await?;
        let stored = db.get_equipment(&GetEquipmentDto { id }).await?.unwrap();
        assert_eq!(stored.status, EquipmentStatus::Rented);
        assert_eq!(stored.condition, EquipmentCondition::UnOk);
        assert_eq!(stored.created_by, "other@example.org");

        db.update_equipment(&UpdateEquipmentDto {
            id,
            edited_by: "admin@example.org".to_string(),
            fields: fields("Walker", "WK-1"),
        })
        .await?;
        assert_eq!(db.get_available_equipment().await?.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn editing_unknown_equipment_is_not_found() {
        let db = InMemoryDatabase::new();
        let error = db
            .update_equipment(&UpdateEquipmentDto {
                id: uuid::Uuid::new_v4(),
                edited_by: "admin@example.org".to_string(),
                fields: fields("Walker", "WK-1"),
            })
            .await
            .unwrap_err();
        assert!(matches!(error.current_context(), KernelError::NotFound));
    }

    #[tokio::test]
    async fn expiry_before_manufacture_is_rejected() {
        let db = InMemoryDatabase::new();
        let mut invalid = fields("Walker", "WK-1");
        invalid.expiry_date = date!(2020 - 01 - 01);
        let error = db
            .create_equipment(&CreateEquipmentDto {
                created_by: "admin@example.org".to_string(),
                fields: invalid,
            })
            .await
            .unwrap_err();
        assert!(matches!(error.current_context(), KernelError::Validation));
    }
}
