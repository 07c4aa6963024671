use error_stack::Report;
use sqlx::PgConnection;
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use kernel::interface::query::EquipmentQuery;
use kernel::interface::update::EquipmentModifier;
use kernel::prelude::entity::{
    CreatedAt, CreatedBy, Equipment, EquipmentId, EquipmentName, EquipmentStatus, ExpiryDate,
    ManufacturingDate, SerialNumber,
};
use kernel::KernelError;

use crate::database::postgres::PostgresConnection;
use crate::error::ConvertError;

pub struct PostgresEquipmentRepository;

#[async_trait::async_trait]
impl EquipmentQuery for PostgresEquipmentRepository {
    type Transaction = PostgresConnection;

    async fn find_all(
        &self,
        con: &mut PostgresConnection,
    ) -> error_stack::Result<Vec<Equipment>, KernelError> {
        PgEquipmentInternal::find_all(con).await
    }

    async fn find_by_id(
        &self,
        con: &mut PostgresConnection,
        id: &EquipmentId,
    ) -> error_stack::Result<Option<Equipment>, KernelError> {
        PgEquipmentInternal::find_by_id(con, id).await
    }

    async fn find_by_status(
        &self,
        con: &mut PostgresConnection,
        status: &EquipmentStatus,
    ) -> error_stack::Result<Vec<Equipment>, KernelError> {
        PgEquipmentInternal::find_by_status(con, status).await
    }
}

#[async_trait::async_trait]
impl EquipmentModifier for PostgresEquipmentRepository {
    type Transaction = PostgresConnection;

    async fn create(
        &self,
        con: &mut PostgresConnection,
        equipment: &Equipment,
    ) -> error_stack::Result<(), KernelError> {
        PgEquipmentInternal::create(con, equipment).await
    }

    async fn update(
        &self,
        con: &mut PostgresConnection,
        equipment: &Equipment,
        expected: &EquipmentStatus,
    ) -> error_stack::Result<(), KernelError> {
        PgEquipmentInternal::update(con, equipment, expected).await
    }

    async fn transition(
        &self,
        con: &mut PostgresConnection,
        equipment: &Equipment,
        expected: &EquipmentStatus,
    ) -> error_stack::Result<(), KernelError> {
        PgEquipmentInternal::transition(con, equipment, expected).await
    }

    async fn delete(
        &self,
        con: &mut PostgresConnection,
        equipment_id: &EquipmentId,
    ) -> error_stack::Result<(), KernelError> {
        PgEquipmentInternal::delete(con, equipment_id).await
    }
}

#[derive(sqlx::FromRow)]
struct EquipmentRow {
    id: Uuid,
    name: String,
    serial_number: String,
    manufacturing_date: Date,
    expiry_date: Date,
    status: String,
    source: String,
    condition: String,
    created_by: String,
    created_at: OffsetDateTime,
}

impl TryFrom<EquipmentRow> for Equipment {
    type Error = Report<KernelError>;
    fn try_from(value: EquipmentRow) -> Result<Self, Self::Error> {
        Ok(Equipment::new(
            EquipmentId::new(value.id),
            EquipmentName::new(value.name),
            SerialNumber::new(value.serial_number),
            ManufacturingDate::new(value.manufacturing_date),
            ExpiryDate::new(value.expiry_date),
            value.status.parse()?,
            value.source.parse()?,
            value.condition.parse()?,
            CreatedBy::new(value.created_by),
            CreatedAt::new(value.created_at),
        ))
    }
}

pub(in crate::database) struct PgEquipmentInternal;

impl PgEquipmentInternal {
    async fn find_all(con: &mut PgConnection) -> error_stack::Result<Vec<Equipment>, KernelError> {
        let rows = sqlx::query_as::<_, EquipmentRow>(
            // language=postgresql
            r#"
            SELECT id, name, serial_number, manufacturing_date, expiry_date, status, source, condition, created_by, created_at
            FROM equipments
            ORDER BY created_at, id
            "#,
        )
        .fetch_all(con)
        .await
        .convert_error()?;
        rows.into_iter().map(Equipment::try_from).collect()
    }

    async fn find_by_id(
        con: &mut PgConnection,
        id: &EquipmentId,
    ) -> error_stack::Result<Option<Equipment>, KernelError> {
        let row = sqlx::query_as::<_, EquipmentRow>(
            // language=postgresql
            r#"
            SELECT id, name, serial_number, manufacturing_date, expiry_date, status, source, condition, created_by, created_at
            FROM equipments
            WHERE id = $1
            "#,
        )
        .bind(id.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        row.map(Equipment::try_from).transpose()
    }

    async fn find_by_status(
        con: &mut PgConnection,
        status: &EquipmentStatus,
    ) -> error_stack::Result<Vec<Equipment>, KernelError> {
        let rows = sqlx::query_as::<_, EquipmentRow>(
            // language=postgresql
            r#"
            SELECT id, name, serial_number, manufacturing_date, expiry_date, status, source, condition, created_by, created_at
            FROM equipments
            WHERE status = $1
            ORDER BY created_at, id
            "#,
        )
        .bind(status.as_str())
        .fetch_all(con)
        .await
        .convert_error()?;
        rows.into_iter().map(Equipment::try_from).collect()
    }

    async fn create(
        con: &mut PgConnection,
        equipment: &Equipment,
    ) -> error_stack::Result<(), KernelError> {
        sqlx::query(
            // language=postgresql
            r#"
            INSERT INTO equipments (id, name, serial_number, manufacturing_date, expiry_date, status, source, condition, created_by, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(equipment.id().as_ref())
        .bind(equipment.name().as_ref())
        .bind(equipment.serial_number().as_ref())
        .bind(equipment.manufacturing_date().as_ref())
        .bind(equipment.expiry_date().as_ref())
        .bind(equipment.status().as_str())
        .bind(equipment.source().as_str())
        .bind(equipment.condition().as_str())
        .bind(equipment.created_by().as_ref())
        .bind(equipment.created_at().as_ref())
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }

    async fn update(
        con: &mut PgConnection,
        equipment: &Equipment,
        expected: &EquipmentStatus,
    ) -> error_stack::Result<(), KernelError> {
        let result = sqlx::query(
            // language=postgresql
            r#"
            UPDATE equipments
            SET name = $2, serial_number = $3, manufacturing_date = $4, expiry_date = $5,
                status = $6, source = $7, condition = $8, created_by = $9, created_at = $10
            WHERE id = $1 AND status = $11
            "#,
        )
        .bind(equipment.id().as_ref())
        .bind(equipment.name().as_ref())
        .bind(equipment.serial_number().as_ref())
        .bind(equipment.manufacturing_date().as_ref())
        .bind(equipment.expiry_date().as_ref())
        .bind(equipment.status().as_str())
        .bind(equipment.source().as_str())
        .bind(equipment.condition().as_str())
        .bind(equipment.created_by().as_ref())
        .bind(equipment.created_at().as_ref())
        .bind(expected.as_str())
        .execute(con)
        .await
        .convert_error()?;
        if result.rows_affected() == 0 {
            return Err(Report::new(KernelError::Concurrency).attach_printable(format!(
                "Equipment {} is missing or no longer {}",
                equipment.id().as_ref(),
                expected
            )));
        }
        Ok(())
    }

    async fn transition(
        con: &mut PgConnection,
        equipment: &Equipment,
        expected: &EquipmentStatus,
    ) -> error_stack::Result<(), KernelError> {
        let result = sqlx::query(
            // language=postgresql
            r#"
            UPDATE equipments
            SET status = $2, condition = $3
            WHERE id = $1 AND status = $4
            "#,
        )
        .bind(equipment.id().as_ref())
        .bind(equipment.status().as_str())
        .bind(equipment.condition().as_str())
        .bind(expected.as_str())
        .execute(con)
        .await
        .convert_error()?;
        if result.rows_affected() == 0 {
            return Err(Report::new(KernelError::Concurrency).attach_printable(format!(
                "Equipment {} is no longer {}",
                equipment.id().as_ref(),
                expected
            )));
        }
        Ok(())
    }

    async fn delete(
        con: &mut PgConnection,
        equipment_id: &EquipmentId,
    ) -> error_stack::Result<(), KernelError> {
        sqlx::query(
            // language=postgresql
            r#"
            DELETE FROM equipments
            WHERE id = $1
            "#,
        )
        .bind(equipment_id.as_ref())
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use time::macros::date;
    use uuid::Uuid;

    use kernel::interface::database::DatabaseConnection;
    use kernel::interface::query::EquipmentQuery;
    use kernel::interface::update::EquipmentModifier;
    use kernel::prelude::entity::{
        CreatedAt, CreatedBy, Equipment, EquipmentCondition, EquipmentId, EquipmentName,
        EquipmentSource, EquipmentStatus, ExpiryDate, ManufacturingDate, SerialNumber,
    };
    use kernel::KernelError;

    use crate::database::postgres::{PostgresDatabase, PostgresEquipmentRepository};

    #[test_with::env(POSTGRES_TEST)]
    #[tokio::test]
    async fn test() -> error_stack::Result<(), KernelError> {
        let db = PostgresDatabase::new().await?;
        let mut con = db.transact().await?;
        let id = EquipmentId::new(Uuid::new_v4());
        let mut equipment = Equipment::new(
            id.clone(),
            EquipmentName::new("Walker"),
            SerialNumber::new(Uuid::new_v4().to_string()),
            ManufacturingDate::new(date!(2021 - 05 - 01)),
            ExpiryDate::new(date!(2031 - 05 - 01)),
            EquipmentStatus::Available,
            EquipmentSource::Purchased,
            EquipmentCondition::Ok,
            CreatedBy::new("admin@example.org"),
            CreatedAt::now(),
        );
        PostgresEquipmentRepository
            .create(&mut con, &equipment)
            .await?;

        let available = PostgresEquipmentRepository
            .find_by_status(&mut con, &EquipmentStatus::Available)
            .await?;
        assert!(available.iter().any(|found| found.id() == &id));

        equipment.hand_out()?;
        PostgresEquipmentRepository
            .transition(&mut con, &equipment, &EquipmentStatus::Available)
            .await?;
        let found = PostgresEquipmentRepository
            .find_by_id(&mut con, &id)
            .await?
            .map(|found| *found.status());
        assert_eq!(found, Some(EquipmentStatus::Rented));

        // second hand-out against a stale expectation loses
        let error = PostgresEquipmentRepository
            .transition(&mut con, &equipment, &EquipmentStatus::Available)
            .await
            .unwrap_err();
        assert!(matches!(error.current_context(), KernelError::Concurrency));

        let stale = equipment.clone().reconstruct(|fields| {
            fields.status = EquipmentStatus::Available;
        });
        let error = PostgresEquipmentRepository
            .update(&mut con, &stale, &EquipmentStatus::Available)
            .await
            .unwrap_err();
        assert!(matches!(error.current_context(), KernelError::Concurrency));
        PostgresEquipmentRepository
            .update(&mut con, &stale, &EquipmentStatus::Rented)
            .await?;

        PostgresEquipmentRepository.delete(&mut con, &id).await?;
        let found = PostgresEquipmentRepository.find_by_id(&mut con, &id).await?;
        assert!(found.is_none());
        Ok(())
    }
}
