use error_stack::Report;
use sqlx::PgConnection;
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use kernel::interface::query::RentQuery;
use kernel::interface::update::RentModifier;
use kernel::prelude::entity::{
    BeneficiaryId, BeneficiaryName, CreatedAt, CreatedBy, EquipmentId, EquipmentName, Rent,
    RentDate, RentId, SerialNumber,
};
use kernel::KernelError;

use crate::database::postgres::PostgresConnection;
use crate::error::ConvertError;

pub struct PostgresRentRepository;

#[async_trait::async_trait]
impl RentQuery for PostgresRentRepository {
    type Transaction = PostgresConnection;

    async fn find_all(
        &self,
        con: &mut PostgresConnection,
    ) -> error_stack::Result<Vec<Rent>, KernelError> {
        PgRentInternal::find_all(con).await
    }

    async fn find_by_id(
        &self,
        con: &mut PostgresConnection,
        id: &RentId,
    ) -> error_stack::Result<Option<Rent>, KernelError> {
        PgRentInternal::find_by_id(con, id).await
    }

    async fn find_by_equipment_id(
        &self,
        con: &mut PostgresConnection,
        equipment_id: &EquipmentId,
    ) -> error_stack::Result<Vec<Rent>, KernelError> {
        PgRentInternal::find_by_equipment_id(con, equipment_id).await
    }
}

#[async_trait::async_trait]
impl RentModifier for PostgresRentRepository {
    type Transaction = PostgresConnection;

    async fn create(
        &self,
        con: &mut PostgresConnection,
        rent: &Rent,
    ) -> error_stack::Result<(), KernelError> {
        PgRentInternal::create(con, rent).await
    }

    async fn delete(
        &self,
        con: &mut PostgresConnection,
        rent_id: &RentId,
    ) -> error_stack::Result<(), KernelError> {
        PgRentInternal::delete(con, rent_id).await
    }
}

#[derive(sqlx::FromRow)]
struct RentRow {
    id: Uuid,
    beneficiary_id: Uuid,
    beneficiary_name: String,
    equipment_id: Uuid,
    equipment_name: String,
    serial_number: String,
    condition_on_given: String,
    rent_date: Date,
    created_by: String,
    created_at: OffsetDateTime,
}

impl TryFrom<RentRow> for Rent {
    type Error = Report<KernelError>;
    fn try_from(value: RentRow) -> Result<Self, Self::Error> {
        Ok(Rent::new(
            RentId::new(value.id),
            BeneficiaryId::new(value.beneficiary_id),
            BeneficiaryName::new(value.beneficiary_name),
            EquipmentId::new(value.equipment_id),
            EquipmentName::new(value.equipment_name),
            SerialNumber::new(value.serial_number),
            value.condition_on_given.parse()?,
            RentDate::new(value.rent_date),
            CreatedBy::new(value.created_by),
            CreatedAt::new(value.created_at),
        ))
    }
}

pub(in crate::database) struct PgRentInternal;

impl PgRentInternal {
    async fn find_all(con: &mut PgConnection) -> error_stack::Result<Vec<Rent>, KernelError> {
        let rows = sqlx::query_as::<_, RentRow>(
            // language=postgresql
            r#"
            SELECT id, beneficiary_id, beneficiary_name, equipment_id, equipment_name, serial_number,
                   condition_on_given, rent_date, created_by, created_at
            FROM rents
            ORDER BY created_at, id
            "#,
        )
        .fetch_all(con)
        .await
        .convert_error()?;
        rows.into_iter().map(Rent::try_from).collect()
    }

    async fn find_by_id(
        con: &mut PgConnection,
        id: &RentId,
    ) -> error_stack::Result<Option<Rent>, KernelError> {
        let row = sqlx::query_as::<_, RentRow>(
            // language=postgresql
            r#"
            SELECT id, beneficiary_id, beneficiary_name, equipment_id, equipment_name, serial_number,
                   condition_on_given, rent_date, created_by, created_at
            FROM rents
            WHERE id = $1
            "#,
        )
        .bind(id.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        row.map(Rent::try_from).transpose()
    }

    async fn find_by_equipment_id(
        con: &mut PgConnection,
        equipment_id: &EquipmentId,
    ) -> error_stack::Result<Vec<Rent>, KernelError> {
        let rows = sqlx::query_as::<_, RentRow>(
            // language=postgresql
            r#"
            SELECT id, beneficiary_id, beneficiary_name, equipment_id, equipment_name, serial_number,
                   condition_on_given, rent_date, created_by, created_at
            FROM rents
            WHERE equipment_id = $1
            ORDER BY created_at, id
            "#,
        )
        .bind(equipment_id.as_ref())
        .fetch_all(con)
        .await
        .convert_error()?;
        rows.into_iter().map(Rent::try_from).collect()
    }

    async fn create(con: &mut PgConnection, rent: &Rent) -> error_stack::Result<(), KernelError> {
        sqlx::query(
            // language=postgresql
            r#"
            INSERT INTO rents (id, beneficiary_id, beneficiary_name, equipment_id, equipment_name, serial_number,
                               condition_on_given, rent_date, created_by, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(rent.id().as_ref())
        .bind(rent.beneficiary_id().as_ref())
        .bind(rent.beneficiary_name().as_ref())
        .bind(rent.equipment_id().as_ref())
        .bind(rent.equipment_name().as_ref())
        .bind(rent.serial_number().as_ref())
        .bind(rent.condition_on_given().as_str())
        .bind(rent.rent_date().as_ref())
        .bind(rent.created_by().as_ref())
        .bind(rent.created_at().as_ref())
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }

    async fn delete(con: &mut PgConnection, rent_id: &RentId) -> error_stack::Result<(), KernelError> {
        let result = sqlx::query(
            // language=postgresql
            r#"
            DELETE FROM rents
            WHERE id = $1
            "#,
        )
        .bind(rent_id.as_ref())
        .execute(con)
        .await
        .convert_error()?;
        if result.rows_affected() == 0 {
            return Err(Report::new(KernelError::Concurrency)
                .attach_printable(format!("Rent {} was already closed", rent_id.as_ref())));
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use time::macros::date;
    use uuid::Uuid;

    use kernel::interface::database::DatabaseConnection;
    use kernel::interface::query::RentQuery;
    use kernel::interface::update::RentModifier;
    use kernel::prelude::entity::{
        BeneficiaryId, BeneficiaryName, CreatedAt, CreatedBy, EquipmentCondition, EquipmentId,
        EquipmentName, Rent, RentDate, RentId, SerialNumber,
    };
    use kernel::KernelError;

    use crate::database::postgres::{PostgresDatabase, PostgresRentRepository};

    fn rent(equipment_id: &EquipmentId) -> Rent {
        Rent::new(
            RentId::new(Uuid::new_v4()),
            BeneficiaryId::new(Uuid::new_v4()),
            BeneficiaryName::new("beneficiary"),
            equipment_id.clone(),
            EquipmentName::new("Crutches"),
            SerialNumber::new("CR-1"),
            EquipmentCondition::Ok,
            RentDate::new(date!(2024 - 02 - 10)),
            CreatedBy::new("admin@example.org"),
            CreatedAt::now(),
        )
    }

    #[test_with::env(POSTGRES_TEST)]
    #[tokio::test]
    async fn test() -> error_stack::Result<(), KernelError> {
        let db = PostgresDatabase::new().await?;
        let mut con = db.transact().await?;
        let equipment_id = EquipmentId::new(Uuid::new_v4());
        let rent = rent(&equipment_id);
        PostgresRentRepository.create(&mut con, &rent).await?;

        let found = PostgresRentRepository
            .find_by_equipment_id(&mut con, &equipment_id)
            .await?;
        assert_eq!(found.len(), 1);

        PostgresRentRepository.delete(&mut con, rent.id()).await?;
        let found = PostgresRentRepository.find_by_id(&mut con, rent.id()).await?;
        assert!(found.is_none());

        let error = PostgresRentRepository
            .delete(&mut con, rent.id())
            .await
            .unwrap_err();
        assert!(matches!(error.current_context(), KernelError::Concurrency));
        Ok(())
    }

    #[test_with::env(POSTGRES_TEST)]
    #[tokio::test]
    async fn one_open_rent_per_equipment() -> error_stack::Result<(), KernelError> {
        let db = PostgresDatabase::new().await?;
        let mut con = db.transact().await?;
        let equipment_id = EquipmentId::new(Uuid::new_v4());
        PostgresRentRepository
            .create(&mut con, &rent(&equipment_id))
            .await?;
        let error = PostgresRentRepository
            .create(&mut con, &rent(&equipment_id))
            .await
            .unwrap_err();
        assert!(matches!(error.current_context(), KernelError::Conflict));
        Ok(())
    }
}
