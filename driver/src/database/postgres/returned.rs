use error_stack::Report;
use sqlx::PgConnection;
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use kernel::interface::query::ReturnQuery;
use kernel::interface::update::ReturnModifier;
use kernel::prelude::entity::{
    BeneficiaryId, BeneficiaryName, CreatedAt, CreatedBy, EquipmentId, EquipmentName, Notes,
    RentDate, RentId, Return, ReturnDate, ReturnId, SerialNumber,
};
use kernel::KernelError;

use crate::database::postgres::PostgresConnection;
use crate::error::ConvertError;

pub struct PostgresReturnRepository;

#[async_trait::async_trait]
impl ReturnQuery for PostgresReturnRepository {
    type Transaction = PostgresConnection;

    async fn find_all(
        &self,
        con: &mut PostgresConnection,
    ) -> error_stack::Result<Vec<Return>, KernelError> {
        PgReturnInternal::find_all(con).await
    }

    async fn find_by_equipment_id(
        &self,
        con: &mut PostgresConnection,
        equipment_id: &EquipmentId,
    ) -> error_stack::Result<Vec<Return>, KernelError> {
        PgReturnInternal::find_by_equipment_id(con, equipment_id).await
    }
}

#[async_trait::async_trait]
impl ReturnModifier for PostgresReturnRepository {
    type Transaction = PostgresConnection;

    async fn create(
        &self,
        con: &mut PostgresConnection,
        returned: &Return,
    ) -> error_stack::Result<(), KernelError> {
        PgReturnInternal::create(con, returned).await
    }
}

#[derive(sqlx::FromRow)]
struct ReturnRow {
    id: Uuid,
    rent_id: Uuid,
    beneficiary_id: Uuid,
    beneficiary_name: String,
    equipment_id: Uuid,
    equipment_name: String,
    serial_number: String,
    condition_on_given: String,
    condition_on_return: String,
    rent_date: Date,
    return_date: Date,
    notes: Option<String>,
    created_by: String,
    created_at: OffsetDateTime,
}

impl TryFrom<ReturnRow> for Return {
    type Error = Report<KernelError>;
    fn try_from(value: ReturnRow) -> Result<Self, Self::Error> {
        Ok(Return::new(
            ReturnId::new(value.id),
            RentId::new(value.rent_id),
            BeneficiaryId::new(value.beneficiary_id),
            BeneficiaryName::new(value.beneficiary_name),
            EquipmentId::new(value.equipment_id),
            EquipmentName::new(value.equipment_name),
            SerialNumber::new(value.serial_number),
            value.condition_on_given.parse()?,
            value.condition_on_return.parse()?,
            RentDate::new(value.rent_date),
            ReturnDate::new(value.return_date),
            value.notes.map(Notes::new),
            CreatedBy::new(value.created_by),
            CreatedAt::new(value.created_at),
        ))
    }
}

pub(in crate::database) struct PgReturnInternal;

impl PgReturnInternal {
    async fn find_all(con: &mut PgConnection) -> error_stack::Result<Vec<Return>, KernelError> {
        let rows = sqlx::query_as::<_, ReturnRow>(
            // language=postgresql
            r#"
            SELECT id, rent_id, beneficiary_id, beneficiary_name, equipment_id, equipment_name, serial_number,
                   condition_on_given, condition_on_return, rent_date, return_date, notes, created_by, created_at
            FROM returns
            ORDER BY created_at, id
            "#,
        )
        .fetch_all(con)
        .await
        .convert_error()?;
        rows.into_iter().map(Return::try_from).collect()
    }

    async fn find_by_equipment_id(
        con: &mut PgConnection,
        equipment_id: &EquipmentId,
    ) -> error_stack::Result<Vec<Return>, KernelError> {
        let rows = sqlx::query_as::<_, ReturnRow>(
            // language=postgresql
            r#"
            SELECT id, rent_id, beneficiary_id, beneficiary_name, equipment_id, equipment_name, serial_number,
                   condition_on_given, condition_on_return, rent_date, return_date, notes, created_by, created_at
            FROM returns
            WHERE equipment_id = $1
            ORDER BY created_at, id
            "#,
        )
        .bind(equipment_id.as_ref())
        .fetch_all(con)
        .await
        .convert_error()?;
        rows.into_iter().map(Return::try_from).collect()
    }

    async fn create(
        con: &mut PgConnection,
        returned: &Return,
    ) -> error_stack::Result<(), KernelError> {
        sqlx::query(
            // language=postgresql
            r#"
            INSERT INTO returns (id, rent_id, beneficiary_id, beneficiary_name, equipment_id, equipment_name, serial_number,
                                 condition_on_given, condition_on_return, rent_date, return_date, notes, created_by, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            "#,
        )
        .bind(returned.id().as_ref())
        .bind(returned.rent_id().as_ref())
        .bind(returned.beneficiary_id().as_ref())
        .bind(returned.beneficiary_name().as_ref())
        .bind(returned.equipment_id().as_ref())
        .bind(returned.equipment_name().as_ref())
        .bind(returned.serial_number().as_ref())
        .bind(returned.condition_on_given().as_str())
        .bind(returned.condition_on_return().as_str())
        .bind(returned.rent_date().as_ref())
        .bind(returned.return_date().as_ref())
        .bind(returned.notes().as_ref().map(AsRef::<String>::as_ref))
        .bind(returned.created_by().as_ref())
        .bind(returned.created_at().as_ref())
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
    use kernel::interface::query::ReturnQuery;
    use kernel::interface::update::ReturnModifier;
    use kernel::prelude::entity::{
        BeneficiaryId, BeneficiaryName, CreatedAt, CreatedBy, EquipmentCondition, EquipmentId,
        EquipmentName, Notes, Rent, RentDate, RentId, Return, ReturnDate, ReturnId, SerialNumber,
    };
    use kernel::KernelError;

    use crate::database::postgres::{PostgresDatabase, PostgresReturnRepository};

    #[test_with::env(POSTGRES_TEST)]
    #[tokio::test]
    async fn test() -> error_stack::Result<(), KernelError> {
        let db = PostgresDatabase::new().await?;
        let mut con = db.transact().await?;
        let equipment_id = EquipmentId::new(Uuid::new_v4());
        let rent = Rent::new(
            RentId::new(Uuid::new_v4()),
            BeneficiaryId::new(Uuid::new_v4()),
            BeneficiaryName::new("beneficiary"),
            equipment_id.clone(),
            EquipmentName::new("Oxygen Concentrator"),
            SerialNumber::new("OC-9"),
            EquipmentCondition::Ok,
            RentDate::new(date!(2024 - 01 - 05)),
            CreatedBy::new("admin@example.org"),
            CreatedAt::now(),
        );
        let returned = Return::close(
            ReturnId::new(Uuid::new_v4()),
            rent,
            EquipmentCondition::UnOk,
            ReturnDate::new(date!(2024 - 03 - 05)),
            Notes::optional("filter replaced"),
            CreatedBy::new("admin@example.org"),
        );
        PostgresReturnRepository.create(&mut con, &returned).await?;

        let history = PostgresReturnRepository
            .find_by_equipment_id(&mut con, &equipment_id)
            .await?;
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].condition_on_return(), &EquipmentCondition::UnOk);
        assert_eq!(history[0].notes(), &Some(Notes::new("filter replaced")));
        Ok(())
    }
}
