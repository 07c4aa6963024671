use error_stack::Report;
use sqlx::PgConnection;
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use kernel::interface::query::BeneficiaryQuery;
use kernel::interface::update::BeneficiaryModifier;
use kernel::prelude::entity::{
    Address, Age, Beneficiary, BeneficiaryId, BeneficiaryName, Contact, CreatedAt, CreatedBy,
    DateOfBirth, FatherName, Notes,
};
use kernel::KernelError;

use crate::database::postgres::PostgresConnection;
use crate::error::ConvertError;

pub struct PostgresBeneficiaryRepository;

#[async_trait::async_trait]
impl BeneficiaryQuery for PostgresBeneficiaryRepository {
    type Transaction = PostgresConnection;

    async fn find_all(
        &self,
        con: &mut PostgresConnection,
    ) -> error_stack::Result<Vec<Beneficiary>, KernelError> {
        PgBeneficiaryInternal::find_all(con).await
    }

    async fn find_by_id(
        &self,
        con: &mut PostgresConnection,
        id: &BeneficiaryId,
    ) -> error_stack::Result<Option<Beneficiary>, KernelError> {
        PgBeneficiaryInternal::find_by_id(con, id).await
    }
}

#[async_trait::async_trait]
impl BeneficiaryModifier for PostgresBeneficiaryRepository {
    type Transaction = PostgresConnection;

    async fn create(
        &self,
        con: &mut PostgresConnection,
        beneficiary: &Beneficiary,
    ) -> error_stack::Result<(), KernelError> {
        PgBeneficiaryInternal::create(con, beneficiary).await
    }

    async fn update(
        &self,
        con: &mut PostgresConnection,
        beneficiary: &Beneficiary,
    ) -> error_stack::Result<(), KernelError> {
        PgBeneficiaryInternal::update(con, beneficiary).await
    }

    async fn delete(
        &self,
        con: &mut PostgresConnection,
        beneficiary_id: &BeneficiaryId,
    ) -> error_stack::Result<(), KernelError> {
        PgBeneficiaryInternal::delete(con, beneficiary_id).await
    }
}

#[derive(sqlx::FromRow)]
struct BeneficiaryRow {
    id: Uuid,
    name: String,
    father_name: String,
    gender: String,
    date_of_birth: Date,
    age: i32,
    address: String,
    contact: String,
    notes: Option<String>,
    created_by: String,
    created_at: OffsetDateTime,
}

impl TryFrom<BeneficiaryRow> for Beneficiary {
    type Error = Report<KernelError>;
    fn try_from(value: BeneficiaryRow) -> Result<Self, Self::Error> {
        Ok(Beneficiary::new(
            BeneficiaryId::new(value.id),
            BeneficiaryName::new(value.name),
            FatherName::new(value.father_name),
            value.gender.parse()?,
            DateOfBirth::new(value.date_of_birth),
            Age::new(value.age),
            Address::new(value.address),
            Contact::new(value.contact),
            value.notes.map(Notes::new),
            CreatedBy::new(value.created_by),
            CreatedAt::new(value.created_at),
        ))
    }
}

pub(in crate::database) struct PgBeneficiaryInternal;

impl PgBeneficiaryInternal {
    async fn find_all(con: &mut PgConnection) -> error_stack::Result<Vec<Beneficiary>, KernelError> {
        let rows = sqlx::query_as::<_, BeneficiaryRow>(
            // language=postgresql
            r#"
            SELECT id, name, father_name, gender, date_of_birth, age, address, contact, notes, created_by, created_at
            FROM beneficiaries
            ORDER BY created_at, id
            "#,
        )
        .fetch_all(con)
        .await
        .convert_error()?;
        rows.into_iter().map(Beneficiary::try_from).collect()
    }

    async fn find_by_id(
        con: &mut PgConnection,
        id: &BeneficiaryId,
    ) -> error_stack::Result<Option<Beneficiary>, KernelError> {
        let row = sqlx::query_as::<_, BeneficiaryRow>(
            // language=postgresql
            r#"
            SELECT id, name, father_name, gender, date_of_birth, age, address, contact, notes, created_by, created_at
            FROM beneficiaries
            WHERE id = $1
            "#,
        )
        .bind(id.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        row.map(Beneficiary::try_from).transpose()
    }

    async fn create(
        con: &mut PgConnection,
        beneficiary: &Beneficiary,
    ) -> error_stack::Result<(), KernelError> {
        sqlx::query(
            // language=postgresql
            r#"
            INSERT INTO beneficiaries (id, name, father_name, gender, date_of_birth, age, address, contact, notes, created_by, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(beneficiary.id().as_ref())
        .bind(beneficiary.name().as_ref())
        .bind(beneficiary.father_name().as_ref())
        .bind(beneficiary.gender().as_str())
        .bind(beneficiary.date_of_birth().as_ref())
        .bind(beneficiary.age().as_ref())
        .bind(beneficiary.address().as_ref())
        .bind(beneficiary.contact().as_ref())
        .bind(beneficiary.notes().as_ref().map(AsRef::<String>::as_ref))
        .bind(beneficiary.created_by().as_ref())
        .bind(beneficiary.created_at().as_ref())
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }

    async fn update(
        con: &mut PgConnection,
        beneficiary: &Beneficiary,
    ) -> error_stack::Result<(), KernelError> {
        let result = sqlx::query(
            // language=postgresql
            r#"
            UPDATE beneficiaries
            SET name = $2, father_name = $3, gender = $4, date_of_birth = $5, age = $6,
                address = $7, contact = $8, notes = $9, created_by = $10, created_at = $11
            WHERE id = $1
            "#,
        )
        .bind(beneficiary.id().as_ref())
        .bind(beneficiary.name().as_ref())
        .bind(beneficiary.father_name().as_ref())
        .bind(beneficiary.gender().as_str())
        .bind(beneficiary.date_of_birth().as_ref())
        .bind(beneficiary.age().as_ref())
        .bind(beneficiary.address().as_ref())
        .bind(beneficiary.contact().as_ref())
        .bind(beneficiary.notes().as_ref().map(AsRef::<String>::as_ref))
        .bind(beneficiary.created_by().as_ref())
        .bind(beneficiary.created_at().as_ref())
        .execute(con)
        .await
        .convert_error()?;
        if result.rows_affected() == 0 {
            return Err(Report::new(KernelError::NotFound)
                .attach_printable(format!("Beneficiary {} not found", beneficiary.id().as_ref())));
        }
        Ok(())
    }

    async fn delete(
        con: &mut PgConnection,
        beneficiary_id: &BeneficiaryId,
    ) -> error_stack::Result<(), KernelError> {
        sqlx::query(
            // language=postgresql
            r#"
            DELETE FROM beneficiaries
            WHERE id = $1
            "#,
        )
        .bind(beneficiary_id.as_ref())
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
    use kernel::interface::query::BeneficiaryQuery;
    use kernel::interface::update::BeneficiaryModifier;
    use kernel::prelude::entity::{
        Address, Age, Beneficiary, BeneficiaryId, BeneficiaryName, Contact, CreatedAt, CreatedBy,
        DateOfBirth, FatherName, Gender,
    };
    use kernel::KernelError;

    use crate::database::postgres::{PostgresBeneficiaryRepository, PostgresDatabase};

    #[test_with::env(POSTGRES_TEST)]
    #[tokio::test]
    async fn test() -> error_stack::Result<(), KernelError> {
        let db = PostgresDatabase::new().await?;
        let mut con = db.transact().await?;
        let id = BeneficiaryId::new(Uuid::new_v4());
        let beneficiary = Beneficiary::new(
            id.clone(),
            BeneficiaryName::new("test"),
            FatherName::new("father"),
            Gender::Other,
            DateOfBirth::new(date!(1990 - 01 - 01)),
            Age::new(34),
            Address::new("address"),
            Contact::new("0000"),
            None,
            CreatedBy::public_registration(),
            CreatedAt::now(),
        );
        PostgresBeneficiaryRepository
            .create(&mut con, &beneficiary)
            .await?;

        let found = PostgresBeneficiaryRepository
            .find_by_id(&mut con, &id)
            .await?
            .map(|found| found.id().clone());
        assert_eq!(found, Some(id.clone()));

        let beneficiary =
            beneficiary.reconstruct(|b| b.name = BeneficiaryName::new("test2"));
        PostgresBeneficiaryRepository
            .update(&mut con, &beneficiary)
            .await?;
        let found = PostgresBeneficiaryRepository
            .find_by_id(&mut con, &id)
            .await?
            .map(|found| found.name().clone());
        assert_eq!(found, Some(BeneficiaryName::new("test2")));

        PostgresBeneficiaryRepository.delete(&mut con, &id).await?;
        let found = PostgresBeneficiaryRepository
            .find_by_id(&mut con, &id)
            .await?;
        assert!(found.is_none());
        Ok(())
    }
}
