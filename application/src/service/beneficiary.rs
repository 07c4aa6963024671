use error_stack::Report;
use time::OffsetDateTime;
use uuid::Uuid;

use kernel::interface::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use kernel::interface::query::{BeneficiaryQuery, DependOnBeneficiaryQuery};
use kernel::interface::update::{BeneficiaryModifier, DependOnBeneficiaryModifier};
use kernel::prelude::entity::{
    Address, Age, Beneficiary, BeneficiaryId, BeneficiaryName, Contact, CreatedAt, CreatedBy,
    DateOfBirth, FatherName, Notes,
};
use kernel::KernelError;

use crate::service::require;
use crate::transfer::{
    BeneficiaryDto, BeneficiaryFieldsDto, CreateBeneficiaryDto, DeleteBeneficiaryDto,
    GetAllBeneficiaryDto, GetBeneficiaryDto, UpdateBeneficiaryDto,
};

fn build_beneficiary(
    id: BeneficiaryId,
    fields: &BeneficiaryFieldsDto,
    created_by: CreatedBy,
) -> error_stack::Result<Beneficiary, KernelError> {
    let date_of_birth = DateOfBirth::new(fields.date_of_birth);
    let today = OffsetDateTime::now_utc().date();
    if date_of_birth.as_ref() > &today {
        return Err(Report::new(KernelError::Validation)
            .attach_printable("Date of birth is in the future"));
    }
    let age = Age::at(&date_of_birth, today);
    Ok(Beneficiary::new(
        id,
        BeneficiaryName::new(require("name", &fields.name)?),
        FatherName::new(require("father name", &fields.father_name)?),
        fields.gender,
        date_of_birth,
        age,
        Address::new(require("address", &fields.address)?),
        Contact::new(require("contact", &fields.contact)?),
        fields.notes.as_deref().and_then(Notes::optional),
        created_by,
        CreatedAt::now(),
    ))
}

#[async_trait::async_trait]
pub trait GetBeneficiaryService:
    'static + Sync + Send + DependOnDatabaseConnection + DependOnBeneficiaryQuery
{
    async fn get_beneficiary(
        &self,
        dto: &GetBeneficiaryDto,
    ) -> error_stack::Result<Option<BeneficiaryDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let id = BeneficiaryId::new(dto.id);
        let found = self
            .beneficiary_query()
            .find_by_id(&mut connection, &id)
            .await?;

        Ok(found.map(BeneficiaryDto::from))
    }

    async fn get_all_beneficiaries(
        &self,
        dto: &GetAllBeneficiaryDto,
    ) -> error_stack::Result<Vec<BeneficiaryDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let all = self.beneficiary_query().find_all(&mut connection).await?;
        let query = dto.query.as_deref().map(str::trim).unwrap_or_default();

        Ok(all
            .into_iter()
            .filter(|beneficiary| beneficiary.matches(query))
            .map(BeneficiaryDto::from)
            .collect())
    }
}

impl<T> GetBeneficiaryService for T where T: DependOnDatabaseConnection + DependOnBeneficiaryQuery {}

#[async_trait::async_trait]
pub trait CreateBeneficiaryService:
    'static + Sync + Send + DependOnDatabaseConnection + DependOnBeneficiaryModifier
{
    async fn create_beneficiary(
        &self,
        dto: &CreateBeneficiaryDto,
    ) -> error_stack::Result<Uuid, KernelError> {
        let created_by = CreatedBy::new(require("created by", &dto.created_by)?);
        self.insert_beneficiary(&dto.fields, created_by).await
    }

    /// Self-registration from the public form. No session is involved.
    async fn register_beneficiary(
        &self,
        dto: &BeneficiaryFieldsDto,
    ) -> error_stack::Result<Uuid, KernelError> {
        self.insert_beneficiary(dto, CreatedBy::public_registration())
            .await
    }

    async fn insert_beneficiary(
        &self,
        fields: &BeneficiaryFieldsDto,
        created_by: CreatedBy,
    ) -> error_stack::Result<Uuid, KernelError> {
        let uuid = Uuid::new_v4();
        let beneficiary = build_beneficiary(BeneficiaryId::new(uuid), fields, created_by)?;

        let mut connection = self.database_connection().transact().await?;
        self.beneficiary_modifier()
            .create(&mut connection, &beneficiary)
            .await?;
        connection.commit().await?;

        tracing::info!(beneficiary_id = %uuid, "Beneficiary created");
        Ok(uuid)
    }
}

impl<T> CreateBeneficiaryService for T where
    T: DependOnDatabaseConnection + DependOnBeneficiaryModifier
{
}

#[async_trait::async_trait]
pub trait UpdateBeneficiaryService:
    'static + Sync + Send + DependOnDatabaseConnection + DependOnBeneficiaryModifier
{
    /// Full-record edit. Age is recomputed and the record is re-stamped with the editor.
    async fn update_beneficiary(
        &self,
        dto: &UpdateBeneficiaryDto,
    ) -> error_stack::Result<(), KernelError> {
        let edited_by = CreatedBy::new(require("edited by", &dto.edited_by)?);
        let beneficiary = build_beneficiary(BeneficiaryId::new(dto.id), &dto.fields, edited_by)?;

        let mut connection = self.database_connection().transact().await?;
        self.beneficiary_modifier()
            .update(&mut connection, &beneficiary)
            .await?;
        connection.commit().await?;

        tracing::info!(beneficiary_id = %dto.id, "Beneficiary updated");
        Ok(())
    }
}

impl<T> UpdateBeneficiaryService for T where
    T: DependOnDatabaseConnection + DependOnBeneficiaryModifier
{
}

#[async_trait::async_trait]
pub trait DeleteBeneficiaryService:
    'static + Sync + Send + DependOnDatabaseConnection + DependOnBeneficiaryModifier
{
    async fn delete_beneficiary(
        &self,
        dto: &DeleteBeneficiaryDto,
    ) -> error_stack::Result<(), KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let id = BeneficiaryId::new(dto.id);
        self.beneficiary_modifier()
            .delete(&mut connection, &id)
            .await?;
        connection.commit().await?;

        tracing::info!(beneficiary_id = %dto.id, "Beneficiary deleted");
        Ok(())
    }
}

impl<T> DeleteBeneficiaryService for T where
    T: DependOnDatabaseConnection + DependOnBeneficiaryModifier
{
}
