use time::{Date, OffsetDateTime};
use uuid::Uuid;

use kernel::prelude::entity::{Beneficiary, DestructBeneficiary, Gender};

#[derive(Debug, Clone)]
pub struct BeneficiaryDto {
    pub id: Uuid,
    pub name: String,
    pub father_name: String,
    pub gender: Gender,
    pub date_of_birth: Date,
    pub age: i32,
    pub address: String,
    pub contact: String,
    pub notes: Option<String>,
    pub created_by: String,
    pub created_at: OffsetDateTime,
}

impl From<Beneficiary> for BeneficiaryDto {
    fn from(value: Beneficiary) -> Self {
        let DestructBeneficiary {
            id,
            name,
            father_name,
            gender,
            date_of_birth,
            age,
            address,
            contact,
            notes,
            created_by,
            created_at,
        } = value.into_destruct();
        Self {
            id: id.into(),
            name: name.into(),
            father_name: father_name.into(),
            gender,
            date_of_birth: date_of_birth.into(),
            age: age.into(),
            address: address.into(),
            contact: contact.into(),
            notes: notes.map(Into::into),
            created_by: created_by.into(),
            created_at: created_at.into(),
        }
    }
}

/// Form fields shared by the admin form, the edit form and public registration.
#[derive(Debug, Clone)]
pub struct BeneficiaryFieldsDto {
    pub name: String,
    pub father_name: String,
    pub gender: Gender,
    pub date_of_birth: Date,
    pub address: String,
    pub contact: String,
    pub notes: Option<String>,
}

pub struct GetBeneficiaryDto {
    pub id: Uuid,
}

pub struct GetAllBeneficiaryDto {
    pub query: Option<String>,
}

pub struct CreateBeneficiaryDto {
    pub created_by: String,
    pub fields: BeneficiaryFieldsDto,
}

pub struct UpdateBeneficiaryDto {
    pub id: Uuid,
    pub edited_by: String,
    pub fields: BeneficiaryFieldsDto,
}

pub struct DeleteBeneficiaryDto {
    pub id: Uuid,
}
