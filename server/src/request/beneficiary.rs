use serde::Deserialize;
use uuid::Uuid;

use application::transfer::{
    BeneficiaryFieldsDto, CreateBeneficiaryDto, DeleteBeneficiaryDto, GetAllBeneficiaryDto,
    GetBeneficiaryDto, SessionContext, UpdateBeneficiaryDto,
};
use kernel::KernelError;

use crate::controller::{Intake, TryIntake};
use crate::request::{
    parse_choice, parse_date, DeleteByIdRequest, GetByIdRequest, SearchRequest,
};

/// Shared by the admin forms and public registration. Missing fields arrive empty
/// and are rejected by the service.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BeneficiaryForm {
    name: String,
    father_name: String,
    gender: String,
    date_of_birth: String,
    address: String,
    contact: String,
    notes: Option<String>,
}

pub struct BeneficiaryTransformer;

impl TryIntake<BeneficiaryForm> for BeneficiaryTransformer {
    type To = BeneficiaryFieldsDto;
    type Error = error_stack::Report<KernelError>;
    fn emit(&self, input: BeneficiaryForm) -> Result<Self::To, Self::Error> {
        Ok(BeneficiaryFieldsDto {
            name: input.name,
            father_name: input.father_name,
            gender: parse_choice(&input.gender)?,
            date_of_birth: parse_date("dateOfBirth", &input.date_of_birth)?,
            address: input.address,
            contact: input.contact,
            notes: input.notes,
        })
    }
}

impl TryIntake<(SessionContext, BeneficiaryForm)> for BeneficiaryTransformer {
    type To = CreateBeneficiaryDto;
    type Error = error_stack::Report<KernelError>;
    fn emit(&self, (session, form): (SessionContext, BeneficiaryForm)) -> Result<Self::To, Self::Error> {
        Ok(CreateBeneficiaryDto {
            created_by: session.email,
            fields: TryIntake::<BeneficiaryForm>::emit(self, form)?,
        })
    }
}

impl TryIntake<(SessionContext, Uuid, BeneficiaryForm)> for BeneficiaryTransformer {
    type To = UpdateBeneficiaryDto;
    type Error = error_stack::Report<KernelError>;
    fn emit(
        &self,
        (session, id, form): (SessionContext, Uuid, BeneficiaryForm),
    ) -> Result<Self::To, Self::Error> {
        Ok(UpdateBeneficiaryDto {
            id,
            edited_by: session.email,
            fields: TryIntake::<BeneficiaryForm>::emit(self, form)?,
        })
    }
}

impl Intake<SearchRequest> for BeneficiaryTransformer {
    type To = GetAllBeneficiaryDto;
    fn emit(&self, input: SearchRequest) -> Self::To {
        GetAllBeneficiaryDto { query: input.query }
    }
}

impl Intake<GetByIdRequest> for BeneficiaryTransformer {
    type To = GetBeneficiaryDto;
    fn emit(&self, input: GetByIdRequest) -> Self::To {
        GetBeneficiaryDto { id: input.id }
    }
}

impl Intake<DeleteByIdRequest> for BeneficiaryTransformer {
    type To = DeleteBeneficiaryDto;
    fn emit(&self, input: DeleteByIdRequest) -> Self::To {
        DeleteBeneficiaryDto { id: input.id }
    }
}
