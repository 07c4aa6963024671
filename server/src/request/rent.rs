use serde::Deserialize;

use application::transfer::{CreateRentDto, SessionContext};
use kernel::KernelError;

use crate::controller::TryIntake;
use crate::request::{parse_choice, parse_date, parse_id};

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RentForm {
    beneficiary_id: String,
    equipment_id: String,
    condition_on_given: String,
    rent_date: String,
}

pub struct RentTransformer;

impl TryIntake<(SessionContext, RentForm)> for RentTransformer {
    type To = CreateRentDto;
    type Error = error_stack::Report<KernelError>;
    fn emit(&self, (session, form): (SessionContext, RentForm)) -> Result<Self::To, Self::Error> {
        Ok(CreateRentDto {
            beneficiary_id: parse_id("beneficiaryId", &form.beneficiary_id)?,
            equipment_id: parse_id("equipmentId", &form.equipment_id)?,
            condition_on_given: parse_choice(&form.condition_on_given)?,
            rent_date: parse_date("rentDate", &form.rent_date)?,
            created_by: session.email,
        })
    }
}
