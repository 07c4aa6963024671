use serde::Deserialize;

use application::transfer::{CreateReturnDto, SessionContext};
use kernel::KernelError;

use crate::controller::TryIntake;
use crate::request::{parse_choice, parse_date, parse_id};

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReturnForm {
    rent_id: String,
    condition_on_return: String,
    return_date: String,
    notes: Option<String>,
}

pub struct ReturnTransformer;

impl TryIntake<(SessionContext, ReturnForm)> for ReturnTransformer {
    type To = CreateReturnDto;
    type Error = error_stack::Report<KernelError>;
    fn emit(&self, (session, form): (SessionContext, ReturnForm)) -> Result<Self::To, Self::Error> {
        Ok(CreateReturnDto {
            rent_id: parse_id("rentId", &form.rent_id)?,
            condition_on_return: parse_choice(&form.condition_on_return)?,
            return_date: parse_date("returnDate", &form.return_date)?,
            notes: form.notes,
            created_by: session.email,
        })
    }
}
