mod auth;
mod beneficiary;
mod equipment;
mod rent;
mod report;
mod returned;

pub use self::{auth::*, beneficiary::*, equipment::*, rent::*, report::*, returned::*};

use std::str::FromStr;

use error_stack::{Report, ResultExt};
use serde::Deserialize;
use time::macros::format_description;
use time::Date;
use uuid::Uuid;

use kernel::KernelError;

/// `?query=` of the list pages.
#[derive(Debug, Default, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    query: Option<String>,
}

#[derive(Debug)]
pub struct GetByIdRequest {
    id: Uuid,
}

impl GetByIdRequest {
    pub fn new(id: Uuid) -> Self {
        Self { id }
    }
}

#[derive(Debug)]
pub struct DeleteByIdRequest {
    id: Uuid,
}

impl DeleteByIdRequest {
    pub fn new(id: Uuid) -> Self {
        Self { id }
    }
}

/// Form dates are `YYYY-MM-DD`.
pub(crate) fn parse_date(field: &str, value: &str) -> error_stack::Result<Date, KernelError> {
    Date::parse(value.trim(), format_description!("[year]-[month]-[day]"))
        .change_context_lazy(|| KernelError::Validation)
        .attach_printable_lazy(|| format!("{field} is not a YYYY-MM-DD date: {value}"))
}

pub(crate) fn parse_id(field: &str, value: &str) -> error_stack::Result<Uuid, KernelError> {
    Uuid::parse_str(value.trim())
        .change_context_lazy(|| KernelError::Validation)
        .attach_printable_lazy(|| format!("{field} is not a valid id: {value}"))
}

pub(crate) fn parse_choice<T>(value: &str) -> error_stack::Result<T, KernelError>
where
    T: FromStr<Err = Report<KernelError>>,
{
    T::from_str(value.trim())
}

#[cfg(test)]
mod test {
    use kernel::prelude::entity::Gender;
    use kernel::KernelError;
    use time::macros::date;

    use super::{parse_choice, parse_date, parse_id};

    #[test]
    fn dates_are_calendar_days() {
        assert_eq!(
            parse_date("rentDate", " 2024-02-29 ").unwrap(),
            date!(2024 - 02 - 29)
        );
        for invalid in ["", "2023-02-29", "01/02/2024", "2024-1-2"] {
            let error = parse_date("rentDate", invalid).unwrap_err();
            assert!(matches!(error.current_context(), KernelError::Validation));
        }
    }

    #[test]
    fn unknown_choices_are_rejected() {
        assert_eq!(parse_choice::<Gender>("Other").unwrap(), Gender::Other);
        let error = parse_choice::<Gender>("other").unwrap_err();
        assert!(matches!(error.current_context(), KernelError::Validation));
        assert!(parse_id("rentId", "not-a-uuid").is_err());
    }
}
