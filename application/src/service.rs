mod auth;
mod beneficiary;
mod equipment;
mod export;
#[cfg(test)]
mod fixture;
mod rent;
mod report;
mod returned;

pub use self::{
    auth::*, beneficiary::*, equipment::*, export::*, rent::*, report::*, returned::*,
};

use error_stack::Report;

use kernel::KernelError;

/// Trims `value`, rejecting it when nothing is left.
pub(crate) fn require(field: &str, value: &str) -> error_stack::Result<String, KernelError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(Report::new(KernelError::Validation)
            .attach_printable(format!("{field} is required")));
    }
    Ok(value.to_string())
}
