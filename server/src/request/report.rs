use application::transfer::{ExportDto, ExportTarget};
use kernel::KernelError;

use crate::controller::TryIntake;

#[derive(Debug)]
pub struct ExportRequest {
    target: String,
}

impl ExportRequest {
    pub fn new(target: String) -> Self {
        Self { target }
    }
}

pub struct ReportTransformer;

impl TryIntake<ExportRequest> for ReportTransformer {
    type To = ExportDto;
    type Error = error_stack::Report<KernelError>;
    fn emit(&self, input: ExportRequest) -> Result<Self::To, Self::Error> {
        Ok(ExportDto {
            target: input.target.parse::<ExportTarget>()?,
        })
    }
}
