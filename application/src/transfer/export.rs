use std::fmt::{Display, Formatter};
use std::str::FromStr;

use error_stack::Report;

use kernel::KernelError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportTarget {
    Beneficiaries,
    Equipments,
    Rents,
    Returns,
}

impl ExportTarget {
    /// File name stem, without the date suffix.
    pub fn stem(&self) -> &'static str {
        match self {
            ExportTarget::Beneficiaries => "all_beneficiaries",
            ExportTarget::Equipments => "all_equipments",
            ExportTarget::Rents => "all_rents",
            ExportTarget::Returns => "all_returns",
        }
    }
}

impl Display for ExportTarget {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.stem())
    }
}

impl FromStr for ExportTarget {
    type Err = Report<KernelError>;
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "beneficiaries" => Ok(ExportTarget::Beneficiaries),
            "equipments" | "equipment" => Ok(ExportTarget::Equipments),
            "rents" => Ok(ExportTarget::Rents),
            "returns" => Ok(ExportTarget::Returns),
            _ => Err(Report::new(KernelError::NotFound)
                .attach_printable(format!("Unknown export target: {value}"))),
        }
    }
}

pub struct ExportDto {
    pub target: ExportTarget,
}

#[derive(Debug, Clone)]
pub struct CsvExportDto {
    pub filename: String,
    pub content: Vec<u8>,
}
