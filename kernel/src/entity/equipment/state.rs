use std::fmt::{Display, Formatter};
use std::str::FromStr;

use error_stack::Report;
use serde::{Deserialize, Serialize};

use crate::KernelError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EquipmentStatus {
    Available,
    Rented,
}

impl EquipmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EquipmentStatus::Available => "Available",
            EquipmentStatus::Rented => "Rented",
        }
    }

    /// `Available -> Rented`. Any other starting state is rejected.
    pub fn rent(self) -> error_stack::Result<Self, KernelError> {
        match self {
            EquipmentStatus::Available => Ok(EquipmentStatus::Rented),
            EquipmentStatus::Rented => Err(Report::new(KernelError::Conflict)
                .attach_printable("Equipment is already rented")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EquipmentSource {
    Purchased,
    Donated,
}

impl EquipmentSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            EquipmentSource::Purchased => "Purchased",
            EquipmentSource::Donated => "Donated",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EquipmentCondition {
    Ok,
    UnOk,
}

impl EquipmentCondition {
    pub fn as_str(&self) -> &'static str {
        match self {
            EquipmentCondition::Ok => "Ok",
            EquipmentCondition::UnOk => "UnOk",
        }
    }
}

impl Display for EquipmentStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Display for EquipmentSource {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Display for EquipmentCondition {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EquipmentStatus {
    type Err = Report<KernelError>;
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "Available" => Ok(EquipmentStatus::Available),
            "Rented" => Ok(EquipmentStatus::Rented),
            _ => Err(Report::new(KernelError::Validation)
                .attach_printable(format!("Unknown equipment status: {value}"))),
        }
    }
}

impl FromStr for EquipmentSource {
    type Err = Report<KernelError>;
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "Purchased" => Ok(EquipmentSource::Purchased),
            "Donated" => Ok(EquipmentSource::Donated),
            _ => Err(Report::new(KernelError::Validation)
                .attach_printable(format!("Unknown equipment source: {value}"))),
        }
    }
}

impl FromStr for EquipmentCondition {
    type Err = Report<KernelError>;
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "Ok" => Ok(EquipmentCondition::Ok),
            "UnOk" => Ok(EquipmentCondition::UnOk),
            _ => Err(Report::new(KernelError::Validation)
                .attach_printable(format!("Unknown equipment condition: {value}"))),
        }
    }
}
