mod birth;
mod contact;
mod gender;
mod id;
mod name;

pub use self::{birth::*, contact::*, gender::*, id::*, name::*};
use crate::entity::common::{CreatedAt, CreatedBy, Notes};
use destructure::Destructure;
use vodca::References;

#[derive(Debug, Clone, Eq, PartialEq, References, Destructure)]
pub struct Beneficiary {
    id: BeneficiaryId,
    name: BeneficiaryName,
    father_name: FatherName,
    gender: Gender,
    date_of_birth: DateOfBirth,
    age: Age,
    address: Address,
    contact: Contact,
    notes: Option<Notes>,
    created_by: CreatedBy,
    created_at: CreatedAt<Beneficiary>,
}

impl Beneficiary {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: BeneficiaryId,
        name: BeneficiaryName,
        father_name: FatherName,
        gender: Gender,
        date_of_birth: DateOfBirth,
        age: Age,
        address: Address,
        contact: Contact,
        notes: Option<Notes>,
        created_by: CreatedBy,
        created_at: CreatedAt<Beneficiary>,
    ) -> Self {
        Self {
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
        }
    }

    /// Name and address match case-insensitively, contact matches verbatim.
    pub fn matches(&self, query: &str) -> bool {
        let lowered = query.to_lowercase();
        self.name.as_ref().to_lowercase().contains(&lowered)
            || self.contact.as_ref().contains(query)
            || self.address.as_ref().to_lowercase().contains(&lowered)
    }
}

#[cfg(test)]
mod test {
    use time::macros::{date, datetime};
    use uuid::Uuid;

    use super::*;

    fn beneficiary() -> Beneficiary {
        Beneficiary::new(
            BeneficiaryId::new(Uuid::new_v4()),
            BeneficiaryName::new("Fatima Rahimi"),
            FatherName::new("Hassan"),
            Gender::Female,
            DateOfBirth::new(date!(1980 - 01 - 02)),
            Age::new(44),
            Address::new("12 Garden Street"),
            Contact::new("0301-5550123"),
            None,
            CreatedBy::new("admin@example.org"),
            CreatedAt::new(datetime!(2024-01-01 0:00 UTC)),
        )
    }

    #[test]
    fn search_by_name_and_address_ignores_case() {
        let beneficiary = beneficiary();
        assert!(beneficiary.matches("fatima"));
        assert!(beneficiary.matches("GARDEN"));
        assert!(beneficiary.matches("5550"));
        assert!(beneficiary.matches(""));
        assert!(!beneficiary.matches("Karachi"));
    }
}
