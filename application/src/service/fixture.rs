use time::macros::date;
use uuid::Uuid;

use driver::database::InMemoryDatabase;
use kernel::prelude::entity::{EquipmentCondition, EquipmentSource, EquipmentStatus, Gender};

use crate::service::{CreateBeneficiaryService, CreateEquipmentService, RentEquipmentService};
use crate::transfer::{
    BeneficiaryFieldsDto, CreateBeneficiaryDto, CreateEquipmentDto, CreateRentDto,
    EquipmentFieldsDto,
};

pub(crate) static ADMIN: &str = "admin@example.org";

pub(crate) async fn beneficiary(db: &InMemoryDatabase, name: &str) -> Uuid {
    db.create_beneficiary(&CreateBeneficiaryDto {
        created_by: ADMIN.to_string(),
        fields: BeneficiaryFieldsDto {
            name: name.to_string(),
            father_name: "Yusuf".to_string(),
            gender: Gender::Female,
            date_of_birth: date!(1985 - 04 - 12),
            address: "3 Hill Lane".to_string(),
            contact: "0312-0000000".to_string(),
            notes: None,
        },
    })
    .await
    .unwrap()
}

pub(crate) async fn equipment(db: &InMemoryDatabase, name: &str) -> Uuid {
    db.create_equipment(&CreateEquipmentDto {
        created_by: ADMIN.to_string(),
        fields: EquipmentFieldsDto {
            name: name.to_string(),
            serial_number: format!("SN-{}", Uuid::new_v4()),
            manufacturing_date: date!(2021 - 01 - 01),
            expiry_date: date!(2031 - 01 - 01),
            status: EquipmentStatus::Available,
            source: EquipmentSource::Donated,
            condition: EquipmentCondition::Ok,
        },
    })
    .await
    .unwrap()
}

pub(crate) fn rent_request(beneficiary_id: Uuid, equipment_id: Uuid) -> CreateRentDto {
    CreateRentDto {
        beneficiary_id,
        equipment_id,
        condition_on_given: EquipmentCondition::Ok,
        rent_date: date!(2024 - 05 - 01),
        created_by: ADMIN.to_string(),
    }
}

pub(crate) async fn rented(db: &InMemoryDatabase) -> (Uuid, Uuid) {
    let beneficiary_id = beneficiary(db, "Amina").await;
    let equipment_id = equipment(db, "Wheel Chair").await;
    let rent_id = db
        .rent_equipment(&rent_request(beneficiary_id, equipment_id))
        .await
        .unwrap();
    (rent_id, equipment_id)
}
