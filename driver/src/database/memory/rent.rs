use error_stack::Report;

use kernel::interface::query::RentQuery;
use kernel::interface::update::RentModifier;
use kernel::prelude::entity::{EquipmentId, Rent, RentId};
use kernel::KernelError;

use crate::database::memory::{sorted, MemoryConnection};

pub struct InMemoryRentRepository;

fn by_creation(rent: &Rent) -> (time::OffsetDateTime, uuid::Uuid) {
    (*rent.created_at().as_ref(), *rent.id().as_ref())
}

#[async_trait::async_trait]
impl RentQuery for InMemoryRentRepository {
    type Transaction = MemoryConnection;

    async fn find_all(
        &self,
        con: &mut MemoryConnection,
    ) -> error_stack::Result<Vec<Rent>, KernelError> {
        Ok(sorted(con.working.rents.values().cloned(), by_creation))
    }

    async fn find_by_id(
        &self,
        con: &mut MemoryConnection,
        id: &RentId,
    ) -> error_stack::Result<Option<Rent>, KernelError> {
        Ok(con.working.rents.get(id).cloned())
    }

    async fn find_by_equipment_id(
        &self,
        con: &mut MemoryConnection,
        equipment_id: &EquipmentId,
    ) -> error_stack::Result<Vec<Rent>, KernelError> {
        let matching = con
            .working
            .rents
            .values()
            .filter(|rent| rent.equipment_id() == equipment_id)
            .cloned();
        Ok(sorted(matching, by_creation))
    }
}

#[async_trait::async_trait]
impl RentModifier for InMemoryRentRepository {
    type Transaction = MemoryConnection;

    async fn create(
        &self,
        con: &mut MemoryConnection,
        rent: &Rent,
    ) -> error_stack::Result<(), KernelError> {
        let taken = con.working.rents.contains_key(rent.id())
            || con
                .working
                .rents
                .values()
                .any(|open| open.equipment_id() == rent.equipment_id());
        if taken {
            return Err(Report::new(KernelError::Conflict).attach_printable(format!(
                "Equipment {} already has an open rent",
                rent.equipment_id().as_ref()
            )));
        }
        con.working.rents.insert(rent.id().clone(), rent.clone());
        Ok(())
    }

    async fn delete(
        &self,
        con: &mut MemoryConnection,
        rent_id: &RentId,
    ) -> error_stack::Result<(), KernelError> {
        match con.working.rents.remove(rent_id) {
            Some(_) => Ok(()),
            None => Err(Report::new(KernelError::Concurrency)
                .attach_printable(format!("Rent {} was already closed", rent_id.as_ref()))),
        }
    }
}
