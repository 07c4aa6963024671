use error_stack::Report;

use kernel::interface::query::ReturnQuery;
use kernel::interface::update::ReturnModifier;
use kernel::prelude::entity::{EquipmentId, Return};
use kernel::KernelError;

use crate::database::memory::{sorted, MemoryConnection};

pub struct InMemoryReturnRepository;

fn by_creation(returned: &Return) -> (time::OffsetDateTime, uuid::Uuid) {
    (*returned.created_at().as_ref(), *returned.id().as_ref())
}

#[async_trait::async_trait]
impl ReturnQuery for InMemoryReturnRepository {
    type Transaction = MemoryConnection;

    async fn find_all(
        &self,
        con: &mut MemoryConnection,
    ) -> error_stack::Result<Vec<Return>, KernelError> {
        Ok(sorted(con.working.returns.values().cloned(), by_creation))
    }

    async fn find_by_equipment_id(
        &self,
        con: &mut MemoryConnection,
        equipment_id: &EquipmentId,
    ) -> error_stack::Result<Vec<Return>, KernelError> {
        let matching = con
            .working
            .returns
            .values()
            .filter(|returned| returned.equipment_id() == equipment_id)
            .cloned();
        Ok(sorted(matching, by_creation))
    }
}

#[async_trait::async_trait]
impl ReturnModifier for InMemoryReturnRepository {
    type Transaction = MemoryConnection;

    async fn create(
        &self,
        con: &mut MemoryConnection,
        returned: &Return,
    ) -> error_stack::Result<(), KernelError> {
        if con.working.returns.contains_key(returned.id()) {
            return Err(Report::new(KernelError::Conflict).attach_printable(format!(
                "Return {} already exists",
                returned.id().as_ref()
            )));
        }
        con.working
            .returns
            .insert(returned.id().clone(), returned.clone());
        Ok(())
    }
}
