use error_stack::Report;

use kernel::interface::query::EquipmentQuery;
use kernel::interface::update::EquipmentModifier;
use kernel::prelude::entity::{Equipment, EquipmentId, EquipmentStatus};
use kernel::KernelError;

use crate::database::memory::{sorted, MemoryConnection};

pub struct InMemoryEquipmentRepository;

fn by_creation(equipment: &Equipment) -> (time::OffsetDateTime, uuid::Uuid) {
    (*equipment.created_at().as_ref(), *equipment.id().as_ref())
}

#[async_trait::async_trait]
impl EquipmentQuery for InMemoryEquipmentRepository {
    type Transaction = MemoryConnection;

    async fn find_all(
        &self,
        con: &mut MemoryConnection,
    ) -> error_stack::Result<Vec<Equipment>, KernelError> {
        Ok(sorted(con.working.equipments.values().cloned(), by_creation))
    }

    async fn find_by_id(
        &self,
        con: &mut MemoryConnection,
        id: &EquipmentId,
    ) -> error_stack::Result<Option<Equipment>, KernelError> {
        Ok(con.working.equipments.get(id).cloned())
    }

    async fn find_by_status(
        &self,
        con: &mut MemoryConnection,
        status: &EquipmentStatus,
    ) -> error_stack::Result<Vec<Equipment>, KernelError> {
        let matching = con
            .working
            .equipments
            .values()
            .filter(|equipment| equipment.status() == status)
            .cloned();
        Ok(sorted(matching, by_creation))
    }
}

#[async_trait::async_trait]
impl EquipmentModifier for InMemoryEquipmentRepository {
    type Transaction = MemoryConnection;

    async fn create(
        &self,
        con: &mut MemoryConnection,
        equipment: &Equipment,
    ) -> error_stack::Result<(), KernelError> {
        if con.working.equipments.contains_key(equipment.id()) {
            return Err(Report::new(KernelError::Conflict).attach_printable(format!(
                "Equipment {} already exists",
                equipment.id().as_ref()
            )));
        }
        con.working
            .equipments
            .insert(equipment.id().clone(), equipment.clone());
        Ok(())
    }

    async fn update(
        &self,
        con: &mut MemoryConnection,
        equipment: &Equipment,
        expected: &EquipmentStatus,
    ) -> error_stack::Result<(), KernelError> {
        match con.working.equipments.get_mut(equipment.id()) {
            Some(stored) if stored.status() == expected => {
                *stored = equipment.clone();
                Ok(())
            }
            Some(_) => Err(Report::new(KernelError::Concurrency).attach_printable(format!(
                "Equipment {} is no longer {}",
                equipment.id().as_ref(),
                expected
            ))),
            None => Err(Report::new(KernelError::NotFound)
                .attach_printable(format!("Equipment {} not found", equipment.id().as_ref()))),
        }
    }

    async fn transition(
        &self,
        con: &mut MemoryConnection,
        equipment: &Equipment,
        expected: &EquipmentStatus,
    ) -> error_stack::Result<(), KernelError> {
        match con.working.equipments.get_mut(equipment.id()) {
            Some(stored) if stored.status() == expected => {
                *stored = stored.clone().reconstruct(|fields| {
                    fields.status = *equipment.status();
                    fields.condition = *equipment.condition();
                });
                Ok(())
            }
            _ => Err(Report::new(KernelError::Concurrency).attach_printable(format!(
                "Equipment {} is no longer {}",
                equipment.id().as_ref(),
                expected
            ))),
        }
    }

    async fn delete(
        &self,
        con: &mut MemoryConnection,
        equipment_id: &EquipmentId,
    ) -> error_stack::Result<(), KernelError> {
        con.working.equipments.remove(equipment_id);
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use time::macros::date;
    use uuid::Uuid;

    use kernel::interface::database::DatabaseConnection;
    use kernel::interface::query::EquipmentQuery;
    use kernel::interface::update::EquipmentModifier;
    use kernel::prelude::entity::{
        CreatedAt, CreatedBy, Equipment, EquipmentCondition, EquipmentId, EquipmentName,
        EquipmentSource, EquipmentStatus, ExpiryDate, ManufacturingDate, SerialNumber,
    };
    use kernel::KernelError;

    use crate::database::memory::{InMemoryDatabase, InMemoryEquipmentRepository};

    #[tokio::test]
    async fn transition_is_conditional() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new();
        let mut con = db.transact().await?;
        let mut equipment = Equipment::new(
            EquipmentId::new(Uuid::new_v4()),
            EquipmentName::new("Hospital Bed"),
            SerialNumber::new("HB-7"),
            ManufacturingDate::new(date!(2020 - 01 - 01)),
            ExpiryDate::new(date!(2035 - 01 - 01)),
            EquipmentStatus::Available,
            EquipmentSource::Donated,
            EquipmentCondition::Ok,
            CreatedBy::new("admin@example.org"),
            CreatedAt::now(),
        );
        InMemoryEquipmentRepository
            .create(&mut con, &equipment)
            .await?;

        equipment.hand_out()?;
        InMemoryEquipmentRepository
            .transition(&mut con, &equipment, &EquipmentStatus::Available)
            .await?;
        let rented = InMemoryEquipmentRepository
            .find_by_status(&mut con, &EquipmentStatus::Rented)
            .await?;
        assert_eq!(rented, vec![equipment.clone()]);

        let error = InMemoryEquipmentRepository
            .transition(&mut con, &equipment, &EquipmentStatus::Available)
            .await
            .unwrap_err();
        assert!(matches!(error.current_context(), KernelError::Concurrency));

        // an edit read while the unit was still available must not undo the hand-out
        let stale = equipment.clone().reconstruct(|fields| {
            fields.status = EquipmentStatus::Available;
        });
        let error = InMemoryEquipmentRepository
            .update(&mut con, &stale, &EquipmentStatus::Available)
            .await
            .unwrap_err();
        assert!(matches!(error.current_context(), KernelError::Concurrency));
        InMemoryEquipmentRepository
            .update(&mut con, &stale, &EquipmentStatus::Rented)
            .await?;
        let available = InMemoryEquipmentRepository
            .find_by_status(&mut con, &EquipmentStatus::Available)
            .await?;
        assert_eq!(available, vec![stale]);
        Ok(())
    }
}
