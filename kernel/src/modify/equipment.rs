use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::{Equipment, EquipmentId, EquipmentStatus};
use crate::KernelError;

#[async_trait::async_trait]
pub trait EquipmentModifier: 'static + Sync + Send {
    type Transaction: Transaction;
    async fn create(
        &self,
        con: &mut Self::Transaction,
        equipment: &Equipment,
    ) -> error_stack::Result<(), KernelError>;
    /// Full-record write guarded like [`EquipmentModifier::transition`]: fails with
    /// [`KernelError::Concurrency`] when the stored status is no longer `expected`.
    async fn update(
        &self,
        con: &mut Self::Transaction,
        equipment: &Equipment,
        expected: &EquipmentStatus,
    ) -> error_stack::Result<(), KernelError>;
    /// Writes `status` and `condition` only if the stored status still equals `expected`.
    /// Fails with [`KernelError::Concurrency`] otherwise.
    async fn transition(
        &self,
        con: &mut Self::Transaction,
        equipment: &Equipment,
        expected: &EquipmentStatus,
    ) -> error_stack::Result<(), KernelError>;
    async fn delete(
        &self,
        con: &mut Self::Transaction,
        equipment_id: &EquipmentId,
    ) -> error_stack::Result<(), KernelError>;
}

pub trait DependOnEquipmentModifier: 'static + Sync + Send + DependOnDatabaseConnection {
    type EquipmentModifier: EquipmentModifier<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn equipment_modifier(&self) -> &Self::EquipmentModifier;
}
