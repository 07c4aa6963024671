use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::{Equipment, EquipmentId, EquipmentStatus};
use crate::KernelError;

#[async_trait::async_trait]
pub trait EquipmentQuery: 'static + Sync + Send {
    type Transaction: Transaction;
    async fn find_all(
        &self,
        con: &mut Self::Transaction,
    ) -> error_stack::Result<Vec<Equipment>, KernelError>;
    async fn find_by_id(
        &self,
        con: &mut Self::Transaction,
        id: &EquipmentId,
    ) -> error_stack::Result<Option<Equipment>, KernelError>;
    async fn find_by_status(
        &self,
        con: &mut Self::Transaction,
        status: &EquipmentStatus,
    ) -> error_stack::Result<Vec<Equipment>, KernelError>;
}

pub trait DependOnEquipmentQuery: 'static + Sync + Send + DependOnDatabaseConnection {
    type EquipmentQuery: EquipmentQuery<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn equipment_query(&self) -> &Self::EquipmentQuery;
}
