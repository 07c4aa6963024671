use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::{EquipmentId, Return};
use crate::KernelError;

#[async_trait::async_trait]
pub trait ReturnQuery: 'static + Sync + Send {
    type Transaction: Transaction;
    async fn find_all(
        &self,
        con: &mut Self::Transaction,
    ) -> error_stack::Result<Vec<Return>, KernelError>;
    async fn find_by_equipment_id(
        &self,
        con: &mut Self::Transaction,
        equipment_id: &EquipmentId,
    ) -> error_stack::Result<Vec<Return>, KernelError>;
}

pub trait DependOnReturnQuery: 'static + Sync + Send + DependOnDatabaseConnection {
    type ReturnQuery: ReturnQuery<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn return_query(&self) -> &Self::ReturnQuery;
}
