use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::{EquipmentId, Rent, RentId};
use crate::KernelError;

#[async_trait::async_trait]
pub trait RentQuery: 'static + Sync + Send {
    type Transaction: Transaction;
    async fn find_all(
        &self,
        con: &mut Self::Transaction,
    ) -> error_stack::Result<Vec<Rent>, KernelError>;
    async fn find_by_id(
        &self,
        con: &mut Self::Transaction,
        id: &RentId,
    ) -> error_stack::Result<Option<Rent>, KernelError>;
    async fn find_by_equipment_id(
        &self,
        con: &mut Self::Transaction,
        equipment_id: &EquipmentId,
    ) -> error_stack::Result<Vec<Rent>, KernelError>;
}

pub trait DependOnRentQuery: 'static + Sync + Send + DependOnDatabaseConnection {
    type RentQuery: RentQuery<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn rent_query(&self) -> &Self::RentQuery;
}
