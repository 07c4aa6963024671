use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::{Beneficiary, BeneficiaryId};
use crate::KernelError;

#[async_trait::async_trait]
pub trait BeneficiaryQuery: 'static + Sync + Send {
    type Transaction: Transaction;
    async fn find_all(
        &self,
        con: &mut Self::Transaction,
    ) -> error_stack::Result<Vec<Beneficiary>, KernelError>;
    async fn find_by_id(
        &self,
        con: &mut Self::Transaction,
        id: &BeneficiaryId,
    ) -> error_stack::Result<Option<Beneficiary>, KernelError>;
}

pub trait DependOnBeneficiaryQuery: 'static + Sync + Send + DependOnDatabaseConnection {
    type BeneficiaryQuery: BeneficiaryQuery<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn beneficiary_query(&self) -> &Self::BeneficiaryQuery;
}
