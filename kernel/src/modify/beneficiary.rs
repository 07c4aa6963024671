use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::{Beneficiary, BeneficiaryId};
use crate::KernelError;

#[async_trait::async_trait]
pub trait BeneficiaryModifier: 'static + Sync + Send {
    type Transaction: Transaction;
    async fn create(
        &self,
        con: &mut Self::Transaction,
        beneficiary: &Beneficiary,
    ) -> error_stack::Result<(), KernelError>;
    async fn update(
        &self,
        con: &mut Self::Transaction,
        beneficiary: &Beneficiary,
    ) -> error_stack::Result<(), KernelError>;
    async fn delete(
        &self,
        con: &mut Self::Transaction,
        beneficiary_id: &BeneficiaryId,
    ) -> error_stack::Result<(), KernelError>;
}

pub trait DependOnBeneficiaryModifier: 'static + Sync + Send + DependOnDatabaseConnection {
    type BeneficiaryModifier: BeneficiaryModifier<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn beneficiary_modifier(&self) -> &Self::BeneficiaryModifier;
}
