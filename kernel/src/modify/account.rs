use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::Account;
use crate::KernelError;

#[async_trait::async_trait]
pub trait AccountModifier: 'static + Sync + Send {
    type Transaction: Transaction;
    async fn create(
        &self,
        con: &mut Self::Transaction,
        account: &Account,
    ) -> error_stack::Result<(), KernelError>;
}

pub trait DependOnAccountModifier: 'static + Sync + Send + DependOnDatabaseConnection {
    type AccountModifier: AccountModifier<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn account_modifier(&self) -> &Self::AccountModifier;
}
