use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::{Account, Email};
use crate::KernelError;

#[async_trait::async_trait]
pub trait AccountQuery: 'static + Sync + Send {
    type Transaction: Transaction;
    async fn find_by_email(
        &self,
        con: &mut Self::Transaction,
        email: &Email,
    ) -> error_stack::Result<Option<Account>, KernelError>;
}

pub trait DependOnAccountQuery: 'static + Sync + Send + DependOnDatabaseConnection {
    type AccountQuery: AccountQuery<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn account_query(&self) -> &Self::AccountQuery;
}
