use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::{Session, SessionToken};
use crate::KernelError;

#[async_trait::async_trait]
pub trait SessionQuery: 'static + Sync + Send {
    type Transaction: Transaction;
    async fn find_by_token(
        &self,
        con: &mut Self::Transaction,
        token: &SessionToken,
    ) -> error_stack::Result<Option<Session>, KernelError>;
}

pub trait DependOnSessionQuery: 'static + Sync + Send + DependOnDatabaseConnection {
    type SessionQuery: SessionQuery<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn session_query(&self) -> &Self::SessionQuery;
}
