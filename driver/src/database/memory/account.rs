use error_stack::Report;

use kernel::interface::query::AccountQuery;
use kernel::interface::update::AccountModifier;
use kernel::prelude::entity::{Account, Email};
use kernel::KernelError;

use crate::database::memory::MemoryConnection;

pub struct InMemoryAccountRepository;

#[async_trait::async_trait]
impl AccountQuery for InMemoryAccountRepository {
    type Transaction = MemoryConnection;

    async fn find_by_email(
        &self,
        con: &mut MemoryConnection,
        email: &Email,
    ) -> error_stack::Result<Option<Account>, KernelError> {
        Ok(con.working.accounts.get(email).cloned())
    }
}

#[async_trait::async_trait]
impl AccountModifier for InMemoryAccountRepository {
    type Transaction = MemoryConnection;

    async fn create(
        &self,
        con: &mut MemoryConnection,
        account: &Account,
    ) -> error_stack::Result<(), KernelError> {
        if con.working.accounts.contains_key(account.email()) {
            return Err(Report::new(KernelError::Conflict)
                .attach_printable(format!("Account {} already exists", account.email().as_ref())));
        }
        con.working
            .accounts
            .insert(account.email().clone(), account.clone());
        Ok(())
    }
}
