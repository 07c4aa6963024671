use kernel::interface::query::SessionQuery;
use kernel::interface::update::SessionModifier;
use kernel::prelude::entity::{Session, SessionToken};
use kernel::KernelError;

use crate::database::memory::MemoryConnection;

pub struct InMemorySessionRepository;

#[async_trait::async_trait]
impl SessionQuery for InMemorySessionRepository {
    type Transaction = MemoryConnection;

    async fn find_by_token(
        &self,
        con: &mut MemoryConnection,
        token: &SessionToken,
    ) -> error_stack::Result<Option<Session>, KernelError> {
        Ok(con.working.sessions.get(token).cloned())
    }
}

#[async_trait::async_trait]
impl SessionModifier for InMemorySessionRepository {
    type Transaction = MemoryConnection;

    async fn create(
        &self,
        con: &mut MemoryConnection,
        session: &Session,
    ) -> error_stack::Result<(), KernelError> {
        con.working
            .sessions
            .insert(session.token().clone(), session.clone());
        Ok(())
    }

    async fn delete(
        &self,
        con: &mut MemoryConnection,
        token: &SessionToken,
    ) -> error_stack::Result<(), KernelError> {
        con.working.sessions.remove(token);
        Ok(())
    }
}
