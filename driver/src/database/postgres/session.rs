use sqlx::PgConnection;
use time::OffsetDateTime;
use uuid::Uuid;

use kernel::interface::query::SessionQuery;
use kernel::interface::update::SessionModifier;
use kernel::prelude::entity::{AccountId, Email, ExpiresAt, Session, SessionToken};
use kernel::KernelError;

use crate::database::postgres::PostgresConnection;
use crate::error::ConvertError;

pub struct PostgresSessionRepository;

#[async_trait::async_trait]
impl SessionQuery for PostgresSessionRepository {
    type Transaction = PostgresConnection;

    async fn find_by_token(
        &self,
        con: &mut PostgresConnection,
        token: &SessionToken,
    ) -> error_stack::Result<Option<Session>, KernelError> {
        PgSessionInternal::find_by_token(con, token).await
    }
}

#[async_trait::async_trait]
impl SessionModifier for PostgresSessionRepository {
    type Transaction = PostgresConnection;

    async fn create(
        &self,
        con: &mut PostgresConnection,
        session: &Session,
    ) -> error_stack::Result<(), KernelError> {
        PgSessionInternal::create(con, session).await
    }

    async fn delete(
        &self,
        con: &mut PostgresConnection,
        token: &SessionToken,
    ) -> error_stack::Result<(), KernelError> {
        PgSessionInternal::delete(con, token).await
    }
}

#[derive(sqlx::FromRow)]
struct SessionRow {
    token: Uuid,
    account_id: Uuid,
    email: String,
    expires_at: OffsetDateTime,
}

impl From<SessionRow> for Session {
    fn from(value: SessionRow) -> Self {
        Session::new(
            SessionToken::new(value.token),
            AccountId::new(value.account_id),
            Email::new(value.email),
            ExpiresAt::new(value.expires_at),
        )
    }
}

pub(in crate::database) struct PgSessionInternal;

impl PgSessionInternal {
    async fn find_by_token(
        con: &mut PgConnection,
        token: &SessionToken,
    ) -> error_stack::Result<Option<Session>, KernelError> {
        let row = sqlx::query_as::<_, SessionRow>(
            // language=postgresql
            r#"
            SELECT token, account_id, email, expires_at
            FROM sessions
            WHERE token = $1
            "#,
        )
        .bind(token.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        Ok(row.map(Session::from))
    }

    async fn create(con: &mut PgConnection, session: &Session) -> error_stack::Result<(), KernelError> {
        sqlx::query(
            // language=postgresql
            r#"
            INSERT INTO sessions (token, account_id, email, expires_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(session.token().as_ref())
        .bind(session.account_id().as_ref())
        .bind(session.email().as_ref())
        .bind(session.expires_at().as_ref())
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }

    async fn delete(con: &mut PgConnection, token: &SessionToken) -> error_stack::Result<(), KernelError> {
        sqlx::query(
            // language=postgresql
            r#"
            DELETE FROM sessions
            WHERE token = $1
            "#,
        )
        .bind(token.as_ref())
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use time::{Duration, OffsetDateTime};
    use uuid::Uuid;

    use kernel::interface::database::DatabaseConnection;
    use kernel::interface::query::SessionQuery;
    use kernel::interface::update::{AccountModifier, SessionModifier};
    use kernel::prelude::entity::{
        Account, AccountId, CreatedAt, Email, ExpiresAt, PasswordHash, Session, SessionToken,
    };
    use kernel::KernelError;

    use crate::database::postgres::{
        PostgresAccountRepository, PostgresDatabase, PostgresSessionRepository,
    };

    #[test_with::env(POSTGRES_TEST)]
    #[tokio::test]
    async fn test() -> error_stack::Result<(), KernelError> {
        let db = PostgresDatabase::new().await?;
        let mut con = db.transact().await?;
        let email = Email::new(format!("{}@example.org", Uuid::new_v4()));
        let account = Account::new(
            AccountId::new(Uuid::new_v4()),
            email.clone(),
            PasswordHash::new("hash"),
            false,
            CreatedAt::now(),
        );
        PostgresAccountRepository.create(&mut con, &account).await?;

        let session = Session::new(
            SessionToken::generate(),
            account.id().clone(),
            email,
            ExpiresAt::new(OffsetDateTime::now_utc() + Duration::hours(1)),
        );
        PostgresSessionRepository.create(&mut con, &session).await?;
        let found = PostgresSessionRepository
            .find_by_token(&mut con, session.token())
            .await?
            .map(|found| found.account_id().clone());
        assert_eq!(found, Some(account.id().clone()));

        PostgresSessionRepository
            .delete(&mut con, session.token())
            .await?;
        let found = PostgresSessionRepository
            .find_by_token(&mut con, session.token())
            .await?;
        assert!(found.is_none());
        Ok(())
    }
}
