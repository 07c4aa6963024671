use sqlx::PgConnection;
use time::OffsetDateTime;
use uuid::Uuid;

use kernel::interface::query::AccountQuery;
use kernel::interface::update::AccountModifier;
use kernel::prelude::entity::{Account, AccountId, CreatedAt, Email, PasswordHash};
use kernel::KernelError;

use crate::database::postgres::PostgresConnection;
use crate::error::ConvertError;

pub struct PostgresAccountRepository;

#[async_trait::async_trait]
impl AccountQuery for PostgresAccountRepository {
    type Transaction = PostgresConnection;

    async fn find_by_email(
        &self,
        con: &mut PostgresConnection,
        email: &Email,
    ) -> error_stack::Result<Option<Account>, KernelError> {
        PgAccountInternal::find_by_email(con, email).await
    }
}

#[async_trait::async_trait]
impl AccountModifier for PostgresAccountRepository {
    type Transaction = PostgresConnection;

    async fn create(
        &self,
        con: &mut PostgresConnection,
        account: &Account,
    ) -> error_stack::Result<(), KernelError> {
        PgAccountInternal::create(con, account).await
    }
}

#[derive(sqlx::FromRow)]
struct AccountRow {
    id: Uuid,
    email: String,
    password_hash: String,
    disabled: bool,
    created_at: OffsetDateTime,
}

impl From<AccountRow> for Account {
    fn from(value: AccountRow) -> Self {
        Account::new(
            AccountId::new(value.id),
            Email::new(value.email),
            PasswordHash::new(value.password_hash),
            value.disabled,
            CreatedAt::new(value.created_at),
        )
    }
}

pub(in crate::database) struct PgAccountInternal;

impl PgAccountInternal {
    async fn find_by_email(
        con: &mut PgConnection,
        email: &Email,
    ) -> error_stack::Result<Option<Account>, KernelError> {
        let row = sqlx::query_as::<_, AccountRow>(
            // language=postgresql
            r#"
            SELECT id, email, password_hash, disabled, created_at
            FROM accounts
            WHERE email = $1
            "#,
        )
        .bind(email.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        Ok(row.map(Account::from))
    }

    async fn create(con: &mut PgConnection, account: &Account) -> error_stack::Result<(), KernelError> {
        sqlx::query(
            // language=postgresql
            r#"
            INSERT INTO accounts (id, email, password_hash, disabled, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(account.id().as_ref())
        .bind(account.email().as_ref())
        .bind(account.password_hash().as_ref())
        .bind(account.disabled())
        .bind(account.created_at().as_ref())
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }
}
