use std::ops::{Deref, DerefMut};

use error_stack::{Report, ResultExt};
use sqlx::{Error, PgConnection, Pool, Postgres};

use kernel::interface::database::{DatabaseConnection, Transaction};
use kernel::interface::query::{
    DependOnAccountQuery, DependOnBeneficiaryQuery, DependOnEquipmentQuery, DependOnRentQuery,
    DependOnReturnQuery, DependOnSessionQuery,
};
use kernel::interface::update::{
    DependOnAccountModifier, DependOnBeneficiaryModifier, DependOnEquipmentModifier,
    DependOnRentModifier, DependOnReturnModifier, DependOnSessionModifier,
};
use kernel::KernelError;

use crate::env;
use crate::error::ConvertError;

pub use self::{account::*, beneficiary::*, equipment::*, rent::*, returned::*, session::*};

mod account;
mod beneficiary;
mod equipment;
mod rent;
mod returned;
mod session;

pub static POSTGRES_URL: &str = "POSTGRES_URL";

#[derive(Clone)]
pub struct PostgresDatabase {
    pool: Pool<Postgres>,
}

impl PostgresDatabase {
    pub async fn new() -> error_stack::Result<Self, KernelError> {
        let url = env(POSTGRES_URL)?;
        Self::connect(&url).await
    }

    pub async fn connect(url: &str) -> error_stack::Result<Self, KernelError> {
        let pool = Pool::connect(url).await.convert_error()?;
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .change_context_lazy(|| KernelError::Internal)
            .attach_printable_lazy(|| "Failed to apply migrations")?;
        tracing::info!("Connected to postgres");
        Ok(Self { pool })
    }
}

pub struct PostgresConnection(sqlx::Transaction<'static, Postgres>);

impl Deref for PostgresConnection {
    type Target = PgConnection;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for PostgresConnection {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

#[async_trait::async_trait]
impl DatabaseConnection for PostgresDatabase {
    type Transaction = PostgresConnection;
    async fn transact(&self) -> error_stack::Result<Self::Transaction, KernelError> {
        let con = self.pool.begin().await.convert_error()?;
        Ok(PostgresConnection(con))
    }
}

#[async_trait::async_trait]
impl Transaction for PostgresConnection {
    async fn commit(self) -> error_stack::Result<(), KernelError> {
        self.0.commit().await.convert_error()
    }
}

impl<T> ConvertError for Result<T, Error>
where
    T: 'static,
{
    type Ok = T;
    fn convert_error(self) -> error_stack::Result<T, KernelError> {
        self.map_err(|error| {
            let context = match &error {
                Error::PoolTimedOut => KernelError::Timeout,
                Error::Database(db) if db.is_unique_violation() => KernelError::Conflict,
                _ => KernelError::Internal,
            };
            Report::from(error).change_context(context)
        })
    }
}

impl DependOnBeneficiaryQuery for PostgresDatabase {
    type BeneficiaryQuery = PostgresBeneficiaryRepository;
    fn beneficiary_query(&self) -> &Self::BeneficiaryQuery {
        &PostgresBeneficiaryRepository
    }
}

impl DependOnBeneficiaryModifier for PostgresDatabase {
    type BeneficiaryModifier = PostgresBeneficiaryRepository;
    fn beneficiary_modifier(&self) -> &Self::BeneficiaryModifier {
        &PostgresBeneficiaryRepository
    }
}

impl DependOnEquipmentQuery for PostgresDatabase {
    type EquipmentQuery = PostgresEquipmentRepository;
    fn equipment_query(&self) -> &Self::EquipmentQuery {
        &PostgresEquipmentRepository
    }
}

impl DependOnEquipmentModifier for PostgresDatabase {
    type EquipmentModifier = PostgresEquipmentRepository;
    fn equipment_modifier(&self) -> &Self::EquipmentModifier {
        &PostgresEquipmentRepository
    }
}

impl DependOnRentQuery for PostgresDatabase {
    type RentQuery = PostgresRentRepository;
    fn rent_query(&self) -> &Self::RentQuery {
        &PostgresRentRepository
    }
}

impl DependOnRentModifier for PostgresDatabase {
    type RentModifier = PostgresRentRepository;
    fn rent_modifier(&self) -> &Self::RentModifier {
        &PostgresRentRepository
    }
}

impl DependOnReturnQuery for PostgresDatabase {
    type ReturnQuery = PostgresReturnRepository;
    fn return_query(&self) -> &Self::ReturnQuery {
        &PostgresReturnRepository
    }
}

impl DependOnReturnModifier for PostgresDatabase {
    type ReturnModifier = PostgresReturnRepository;
    fn return_modifier(&self) -> &Self::ReturnModifier {
        &PostgresReturnRepository
    }
}

impl DependOnAccountQuery for PostgresDatabase {
    type AccountQuery = PostgresAccountRepository;
    fn account_query(&self) -> &Self::AccountQuery {
        &PostgresAccountRepository
    }
}

impl DependOnAccountModifier for PostgresDatabase {
    type AccountModifier = PostgresAccountRepository;
    fn account_modifier(&self) -> &Self::AccountModifier {
        &PostgresAccountRepository
    }
}

impl DependOnSessionQuery for PostgresDatabase {
    type SessionQuery = PostgresSessionRepository;
    fn session_query(&self) -> &Self::SessionQuery {
        &PostgresSessionRepository
    }
}

impl DependOnSessionModifier for PostgresDatabase {
    type SessionModifier = PostgresSessionRepository;
    fn session_modifier(&self) -> &Self::SessionModifier {
        &PostgresSessionRepository
    }
}
