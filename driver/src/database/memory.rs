use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, OwnedMutexGuard};

use kernel::interface::database::{DatabaseConnection, Transaction};
use kernel::interface::query::{
    DependOnAccountQuery, DependOnBeneficiaryQuery, DependOnEquipmentQuery, DependOnRentQuery,
    DependOnReturnQuery, DependOnSessionQuery,
};
use kernel::interface::update::{
    DependOnAccountModifier, DependOnBeneficiaryModifier, DependOnEquipmentModifier,
    DependOnRentModifier, DependOnReturnModifier, DependOnSessionModifier,
};
use kernel::prelude::entity::{
    Account, Beneficiary, BeneficiaryId, Email, Equipment, EquipmentId, Rent, RentId, Return,
    ReturnId, Session, SessionToken,
};
use kernel::KernelError;

pub use self::{account::*, beneficiary::*, equipment::*, rent::*, returned::*, session::*};

mod account;
mod beneficiary;
mod equipment;
mod rent;
mod returned;
mod session;

#[derive(Debug, Clone, Default)]
pub(in crate::database) struct MemoryStore {
    beneficiaries: HashMap<BeneficiaryId, Beneficiary>,
    equipments: HashMap<EquipmentId, Equipment>,
    rents: HashMap<RentId, Rent>,
    returns: HashMap<ReturnId, Return>,
    accounts: HashMap<Email, Account>,
    sessions: HashMap<SessionToken, Session>,
}

/// Process-local store used when no PostgreSQL url is configured.
///
/// Transactions are serialized: `transact` holds the store lock until the
/// connection is committed or dropped, and writes go to a working copy that
/// replaces the shared state only on commit.
///
/// Every transaction, read-only ones included, clones the whole store under the
/// global lock, so each request costs O(records) and requests run one at a time.
/// Meant for development and tests; production runs on [`PostgresDatabase`](crate::database::PostgresDatabase).
#[derive(Clone, Default)]
pub struct InMemoryDatabase {
    store: Arc<Mutex<MemoryStore>>,
}

impl InMemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }
}

pub struct MemoryConnection {
    guard: OwnedMutexGuard<MemoryStore>,
    working: MemoryStore,
}

#[async_trait::async_trait]
impl DatabaseConnection for InMemoryDatabase {
    type Transaction = MemoryConnection;
    async fn transact(&self) -> error_stack::Result<Self::Transaction, KernelError> {
        let guard = self.store.clone().lock_owned().await;
        let working = guard.clone();
        Ok(MemoryConnection { guard, working })
    }
}

#[async_trait::async_trait]
impl Transaction for MemoryConnection {
    async fn commit(self) -> error_stack::Result<(), KernelError> {
        let MemoryConnection { mut guard, working } = self;
        *guard = working;
        Ok(())
    }
}

/// Orders records the way the SQL backend does: oldest first, id as tie breaker.
fn sorted<T, K: Ord>(records: impl Iterator<Item = T>, key: impl Fn(&T) -> K) -> Vec<T> {
    let mut records = records.collect::<Vec<_>>();
    records.sort_by_key(key);
    records
}

impl DependOnBeneficiaryQuery for InMemoryDatabase {
    type BeneficiaryQuery = InMemoryBeneficiaryRepository;
    fn beneficiary_query(&self) -> &Self::BeneficiaryQuery {
        &InMemoryBeneficiaryRepository
    }
}

impl DependOnBeneficiaryModifier for InMemoryDatabase {
    type BeneficiaryModifier = InMemoryBeneficiaryRepository;
    fn beneficiary_modifier(&self) -> &Self::BeneficiaryModifier {
        &InMemoryBeneficiaryRepository
    }
}

impl DependOnEquipmentQuery for InMemoryDatabase {
    type EquipmentQuery = InMemoryEquipmentRepository;
    fn equipment_query(&self) -> &Self::EquipmentQuery {
        &InMemoryEquipmentRepository
    }
}

impl DependOnEquipmentModifier for InMemoryDatabase {
    type EquipmentModifier = InMemoryEquipmentRepository;
    fn equipment_modifier(&self) -> &Self::EquipmentModifier {
        &InMemoryEquipmentRepository
    }
}

impl DependOnRentQuery for InMemoryDatabase {
    type RentQuery = InMemoryRentRepository;
    fn rent_query(&self) -> &Self::RentQuery {
        &InMemoryRentRepository
    }
}

impl DependOnRentModifier for InMemoryDatabase {
    type RentModifier = InMemoryRentRepository;
    fn rent_modifier(&self) -> &Self::RentModifier {
        &InMemoryRentRepository
    }
}

impl DependOnReturnQuery for InMemoryDatabase {
    type ReturnQuery = InMemoryReturnRepository;
    fn return_query(&self) -> &Self::ReturnQuery {
        &InMemoryReturnRepository
    }
}

impl DependOnReturnModifier for InMemoryDatabase {
    type ReturnModifier = InMemoryReturnRepository;
    fn return_modifier(&self) -> &Self::ReturnModifier {
        &InMemoryReturnRepository
    }
}

impl DependOnAccountQuery for InMemoryDatabase {
    type AccountQuery = InMemoryAccountRepository;
    fn account_query(&self) -> &Self::AccountQuery {
        &InMemoryAccountRepository
    }
}

impl DependOnAccountModifier for InMemoryDatabase {
    type AccountModifier = InMemoryAccountRepository;
    fn account_modifier(&self) -> &Self::AccountModifier {
        &InMemoryAccountRepository
    }
}

impl DependOnSessionQuery for InMemoryDatabase {
    type SessionQuery = InMemorySessionRepository;
    fn session_query(&self) -> &Self::SessionQuery {
        &InMemorySessionRepository
    }
}

impl DependOnSessionModifier for InMemoryDatabase {
    type SessionModifier = InMemorySessionRepository;
    fn session_modifier(&self) -> &Self::SessionModifier {
        &InMemorySessionRepository
    }
}
