use error_stack::Report;

use kernel::interface::query::BeneficiaryQuery;
use kernel::interface::update::BeneficiaryModifier;
use kernel::prelude::entity::{Beneficiary, BeneficiaryId};
use kernel::KernelError;

use crate::database::memory::{sorted, MemoryConnection};

pub struct InMemoryBeneficiaryRepository;

#[async_trait::async_trait]
impl BeneficiaryQuery for InMemoryBeneficiaryRepository {
    type Transaction = MemoryConnection;

    async fn find_all(
        &self,
        con: &mut MemoryConnection,
    ) -> error_stack::Result<Vec<Beneficiary>, KernelError> {
        Ok(sorted(
            con.working.beneficiaries.values().cloned(),
            |beneficiary| (*beneficiary.created_at().as_ref(), *beneficiary.id().as_ref()),
        ))
    }

    async fn find_by_id(
        &self,
        con: &mut MemoryConnection,
        id: &BeneficiaryId,
    ) -> error_stack::Result<Option<Beneficiary>, KernelError> {
        Ok(con.working.beneficiaries.get(id).cloned())
    }
}

#[async_trait::async_trait]
impl BeneficiaryModifier for InMemoryBeneficiaryRepository {
    type Transaction = MemoryConnection;

    async fn create(
        &self,
        con: &mut MemoryConnection,
        beneficiary: &Beneficiary,
    ) -> error_stack::Result<(), KernelError> {
        if con.working.beneficiaries.contains_key(beneficiary.id()) {
            return Err(Report::new(KernelError::Conflict).attach_printable(format!(
                "Beneficiary {} already exists",
                beneficiary.id().as_ref()
            )));
        }
        con.working
            .beneficiaries
            .insert(beneficiary.id().clone(), beneficiary.clone());
        Ok(())
    }

    async fn update(
        &self,
        con: &mut MemoryConnection,
        beneficiary: &Beneficiary,
    ) -> error_stack::Result<(), KernelError> {
        match con.working.beneficiaries.get_mut(beneficiary.id()) {
            Some(stored) => {
                *stored = beneficiary.clone();
                Ok(())
            }
            None => Err(Report::new(KernelError::NotFound)
                .attach_printable(format!("Beneficiary {} not found", beneficiary.id().as_ref()))),
        }
    }

    async fn delete(
        &self,
        con: &mut MemoryConnection,
        beneficiary_id: &BeneficiaryId,
    ) -> error_stack::Result<(), KernelError> {
        con.working.beneficiaries.remove(beneficiary_id);
        Ok(())
    }
}
