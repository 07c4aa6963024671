use std::ops::Deref;
use std::sync::Arc;

use kernel::interface::database::DependOnDatabaseConnection;
use kernel::interface::query::{
    DependOnAccountQuery, DependOnBeneficiaryQuery, DependOnEquipmentQuery, DependOnRentQuery,
    DependOnReturnQuery, DependOnSessionQuery,
};
use kernel::interface::update::{
    DependOnAccountModifier, DependOnBeneficiaryModifier, DependOnEquipmentModifier,
    DependOnRentModifier, DependOnReturnModifier, DependOnSessionModifier,
};

use crate::config::ServerConfig;

/// Everything a data store must provide to serve the console.
pub trait Backend:
    'static
    + Sync
    + Send
    + DependOnDatabaseConnection
    + DependOnBeneficiaryQuery
    + DependOnBeneficiaryModifier
    + DependOnEquipmentQuery
    + DependOnEquipmentModifier
    + DependOnRentQuery
    + DependOnRentModifier
    + DependOnReturnQuery
    + DependOnReturnModifier
    + DependOnAccountQuery
    + DependOnAccountModifier
    + DependOnSessionQuery
    + DependOnSessionModifier
{
}

impl<T> Backend for T where
    T: DependOnDatabaseConnection
        + DependOnBeneficiaryQuery
        + DependOnBeneficiaryModifier
        + DependOnEquipmentQuery
        + DependOnEquipmentModifier
        + DependOnRentQuery
        + DependOnRentModifier
        + DependOnReturnQuery
        + DependOnReturnModifier
        + DependOnAccountQuery
        + DependOnAccountModifier
        + DependOnSessionQuery
        + DependOnSessionModifier
{
}

pub struct AppModule<D>(Arc<Handler<D>>);

impl<D: Backend> AppModule<D> {
    pub fn new(database: D, config: ServerConfig) -> Self {
        Self(Arc::new(Handler { database, config }))
    }
}

impl<D> Clone for AppModule<D> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<D> Deref for AppModule<D> {
    type Target = Handler<D>;
    fn deref(&self) -> &Self::Target {
        Deref::deref(&self.0)
    }
}

pub struct Handler<D> {
    database: D,
    config: ServerConfig,
}

impl<D> Handler<D> {
    pub fn database(&self) -> &D {
        &self.database
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }
}
