mod account;
mod beneficiary;
mod common;
mod equipment;
mod rent;
mod returned;
mod session;

pub use self::{
    account::*, beneficiary::*, common::*, equipment::*, rent::*, returned::*, session::*,
};
