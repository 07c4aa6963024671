mod account;
mod beneficiary;
mod equipment;
mod rent;
mod returned;
mod session;

pub use self::{account::*, beneficiary::*, equipment::*, rent::*, returned::*, session::*};
