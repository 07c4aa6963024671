mod auth;
mod beneficiary;
mod equipment;
mod export;
mod rent;
mod report;
mod returned;

pub use self::{
    auth::*, beneficiary::*, equipment::*, export::*, rent::*, report::*, returned::*,
};
