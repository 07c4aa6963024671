mod created_by;
mod notes;
mod time;

pub use self::{created_by::*, notes::*, time::*};
