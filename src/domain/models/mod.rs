mod call_outcome;
mod history_entry;
mod retry_policy;
mod user;

pub use call_outcome::*;
pub use history_entry::*;
pub use retry_policy::*;
pub use user::*;
