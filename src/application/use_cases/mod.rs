mod get_history;
mod login;
mod submit_prompt;

pub use get_history::*;
pub use login::*;
pub use submit_prompt::*;
