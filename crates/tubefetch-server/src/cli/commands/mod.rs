//! CLI command handlers, one file per command.

mod fetch;
mod serve;
mod setup;
mod tools;
mod validate;

pub use fetch::run_fetch;
pub use serve::run_serve;
pub use tools::run_tools;
pub use validate::run_validate;
