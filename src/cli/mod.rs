//! Interactive shell driving a [`Budget`](crate::ledger::Budget).

mod commands;
pub mod core;
pub mod io;
pub mod output;
pub mod registry;
mod shell;
pub mod shell_context;

pub use shell::{run_cli, SCRIPT_MODE_ENV};
