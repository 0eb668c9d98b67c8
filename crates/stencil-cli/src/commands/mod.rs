//! Command handlers, one module per subcommand.

pub mod completions;
pub mod config;
pub mod flavors;
pub mod init;
pub mod ledger;
pub mod new;
