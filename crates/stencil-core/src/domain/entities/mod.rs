pub mod account;
pub mod common;
pub mod project_name;
pub mod project_structure;
pub mod render_context;
pub mod scaffold_spec;

pub use crate::domain::DomainError;
pub use account::{Account, LedgerState, Transaction, TransactionKind};
pub use project_name::ProjectName;
pub use project_structure::ProjectStructure;
pub use render_context::RenderContext;
pub use scaffold_spec::{ScaffoldSpec, ScaffoldSpecBuilder};
