// core.rs splits ledger responsibilities into submodules: block types,
// chain management and validation predicates.
pub mod block;
pub mod chain;
pub mod validation;

pub use block::*;
pub use chain::*;
pub use validation::*;
