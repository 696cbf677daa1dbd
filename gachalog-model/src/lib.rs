pub mod costs;
pub mod models;

pub use costs::{CostTable, lookup_multi_pull_cost};
pub use models::{Outcome, PullLogEntry};
