pub mod existence;
pub mod lifecycle;

pub use existence::rule_exists;
pub use lifecycle::{AddOutcome, AddReport, RemovalReport, RuleEngine};
