pub mod memory;
pub mod netsh;
pub mod parser;

#[cfg(test)]
use mockall::automock;

use crate::{error::RestrictorError, rule::FirewallRule};

pub use memory::MemoryStore;
pub use netsh::NetshStore;

/// Result of asking the store to delete a rule by name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Removal {
    Removed,
    /// The store held no rule with that name
    NotFound,
}

/// Firewall policy store abstraction.
///
/// The store is shared system state: other processes may change it between
/// any two calls, so callers never cache what `enumerate` returns.
#[cfg_attr(test, automock)]
pub trait PolicyStore {
    /// Every rule currently in the store, in store order
    fn enumerate(&self) -> Result<Vec<FirewallRule>, RestrictorError>;

    fn add(&mut self, rule: &FirewallRule) -> Result<(), RestrictorError>;

    /// Delete the rule named `rule.name`.
    ///
    /// Names are not unique, so when the rule has an application path only
    /// rules with that name and that path are deleted.
    fn remove(&mut self, rule: &FirewallRule) -> Result<Removal, RestrictorError>;
}
