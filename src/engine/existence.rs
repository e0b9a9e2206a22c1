use crate::{
    error::RestrictorError,
    rule::{Action, Direction},
    store::PolicyStore,
};

/// Whether the store already blocks `path` in `direction`.
///
/// Matches on application path (case-insensitive), direction and a Block
/// action only. Rule names are not consulted, so a hand-made block rule for
/// the same executable counts too.
pub fn rule_exists<S: PolicyStore + ?Sized>(
    store: &S,
    path: &str,
    direction: Direction,
) -> Result<bool, RestrictorError> {
    let found = store.enumerate()?.iter().any(|rule| {
        rule.targets(path) && rule.direction == direction && rule.action == Action::Block
    });
    Ok(found)
}
