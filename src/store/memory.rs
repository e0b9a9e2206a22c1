use crate::{error::RestrictorError, rule::FirewallRule};

use super::{PolicyStore, Removal};

/// Policy store held in process memory.
///
/// Nothing reaches the host firewall; rules live until the process exits.
/// Like the host firewall, it accepts several rules with the same name.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    rules: Vec<FirewallRule>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing set of rules
    pub fn with_rules(rules: Vec<FirewallRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[FirewallRule] {
        &self.rules
    }
}

impl PolicyStore for MemoryStore {
    fn enumerate(&self) -> Result<Vec<FirewallRule>, RestrictorError> {
        Ok(self.rules.clone())
    }

    fn add(&mut self, rule: &FirewallRule) -> Result<(), RestrictorError> {
        self.rules.push(rule.clone());
        Ok(())
    }

    fn remove(&mut self, rule: &FirewallRule) -> Result<Removal, RestrictorError> {
        let before = self.rules.len();
        self.rules.retain(|existing| {
            let same_program = match rule.application_path.as_deref() {
                Some(path) => existing.targets(path),
                None => true,
            };
            !(existing.name == rule.name && same_program)
        });

        if self.rules.len() < before {
            Ok(Removal::Removed)
        } else {
            Ok(Removal::NotFound)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::Direction;

    fn rule(path: &str, direction: Direction) -> FirewallRule {
        FirewallRule::blocking("Internet Restricted", path, direction)
    }

    #[test]
    fn add_then_enumerate_keeps_order() {
        let mut store = MemoryStore::new();
        store.add(&rule(r"C:\apps\game.exe", Direction::Inbound)).unwrap();
        store.add(&rule(r"C:\apps\game.exe", Direction::Outbound)).unwrap();

        let names: Vec<String> = store
            .enumerate()
            .unwrap()
            .into_iter()
            .map(|rule| rule.name)
            .collect();
        assert_eq!(
            names,
            vec![
                "Internet Restricted: game Inbound",
                "Internet Restricted: game Outbound"
            ]
        );
    }

    #[test]
    fn add_accepts_duplicate_names() {
        let mut store = MemoryStore::new();
        store.add(&rule(r"C:\a\game.exe", Direction::Inbound)).unwrap();
        store.add(&rule(r"C:\b\game.exe", Direction::Inbound)).unwrap();

        assert_eq!(store.rules().len(), 2);
        assert_eq!(store.rules()[0].name, store.rules()[1].name);
    }

    #[test]
    fn remove_is_narrowed_by_program() {
        let mut store = MemoryStore::with_rules(vec![
            rule(r"C:\a\game.exe", Direction::Inbound),
            rule(r"C:\b\game.exe", Direction::Inbound),
        ]);

        let mut target = rule(r"C:\a\game.exe", Direction::Inbound);
        target.application_path = Some(r"C:\A\GAME.EXE".to_string());

        let removal = store.remove(&target).unwrap();

        assert_eq!(removal, Removal::Removed);
        assert_eq!(store.rules(), &[rule(r"C:\b\game.exe", Direction::Inbound)]);
    }

    #[test]
    fn remove_reports_not_found() {
        let target = rule(r"C:\apps\game.exe", Direction::Inbound);
        let mut store = MemoryStore::with_rules(vec![target.clone()]);

        assert_eq!(store.remove(&target).unwrap(), Removal::Removed);
        assert_eq!(store.remove(&target).unwrap(), Removal::NotFound);
        assert!(store.rules().is_empty());
    }
}
