use std::path::Path;

use crate::{
    error::RestrictorError,
    rule::{DEFAULT_PREFIX, Direction, FirewallRule},
    store::{PolicyStore, Removal},
};

use super::existence::rule_exists;

/// Extension (without the dot) a file must carry to be restricted
pub const DEFAULT_EXTENSION: &str = "exe";

/// What happened to one candidate path during an add
#[derive(Debug)]
pub enum AddOutcome {
    /// Both directional rules were accepted by the store
    Created { rules: Vec<FirewallRule> },
    /// A block rule already governs the path in at least one direction
    AlreadyRestricted,
    /// At least one directional rule was rejected.
    ///
    /// Rules listed in `created` stay in the store; nothing is rolled back.
    Failed {
        created: Vec<FirewallRule>,
        errors: Vec<RestrictorError>,
    },
    /// The path was rejected before any store call
    InvalidInput { reason: String },
    /// Existing rules could not be read, so nothing was created
    StoreUnavailable { error: RestrictorError },
}

#[derive(Debug)]
pub struct AddReport {
    pub path: String,
    pub outcome: AddOutcome,
}

#[derive(Debug)]
pub struct RemovalReport {
    pub rule_name: String,
    pub result: Result<Removal, RestrictorError>,
}

/// Creates, removes and lists per-application block rules.
///
/// The engine keeps no state besides its store handle and naming settings;
/// every operation re-reads the store.
pub struct RuleEngine<S> {
    store: S,
    prefix: String,
    extension: String,
}

impl<S: PolicyStore> RuleEngine<S> {
    pub fn new(store: S) -> Self {
        Self::with_naming(store, DEFAULT_PREFIX, DEFAULT_EXTENSION)
    }

    pub fn with_naming(store: S, prefix: &str, extension: &str) -> Self {
        Self {
            store,
            prefix: prefix.to_string(),
            extension: extension.trim_start_matches('.').to_lowercase(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Rule-name prefix, also the pattern [`RuleEngine::list_restricted`] uses
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Whether any block rule governs `path` in `direction`
    pub fn exists(&self, path: &str, direction: Direction) -> Result<bool, RestrictorError> {
        rule_exists(&self.store, path, direction)
    }

    /// Restrict every path independently.
    ///
    /// Every path gets a report; a failure on one path, including an
    /// unreachable store, never stops the paths after it.
    pub fn add(&mut self, paths: &[String]) -> Vec<AddReport> {
        paths
            .iter()
            .map(|path| AddReport {
                path: path.clone(),
                outcome: self.add_path(path),
            })
            .collect()
    }

    /// Restrict a single path with an Inbound and an Outbound block rule
    pub fn add_path(&mut self, path: &str) -> AddOutcome {
        if let Err(err) = self.validate(path) {
            log::warn!("Rejected {path}: {err}");
            let reason = match err {
                RestrictorError::InvalidInput { reason, .. } => reason,
                other => other.to_string(),
            };
            return AddOutcome::InvalidInput { reason };
        }

        match self.is_restricted(path) {
            Ok(true) => {
                log::info!("{path} is already restricted");
                return AddOutcome::AlreadyRestricted;
            }
            Ok(false) => {}
            Err(error) => {
                log::warn!("Could not check existing rules for {path}: {error}");
                return AddOutcome::StoreUnavailable { error };
            }
        }

        let mut created = Vec::with_capacity(Direction::BOTH.len());
        let mut errors = Vec::new();
        for direction in Direction::BOTH {
            let rule = FirewallRule::blocking(&self.prefix, path, direction);
            match self.store.add(&rule) {
                Ok(()) => created.push(rule),
                Err(err) => {
                    log::warn!("Failed to create {direction} rule for {path}: {err}");
                    errors.push(err);
                }
            }
        }

        if errors.is_empty() {
            AddOutcome::Created { rules: created }
        } else {
            AddOutcome::Failed { created, errors }
        }
    }

    fn is_restricted(&self, path: &str) -> Result<bool, RestrictorError> {
        Ok(self.exists(path, Direction::Inbound)? || self.exists(path, Direction::Outbound)?)
    }

    /// Delete every rule whose application path is `path`, whatever its
    /// direction or action
    pub fn remove(&mut self, path: &str) -> Result<Vec<RemovalReport>, RestrictorError> {
        let targeted: Vec<FirewallRule> = self
            .store
            .enumerate()?
            .into_iter()
            .filter(|rule| rule.targets(path))
            .collect();

        if targeted.is_empty() {
            log::info!("No firewall rules target {path}");
        }

        let reports = targeted
            .into_iter()
            .map(|rule| {
                let result = self.store.remove(&rule);
                if let Err(err) = &result {
                    log::warn!("Failed to remove '{}': {err}", rule.name);
                }
                RemovalReport {
                    rule_name: rule.name,
                    result,
                }
            })
            .collect();
        Ok(reports)
    }

    /// Outbound rules whose name contains `pattern`, in store order.
    ///
    /// Only the Outbound half of each pair is returned, one entry per
    /// restricted application.
    pub fn list(&self, pattern: &str) -> Result<Vec<FirewallRule>, RestrictorError> {
        Ok(self
            .store
            .enumerate()?
            .into_iter()
            .filter(|rule| rule.name.contains(pattern) && rule.direction == Direction::Outbound)
            .collect())
    }

    /// [`RuleEngine::list`] with the configured prefix
    pub fn list_restricted(&self) -> Result<Vec<FirewallRule>, RestrictorError> {
        self.list(&self.prefix)
    }

    /// Rules of either direction whose name contains `pattern`
    pub fn rules_named(&self, pattern: &str) -> Result<Vec<FirewallRule>, RestrictorError> {
        Ok(self
            .store
            .enumerate()?
            .into_iter()
            .filter(|rule| !rule.name.is_empty() && rule.name.contains(pattern))
            .collect())
    }

    fn validate(&self, path: &str) -> Result<(), RestrictorError> {
        let invalid = |reason: &str| RestrictorError::InvalidInput {
            path: path.to_string(),
            reason: reason.to_string(),
        };

        if path.is_empty() {
            return Err(invalid("empty path"));
        }
        if !path
            .to_lowercase()
            .ends_with(&format!(".{}", self.extension))
        {
            return Err(invalid(&format!("not a .{} file", self.extension)));
        }
        if !Path::new(path).is_file() {
            return Err(invalid("file does not exist"));
        }
        Ok(())
    }
}
