use std::fmt;

use super::naming::{app_name, rule_description, rule_name, same_path};

/// Traffic direction a rule governs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Inbound,
    Outbound,
}

impl Direction {
    /// Both directions, in the order a rule pair is created
    pub const BOTH: [Direction; 2] = [Direction::Inbound, Direction::Outbound];

    /// Label used in rule names ("Inbound" / "Outbound")
    pub fn label(self) -> &'static str {
        match self {
            Direction::Inbound => "Inbound",
            Direction::Outbound => "Outbound",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// What the store does with matching traffic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Allow,
    Block,
    Bypass,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProtocolScope {
    /// Every IP protocol
    Any,
    Specific(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileScope {
    /// Domain, private and public profiles
    All,
    Specific(String),
}

/// One directional entry of the firewall policy store.
///
/// Rules built by [`FirewallRule::blocking`] always block, are enabled, and
/// cover every protocol and profile. Rules read back from the store may carry
/// any attributes, including no application path at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FirewallRule {
    pub name: String,
    pub description: String,
    pub application_path: Option<String>,
    pub direction: Direction,
    pub action: Action,
    pub protocol: ProtocolScope,
    pub profiles: ProfileScope,
    pub enabled: bool,
}

impl FirewallRule {
    /// Build the blocking rule for `path` in one direction
    pub fn blocking(prefix: &str, path: &str, direction: Direction) -> Self {
        let app = app_name(path);
        Self {
            name: rule_name(prefix, app, direction),
            description: rule_description(app, direction),
            application_path: Some(path.to_string()),
            direction,
            action: Action::Block,
            protocol: ProtocolScope::Any,
            profiles: ProfileScope::All,
            enabled: true,
        }
    }

    /// Whether this rule's application path names `path` (case-insensitive, exact)
    pub fn targets(&self, path: &str) -> bool {
        self.application_path
            .as_deref()
            .is_some_and(|own| !own.is_empty() && same_path(own, path))
    }
}
