use crate::rule::{Action, Direction, FirewallRule, ProfileScope, ProtocolScope};

#[derive(Default, Debug)]
struct RuleFields {
    name: String,
    description: String,
    program: Option<String>,
    direction: Option<Direction>,
    action: Option<Action>,
    protocol: Option<ProtocolScope>,
    profiles: Option<ProfileScope>,
    enabled: bool,
}

impl RuleFields {
    fn finish(self) -> Option<FirewallRule> {
        let (Some(direction), Some(action)) = (self.direction, self.action) else {
            log::debug!("Skipping rule '{}' without direction or action", self.name);
            return None;
        };

        Some(FirewallRule {
            name: self.name,
            description: self.description,
            application_path: self.program,
            direction,
            action,
            protocol: self.protocol.unwrap_or(ProtocolScope::Any),
            profiles: self.profiles.unwrap_or(ProfileScope::All),
            enabled: self.enabled,
        })
    }

    fn set(&mut self, key: &str, value: &str) {
        match key {
            "Description" => self.description = value.to_string(),
            "Enabled" => self.enabled = value.eq_ignore_ascii_case("Yes"),
            "Direction" => self.direction = parse_direction(value),
            "Action" => self.action = parse_action(value),
            "Protocol" => self.protocol = Some(parse_protocol(value)),
            "Profiles" => self.profiles = Some(parse_profiles(value)),
            "Program" if !value.is_empty() => self.program = Some(value.to_string()),
            _ => {}
        }
    }
}

/// Parse the output of `netsh advfirewall firewall show rule name=all verbose`
///
/// The listing is a sequence of blocks, each opened by a `Rule Name:` line and
/// followed by `Key: value` lines. Separator lines, the trailing `Ok.` and
/// unknown keys are ignored. Blocks missing a direction or an action (for
/// example rules restricted to a protocol the parser does not know) are dropped.
///
/// # Examples
/// ```
/// use restrictor::store::parser::parse_rules;
///
/// let output = "Rule Name: Demo\n---\nDirection: Out\nAction: Block\nOk.\n";
/// let rules = parse_rules(output);
/// assert_eq!(rules.len(), 1);
/// ```
pub fn parse_rules(output: &str) -> Vec<FirewallRule> {
    let mut rules = Vec::new();
    let mut current: Option<RuleFields> = None;

    for line in output.lines() {
        let Some((key, value)) = split_field(line) else {
            continue;
        };

        if key == "Rule Name" {
            if let Some(rule) = current.take().and_then(RuleFields::finish) {
                rules.push(rule);
            }
            current = Some(RuleFields {
                name: value.to_string(),
                ..Default::default()
            });
        } else if let Some(fields) = current.as_mut() {
            fields.set(key, value);
        }
    }

    if let Some(rule) = current.and_then(RuleFields::finish) {
        rules.push(rule);
    }

    rules
}

/// Split `Key:    value` at the first colon
fn split_field(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once(':')?;
    let key = key.trim();
    if key.is_empty() || key.starts_with('-') {
        return None;
    }
    Some((key, value.trim()))
}

fn parse_direction(value: &str) -> Option<Direction> {
    match value.to_ascii_lowercase().as_str() {
        "in" => Some(Direction::Inbound),
        "out" => Some(Direction::Outbound),
        _ => None,
    }
}

fn parse_action(value: &str) -> Option<Action> {
    match value.to_ascii_lowercase().as_str() {
        "allow" => Some(Action::Allow),
        "block" => Some(Action::Block),
        "bypass" => Some(Action::Bypass),
        _ => None,
    }
}

fn parse_protocol(value: &str) -> ProtocolScope {
    if value.eq_ignore_ascii_case("Any") {
        ProtocolScope::Any
    } else {
        ProtocolScope::Specific(value.to_string())
    }
}

fn parse_profiles(value: &str) -> ProfileScope {
    if value.eq_ignore_ascii_case("Any") {
        return ProfileScope::All;
    }

    let has = |profile: &str| {
        value
            .split(',')
            .any(|part| part.trim().eq_ignore_ascii_case(profile))
    };
    if has("Domain") && has("Private") && has("Public") {
        ProfileScope::All
    } else {
        ProfileScope::Specific(value.to_string())
    }
}
