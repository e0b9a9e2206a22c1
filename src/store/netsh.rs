use std::{
    ffi::OsString,
    process::{Command, Output},
};

use crate::{
    error::RestrictorError,
    rule::{Action, Direction, FirewallRule, ProfileScope, ProtocolScope},
};

use super::{PolicyStore, Removal, parser::parse_rules};

const NETSH: &str = "netsh";
const NO_MATCH: &str = "No rules match the specified criteria";

/// Windows Defender Firewall, driven through `netsh advfirewall firewall`
#[derive(Debug, Clone)]
pub struct NetshStore {
    program: OsString,
}

impl Default for NetshStore {
    fn default() -> Self {
        Self {
            program: OsString::from(NETSH),
        }
    }
}

impl NetshStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn run(&self, args: &[String]) -> Result<Output, RestrictorError> {
        self.command(args)
            .output()
            .map_err(|source| RestrictorError::StoreUnavailable {
                reason: format!("failed to run {}: {source}", self.program.to_string_lossy()),
            })
    }

    /// netsh writes in the console code page, so it runs under a hidden
    /// console switched to UTF-8. The switch never reaches the caller's console.
    #[cfg(windows)]
    fn command(&self, args: &[String]) -> Command {
        use std::os::windows::process::CommandExt;
        const CREATE_NO_WINDOW: u32 = 0x0800_0000;

        let line = utf8_command_line(&self.program.to_string_lossy(), args);
        let mut command = Command::new("cmd");
        command
            .raw_arg("/D /S /C")
            .raw_arg(format!("\"{line}\""))
            .creation_flags(CREATE_NO_WINDOW);
        command
    }

    #[cfg(not(windows))]
    fn command(&self, args: &[String]) -> Command {
        let mut command = Command::new(&self.program);
        command.args(["advfirewall", "firewall"]).args(args);
        command
    }
}

impl PolicyStore for NetshStore {
    fn enumerate(&self) -> Result<Vec<FirewallRule>, RestrictorError> {
        let output = self.run(&show_args())?;
        let stdout = String::from_utf8_lossy(&output.stdout);

        if stdout.contains(NO_MATCH) {
            return Ok(Vec::new());
        }
        if !output.status.success() {
            return Err(RestrictorError::StoreUnavailable {
                reason: failure_message(&output),
            });
        }

        let rules = parse_rules(&stdout);
        log::debug!("Enumerated {} firewall rules", rules.len());
        Ok(rules)
    }

    fn add(&mut self, rule: &FirewallRule) -> Result<(), RestrictorError> {
        let output = self.run(&add_args(rule))?;
        if !output.status.success() {
            return Err(RestrictorError::StoreWrite {
                rule: rule.name.clone(),
                reason: failure_message(&output),
            });
        }

        log::info!("Added firewall rule '{}'", rule.name);
        Ok(())
    }

    fn remove(&mut self, rule: &FirewallRule) -> Result<Removal, RestrictorError> {
        let output = self.run(&delete_args(rule))?;

        if String::from_utf8_lossy(&output.stdout).contains(NO_MATCH) {
            log::warn!("Firewall rule '{}' was already gone", rule.name);
            return Ok(Removal::NotFound);
        }
        if !output.status.success() {
            return Err(RestrictorError::StoreWrite {
                rule: rule.name.clone(),
                reason: failure_message(&output),
            });
        }

        log::info!("Deleted firewall rule '{}'", rule.name);
        Ok(Removal::Removed)
    }
}

/// `cmd` line that switches the console to UTF-8 before running netsh
#[cfg_attr(not(windows), allow(dead_code))]
fn utf8_command_line(program: &str, args: &[String]) -> String {
    format!(
        "chcp 65001>nul && {program} advfirewall firewall {}",
        args.join(" ")
    )
}

fn quoted(key: &str, value: &str) -> String {
    format!("{key}=\"{value}\"")
}

fn show_args() -> Vec<String> {
    vec![
        "show".to_string(),
        "rule".to_string(),
        "name=all".to_string(),
        "verbose".to_string(),
    ]
}

fn add_args(rule: &FirewallRule) -> Vec<String> {
    let mut args = vec![
        "add".to_string(),
        "rule".to_string(),
        quoted("name", &rule.name),
        format!(
            "dir={}",
            match rule.direction {
                Direction::Inbound => "in",
                Direction::Outbound => "out",
            }
        ),
        format!(
            "action={}",
            match rule.action {
                Action::Allow => "allow",
                Action::Block => "block",
                Action::Bypass => "bypass",
            }
        ),
    ];

    if let Some(program) = &rule.application_path {
        args.push(quoted("program", program));
    }

    args.push(format!("enable={}", if rule.enabled { "yes" } else { "no" }));
    args.push(match &rule.profiles {
        ProfileScope::All => "profile=any".to_string(),
        ProfileScope::Specific(profiles) => format!("profile={}", profiles.to_lowercase()),
    });
    args.push(match &rule.protocol {
        ProtocolScope::Any => "protocol=any".to_string(),
        ProtocolScope::Specific(protocol) => format!("protocol={}", protocol.to_lowercase()),
    });

    if !rule.description.is_empty() {
        args.push(quoted("description", &rule.description));
    }

    args
}

/// netsh deletes every rule carrying the name, so the program narrows it down
fn delete_args(rule: &FirewallRule) -> Vec<String> {
    let mut args = vec![
        "delete".to_string(),
        "rule".to_string(),
        quoted("name", &rule.name),
    ];
    if let Some(program) = rule.application_path.as_deref().filter(|p| !p.is_empty()) {
        args.push(quoted("program", program));
    }
    args
}

/// First meaningful line netsh printed, falling back to the exit status
fn failure_message(output: &Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    stdout
        .lines()
        .chain(stderr.lines())
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| format!("netsh exited with {}", output.status))
}
