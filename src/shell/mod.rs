pub mod command;
pub mod selector;

use std::io::{BufRead, Write};

pub use command::ShellCommand;
pub use selector::{ConsoleSelector, FileSelector};

use crate::{
    engine::{AddOutcome, AddReport, RuleEngine},
    error::RestrictorError,
    rule::FirewallRule,
    store::{PolicyStore, Removal},
};

pub const TITLE: &str = "App Internet Restrictor";

const HELP: &str = "Available commands:
 -add    | Create a new restricting rule for a program
 -remove | Remove already existing rule for a program
 -list   | Display current block-list of the programs added through this app
 -exit   | Close the application
 -help   | Show all available commands
";

/// Interactive command loop on top of a [`RuleEngine`]
pub struct Shell<S, F> {
    engine: RuleEngine<S>,
    selector: F,
}

impl<S: PolicyStore, F: FileSelector> Shell<S, F> {
    pub fn new(engine: RuleEngine<S>, selector: F) -> Self {
        Self { engine, selector }
    }

    pub fn engine(&self) -> &RuleEngine<S> {
        &self.engine
    }

    /// Read and dispatch commands until `exit` or end of input.
    ///
    /// Store failures are rendered and the loop continues; only I/O errors
    /// on the shell's own streams end it early.
    pub fn run(
        &mut self,
        mut input: impl BufRead,
        mut output: impl Write,
    ) -> Result<(), RestrictorError> {
        writeln!(output, "{TITLE}")?;
        writeln!(
            output,
            "Type 'help' for available commands. Type 'exit' to close the application."
        )?;

        loop {
            write!(output, "Enter command: ")?;
            output.flush()?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                return Ok(());
            }

            let command = ShellCommand::parse(&line);
            log::debug!("Dispatching {command:?}");
            match command {
                ShellCommand::Help => write!(output, "{HELP}")?,
                ShellCommand::Add => self.add(&mut input, &mut output)?,
                ShellCommand::Remove => self.remove(&mut input, &mut output)?,
                ShellCommand::List => self.list(&mut output)?,
                ShellCommand::Exit => return Ok(()),
                ShellCommand::Unknown(token) => {
                    writeln!(output, "{token} is an unknown command.")?;
                    write!(output, "{HELP}")?;
                }
            }
        }
    }

    fn add(
        &mut self,
        input: &mut dyn BufRead,
        output: &mut dyn Write,
    ) -> Result<(), RestrictorError> {
        let paths = match self.selector.select_files(input, output) {
            Ok(paths) => paths,
            Err(RestrictorError::NoSelection) => Vec::new(),
            Err(err) => return Err(err),
        };
        if paths.is_empty() {
            writeln!(output, "No files were selected.")?;
            return Ok(());
        }

        for AddReport { path, outcome } in self.engine.add(&paths) {
            match outcome {
                AddOutcome::Created { rules } => {
                    self.echo_created(&rules, output)?;
                    writeln!(output, "Rules created successfully for {path}")?;
                }
                AddOutcome::AlreadyRestricted => {
                    writeln!(output, "Firewall rules already exist for {path}")?;
                }
                AddOutcome::Failed { created, errors } => {
                    self.echo_created(&created, output)?;
                    for err in &errors {
                        writeln!(output, "Error creating firewall rule for {path}: {err}")?;
                    }
                    writeln!(output, "Failed to create rules for {path}")?;
                }
                AddOutcome::InvalidInput { .. } => {
                    writeln!(
                        output,
                        "Invalid file path or file is not an executable: {path}"
                    )?;
                }
                AddOutcome::StoreUnavailable { error } => {
                    writeln!(output, "Error checking for existing firewall rule: {error}")?;
                    writeln!(output, "Failed to create rules for {path}")?;
                }
            }
        }
        Ok(())
    }

    /// Show what the store now holds under each freshly created rule name
    fn echo_created(
        &self,
        rules: &[FirewallRule],
        output: &mut dyn Write,
    ) -> Result<(), RestrictorError> {
        for rule in rules {
            writeln!(output, "Checking for rule name pattern: {}", rule.name)?;
            match self.engine.rules_named(&rule.name) {
                Ok(found) => {
                    for stored in found {
                        writeln!(
                            output,
                            "Rule: {}, Application Path: {}",
                            stored.name,
                            stored.application_path.as_deref().unwrap_or_default()
                        )?;
                    }
                }
                Err(err) => {
                    writeln!(
                        output,
                        "Error while displaying firewall rule file paths: {err}"
                    )?;
                }
            }
        }
        Ok(())
    }

    fn remove(
        &mut self,
        input: &mut dyn BufRead,
        output: &mut dyn Write,
    ) -> Result<(), RestrictorError> {
        let path = match self.selector.select_single_file(input, output) {
            Ok(Some(path)) => path,
            Ok(None) | Err(RestrictorError::NoSelection) => {
                writeln!(output, "No file was selected.")?;
                return Ok(());
            }
            Err(err) => return Err(err),
        };

        let reports = match self.engine.remove(&path) {
            Ok(reports) => reports,
            Err(err) => {
                writeln!(output, "Error removing firewall rules: {err}")?;
                return Ok(());
            }
        };

        if reports.is_empty() {
            writeln!(output, "No firewall rules found for {path}")?;
        }
        for report in reports {
            match report.result {
                Ok(Removal::Removed) => {
                    writeln!(output, "Removed firewall rule: {}", report.rule_name)?;
                }
                Ok(Removal::NotFound) => {
                    writeln!(
                        output,
                        "Firewall rule was already removed: {}",
                        report.rule_name
                    )?;
                }
                Err(err) => {
                    writeln!(
                        output,
                        "Error removing firewall rule {}: {err}",
                        report.rule_name
                    )?;
                }
            }
        }
        Ok(())
    }

    fn list(&self, output: &mut dyn Write) -> Result<(), RestrictorError> {
        let pattern = self.engine.prefix();
        let rules = match self.engine.list(pattern) {
            Ok(rules) => rules,
            Err(err) => {
                writeln!(
                    output,
                    "Error while displaying specific firewall rules: {err}"
                )?;
                return Ok(());
            }
        };

        writeln!(
            output,
            "Firewall rules containing '{pattern}' in their name:"
        )?;
        for rule in rules {
            writeln!(
                output,
                "Rule Name: {} \\ Outbound,\nApplication Path: {}\n",
                rule.name,
                rule.application_path.as_deref().unwrap_or_default()
            )?;
        }
        Ok(())
    }
}
