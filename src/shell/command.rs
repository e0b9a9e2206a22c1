/// A command typed at the shell prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Help,
    Add,
    Remove,
    List,
    Exit,
    /// Anything else, carrying the normalized token
    Unknown(String),
}

impl ShellCommand {
    /// Parse one input line.
    ///
    /// The line is trimmed, lower-cased and stripped of hyphens first, so
    /// `-ADD` and `add` dispatch the same way.
    pub fn parse(line: &str) -> Self {
        let token = normalize(line);
        match token.as_str() {
            "help" => ShellCommand::Help,
            "add" => ShellCommand::Add,
            "remove" => ShellCommand::Remove,
            "list" => ShellCommand::List,
            "exit" => ShellCommand::Exit,
            _ => ShellCommand::Unknown(token),
        }
    }
}

fn normalize(line: &str) -> String {
    line.trim().to_lowercase().replace('-', "")
}
