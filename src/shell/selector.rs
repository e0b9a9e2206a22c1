use std::io::{BufRead, Write};

#[cfg(test)]
use mockall::automock;

use crate::error::RestrictorError;

/// Collects executable paths from the operator.
///
/// Implementations read through the shell's own input and output so that
/// prompts and commands share one stream.
#[cfg_attr(test, automock)]
pub trait FileSelector {
    /// Zero or more paths; an empty list means the operator cancelled
    fn select_files(
        &mut self,
        input: &mut dyn BufRead,
        output: &mut dyn Write,
    ) -> Result<Vec<String>, RestrictorError>;

    /// One path, or `None` when the operator cancelled
    fn select_single_file(
        &mut self,
        input: &mut dyn BufRead,
        output: &mut dyn Write,
    ) -> Result<Option<String>, RestrictorError>;
}

/// Prompts for paths typed (or pasted) on the console
#[derive(Debug, Clone)]
pub struct ConsoleSelector {
    extension: String,
}

impl ConsoleSelector {
    pub fn new(extension: &str) -> Self {
        Self {
            extension: extension.to_string(),
        }
    }
}

impl FileSelector for ConsoleSelector {
    fn select_files(
        &mut self,
        input: &mut dyn BufRead,
        output: &mut dyn Write,
    ) -> Result<Vec<String>, RestrictorError> {
        writeln!(
            output,
            "Select programs to restrict (*.{}), one path per line. Leave the line empty to finish:",
            self.extension
        )?;

        let mut paths = Vec::new();
        while let Some(path) = read_path(input, output)? {
            paths.push(path);
        }
        Ok(paths)
    }

    fn select_single_file(
        &mut self,
        input: &mut dyn BufRead,
        output: &mut dyn Write,
    ) -> Result<Option<String>, RestrictorError> {
        writeln!(
            output,
            "Select program (*.{}). Leave the line empty to cancel:",
            self.extension
        )?;
        read_path(input, output)
    }
}

/// Read one path; `None` on an empty line or end of input
fn read_path(
    input: &mut dyn BufRead,
    output: &mut dyn Write,
) -> Result<Option<String>, RestrictorError> {
    write!(output, "> ")?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }

    let path = unquote(line.trim());
    if path.is_empty() {
        Ok(None)
    } else {
        Ok(Some(path.to_string()))
    }
}

/// Explorer's "Copy as path" wraps paths in double quotes
fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn select_files_reads_until_blank_line() {
        let mut input = Cursor::new("C:\\apps\\game.exe\n\"C:\\Program Files\\x.exe\"\n\nlist\n");
        let mut output: Vec<u8> = Vec::new();
        let mut selector = ConsoleSelector::new("exe");

        let paths = selector.select_files(&mut input, &mut output).unwrap();

        assert_eq!(paths, vec![r"C:\apps\game.exe", r"C:\Program Files\x.exe"]);
        let mut rest = String::new();
        input.read_line(&mut rest).unwrap();
        assert_eq!(rest, "list\n");
        assert!(String::from_utf8(output).unwrap().contains("(*.exe)"));
    }

    #[test]
    fn select_files_stops_at_end_of_input() {
        let mut input = Cursor::new("C:\\apps\\game.exe");
        let mut selector = ConsoleSelector::new("exe");

        let paths = selector.select_files(&mut input, &mut Vec::<u8>::new()).unwrap();

        assert_eq!(paths, vec![r"C:\apps\game.exe"]);
    }

    #[test]
    fn select_single_file_cancelled_by_blank_line() {
        let mut selector = ConsoleSelector::new("exe");

        let chosen = selector
            .select_single_file(&mut Cursor::new("   \n"), &mut Vec::<u8>::new())
            .unwrap();
        assert_eq!(chosen, None);

        let chosen = selector
            .select_single_file(&mut Cursor::new("C:\\apps\\game.exe\r\n"), &mut Vec::<u8>::new())
            .unwrap();
        assert_eq!(chosen.as_deref(), Some(r"C:\apps\game.exe"));
    }

    #[test]
    fn unquote_only_strips_matching_pair() {
        assert_eq!(unquote("\"C:\\a.exe\""), "C:\\a.exe");
        assert_eq!(unquote("\"C:\\a.exe"), "\"C:\\a.exe");
        assert_eq!(unquote("C:\\a.exe"), "C:\\a.exe");
    }
}
