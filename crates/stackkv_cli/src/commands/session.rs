//! Interactive session: dispatches parsed lines to the store.

use super::parse::{parse_line, Command, COMMANDS};
use stackkv_core::TransactionalStore;
use std::io::{self, BufRead, Write};
use tracing::debug;

/// Rendered when `GET` finds nothing.
pub const KEY_NOT_SET: &str = "key not set";

/// A store plus the rendering rules of the line protocol.
#[derive(Debug, Default)]
pub struct Session {
    store: TransactionalStore,
}

impl Session {
    /// Creates a session around a store.
    pub fn new(store: TransactionalStore) -> Self {
        Self { store }
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &TransactionalStore {
        &self.store
    }

    /// Executes one command and returns the text to show, if any.
    ///
    /// `Exit` is handled by [`run`] and renders nothing here.
    pub fn execute(&mut self, command: Command) -> Option<String> {
        match command {
            Command::Set { key, value } => {
                self.store.set(key, value);
                None
            }
            Command::Get { key } => Some(self.store.get(&key).unwrap_or(KEY_NOT_SET).to_string()),
            Command::Delete { key } => {
                self.store.delete(key);
                None
            }
            Command::Count { value } => Some(self.store.count(&value).to_string()),
            Command::Begin => {
                self.store.begin();
                None
            }
            Command::Commit => self.store.commit().err().map(|e| e.to_string()),
            Command::Rollback => self.store.rollback().err().map(|e| e.to_string()),
            Command::Dump => {
                let lines: Vec<String> = self
                    .store
                    .snapshot()
                    .into_iter()
                    .map(|(k, v)| format!("{k}={v}"))
                    .collect();
                (!lines.is_empty()).then(|| lines.join("\n"))
            }
            Command::Help => Some(
                COMMANDS
                    .iter()
                    .map(|(_, usage)| *usage)
                    .collect::<Vec<_>>()
                    .join("\n"),
            ),
            Command::Exit => None,
        }
    }

    /// Parses and executes one line.
    ///
    /// Returns `None` when the line asks to end the session.
    pub fn handle_line(&mut self, line: &str) -> Option<Option<String>> {
        match parse_line(line) {
            Ok(None) => Some(None),
            Ok(Some(Command::Exit)) => None,
            Ok(Some(command)) => {
                debug!(?command, "executing");
                Some(self.execute(command))
            }
            Err(err) => Some(Some(format!("error: {err}"))),
        }
    }
}

/// Reads lines from `input` until EOF or `EXIT`, writing results to `output`.
///
/// A prompt, when given, is written before every line is read.
pub fn run<R, W>(
    session: &mut Session,
    input: R,
    output: &mut W,
    prompt: Option<&str>,
) -> io::Result<()>
where
    R: BufRead,
    W: Write,
{
    let mut lines = input.lines();
    loop {
        if let Some(prompt) = prompt {
            write!(output, "{prompt}")?;
            output.flush()?;
        }

        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;

        match session.handle_line(&line) {
            None => break,
            Some(Some(text)) => writeln!(output, "{text}")?,
            Some(None) => {}
        }
    }

    output.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run_script(script: &str) -> String {
        let mut session = Session::default();
        let mut out = Vec::new();
        run(&mut session, Cursor::new(script), &mut out, None).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn get_renders_value_or_not_set() {
        assert_eq!(
            run_script("SET foo 123\nGET foo\nGET bar\n"),
            "123\nkey not set\n"
        );
    }

    #[test]
    fn count_renders_decimal() {
        assert_eq!(
            run_script("SET a 1\nSET b 1\nSET c 2\nCOUNT 1\nCOUNT 9\n"),
            "2\n0\n"
        );
    }

    #[test]
    fn idle_commit_and_rollback_render_no_transaction() {
        assert_eq!(
            run_script("COMMIT\nROLLBACK\nBEGIN\nCOMMIT\n"),
            "no transaction\nno transaction\n"
        );
    }

    #[test]
    fn nested_scenario() {
        let script = "\
SET foo 123
BEGIN
SET foo 456
GET foo
ROLLBACK
GET foo
BEGIN
COMMIT
COMMIT
";
        assert_eq!(run_script(script), "456\n123\nno transaction\n");
    }

    #[test]
    fn malformed_input_reports_error_and_continues() {
        let out = run_script("SET onlykey\nBOGUS\nSET k v\nGET k\n");
        assert_eq!(
            out,
            "error: SET expects 2 argument(s), got 1\nerror: unknown command: BOGUS\nv\n"
        );
    }

    #[test]
    fn help_with_arguments_is_an_error() {
        assert_eq!(
            run_script("HELP me\n"),
            "error: HELP expects 0 argument(s), got 1\n"
        );
    }

    #[test]
    fn exit_stops_reading() {
        assert_eq!(run_script("SET a 1\nexit\nGET a\n"), "");
    }

    #[test]
    fn dump_prints_sorted_view() {
        assert_eq!(
            run_script("SET b 2\nSET a 1\nBEGIN\nDELETE b\nDUMP\n"),
            "a=1\n"
        );
    }

    #[test]
    fn prompt_is_written_before_each_read() {
        let mut session = Session::default();
        let mut out = Vec::new();
        run(&mut session, Cursor::new("GET x\n"), &mut out, Some("> ")).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "> key not set\n> ");
    }

    #[test]
    fn blank_lines_are_ignored() {
        assert_eq!(run_script("\n\nSET a 1\n\nGET a\n"), "1\n");
        let mut session = Session::default();
        assert_eq!(session.handle_line("   "), Some(None));
        assert!(session.store().is_empty());
    }
}
