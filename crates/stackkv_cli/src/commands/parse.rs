//! Line parsing.
//!
//! A line is split on whitespace; the first token names the command
//! (case-insensitive) and the rest are its arguments.

use thiserror::Error;

/// A parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `SET key value`
    Set {
        /// Key to write.
        key: String,
        /// Value to store.
        value: String,
    },
    /// `GET key`
    Get {
        /// Key to read.
        key: String,
    },
    /// `DELETE key`
    Delete {
        /// Key to remove.
        key: String,
    },
    /// `COUNT value`
    Count {
        /// Value to count.
        value: String,
    },
    /// `BEGIN`
    Begin,
    /// `COMMIT`
    Commit,
    /// `ROLLBACK`
    Rollback,
    /// `DUMP`: print the visible key/value pairs.
    Dump,
    /// `HELP`: list commands.
    Help,
    /// `EXIT` or `QUIT`: end the session.
    Exit,
}

/// Command names with their usage, in `HELP` order.
pub const COMMANDS: &[(&str, &str)] = &[
    ("SET", "SET <key> <value>    store a value"),
    (
        "GET",
        "GET <key>            print a value or \"key not set\"",
    ),
    ("DELETE", "DELETE <key>         remove a key"),
    ("COUNT", "COUNT <value>        count keys holding a value"),
    ("BEGIN", "BEGIN                open a nested transaction"),
    (
        "COMMIT",
        "COMMIT               fold the innermost transaction into its parent",
    ),
    (
        "ROLLBACK",
        "ROLLBACK             discard the innermost transaction",
    ),
    ("DUMP", "DUMP                 print every visible key"),
    ("HELP", "HELP                 show this list"),
    ("EXIT", "EXIT | QUIT          leave the shell"),
];

/// Errors produced while parsing a line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The first token is not a known command.
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    /// The command got the wrong number of arguments.
    #[error("{command} expects {expected} argument(s), got {actual}")]
    WrongArity {
        /// Command name.
        command: &'static str,
        /// Required argument count.
        expected: usize,
        /// Supplied argument count.
        actual: usize,
    },
}

/// Parses one input line.
///
/// Returns `Ok(None)` for blank lines.
pub fn parse_line(line: &str) -> Result<Option<Command>, ParseError> {
    let mut tokens = line.split_whitespace();
    let Some(name) = tokens.next() else {
        return Ok(None);
    };
    let args: Vec<&str> = tokens.collect();

    let command = match name.to_ascii_uppercase().as_str() {
        "SET" => {
            let [key, value] = arity::<2>("SET", &args)?;
            Command::Set {
                key: key.to_string(),
                value: value.to_string(),
            }
        }
        "GET" => {
            let [key] = arity::<1>("GET", &args)?;
            Command::Get {
                key: key.to_string(),
            }
        }
        "DELETE" => {
            let [key] = arity::<1>("DELETE", &args)?;
            Command::Delete {
                key: key.to_string(),
            }
        }
        "COUNT" => {
            let [value] = arity::<1>("COUNT", &args)?;
            Command::Count {
                value: value.to_string(),
            }
        }
        "BEGIN" => {
            arity::<0>("BEGIN", &args)?;
            Command::Begin
        }
        "COMMIT" => {
            arity::<0>("COMMIT", &args)?;
            Command::Commit
        }
        "ROLLBACK" => {
            arity::<0>("ROLLBACK", &args)?;
            Command::Rollback
        }
        "DUMP" => {
            arity::<0>("DUMP", &args)?;
            Command::Dump
        }
        "HELP" => {
            arity::<0>("HELP", &args)?;
            Command::Help
        }
        "EXIT" | "QUIT" => Command::Exit,
        _ => return Err(ParseError::UnknownCommand(name.to_string())),
    };

    Ok(Some(command))
}

fn arity<'a, const N: usize>(
    command: &'static str,
    args: &[&'a str],
) -> Result<[&'a str; N], ParseError> {
    <[&str; N]>::try_from(args).map_err(|_| ParseError::WrongArity {
        command,
        expected: N,
        actual: args.len(),
    })
}
