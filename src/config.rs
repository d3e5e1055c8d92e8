//! Command-line options
//!
//! ```text
//! cranetty <input-file> [--tui] [--mode single|bulk] [--snapshot-limit BYTES] [--quiet]
//! ```

use crate::engine::constants::DEFAULT_SNAPSHOT_LIMIT;
use crate::engine::MoveMode;
use std::fmt;

/// Parsed command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    pub path: String,
    /// Open the terminal viewer instead of printing results
    pub tui: bool,
    /// Replay shown first in the viewer
    pub mode: MoveMode,
    pub snapshot_limit: usize,
    /// Suppress progress messages on stderr
    pub quiet: bool,
}

/// Bad command line; the caller prints it with [`usage`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsageError {
    pub message: String,
}

impl UsageError {
    fn new(message: impl Into<String>) -> Self {
        UsageError {
            message: message.into(),
        }
    }
}

impl fmt::Display for UsageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Error: {}", self.message)
    }
}

impl std::error::Error for UsageError {}

/// Usage text for `program_name`
pub fn usage(program_name: &str) -> String {
    format!(
        "Usage: {} <input-file> [--tui] [--mode single|bulk] [--snapshot-limit BYTES] [--quiet]\n\
         \n\
         Prints the top crate of every stack after replaying the instructions,\n\
         first moving crates one at a time, then moving them as a block.\n\
         \n\
         Options:\n\
         \x20 --tui                   step through both replays in the terminal\n\
         \x20 --mode single|bulk      replay shown first in the viewer (default: single)\n\
         \x20 --snapshot-limit BYTES  history memory limit (default: {})\n\
         \x20 --quiet                 no progress messages",
        program_name, DEFAULT_SNAPSHOT_LIMIT
    )
}

impl Options {
    /// Parse arguments, excluding the program name.
    pub fn from_args<I>(args: I) -> Result<Self, UsageError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut path = None;
        let mut tui = false;
        let mut mode = MoveMode::Single;
        let mut snapshot_limit = DEFAULT_SNAPSHOT_LIMIT;
        let mut quiet = false;

        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--tui" => tui = true,
                "--quiet" | "-q" => quiet = true,
                "--mode" => {
                    let value = args
                        .next()
                        .ok_or_else(|| UsageError::new("--mode needs a value"))?;
                    mode = value.parse().map_err(UsageError::new)?;
                }
                "--snapshot-limit" => {
                    let value = args
                        .next()
                        .ok_or_else(|| UsageError::new("--snapshot-limit needs a value"))?;
                    snapshot_limit = value.parse().map_err(|_| {
                        UsageError::new(format!("Invalid snapshot limit '{}'", value))
                    })?;
                }
                flag if flag.starts_with('-') && flag.len() > 1 => {
                    return Err(UsageError::new(format!("Unknown option '{}'", flag)));
                }
                _ if path.is_some() => {
                    return Err(UsageError::new(format!("Unexpected argument '{}'", arg)));
                }
                _ => path = Some(arg),
            }
        }

        let path = path.ok_or_else(|| UsageError::new("No input file provided"))?;
        Ok(Options {
            path,
            tui,
            mode,
            snapshot_limit,
            quiet,
        })
    }
}
