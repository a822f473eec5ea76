//! User intents and their text form.
//!
//! Every action the presentation layer can forward to the store is an
//! [`Intent`]. The binary reads them one per line; [`parse_intent`] turns a
//! line into an intent.

use std::path::PathBuf;

use thiserror::Error;

use crate::brush::PointerPos;
use crate::model::{LabelColor, UnknownColor};
use crate::state::Direction;

/// An action requested by the user.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    // Files
    /// Load scans or saved archives (routed by extension)
    Load(Vec<PathBuf>),
    /// Load a saved archive regardless of extension
    OpenSaved(PathBuf),
    /// Save the active volume
    Save(PathBuf),
    /// Write the rendered active slice as an image
    Snapshot(PathBuf),

    // Navigation
    /// Jump to a slice
    SetSlice(usize),
    /// Move one slice up or down
    StepSlice(Direction),
    /// Activate the previous or next volume
    SwitchVolume(Direction),

    // Editing
    /// Enable/disable drawing
    ToggleDrawing,
    /// Zero the mask on the current slice
    ClearSlice,
    /// Choose the paint label
    SetColor(LabelColor),
    /// Grow or shrink the brush
    BrushSize(i32),

    // Pointer
    /// Button pressed at a canvas position
    PointerDown(PointerPos),
    /// Pointer moved to a canvas position
    PointerMove(PointerPos),
    /// Button released
    PointerUp,

    // Session
    /// Report the current view
    Status,
    /// List available commands
    Help,
    /// End the session
    Quit,
}

/// Errors produced while parsing a command line.
#[derive(Error, Debug, PartialEq)]
pub enum CommandError {
    #[error("Unknown command '{0}' (type 'help' for a list)")]
    UnknownCommand(String),

    #[error("'{command}' expects {expected}")]
    MissingArgument {
        command: &'static str,
        expected: &'static str,
    },

    #[error("'{command}' takes no more than {max} argument(s)")]
    TooManyArguments { command: &'static str, max: usize },

    #[error("Unterminated quote in '{0}'")]
    UnterminatedQuote(String),

    #[error("Invalid number '{0}'")]
    InvalidNumber(String),

    #[error(transparent)]
    Color(#[from] UnknownColor),
}

/// Text shown for the `help` command.
pub const HELP_TEXT: &str = "\
Commands:
  load PATH...        load scans or saved archives (quote paths with spaces)
  open PATH           load a saved archive
  save PATH           save the active volume (adds .npz when no extension)
  snapshot PATH       write the active slice as an image (e.g. view.png)
  slice N | up | down change slice
  prev | next         change volume
  draw                toggle drawing
  clear               clear the mask on the current slice
  color red|green|yellow
  brush +N | -N       change brush radius
  press X Y | press out
  drag X Y | drag out
  release
  status | help | quit";

/// Parse one command line. Blank lines and `#` comments yield `Ok(None)`.
pub fn parse_intent(line: &str) -> Result<Option<Intent>, CommandError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let mut words = line.split_whitespace();
    let Some(command) = words.next() else {
        return Ok(None);
    };
    let rest = line[command.len()..].trim();
    let args: Vec<&str> = words.collect();

    let intent = match command.to_lowercase().as_str() {
        "load" => {
            let paths = split_paths(rest)?;
            if paths.is_empty() {
                return Err(CommandError::MissingArgument {
                    command: "load",
                    expected: "one or more paths",
                });
            }
            Intent::Load(paths)
        }
        "open" => Intent::OpenSaved(rest_path("open", rest)?),
        "save" => Intent::Save(rest_path("save", rest)?),
        "snapshot" => Intent::Snapshot(rest_path("snapshot", rest)?),
        "slice" => {
            let n = single_arg("slice", "a slice number", &args)?;
            Intent::SetSlice(n.parse().map_err(|_| CommandError::InvalidNumber(n.to_string()))?)
        }
        "up" => no_args("up", &args, Intent::StepSlice(Direction::Next))?,
        "down" => no_args("down", &args, Intent::StepSlice(Direction::Previous))?,
        "prev" | "previous" => no_args("prev", &args, Intent::SwitchVolume(Direction::Previous))?,
        "next" => no_args("next", &args, Intent::SwitchVolume(Direction::Next))?,
        "draw" => no_args("draw", &args, Intent::ToggleDrawing)?,
        "clear" => no_args("clear", &args, Intent::ClearSlice)?,
        "color" => Intent::SetColor(single_arg("color", "a color name", &args)?.parse()?),
        "brush" => {
            let delta = single_arg("brush", "+N or -N", &args)?;
            Intent::BrushSize(
                delta
                    .parse()
                    .map_err(|_| CommandError::InvalidNumber(delta.to_string()))?,
            )
        }
        "brush+" => no_args("brush+", &args, Intent::BrushSize(1))?,
        "brush-" => no_args("brush-", &args, Intent::BrushSize(-1))?,
        "press" => Intent::PointerDown(pointer("press", &args)?),
        "drag" => Intent::PointerMove(pointer("drag", &args)?),
        "release" => no_args("release", &args, Intent::PointerUp)?,
        "status" => no_args("status", &args, Intent::Status)?,
        "help" | "?" => Intent::Help,
        "quit" | "exit" => Intent::Quit,
        other => return Err(CommandError::UnknownCommand(other.to_string())),
    };
    Ok(Some(intent))
}

fn no_args(command: &'static str, args: &[&str], intent: Intent) -> Result<Intent, CommandError> {
    if args.is_empty() {
        Ok(intent)
    } else {
        Err(CommandError::TooManyArguments { command, max: 0 })
    }
}

fn single_arg<'a>(
    command: &'static str,
    expected: &'static str,
    args: &[&'a str],
) -> Result<&'a str, CommandError> {
    match args {
        [] => Err(CommandError::MissingArgument { command, expected }),
        [arg] => Ok(arg),
        _ => Err(CommandError::TooManyArguments { command, max: 1 }),
    }
}

/// The whole argument text as one path, so paths may contain spaces.
/// Surrounding double quotes are removed.
fn rest_path(command: &'static str, rest: &str) -> Result<PathBuf, CommandError> {
    let path = match rest.strip_prefix('"') {
        Some(inner) => inner
            .strip_suffix('"')
            .ok_or_else(|| CommandError::UnterminatedQuote(rest.to_string()))?,
        None => rest,
    };
    if path.is_empty() {
        return Err(CommandError::MissingArgument {
            command,
            expected: "a path",
        });
    }
    Ok(PathBuf::from(path))
}

/// Whitespace-separated paths; a double-quoted path may contain spaces.
fn split_paths(rest: &str) -> Result<Vec<PathBuf>, CommandError> {
    let mut paths = Vec::new();
    let mut remaining = rest.trim_start();
    while !remaining.is_empty() {
        let (path, tail) = match remaining.strip_prefix('"') {
            Some(inner) => {
                let end = inner
                    .find('"')
                    .ok_or_else(|| CommandError::UnterminatedQuote(rest.to_string()))?;
                (&inner[..end], &inner[end + 1..])
            }
            None => {
                let end = remaining
                    .find(char::is_whitespace)
                    .unwrap_or(remaining.len());
                remaining.split_at(end)
            }
        };
        paths.push(PathBuf::from(path));
        remaining = tail.trim_start();
    }
    Ok(paths)
}

fn pointer(command: &'static str, args: &[&str]) -> Result<PointerPos, CommandError> {
    match args {
        [word] if matches!(*word, "out" | "outside") => Ok(PointerPos::Outside),
        [x, y] => {
            let parse = |s: &str| {
                s.parse::<f64>()
                    .map_err(|_| CommandError::InvalidNumber(s.to_string()))
            };
            Ok(PointerPos::at(parse(x)?, parse(y)?))
        }
        [] | [_] => Err(CommandError::MissingArgument {
            command,
            expected: "X Y or 'out'",
        }),
        _ => Err(CommandError::TooManyArguments { command, max: 2 }),
    }
}
