//! Session commands: parsing from text and running against an `EditSession`.
//!
//! A command is a keyword followed by its argument, e.g. `filter Edge Detection`
//! or `save out.png`. Keywords are case-insensitive.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use imageviewer_core::transform::ParseDirectionError;
use imageviewer_core::{EditError, EditSession, RedoPolicy, ResizeDirection, RotateDirection};
use log::debug;
use thiserror::Error;

/// Token that separates positional commands.
pub const SEPARATOR: &str = "--then";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Open(PathBuf),
    Close,
    Filter(String),
    Resize(ResizeDirection),
    Rotate(RotateDirection),
    Undo,
    Redo,
    Reload,
    Save(PathBuf),
    Filters,
    Status,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("empty command")]
    Empty,

    #[error("unknown command '{0}'")]
    Unknown(String),

    #[error("'{command}' expects {expected}")]
    MissingArgument {
        command: &'static str,
        expected: &'static str,
    },

    #[error("'{0}' takes no arguments")]
    UnexpectedArgument(&'static str),

    #[error(transparent)]
    Direction(#[from] ParseDirectionError),

    #[error("line {line}: {source}")]
    Script {
        line: usize,
        source: Box<CommandError>,
    },
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (keyword, rest) = match s.split_once(char::is_whitespace) {
            Some((keyword, rest)) => (keyword, rest.trim()),
            None => (s, ""),
        };
        if keyword.is_empty() {
            return Err(CommandError::Empty);
        }

        let command = match keyword.to_ascii_lowercase().as_str() {
            "open" => Command::Open(required(rest, "open", "a file path")?.into()),
            "save" => Command::Save(required(rest, "save", "a file path")?.into()),
            "filter" => Command::Filter(required(rest, "filter", "a filter name")?.to_string()),
            "resize" => Command::Resize(required(rest, "resize", "larger|smaller")?.parse()?),
            "rotate" => Command::Rotate(required(rest, "rotate", "left|right")?.parse()?),
            "close" => no_argument(rest, "close", Command::Close)?,
            "undo" => no_argument(rest, "undo", Command::Undo)?,
            "redo" => no_argument(rest, "redo", Command::Redo)?,
            "reload" => no_argument(rest, "reload", Command::Reload)?,
            "filters" => no_argument(rest, "filters", Command::Filters)?,
            "status" => no_argument(rest, "status", Command::Status)?,
            _ => return Err(CommandError::Unknown(keyword.to_string())),
        };
        Ok(command)
    }
}

fn required<'a>(
    rest: &'a str,
    command: &'static str,
    expected: &'static str,
) -> Result<&'a str, CommandError> {
    if rest.is_empty() {
        Err(CommandError::MissingArgument { command, expected })
    } else {
        Ok(rest)
    }
}

fn no_argument(rest: &str, name: &'static str, command: Command) -> Result<Command, CommandError> {
    if rest.is_empty() {
        Ok(command)
    } else {
        Err(CommandError::UnexpectedArgument(name))
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Open(path) => write!(f, "open {}", path.display()),
            Command::Close => f.write_str("close"),
            Command::Filter(name) => write!(f, "filter {name}"),
            Command::Resize(direction) => write!(f, "resize {direction}"),
            Command::Rotate(direction) => write!(f, "rotate {direction}"),
            Command::Undo => f.write_str("undo"),
            Command::Redo => f.write_str("redo"),
            Command::Reload => f.write_str("reload"),
            Command::Save(path) => write!(f, "save {}", path.display()),
            Command::Filters => f.write_str("filters"),
            Command::Status => f.write_str("status"),
        }
    }
}

/// Parse a script: one command per line, blank lines and `#` comments skipped.
pub fn parse_script(text: &str) -> Result<Vec<Command>, CommandError> {
    text.lines()
        .enumerate()
        .map(|(index, line)| (index + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
        .map(|(line, text)| {
            text.parse().map_err(|e| CommandError::Script {
                line,
                source: Box::new(e),
            })
        })
        .collect()
}

/// Group positional tokens into commands.
///
/// Commands are separated by a `--then` token or by a token ending in `;`.
pub fn parse_args(args: &[String]) -> Result<Vec<Command>, CommandError> {
    let mut commands = Vec::new();
    let mut words: Vec<&str> = Vec::new();

    for arg in args {
        if arg == SEPARATOR {
            flush(&mut words, &mut commands)?;
        } else if let Some(word) = arg.strip_suffix(';') {
            if !word.is_empty() {
                words.push(word);
            }
            flush(&mut words, &mut commands)?;
        } else {
            words.push(arg);
        }
    }
    flush(&mut words, &mut commands)?;
    Ok(commands)
}

fn flush(words: &mut Vec<&str>, commands: &mut Vec<Command>) -> Result<(), CommandError> {
    if !words.is_empty() {
        commands.push(words.join(" ").parse()?);
        words.clear();
    }
    Ok(())
}

/// Run one command, returning the lines to print.
pub fn execute(session: &mut EditSession, command: &Command) -> Result<Vec<String>, EditError> {
    debug!("execute: {command}");
    match command {
        Command::Open(path) => session.open(path)?,
        Command::Close => session.close(),
        Command::Filter(name) => session.apply_filter(name)?,
        Command::Resize(direction) => session.resize(*direction)?,
        Command::Rotate(direction) => session.rotate(*direction)?,
        Command::Undo => session.undo()?,
        Command::Redo => session.redo()?,
        Command::Reload => session.reload_from_disk()?,
        Command::Save(path) => session.save(path)?,
        Command::Filters => {
            return Ok(session
                .filters()
                .names()
                .into_iter()
                .map(str::to_string)
                .collect())
        }
        Command::Status => return Ok(status_lines(session)),
    }
    Ok(vec![session.status().to_string()])
}

fn status_lines(session: &EditSession) -> Vec<String> {
    let mut lines = vec![session.filename_label()];
    if let Some(image) = session.current() {
        lines.push(format!("Size: {}x{}", image.width(), image.height()));
    }
    let history = session.history();
    lines.push(format!(
        "History: {} undo, {} redo",
        history.undo_depth(),
        history.redo_depth()
    ));
    lines.push(match history.max_depth() {
        Some(limit) => format!("History limit: {limit}"),
        None => "History limit: none".to_string(),
    });
    lines.push(match history.policy() {
        RedoPolicy::ClearOnEdit => "Redo policy: cleared on edit".to_string(),
        RedoPolicy::Preserve => "Redo policy: preserved".to_string(),
    });
    if !session.status().is_empty() {
        lines.push(format!("Status: {}", session.status()));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use imageviewer_core::{PixelBuffer, Rgb, SessionConfig};

    fn args(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(
            "open photos/cat.png".parse(),
            Ok(Command::Open("photos/cat.png".into()))
        );
        assert_eq!(
            "filter Edge Detection".parse(),
            Ok(Command::Filter("Edge Detection".to_string()))
        );
        assert_eq!(
            "RESIZE larger".parse(),
            Ok(Command::Resize(ResizeDirection::Larger))
        );
        assert_eq!(
            "rotate left".parse(),
            Ok(Command::Rotate(RotateDirection::Left))
        );
        assert_eq!("  undo  ".parse(), Ok(Command::Undo));
        assert_eq!("filters".parse(), Ok(Command::Filters));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            "crop 10".parse::<Command>(),
            Err(CommandError::Unknown("crop".to_string()))
        );
        assert_eq!(
            "save".parse::<Command>().unwrap_err().to_string(),
            "'save' expects a file path"
        );
        assert_eq!(
            "undo twice".parse::<Command>(),
            Err(CommandError::UnexpectedArgument("undo"))
        );
        assert!(matches!(
            "rotate sideways".parse::<Command>(),
            Err(CommandError::Direction(_))
        ));
        assert_eq!("".parse::<Command>(), Err(CommandError::Empty));
    }

    #[test]
    fn test_display_parses_back() {
        for command in [
            Command::Open("a b.png".into()),
            Command::Filter("Fish Eye".to_string()),
            Command::Resize(ResizeDirection::Smaller),
            Command::Reload,
        ] {
            assert_eq!(command.to_string().parse(), Ok(command));
        }
    }

    #[test]
    fn test_parse_script() {
        let script = "# warm it up\nopen in.png\n\nfilter Sepia\n  # done\nsave out.jpg\n";
        assert_eq!(
            parse_script(script).unwrap(),
            vec![
                Command::Open("in.png".into()),
                Command::Filter("Sepia".to_string()),
                Command::Save("out.jpg".into()),
            ]
        );
    }

    #[test]
    fn test_parse_script_reports_line() {
        let err = parse_script("open in.png\nsharpen\n").unwrap_err();
        assert_eq!(err.to_string(), "line 2: unknown command 'sharpen'");
    }

    #[test]
    fn test_parse_args_separators() {
        let commands = parse_args(&args(&[
            "open", "in.png", "--then", "filter", "Edge", "Detection;", "undo;", "status",
        ]))
        .unwrap();
        assert_eq!(
            commands,
            vec![
                Command::Open("in.png".into()),
                Command::Filter("Edge Detection".to_string()),
                Command::Undo,
                Command::Status,
            ]
        );
        assert!(parse_args(&[]).unwrap().is_empty());
        assert!(parse_args(&args(&["--then", ";"])).unwrap().is_empty());
    }

    #[test]
    fn test_execute_reports_status() {
        let mut session = EditSession::new();
        session.load(PixelBuffer::filled(2, 2, Rgb::WHITE).unwrap());

        let lines = execute(&mut session, &Command::Filter("invert".to_string())).unwrap();
        assert_eq!(lines, vec!["Applied: Invert"]);

        let lines = execute(&mut session, &Command::Rotate(RotateDirection::Left)).unwrap();
        assert_eq!(lines, vec!["Rotated image 90 degrees left"]);

        let lines = execute(&mut session, &Command::Status).unwrap();
        assert_eq!(
            lines,
            vec![
                "No file displayed.",
                "Size: 2x2",
                "History: 2 undo, 0 redo",
                "History limit: none",
                "Redo policy: cleared on edit",
                "Status: Rotated image 90 degrees left",
            ]
        );
    }

    #[test]
    fn test_status_shows_history_config() {
        let config = SessionConfig {
            redo_policy: RedoPolicy::Preserve,
            max_history: Some(8),
            ..SessionConfig::default()
        };
        let mut session = EditSession::with_config(config);

        let lines = execute(&mut session, &Command::Status).unwrap();
        assert_eq!(
            lines,
            vec![
                "No file displayed.",
                "History: 0 undo, 0 redo",
                "History limit: 8",
                "Redo policy: preserved",
            ]
        );
    }

    #[test]
    fn test_execute_filters_lists_menu() {
        let mut session = EditSession::new();
        let lines = execute(&mut session, &Command::Filters).unwrap();
        assert_eq!(lines.len(), 12);
        assert_eq!(lines[0], "Darker");
        assert_eq!(lines[11], "Sepia");
    }

    #[test]
    fn test_execute_error_propagates() {
        let mut session = EditSession::new();
        assert_eq!(
            execute(&mut session, &Command::Undo),
            Err(EditError::NoImageLoaded)
        );
    }
}
