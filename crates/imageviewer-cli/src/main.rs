//! imageviewer CLI - scriptable image editing session
//!
//! Runs a sequence of session commands (open, filter, resize, rotate, undo,
//! redo, reload, save) against a single image.

mod commands;
mod config;

use std::fs;
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ColorChoice, Parser};
use colored::Colorize;
use imageviewer_core::{EditSession, RedoPolicy, SessionConfig};
use log::info;

use commands::{execute, parse_args, parse_script, Command};

/// Scriptable image editing session
///
/// Commands run in order against one editing session. Each successful command
/// prints the session status.
#[derive(Parser, Debug)]
#[command(name = "imageviewer")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "COMMANDS:
    open <path>              Load an image (PNG, JPEG, BMP, GIF)
    close                    Drop the image and its history
    filter <name>            Apply a filter from the menu (see 'filters')
    resize larger|smaller    Double or halve the image
    rotate left|right        Rotate a quarter turn
    undo, redo               Step through the edit history
    reload                   Re-read the opened file, clearing history
    save <path>              Write the image; format follows the extension
    filters                  List filter names
    status                   Show file, size, history and last status

EXAMPLES:
    imageviewer open cat.png --then filter Sepia --then save cat-sepia.jpg
    imageviewer open cat.png\\; rotate left\\; save rotated.png
    imageviewer --script edits.txt

Options must come before the first command. Everything from the first command
on is read as commands, so 'undo --then filters --strict' treats '--strict'
as an argument to 'filters'.

EXIT CODES:
    0 - Success
    1 - Invalid command, or any failed command with --strict
    2 - File error (unreadable image, failed save, missing script/config)")]
struct Cli {
    /// Commands to run, separated by '--then' or a trailing ';'
    #[arg(
        value_name = "COMMAND",
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    commands: Vec<String>,

    /// Read commands from a file, one per line ('#' starts a comment)
    ///
    /// Script commands run before any positional commands.
    #[arg(long, value_name = "FILE")]
    script: Option<PathBuf>,

    /// JSON session config (redo_policy, max_history, max_dimension)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Keep the redo stack when a new edit is made
    #[arg(long)]
    preserve_redo: bool,

    /// Maximum number of undo steps kept
    #[arg(long, value_name = "N")]
    max_history: Option<usize>,

    /// Stop with exit code 1 on the first failed command
    #[arg(long)]
    strict: bool,

    /// Control color output
    #[arg(long, value_enum, default_value = "auto")]
    color: ColorChoice,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    setup_colors(&cli);

    let config = match session_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            return ExitCode::from(2);
        }
    };

    let commands = match collect_commands(&cli) {
        Ok(commands) => commands,
        Err(Failure::Io(e)) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            return ExitCode::from(2);
        }
        Err(Failure::Parse(e)) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            return ExitCode::from(1);
        }
    };

    if commands.is_empty() {
        eprintln!("{}: no commands given", "warning".yellow().bold());
        return ExitCode::SUCCESS;
    }

    run(&cli, config, &commands)
}

enum Failure {
    Io(String),
    Parse(String),
}

fn setup_colors(cli: &Cli) {
    match cli.color {
        ColorChoice::Always => colored::control::set_override(true),
        ColorChoice::Never => colored::control::set_override(false),
        ColorChoice::Auto => {
            if !io::stderr().is_terminal() {
                colored::control::set_override(false);
            }
        }
    }
}

fn session_config(cli: &Cli) -> Result<SessionConfig, String> {
    let mut config = match &cli.config {
        Some(path) => config::load_config(path)?,
        None => SessionConfig::default(),
    };
    if cli.preserve_redo {
        config.redo_policy = RedoPolicy::Preserve;
    }
    if cli.max_history.is_some() {
        config.max_history = cli.max_history;
    }
    Ok(config)
}

fn collect_commands(cli: &Cli) -> Result<Vec<Command>, Failure> {
    let mut commands = Vec::new();
    if let Some(path) = &cli.script {
        let text = fs::read_to_string(path).map_err(|e| {
            Failure::Io(format!("Failed to read script {}: {e}", path.display()))
        })?;
        let script = parse_script(&text)
            .map_err(|e| Failure::Parse(format!("{}: {e}", path.display())))?;
        commands.extend(script);
    }
    let positional = parse_args(&cli.commands).map_err(|e| Failure::Parse(e.to_string()))?;
    commands.extend(positional);
    Ok(commands)
}

fn run(cli: &Cli, config: SessionConfig, commands: &[Command]) -> ExitCode {
    let mut session = EditSession::with_config(config);
    info!("running {} commands", commands.len());

    for command in commands {
        match execute(&mut session, command) {
            Ok(lines) => {
                for line in lines {
                    println!("{line}");
                }
            }
            Err(e) => {
                eprintln!("{}: {}: {}", "error".red().bold(), command, e);
                if e.is_codec_error() {
                    return ExitCode::from(2);
                }
                if cli.strict {
                    return ExitCode::from(1);
                }
            }
        }
    }

    ExitCode::SUCCESS
}
