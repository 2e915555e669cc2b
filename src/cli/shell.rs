//! Interactive `gamehub shell`.
//!
//! Each line goes through the same clap definition as the command line, so
//! anything `gamehub <args>` accepts works here without the prefix. Tab
//! completion knows the game ids, the config keys and their values.

use std::path::PathBuf;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{CompletionType, Editor, Helper};

use super::commands::config::KEYS;
use super::{execute, Cli, Commands};
use crate::config::Config;
use crate::registry;
use crate::theme::ThemePreset;

const TOP_LEVEL: &[&str] = &["games", "server", "config", "help", "exit", "quit"];
const SERVER_SUBCOMMANDS: &[&str] = &["status", "start", "stop", "watch"];
const CONFIG_SUBCOMMANDS: &[&str] = &["show", "get", "set", "path"];
const GLOBAL_FLAGS: &[&str] = &["--json", "--quiet", "-q"];

const SHELL_HELP: &str = "\
Type any gamehub command without the leading `gamehub`:

  games
  server status|start|stop|watch [--game ID] [--force]
  config show|get|set|path [KEY] [VALUE]

  help <command>    Options of one command
  exit, quit        Leave the shell

--json and -q work on every command. Tab completes game ids and config keys.";

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn game_ids() -> Vec<String> {
    registry::ids().map(String::from).collect()
}

/// Values worth suggesting for `config set <key>`
fn config_values(key: &str) -> Vec<String> {
    match key {
        "dashboard.default_game" => game_ids(),
        "dashboard.track_joinability" => owned(&["true", "false"]),
        "launcher.theme" => ThemePreset::all()
            .iter()
            .map(|p| p.name().to_ascii_lowercase())
            .collect(),
        _ => Vec::new(),
    }
}

/// Words that may follow `words`, global flags ignored
fn candidates(words: &[&str]) -> Vec<String> {
    let words: Vec<&str> = words
        .iter()
        .copied()
        .filter(|w| !GLOBAL_FLAGS.contains(w))
        .collect();

    match words.as_slice() {
        [] => owned(TOP_LEVEL),
        ["help"] => owned(&["games", "server", "config"]),
        ["server"] => owned(SERVER_SUBCOMMANDS),
        ["config"] => owned(CONFIG_SUBCOMMANDS),
        ["config", "get" | "set"] => owned(KEYS),
        ["config", "set", key] => config_values(key),
        ["server", sub, rest @ ..] if SERVER_SUBCOMMANDS.contains(sub) => {
            if rest.last() == Some(&"--game") {
                return game_ids();
            }
            let mut flags = vec!["--game"];
            if matches!(*sub, "start" | "stop") {
                flags.push("--force");
            }
            flags.extend(["--json", "--quiet"]);
            flags
                .into_iter()
                .filter(|f| !rest.contains(f))
                .map(String::from)
                .collect()
        }
        _ => Vec::new(),
    }
}

/// Completion for the word under the cursor: where it starts and what fits
fn complete_at(before_cursor: &str) -> (usize, Vec<String>) {
    let start = before_cursor.rfind(' ').map(|i| i + 1).unwrap_or(0);
    let (done, partial) = before_cursor.split_at(start);
    let words: Vec<&str> = done.split_whitespace().collect();

    let matches = candidates(&words)
        .into_iter()
        .filter(|c| c.starts_with(partial))
        .collect();
    (start, matches)
}

struct ShellHelper;

impl Completer for ShellHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &rustyline::Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let (start, matches) = complete_at(&line[..pos]);
        let pairs = matches
            .into_iter()
            .map(|m| Pair {
                display: m.clone(),
                replacement: m,
            })
            .collect();
        Ok((start, pairs))
    }
}

impl Hinter for ShellHelper {
    type Hint = String;
}

impl Highlighter for ShellHelper {}
impl Validator for ShellHelper {}
impl Helper for ShellHelper {}

/// Split a line into words. Quotes group words and may be empty (`""`).
fn split_line(line: &str) -> Result<Vec<String>, &'static str> {
    let mut words = Vec::new();
    let mut word: Option<String> = None;
    let mut quote: Option<char> = None;

    for c in line.chars() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => word.get_or_insert_with(String::new).push(c),
            None if c == '"' || c == '\'' => {
                quote = Some(c);
                word.get_or_insert_with(String::new);
            }
            None if c.is_whitespace() => words.extend(word.take()),
            None => word.get_or_insert_with(String::new).push(c),
        }
    }

    if quote.is_some() {
        return Err("Unterminated quote");
    }
    words.extend(word);
    Ok(words)
}

#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

fn print_help(topic: Option<&str>) {
    let Some(name) = topic else {
        println!("{}", SHELL_HELP);
        return;
    };
    let mut cli = Cli::command();
    match cli.find_subcommand_mut(name) {
        Some(command) => println!("{}", command.render_long_help()),
        None => println!("No command named '{}'", name),
    }
}

/// Run one shell line
async fn run_line(line: &str) -> Result<Flow> {
    let words = match split_line(line) {
        Ok(words) => words,
        Err(msg) => {
            println!("{}", msg);
            return Ok(Flow::Continue);
        }
    };

    match words.first().map(String::as_str) {
        None => return Ok(Flow::Continue),
        Some("exit" | "quit") => return Ok(Flow::Exit),
        Some("help") => {
            print_help(words.get(1).map(String::as_str));
            return Ok(Flow::Continue);
        }
        Some(_) => {}
    }

    let cli = match Cli::try_parse_from(std::iter::once("gamehub".to_string()).chain(words)) {
        Ok(cli) => cli,
        Err(e) => {
            // clap's message already carries usage
            println!("{}", e);
            return Ok(Flow::Continue);
        }
    };

    if matches!(cli.command, Commands::Shell) {
        println!("Already in the shell.");
        return Ok(Flow::Continue);
    }

    execute(cli.command, cli.output.output()).await?;
    Ok(Flow::Continue)
}

fn history_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("com", "gamehub", "GameHub")
        .map(|dirs| dirs.data_dir().join("shell_history"))
}

pub async fn run() -> Result<()> {
    let config = Config::load().unwrap_or_default();
    println!(
        "GameHub shell v{}, using {} (default game: {})",
        env!("CARGO_PKG_VERSION"),
        config.api.base_url,
        config.dashboard.default_game
    );
    println!("Type 'help' for commands, Tab to complete, 'exit' to leave.\n");

    let editor_config = rustyline::Config::builder()
        .history_ignore_space(true)
        .auto_add_history(true)
        .completion_type(CompletionType::List)
        .build();
    let mut editor = Editor::with_config(editor_config)?;
    editor.set_helper(Some(ShellHelper));

    let history = history_path();
    if let Some(path) = &history {
        if let Err(e) = editor.load_history(path) {
            tracing::debug!("No shell history loaded: {}", e);
        }
    }

    loop {
        let line = match editor.readline("gamehub> ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => break,
            Err(e) => {
                tracing::error!("Failed to read input: {}", e);
                break;
            }
        };

        match run_line(line.trim()).await {
            Ok(Flow::Continue) => {}
            Ok(Flow::Exit) => break,
            Err(e) => eprintln!("Error: {:#}", e),
        }
    }

    if let Some(path) = history {
        if let Some(parent) = path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        if let Err(e) = editor.save_history(&path) {
            tracing::warn!("Failed to save shell history: {}", e);
        }
    }

    Ok(())
}
