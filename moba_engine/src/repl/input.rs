//! Terminal input handling for the game REPL.
//!
//! Wraps rustyline configuration and alias completion, with a plain stdin fallback
//! when no terminal is attached.

use std::io::{self, IsTerminal, Write};
use std::path::{Path, PathBuf};

use log::{info, warn};
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};

use crate::command::Verb;

/// Outcome of reading a line from the REPL input.
pub enum InputEvent {
    Line(String),
    Eof,
    Interrupted,
}

/// Words completed at the start of a line, besides the registered aliases.
const EXTRA_TERMS: &[&str] = &["quit", "exit"];

type ReplEditor = rustyline::Editor<MobaHelper, DefaultHistory>;

#[derive(Default)]
struct MobaHelper;

impl Helper for MobaHelper {}

impl Completer for MobaHelper {
    type Candidate = Pair;

    fn complete(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> rustyline::Result<(usize, Vec<Self::Candidate>)> {
        let (start, prefix) = current_prefix(line, pos);
        // only the verb itself is completed
        if prefix.is_empty() || prefix.contains(char::is_whitespace) {
            return Ok((start, Vec::new()));
        }
        let pairs = command_terms()
            .into_iter()
            .filter(|term| term.starts_with(prefix.as_str()))
            .map(|term| Pair {
                display: term.clone(),
                replacement: term,
            })
            .collect();
        Ok((start, pairs))
    }
}

impl Hinter for MobaHelper {
    type Hint = String;
}

impl Highlighter for MobaHelper {}

impl Validator for MobaHelper {}

fn current_prefix(line: &str, pos: usize) -> (usize, String) {
    let slice = &line[..pos];
    let trimmed = slice.trim_start_matches(char::is_whitespace);
    let start = pos - trimmed.len();
    (start, trimmed.to_string())
}

/// Full-word aliases worth completing (single-letter shortcuts are skipped).
fn command_terms() -> Vec<String> {
    let mut terms: Vec<String> = Verb::ALL
        .iter()
        .flat_map(|verb| verb.aliases().iter())
        .filter(|alias| alias.len() > 1)
        .map(ToString::to_string)
        .chain(EXTRA_TERMS.iter().map(ToString::to_string))
        .collect();
    terms.sort_unstable();
    terms.dedup();
    terms
}

/// Line source for the REPL: a rustyline editor on a terminal, plain stdin otherwise.
///
/// Once the editor fails it is dropped for the rest of the session.
#[derive(Default)]
pub struct InputManager {
    editor: Option<Box<RustylineInput>>,
    stdin: StdinInput,
}

impl InputManager {
    pub fn new() -> Self {
        let editor = if io::stdin().is_terminal() {
            RustylineInput::new()
                .inspect_err(|err| warn!("no line editor ({err}), reading plain stdin"))
                .ok()
                .map(Box::new)
        } else {
            None
        };
        info!("REPL input: {}", if editor.is_some() { "rustyline" } else { "stdin" });
        Self {
            editor,
            stdin: StdinInput::default(),
        }
    }

    pub fn read_line(&mut self, prompt: &str) -> io::Result<InputEvent> {
        if let Some(editor) = self.editor.as_mut() {
            match editor.read_line(prompt) {
                Ok(event) => return Ok(event),
                Err(err) => {
                    warn!("line editor failed: {err}; reading plain stdin from now on");
                    self.editor = None;
                },
            }
        }
        self.stdin.read_line(prompt)
    }
}

struct RustylineInput {
    editor: ReplEditor,
    history_path: Option<PathBuf>,
}

impl RustylineInput {
    fn new() -> io::Result<Self> {
        let mut editor = rustyline::Editor::<MobaHelper, _>::new().map_err(map_io_err)?;
        editor.set_helper(Some(MobaHelper));
        let history_path = history_file_path();

        if let Some(path) = history_path.as_ref()
            && let Err(err) = editor.load_history(path)
        {
            match err {
                ReadlineError::Io(ref io_err) if io_err.kind() == io::ErrorKind::NotFound => {
                    info!("no prior history found at {}, starting fresh", path.display());
                },
                other => {
                    warn!("failed to load history from {}: {other}", path.display());
                },
            }
        }

        Ok(Self { editor, history_path })
    }

    fn read_line(&mut self, prompt: &str) -> io::Result<InputEvent> {
        match self.editor.readline(prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    if let Err(err) = self.editor.add_history_entry(line.as_str()) {
                        warn!("failed to append to history: {err}");
                    }
                    if let Some(path) = self.history_path.as_ref()
                        && let Err(err) = self.editor.save_history(path)
                    {
                        warn!("failed to persist history to {}: {err}", path.display());
                    }
                }
                Ok(InputEvent::Line(line))
            },
            Err(err) => convert_readline_error(err),
        }
    }
}

#[derive(Default)]
struct StdinInput {
    buffer: String,
}

impl StdinInput {
    fn read_line(&mut self, prompt: &str) -> io::Result<InputEvent> {
        print!("{prompt}");
        io::stdout().flush()?;

        self.buffer.clear();
        let bytes = io::stdin().read_line(&mut self.buffer)?;
        if bytes == 0 {
            return Ok(InputEvent::Eof);
        }

        if self.buffer.ends_with('\n') {
            self.buffer.pop();
            if self.buffer.ends_with('\r') {
                self.buffer.pop();
            }
        }

        Ok(InputEvent::Line(self.buffer.clone()))
    }
}

fn convert_readline_error(err: ReadlineError) -> io::Result<InputEvent> {
    match err {
        ReadlineError::Interrupted => Ok(InputEvent::Interrupted),
        ReadlineError::Eof => Ok(InputEvent::Eof),
        ReadlineError::Io(io_err) => Err(io_err),
        other => Err(io::Error::other(other)),
    }
}

fn map_io_err(err: ReadlineError) -> io::Error {
    match err {
        ReadlineError::Io(io_err) => io_err,
        other => io::Error::other(other),
    }
}

/// History lives next to the game data, in a hidden file.
fn history_file_path() -> Option<PathBuf> {
    let path = crate::data_paths::data_path(".history");
    if path.parent().is_some_and(Path::is_dir) { Some(path) } else { None }
}
