//! REPL and command handling utilities.
//!
//! The game runs in a read-eval-print loop. This module and its submodules
//! implement the command handlers that act on the [`Session`].

pub mod combat;
mod input;
pub mod look;
pub mod movement;
pub mod system;

pub use combat::*;
pub use look::*;
pub use movement::*;
pub use system::*;

use crate::command::{CommandStatus, Verb};
use crate::session::Session;
use crate::spinners::SpinnerType;
use crate::style::GameStyle;
use crate::view::{View, ViewItem};

use anyhow::Result;
use log::info;

use input::{InputEvent, InputManager};

/// Words that leave the game. Handled here rather than by the command registry.
const QUIT_WORDS: [&str; 2] = ["quit", "exit"];

/// Run one verb's handler. `tokens[0]` is the alias the player typed.
///
/// # Errors
/// Propagates internal failures from the handler (unresolvable characters or nodes).
pub fn execute_verb(session: &mut Session, view: &mut View, verb: Verb, tokens: &[&str]) -> Result<CommandStatus> {
    match verb {
        Verb::Help => help_handler(session, view),
        Verb::Info => info_handler(session, view, tokens),
        Verb::Look => look_handler(session, view)?,
        Verb::Directions => directions_handler(session, view)?,
        Verb::Wait => wait_handler(session, view)?,
        Verb::Go => go_handler(session, view, tokens)?,
        Verb::Move => move_handler(session, view, tokens)?,
        Verb::Attack => attack_handler(session, view, tokens)?,
        Verb::Use => use_handler(session, view, tokens)?,
        Verb::Restart => return restart_handler(session, view, tokens),
    }
    Ok(CommandStatus::Complete)
}

/// Run the main read–eval–print loop until the user quits or input ends.
///
/// # Errors
/// - if the opening look at the starting node fails
pub fn run_repl(session: &mut Session) -> Result<()> {
    let mut view = View::new();
    let mut input_manager = InputManager::new();

    look_handler(session, &mut view)?;
    view.flush();

    loop {
        let prompt = if session.pending.is_some() {
            "\n[class]>> ".prompt_style().to_string()
        } else {
            format!("\n[Turn: {}]>> ", session.turn).prompt_style().to_string()
        };

        let input = match input_manager.read_line(&prompt) {
            Ok(InputEvent::Line(line)) => line,
            Ok(InputEvent::Eof) => break,
            Ok(InputEvent::Interrupted) => {
                view.push(ViewItem::EngineMessage("Command canceled.".to_string()));
                view.flush();
                continue;
            },
            Err(err) => {
                view.push(ViewItem::EngineMessage(format!("Failed to read input ({err}). Try again.")));
                view.flush();
                continue;
            },
        };

        if session.pending.is_none() && QUIT_WORDS.contains(&input.trim()) {
            break;
        }

        session.execute_line(&input, &mut view);
        view.flush();
    }

    let farewell = session.spin_spinner(SpinnerType::QuitMsg, "Goodbye.");
    info!("player left the game on turn {}", session.turn);
    view.push(ViewItem::EngineMessage(farewell));
    view.flush();
    Ok(())
}
