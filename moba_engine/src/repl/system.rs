//! `repl::system` module
//!
//! Contains repl loop handlers for waiting out a turn and for restarting the match,
//! including the class-selection dialog.

use crate::command::{CommandStatus, Pending, Refusal};
use crate::repl::look_handler;
use crate::session::Session;
use crate::view::{View, ViewItem};

use anyhow::Result;
use log::info;

/// Do nothing and let the turn pass. Works while dead.
///
/// # Errors
/// Returns an error if a respawning character cannot be moved home.
pub fn wait_handler(session: &mut Session, view: &mut View) -> Result<()> {
    info!("player waits (turn {})", session.turn);
    view.push(ViewItem::Waited);
    session.next_turn(view)
}

/// `restart` asks for a class; `restart <class>` restarts right away.
///
/// # Errors
/// Returns an error if the match cannot be rebuilt from its definition.
pub fn restart_handler(session: &mut Session, view: &mut View, tokens: &[&str]) -> Result<CommandStatus> {
    match tokens {
        [_] => Ok(prompt_for_class(session, view)),
        [_, class] => try_restart(session, view, class),
        _ => {
            view.push(ViewItem::Usage {
                problem: format!("{} takes 0 or 1 parameter.", tokens[0]),
                syntax: Some(format!("{} [class]", tokens[0])),
            });
            Ok(CommandStatus::Complete)
        },
    }
}

/// Continuation of the class-selection dialog: the whole line is one class name.
///
/// # Errors
/// Returns an error if the match cannot be rebuilt from its definition.
pub fn restart_continuation(session: &mut Session, view: &mut View, tokens: &[&str]) -> Result<CommandStatus> {
    match tokens {
        [class] => try_restart(session, view, class),
        _ => {
            view.push(ViewItem::Usage {
                problem: "Please enter one class name.".to_string(),
                syntax: None,
            });
            Ok(prompt_for_class(session, view))
        },
    }
}

fn prompt_for_class(session: &mut Session, view: &mut View) -> CommandStatus {
    view.push(ViewItem::ClassPrompt(session.class_names()));
    session.pending = Some(Pending::RestartClass);
    CommandStatus::Awaiting
}

fn try_restart(session: &mut Session, view: &mut View, class: &str) -> Result<CommandStatus> {
    let Some(class_id) = session.find_class(class).map(|def| def.id.clone()) else {
        info!("restart refused: unknown class '{class}'");
        view.push(ViewItem::Refused(Refusal::UnknownClass(class.to_string())));
        return Ok(prompt_for_class(session, view));
    };
    session.restart(&class_id)?;
    view.push(ViewItem::Restarted { class: class_id });
    look_handler(session, view)?;
    Ok(CommandStatus::Complete)
}
