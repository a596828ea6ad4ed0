//! `repl::movement` module
//!
//! Contains repl loop handlers for commands that change the player's node or row.

use crate::{
    command::Refusal,
    repl::look_handler,
    session::Session,
    spinners::SpinnerType,
    view::{View, ViewItem},
};

use anyhow::Result;
use log::info;
use moba_data::Row;

/// Walk along a labeled path to a neighboring node, then look around.
///
/// # Errors
/// Returns an error if the player or either node cannot be resolved.
pub fn go_handler(session: &mut Session, view: &mut View, tokens: &[&str]) -> Result<()> {
    if tokens.len() != 2 {
        view.push(ViewItem::Usage {
            problem: "I don't understand where you want to go. Type".to_string(),
            syntax: Some(format!("{} <direction>", tokens[0])),
        });
        return Ok(());
    }

    let label = tokens[1].to_lowercase();
    let from = session.player()?.node;
    let Some(destination) = session.map.destination(from, &label) else {
        view.push(ViewItem::Refused(Refusal::UnknownDirection(label)));
        return Ok(());
    };

    let travel_message = session.spin_spinner(SpinnerType::Movement, "You head that way...");
    view.push(ViewItem::Travel(travel_message));
    let player = session.player;
    session.move_character(player, destination)?;
    info!(
        "{} moved from {from} to {} ({destination})",
        session.player()?.name,
        session.map.node(destination)?.name
    );

    look_handler(session, view)?;
    session.next_turn(view)
}

/// Step to the front or back row of the current node.
///
/// # Errors
/// Returns an error if the player cannot be resolved.
pub fn move_handler(session: &mut Session, view: &mut View, tokens: &[&str]) -> Result<()> {
    let row = match tokens {
        [_, token] => Row::from_token(token),
        _ => None,
    };
    let Some(row) = row else {
        view.push(ViewItem::Usage {
            problem: "I don't understand where you want to go. Type".to_string(),
            syntax: Some(format!("{} [front|back]", tokens[0])),
        });
        return Ok(());
    };

    let player = session.player_mut()?;
    if player.row == row {
        view.push(ViewItem::Refused(Refusal::AlreadyInRow(row)));
        return Ok(());
    }
    player.row = row;
    info!("{} moved to the {} row", player.name, row.as_str());
    view.push(ViewItem::RowChanged(row));
    session.next_turn(view)
}
