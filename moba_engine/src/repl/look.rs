//! Observation command handlers.
//!
//! None of these consume a turn: `look`, `directions`, `help` and `info` only describe
//! the current state of the match.

use crate::session::Session;
use crate::view::{DirectionLine, HelpLine, OccupantLine, SkillLine, View, ViewItem};

use anyhow::Result;
use log::info;

/// Describe the player's node, everyone in it (numbered for `attack`/`use`) and the
/// player's own status.
///
/// # Errors
/// Returns an error if the player or their node cannot be resolved.
pub fn look_handler(session: &Session, view: &mut View) -> Result<()> {
    let player = session.player()?;
    let node = session.map.node(player.node)?;
    let groups = session.groups_at(player.node)?;

    view.push(ViewItem::NodeDescription {
        name: node.name.clone(),
        description: node.description.clone(),
    });

    let mut occupants = Vec::with_capacity(node.characters.len());
    for (index, id) in node.characters.iter().enumerate() {
        let character = session.character(*id)?;
        occupants.push(OccupantLine {
            index,
            row: character.row,
            name: character.name.clone(),
            team: character.team,
            level: character.level + 1,
            hp: character.hp.current(),
            max_hp: character.hp.max(),
            distance: groups.distance_between(player, character),
            is_player: *id == session.player,
            alive: character.is_alive(),
        });
    }
    view.push(ViewItem::Occupants(occupants));

    view.push(ViewItem::PlayerStatus {
        hp: player.hp.current(),
        max_hp: player.hp.max(),
        mana: player.mana.current(),
        max_mana: player.mana.max(),
        skills: player
            .skills
            .iter()
            .map(|skill| SkillLine {
                name: skill.name.clone(),
                mana_cost: skill.mana_cost,
                range: skill.range,
                cooldown_left: skill.cooldown_left,
            })
            .collect(),
    });

    info!("{} looked around {} ({})", player.name, node.name, node.symbol);
    Ok(())
}

/// List every outgoing path of the player's node with all of its labels.
///
/// # Errors
/// Returns an error if the player or a node on either end of a path cannot be resolved.
pub fn directions_handler(session: &Session, view: &mut View) -> Result<()> {
    let node = session.map.node(session.player()?.node)?;
    let mut lines = Vec::new();
    for (to, labels) in &node.paths {
        lines.push(DirectionLine {
            labels: labels.iter().cloned().collect(),
            destination: session.map.node(*to)?.name.clone(),
        });
    }
    view.push(ViewItem::Directions(lines));
    Ok(())
}

/// Show every verb with its aliases.
pub fn help_handler(session: &Session, view: &mut View) {
    let lines = session
        .registry
        .verbs()
        .iter()
        .map(|verb| HelpLine {
            aliases: verb.aliases().iter().map(ToString::to_string).collect(),
            description: verb.description().to_string(),
        })
        .collect();
    view.push(ViewItem::Help(lines));
}

/// `info <topic>` prints a topic; any other argument count lists the topics.
pub fn info_handler(session: &Session, view: &mut View, tokens: &[&str]) {
    if tokens.len() != 2 {
        let topics = session.infos().iter().map(|info| info.topic.clone()).collect();
        view.push(ViewItem::InfoTopics(topics));
        return;
    }
    match session.info(tokens[1]) {
        Some(info) => view.push(ViewItem::InfoText {
            topic: info.topic.clone(),
            text: info.text.clone(),
        }),
        None => view.push(ViewItem::UnknownTopic(tokens[1].to_string())),
    }
}
