//! `repl::combat` module
//!
//! Basic attacks and skill use. Checks run in a fixed order and the first failure is
//! reported; nothing is spent and no turn passes unless the action resolves.

use crate::{
    command::{Refusal, parse_index},
    session::Session,
    skill::{SkillEffect, TargetSelector},
    view::{View, ViewItem},
};

use anyhow::{Context, Result, bail};
use log::info;
use moba_data::{Row, TargetMode};

/// Hit the character shown at `index` by `look` with a basic attack.
///
/// # Errors
/// Returns an error if the player, their node or the target cannot be resolved.
pub fn attack_handler(session: &mut Session, view: &mut View, tokens: &[&str]) -> Result<()> {
    if tokens.len() != 2 {
        view.push(ViewItem::Usage {
            problem: "I don't understand who you want to attack. Type".to_string(),
            syntax: Some(format!(
                "{} <character-number>   (the number displayed when you type \"look\")",
                tokens[0]
            )),
        });
        return Ok(());
    }
    let Some(index) = parse_index(tokens[1]) else {
        view.push(ViewItem::Usage {
            problem: "I don't understand who you try to attack.".to_string(),
            syntax: None,
        });
        return Ok(());
    };

    let player = session.player()?;
    let Some(target_id) = session.map.character_at(player.node, index) else {
        view.push(ViewItem::Refused(Refusal::InvalidTarget));
        return Ok(());
    };
    let target = session.character(target_id)?;
    if !target.is_alive() {
        view.push(ViewItem::Refused(Refusal::InvalidTarget));
        return Ok(());
    }
    if target.team == player.team {
        view.push(ViewItem::Refused(Refusal::CannotAttackAllies));
        return Ok(());
    }
    let groups = session.groups_at(player.node)?;
    if groups.distance_between(player, target) > player.range {
        view.push(ViewItem::Refused(Refusal::OutOfRange));
        return Ok(());
    }

    let damage = player.attack_power;
    info!("{} attacks {} ({target_id}) for {damage}", player.name, target.name);
    view.push(ViewItem::Attacked {
        target: target.name.clone(),
        damage,
    });
    session.apply_effect(target_id, SkillEffect::Damage(damage), view)?;
    session.next_turn(view)
}

/// Cast one of the player's skills.
///
/// Single-target skills take a character number, row skills take `front` or `back`,
/// and skills hitting everyone in range take nothing.
///
/// # Errors
/// Returns an error if the player, their node or a resolved target cannot be found.
pub fn use_handler(session: &mut Session, view: &mut View, tokens: &[&str]) -> Result<()> {
    if tokens.len() < 2 {
        view.push(ViewItem::Usage {
            problem: "I don't understand what you try to use. Type".to_string(),
            syntax: Some(format!("{} <skill-name> [<character-number>|front|back]", tokens[0])),
        });
        return Ok(());
    }

    let player = session.player()?;
    let Some(skill_index) = player.skill(tokens[1]) else {
        view.push(ViewItem::Refused(Refusal::UnknownSkill(tokens[1].to_string())));
        return Ok(());
    };
    let skill = &player.skills[skill_index];
    if !skill.usable(player) {
        view.push(ViewItem::Refused(Refusal::SkillUnavailable));
        return Ok(());
    }
    if player.mana.current() < skill.mana_cost {
        view.push(ViewItem::Refused(Refusal::InsufficientMana {
            need: skill.mana_cost,
            have: player.mana.current(),
        }));
        return Ok(());
    }

    let selector = match skill.target {
        TargetMode::Single => {
            if tokens.len() != 3 {
                view.push(ViewItem::Usage {
                    problem: "This skill targets a single character and so takes a <character-number> in parameter."
                        .to_string(),
                    syntax: Some(format!("{} {} <character-number>", tokens[0], tokens[1])),
                });
                return Ok(());
            }
            let Some(index) = parse_index(tokens[2]) else {
                view.push(ViewItem::Usage {
                    problem: "I don't understand who you're trying to target.".to_string(),
                    syntax: None,
                });
                return Ok(());
            };
            let Some(target_id) = session.map.character_at(player.node, index) else {
                view.push(ViewItem::Refused(Refusal::InvalidTarget));
                return Ok(());
            };
            let target = session.character(target_id)?;
            if !target.is_alive() {
                view.push(ViewItem::Refused(Refusal::InvalidTarget));
                return Ok(());
            }
            if !skill.accepts_team(player, target) {
                view.push(ViewItem::Refused(Refusal::WrongTeam));
                return Ok(());
            }
            TargetSelector::Character(target_id)
        },
        TargetMode::AnyRow => {
            let row = match tokens {
                [_, _, token] => Row::from_token(token),
                _ => None,
            };
            let Some(row) = row else {
                view.push(ViewItem::Usage {
                    problem: "This skill targets a row, so you need to choose between \"front\" and \"back\". \
                              The row must be in range."
                        .to_string(),
                    syntax: Some(format!("{} {} [front|back]", tokens[0], tokens[1])),
                });
                return Ok(());
            };
            TargetSelector::Row(row)
        },
        TargetMode::All => TargetSelector::Everyone,
    };

    let groups = session.groups_at(player.node)?;
    let targets = skill.targets(player, selector, &groups, &session.roster);
    if targets.is_empty() {
        view.push(ViewItem::NoTargets);
        return Ok(());
    }

    let skill_name = skill.name.clone();
    let effect = skill.effect;
    let target_names = targets
        .iter()
        .map(|id| session.character(*id).map(|c| c.name.clone()))
        .collect::<Result<Vec<_>>>()?;

    let cost = skill.mana_cost;
    let player = session.player_mut()?;
    if !player.mana.try_spend(cost) {
        bail!("{} cannot pay {cost} mana for {skill_name}", player.name);
    }
    player
        .skills
        .get_mut(skill_index)
        .context("skill vanished while being cast")?
        .start_cooldown();
    info!("{} uses {skill_name} on {}", player.name, target_names.join(", "));
    view.push(ViewItem::SkillUsed {
        skill: skill_name,
        targets: target_names,
    });

    for target in targets {
        session.apply_effect(target, effect, view)?;
    }
    session.next_turn(view)
}
