#![allow(dead_code)]
//! Shared fixture: a camp ("a") south of a lane ("b") where a skirmish is going on.
//!
//! Occupants of the lane, in order: 0 blue minion (front), 1 red grunt (front),
//! 2 red brute (front), 3 red archer (back). The player starts alone in the camp,
//! in the back row.

use moba_data::{
    CharacterDef, ClassDef, EffectDef, GameDef, InfoDef, NodeDef, PathDef, PlayerDef, Row, SkillDef, TargetMode,
    TargetTeam, Team,
};
use moba_engine::loader::rules::GameRules;
use moba_engine::view::{DirectionLine, HelpLine, OccupantLine};
use moba_engine::{Refusal, Session, View, ViewItem};

fn skill(id: &str, target: TargetMode, target_team: TargetTeam, range: u32, cost: u32, cooldown: u32, effect: EffectDef) -> SkillDef {
    SkillDef {
        id: id.into(),
        name: String::new(),
        mana_cost: cost,
        cooldown,
        target,
        target_team,
        range,
        effect,
    }
}

fn class(id: &str, max_hp: u32, max_mana: u32, range: u32, attack: u32, respawn_turns: Option<u32>, skills: Vec<SkillDef>) -> ClassDef {
    ClassDef {
        id: id.into(),
        name: id[..1].to_uppercase() + &id[1..],
        max_hp,
        max_mana,
        range,
        attack,
        mana_regen: 0,
        respawn_turns,
        skills,
    }
}

fn npc(id: &str, name: &str, team: Team, row: Row) -> CharacterDef {
    CharacterDef {
        id: id.into(),
        name: name.into(),
        class: "minion".into(),
        team,
        node: "b".into(),
        row,
        level: 0,
    }
}

pub fn game() -> GameDef {
    GameDef {
        title: "Skirmish".into(),
        intro: String::new(),
        start_node: "a".into(),
        player: PlayerDef {
            name: "Hero".into(),
            team: Team::Blue,
            class: "mage".into(),
            row: Row::Back,
        },
        nodes: vec![
            NodeDef {
                id: "a".into(),
                name: "Camp".into(),
                desc: "A quiet camp.".into(),
                paths: vec![PathDef {
                    to: "b".into(),
                    directions: vec!["north".into(), "lane".into()],
                }],
            },
            NodeDef {
                id: "b".into(),
                name: "Lane".into(),
                desc: "Minions clash here.".into(),
                paths: vec![PathDef {
                    to: "a".into(),
                    directions: vec!["south".into()],
                }],
            },
        ],
        classes: vec![
            class(
                "mage",
                30,
                20,
                2,
                4,
                None,
                vec![
                    skill("bomb", TargetMode::AnyRow, TargetTeam::Enemy, 2, 6, 2, EffectDef::Damage(5)),
                    skill("zap", TargetMode::Single, TargetTeam::Enemy, 3, 4, 1, EffectDef::Damage(7)),
                    skill("mend", TargetMode::Single, TargetTeam::Ally, 2, 3, 0, EffectDef::Heal(5)),
                    skill("nova", TargetMode::All, TargetTeam::Enemy, 1, 2, 0, EffectDef::Damage(2)),
                    skill("meteor", TargetMode::All, TargetTeam::Enemy, 5, 50, 0, EffectDef::Damage(99)),
                ],
            ),
            class("warrior", 50, 5, 1, 9, None, Vec::new()),
            class("minion", 10, 0, 1, 2, Some(2), Vec::new()),
        ],
        characters: vec![
            npc("ally", "Blue minion", Team::Blue, Row::Front),
            npc("grunt", "Red grunt", Team::Red, Row::Front),
            npc("brute", "Red brute", Team::Red, Row::Front),
            npc("archer", "Red archer", Team::Red, Row::Back),
        ],
        infos: vec![InfoDef {
            topic: "rows".into(),
            text: "Front and back.".into(),
        }],
    }
}

pub fn session() -> Session {
    Session::new(game(), GameRules::default()).unwrap()
}

/// Session with the player already walked into the lane (turn 2).
pub fn session_in_lane() -> Session {
    let mut session = session();
    let mut view = View::new();
    session.execute_line("go north", &mut view);
    assert_eq!(session.turn, 2);
    session
}

pub fn refusals(view: &View) -> Vec<Refusal> {
    view.view_items().filter_map(ViewItem::refusal).cloned().collect()
}

pub fn hp(session: &Session, symbol: &str) -> u32 {
    session
        .roster
        .iter()
        .find(|c| c.symbol == symbol)
        .map(|c| c.hp.current())
        .unwrap()
}

pub fn occupants(view: &View) -> Vec<OccupantLine> {
    view.view_items()
        .find_map(|i| match i {
            ViewItem::Occupants(lines) => Some(lines.clone()),
            _ => None,
        })
        .unwrap()
}

pub fn help_lines(view: &View) -> Vec<HelpLine> {
    view.view_items()
        .find_map(|i| match i {
            ViewItem::Help(lines) => Some(lines.clone()),
            _ => None,
        })
        .unwrap()
}

pub fn directions(view: &View) -> Vec<DirectionLine> {
    view.view_items()
        .find_map(|i| match i {
            ViewItem::Directions(lines) => Some(lines.clone()),
            _ => None,
        })
        .unwrap()
}

pub fn skill_targets(view: &View) -> Vec<String> {
    view.view_items()
        .find_map(|i| match i {
            ViewItem::SkillUsed { targets, .. } => Some(targets.clone()),
            _ => None,
        })
        .unwrap()
}
