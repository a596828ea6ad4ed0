//! Session module
//!
//! The `Session` owns everything that lives for one match: the map, every character,
//! the command registry, the turn counter and the captive dialog (if any). Input lines
//! enter through [`Session::execute_line`]; turn-consuming commands end with
//! [`Session::next_turn`].
use std::collections::HashMap;

use anyhow::{Context, Result, bail};
use gametools::Spinner;
use log::{error, info, warn};
use moba_data::{ClassDef, GameDef, InfoDef};

use crate::character::{Character, CharacterId, Roster};
use crate::command::{CommandRegistry, CommandStatus, Pending, Refusal};
use crate::groups::CharacterGroups;
use crate::loader::rules::GameRules;
use crate::map::{MapGraph, NodeId};
use crate::repl::{self, system::restart_continuation};
use crate::skill::SkillEffect;
use crate::spinners::{SpinnerType, default_spinners};
use crate::view::{View, ViewItem};

/// Symbol given to the player character.
pub const PLAYER_SYMBOL: &str = "player";

/// One running match and everything needed to restart it.
#[derive(Debug)]
pub struct Session {
    pub title: String,
    pub intro: String,
    pub map: MapGraph,
    pub roster: Roster,
    pub player: CharacterId,
    pub registry: CommandRegistry,
    /// Current turn, starting at 1.
    pub turn: usize,
    /// The dialog consuming the next input line, if any.
    pub pending: Option<Pending>,
    pub rules: GameRules,
    pub spinners: HashMap<SpinnerType, Spinner<String>>,
    game: GameDef,
}

impl Session {
    /// Build the map and spawn every character from the game definition.
    ///
    /// # Errors
    /// - if a path, class or starting node referenced by the definition does not exist
    pub fn new(game: GameDef, rules: GameRules) -> Result<Session> {
        let mut map = MapGraph::new();
        for node in &game.nodes {
            map.add_node(&node.id, &node.name, &node.desc)?;
        }
        for node in &game.nodes {
            let from = map
                .lookup(&node.id)
                .with_context(|| format!("node '{}' vanished while linking paths", node.id))?;
            for path in &node.paths {
                let to = map
                    .lookup(&path.to)
                    .with_context(|| format!("path from '{}' leads to unknown node '{}'", node.id, path.to))?;
                map.add_path(from, to, &path.directions)?;
            }
        }
        info!("map built: {} nodes", map.len());

        let mut session = Session {
            title: game.title.clone(),
            intro: game.intro.clone(),
            map,
            roster: Roster::default(),
            player: CharacterId(0),
            registry: CommandRegistry::new(),
            turn: 1,
            pending: None,
            rules,
            spinners: default_spinners(),
            game,
        };
        let player_class = session.game.player.class.clone();
        session.populate(&player_class)?;
        Ok(session)
    }

    /// Process one raw input line.
    ///
    /// Nothing escapes this function: refusals, usage problems and internal errors all
    /// end up in the view. The returned status says whether the next line is a new
    /// command or the continuation of a dialog.
    pub fn execute_line(&mut self, line: &str, view: &mut View) -> CommandStatus {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.is_empty() {
            return self.status();
        }

        let result = if let Some(pending) = self.pending {
            match pending {
                Pending::RestartClass => restart_continuation(self, view, &tokens),
            }
        } else {
            let Some(verb) = self.registry.lookup(tokens[0]) else {
                let msg = self.spin_spinner(
                    SpinnerType::UnrecognizedCommand,
                    "Didn't quite catch that. Type \"help\" for a list of commands.",
                );
                view.push(ViewItem::UnknownCommand(msg));
                return CommandStatus::Complete;
            };
            if verb.requires_alive() && !self.player_alive() {
                view.push(ViewItem::Refused(Refusal::PlayerDead));
                return CommandStatus::Complete;
            }
            repl::execute_verb(self, view, verb, &tokens)
        };

        match result {
            Ok(status) => status,
            Err(e) => {
                error!("error while executing \"{line}\": {e:#}");
                view.push(ViewItem::EngineMessage(format!("Something went wrong: {e}")));
                self.status()
            },
        }
    }

    fn status(&self) -> CommandStatus {
        if self.pending.is_some() {
            CommandStatus::Awaiting
        } else {
            CommandStatus::Complete
        }
    }

    /// Close the current turn: cooldowns tick, living characters regain mana, the dead
    /// move toward respawning, and the turn counter advances.
    ///
    /// # Errors
    /// - if a character due to respawn cannot be moved back home
    pub fn next_turn(&mut self, view: &mut View) -> Result<()> {
        let default_respawn = self.rules.respawn_turns;
        let mut revived = Vec::new();
        for character in self.roster.iter_mut() {
            for skill in &mut character.skills {
                skill.tick_cooldown();
            }
            if character.is_alive() {
                character.mana.fill(character.mana_regen);
                continue;
            }
            match character.respawn_in {
                Some(left) if left <= 1 => revived.push(character.id),
                Some(left) => character.respawn_in = Some(left - 1),
                None => {
                    warn!("{} ({}) is dead without a respawn timer", character.name, character.id);
                    character.respawn_in = Some(character.respawn_turns.unwrap_or(default_respawn));
                },
            }
        }
        for id in revived {
            self.respawn(id, view)?;
        }
        self.turn += 1;
        info!("============ BEGIN TURN {} ============", self.turn);
        Ok(())
    }

    fn respawn(&mut self, id: CharacterId, view: &mut View) -> Result<()> {
        let (home, home_row) = {
            let character = self.character_mut(id)?;
            character.revive();
            (character.home, character.home_row)
        };
        self.move_character(id, home)?;
        let is_player = id == self.player;
        let character = self.character_mut(id)?;
        character.row = home_row;
        info!("{} ({id}) respawned at {home}", character.name);
        view.push(ViewItem::Respawned {
            name: character.name.clone(),
            is_player,
        });
        Ok(())
    }

    /// Start a new match with the player playing `class` (id or name, any case).
    ///
    /// # Errors
    /// - if no class matches; the session is left untouched in that case
    pub fn restart(&mut self, class: &str) -> Result<()> {
        let Some(class_id) = self.find_class(class).map(|def| def.id.clone()) else {
            bail!("unknown class '{class}'");
        };
        self.populate(&class_id)?;
        self.turn = 1;
        self.pending = None;
        info!("session restarted, player class '{class_id}'");
        Ok(())
    }

    /// Spawn the player and every defined character, replacing the current roster.
    fn populate(&mut self, player_class: &str) -> Result<()> {
        let game = &self.game;
        let start = self
            .map
            .lookup(&game.start_node)
            .with_context(|| format!("start node '{}' not found", game.start_node))?;

        let mut roster = Roster::default();
        let mut placements = Vec::new();
        let class = Self::class_in(game, player_class)
            .with_context(|| format!("player class '{player_class}' not found"))?;
        let player = roster.push(Character::from_class(
            roster.next_id(),
            PLAYER_SYMBOL,
            &game.player.name,
            class,
            game.player.team,
            start,
            game.player.row,
        ));
        placements.push((player, start));

        for def in &game.characters {
            let class = Self::class_in(game, &def.class)
                .with_context(|| format!("character '{}' has unknown class '{}'", def.id, def.class))?;
            let node = self
                .map
                .lookup(&def.node)
                .with_context(|| format!("character '{}' placed in unknown node '{}'", def.id, def.node))?;
            let mut character = Character::from_class(roster.next_id(), &def.id, &def.name, class, def.team, node, def.row);
            character.level = def.level;
            placements.push((roster.push(character), node));
        }

        self.map.clear_occupants();
        for (id, node) in placements {
            self.map.enter(id, node)?;
        }
        info!("spawned {} characters", roster.len());
        self.roster = roster;
        self.player = player;
        Ok(())
    }

    fn class_in<'a>(game: &'a GameDef, input: &str) -> Option<&'a ClassDef> {
        game.classes
            .iter()
            .find(|class| class.id.eq_ignore_ascii_case(input) || class.name.eq_ignore_ascii_case(input))
    }

    /// Look up a class by id or display name, ignoring case.
    pub fn find_class(&self, input: &str) -> Option<&ClassDef> {
        Self::class_in(&self.game, input)
    }

    /// Class ids, sorted, as offered by the restart prompt.
    pub fn class_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.game.classes.iter().map(|class| class.id.clone()).collect();
        names.sort();
        names
    }

    /// Game-mechanics topics, in definition order.
    pub fn infos(&self) -> &[InfoDef] {
        &self.game.infos
    }

    /// Find a topic by name, ignoring case.
    pub fn info(&self, topic: &str) -> Option<&InfoDef> {
        self.game.infos.iter().find(|info| info.topic.eq_ignore_ascii_case(topic))
    }

    pub fn spin_spinner(&self, spin_type: SpinnerType, default: &'static str) -> String {
        self.spinners
            .get(&spin_type)
            .and_then(gametools::Spinner::spin)
            .unwrap_or(default.to_string())
    }

    /// # Errors
    /// - if the player handle is not in the roster
    pub fn player(&self) -> Result<&Character> {
        self.character(self.player)
    }

    /// # Errors
    /// - if the player handle is not in the roster
    pub fn player_mut(&mut self) -> Result<&mut Character> {
        self.character_mut(self.player)
    }

    pub fn player_alive(&self) -> bool {
        self.roster.get(self.player).is_some_and(Character::is_alive)
    }

    /// # Errors
    /// - if `id` is not in the roster
    pub fn character(&self, id: CharacterId) -> Result<&Character> {
        self.roster
            .get(id)
            .with_context(|| format!("character {id} not found in roster"))
    }

    /// # Errors
    /// - if `id` is not in the roster
    pub fn character_mut(&mut self, id: CharacterId) -> Result<&mut Character> {
        self.roster
            .get_mut(id)
            .with_context(|| format!("character {id} not found in roster"))
    }

    /// Snapshot the occupants of `node`, partitioned by team and row.
    ///
    /// # Errors
    /// - if `node` is not in the map
    pub fn groups_at(&self, node: NodeId) -> Result<CharacterGroups> {
        let occupants = &self.map.node(node)?.characters;
        Ok(CharacterGroups::build_with(occupants, &self.roster, self.rules.metric()))
    }

    /// Move a character to another node. It enters at the end of the occupant order.
    ///
    /// # Errors
    /// - if the character or either node is unknown
    pub fn move_character(&mut self, id: CharacterId, to: NodeId) -> Result<()> {
        let from = self.character(id)?.node;
        if from != to {
            self.map.leave(id, from)?;
            self.map.enter(id, to)?;
        }
        self.character_mut(id)?.node = to;
        Ok(())
    }

    /// Apply one skill effect (or a basic attack, as `Damage`) to a character.
    ///
    /// # Errors
    /// - if `target` is not in the roster
    pub fn apply_effect(&mut self, target: CharacterId, effect: SkillEffect, view: &mut View) -> Result<()> {
        match effect {
            SkillEffect::Damage(amount) => self.apply_damage(target, amount, view),
            SkillEffect::Heal(amount) => {
                let character = self.character_mut(target)?;
                let gained = character.heal(amount);
                info!("{} ({target}) healed for {gained}", character.name);
                view.push(ViewItem::CharacterHealed {
                    name: character.name.clone(),
                    amount: gained,
                });
                Ok(())
            },
        }
    }

    fn apply_damage(&mut self, target: CharacterId, amount: u32, view: &mut View) -> Result<()> {
        let default_respawn = self.rules.respawn_turns;
        let is_player = target == self.player;
        let character = self.character_mut(target)?;
        let was_alive = character.is_alive();
        let lost = character.take_damage(amount);
        info!("{} ({target}) took {lost} damage", character.name);
        view.push(ViewItem::CharacterHarmed {
            name: character.name.clone(),
            amount: lost,
        });
        if was_alive && !character.is_alive() {
            let wait = character.respawn_turns.unwrap_or(default_respawn);
            character.respawn_in = Some(wait);
            info!("{} ({target}) died, respawning in {wait} turn(s)", character.name);
            view.push(ViewItem::CharacterDeath {
                name: character.name.clone(),
                is_player,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use moba_data::{
        CharacterDef, EffectDef, NodeDef, PathDef, PlayerDef, Row, SkillDef, TargetMode, TargetTeam, Team,
    };

    fn class(id: &str, respawn_turns: Option<u32>) -> ClassDef {
        ClassDef {
            id: id.into(),
            name: id.to_uppercase(),
            max_hp: 30,
            max_mana: 10,
            range: 1,
            attack: 5,
            mana_regen: 2,
            respawn_turns,
            skills: vec![SkillDef {
                id: "zap".into(),
                name: String::new(),
                mana_cost: 4,
                cooldown: 2,
                target: TargetMode::Single,
                target_team: TargetTeam::Enemy,
                range: 2,
                effect: EffectDef::Damage(3),
            }],
        }
    }

    fn game() -> GameDef {
        GameDef {
            title: "Test".into(),
            intro: String::new(),
            start_node: "base".into(),
            player: PlayerDef {
                name: "Hero".into(),
                team: Team::Blue,
                class: "warrior".into(),
                row: Row::Front,
            },
            nodes: vec![
                NodeDef {
                    id: "base".into(),
                    name: "Blue base".into(),
                    desc: String::new(),
                    paths: vec![PathDef {
                        to: "lane".into(),
                        directions: vec!["north".into()],
                    }],
                },
                NodeDef {
                    id: "lane".into(),
                    name: "Lane".into(),
                    desc: String::new(),
                    paths: vec![PathDef {
                        to: "base".into(),
                        directions: vec!["south".into()],
                    }],
                },
            ],
            classes: vec![class("warrior", None), class("mage", Some(1))],
            characters: vec![CharacterDef {
                id: "minion".into(),
                name: "Red minion".into(),
                class: "mage".into(),
                team: Team::Red,
                node: "lane".into(),
                row: Row::Front,
                level: 2,
            }],
            infos: vec![InfoDef {
                topic: "rows".into(),
                text: "Front and back.".into(),
            }],
        }
    }

    fn session() -> Session {
        Session::new(game(), GameRules::default()).unwrap()
    }

    #[test]
    fn new_session_places_everyone() {
        let s = session();
        assert_eq!(s.turn, 1);
        assert_eq!(s.roster.len(), 2);
        let player = s.player().unwrap();
        assert_eq!(player.symbol, PLAYER_SYMBOL);
        let base = s.map.lookup("base").unwrap();
        assert_eq!(s.map.node(base).unwrap().characters, vec![s.player]);
        let minion = s.character(CharacterId(1)).unwrap();
        assert_eq!(minion.level, 2);
    }

    #[test]
    fn moving_appends_to_destination() {
        let mut s = session();
        let lane = s.map.lookup("lane").unwrap();
        s.move_character(s.player, lane).unwrap();
        assert_eq!(s.map.node(lane).unwrap().characters, vec![CharacterId(1), s.player]);
        assert_eq!(s.player().unwrap().node, lane);
    }

    #[test]
    fn next_turn_ticks_cooldowns_and_regenerates() {
        let mut s = session();
        let mut view = View::new();
        {
            let player = s.player_mut().unwrap();
            player.mana.drain(6);
            player.skills[0].start_cooldown();
        }
        s.next_turn(&mut view).unwrap();
        let player = s.player().unwrap();
        assert_eq!(s.turn, 2);
        assert_eq!(player.mana.current(), 6);
        assert_eq!(player.skills[0].cooldown_left, 1);
    }

    #[test]
    fn dead_characters_respawn_at_home() {
        let mut s = session();
        let mut view = View::new();
        let minion = CharacterId(1);
        let base = s.map.lookup("base").unwrap();
        s.move_character(minion, base).unwrap();
        s.character_mut(minion).unwrap().row = Row::Back;
        s.apply_effect(minion, SkillEffect::Damage(100), &mut view).unwrap();
        assert!(view.has(ViewItem::is_character_death));
        assert_eq!(s.character(minion).unwrap().respawn_in, Some(1));

        s.next_turn(&mut view).unwrap();
        let revived = s.character(minion).unwrap();
        assert!(revived.is_alive());
        assert_eq!(revived.hp.current(), revived.hp.max());
        assert_eq!(revived.node, s.map.lookup("lane").unwrap());
        assert_eq!(revived.row, Row::Front);
        assert!(view.has(ViewItem::is_respawned));
        assert!(!s.map.node(base).unwrap().characters.contains(&minion));
    }

    #[test]
    fn rules_respawn_delay_applies_without_class_override() {
        let mut s = session();
        let mut view = View::new();
        let player = s.player;
        s.apply_effect(player, SkillEffect::Damage(100), &mut view).unwrap();
        for _ in 0..2 {
            s.next_turn(&mut view).unwrap();
            assert!(!s.player_alive());
        }
        s.next_turn(&mut view).unwrap();
        assert!(s.player_alive());
    }

    #[test]
    fn restart_rejects_unknown_class_without_touching_state() {
        let mut s = session();
        let mut view = View::new();
        s.next_turn(&mut view).unwrap();
        assert!(s.restart("bard").is_err());
        assert_eq!(s.turn, 2);
        assert_eq!(s.player().unwrap().class, "warrior");
    }

    #[test]
    fn restart_is_case_insensitive_and_resets_the_turn() {
        let mut s = session();
        let mut view = View::new();
        s.next_turn(&mut view).unwrap();
        s.restart("MAGE").unwrap();
        assert_eq!(s.turn, 1);
        assert_eq!(s.player().unwrap().class, "mage");
        assert_eq!(s.roster.len(), 2);
        assert_eq!(s.class_names(), vec!["mage".to_string(), "warrior".to_string()]);
    }

    #[test]
    fn info_topics_match_ignoring_case() {
        let s = session();
        assert!(s.info("ROWS").is_some());
        assert!(s.info("lanes").is_none());
    }
}
