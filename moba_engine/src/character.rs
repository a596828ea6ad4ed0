//! Character -- combatants on the map.
//!
//! The player and every other combatant (towers, minions, creeps) are `Character`s.
//! They live in the session's [`Roster`] arena and are addressed by [`CharacterId`].
use std::fmt;

use moba_data::{ClassDef, Row, Team};
use serde::{Deserialize, Serialize};

use crate::health::{LifeState, Pool};
use crate::map::NodeId;
use crate::skill::Skill;

/// Handle to a character in the [`Roster`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CharacterId(pub usize);

impl fmt::Display for CharacterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "char#{}", self.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Character {
    pub id: CharacterId,
    pub symbol: String,
    pub name: String,
    pub class: String,
    pub team: Team,
    /// Zero-based; shown to players as `level + 1`.
    pub level: u32,
    pub hp: Pool,
    pub mana: Pool,
    pub mana_regen: u32,
    pub range: u32,
    pub attack_power: u32,
    pub node: NodeId,
    pub row: Row,
    /// Where (and in which row) the character comes back after dying.
    pub home: NodeId,
    pub home_row: Row,
    /// Turn boundaries left before a dead character respawns.
    pub respawn_in: Option<u32>,
    pub respawn_turns: Option<u32>,
    pub skills: Vec<Skill>,
}
impl Character {
    /// Create a fresh, full-health character of the given class.
    pub fn from_class(
        id: CharacterId,
        symbol: &str,
        name: &str,
        class: &ClassDef,
        team: Team,
        node: NodeId,
        row: Row,
    ) -> Character {
        Character {
            id,
            symbol: symbol.to_string(),
            name: name.to_string(),
            class: class.id.clone(),
            team,
            level: 0,
            hp: Pool::new_at_max(class.max_hp),
            mana: Pool::new_at_max(class.max_mana),
            mana_regen: class.mana_regen,
            range: class.range,
            attack_power: class.attack,
            node,
            row,
            home: node,
            home_row: row,
            respawn_in: None,
            respawn_turns: class.respawn_turns,
            skills: class.skills.iter().map(Skill::from_def).collect(),
        }
    }

    pub fn is_alive(&self) -> bool {
        self.hp.current() > 0
    }

    pub fn life_state(&self) -> LifeState {
        if self.is_alive() {
            LifeState::Alive
        } else {
            LifeState::Dead
        }
    }

    /// Apply damage; returns the hit points actually lost.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        self.hp.drain(amount)
    }

    /// Restore hit points; returns the hit points actually gained. The dead are not healed.
    pub fn heal(&mut self, amount: u32) -> u32 {
        if self.is_alive() { self.hp.fill(amount) } else { 0 }
    }

    /// Find a skill by symbol or display name, ignoring case.
    pub fn skill(&self, input: &str) -> Option<usize> {
        self.skills.iter().position(|s| s.matches(input))
    }

    /// Restore to full health and mana with every skill ready.
    pub fn revive(&mut self) {
        self.hp.refill();
        self.mana.refill();
        self.respawn_in = None;
        for skill in &mut self.skills {
            skill.cooldown_left = 0;
        }
    }

    pub fn team_name(&self) -> &'static str {
        match self.team {
            Team::Blue => "blue",
            Team::Red => "red",
            Team::Neutral => "neutral",
        }
    }
}

/// Arena of every character in the session, indexed by [`CharacterId`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Roster {
    characters: Vec<Character>,
}
impl Roster {
    /// Add a character, assigning it the next handle.
    pub fn push(&mut self, mut character: Character) -> CharacterId {
        let id = CharacterId(self.characters.len());
        character.id = id;
        self.characters.push(character);
        id
    }

    pub fn next_id(&self) -> CharacterId {
        CharacterId(self.characters.len())
    }

    pub fn get(&self, id: CharacterId) -> Option<&Character> {
        self.characters.get(id.0)
    }

    pub fn get_mut(&mut self, id: CharacterId) -> Option<&mut Character> {
        self.characters.get_mut(id.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Character> {
        self.characters.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Character> {
        self.characters.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.characters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn test_class() -> ClassDef {
        ClassDef {
            id: "fighter".into(),
            name: "Fighter".into(),
            max_hp: 20,
            max_mana: 10,
            range: 1,
            attack: 4,
            mana_regen: 0,
            respawn_turns: None,
            skills: Vec::new(),
        }
    }

    pub(crate) fn fighter(name: &str, team: Team, row: Row) -> Character {
        Character::from_class(CharacterId(0), name, name, &test_class(), team, NodeId(0), row)
    }

    #[test]
    fn hp_stays_within_bounds() {
        let mut c = fighter("a", Team::Blue, Row::Front);
        assert_eq!(c.take_damage(5), 5);
        assert_eq!(c.heal(100), 5);
        assert_eq!(c.hp.current(), c.hp.max());
        assert_eq!(c.take_damage(1000), 20);
        assert_eq!(c.hp.current(), 0);
    }

    #[test]
    fn alive_iff_hp_positive() {
        let mut c = fighter("a", Team::Red, Row::Back);
        assert!(c.is_alive());
        assert_eq!(c.life_state(), LifeState::Alive);
        c.take_damage(19);
        assert!(c.is_alive());
        c.take_damage(1);
        assert!(!c.is_alive());
        assert_eq!(c.life_state(), LifeState::Dead);
    }

    #[test]
    fn dead_characters_are_not_healed() {
        let mut c = fighter("a", Team::Red, Row::Back);
        c.take_damage(20);
        assert_eq!(c.heal(5), 0);
        assert!(!c.is_alive());
    }

    #[test]
    fn revive_restores_everything() {
        let mut c = fighter("a", Team::Blue, Row::Front);
        c.take_damage(20);
        c.mana.drain(7);
        c.respawn_in = Some(0);
        c.revive();
        assert!(c.is_alive());
        assert_eq!(c.mana.current(), 10);
        assert!(c.respawn_in.is_none());
    }

    #[test]
    fn roster_assigns_sequential_ids() {
        let mut roster = Roster::default();
        let a = roster.push(fighter("a", Team::Blue, Row::Front));
        let b = roster.push(fighter("b", Team::Red, Row::Front));
        assert_eq!(a, CharacterId(0));
        assert_eq!(b, CharacterId(1));
        assert_eq!(roster.get(b).unwrap().id, b);
        assert_eq!(roster.next_id(), CharacterId(2));
    }
}
