//! Skills
//!
//! A `Skill` is a stat block bound to the character that owns it. Target resolution
//! works against a [`CharacterGroups`] snapshot of the caster's node: every resolved
//! target is alive, on the skill's target team, and within range of the caster.

use moba_data::{EffectDef, Row, SkillDef, TargetMode, TargetTeam};
use serde::{Deserialize, Serialize};

use crate::character::{Character, CharacterId, Roster};
use crate::groups::CharacterGroups;

/// What a skill does to each target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkillEffect {
    Damage(u32),
    Heal(u32),
}
impl From<EffectDef> for SkillEffect {
    fn from(def: EffectDef) -> Self {
        match def {
            EffectDef::Damage(amount) => SkillEffect::Damage(amount),
            EffectDef::Heal(amount) => SkillEffect::Heal(amount),
        }
    }
}

/// Target argument supplied by the player for a skill use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetSelector {
    /// `Single` skills: an already-looked-up character.
    Character(CharacterId),
    /// `AnyRow` skills: one row of the target team.
    Row(Row),
    /// `All` skills: no argument.
    Everyone,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Skill {
    pub symbol: String,
    pub name: String,
    pub mana_cost: u32,
    pub cooldown: u32,
    /// Turn boundaries left before the skill can be used again.
    pub cooldown_left: u32,
    pub target: TargetMode,
    pub target_team: TargetTeam,
    pub range: u32,
    pub effect: SkillEffect,
}
impl Skill {
    pub fn from_def(def: &SkillDef) -> Skill {
        Skill {
            symbol: def.id.clone(),
            name: if def.name.is_empty() {
                def.id.clone()
            } else {
                def.name.clone()
            },
            mana_cost: def.mana_cost,
            cooldown: def.cooldown,
            cooldown_left: 0,
            target: def.target,
            target_team: def.target_team,
            range: def.range,
            effect: def.effect.into(),
        }
    }

    /// True if the name typed by the player refers to this skill.
    pub fn matches(&self, input: &str) -> bool {
        self.symbol.eq_ignore_ascii_case(input) || self.name.eq_ignore_ascii_case(input)
    }

    /// Ready to be cast by `owner`: off cooldown and owner alive.
    pub fn usable(&self, owner: &Character) -> bool {
        self.cooldown_left == 0 && owner.is_alive()
    }

    pub fn start_cooldown(&mut self) {
        self.cooldown_left = self.cooldown;
    }

    pub fn tick_cooldown(&mut self) {
        self.cooldown_left = self.cooldown_left.saturating_sub(1);
    }

    /// True if `target` is on the side this skill affects, as seen from `owner`.
    pub fn accepts_team(&self, owner: &Character, target: &Character) -> bool {
        match self.target_team {
            TargetTeam::Ally => target.team == owner.team,
            TargetTeam::Enemy => target.team != owner.team,
        }
    }

    /// True if `target` could be hit by this skill cast by `owner` right now.
    pub fn can_reach(&self, owner: &Character, target: &Character, groups: &CharacterGroups) -> bool {
        target.is_alive()
            && self.accepts_team(owner, target)
            && groups.distance_between(owner, target) <= self.range
    }

    /// Resolve the characters affected by a cast.
    ///
    /// An empty result means nothing is in reach; for `Single` this covers both an
    /// out-of-range candidate and one that is otherwise invalid. A selector that does
    /// not fit the skill's target mode also resolves to nothing.
    pub fn targets(
        &self,
        owner: &Character,
        selector: TargetSelector,
        groups: &CharacterGroups,
        roster: &Roster,
    ) -> Vec<CharacterId> {
        let reachable = |id: &CharacterId| {
            roster
                .get(*id)
                .is_some_and(|target| self.can_reach(owner, target, groups))
        };
        match (self.target, selector) {
            (TargetMode::Single, TargetSelector::Character(id)) => {
                if groups.contains(id) && reachable(&id) {
                    vec![id]
                } else {
                    Vec::new()
                }
            },
            (TargetMode::AnyRow, TargetSelector::Row(row)) => {
                groups.members_in_row(row).filter(|id| reachable(id)).collect()
            },
            (TargetMode::All, TargetSelector::Everyone) => groups.members().filter(|id| reachable(id)).collect(),
            _ => Vec::new(),
        }
    }
}
