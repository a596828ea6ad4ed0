use serde::{Deserialize, Serialize};

/// Stable identifier used across `GameDef` references.
pub type Id = String;

/// Top-level game data loaded by the engine.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GameDef {
    pub title: String,
    #[serde(default)]
    pub intro: String,
    pub start_node: Id,
    pub player: PlayerDef,
    #[serde(default)]
    pub nodes: Vec<NodeDef>,
    #[serde(default)]
    pub classes: Vec<ClassDef>,
    #[serde(default)]
    pub characters: Vec<CharacterDef>,
    #[serde(default)]
    pub infos: Vec<InfoDef>,
}

/// The player character as configured at game start.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerDef {
    pub name: String,
    #[serde(default = "default_player_team")]
    pub team: Team,
    pub class: Id,
    #[serde(default)]
    pub row: Row,
}

impl Default for PlayerDef {
    fn default() -> Self {
        Self {
            name: String::new(),
            team: default_player_team(),
            class: String::new(),
            row: Row::default(),
        }
    }
}

fn default_player_team() -> Team {
    Team::Blue
}

/// A location on the map.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeDef {
    pub id: Id,
    pub name: String,
    #[serde(default)]
    pub desc: String,
    #[serde(default)]
    pub paths: Vec<PathDef>,
}

/// A directed path to another node, reachable by any of its direction labels.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathDef {
    pub to: Id,
    pub directions: Vec<String>,
}

/// Stat block shared by every character of a class.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassDef {
    pub id: Id,
    pub name: String,
    pub max_hp: u32,
    #[serde(default)]
    pub max_mana: u32,
    pub range: u32,
    pub attack: u32,
    #[serde(default)]
    pub mana_regen: u32,
    /// Overrides the rule-wide respawn delay for this class.
    #[serde(default)]
    pub respawn_turns: Option<u32>,
    #[serde(default)]
    pub skills: Vec<SkillDef>,
}

/// A skill granted to every character of a class.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillDef {
    pub id: Id,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub mana_cost: u32,
    #[serde(default)]
    pub cooldown: u32,
    pub target: TargetMode,
    #[serde(default)]
    pub target_team: TargetTeam,
    pub range: u32,
    pub effect: EffectDef,
}

/// What happens to each resolved target of a skill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectDef {
    Damage(u32),
    Heal(u32),
}

/// A non-player combatant placed on the map at game start.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharacterDef {
    pub id: Id,
    pub name: String,
    pub class: Id,
    pub team: Team,
    pub node: Id,
    #[serde(default)]
    pub row: Row,
    #[serde(default)]
    pub level: u32,
}

/// A help topic about game mechanics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InfoDef {
    pub topic: String,
    pub text: String,
}

/// Side a character fights for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Team {
    Blue,
    Red,
    Neutral,
}

/// Squad row a character stands in at its node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Row {
    #[default]
    Front,
    Back,
}

impl Row {
    /// Parse a `front`/`back` token, ignoring case.
    pub fn from_token(token: &str) -> Option<Row> {
        match token.to_lowercase().as_str() {
            "front" => Some(Row::Front),
            "back" => Some(Row::Back),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Row::Front => "front",
            Row::Back => "back",
        }
    }
}

/// How a skill picks its targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetMode {
    /// One character chosen by index.
    Single,
    /// Every character in a chosen row.
    AnyRow,
    /// Every character of the target team.
    All,
}

/// Which side a skill affects, relative to its caster.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetTeam {
    Ally,
    #[default]
    Enemy,
}
