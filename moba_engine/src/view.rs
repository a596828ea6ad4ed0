//! View module.
//! This contains the view to the game world / messages.
//! Rather than printing to the console from each handler, we aggregate needed information and messages
//! to be organized and displayed once the input line has been fully processed.
use colored::Colorize;
use moba_data::{Row, Team};
use textwrap::{fill, termwidth};
use variantly::Variantly;

use crate::command::Refusal;
use crate::style::{GameStyle, indented_block, normal_block};

const ICON_FAILURE: &str = "\u{274C}"; // ✖
const ICON_ERROR: &str = "⚠︎"; // U+26A0 U+FE0E
const ICON_USAGE: &str = "?";
const ICON_ENGINE: &str = "⚙";
const ICON_HARMED: &str = "\u{2694}"; // crossed swords
const ICON_HEALED: &str = "\u{2624}"; // caduceus
const ICON_DEATH: &str = "☠";
const ICON_RESPAWN: &str = "\u{21BA}"; // ↺

/// View aggregates information to be displayed for each processed input line and then organizes
/// and displays the result.
#[derive(Debug, Clone)]
pub struct View {
    pub width: usize,
    pub items: Vec<ViewEntry>,
    pub sequence: usize,
}
impl Default for View {
    fn default() -> Self {
        Self::new()
    }
}

impl View {
    pub fn new() -> Self {
        Self {
            width: termwidth(),
            items: Vec::new(),
            sequence: 0,
        }
    }

    pub fn push(&mut self, item: ViewItem) {
        self.items.push(ViewEntry {
            section: item.section(),
            view_item: item,
            sequence: self.sequence,
        });
        self.sequence += 1;
    }

    /// Iterate over the buffered items in push order.
    pub fn view_items(&self) -> impl Iterator<Item = &ViewItem> {
        self.items.iter().map(|entry| &entry.view_item)
    }

    /// True if any buffered item satisfies `pred`.
    pub fn has(&self, pred: impl Fn(&ViewItem) -> bool) -> bool {
        self.view_items().any(pred)
    }

    /// Clears the buffer without displaying it.
    pub fn reset(&mut self) {
        self.items.clear();
    }

    /// Compose and display everything produced by the last input line.
    pub fn flush(&mut self) {
        self.width = termwidth();
        let sections = [
            (Section::Transition, None),
            (Section::Environment, Some("scene")),
            (Section::DirectResult, Some("results")),
            (Section::WorldResponse, Some("combat")),
            (Section::System, Some("game")),
        ];
        for (section, heading) in sections {
            let entries: Vec<&ViewEntry> = self.items.iter().filter(|e| e.section == section).collect();
            if entries.is_empty() {
                continue;
            }
            if let Some(heading) = heading {
                println!("{:.>width$}\n", heading.section_style(), width = self.width);
            }
            for entry in entries {
                render(&entry.view_item);
            }
            println!();
        }
        self.items.clear();
    }
}

fn render(item: &ViewItem) {
    match item {
        ViewItem::Travel(msg) => println!("{}\n", fill(msg, normal_block()).italic()),
        ViewItem::NodeDescription { name, description } => {
            println!("{}", name.node_titlebar_style());
            if !description.is_empty() {
                println!("{}", fill(description, normal_block()).description_style());
            }
        },
        ViewItem::Occupants(lines) => {
            println!("{}", "Here, there is".subheading_style());
            for line in lines {
                let name = if line.is_player {
                    format!("{} (you)", line.name)
                } else {
                    line.name.clone()
                };
                let status = if line.alive {
                    format!("lvl {}, {} / {}", line.level, line.hp, line.max_hp)
                } else {
                    "dead".to_string()
                };
                println!(
                    "  {}: [{}] {} ({}) dist: {}",
                    line.index,
                    line.row.as_str(),
                    name.team_style(line.team),
                    status,
                    line.distance
                );
            }
        },
        ViewItem::Directions(lines) => {
            println!("{}", "From here, you can go toward:".subheading_style());
            for line in lines {
                println!(
                    "  {}: toward {}",
                    line.labels.join(", ").direction_style(),
                    line.destination.node_style()
                );
            }
        },
        ViewItem::PlayerStatus {
            hp,
            max_hp,
            mana,
            max_mana,
            skills,
        } => {
            println!("HP {hp} / {max_hp}   Mana {mana} / {max_mana}");
            for skill in skills {
                let readiness = if skill.cooldown_left == 0 {
                    "ready".to_string()
                } else {
                    format!("{} turn(s)", skill.cooldown_left)
                };
                println!(
                    "  {} (cost {}, range {}, {})",
                    skill.name.skill_style(),
                    skill.mana_cost,
                    skill.range,
                    readiness
                );
            }
        },
        ViewItem::Help(lines) => {
            for line in lines {
                println!("{}", line.aliases.join(", ").bold());
                println!("{}", fill(&line.description, indented_block()));
            }
        },
        ViewItem::InfoTopics(topics) => {
            println!("Available topics (use \"info <topic>\"):");
            for topic in topics {
                println!("  {topic}");
            }
        },
        ViewItem::InfoText { topic, text } => {
            println!("{}", topic.subheading_style());
            println!("{}", fill(text, indented_block()));
        },
        ViewItem::UnknownTopic(topic) => {
            println!("{:<4}Unknown topic \"{}\".", ICON_FAILURE.bright_red(), topic.error_style());
        },
        ViewItem::UnknownCommand(msg) => println!("{:<4}{}", ICON_ERROR.error_style(), msg.italic()),
        ViewItem::Usage { problem, syntax } => {
            println!("{:<4}{}", ICON_USAGE.usage_style(), problem);
            if let Some(syntax) = syntax {
                println!("      {}", syntax.usage_style());
            }
        },
        ViewItem::Refused(refusal) => {
            println!(
                "{}",
                fill(
                    &format!("{} {}", ICON_FAILURE.bright_red(), refusal.to_string().denied_style()),
                    normal_block()
                )
            );
        },
        ViewItem::NoTargets => println!("{} {}", ICON_FAILURE.bright_red(), "No targets in range.".denied_style()),
        ViewItem::RowChanged(row) => println!("You move to the {} row.", row.as_str()),
        ViewItem::Waited => println!("You wait."),
        ViewItem::Attacked { target, damage } => {
            println!("You attack {target} for {damage} damage.");
        },
        ViewItem::SkillUsed { skill, targets } => {
            println!("You use {} on {}.", skill.skill_style(), targets.join(", "));
        },
        ViewItem::CharacterHarmed { name, amount } => {
            println!("{:<4}{} loses {} hp", ICON_HARMED.harm_style(), name, amount.to_string().harm_style());
        },
        ViewItem::CharacterHealed { name, amount } => {
            println!("{:<4}{} gains {} hp", ICON_HEALED.heal_style(), name, amount.to_string().heal_style());
        },
        ViewItem::CharacterDeath { name, is_player } => {
            if *is_player {
                println!("{:<4}{}", ICON_DEATH.error_style(), "You died.".error_style().bold());
            } else {
                println!("{:<4}{} dies.", ICON_DEATH.error_style(), name);
            }
        },
        ViewItem::Respawned { name, is_player } => {
            if *is_player {
                println!("{:<4}You respawn.", ICON_RESPAWN.heal_style());
            } else {
                println!("{:<4}{} respawns.", ICON_RESPAWN.heal_style(), name);
            }
        },
        ViewItem::ClassPrompt(classes) => println!("Choose your class: [ {} ]", classes.join(", ")),
        ViewItem::Restarted { class } => println!("New game started as {}.", class.bold()),
        ViewItem::EngineMessage(msg) => println!("{:<4}{}", ICON_ENGINE.dimmed(), msg.italic()),
    }
}

/// Subsections of the output.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Section {
    /// Movement flavour text.
    Transition,
    /// Node description, occupants, directions.
    Environment,
    /// Direct results of the player's command, including refusals.
    DirectResult,
    /// Consequences: damage, healing, deaths, respawns.
    WorldResponse,
    /// Meta/game-system feedback (help, restart, engine errors).
    System,
}

/// Wrapper for a `ViewItem` keeping its section and push order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewEntry {
    pub section: Section,
    pub view_item: ViewItem,
    pub sequence: usize,
}

/// One row of the `look` listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OccupantLine {
    pub index: usize,
    pub row: Row,
    pub name: String,
    pub team: Team,
    /// Level as displayed (one-based).
    pub level: u32,
    pub hp: u32,
    pub max_hp: u32,
    pub distance: u32,
    pub is_player: bool,
    pub alive: bool,
}

/// One outgoing path in the `directions` listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectionLine {
    pub labels: Vec<String>,
    pub destination: String,
}

/// One verb in the `help` listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelpLine {
    pub aliases: Vec<String>,
    pub description: String,
}

/// One of the player's skills in the status summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillLine {
    pub name: String,
    pub mana_cost: u32,
    pub range: u32,
    pub cooldown_left: u32,
}

/// Every kind of message the game can produce.
#[derive(Debug, Clone, PartialEq, Eq, Variantly)]
pub enum ViewItem {
    Attacked { target: String, damage: u32 },
    CharacterDeath { name: String, is_player: bool },
    CharacterHarmed { name: String, amount: u32 },
    CharacterHealed { name: String, amount: u32 },
    ClassPrompt(Vec<String>),
    Directions(Vec<DirectionLine>),
    EngineMessage(String),
    Help(Vec<HelpLine>),
    InfoText { topic: String, text: String },
    InfoTopics(Vec<String>),
    NoTargets,
    NodeDescription { name: String, description: String },
    Occupants(Vec<OccupantLine>),
    PlayerStatus {
        hp: u32,
        max_hp: u32,
        mana: u32,
        max_mana: u32,
        skills: Vec<SkillLine>,
    },
    Refused(Refusal),
    Respawned { name: String, is_player: bool },
    Restarted { class: String },
    RowChanged(Row),
    SkillUsed { skill: String, targets: Vec<String> },
    Travel(String),
    UnknownCommand(String),
    UnknownTopic(String),
    Usage { problem: String, syntax: Option<String> },
    Waited,
}
impl ViewItem {
    /// Get the section of the output this item is displayed in.
    pub fn section(&self) -> Section {
        match self {
            ViewItem::Travel(_) => Section::Transition,
            ViewItem::NodeDescription { .. }
            | ViewItem::Occupants(_)
            | ViewItem::Directions(_)
            | ViewItem::PlayerStatus { .. } => Section::Environment,
            ViewItem::InfoTopics(_)
            | ViewItem::InfoText { .. }
            | ViewItem::UnknownTopic(_)
            | ViewItem::UnknownCommand(_)
            | ViewItem::Usage { .. }
            | ViewItem::Refused(_)
            | ViewItem::NoTargets
            | ViewItem::RowChanged(_)
            | ViewItem::Waited
            | ViewItem::Attacked { .. }
            | ViewItem::SkillUsed { .. } => Section::DirectResult,
            ViewItem::CharacterHarmed { .. }
            | ViewItem::CharacterHealed { .. }
            | ViewItem::CharacterDeath { .. }
            | ViewItem::Respawned { .. } => Section::WorldResponse,
            ViewItem::Help(_) | ViewItem::ClassPrompt(_) | ViewItem::Restarted { .. } | ViewItem::EngineMessage(_) => {
                Section::System
            },
        }
    }

    /// The refusal carried by this item, if it is one.
    pub fn refusal(&self) -> Option<&Refusal> {
        match self {
            ViewItem::Refused(refusal) => Some(refusal),
            _ => None,
        }
    }
}
