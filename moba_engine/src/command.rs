//! Command module
//!
//! Describes the verbs a player can type, the alias registry that maps typed words to
//! verbs, and the outcomes a command can report back to the dispatcher.
use std::collections::HashMap;

use moba_data::Row;
use thiserror::Error;
use variantly::Variantly;

/// Every verb understood by the game. Each verb is registered once; all of its aliases
/// resolve to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Variantly)]
pub enum Verb {
    Help,
    Info,
    Look,
    Directions,
    Wait,
    Go,
    Move,
    Attack,
    Use,
    Restart,
}
impl Verb {
    /// All verbs, in the order `help` lists them.
    pub const ALL: [Verb; 10] = [
        Verb::Help,
        Verb::Info,
        Verb::Look,
        Verb::Directions,
        Verb::Wait,
        Verb::Go,
        Verb::Move,
        Verb::Attack,
        Verb::Use,
        Verb::Restart,
    ];

    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            Verb::Help => &["help", "h", "?"],
            Verb::Info => &["info", "i"],
            Verb::Look => &["look", "l"],
            Verb::Directions => &["directions", "dir", "d"],
            Verb::Wait => &["wait", "w"],
            Verb::Go => &["go", "g"],
            Verb::Move => &["move", "m"],
            Verb::Attack => &["attack", "a"],
            Verb::Use => &["use", "u"],
            Verb::Restart => &["restart"],
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Verb::Help => "Prints this help message.",
            Verb::Info => "Information about game mechanics. Without a topic, lists the available topics.",
            Verb::Look => "Look around you: describe the place and who is here, with the number of each character.",
            Verb::Directions => "List the destinations you can reach from here.",
            Verb::Wait => "Do nothing until next turn.",
            Verb::Go => "Walk in a given direction. Type \"directions\" to see where you can go. Example: go red",
            Verb::Move => "Take \"front\" or \"back\" in parameter. Move your character to the front/back row.",
            Verb::Attack => "Attack the character number n, where n is the number you see when you type \"look\".",
            Verb::Use => {
                "Use a skill. Some skills need a <character-number> or a row (front or back) in parameter. \
                 Example: use bomb front"
            },
            Verb::Restart => "Restart the game, optionally with the name of a class.",
        }
    }

    /// Whether the acting player must be alive to issue this verb.
    /// `wait` is how a dead player waits out the respawn timer.
    pub fn requires_alive(self) -> bool {
        !matches!(self, Verb::Help | Verb::Info | Verb::Wait | Verb::Restart)
    }
}

/// Maps every typed alias to its verb. Alias matching is case-sensitive.
#[derive(Debug, Clone)]
pub struct CommandRegistry {
    verbs: Vec<Verb>,
    aliases: HashMap<&'static str, Verb>,
}
impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}
impl CommandRegistry {
    /// Registry with every verb of the game.
    pub fn new() -> CommandRegistry {
        let mut registry = CommandRegistry {
            verbs: Vec::new(),
            aliases: HashMap::new(),
        };
        for verb in Verb::ALL {
            registry.register(verb);
        }
        registry
    }

    fn register(&mut self, verb: Verb) {
        self.verbs.push(verb);
        for alias in verb.aliases() {
            self.aliases.insert(*alias, verb);
        }
    }

    pub fn lookup(&self, alias: &str) -> Option<Verb> {
        self.aliases.get(alias).copied()
    }

    /// Registered verbs in registration order.
    pub fn verbs(&self) -> &[Verb] {
        &self.verbs
    }
}

/// Whether a command is done or wants the next raw input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandStatus {
    /// The next line is parsed as a new command.
    Complete,
    /// The next line is handed, untokenized by the registry, to the pending command.
    Awaiting,
}

/// A multi-line dialog waiting for its continuation line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pending {
    /// `restart` asked which class to play.
    RestartClass,
}

/// Why a well-formed command was refused by the game rules.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Refusal {
    #[error("You are dead... Please use the command \"wait\" until you respawn.")]
    PlayerDead,
    #[error("Unknown direction \"{0}\".")]
    UnknownDirection(String),
    #[error("You already are at the {} row.", .0.as_str())]
    AlreadyInRow(Row),
    #[error("Invalid target.")]
    InvalidTarget,
    #[error("You cannot attack allies.")]
    CannotAttackAllies,
    #[error("Target out of range.")]
    OutOfRange,
    #[error("You don't have a skill called \"{0}\".")]
    UnknownSkill(String),
    #[error("You can't use this skill right now.")]
    SkillUnavailable,
    #[error("Not enough mana ({have} / {need}).")]
    InsufficientMana { need: u32, have: u32 },
    #[error("Target is in the wrong team.")]
    WrongTeam,
    #[error("Unknown class name \"{0}\".")]
    UnknownClass(String),
}

/// Parse a character number as shown by `look`.
pub fn parse_index(token: &str) -> Option<usize> {
    token.parse::<usize>().ok()
}
