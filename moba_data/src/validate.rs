use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::*;

/// Validation error for malformed or missing references in a `GameDef`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    DuplicateId { kind: &'static str, id: String },
    MissingReference { kind: &'static str, id: String, context: String },
    InvalidValue { context: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::DuplicateId { kind, id } => {
                write!(f, "duplicate {kind} id '{id}'")
            },
            ValidationError::MissingReference { kind, id, context } => {
                write!(f, "missing {kind} '{id}' ({context})")
            },
            ValidationError::InvalidValue { context } => {
                write!(f, "invalid value ({context})")
            },
        }
    }
}

impl std::error::Error for ValidationError {}

/// Validate cross-references and basic invariants in a `GameDef`.
///
/// ```
/// use moba_data::{ClassDef, GameDef, NodeDef, PlayerDef, Row, Team, validate_game};
///
/// let game = GameDef {
///     title: "Demo".into(),
///     start_node: "base".into(),
///     player: PlayerDef {
///         name: "Hero".into(),
///         team: Team::Blue,
///         class: "warrior".into(),
///         row: Row::Front,
///     },
///     nodes: vec![NodeDef {
///         id: "base".into(),
///         name: "Base".into(),
///         desc: String::new(),
///         paths: Vec::new(),
///     }],
///     classes: vec![ClassDef {
///         id: "warrior".into(),
///         name: "Warrior".into(),
///         max_hp: 10,
///         max_mana: 0,
///         range: 1,
///         attack: 2,
///         mana_regen: 0,
///         respawn_turns: None,
///         skills: Vec::new(),
///     }],
///     ..GameDef::default()
/// };
/// assert!(validate_game(&game).is_empty());
/// ```
pub fn validate_game(game: &GameDef) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    let mut nodes = HashSet::new();
    let mut classes = HashSet::new();
    let mut characters = HashSet::new();
    let mut topics = HashSet::new();

    track_ids("node", game.nodes.iter().map(|n| n.id.as_str()), &mut nodes, &mut errors);
    track_ids(
        "class",
        game.classes.iter().map(|c| c.id.as_str()),
        &mut classes,
        &mut errors,
    );
    track_ids(
        "character",
        game.characters.iter().map(|c| c.id.as_str()),
        &mut characters,
        &mut errors,
    );
    track_ids(
        "info topic",
        game.infos.iter().map(|i| i.topic.as_str()),
        &mut topics,
        &mut errors,
    );

    if game.start_node.trim().is_empty() {
        errors.push(ValidationError::InvalidValue {
            context: "game start node missing".to_string(),
        });
    } else {
        check_ref("node", &game.start_node, &nodes, "game start node".to_string(), &mut errors);
    }
    check_ref(
        "class",
        &game.player.class,
        &classes,
        "player starting class".to_string(),
        &mut errors,
    );

    for node in &game.nodes {
        let mut labels: HashMap<String, &str> = HashMap::new();
        for path in &node.paths {
            for label in path.directions.iter().map(|d| d.trim().to_lowercase()) {
                if label.is_empty() {
                    continue;
                }
                match labels.get(label.as_str()) {
                    Some(to) if *to != path.to => errors.push(ValidationError::InvalidValue {
                        context: format!(
                            "direction '{label}' from node '{}' leads to both '{to}' and '{}'",
                            node.id, path.to
                        ),
                    }),
                    Some(_) => {},
                    None => {
                        labels.insert(label, &path.to);
                    },
                }
            }
            check_ref(
                "node",
                &path.to,
                &nodes,
                format!("path from node '{}'", node.id),
                &mut errors,
            );
            if path.directions.iter().all(|d| d.trim().is_empty()) {
                errors.push(ValidationError::InvalidValue {
                    context: format!("path '{}' -> '{}' has no direction labels", node.id, path.to),
                });
            }
        }
    }

    for class in &game.classes {
        if class.max_hp == 0 {
            errors.push(ValidationError::InvalidValue {
                context: format!("class '{}' has zero max_hp", class.id),
            });
        }
        let mut skill_ids = HashSet::new();
        track_ids(
            "skill",
            class.skills.iter().map(|s| s.id.as_str()),
            &mut skill_ids,
            &mut errors,
        );
    }

    for character in &game.characters {
        check_ref(
            "class",
            &character.class,
            &classes,
            format!("character '{}'", character.id),
            &mut errors,
        );
        check_ref(
            "node",
            &character.node,
            &nodes,
            format!("character '{}'", character.id),
            &mut errors,
        );
    }

    errors
}

fn track_ids<'a>(
    kind: &'static str,
    ids: impl Iterator<Item = &'a str>,
    seen: &mut HashSet<String>,
    errors: &mut Vec<ValidationError>,
) {
    for id in ids {
        if !seen.insert(id.to_string()) {
            errors.push(ValidationError::DuplicateId {
                kind,
                id: id.to_string(),
            });
        }
    }
}

fn check_ref(
    kind: &'static str,
    id: &str,
    known: &HashSet<String>,
    context: String,
    errors: &mut Vec<ValidationError>,
) {
    if !known.contains(id) {
        errors.push(ValidationError::MissingReference {
            kind,
            id: id.to_string(),
            context,
        });
    }
}
