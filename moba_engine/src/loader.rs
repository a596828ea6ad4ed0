//! Loader utilities for building a `Session` from serialized data.
//!
//! The map, classes and characters come from a RON `GameDef`; rule constants stay
//! TOML-backed.

pub mod rules;

use std::fs;
use std::path::Path;

use crate::data_paths::data_path;
use crate::loader::rules::load_rules;
use crate::session::Session;
use anyhow::{Context, Result, bail};
use log::info;
use moba_data::GameDef;

/// Load the game from the resolved data directory.
///
/// # Errors
/// Errors bubble up from file IO, deserialization, or missing references.
pub fn load_game() -> Result<Session> {
    load_game_from(&data_path("world.ron"), &data_path("rules.toml"))
}

/// Load the game from explicit paths.
///
/// A missing or broken rules file only logs a warning; the game definition must load
/// and validate.
///
/// # Errors
/// Errors bubble up from file IO, deserialization, or missing references.
pub fn load_game_from(world_path: &Path, rules_path: &Path) -> Result<Session> {
    let game = load_gamedef(world_path).context("while loading game definition from file")?;
    validate_gamedef(&game)?;
    info!(
        "\"{}\": {} nodes, {} classes, {} characters, {} info topics",
        game.title,
        game.nodes.len(),
        game.classes.len(),
        game.characters.len(),
        game.infos.len()
    );
    let rules = load_rules(rules_path);
    Session::new(game, rules).context("while building session from game definition")
}

/// Parse a `GameDef` from a RON file.
///
/// # Errors
/// Returns an error if the file cannot be read or is not a valid `GameDef`.
pub fn load_gamedef(path: &Path) -> Result<GameDef> {
    let text = fs::read_to_string(path).with_context(|| format!("reading game data from '{}'", path.display()))?;
    let game = ron::from_str::<GameDef>(&text).with_context(|| format!("parsing game data from '{}'", path.display()))?;
    info!("game definition loaded from '{}'", path.display());
    Ok(game)
}

/// Validate the `GameDef` and return a single aggregated error.
fn validate_gamedef(def: &GameDef) -> Result<()> {
    let errors = moba_data::validate_game(def);
    if errors.is_empty() {
        return Ok(());
    }
    let details = errors
        .into_iter()
        .map(|err| format!("- {err}"))
        .collect::<Vec<_>>()
        .join("\n");
    bail!("game definition validation failed:\n{details}");
}
