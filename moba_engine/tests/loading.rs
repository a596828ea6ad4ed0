mod common;

use std::fs;
use std::path::{Path, PathBuf};

use moba_engine::loader::load_gamedef;
use moba_engine::{View, ViewItem, load_game_from};
use tempfile::TempDir;

fn write_game(dir: &TempDir, game: &moba_data::GameDef) -> PathBuf {
    let path = dir.path().join("world.ron");
    fs::write(&path, ron::to_string(game).unwrap()).unwrap();
    path
}

#[test]
fn shipped_data_loads_and_validates() {
    let data = Path::new(env!("CARGO_MANIFEST_DIR")).join("data");
    let mut session = load_game_from(&data.join("world.ron"), &data.join("rules.toml")).unwrap();
    assert_eq!(session.turn, 1);
    assert!(session.player_alive());
    assert_eq!(session.class_names(), vec!["creep", "mage", "minion", "ranger", "tower", "warrior"]);
    assert!(!session.infos().is_empty());

    let mut view = View::new();
    session.execute_line("look", &mut view);
    assert!(view.has(ViewItem::is_occupants));
}

#[test]
fn shipped_cooldowns_outlast_the_casting_turn() {
    // the boundary closing the casting turn already ticks once, so 1 would never show
    let data = Path::new(env!("CARGO_MANIFEST_DIR")).join("data");
    let game = load_gamedef(&data.join("world.ron")).unwrap();
    for skill in game.classes.iter().flat_map(|c| &c.skills) {
        assert_ne!(skill.cooldown, 1, "{}", skill.id);
    }
}

#[test]
fn game_written_to_disk_loads_with_rules() {
    let dir = TempDir::new().unwrap();
    let world = write_game(&dir, &common::game());
    let rules = dir.path().join("rules.toml");
    fs::write(&rules, "respawn_turns = 1\nrow_depth = 2\n").unwrap();

    let session = load_game_from(&world, &rules).unwrap();
    assert_eq!(session.rules.respawn_turns, 1);
    assert_eq!(session.rules.row_depth, 2);
    assert_eq!(session.rules.lane_gap, 1);
    assert_eq!(session.roster.len(), 5);
}

#[test]
fn missing_rules_file_uses_defaults() {
    let dir = TempDir::new().unwrap();
    let world = write_game(&dir, &common::game());
    let session = load_game_from(&world, &dir.path().join("nope.toml")).unwrap();
    assert_eq!(session.rules, moba_engine::loader::rules::GameRules::default());
}

#[test]
fn broken_references_fail_validation() {
    let dir = TempDir::new().unwrap();
    let mut game = common::game();
    game.characters[0].class = "dragon".into();
    game.nodes[0].paths[0].to = "nowhere".into();
    let world = write_game(&dir, &game);

    let err = load_game_from(&world, &dir.path().join("rules.toml")).unwrap_err();
    let msg = format!("{err:#}");
    assert!(msg.contains("validation failed"), "{msg}");
    assert!(msg.contains("dragon"), "{msg}");
    assert!(msg.contains("nowhere"), "{msg}");
}

#[test]
fn unreadable_game_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("world.ron");
    fs::write(&path, "( title: \"half a file\"").unwrap();
    assert!(load_gamedef(&path).is_err());
    assert!(load_gamedef(&dir.path().join("missing.ron")).is_err());
}
