//! Rule constants and loader.
//!
//! Turn-level tuning that is not part of the map or class data: respawn delay and the
//! constants of the row distance function. Read from `rules.toml`; any missing key
//! takes its default, and a missing or broken file falls back to defaults entirely.

use anyhow::{Context, Result, bail};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::groups::RowMetric;

/// Largest accepted `lane_gap` or `row_depth`.
pub const MAX_DISTANCE_STEP: u32 = 1000;

/// Game-wide rule constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameRules {
    /// Turn boundaries a dead character waits before respawning (unless its class overrides it).
    pub respawn_turns: u32,
    /// Distance between two opposing front rows.
    pub lane_gap: u32,
    /// Extra distance for standing in the back row.
    pub row_depth: u32,
}

impl Default for GameRules {
    fn default() -> Self {
        Self {
            respawn_turns: 3,
            lane_gap: 1,
            row_depth: 1,
        }
    }
}

impl GameRules {
    pub fn metric(&self) -> RowMetric {
        RowMetric {
            lane_gap: self.lane_gap,
            row_depth: self.row_depth,
        }
    }
}

/// Loads rules from a TOML file, falling back to defaults on error.
///
/// This function never fails. A `warn!` is logged whenever defaults are used.
pub fn load_rules(toml_path: &Path) -> GameRules {
    match try_load_rules(toml_path) {
        Ok(rules) => {
            info!("game rules loaded from '{}': {rules:?}", toml_path.display());
            rules
        },
        Err(e) => {
            warn!(
                "Could not load rules from '{}': {e:#}. Using hardcoded defaults.",
                toml_path.display()
            );
            GameRules::default()
        },
    }
}

/// Attempts to load rules from a TOML file.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed, or if a value is out of range.
fn try_load_rules(toml_path: &Path) -> Result<GameRules> {
    let rules_file =
        fs::read_to_string(toml_path).with_context(|| format!("reading rules from '{}'", toml_path.display()))?;
    let rules: GameRules =
        toml::from_str(&rules_file).with_context(|| format!("parsing rules from '{}'", toml_path.display()))?;
    for (key, value) in [("lane_gap", rules.lane_gap), ("row_depth", rules.row_depth)] {
        if !(1..=MAX_DISTANCE_STEP).contains(&value) {
            bail!("{key} = {value} is out of range (1..={MAX_DISTANCE_STEP})");
        }
    }
    Ok(rules)
}

#[cfg(test)]
mod tests {
    use super::*;
    use moba_data::{Row, Team};
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn rules_file(text: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{text}").unwrap();
        file
    }

    #[test]
    fn missing_file_gives_defaults() {
        let rules = load_rules(Path::new("/definitely/not/here/rules.toml"));
        assert_eq!(rules, GameRules::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let file = rules_file("respawn_turns = 5\n");
        let rules = load_rules(file.path());
        assert_eq!(rules.respawn_turns, 5);
        assert_eq!(rules.lane_gap, 1);
        assert_eq!(rules.row_depth, 1);
    }

    #[test]
    fn zero_lane_gap_is_rejected() {
        let file = rules_file("lane_gap = 0\nrow_depth = 2\n");
        assert!(try_load_rules(file.path()).is_err());
        assert_eq!(load_rules(file.path()), GameRules::default());
    }

    #[test]
    fn zero_row_depth_is_rejected() {
        let file = rules_file("row_depth = 0\n");
        assert!(try_load_rules(file.path()).is_err());
        let metric = load_rules(file.path()).metric();
        let front = metric.distance((Team::Blue, Row::Front), (Team::Red, Row::Front));
        let back = metric.distance((Team::Blue, Row::Back), (Team::Red, Row::Front));
        assert!(back > front);
    }

    #[test]
    fn huge_distance_steps_are_rejected() {
        let file = rules_file("lane_gap = 4294967295\n");
        assert!(try_load_rules(file.path()).is_err());
        let file = rules_file("row_depth = 1001\n");
        assert!(try_load_rules(file.path()).is_err());
        let file = rules_file("lane_gap = 1000\nrow_depth = 1000\n");
        assert_eq!(try_load_rules(file.path()).unwrap().metric().lane_gap, 1000);
    }

    #[test]
    fn garbage_falls_back_to_defaults() {
        let file = rules_file("respawn_turns = \"soon\"");
        assert_eq!(load_rules(file.path()), GameRules::default());
    }

    #[test]
    fn metric_mirrors_rules() {
        let rules = GameRules {
            respawn_turns: 1,
            lane_gap: 2,
            row_depth: 3,
        };
        assert_eq!(
            rules.metric(),
            RowMetric {
                lane_gap: 2,
                row_depth: 3
            }
        );
    }
}
