//! Character groups and row distances.
//!
//! A `CharacterGroups` is a read-only snapshot of who stands at one node, partitioned
//! into (team, row) cells. It is rebuilt on demand and never kept across a move or a
//! row change.
//!
//! Distance between two characters depends only on their teams and rows. Opposing
//! characters are separated by the gap between the two battle lines plus the depth
//! of each one's row:
//!
//! | a \ b  | front | back |
//! |--------|-------|------|
//! | front  | 1     | 2    |
//! | back   | 2     | 3    |
//!
//! (with the default metric). Allies are only separated by the difference of depth.

use std::collections::BTreeMap;

use moba_data::{Row, Team};
use serde::{Deserialize, Serialize};

use crate::character::{Character, CharacterId, Roster};

/// Constants of the distance function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowMetric {
    /// Distance between two opposing front rows. Must be at least 1.
    pub lane_gap: u32,
    /// Extra distance added for standing in the back row.
    pub row_depth: u32,
}
impl Default for RowMetric {
    fn default() -> Self {
        Self {
            lane_gap: 1,
            row_depth: 1,
        }
    }
}
impl RowMetric {
    fn depth(self, row: Row) -> u32 {
        match row {
            Row::Front => 0,
            Row::Back => self.row_depth,
        }
    }

    /// Distance between two placements.
    pub fn distance(self, a: (Team, Row), b: (Team, Row)) -> u32 {
        let (da, db) = (self.depth(a.1), self.depth(b.1));
        if a.0 == b.0 {
            da.abs_diff(db)
        } else {
            self.lane_gap.saturating_add(da).saturating_add(db)
        }
    }
}

/// Snapshot of one node's occupants, grouped by team and row.
#[derive(Debug, Clone, Default)]
pub struct CharacterGroups {
    metric: RowMetric,
    /// Occupant order at build time.
    order: Vec<CharacterId>,
    cells: BTreeMap<(Team, Row), Vec<CharacterId>>,
}
impl CharacterGroups {
    /// Build a snapshot with the default metric.
    pub fn build(occupants: &[CharacterId], roster: &Roster) -> CharacterGroups {
        CharacterGroups::build_with(occupants, roster, RowMetric::default())
    }

    /// Build a snapshot from a node's occupant list. Unknown handles are skipped.
    pub fn build_with(occupants: &[CharacterId], roster: &Roster, metric: RowMetric) -> CharacterGroups {
        let mut groups = CharacterGroups {
            metric,
            order: Vec::with_capacity(occupants.len()),
            cells: BTreeMap::new(),
        };
        for character in occupants.iter().filter_map(|id| roster.get(*id)) {
            groups.order.push(character.id);
            groups
                .cells
                .entry((character.team, character.row))
                .or_default()
                .push(character.id);
        }
        groups
    }

    pub fn distance_between(&self, a: &Character, b: &Character) -> u32 {
        self.metric.distance((a.team, a.row), (b.team, b.row))
    }

    pub fn contains(&self, id: CharacterId) -> bool {
        self.order.contains(&id)
    }

    /// Everyone in the snapshot, in occupant order.
    pub fn members(&self) -> impl Iterator<Item = CharacterId> + '_ {
        self.order.iter().copied()
    }

    /// Everyone standing in `row`, whatever their team, in occupant order.
    pub fn members_in_row(&self, row: Row) -> impl Iterator<Item = CharacterId> + '_ {
        self.order.iter().copied().filter(move |id| {
            self.cells
                .iter()
                .any(|((_, cell_row), cell)| *cell_row == row && cell.contains(id))
        })
    }

    /// Members of one (team, row) cell.
    pub fn cell(&self, team: Team, row: Row) -> &[CharacterId] {
        self.cells.get(&(team, row)).map_or(&[], Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::tests::fighter;

    const TEAMS: [Team; 3] = [Team::Blue, Team::Red, Team::Neutral];
    const ROWS: [Row; 2] = [Row::Front, Row::Back];

    #[test]
    fn distance_is_symmetric() {
        let metric = RowMetric::default();
        for ta in TEAMS {
            for ra in ROWS {
                for tb in TEAMS {
                    for rb in ROWS {
                        assert_eq!(metric.distance((ta, ra), (tb, rb)), metric.distance((tb, rb), (ta, ra)));
                    }
                }
            }
        }
    }

    #[test]
    fn moving_back_never_brings_opponents_closer() {
        for metric in [
            RowMetric::default(),
            RowMetric {
                lane_gap: 2,
                row_depth: 3,
            },
        ] {
            for ta in TEAMS {
                for tb in TEAMS.into_iter().filter(|t| *t != ta) {
                    for rb in ROWS {
                        let front = metric.distance((ta, Row::Front), (tb, rb));
                        let back = metric.distance((ta, Row::Back), (tb, rb));
                        assert!(back > front);
                    }
                }
            }
        }
    }

    #[test]
    fn front_lines_are_closest() {
        let metric = RowMetric::default();
        assert_eq!(metric.distance((Team::Blue, Row::Front), (Team::Red, Row::Front)), 1);
        assert_eq!(metric.distance((Team::Blue, Row::Back), (Team::Red, Row::Front)), 2);
        assert_eq!(metric.distance((Team::Blue, Row::Back), (Team::Red, Row::Back)), 3);
        assert_eq!(metric.distance((Team::Blue, Row::Back), (Team::Blue, Row::Front)), 1);
        assert_eq!(metric.distance((Team::Red, Row::Back), (Team::Red, Row::Back)), 0);
    }

    #[test]
    fn oversized_constants_saturate() {
        let metric = RowMetric {
            lane_gap: u32::MAX,
            row_depth: u32::MAX,
        };
        assert_eq!(metric.distance((Team::Blue, Row::Back), (Team::Red, Row::Back)), u32::MAX);
        assert_eq!(metric.distance((Team::Red, Row::Back), (Team::Red, Row::Front)), u32::MAX);
    }

    #[test]
    fn every_member_lands_in_one_cell() {
        let mut roster = Roster::default();
        roster.push(fighter("a", Team::Blue, Row::Front));
        roster.push(fighter("b", Team::Red, Row::Back));
        roster.push(fighter("c", Team::Red, Row::Back));
        roster.push(fighter("d", Team::Neutral, Row::Front));
        let ids: Vec<_> = (0..4).map(CharacterId).collect();
        let groups = &CharacterGroups::build(&ids, &roster);

        let total: usize = TEAMS
            .iter()
            .flat_map(|t| ROWS.iter().map(move |r| groups.cell(*t, *r).len()))
            .sum();
        assert_eq!(total, groups.len());
        assert_eq!(groups.cell(Team::Red, Row::Back), &[CharacterId(1), CharacterId(2)]);
        assert!(groups.cell(Team::Blue, Row::Back).is_empty());
    }

    #[test]
    fn row_members_keep_occupant_order() {
        let mut roster = Roster::default();
        roster.push(fighter("a", Team::Red, Row::Front));
        roster.push(fighter("b", Team::Blue, Row::Front));
        roster.push(fighter("c", Team::Red, Row::Back));
        roster.push(fighter("d", Team::Neutral, Row::Front));
        let ids = [CharacterId(3), CharacterId(0), CharacterId(2), CharacterId(1)];
        let groups = CharacterGroups::build(&ids, &roster);
        let front: Vec<_> = groups.members_in_row(Row::Front).collect();
        assert_eq!(front, vec![CharacterId(3), CharacterId(0), CharacterId(1)]);
    }

    #[test]
    fn unknown_handles_are_skipped() {
        let roster = Roster::default();
        let groups = CharacterGroups::build(&[CharacterId(5)], &roster);
        assert!(groups.is_empty());
        assert!(!groups.contains(CharacterId(5)));
    }
}
