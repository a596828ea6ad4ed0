//! Map graph.
//!
//! Every place a character can stand is a `MapNode`. Nodes live in an arena owned by
//! [`MapGraph`] and refer to each other (and are referred to by characters) through
//! [`NodeId`] handles, so cycles in the map need no special ownership handling.
//!
//! Paths are directed: a path from A to B carries a set of direction labels
//! ("north", "n", "red"...) that all lead to B.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;

use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};

use crate::character::CharacterId;

/// Handle to a node in the [`MapGraph`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node#{}", self.0)
    }
}

/// A location on the map.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapNode {
    pub id: NodeId,
    pub symbol: String,
    pub name: String,
    pub description: String,
    /// Outgoing paths: destination -> direction labels (stored lowercase).
    pub paths: BTreeMap<NodeId, BTreeSet<String>>,
    /// Characters present, in arrival order. This order is what `look` enumerates
    /// and what `attack`/`use` indices refer to.
    pub characters: Vec<CharacterId>,
}
impl MapNode {
    /// Find the destination reachable through `label`, ignoring case.
    pub fn destination(&self, label: &str) -> Option<NodeId> {
        let lc_label = label.to_lowercase();
        self.paths
            .iter()
            .find(|(_, labels)| labels.contains(&lc_label))
            .map(|(dest, _)| *dest)
    }

    /// Character listed at position `index` in this node's occupant order.
    pub fn character_at(&self, index: usize) -> Option<CharacterId> {
        self.characters.get(index).copied()
    }

    /// Position of a character in this node's occupant order.
    pub fn index_of(&self, character: CharacterId) -> Option<usize> {
        self.characters.iter().position(|c| *c == character)
    }
}

/// All nodes of the map and the paths between them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MapGraph {
    nodes: Vec<MapNode>,
    by_symbol: HashMap<String, NodeId>,
}
impl MapGraph {
    pub fn new() -> MapGraph {
        MapGraph::default()
    }

    /// Add a node, returning its handle.
    ///
    /// # Errors
    /// - if a node with the same symbol already exists
    pub fn add_node(&mut self, symbol: &str, name: &str, description: &str) -> Result<NodeId> {
        if self.by_symbol.contains_key(symbol) {
            return Err(anyhow!("node '{symbol}' defined twice"));
        }
        let id = NodeId(self.nodes.len());
        self.nodes.push(MapNode {
            id,
            symbol: symbol.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            paths: BTreeMap::new(),
            characters: Vec::new(),
        });
        self.by_symbol.insert(symbol.to_string(), id);
        Ok(id)
    }

    /// Add a directed path `from` -> `to`. Labels are merged with any existing path to the same destination.
    ///
    /// # Errors
    /// - if either handle is not part of this graph
    pub fn add_path<S: AsRef<str>>(&mut self, from: NodeId, to: NodeId, labels: &[S]) -> Result<()> {
        if self.nodes.get(to.0).is_none() {
            return Err(anyhow!("path destination {to} not found"));
        }
        let node = self.node_mut(from)?;
        let entry = node.paths.entry(to).or_default();
        for label in labels {
            let label = label.as_ref().trim();
            if !label.is_empty() {
                entry.insert(label.to_lowercase());
            }
        }
        Ok(())
    }

    pub fn lookup(&self, symbol: &str) -> Option<NodeId> {
        self.by_symbol.get(symbol).copied()
    }

    /// Get a node by handle.
    /// # Errors
    /// - if the handle is not part of this graph
    pub fn node(&self, id: NodeId) -> Result<&MapNode> {
        self.nodes.get(id.0).ok_or_else(|| anyhow!("{id} not found in map"))
    }

    /// Get a mutable node by handle.
    /// # Errors
    /// - if the handle is not part of this graph
    pub fn node_mut(&mut self, id: NodeId) -> Result<&mut MapNode> {
        self.nodes.get_mut(id.0).ok_or_else(|| anyhow!("{id} not found in map"))
    }

    pub fn nodes(&self) -> impl Iterator<Item = &MapNode> {
        self.nodes.iter()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Destination of `label` from node `from`, ignoring case.
    pub fn destination(&self, from: NodeId, label: &str) -> Option<NodeId> {
        self.nodes.get(from.0).and_then(|node| node.destination(label))
    }

    /// Character at `index` in the occupant order of node `at`.
    pub fn character_at(&self, at: NodeId, index: usize) -> Option<CharacterId> {
        self.nodes.get(at.0).and_then(|node| node.character_at(index))
    }

    /// Append a character to a node's occupants.
    /// # Errors
    /// - if the node handle is invalid
    pub fn enter(&mut self, character: CharacterId, at: NodeId) -> Result<()> {
        let node = self.node_mut(at)?;
        if !node.characters.contains(&character) {
            node.characters.push(character);
        }
        Ok(())
    }

    /// Remove a character from a node's occupants, preserving the order of the others.
    /// # Errors
    /// - if the node handle is invalid
    pub fn leave(&mut self, character: CharacterId, at: NodeId) -> Result<()> {
        let node = self.node_mut(at)?;
        node.characters.retain(|c| *c != character);
        Ok(())
    }

    /// Forget every occupant of every node.
    pub fn clear_occupants(&mut self) {
        for node in &mut self.nodes {
            node.characters.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_node_graph() -> (MapGraph, NodeId, NodeId) {
        let mut map = MapGraph::new();
        let a = map.add_node("a", "Node A", "").unwrap();
        let b = map.add_node("b", "Node B", "").unwrap();
        map.add_path(a, b, &["North", "n"]).unwrap();
        map.add_path(b, a, &["south"]).unwrap();
        (map, a, b)
    }

    #[test]
    fn destination_ignores_case_and_accepts_aliases() {
        let (map, a, b) = two_node_graph();
        assert_eq!(map.destination(a, "north"), Some(b));
        assert_eq!(map.destination(a, "NORTH"), Some(b));
        assert_eq!(map.destination(a, "N"), Some(b));
        assert_eq!(map.destination(a, "south"), None);
        assert_eq!(map.destination(b, "South"), Some(a));
    }

    #[test]
    fn paths_to_same_destination_merge_labels() {
        let (mut map, a, b) = two_node_graph();
        map.add_path(a, b, &["up"]).unwrap();
        let node = map.node(a).unwrap();
        assert_eq!(node.paths.len(), 1);
        assert_eq!(node.paths[&b].len(), 3);
    }

    #[test]
    fn node_may_path_to_itself() {
        let (mut map, a, _) = two_node_graph();
        map.add_path(a, a, &["around"]).unwrap();
        assert_eq!(map.destination(a, "around"), Some(a));
    }

    #[test]
    fn duplicate_symbol_is_rejected() {
        let (mut map, _, _) = two_node_graph();
        assert!(map.add_node("a", "Again", "").is_err());
    }

    #[test]
    fn path_to_unknown_node_is_rejected() {
        let (mut map, a, _) = two_node_graph();
        assert!(map.add_path(a, NodeId(99), &["void"]).is_err());
    }

    #[test]
    fn occupant_order_follows_arrival() {
        let (mut map, a, _) = two_node_graph();
        map.enter(CharacterId(4), a).unwrap();
        map.enter(CharacterId(1), a).unwrap();
        map.enter(CharacterId(7), a).unwrap();
        assert_eq!(map.character_at(a, 0), Some(CharacterId(4)));
        assert_eq!(map.character_at(a, 2), Some(CharacterId(7)));
        assert_eq!(map.character_at(a, 3), None);

        map.leave(CharacterId(1), a).unwrap();
        assert_eq!(map.character_at(a, 1), Some(CharacterId(7)));
        assert_eq!(map.node(a).unwrap().index_of(CharacterId(7)), Some(1));
    }

    #[test]
    fn entering_twice_does_not_duplicate() {
        let (mut map, a, _) = two_node_graph();
        map.enter(CharacterId(0), a).unwrap();
        map.enter(CharacterId(0), a).unwrap();
        assert_eq!(map.node(a).unwrap().characters.len(), 1);
    }
}
