// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Trail-based backtracking for word graph search.
//!
//! Every edge the search defines, whether chosen or deduced, is recorded on
//! the trail. A pending definition remembers the trail length at the time it
//! was created, so backtracking to it is a truncation: each edge recorded
//! after that point is reset to [`UNDEFINED`].

use crate::presentation::Letter;
use crate::word_graph::{Node, WordGraph, UNDEFINED};

/// A single entry in the trail: the edge `(source, letter)` was defined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct TrailEntry {
    source: Node,
    letter: Letter,
}

/// The edges defined so far, in order.
///
/// Each worker owns its own trail. A thief clones the victim's trail along
/// with its graph, so the entries always describe the graph they sit beside.
#[derive(Debug, Clone, Default)]
pub struct Trail {
    entries: Vec<TrailEntry>,
}

impl Trail {
    pub fn new() -> Self {
        Self::default()
    }

    /// Define `(source, letter) -> target` in `graph` and record it.
    pub fn define(&mut self, graph: &mut WordGraph, source: Node, letter: Letter, target: Node) {
        debug_assert_eq!(graph.target(source, letter), UNDEFINED);
        graph.set_target(source, letter, target);
        self.entries.push(TrailEntry { source, letter });
    }

    /// Undo every definition after the first `len`.
    pub fn rewind_to(&mut self, len: usize, graph: &mut WordGraph) {
        for entry in self.entries.drain(len.min(self.entries.len())..) {
            graph.set_target(entry.source, entry.letter, UNDEFINED);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The recorded edges, oldest first.
    pub fn edges(&self) -> impl Iterator<Item = (Node, Letter)> + '_ {
        self.entries.iter().map(|e| (e.source, e.letter))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trail_new() {
        let trail = Trail::new();
        assert_eq!(trail.len(), 0);
        assert!(trail.is_empty());
    }

    #[test]
    fn test_define_and_rewind() {
        let mut graph = WordGraph::new(3, 2);
        graph.set_number_of_nodes(3);
        let mut trail = Trail::new();

        trail.define(&mut graph, 0, 0, 1);
        trail.define(&mut graph, 0, 1, 2);
        let checkpoint = trail.len();
        assert_eq!(checkpoint, 2);

        trail.define(&mut graph, 1, 0, 1);
        trail.define(&mut graph, 2, 1, 0);
        assert_eq!(trail.len(), 4);

        trail.rewind_to(checkpoint, &mut graph);
        assert_eq!(trail.len(), 2);
        assert_eq!(graph.target(0, 0), 1);
        assert_eq!(graph.target(0, 1), 2);
        assert_eq!(graph.target(1, 0), UNDEFINED);
        assert_eq!(graph.target(2, 1), UNDEFINED);
    }

    #[test]
    fn test_nested_rewinds() {
        let mut graph = WordGraph::new(2, 1);
        graph.set_number_of_nodes(2);
        let mut trail = Trail::new();

        trail.define(&mut graph, 0, 0, 1);
        trail.define(&mut graph, 1, 0, 0);
        trail.rewind_to(1, &mut graph);
        assert_eq!(graph.target(1, 0), UNDEFINED);
        trail.rewind_to(0, &mut graph);
        assert_eq!(graph.target(0, 0), UNDEFINED);
        assert!(trail.is_empty());
    }

    #[test]
    fn test_rewind_past_end_is_noop() {
        let mut graph = WordGraph::new(1, 1);
        graph.set_number_of_nodes(1);
        let mut trail = Trail::new();
        trail.define(&mut graph, 0, 0, 0);
        trail.rewind_to(5, &mut graph);
        assert_eq!(trail.len(), 1);
        assert_eq!(trail.edges().collect::<Vec<_>>(), vec![(0, 0)]);
    }
}
