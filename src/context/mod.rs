// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Search context combining shared read-only data and per-worker state.
//!
//! - [`SearchMemo`]: what every worker of one search reads, never writes
//! - [`SearchContext`]: the partial word graph a worker is extending, with
//!   its trail and spanning tree
//!
//! A worker that steals work clones the victim's [`SearchContext`]; the
//! [`SearchMemo`] is `Copy` and is never cloned in any deeper sense.

use crate::presentation::{Letter, Word};
use crate::settings::Settings;
use crate::state::Stats;
use crate::trail::Trail;
use crate::word_graph::{Node, WordGraph};

/// Which congruences the search enumerates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CongruenceKind {
    /// Right congruences.
    OneSided,
    /// Two-sided congruences.
    TwoSided,
}

/// Immutable data shared by every worker of one search.
#[derive(Debug, Clone, Copy)]
pub struct SearchMemo<'a> {
    pub settings: &'a Settings,
    pub stats: &'a Stats,
    pub kind: CongruenceKind,
    /// Row capacity of every graph in the search.
    pub max_nodes: usize,
    /// Smallest node an edge may target. Node 0 of a semigroup graph is the
    /// adjoined identity and is never a target.
    pub min_target: Node,
}

impl<'a> SearchMemo<'a> {
    /// Memo for congruences with at most `n` classes.
    pub fn new(settings: &'a Settings, stats: &'a Stats, kind: CongruenceKind, n: usize) -> Self {
        let monoid = settings.presentation().contains_empty_word();
        Self {
            settings,
            stats,
            kind,
            max_nodes: if monoid { n } else { n + 1 },
            min_target: if monoid { 0 } else { 1 },
        }
    }

    pub fn out_degree(&self) -> usize {
        self.settings.presentation().alphabet_size()
    }
}

/// The mutable state of one worker.
#[derive(Debug, Clone)]
pub struct SearchContext {
    pub graph: WordGraph,
    pub trail: Trail,
    /// For every node but 0, the edge that created it.
    pub spanning_tree: Vec<Option<(Node, Letter)>>,
}

impl SearchContext {
    /// A context holding only the start node.
    pub fn new(memo: &SearchMemo) -> Self {
        let mut graph = WordGraph::new(memo.max_nodes, memo.out_degree());
        graph.set_number_of_nodes(1);
        Self {
            graph,
            trail: Trail::new(),
            spanning_tree: vec![None; memo.max_nodes],
        }
    }

    /// `(source, letter) -> target` is the edge that created `target`.
    pub fn is_tree_edge(&self, source: Node, letter: Letter, target: Node) -> bool {
        self.spanning_tree[target as usize] == Some((source, letter))
    }

    /// The word labelling the spanning tree path from node 0 to `node`.
    pub fn tree_word(&self, node: Node) -> Word {
        let mut word = Vec::new();
        let mut current = node;
        while let Some((parent, letter)) = self.spanning_tree[current as usize] {
            word.push(letter);
            current = parent;
        }
        word.reverse();
        word
    }
}
