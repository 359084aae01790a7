// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Search state shared between the engine and the work distribution layer.
//!
//! - [`PendingDef`]: one unexplored branch of the search tree
//! - [`Stats`]: counters shared by every worker of a search

pub mod statistics;

pub use statistics::Stats;

use crate::presentation::Letter;
use crate::word_graph::Node;

/// A branch not yet explored: define `(source, generator) -> target`.
///
/// `num_edges` and `num_nodes` record the trail length and the number of
/// active nodes when the definition was created. Installing it first
/// restores the graph to that point, so a frontier can be explored in any
/// order and by any worker holding a copy of the same graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingDef {
    pub source: Node,
    pub generator: Letter,
    pub target: Node,
    pub num_edges: usize,
    pub num_nodes: usize,
    pub target_is_new_node: bool,
}
