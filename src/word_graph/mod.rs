// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Word graphs: the objects the search builds and yields.
//!
//! A word graph has nodes `0..N` and at most one edge per `(node, letter)`.
//! Edges are stored row by row in a flat vector; an absent edge holds
//! [`UNDEFINED`]. Node 0 is the start node. A graph produced by the search
//! has a fixed row capacity and a smaller number of active nodes; rows past
//! the active count are never read.

use crate::presentation::Letter;
use std::fmt;

/// A node index.
pub type Node = u32;

/// Target of an edge that has not been defined.
pub const UNDEFINED: Node = Node::MAX;

#[derive(Clone, PartialEq, Eq, Hash)]
pub struct WordGraph {
    out_degree: usize,
    nodes: usize,
    targets: Vec<Node>,
}

impl WordGraph {
    /// A graph with `capacity` rows, all edges undefined, and no active nodes.
    pub fn new(capacity: usize, out_degree: usize) -> Self {
        Self {
            out_degree,
            nodes: 0,
            targets: vec![UNDEFINED; capacity * out_degree],
        }
    }

    /// The graph with no nodes, used as the "nothing found" result.
    pub fn empty() -> Self {
        Self::new(0, 0)
    }

    /// Build a graph from explicit rows. `None` is an undefined edge.
    ///
    /// # Panics
    ///
    /// Panics if the rows have different lengths or a target is out of range.
    pub fn from_rows(rows: &[Vec<Option<Node>>]) -> Self {
        let out_degree = rows.first().map_or(0, Vec::len);
        let mut graph = Self::new(rows.len(), out_degree);
        graph.nodes = rows.len();
        for (s, row) in rows.iter().enumerate() {
            assert_eq!(row.len(), out_degree, "row {} has the wrong length", s);
            for (a, t) in row.iter().enumerate() {
                if let Some(t) = *t {
                    assert!((t as usize) < rows.len(), "target {} out of range", t);
                    graph.set_target(s as Node, a, t);
                }
            }
        }
        graph
    }

    pub fn out_degree(&self) -> usize {
        self.out_degree
    }

    /// Number of active nodes.
    pub fn number_of_nodes(&self) -> usize {
        self.nodes
    }

    pub fn is_empty(&self) -> bool {
        self.nodes == 0
    }

    /// Number of rows allocated.
    pub fn capacity(&self) -> usize {
        if self.out_degree == 0 {
            self.nodes
        } else {
            self.targets.len() / self.out_degree
        }
    }

    pub(crate) fn set_number_of_nodes(&mut self, nodes: usize) {
        debug_assert!(self.out_degree == 0 || nodes <= self.capacity());
        self.nodes = nodes;
    }

    #[inline]
    pub fn target(&self, source: Node, letter: Letter) -> Node {
        debug_assert!(letter < self.out_degree, "letter {} out of range", letter);
        self.targets[source as usize * self.out_degree + letter]
    }

    #[inline]
    pub fn set_target(&mut self, source: Node, letter: Letter, target: Node) {
        debug_assert!(letter < self.out_degree, "letter {} out of range", letter);
        self.targets[source as usize * self.out_degree + letter] = target;
    }

    /// The node reached by following `path` from `source`, if every edge on
    /// the way is defined.
    pub fn follow_path(&self, source: Node, path: &[Letter]) -> Option<Node> {
        path.iter().try_fold(source, |node, &a| {
            let t = self.target(node, a);
            (t != UNDEFINED).then_some(t)
        })
    }

    /// Follow `path` from `source` as far as edges are defined.
    ///
    /// Returns the last node reached and how many letters were consumed.
    pub fn last_node_on_path(&self, source: Node, path: &[Letter]) -> (Node, usize) {
        let mut node = source;
        for (i, &a) in path.iter().enumerate() {
            let t = self.target(node, a);
            if t == UNDEFINED {
                return (node, i);
            }
            node = t;
        }
        (node, path.len())
    }

    /// Every edge out of every active node is defined.
    pub fn is_complete(&self) -> bool {
        self.targets[..self.nodes * self.out_degree]
            .iter()
            .all(|&t| t != UNDEFINED)
    }

    /// Number of defined edges out of active nodes.
    pub fn number_of_edges(&self) -> usize {
        self.targets[..self.nodes * self.out_degree]
            .iter()
            .filter(|&&t| t != UNDEFINED)
            .count()
    }

    /// Copy of the first `nodes` rows, with exactly that capacity.
    ///
    /// Edges leaving the range are dropped.
    pub fn induced_subgraph(&self, nodes: usize) -> Self {
        let nodes = nodes.min(self.capacity());
        let targets = self.targets[..nodes * self.out_degree]
            .iter()
            .map(|&t| if (t as usize) < nodes { t } else { UNDEFINED })
            .collect();
        Self {
            out_degree: self.out_degree,
            nodes,
            targets,
        }
    }

    /// Rows of the active nodes, `None` for undefined edges.
    pub fn rows(&self) -> Vec<Vec<Option<Node>>> {
        (0..self.nodes as Node)
            .map(|s| {
                (0..self.out_degree)
                    .map(|a| Some(self.target(s, a)).filter(|&t| t != UNDEFINED))
                    .collect()
            })
            .collect()
    }

    /// The letters and targets of all defined edges out of `source`.
    pub fn edges(&self, source: Node) -> impl Iterator<Item = (Letter, Node)> + '_ {
        (0..self.out_degree)
            .map(move |a| (a, self.target(source, a)))
            .filter(|&(_, t)| t != UNDEFINED)
    }
}

impl fmt::Debug for WordGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WordGraph({}, {}, [", self.nodes, self.out_degree)?;
        for (i, row) in self.rows().iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "[")?;
            for (j, t) in row.iter().enumerate() {
                if j > 0 {
                    write!(f, ", ")?;
                }
                match t {
                    Some(t) => write!(f, "{}", t)?,
                    None => write!(f, "-")?,
                }
            }
            write!(f, "]")?;
        }
        write!(f, "])")
    }
}
