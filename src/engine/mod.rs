// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Backtracking search over word graphs.
//!
//! The search tree is explored with an explicit frontier of
//! [`PendingDef`]s rather than by recursion. Each pending definition carries
//! the trail length and node count it was created at, so installing one
//! first rewinds the graph to that point, then defines the edge and
//! propagates its consequences.
//!
//! # Architecture
//!
//! A [`SearchEngine`] owns one worker's [`SearchContext`] and its frontier.
//! The engine offers the primitives the drivers need:
//! 1. [`SearchEngine::init`] sets up the root of the search tree
//! 2. [`SearchEngine::try_pop`] takes the next pending definition
//! 3. [`SearchEngine::try_define`] installs it, returning `Failure`,
//!    `Choices(n)` after pushing `n` children, or `Complete`
//! 4. [`SearchEngine::split_off`] and [`SearchEngine::install`] move half of
//!    the frontier, with a copy of the context, to another engine
//!
//! Nodes are created in the order in which the first undefined edge, in
//! `(node, letter)` order, reaches them, so every congruence has exactly one
//! word graph in the search tree.

use crate::context::{SearchContext, SearchMemo};
use crate::presentation::Letter;
use crate::propagation::{self, Rejection};
use crate::state::PendingDef;
use crate::word_graph::{Node, WordGraph, UNDEFINED};
use std::collections::VecDeque;
use tracing::trace;

/// Result of installing a definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepResult {
    /// The branch is dead. Move on to the next pending definition.
    Failure,

    /// `n` pending definitions were pushed for the next undefined edge.
    Choices(usize),

    /// The graph is complete and accepted. Read it with
    /// [`SearchEngine::accepted_graph`].
    Complete,
}

/// One worker's search state.
#[derive(Debug)]
pub struct SearchEngine<'a> {
    memo: SearchMemo<'a>,
    ctx: SearchContext,
    pending: VecDeque<PendingDef>,
    /// Statistics: number of definitions installed.
    tries: u64,
}

impl<'a> SearchEngine<'a> {
    /// An engine with an empty frontier. Call [`SearchEngine::init`] or
    /// [`SearchEngine::install`] before popping.
    pub fn new(memo: SearchMemo<'a>) -> Self {
        Self {
            ctx: SearchContext::new(&memo),
            memo,
            pending: VecDeque::new(),
            tries: 0,
        }
    }

    /// Reset to the root of the search tree: one node, no edges.
    ///
    /// Returns `Complete` if the root is itself an accepted graph, which only
    /// happens for an empty alphabet or when propagation defines every edge.
    pub fn init(&mut self) -> StepResult {
        self.ctx = SearchContext::new(&self.memo);
        self.pending.clear();
        self.tries = 0;
        if let Err(cause) = propagation::process_definitions(&self.memo, &mut self.ctx) {
            return self.reject(cause);
        }
        if !self.pruners_accept() {
            return self.reject(Rejection::Pruned);
        }
        self.install_descendants(0, 0)
    }

    pub fn try_pop(&mut self) -> Option<PendingDef> {
        self.pending.pop_back()
    }

    /// Install `pd` and explore one level below it.
    pub fn try_define(&mut self, pd: PendingDef) -> StepResult {
        self.tries += 1;
        let ctx = &mut self.ctx;
        ctx.trail.rewind_to(pd.num_edges, &mut ctx.graph);
        ctx.graph.set_number_of_nodes(pd.num_nodes);
        if pd.target_is_new_node {
            ctx.spanning_tree[pd.target as usize] = Some((pd.source, pd.generator));
        }
        ctx.trail
            .define(&mut ctx.graph, pd.source, pd.generator, pd.target);

        if let Err(cause) = propagation::process_definitions(&self.memo, &mut self.ctx) {
            return self.reject(cause);
        }
        if !self.pruners_accept() {
            return self.reject(Rejection::Pruned);
        }
        self.install_descendants(pd.source, pd.generator + 1)
    }

    /// The current graph restricted to its active nodes.
    pub fn accepted_graph(&self) -> WordGraph {
        let graph = &self.ctx.graph;
        graph.induced_subgraph(graph.number_of_nodes())
    }

    pub fn number_of_pending(&self) -> usize {
        self.pending.len()
    }

    /// Statistics: number of definitions installed since the last `init`.
    pub fn tries(&self) -> u64 {
        self.tries
    }

    /// Give away the oldest half of the frontier with a copy of the context
    /// it was created in. `None` if there is nothing to give.
    pub fn split_off(&mut self) -> Option<(SearchContext, Vec<PendingDef>)> {
        if self.pending.is_empty() {
            return None;
        }
        let count = (self.pending.len() + 1) / 2;
        let stolen: Vec<PendingDef> = self.pending.drain(..count).collect();
        Some((self.ctx.clone(), stolen))
    }

    /// Take over work split off from another engine of the same search.
    pub fn install(&mut self, ctx: SearchContext, pending: Vec<PendingDef>) {
        debug_assert!(self.pending.is_empty());
        self.ctx = ctx;
        self.pending.extend(pending);
    }

    fn reject(&self, cause: Rejection) -> StepResult {
        trace!(%cause, nodes = self.ctx.graph.number_of_nodes(), "branch rejected");
        self.memo.stats.record_rejection(cause);
        StepResult::Failure
    }

    fn pruners_accept(&self) -> bool {
        self.memo
            .settings
            .pruners()
            .iter()
            .all(|p| p.accepts(&self.ctx.graph))
    }

    /// Push the children of the first undefined edge at or after
    /// `(source, generator)`, or finish the graph if there is none.
    fn install_descendants(&mut self, source: Node, generator: Letter) -> StepResult {
        let graph = &self.ctx.graph;
        let nodes = graph.number_of_nodes();
        let out_degree = graph.out_degree();
        for s in source..nodes as Node {
            let first = if s == source { generator } else { 0 };
            for a in first..out_degree {
                if graph.target(s, a) == UNDEFINED {
                    return self.push_children(s, a);
                }
            }
        }
        match propagation::accepts_complete(&self.memo, &self.ctx) {
            Ok(()) => StepResult::Complete,
            Err(cause) => self.reject(cause),
        }
    }

    /// Existing targets are tried in ascending order, a new node last.
    fn push_children(&mut self, source: Node, generator: Letter) -> StepResult {
        let nodes = self.ctx.graph.number_of_nodes();
        let num_edges = self.ctx.trail.len();
        let before = self.pending.len();
        if nodes < self.memo.max_nodes {
            self.pending.push_back(PendingDef {
                source,
                generator,
                target: nodes as Node,
                num_edges,
                num_nodes: nodes + 1,
                target_is_new_node: true,
            });
        }
        for target in (self.memo.min_target..nodes as Node).rev() {
            self.pending.push_back(PendingDef {
                source,
                generator,
                target,
                num_edges,
                num_nodes: nodes,
                target_is_new_node: false,
            });
        }
        let pushed = self.pending.len() - before;
        self.memo.stats.record_pending(pushed, self.pending.len());
        if pushed == 0 {
            StepResult::Failure
        } else {
            StepResult::Choices(pushed)
        }
    }
}
