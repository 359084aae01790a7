// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Constraint propagation over partial word graphs.
//!
//! After every definition the engine calls [`process_definitions`], which
//! repeatedly checks the short rules, the included and excluded pairs and,
//! for two-sided searches, the pairs generated by non-tree edges. A pair
//! whose one side is fully defined and whose other side lacks only its last
//! edge forces that edge; the forced edge is defined on the trail and the
//! checks run again until no edge is added.
//!
//! [`accepts_complete`] does the checks that only make sense once every
//! edge is defined: the long rules, and a final pass over everything else.

pub mod errors;

pub use errors::Rejection;

use crate::context::{CongruenceKind, SearchContext, SearchMemo};
use crate::presentation::{Letter, Word};
use crate::word_graph::Node;

/// Outcome of a propagation step.
pub type PropagationResult = Result<(), Rejection>;

/// Make `u` and `v` lead to the same node from `node`, defining at most one
/// edge to do so.
fn make_compatible(
    memo: &SearchMemo,
    ctx: &mut SearchContext,
    node: Node,
    u: &[Letter],
    v: &[Letter],
    cause: Rejection,
) -> PropagationResult {
    let (x, i) = ctx.graph.last_node_on_path(node, u);
    let (y, j) = ctx.graph.last_node_on_path(node, v);
    if i == u.len() && j == v.len() {
        return if x == y { Ok(()) } else { Err(cause) };
    }
    if i == u.len() && j + 1 == v.len() {
        debug_assert!(x >= memo.min_target);
        ctx.trail.define(&mut ctx.graph, y, v[j], x);
    } else if j == v.len() && i + 1 == u.len() {
        debug_assert!(y >= memo.min_target);
        ctx.trail.define(&mut ctx.graph, x, u[i], y);
    }
    Ok(())
}

fn nodes_for_pairs(memo: &SearchMemo, ctx: &SearchContext) -> Node {
    match memo.kind {
        CongruenceKind::OneSided => 1,
        CongruenceKind::TwoSided => ctx.graph.number_of_nodes() as Node,
    }
}

/// Both sides of some excluded pair are defined from the root and meet.
fn check_excluded(memo: &SearchMemo, ctx: &SearchContext) -> PropagationResult {
    let graph = &ctx.graph;
    let meets = memo.settings.exclude().chunks_exact(2).any(|pair| {
        match (graph.follow_path(0, &pair[0]), graph.follow_path(0, &pair[1])) {
            (Some(x), Some(y)) => x == y,
            _ => false,
        }
    });
    if meets {
        Err(Rejection::ExcludedPair)
    } else {
        Ok(())
    }
}

/// Pairs `(w_s a, w_t)` for every defined non-tree edge `(s, a) -> t`.
///
/// A word graph is the graph of a two-sided congruence exactly when these
/// pairs hold at every node.
fn two_sided_pairs(ctx: &SearchContext) -> Vec<(Word, Word)> {
    let graph = &ctx.graph;
    let mut pairs = Vec::new();
    for s in 0..graph.number_of_nodes() as Node {
        for (a, t) in graph.edges(s) {
            if !ctx.is_tree_edge(s, a, t) {
                let mut lhs = ctx.tree_word(s);
                lhs.push(a);
                pairs.push((lhs, ctx.tree_word(t)));
            }
        }
    }
    pairs
}

/// Propagate the consequences of the last definition to a fixed point.
pub fn process_definitions(memo: &SearchMemo, ctx: &mut SearchContext) -> PropagationResult {
    let settings = memo.settings;
    loop {
        let before = ctx.trail.len();
        let nodes = ctx.graph.number_of_nodes() as Node;

        for node in 0..nodes {
            for rule in settings.short_rules().chunks_exact(2) {
                make_compatible(memo, ctx, node, &rule[0], &rule[1], Rejection::ShortRule)?;
            }
        }
        for node in 0..nodes_for_pairs(memo, ctx) {
            for pair in settings.include().chunks_exact(2) {
                make_compatible(memo, ctx, node, &pair[0], &pair[1], Rejection::IncludedPair)?;
            }
        }
        check_excluded(memo, ctx)?;
        if memo.kind == CongruenceKind::TwoSided {
            for (lhs, rhs) in two_sided_pairs(ctx) {
                for node in 0..nodes {
                    make_compatible(memo, ctx, node, &lhs, &rhs, Rejection::TwoSided)?;
                }
            }
        }

        if ctx.trail.len() == before {
            return Ok(());
        }
    }
}

/// Every check a complete graph must pass before it is yielded.
pub fn accepts_complete(memo: &SearchMemo, ctx: &SearchContext) -> PropagationResult {
    let graph = &ctx.graph;
    debug_assert!(graph.is_complete());
    let nodes = graph.number_of_nodes() as Node;
    let holds_at = |node: Node, pair: &[Word]| {
        graph.follow_path(node, &pair[0]) == graph.follow_path(node, &pair[1])
    };

    for rule in memo.settings.long_rules().chunks_exact(2) {
        if !(0..nodes).all(|node| holds_at(node, rule)) {
            return Err(Rejection::LongRule);
        }
    }
    for rule in memo.settings.short_rules().chunks_exact(2) {
        if !(0..nodes).all(|node| holds_at(node, rule)) {
            return Err(Rejection::ShortRule);
        }
    }
    let pair_nodes = nodes_for_pairs(memo, ctx);
    for pair in memo.settings.include().chunks_exact(2) {
        if !(0..pair_nodes).all(|node| holds_at(node, pair)) {
            return Err(Rejection::IncludedPair);
        }
    }
    check_excluded(memo, ctx)?;
    if memo.kind == CongruenceKind::TwoSided {
        for (lhs, rhs) in two_sided_pairs(ctx) {
            if !(0..nodes).all(|node| graph.follow_path(node, &lhs) == graph.follow_path(node, &rhs)) {
                return Err(Rejection::TwoSided);
            }
        }
    }
    Ok(())
}
