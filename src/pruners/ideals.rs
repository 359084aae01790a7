// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Pruner for Rees congruences.
//!
//! In the word graph of a Rees congruence every class is a singleton except
//! possibly one, the ideal, and the ideal is closed under right
//! multiplication. Walking the normal forms of the presented semigroup
//! through the graph, a node reached by two distinct normal forms must be the
//! ideal, there can be only one such node, and every edge out of it must be
//! a loop. All three conditions only depend on edges already defined, so the
//! pruner is monotone.

use super::Pruner;
use crate::error::Result;
use crate::presentation::rewriting::{DEFAULT_MAX_REWRITING_RULES, DEFAULT_MAX_RULE_LENGTH};
use crate::presentation::{Presentation, RewritingSystem, Word};
use crate::word_graph::{Node, WordGraph};
use std::collections::VecDeque;

#[derive(Debug, Clone)]
pub struct IdealPruner {
    rewriting: RewritingSystem,
}

impl IdealPruner {
    /// Fails with [`crate::SimsError::RewritingIncomplete`] if the
    /// presentation cannot be completed within the default bounds.
    pub fn new(presentation: &Presentation) -> Result<Self> {
        Self::with_limits(presentation, DEFAULT_MAX_REWRITING_RULES, DEFAULT_MAX_RULE_LENGTH)
    }

    pub fn with_max_rules(presentation: &Presentation, max_rules: usize) -> Result<Self> {
        Self::with_limits(presentation, max_rules, DEFAULT_MAX_RULE_LENGTH)
    }

    /// Complete with at most `max_rules` rules, none with a left-hand side
    /// longer than `max_rule_length`.
    pub fn with_limits(
        presentation: &Presentation,
        max_rules: usize,
        max_rule_length: usize,
    ) -> Result<Self> {
        Ok(Self {
            rewriting: RewritingSystem::knuth_bendix(presentation, max_rules, max_rule_length)?,
        })
    }

    pub fn rewriting_system(&self) -> &RewritingSystem {
        &self.rewriting
    }
}

impl Pruner for IdealPruner {
    fn accepts(&self, graph: &WordGraph) -> bool {
        let n = graph.number_of_nodes();
        if n == 0 {
            return true;
        }
        let mut reached = vec![false; n];
        let mut ideal: Option<Node> = None;
        let mut queue: VecDeque<(Word, Node)> = VecDeque::from([(Vec::new(), 0)]);
        reached[0] = true;

        while let Some((word, source)) = queue.pop_front() {
            for (a, target) in graph.edges(source) {
                let mut next = word.clone();
                next.push(a);
                if self.rewriting.is_reducible(&next) {
                    continue;
                }
                if !reached[target as usize] {
                    reached[target as usize] = true;
                    queue.push_back((next, target));
                } else {
                    match ideal {
                        None => ideal = Some(target),
                        Some(i) if i != target => return false,
                        Some(_) => {}
                    }
                }
            }
        }

        match ideal {
            Some(i) => graph.edges(i).all(|(_, t)| t == i),
            None => true,
        }
    }

    fn name(&self) -> &str {
        "ideals"
    }
}
