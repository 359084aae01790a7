// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Pruner for faithful right congruences.
//!
//! A complete word graph is rejected when it identifies some forbidden pair
//! at every node, that is when the pair lies in the largest two-sided
//! congruence contained in the right congruence. Incomplete graphs are
//! always accepted, which keeps the pruner monotone.

use super::Pruner;
use crate::error::{Result, SimsError};
use crate::presentation::{Presentation, Word};
use crate::word_graph::{Node, WordGraph};

#[derive(Debug, Clone)]
pub struct FaithfulPruner {
    forbid: Vec<Word>,
}

impl FaithfulPruner {
    /// `forbid` is a flat list of pairs `u0, v0, u1, v1, ...` of words over
    /// the alphabet of `presentation`.
    pub fn new(presentation: &Presentation, forbid: Vec<Word>) -> Result<Self> {
        if forbid.len() % 2 != 0 {
            return Err(SimsError::InvalidArgument(format!(
                "expected a list of forbidden pairs, found {} words",
                forbid.len()
            )));
        }
        forbid.iter().try_for_each(|w| {
            presentation.validate_word(w).map_err(|e| match e {
                SimsError::InvalidPresentation(msg) => SimsError::InvalidArgument(msg),
                other => other,
            })
        })?;
        Ok(Self { forbid })
    }

    pub fn forbid(&self) -> &[Word] {
        &self.forbid
    }
}

impl Pruner for FaithfulPruner {
    fn accepts(&self, graph: &WordGraph) -> bool {
        if !graph.is_complete() {
            return true;
        }
        let nodes = graph.number_of_nodes() as Node;
        !self.forbid.chunks_exact(2).any(|pair| {
            (0..nodes).all(|s| graph.follow_path(s, &pair[0]) == graph.follow_path(s, &pair[1]))
        })
    }

    fn name(&self) -> &str {
        "faithful"
    }
}
