// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Small transformation representations from right congruences.
//!
//! Every right congruence with finitely many classes gives an action of the
//! presented semigroup on its classes by right multiplication. When that
//! action generates a semigroup of the intended size, the word graph is a
//! representation of that size.
//!
//! - [`RepOrc`]: find some representation with a number of classes in a
//!   given range
//! - [`MinimalRepOrc`]: shrink the number of classes until no smaller
//!   representation is found

pub mod transf;

use crate::error::Result;
use crate::settings::Settings;
use crate::sims::{LowIndexCongruences, Sims1};
use crate::word_graph::WordGraph;
use tracing::debug;

/// Searches right congruences for a representation of a given size.
#[derive(Debug, Clone)]
pub struct RepOrc {
    settings: Settings,
    min_nodes: usize,
    max_nodes: usize,
    target_size: usize,
}

impl RepOrc {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            min_nodes: 0,
            max_nodes: 0,
            target_size: 0,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }

    pub fn min_nodes(&self) -> usize {
        self.min_nodes
    }

    pub fn set_min_nodes(&mut self, val: usize) -> &mut Self {
        self.min_nodes = val;
        self
    }

    pub fn max_nodes(&self) -> usize {
        self.max_nodes
    }

    pub fn set_max_nodes(&mut self, val: usize) -> &mut Self {
        self.max_nodes = val;
        self
    }

    pub fn target_size(&self) -> usize {
        self.target_size
    }

    pub fn set_target_size(&mut self, val: usize) -> &mut Self {
        self.target_size = val;
        self
    }

    /// The word graph of a right congruence with between `min_nodes` and
    /// `max_nodes` classes whose action generates exactly `target_size`
    /// elements, or [`WordGraph::empty`] if there is none.
    ///
    /// For a monoid presentation the identity is counted. For a semigroup
    /// presentation the reserved node 0 is left out of the action.
    pub fn word_graph(&self) -> Result<WordGraph> {
        if self.max_nodes == 0 || self.min_nodes > self.max_nodes {
            return Ok(WordGraph::empty());
        }
        let sims = Sims1::from_settings(self.settings.clone());
        let monoid = self.settings.presentation().contains_empty_word();
        let offset = usize::from(!monoid);
        debug!(
            min_nodes = self.min_nodes,
            max_nodes = self.max_nodes,
            target_size = self.target_size,
            "searching for a representation"
        );
        let found = sims.find_if(self.max_nodes, |graph| {
            let classes = graph.number_of_nodes() - offset;
            classes >= self.min_nodes
                && transf::semigroup_size(
                    classes,
                    &transf::letter_actions(graph, offset),
                    monoid,
                    self.target_size,
                ) == self.target_size
        })?;
        Ok(found.unwrap_or_else(WordGraph::empty))
    }
}

/// Finds a representation of a given size with as few classes as the
/// search can manage.
#[derive(Debug, Clone)]
pub struct MinimalRepOrc {
    settings: Settings,
    target_size: usize,
}

impl MinimalRepOrc {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            target_size: 0,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }

    pub fn target_size(&self) -> usize {
        self.target_size
    }

    pub fn set_target_size(&mut self, val: usize) -> &mut Self {
        self.target_size = val;
        self
    }

    /// Run [`RepOrc`] with at most `target_size` classes, then repeatedly
    /// with one class fewer than the last result, until nothing is found.
    ///
    /// Returns the last graph found, or [`WordGraph::empty`].
    pub fn word_graph(&self) -> Result<WordGraph> {
        let offset = usize::from(!self.settings.presentation().contains_empty_word());
        let mut rep_orc = RepOrc::new(self.settings.clone());
        rep_orc
            .set_min_nodes(1)
            .set_max_nodes(self.target_size)
            .set_target_size(self.target_size);
        let mut best = rep_orc.word_graph()?;
        if best.is_empty() {
            return Ok(best);
        }
        loop {
            let classes = best.number_of_nodes() - offset;
            if classes <= 1 {
                break;
            }
            rep_orc.set_max_nodes(classes - 1);
            let next = rep_orc.word_graph()?;
            if next.is_empty() {
                break;
            }
            best = next;
        }
        debug!(
            classes = best.number_of_nodes() - offset,
            target_size = self.target_size,
            "minimal representation found"
        );
        Ok(best)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presentation::Presentation;

    fn settings(monoid: bool, rules: &[(&[usize], &[usize])]) -> Settings {
        let mut p = if monoid {
            Presentation::monoid(1)
        } else {
            Presentation::semigroup(1)
        };
        for (lhs, rhs) in rules {
            p.add_rule(lhs, rhs).unwrap();
        }
        Settings::with_presentation(p).unwrap()
    }

    #[test]
    fn test_trivial_representation() {
        let mut rep = RepOrc::new(settings(true, &[(&[0, 0], &[0])]));
        rep.set_min_nodes(1).set_max_nodes(5).set_target_size(1);
        assert_eq!(rep.word_graph().unwrap(), WordGraph::from_rows(&[vec![Some(0)]]));
    }

    #[test]
    fn test_semigroup_representation_has_reserved_node() {
        let mut rep = RepOrc::new(settings(false, &[(&[0, 0], &[0])]));
        rep.set_min_nodes(1).set_max_nodes(5).set_target_size(1);
        assert_eq!(
            rep.word_graph().unwrap(),
            WordGraph::from_rows(&[vec![Some(1)], vec![Some(1)]])
        );
    }

    #[test]
    fn test_monoid_without_generators() {
        let mut p = Presentation::monoid(0);
        p.add_rule(&[], &[]).unwrap();
        let mut rep = RepOrc::new(Settings::with_presentation(p).unwrap());
        rep.set_min_nodes(1).set_max_nodes(5).set_target_size(1);
        assert_eq!(rep.word_graph().unwrap(), WordGraph::from_rows(&[vec![]]));
    }

    #[test]
    fn test_empty_ranges() {
        let mut rep = RepOrc::new(settings(true, &[(&[0, 0], &[0])]));
        rep.set_min_nodes(3).set_max_nodes(2).set_target_size(2);
        assert!(rep.word_graph().unwrap().is_empty());
        rep.set_min_nodes(0).set_max_nodes(0);
        assert!(rep.word_graph().unwrap().is_empty());
    }

    #[test]
    fn test_no_representation_of_wrong_size() {
        let mut rep = RepOrc::new(settings(true, &[(&[0, 0], &[0])]));
        rep.set_min_nodes(1).set_max_nodes(4).set_target_size(3);
        assert!(rep.word_graph().unwrap().is_empty());
    }

    #[test]
    fn test_minimal_rep_orc() {
        let mut minimal = MinimalRepOrc::new(settings(true, &[(&[0, 0, 0, 0], &[0, 0])]));
        minimal.set_target_size(4);
        assert_eq!(minimal.word_graph().unwrap().number_of_nodes(), 4);

        let mut minimal = MinimalRepOrc::new(settings(true, &[(&[0, 0], &[0])]));
        minimal.set_target_size(2);
        assert_eq!(minimal.word_graph().unwrap().number_of_nodes(), 2);
    }
}
