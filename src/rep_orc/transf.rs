// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Transformations of `0..degree` and the size of the semigroup they
//! generate.

use crate::word_graph::{Node, WordGraph};
use std::collections::{HashSet, VecDeque};

/// A transformation, stored as its image list.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Transf(Vec<Node>);

impl Transf {
    pub fn new(images: Vec<Node>) -> Self {
        Self(images)
    }

    pub fn identity(degree: usize) -> Self {
        Self((0..degree as Node).collect())
    }

    pub fn degree(&self) -> usize {
        self.0.len()
    }

    pub fn images(&self) -> &[Node] {
        &self.0
    }

    /// Apply `self`, then `other`.
    pub fn then(&self, other: &Transf) -> Transf {
        Transf(self.0.iter().map(|&x| other.0[x as usize]).collect())
    }
}

/// The action of each letter on nodes `offset..N` of a complete word graph,
/// renumbered to start at 0.
pub fn letter_actions(graph: &WordGraph, offset: usize) -> Vec<Transf> {
    let nodes = graph.number_of_nodes();
    (0..graph.out_degree())
        .map(|a| {
            Transf(
                (offset..nodes)
                    .map(|s| graph.target(s as Node, a) - offset as Node)
                    .collect(),
            )
        })
        .collect()
}

/// Size of the semigroup generated by `generators`, transformations of
/// `0..degree`, with the identity adjoined if `include_identity`.
///
/// Stops as soon as the size exceeds `limit` and returns `limit + 1`.
pub fn semigroup_size(
    degree: usize,
    generators: &[Transf],
    include_identity: bool,
    limit: usize,
) -> usize {
    debug_assert!(generators.iter().all(|g| g.degree() == degree));
    let mut elements: HashSet<Transf> = HashSet::new();
    let mut queue: VecDeque<Transf> = VecDeque::new();
    if include_identity {
        elements.insert(Transf::identity(degree));
    }
    for g in generators {
        if elements.insert(g.clone()) {
            queue.push_back(g.clone());
        }
        if elements.len() > limit {
            return limit + 1;
        }
    }
    while let Some(x) = queue.pop_front() {
        for g in generators {
            let y = x.then(g);
            if !elements.contains(&y) {
                elements.insert(y.clone());
                if elements.len() > limit {
                    return limit + 1;
                }
                queue.push_back(y);
            }
        }
    }
    elements.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_then() {
        let t = Transf::new(vec![1, 2, 2]);
        let u = Transf::new(vec![0, 0, 1]);
        assert_eq!(t.then(&u), Transf::new(vec![0, 1, 1]));
        assert_eq!(Transf::identity(3).then(&t), t);
    }

    #[test]
    fn test_cyclic_semigroup_size() {
        // 0 -> 1 -> 2 -> 3 -> 2 generates {t, t^2, t^3}.
        let t = Transf::new(vec![1, 2, 3, 2]);
        assert_eq!(semigroup_size(4, &[t.clone()], false, 100), 3);
        assert_eq!(semigroup_size(4, &[t.clone()], true, 100), 4);
        assert_eq!(semigroup_size(4, &[t], true, 2), 3);
    }

    #[test]
    fn test_full_transformation_monoid_of_degree_two() {
        let swap = Transf::new(vec![1, 0]);
        let collapse = Transf::new(vec![0, 0]);
        assert_eq!(semigroup_size(2, &[swap, collapse], true, 100), 4);
    }

    #[test]
    fn test_no_generators() {
        assert_eq!(semigroup_size(1, &[], true, 10), 1);
        assert_eq!(semigroup_size(1, &[], false, 10), 0);
        assert_eq!(semigroup_size(3, &[], true, 0), 1);
    }

    #[test]
    fn test_letter_actions_skip_reserved_node() {
        let g = WordGraph::from_rows(&[vec![Some(1)], vec![Some(2)], vec![Some(2)]]);
        assert_eq!(letter_actions(&g, 1), vec![Transf::new(vec![1, 1])]);
        assert_eq!(letter_actions(&g, 0), vec![Transf::new(vec![1, 2, 2])]);
    }
}
