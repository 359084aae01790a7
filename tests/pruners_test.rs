// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Integration tests for pruners plugged into the search.

mod common;

use common::{graph_set, monoid};
use sims_search::{
    CustomPruner, FaithfulPruner, IdealPruner, LowIndexCongruences, Presentation, Pruner,
    Settings, Sims1, Sims2, SimsError, WordGraph, UNDEFINED,
};
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Undefine the edges of `graph` one at a time, last edge first, and check
/// that `pruner` accepts every intermediate graph.
fn assert_accepts_all_prefixes(pruner: &dyn Pruner, graph: &WordGraph) {
    let mut partial = graph.clone();
    for s in (0..graph.number_of_nodes() as u32).rev() {
        for a in (0..graph.out_degree()).rev() {
            partial.set_target(s, a, UNDEFINED);
            assert!(
                pruner.accepts(&partial),
                "{} accepted {:?} but rejected {:?}",
                pruner.name(),
                graph,
                partial
            );
        }
    }
}

#[test]
fn test_ideal_pruner_finds_rees_congruences() {
    let p = monoid(1, &[(&[0, 0, 0, 0], &[0, 0])]);
    let all = Sims1::new(p.clone()).unwrap();
    assert_eq!(all.number_of_congruences(4).unwrap(), 6);

    let mut settings = Settings::with_presentation(p.clone()).unwrap();
    settings.add_pruner(IdealPruner::new(&p).unwrap());
    assert_eq!(Sims1::from_settings(settings.clone()).number_of_congruences(4).unwrap(), 4);
    assert_eq!(Sims2::from_settings(settings).number_of_congruences(4).unwrap(), 4);
}

#[test]
fn test_ideal_pruner_is_monotone() {
    let p = monoid(2, &[(&[0, 0], &[0]), (&[1, 1], &[1]), (&[0, 1, 0], &[0, 1])]);
    let pruner = IdealPruner::new(&p).unwrap();
    let sims = Sims2::new(p).unwrap();
    let graphs = graph_set(&sims, 4);
    let accepted: Vec<&WordGraph> = graphs.iter().filter(|g| pruner.accepts(g)).collect();
    assert!(!accepted.is_empty());
    for g in accepted {
        assert_accepts_all_prefixes(&pruner, g);
    }
}

#[test]
fn test_ideal_pruner_requires_completion() {
    let p = monoid(2, &[(&[0, 1], &[1, 1, 0])]);
    let result = IdealPruner::with_max_rules(&p, 0);
    assert!(matches!(result, Err(SimsError::RewritingIncomplete { .. })));
}

#[test]
fn test_ideal_pruner_gives_up_on_infinite_completion() {
    // abb = bab has no finite complete shortlex rewriting system.
    let p = monoid(2, &[(&[0, 1, 1], &[1, 0, 1])]);
    let start = Instant::now();
    let result = IdealPruner::new(&p);
    assert!(matches!(result, Err(SimsError::RewritingIncomplete { .. })));
    assert!(start.elapsed() < Duration::from_secs(10));
}

#[test]
fn test_faithful_pruner() {
    // In <a | a^3 = a>, forbidding (a, a^2) leaves the congruences whose
    // action tells a apart from a^2.
    let p = monoid(1, &[(&[0, 0, 0], &[0])]);
    let all = graph_set(&Sims1::new(p.clone()).unwrap(), 3);

    let pruner = FaithfulPruner::new(&p, vec![vec![0], vec![0, 0]]).unwrap();
    let mut settings = Settings::with_presentation(p).unwrap();
    settings.add_pruner(pruner.clone());
    let faithful = graph_set(&Sims1::from_settings(settings), 3);

    assert!(faithful.len() < all.len());
    for g in &all {
        assert_eq!(faithful.contains(g), pruner.accepts(g));
    }
    for g in &faithful {
        assert_accepts_all_prefixes(&pruner, g);
    }
}

#[test]
fn test_custom_pruner_and_removal() {
    let p = monoid(2, &[(&[0, 1], &[1, 0])]);
    let mut settings = Settings::with_presentation(p).unwrap();
    settings.add_pruner(CustomPruner::new("a fixes the root", |g: &WordGraph| {
        let t = g.target(0, 0);
        t == UNDEFINED || t == 0
    }));
    let pruned = Sims1::from_settings(settings.clone()).number_of_congruences(3).unwrap();
    settings.remove_pruner(0).unwrap();
    let unpruned = Sims1::from_settings(settings).number_of_congruences(3).unwrap();
    assert!(pruned < unpruned);
    assert!(pruned > 0);
}

#[test]
fn test_pruned_branches_are_counted() {
    let p = monoid(1, &[(&[0, 0, 0, 0], &[0, 0])]);
    let mut settings = Settings::with_presentation(p.clone()).unwrap();
    settings.add_shared_pruner(Arc::new(IdealPruner::new(&p).unwrap()));
    let sims = Sims1::from_settings(settings);
    sims.number_of_congruences(4).unwrap();
    assert!(sims.stats().rejections(sims_search::propagation::Rejection::Pruned) > 0);
}

#[test]
fn test_pruner_panic_is_raised_for_any_thread_count() {
    let mut settings = Settings::with_presentation(Presentation::monoid(2)).unwrap();
    settings.add_pruner(CustomPruner::new("panics on three nodes", |g: &WordGraph| {
        assert!(g.number_of_nodes() < 3, "three nodes");
        true
    }));
    for threads in [1, 4] {
        settings.set_number_of_threads(threads).unwrap();
        let sims = Sims1::from_settings(settings.clone());
        let result = panic::catch_unwind(AssertUnwindSafe(|| sims.number_of_congruences(3)));
        assert!(result.is_err(), "no panic with {} threads", threads);
    }
}
