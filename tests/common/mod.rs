// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Common test utilities shared across integration tests.

#![allow(dead_code)]

use parking_lot::Mutex;
use sims_search::{Letter, LowIndexCongruences, Presentation, WordGraph};
use std::collections::HashSet;

/// A monoid presentation from `(lhs, rhs)` pairs.
pub fn monoid(alphabet_size: usize, rules: &[(&[Letter], &[Letter])]) -> Presentation {
    let mut p = Presentation::monoid(alphabet_size);
    for (lhs, rhs) in rules {
        p.add_rule(lhs, rhs).unwrap();
    }
    p
}

/// A semigroup presentation from `(lhs, rhs)` pairs.
pub fn semigroup(alphabet_size: usize, rules: &[(&[Letter], &[Letter])]) -> Presentation {
    let mut p = Presentation::semigroup(alphabet_size);
    for (lhs, rhs) in rules {
        p.add_rule(lhs, rhs).unwrap();
    }
    p
}

/// Every graph reported by `for_each`, checking none is reported twice.
pub fn graph_set<S: LowIndexCongruences>(sims: &S, n: usize) -> HashSet<WordGraph> {
    let found = Mutex::new(Vec::new());
    sims.for_each(n, |g| found.lock().push(g.clone())).unwrap();
    let found = found.into_inner();
    let set: HashSet<WordGraph> = found.iter().cloned().collect();
    assert_eq!(set.len(), found.len(), "a congruence was reported twice");
    set
}

/// Log to the test writer. Safe to call from several tests.
pub fn init_logging(filter: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(filter))
        .with_test_writer()
        .try_init();
}
