// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Pruners: monotone filters on partial word graphs.
//!
//! The engine runs every pruner after each successful definition and
//! backtracks as soon as one rejects. A pruner must be monotone: if it
//! rejects a graph it must also reject every graph obtained by defining
//! more edges or adding more nodes. This is never checked; a pruner that
//! breaks it silently loses congruences.

pub mod faithful;
pub mod ideals;

pub use faithful::FaithfulPruner;
pub use ideals::IdealPruner;

use crate::word_graph::WordGraph;
use std::fmt;

/// A monotone predicate on partial word graphs.
///
/// Pruners are shared by every worker thread, so `accepts` takes `&self`.
pub trait Pruner: Send + Sync {
    /// `false` if no completion of `graph` can be accepted.
    fn accepts(&self, graph: &WordGraph) -> bool;

    /// Optional: a name for logging. Defaults to the type name.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// A pruner defined by a closure.
pub struct CustomPruner<F> {
    name: String,
    f: F,
}

impl<F> CustomPruner<F>
where
    F: Fn(&WordGraph) -> bool + Send + Sync,
{
    pub fn new(name: &str, f: F) -> Self {
        Self {
            name: String::from(name),
            f,
        }
    }
}

impl<F> Pruner for CustomPruner<F>
where
    F: Fn(&WordGraph) -> bool + Send + Sync,
{
    fn accepts(&self, graph: &WordGraph) -> bool {
        (self.f)(graph)
    }

    fn name(&self) -> &str {
        self.name.as_str()
    }
}

impl<F> fmt::Debug for CustomPruner<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomPruner").field("name", &self.name).finish()
    }
}
