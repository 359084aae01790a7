// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Low-index congruence enumeration.
//!
//! [`Sims1`] enumerates right congruences and [`Sims2`] two-sided
//! congruences of the semigroup or monoid defined by a presentation. Both
//! implement [`LowIndexCongruences`], which provides the four ways to run a
//! search for congruences with at most `n` classes:
//!
//! - [`LowIndexCongruences::number_of_congruences`]
//! - [`LowIndexCongruences::for_each`]
//! - [`LowIndexCongruences::find_if`]
//! - [`LowIndexCongruences::iter`], lazy and single-threaded
//!
//! Each congruence is reported as its word graph: node `i` is a class, and
//! the edge labelled `a` from the class of `w` goes to the class of `wa`.
//! For a semigroup presentation the graph has one extra node, node 0, for
//! the adjoined identity.

use crate::context::{CongruenceKind, SearchMemo};
use crate::engine::{SearchEngine, StepResult};
use crate::error::{Result, SimsError};
use crate::parallel::ThreadRunner;
use crate::presentation::Presentation;
use crate::settings::Settings;
use crate::state::Stats;
use crate::word_graph::WordGraph;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

/// The operations shared by [`Sims1`] and [`Sims2`].
pub trait LowIndexCongruences {
    fn kind(&self) -> CongruenceKind;

    fn settings(&self) -> &Settings;

    /// Statistics of the most recent search. Zeroed when a search starts.
    fn stats(&self) -> &Stats;

    /// Check `n` and the presentation, zero the statistics, and build the
    /// memo for a search.
    fn memo(&self, n: usize) -> Result<SearchMemo<'_>> {
        if n == 0 {
            return Err(SimsError::InvalidArgument(
                "the number of classes must be at least 1".into(),
            ));
        }
        if self.settings().presentation().is_empty() {
            return Err(SimsError::NotInitialized);
        }
        self.stats().zero();
        Ok(SearchMemo::new(self.settings(), self.stats(), self.kind(), n))
    }

    /// Number of congruences with at most `n` classes.
    fn number_of_congruences(&self, n: usize) -> Result<u64> {
        let count = AtomicU64::new(0);
        self.for_each(n, |_| {
            count.fetch_add(1, Ordering::Relaxed);
        })?;
        Ok(count.into_inner())
    }

    /// Call `f` once for the word graph of every congruence with at most
    /// `n` classes. With more than one thread, `f` is called concurrently
    /// and in no particular order.
    fn for_each<F>(&self, n: usize, f: F) -> Result<()>
    where
        F: Fn(&WordGraph) + Sync,
    {
        let memo = self.memo(n)?;
        debug!(kind = ?self.kind(), n, settings = ?self.settings(), "starting search");
        ThreadRunner::new(memo).run(|graph| {
            f(graph);
            false
        });
        debug!(found = self.stats().count_now(), "search finished");
        Ok(())
    }

    /// The word graph of some congruence with at most `n` classes accepted
    /// by `pred`, or `None`. With one thread it is the first in search
    /// order; with more, any of them.
    fn find_if<F>(&self, n: usize, pred: F) -> Result<Option<WordGraph>>
    where
        F: Fn(&WordGraph) -> bool + Sync,
    {
        let memo = self.memo(n)?;
        debug!(kind = ?self.kind(), n, settings = ?self.settings(), "starting find_if");
        let result: Mutex<Option<WordGraph>> = Mutex::new(None);
        ThreadRunner::new(memo).run(|graph| {
            if !pred(graph) {
                return false;
            }
            let mut slot = result.lock();
            if slot.is_none() {
                *slot = Some(graph.clone());
            }
            true
        });
        let result = result.into_inner();
        debug!(found = result.is_some(), "find_if finished");
        Ok(result)
    }

    /// Lazily yield the word graph of every congruence with at most `n`
    /// classes, in search order, on the calling thread.
    fn iter(&self, n: usize) -> Result<Iter<'_>> {
        let memo = self.memo(n)?;
        Ok(Iter {
            engine: SearchEngine::new(memo),
            stats: self.stats(),
            started: false,
        })
    }
}

/// Iterator returned by [`LowIndexCongruences::iter`].
#[derive(Debug)]
pub struct Iter<'a> {
    engine: SearchEngine<'a>,
    stats: &'a Stats,
    started: bool,
}

impl Iterator for Iter<'_> {
    type Item = WordGraph;

    fn next(&mut self) -> Option<WordGraph> {
        if !self.started {
            self.started = true;
            if self.engine.init() == StepResult::Complete {
                self.stats.record_congruence();
                return Some(self.engine.accepted_graph());
            }
        }
        while let Some(pd) = self.engine.try_pop() {
            if self.engine.try_define(pd) == StepResult::Complete {
                self.stats.record_congruence();
                return Some(self.engine.accepted_graph());
            }
        }
        None
    }
}

macro_rules! low_index_search {
    ($name:ident, $kind:expr, $doc:literal) => {
        #[doc = $doc]
        #[derive(Debug, Clone)]
        pub struct $name {
            settings: Settings,
            stats: Stats,
        }

        impl $name {
            pub fn new(presentation: Presentation) -> Result<Self> {
                Ok(Self::from_settings(Settings::with_presentation(presentation)?))
            }

            pub fn from_settings(settings: Settings) -> Self {
                Self {
                    settings,
                    stats: Stats::new(),
                }
            }

            pub fn settings_mut(&mut self) -> &mut Settings {
                &mut self.settings
            }
        }

        impl LowIndexCongruences for $name {
            fn kind(&self) -> CongruenceKind {
                $kind
            }

            fn settings(&self) -> &Settings {
                &self.settings
            }

            fn stats(&self) -> &Stats {
                &self.stats
            }
        }
    };
}

low_index_search!(
    Sims1,
    CongruenceKind::OneSided,
    "Enumerates right congruences of bounded index."
);

low_index_search!(
    Sims2,
    CongruenceKind::TwoSided,
    "Enumerates two-sided congruences of bounded index."
);
