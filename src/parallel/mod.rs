// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Work distribution across worker threads.
//!
//! Every worker owns a [`SearchEngine`] behind a mutex. The owner pops
//! pending definitions from the back of its frontier and installs them. A
//! worker with an empty frontier steals the front half of another worker's
//! frontier, together with a copy of that worker's graph. A worker never
//! holds two locks at once: the victim is locked while the work is split
//! off, then released before the thief locks its own engine.
//!
//! A worker stops once its frontier is empty and it has failed to steal
//! `idle_thread_restarts` times, or as soon as the search is cancelled. A
//! panic in any worker is raised again on the calling thread once every
//! worker has stopped.

use crate::context::SearchMemo;
use crate::engine::{SearchEngine, StepResult};
use crate::word_graph::WordGraph;
use parking_lot::Mutex;
use std::panic;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;
use tracing::{debug, info, trace, Level};

const REPORT_INTERVAL: Duration = Duration::from_secs(1);

/// Runs one search to exhaustion or cancellation.
///
/// `hook` is called once for every accepted graph, from whichever thread
/// found it, with no lock held. Returning `true` cancels the search:
/// workers finish the definition they are installing and start no more.
pub(crate) struct ThreadRunner<'a> {
    memo: SearchMemo<'a>,
    workers: Vec<Mutex<SearchEngine<'a>>>,
    done: AtomicBool,
}

impl<'a> ThreadRunner<'a> {
    pub fn new(memo: SearchMemo<'a>) -> Self {
        let num_threads = memo.settings.number_of_threads();
        Self {
            workers: (0..num_threads)
                .map(|_| Mutex::new(SearchEngine::new(memo)))
                .collect(),
            memo,
            done: AtomicBool::new(false),
        }
    }

    pub fn run<F>(&self, hook: F)
    where
        F: Fn(&WordGraph) -> bool + Sync,
    {
        let root = {
            let mut engine = self.workers[0].lock();
            match engine.init() {
                StepResult::Complete => Some(engine.accepted_graph()),
                _ => None,
            }
        };
        if let Some(graph) = root {
            self.found(&graph, &hook);
            return;
        }

        let report = tracing::enabled!(Level::INFO);
        if self.workers.len() == 1 && !report {
            self.work(0, &hook);
            return;
        }

        let finished = AtomicBool::new(false);
        let panicked = thread::scope(|scope| {
            let reporter = report.then(|| scope.spawn(|| self.report_progress(&finished)));
            let handles: Vec<_> = (0..self.workers.len())
                .map(|i| {
                    let hook = &hook;
                    scope.spawn(move || self.work(i, hook))
                })
                .collect();
            let mut panicked = None;
            for (worker, handle) in handles.into_iter().enumerate() {
                if let Err(payload) = handle.join() {
                    debug!(worker, "worker thread panicked");
                    self.done.store(true, Ordering::Release);
                    panicked.get_or_insert(payload);
                }
            }
            finished.store(true, Ordering::Release);
            if let Some(reporter) = reporter {
                reporter.thread().unpark();
            }
            panicked
        });
        // A worker's frontier dies with it, so the search cannot report a
        // result. Fail the same way a single-threaded search does.
        if let Some(payload) = panicked {
            panic::resume_unwind(payload);
        }
    }

    fn found<F>(&self, graph: &WordGraph, hook: &F)
    where
        F: Fn(&WordGraph) -> bool + Sync,
    {
        self.memo.stats.record_congruence();
        if hook(graph) {
            self.done.store(true, Ordering::Release);
        }
    }

    fn work<F>(&self, me: usize, hook: &F)
    where
        F: Fn(&WordGraph) -> bool + Sync,
    {
        let mut idle_rounds = 0;
        while !self.done.load(Ordering::Acquire) {
            let step = {
                let mut engine = self.workers[me].lock();
                engine.try_pop().map(|pd| match engine.try_define(pd) {
                    StepResult::Complete => Some(engine.accepted_graph()),
                    _ => None,
                })
            };
            match step {
                Some(Some(graph)) => self.found(&graph, hook),
                Some(None) => {}
                None if self.workers.len() == 1 => break,
                None => {
                    if !self.steal(me) {
                        idle_rounds += 1;
                        if idle_rounds >= self.memo.settings.idle_thread_restarts() {
                            break;
                        }
                        thread::yield_now();
                    }
                }
            }
        }
        trace!(worker = me, idle_rounds, "worker finished");
    }

    /// Take half the frontier of the first other worker that has any.
    fn steal(&self, me: usize) -> bool {
        let n = self.workers.len();
        for victim in (1..n).map(|k| (me + k) % n) {
            let loot = self.workers[victim].lock().split_off();
            if let Some((ctx, pending)) = loot {
                trace!(worker = me, victim, stolen = pending.len(), "stole work");
                self.workers[me].lock().install(ctx, pending);
                return true;
            }
        }
        false
    }

    fn report_progress(&self, finished: &AtomicBool) {
        let stats = self.memo.stats;
        loop {
            thread::park_timeout(REPORT_INTERVAL);
            if finished.load(Ordering::Acquire) {
                break;
            }
            let count = stats.count_now();
            let new = count.saturating_sub(stats.count_last());
            let pending = stats.total_pending_now();
            let new_pending = pending.saturating_sub(stats.total_pending_last());
            stats.checkpoint();
            info!(
                found = count,
                new,
                total_pending = pending,
                new_pending,
                max_pending = stats.max_pending(),
                "searching for congruences"
            );
        }
    }
}
