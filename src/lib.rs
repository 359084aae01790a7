// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Low-index congruence search for finitely presented semigroups and monoids.
//!
//! Given a presentation and a bound `n`, the search finds every right (or
//! two-sided) congruence with at most `n` classes, each reported as a
//! complete [`WordGraph`]. It is a depth-first backtracking search over
//! partial word graphs, in the style of Sims' low-index subgroups algorithm.
//!
//! # Architecture
//!
//! The implementation separates data that is shared and read-only during a
//! search from data each worker mutates:
//!
//! ## Shared (immutable during a search)
//!
//! - [`Settings`]: presentation, short/long rule split, included and
//!   excluded pairs, pruners, thread count
//! - [`Stats`]: atomic counters, written by every worker
//!
//! ## Per worker (mutable, tracked on the trail)
//!
//! - the partial word graph and its [`Trail`] of defined edges
//! - the spanning tree recording which edge created each node
//! - the frontier of pending definitions
//!
//! # Search Algorithm
//!
//! Each step pops a pending definition, rewinds the trail to where it was
//! created, defines the edge, and propagates: short rules and included pairs
//! force further edges, and any contradiction cuts the branch. Pruners then
//! get a chance to reject the partial graph. The children of the next
//! undefined edge are pushed, or, if the graph is complete, the long rules
//! are checked and the graph is yielded.
//!
//! # Parallelization
//!
//! With more than one thread each worker runs its own engine and idle
//! workers steal half of a busy worker's frontier. The set of congruences
//! found does not depend on the number of threads.
//!
//! # Example
//!
//! ```
//! use sims_search::{LowIndexCongruences, Presentation, Sims1};
//!
//! let mut p = Presentation::monoid(1);
//! p.add_rule(&[0, 0], &[0]).unwrap();
//! let sims = Sims1::new(p).unwrap();
//! assert_eq!(sims.number_of_congruences(3).unwrap(), 2);
//! ```

pub mod context;
pub mod engine;
pub mod error;
mod parallel;
pub mod presentation;
pub mod propagation;
pub mod pruners;
pub mod rep_orc;
pub mod settings;
pub mod sims;
pub mod state;
pub mod trail;
pub mod word_graph;

// Re-export commonly used types
pub use context::CongruenceKind;
pub use error::{Result, SimsError};
pub use presentation::{Letter, Presentation, Word};
pub use pruners::{CustomPruner, FaithfulPruner, IdealPruner, Pruner};
pub use rep_orc::{MinimalRepOrc, RepOrc};
pub use settings::Settings;
pub use sims::{LowIndexCongruences, Sims1, Sims2};
pub use state::Stats;
pub use trail::Trail;
pub use word_graph::{Node, WordGraph, UNDEFINED};
