// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Reasons a branch of the search is cut.

use std::fmt;
use strum_macros::EnumCount as EnumCountMacro;

/// Why a partial word graph was rejected.
///
/// These are not errors: every rejection just backtracks. They are counted
/// per cause in [`crate::Stats`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumCountMacro)]
#[repr(u8)]
pub enum Rejection {
    /// Both sides of a short rule are defined at some node and end apart.
    ShortRule,

    /// Both sides of an included pair are defined and end apart.
    IncludedPair,

    /// Both sides of an excluded pair are defined from the root and meet.
    ExcludedPair,

    /// A pair generated by a non-tree edge fails at some node.
    TwoSided,

    /// A long rule fails on a complete graph.
    LongRule,

    /// A pruner rejected the graph.
    Pruned,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Rejection::ShortRule => "short rule not satisfied",
            Rejection::IncludedPair => "included pair not satisfied",
            Rejection::ExcludedPair => "excluded pair satisfied",
            Rejection::TwoSided => "not compatible with left multiplication",
            Rejection::LongRule => "long rule not satisfied",
            Rejection::Pruned => "rejected by pruner",
        };
        write!(f, "{}", text)
    }
}
