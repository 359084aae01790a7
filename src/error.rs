// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Error types for configuring and starting a congruence search.
//!
//! Errors are only ever raised before a search starts. Branches cut during
//! the search are not errors, see [`crate::propagation::Rejection`].

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SimsError {
    #[error("invalid presentation: {0}")]
    InvalidPresentation(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("no presentation has been set (0 generators and 0 relations)")]
    NotInitialized,

    #[error(
        "Knuth-Bendix completion did not finish within {max_rules} rules \
         of length at most {max_rule_length}"
    )]
    RewritingIncomplete {
        max_rules: usize,
        max_rule_length: usize,
    },
}

pub type Result<T> = std::result::Result<T, SimsError>;
