// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Configuration of a low-index congruence search.
//!
//! [`Settings`] holds everything a search reads and nothing it writes: the
//! presentation, the split between short and long rules, the included and
//! excluded pairs, the pruners, and the threading parameters. Every setter
//! validates eagerly and returns `&mut Self` so calls can be chained.

use crate::error::{Result, SimsError};
use crate::presentation::{Letter, Presentation, Word};
use crate::pruners::Pruner;
use std::fmt;
use std::sync::Arc;

pub const DEFAULT_NUMBER_OF_THREADS: usize = 1;
pub const DEFAULT_IDLE_THREAD_RESTARTS: usize = 64;

#[derive(Clone)]
pub struct Settings {
    presentation: Presentation,
    /// Index into the rule words of the first long rule.
    first_long_rule: usize,
    include: Vec<Word>,
    exclude: Vec<Word>,
    pruners: Vec<Arc<dyn Pruner>>,
    num_threads: usize,
    idle_thread_restarts: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            presentation: Presentation::default(),
            first_long_rule: 0,
            include: Vec::new(),
            exclude: Vec::new(),
            pruners: Vec::new(),
            num_threads: DEFAULT_NUMBER_OF_THREADS,
            idle_thread_restarts: DEFAULT_IDLE_THREAD_RESTARTS,
        }
    }
}

impl Settings {
    /// Settings with no presentation. A search on these fails with
    /// [`SimsError::NotInitialized`] until one is set.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_presentation(presentation: Presentation) -> Result<Self> {
        let mut settings = Self::default();
        settings.set_presentation(presentation)?;
        Ok(settings)
    }

    pub fn presentation(&self) -> &Presentation {
        &self.presentation
    }

    /// Replace the presentation. Every rule becomes a short rule.
    ///
    /// Fails if the presentation is empty or malformed, if included or
    /// excluded pairs are present and the alphabet size changes, or if pairs
    /// added before any presentation was set are not valid over it.
    pub fn set_presentation(&mut self, presentation: Presentation) -> Result<&mut Self> {
        if presentation.is_empty() {
            return Err(SimsError::InvalidPresentation(
                "expected at least one generator or relation".into(),
            ));
        }
        presentation.validate()?;
        // Pairs added before any presentation are only checked below.
        let has_pairs = !self.include.is_empty() || !self.exclude.is_empty();
        if has_pairs
            && !self.presentation.is_empty()
            && presentation.alphabet_size() != self.presentation.alphabet_size()
        {
            return Err(SimsError::InvalidPresentation(format!(
                "alphabet size {} does not match the included/excluded pairs (alphabet size {})",
                presentation.alphabet_size(),
                self.presentation.alphabet_size()
            )));
        }
        self.include
            .iter()
            .chain(&self.exclude)
            .try_for_each(|w| presentation.validate_word(w))?;
        self.first_long_rule = presentation.rules().len();
        self.presentation = presentation;
        Ok(self)
    }

    pub fn number_of_threads(&self) -> usize {
        self.num_threads
    }

    pub fn set_number_of_threads(&mut self, val: usize) -> Result<&mut Self> {
        if val == 0 {
            return Err(SimsError::InvalidArgument(
                "the number of threads must be at least 1".into(),
            ));
        }
        self.num_threads = val;
        Ok(self)
    }

    pub fn idle_thread_restarts(&self) -> usize {
        self.idle_thread_restarts
    }

    /// How many times an idle worker retries stealing before it stops.
    pub fn set_idle_thread_restarts(&mut self, val: usize) -> Result<&mut Self> {
        if val == 0 {
            return Err(SimsError::InvalidArgument(
                "the number of idle thread restarts must be at least 1".into(),
            ));
        }
        self.idle_thread_restarts = val;
        Ok(self)
    }

    // Short and long rules

    /// Index into [`Presentation::rules`] of the first long rule.
    pub fn first_long_rule_position(&self) -> usize {
        self.first_long_rule
    }

    /// Rules `[pos, end)` are only checked once a graph is complete.
    pub fn set_first_long_rule_position(&mut self, pos: usize) -> Result<&mut Self> {
        let len = self.presentation.rules().len();
        if pos > len {
            return Err(SimsError::InvalidArgument(format!(
                "long rule position {} is beyond the {} rule words",
                pos, len
            )));
        }
        if pos % 2 != 0 {
            return Err(SimsError::InvalidArgument(format!(
                "long rule position {} must be even",
                pos
            )));
        }
        self.first_long_rule = pos;
        Ok(self)
    }

    /// Make every rule with `|lhs| + |rhs| >= len` a long rule.
    ///
    /// The presentation's rules are reordered so that the long ones come last.
    pub fn long_rule_length(&mut self, len: usize) -> &mut Self {
        self.first_long_rule = self.presentation.reorder_long_rules(len);
        self
    }

    pub fn clear_long_rules(&mut self) -> &mut Self {
        self.first_long_rule = self.presentation.rules().len();
        self
    }

    pub fn number_of_long_rules(&self) -> usize {
        (self.presentation.rules().len() - self.first_long_rule) / 2
    }

    pub fn short_rules(&self) -> &[Word] {
        &self.presentation.rules()[..self.first_long_rule]
    }

    pub fn long_rules(&self) -> &[Word] {
        &self.presentation.rules()[self.first_long_rule..]
    }

    // Included and excluded pairs

    pub fn include(&self) -> &[Word] {
        &self.include
    }

    /// Every congruence found must contain `(lhs, rhs)`.
    pub fn add_include(&mut self, lhs: &[Letter], rhs: &[Letter]) -> Result<&mut Self> {
        Self::add_pairs(&self.presentation, &mut self.include, &[lhs.to_vec(), rhs.to_vec()])?;
        Ok(self)
    }

    pub fn add_include_list(&mut self, pairs: &[Word]) -> Result<&mut Self> {
        Self::add_pairs(&self.presentation, &mut self.include, pairs)?;
        Ok(self)
    }

    pub fn clear_include(&mut self) -> &mut Self {
        self.include.clear();
        self
    }

    pub fn exclude(&self) -> &[Word] {
        &self.exclude
    }

    /// No congruence found may contain `(lhs, rhs)`.
    pub fn add_exclude(&mut self, lhs: &[Letter], rhs: &[Letter]) -> Result<&mut Self> {
        Self::add_pairs(&self.presentation, &mut self.exclude, &[lhs.to_vec(), rhs.to_vec()])?;
        Ok(self)
    }

    pub fn add_exclude_list(&mut self, pairs: &[Word]) -> Result<&mut Self> {
        Self::add_pairs(&self.presentation, &mut self.exclude, pairs)?;
        Ok(self)
    }

    pub fn clear_exclude(&mut self) -> &mut Self {
        self.exclude.clear();
        self
    }

    /// Validate the whole of `pairs` before adding any of it.
    ///
    /// Words are only checked against a presentation once one is set;
    /// [`Settings::set_presentation`] checks any added before that.
    fn add_pairs(presentation: &Presentation, list: &mut Vec<Word>, pairs: &[Word]) -> Result<()> {
        if pairs.len() % 2 != 0 {
            return Err(SimsError::InvalidArgument(format!(
                "expected a list of pairs, found {} words",
                pairs.len()
            )));
        }
        if !presentation.is_empty() {
            pairs.iter().try_for_each(|w| {
                presentation.validate_word(w).map_err(|e| match e {
                    SimsError::InvalidPresentation(msg) => SimsError::InvalidArgument(msg),
                    other => other,
                })
            })?;
        }
        list.extend_from_slice(pairs);
        Ok(())
    }

    // Pruners

    pub fn pruners(&self) -> &[Arc<dyn Pruner>] {
        &self.pruners
    }

    pub fn add_pruner<P: Pruner + 'static>(&mut self, pruner: P) -> &mut Self {
        self.pruners.push(Arc::new(pruner));
        self
    }

    /// Add a pruner that is already shared, for example with other settings.
    pub fn add_shared_pruner(&mut self, pruner: Arc<dyn Pruner>) -> &mut Self {
        self.pruners.push(pruner);
        self
    }

    pub fn remove_pruner(&mut self, index: usize) -> Result<&mut Self> {
        if index >= self.pruners.len() {
            return Err(SimsError::InvalidArgument(format!(
                "no pruner at index {} ({} pruners)",
                index,
                self.pruners.len()
            )));
        }
        self.pruners.remove(index);
        Ok(self)
    }

    pub fn clear_pruners(&mut self) -> &mut Self {
        self.pruners.clear();
        self
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pruners: Vec<&str> = self.pruners.iter().map(|p| p.name()).collect();
        f.debug_struct("Settings")
            .field("presentation", &self.presentation)
            .field("first_long_rule", &self.first_long_rule)
            .field("include", &self.include)
            .field("exclude", &self.exclude)
            .field("pruners", &pruners)
            .field("num_threads", &self.num_threads)
            .field("idle_thread_restarts", &self.idle_thread_restarts)
            .finish()
    }
}
