// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Finite presentations of semigroups and monoids.
//!
//! A presentation is an alphabet `0..alphabet_size` and a flat list of rule
//! words `lhs0, rhs0, lhs1, rhs1, ...`. The search only ever reads a
//! presentation; all checks happen when it is built or handed to
//! [`crate::Settings`].

pub mod rewriting;

pub use rewriting::RewritingSystem;

use crate::error::{Result, SimsError};

/// A generator index.
pub type Letter = usize;

/// A word over the alphabet.
pub type Word = Vec<Letter>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Presentation {
    alphabet_size: usize,
    rules: Vec<Word>,
    contains_empty_word: bool,
}

impl Presentation {
    /// A monoid presentation: the empty word is a valid word.
    pub fn monoid(alphabet_size: usize) -> Self {
        Self {
            alphabet_size,
            rules: Vec::new(),
            contains_empty_word: true,
        }
    }

    /// A semigroup presentation: every word is non-empty.
    pub fn semigroup(alphabet_size: usize) -> Self {
        Self {
            alphabet_size,
            rules: Vec::new(),
            contains_empty_word: false,
        }
    }

    pub fn alphabet_size(&self) -> usize {
        self.alphabet_size
    }

    pub fn contains_empty_word(&self) -> bool {
        self.contains_empty_word
    }

    /// The rule words, laid out as consecutive `(lhs, rhs)` pairs.
    pub fn rules(&self) -> &[Word] {
        &self.rules
    }

    pub fn number_of_rules(&self) -> usize {
        self.rules.len() / 2
    }

    /// Sum of the lengths of all rule words.
    pub fn length(&self) -> usize {
        self.rules.iter().map(Vec::len).sum()
    }

    /// No generators and no relations. Such a presentation cannot be searched.
    pub fn is_empty(&self) -> bool {
        self.alphabet_size == 0 && self.rules.is_empty()
    }

    pub fn add_rule(&mut self, lhs: &[Letter], rhs: &[Letter]) -> Result<&mut Self> {
        self.validate_word(lhs)?;
        self.validate_word(rhs)?;
        self.rules.push(lhs.to_vec());
        self.rules.push(rhs.to_vec());
        Ok(self)
    }

    /// Check that every letter of `word` is in the alphabet, and that `word`
    /// is non-empty for a semigroup presentation.
    pub fn validate_word(&self, word: &[Letter]) -> Result<()> {
        if word.is_empty() && !self.contains_empty_word {
            return Err(SimsError::InvalidPresentation(
                "the empty word is not allowed in a semigroup presentation".into(),
            ));
        }
        if let Some(&letter) = word.iter().find(|&&x| x >= self.alphabet_size) {
            return Err(SimsError::InvalidPresentation(format!(
                "letter {} is out of range for an alphabet of size {}",
                letter, self.alphabet_size
            )));
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.rules.len() % 2 != 0 {
            return Err(SimsError::InvalidPresentation(format!(
                "expected an even number of rule words, found {}",
                self.rules.len()
            )));
        }
        self.rules.iter().try_for_each(|w| self.validate_word(w))
    }

    /// Remove trivial rules `u = u` and repeated rules, keeping the first
    /// occurrence of each (treating `u = v` and `v = u` as the same rule).
    pub fn remove_duplicate_rules(&mut self) {
        let mut kept: Vec<Word> = Vec::with_capacity(self.rules.len());
        for pair in self.rules.chunks_exact(2) {
            let (lhs, rhs) = (&pair[0], &pair[1]);
            if lhs == rhs {
                continue;
            }
            let seen = kept
                .chunks_exact(2)
                .any(|k| (&k[0] == lhs && &k[1] == rhs) || (&k[0] == rhs && &k[1] == lhs));
            if !seen {
                kept.push(lhs.clone());
                kept.push(rhs.clone());
            }
        }
        self.rules = kept;
    }

    /// Stably move every rule with `|lhs| + |rhs| >= len` to the end.
    ///
    /// Returns the index (into [`Presentation::rules`]) of the first moved word.
    pub fn reorder_long_rules(&mut self, len: usize) -> usize {
        let (short, long): (Vec<&[Word]>, Vec<&[Word]>) = self
            .rules
            .chunks_exact(2)
            .partition(|pair| pair[0].len() + pair[1].len() < len);
        let split = 2 * short.len();
        let reordered: Vec<Word> = short
            .into_iter()
            .chain(long)
            .flat_map(|pair| pair.iter().cloned())
            .collect();
        self.rules = reordered;
        split
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_presentation() {
        assert!(Presentation::default().is_empty());
        assert!(Presentation::monoid(0).is_empty());
        assert!(!Presentation::monoid(1).is_empty());
    }

    #[test]
    fn test_add_rule_validates_letters() {
        let mut p = Presentation::monoid(2);
        assert!(p.add_rule(&[0, 1], &[1, 0]).is_ok());
        assert!(matches!(
            p.add_rule(&[0, 2], &[1]),
            Err(SimsError::InvalidPresentation(_))
        ));
        assert_eq!(p.number_of_rules(), 1);
    }

    #[test]
    fn test_semigroup_rejects_empty_word() {
        let mut p = Presentation::semigroup(1);
        assert!(p.add_rule(&[0, 0], &[]).is_err());
        let mut m = Presentation::monoid(1);
        assert!(m.add_rule(&[0, 0], &[]).is_ok());
    }

    #[test]
    fn test_remove_duplicate_rules() {
        let mut p = Presentation::monoid(2);
        p.add_rule(&[0, 0], &[0]).unwrap();
        p.add_rule(&[1], &[1]).unwrap();
        p.add_rule(&[0], &[0, 0]).unwrap();
        p.add_rule(&[1, 1], &[1]).unwrap();
        p.remove_duplicate_rules();
        assert_eq!(p.rules(), &[vec![0, 0], vec![0], vec![1, 1], vec![1]]);
    }

    #[test]
    fn test_reorder_long_rules() {
        let mut p = Presentation::monoid(2);
        p.add_rule(&[0, 0, 0, 0], &[0]).unwrap();
        p.add_rule(&[1, 1], &[1]).unwrap();
        p.add_rule(&[0, 1], &[1, 0]).unwrap();
        let split = p.reorder_long_rules(4);
        assert_eq!(split, 2);
        assert_eq!(
            p.rules(),
            &[
                vec![1, 1],
                vec![1],
                vec![0, 0, 0, 0],
                vec![0],
                vec![0, 1],
                vec![1, 0]
            ]
        );
    }

    #[test]
    fn test_validate_odd_rules() {
        let p = Presentation {
            alphabet_size: 1,
            rules: vec![vec![0]],
            contains_empty_word: true,
        };
        assert!(p.validate().is_err());
    }
}
