// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Shortlex string rewriting and Knuth-Bendix completion.
//!
//! A confluent rewriting system gives every element of the presented
//! semigroup a unique normal form, which the ideal pruner walks through a
//! word graph. Completion is bounded: presentations whose completion is
//! infinite, or merely large, fail with [`SimsError::RewritingIncomplete`].

use super::{Letter, Presentation, Word};
use crate::error::{Result, SimsError};
use std::cmp::Ordering;
use tracing::debug;

/// Bound on the number of rules used when none is given.
pub const DEFAULT_MAX_REWRITING_RULES: usize = 4096;

/// Bound on the length of a rule's left-hand side used when none is given.
///
/// There are only finitely many rules under any length bound, so together
/// with the rule bound this makes completion stop on presentations whose
/// complete system is infinite.
pub const DEFAULT_MAX_RULE_LENGTH: usize = 256;

/// Shortlex order: shorter words first, then lexicographic.
pub fn shortlex_cmp(u: &[Letter], v: &[Letter]) -> Ordering {
    u.len().cmp(&v.len()).then_with(|| u.cmp(v))
}

#[derive(Debug, Clone)]
struct Rule {
    lhs: Word,
    rhs: Word,
    active: bool,
}

const NO_CHILD: u32 = u32::MAX;

/// Trie of the reversed left-hand sides, so the rule matching a suffix of a
/// word is found by walking the word backwards from its end.
#[derive(Debug, Clone)]
struct SuffixIndex {
    alphabet_size: usize,
    /// `children[node * alphabet_size + a]`, or [`NO_CHILD`].
    children: Vec<u32>,
    rule: Vec<Option<usize>>,
}

impl SuffixIndex {
    fn new(alphabet_size: usize) -> Self {
        Self {
            alphabet_size,
            children: vec![NO_CHILD; alphabet_size],
            rule: vec![None],
        }
    }

    fn insert(&mut self, lhs: &[Letter], rule: usize) {
        let mut node = 0;
        for &a in lhs.iter().rev() {
            let slot = node * self.alphabet_size + a;
            if self.children[slot] == NO_CHILD {
                self.children[slot] = self.rule.len() as u32;
                self.children
                    .extend(std::iter::repeat(NO_CHILD).take(self.alphabet_size));
                self.rule.push(None);
            }
            node = self.children[slot] as usize;
        }
        self.rule[node] = Some(rule);
    }

    fn remove(&mut self, lhs: &[Letter]) {
        let mut node = 0;
        for &a in lhs.iter().rev() {
            let child = self.children[node * self.alphabet_size + a];
            if child == NO_CHILD {
                return;
            }
            node = child as usize;
        }
        self.rule[node] = None;
    }

    /// The rule whose left-hand side is a suffix of `word`. In a reduced
    /// system there is at most one.
    fn suffix_match(&self, word: &[Letter]) -> Option<usize> {
        let mut node = 0;
        for &a in word.iter().rev() {
            let child = self.children[node * self.alphabet_size + a];
            if child == NO_CHILD {
                return None;
            }
            node = child as usize;
            if let Some(rule) = self.rule[node] {
                return Some(rule);
            }
        }
        None
    }
}

/// A reduced rewriting system, every rule oriented `lhs > rhs` in shortlex.
///
/// No left-hand side is a factor of another, and every right-hand side is a
/// normal form.
#[derive(Debug, Clone)]
pub struct RewritingSystem {
    /// Rules in the order they were added. Rules made redundant by a later
    /// one stay in place, inactive, so indices are stable.
    rules: Vec<Rule>,
    index: SuffixIndex,
    active_rules: usize,
}

impl RewritingSystem {
    fn new(alphabet_size: usize) -> Self {
        Self {
            rules: Vec::new(),
            index: SuffixIndex::new(alphabet_size),
            active_rules: 0,
        }
    }

    /// Run Knuth-Bendix completion on the relations of `presentation`.
    ///
    /// Overlaps are resolved one rule at a time, in the order rules were
    /// added, against every earlier rule. Fails with
    /// [`SimsError::RewritingIncomplete`] as soon as there are more than
    /// `max_rules` rules or a left-hand side longer than `max_rule_length`.
    pub fn knuth_bendix(
        presentation: &Presentation,
        max_rules: usize,
        max_rule_length: usize,
    ) -> Result<Self> {
        presentation.validate()?;
        let mut system = Self::new(presentation.alphabet_size());
        let mut pending: Vec<(Word, Word)> = presentation
            .rules()
            .chunks_exact(2)
            .map(|pair| (pair[0].clone(), pair[1].clone()))
            .collect();
        // Rules before `next` have had their overlaps resolved.
        let mut next = 0;

        loop {
            while let Some((u, v)) = pending.pop() {
                if let Some(len) = system.add_rule(u, v, &mut pending) {
                    if len > max_rule_length || system.active_rules > max_rules {
                        debug!(
                            rules = system.active_rules,
                            lhs_length = len,
                            "Knuth-Bendix completion abandoned"
                        );
                        return Err(SimsError::RewritingIncomplete {
                            max_rules,
                            max_rule_length,
                        });
                    }
                }
            }
            match (next..system.rules.len()).find(|&i| system.rules[i].active) {
                Some(i) => {
                    next = i + 1;
                    system.resolve_overlaps(i, &mut pending);
                }
                None => break,
            }
        }
        debug!(
            rules = system.active_rules,
            "Knuth-Bendix completion finished"
        );
        Ok(system)
    }

    pub fn number_of_rules(&self) -> usize {
        self.active_rules
    }

    /// The rules as `(lhs, rhs)` pairs.
    pub fn rules(&self) -> impl Iterator<Item = (&[Letter], &[Letter])> + '_ {
        self.rules
            .iter()
            .filter(|r| r.active)
            .map(|r| (r.lhs.as_slice(), r.rhs.as_slice()))
    }

    /// The normal form of `word`.
    pub fn rewrite(&self, word: &[Letter]) -> Word {
        let mut output: Word = Vec::with_capacity(word.len());
        let mut input: Word = word.iter().rev().copied().collect();
        while let Some(letter) = input.pop() {
            output.push(letter);
            if let Some(i) = self.index.suffix_match(&output) {
                let rule = &self.rules[i];
                output.truncate(output.len() - rule.lhs.len());
                input.extend(rule.rhs.iter().rev());
            }
        }
        output
    }

    /// Some rule applies to `word`, so it is not a normal form.
    pub fn is_reducible(&self, word: &[Letter]) -> bool {
        (1..=word.len()).any(|end| self.index.suffix_match(&word[..end]).is_some())
    }

    /// Orient and add `u = v`, then interreduce: rules whose left side now
    /// reduces go back on `pending`, right sides are renormalised.
    ///
    /// Returns the length of the new left-hand side, or `None` if `u` and
    /// `v` already have the same normal form.
    fn add_rule(&mut self, u: Word, v: Word, pending: &mut Vec<(Word, Word)>) -> Option<usize> {
        let u = self.rewrite(&u);
        let v = self.rewrite(&v);
        let (lhs, rhs) = match shortlex_cmp(&u, &v) {
            Ordering::Equal => return None,
            Ordering::Greater => (u, v),
            Ordering::Less => (v, u),
        };
        for rule in self.rules.iter_mut() {
            if rule.active && contains_factor(&rule.lhs, &lhs) {
                rule.active = false;
                self.index.remove(&rule.lhs);
                self.active_rules -= 1;
                pending.push((std::mem::take(&mut rule.lhs), std::mem::take(&mut rule.rhs)));
            }
        }
        let len = lhs.len();
        self.index.insert(&lhs, self.rules.len());
        self.rules.push(Rule {
            lhs,
            rhs,
            active: true,
        });
        self.active_rules += 1;

        let last = self.rules.len() - 1;
        for i in 0..last {
            if self.rules[i].active && contains_factor(&self.rules[i].rhs, &self.rules[last].lhs) {
                let reduced = self.rewrite(&self.rules[i].rhs);
                self.rules[i].rhs = reduced;
            }
        }
        Some(len)
    }

    /// Push the unresolved critical pairs between rule `i` and every active
    /// rule up to and including it.
    fn resolve_overlaps(&self, i: usize, pending: &mut Vec<(Word, Word)>) {
        for j in 0..=i {
            if !self.rules[j].active {
                continue;
            }
            self.overlaps(i, j, pending);
            if j != i {
                self.overlaps(j, i, pending);
            }
        }
    }

    /// Critical pairs from overlaps `l1 = xy`, `l2 = yz` with `y` non-empty
    /// whose two reductions have different normal forms.
    fn overlaps(&self, first: usize, second: usize, pending: &mut Vec<(Word, Word)>) {
        let Rule { lhs: l1, rhs: r1, .. } = &self.rules[first];
        let Rule { lhs: l2, rhs: r2, .. } = &self.rules[second];
        for overlap in 1..l1.len().min(l2.len()) {
            if l1[l1.len() - overlap..] != l2[..overlap] {
                continue;
            }
            let mut left = r1.clone();
            left.extend_from_slice(&l2[overlap..]);
            let mut right = l1[..l1.len() - overlap].to_vec();
            right.extend_from_slice(r2);
            let left = self.rewrite(&left);
            let right = self.rewrite(&right);
            if left != right {
                pending.push((left, right));
            }
        }
    }
}

fn contains_factor(word: &[Letter], factor: &[Letter]) -> bool {
    factor.len() <= word.len() && word.windows(factor.len()).any(|w| w == factor)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn monoid(alphabet_size: usize, rules: &[(&[Letter], &[Letter])]) -> Presentation {
        let mut p = Presentation::monoid(alphabet_size);
        for (lhs, rhs) in rules {
            p.add_rule(lhs, rhs).unwrap();
        }
        p
    }

    #[test]
    fn test_shortlex() {
        assert_eq!(shortlex_cmp(&[1], &[0, 0]), Ordering::Less);
        assert_eq!(shortlex_cmp(&[0, 1], &[1, 0]), Ordering::Less);
        assert_eq!(shortlex_cmp(&[], &[]), Ordering::Equal);
    }

    #[test]
    fn test_free_monoid_has_no_rules() {
        let rws = RewritingSystem::knuth_bendix(&Presentation::monoid(2), 16, 16).unwrap();
        assert_eq!(rws.number_of_rules(), 0);
        assert_eq!(rws.rules().count(), 0);
        assert_eq!(rws.rewrite(&[1, 0, 1]), vec![1, 0, 1]);
    }

    #[test]
    fn test_cyclic_monoid() {
        let p = monoid(1, &[(&[0, 0, 0, 0], &[0, 0])]);
        let rws = RewritingSystem::knuth_bendix(&p, 16, 16).unwrap();
        assert_eq!(rws.rewrite(&[0; 7]), vec![0, 0, 0]);
        assert_eq!(rws.rewrite(&[0; 6]), vec![0, 0]);
        assert!(!rws.is_reducible(&[0, 0, 0]));
        assert!(rws.is_reducible(&[0, 0, 0, 0]));
    }

    #[test]
    fn test_completion_adds_critical_pairs() {
        // ab = ba, aa = a: completion must make every word collapse to a
        // sorted word with at most one a.
        let p = monoid(2, &[(&[1, 0], &[0, 1]), (&[0, 0], &[0])]);
        let rws = RewritingSystem::knuth_bendix(&p, 64, 16).unwrap();
        assert_eq!(rws.rewrite(&[1, 0, 1, 0, 0]), vec![0, 1, 1]);
        assert_eq!(rws.rewrite(&[0, 1, 0]), vec![0, 1]);
    }

    #[test]
    fn test_symmetric_group_of_degree_three() {
        // a^2 = 1, b^3 = 1, (ab)^2 = 1 presents a group of order 6.
        let p = monoid(
            2,
            &[(&[0, 0], &[]), (&[1, 1, 1], &[]), (&[0, 1, 0, 1], &[])],
        );
        let rws = RewritingSystem::knuth_bendix(&p, 64, 16).unwrap();
        let mut normal_forms = vec![vec![]];
        let mut frontier = vec![vec![]];
        while let Some(w) = frontier.pop() {
            for a in 0..2 {
                let mut wa: Word = w.clone();
                wa.push(a);
                if !rws.is_reducible(&wa) {
                    normal_forms.push(wa.clone());
                    frontier.push(wa);
                }
            }
        }
        assert_eq!(normal_forms.len(), 6);
    }

    #[test]
    fn test_rule_bound_is_enforced() {
        let p = monoid(
            2,
            &[(&[0, 0], &[]), (&[1, 1, 1], &[]), (&[0, 1, 0, 1], &[])],
        );
        assert_eq!(
            RewritingSystem::knuth_bendix(&p, 1, 16).err(),
            Some(SimsError::RewritingIncomplete {
                max_rules: 1,
                max_rule_length: 16
            })
        );
    }

    #[test]
    fn test_infinite_completion_stops_at_length_bound() {
        // abb = bab completes to the infinite system b a^n b^n -> a^n b^(n+1).
        let p = monoid(2, &[(&[0, 1, 1], &[1, 0, 1])]);
        assert!(matches!(
            RewritingSystem::knuth_bendix(&p, DEFAULT_MAX_REWRITING_RULES, DEFAULT_MAX_RULE_LENGTH),
            Err(SimsError::RewritingIncomplete { .. })
        ));

        let p = monoid(1, &[(&[0; 100], &[0])]);
        let rws = RewritingSystem::knuth_bendix(&p, DEFAULT_MAX_REWRITING_RULES, DEFAULT_MAX_RULE_LENGTH)
            .unwrap();
        assert_eq!(rws.number_of_rules(), 1);
    }

    #[test]
    fn test_interreduction_keeps_system_reduced() {
        // ab = a makes aab = aa redundant once both are added.
        let p = monoid(2, &[(&[0, 0, 1], &[0, 0]), (&[0, 1], &[0])]);
        let rws = RewritingSystem::knuth_bendix(&p, 16, 16).unwrap();
        let rules: Vec<(&[Letter], &[Letter])> = rws.rules().collect();
        assert_eq!(rules, vec![(&[0, 1][..], &[0][..])]);
        assert_eq!(rws.rewrite(&[0, 1, 1, 0, 1]), vec![0, 0]);
    }
}
