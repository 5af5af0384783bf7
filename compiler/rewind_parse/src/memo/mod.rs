//! Rule outcome memoization.
//!
//! While speculating, the same rule is often tried at the same position by
//! several competing alternatives. The memo table remembers whether
//! `(rule, position)` failed or where it ended, so each trial pays for a
//! rule at most once.
//!
//! # Configuration
//!
//! `ParserConfig::memoize` (on by default) enables the table. Outcomes are
//! recorded and consulted only while speculating; a committed parse always
//! runs the rule so its tree events are emitted.
//!
//! The key is the rule's [`RuleId`], not its name. A rule whose body
//! depends on an argument needs one id per variant, or a trial would replay
//! the outcome of the wrong variant.
//!
//! # Performance
//!
//! One `FxHashMap` lookup per rule entry while speculating. Aborts (step
//! limit, cancellation) are never recorded.

use crate::error::MemoError;
use crate::parser::RuleId;
use rustc_hash::FxHashMap;
use std::collections::hash_map::Entry;

/// What the table knows about a `(rule, position)` pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MemoLookup {
    NotRecorded,
    Failed,
    /// The rule matched and left the cursor at `end`.
    Succeeded { end: usize },
}

/// Counters for tuning and tests.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MemoStats {
    pub hits: u64,
    pub misses: u64,
    pub records: u64,
}

/// Memo table for one parse.
#[derive(Debug)]
pub struct MemoTable {
    entries: FxHashMap<(RuleId, usize), MemoLookup>,
    enabled: bool,
    stats: MemoStats,
}

impl MemoTable {
    pub fn new(enabled: bool) -> Self {
        MemoTable {
            entries: FxHashMap::default(),
            enabled,
            stats: MemoStats::default(),
        }
    }

    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Look up a rule outcome. Always `NotRecorded` when disabled.
    pub fn lookup(&mut self, rule: RuleId, position: usize) -> MemoLookup {
        if !self.enabled {
            return MemoLookup::NotRecorded;
        }
        match self.entries.get(&(rule, position)) {
            Some(&outcome) => {
                self.stats.hits += 1;
                outcome
            }
            None => {
                self.stats.misses += 1;
                MemoLookup::NotRecorded
            }
        }
    }

    /// Record a rule outcome. Each key may be recorded once; disabled
    /// tables drop records silently.
    pub fn record(
        &mut self,
        rule: RuleId,
        position: usize,
        outcome: MemoLookup,
    ) -> Result<(), MemoError> {
        if !self.enabled || outcome == MemoLookup::NotRecorded {
            return Ok(());
        }
        match self.entries.entry((rule, position)) {
            Entry::Occupied(_) => Err(MemoError::AlreadyRecorded {
                rule: rule.raw(),
                position,
            }),
            Entry::Vacant(slot) => {
                slot.insert(outcome);
                self.stats.records += 1;
                Ok(())
            }
        }
    }

    /// Forget every outcome. Counters are kept.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> MemoStats {
        self.stats
    }
}

#[cfg(test)]
mod tests;
