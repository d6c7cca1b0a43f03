//! Frequency analysis over a symbol sequence.

use std::collections::BTreeMap;

use crate::config::SymbolFilter;
use crate::symbol::Symbol;

/// Occurrence count per symbol. Every present key has a count of at least 1.
///
/// Backed by a `BTreeMap` so iteration is in symbol order, which keeps tree
/// construction deterministic on both sides of the codec.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyMap<S: Symbol> {
    counts: BTreeMap<S, u64>,
}

impl<S: Symbol> FrequencyMap<S> {
    /// Count every symbol in `symbols`. Callers apply any filter beforehand.
    pub fn analyze(symbols: &[S]) -> Self {
        let mut counts = BTreeMap::new();
        for &sym in symbols {
            *counts.entry(sym).or_insert(0u64) += 1;
        }
        let map = Self { counts };
        tracing::debug!(
            symbols = symbols.len(),
            alphabet = map.len(),
            "frequency analysis complete"
        );
        map
    }

    /// Rebuild a map from header entries. Zero counts are not representable.
    pub(crate) fn from_counts(counts: BTreeMap<S, u64>) -> Self {
        debug_assert!(counts.values().all(|&c| c > 0));
        Self { counts }
    }

    pub fn get(&self, symbol: S) -> Option<u64> {
        self.counts.get(&symbol).copied()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Total number of symbols counted.
    ///
    /// Saturates at `u64::MAX`; parsed headers are already bounded by their
    /// payload bit length.
    pub fn total(&self) -> u64 {
        self.counts
            .values()
            .fold(0u64, |acc, &c| acc.saturating_add(c))
    }

    pub fn iter(&self) -> impl Iterator<Item = (S, u64)> + '_ {
        self.counts.iter().map(|(&s, &c)| (s, c))
    }

    /// Shannon entropy in bits per symbol.
    pub fn entropy(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        let total = total as f64;
        self.counts
            .values()
            .map(|&c| {
                let p = c as f64 / total;
                -p * p.log2()
            })
            .sum()
    }

    /// One `"<symbol>: <count>"` line per symbol, in symbol order.
    pub fn render(&self) -> String {
        self.iter()
            .map(|(sym, count)| format!("{:?}: {}\n", sym, count))
            .collect()
    }
}

/// Apply the configured filter, keeping the original order.
pub fn filter_symbols<S: Symbol>(symbols: &[S], filter: SymbolFilter) -> Vec<S> {
    symbols.iter().copied().filter(|&s| filter.keeps(s)).collect()
}
