//! Prefix code derivation from a Huffman tree.

use std::collections::BTreeMap;
use std::fmt;
use std::fmt::Write;

use crate::frequency::FrequencyMap;
use crate::symbol::Symbol;
use crate::tree::{HuffmanTree, Node};

/// Bit path from the root to a leaf. `false` is a left branch, `true` a right one.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Code(Vec<bool>);

impl Code {
    pub fn bits(&self) -> &[bool] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_prefix_of(&self, other: &Code) -> bool {
        other.0.starts_with(&self.0)
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bit in &self.0 {
            f.write_char(if bit { '1' } else { '0' })?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable<S: Symbol> {
    codes: BTreeMap<S, Code>,
}

impl<S: Symbol> CodeTable<S> {
    /// Assign every leaf its root-to-leaf path.
    ///
    /// A root that is itself a leaf gets the one-bit code `0`, since an empty
    /// code would occupy no space in the payload.
    pub fn generate(tree: &HuffmanTree<S>) -> Self {
        let mut codes = BTreeMap::new();
        match tree.root() {
            Node::Leaf { symbol, .. } => {
                codes.insert(*symbol, Code(vec![false]));
            }
            root => {
                let mut path = Vec::new();
                collect(root, &mut path, &mut codes);
            }
        }
        Self { codes }
    }

    pub fn empty() -> Self {
        Self {
            codes: BTreeMap::new(),
        }
    }

    pub fn get(&self, symbol: S) -> Option<&Code> {
        self.codes.get(&symbol)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (S, &Code)> + '_ {
        self.codes.iter().map(|(&s, c)| (s, c))
    }

    /// No code is a prefix of another code in the table.
    pub fn is_prefix_free(&self) -> bool {
        let mut sorted: Vec<&Code> = self.codes.values().collect();
        sorted.sort();
        // any prefix pair ends up adjacent once sorted
        sorted.windows(2).all(|w| !w[0].is_prefix_of(w[1]))
    }

    /// Exact payload length for input with these frequencies.
    ///
    /// Returns `None` if a counted symbol has no code or the total overflows.
    pub fn encoded_bits(&self, freq: &FrequencyMap<S>) -> Option<u64> {
        freq.iter().try_fold(0u64, |acc, (sym, count)| {
            let len = self.get(sym)?.len() as u64;
            acc.checked_add(count.checked_mul(len)?)
        })
    }

    /// One `"<symbol>: <bits>"` line per symbol, in symbol order.
    pub fn render(&self) -> String {
        self.iter()
            .map(|(sym, code)| format!("{:?}: {}\n", sym, code))
            .collect()
    }
}

fn collect<S: Symbol>(node: &Node<S>, path: &mut Vec<bool>, codes: &mut BTreeMap<S, Code>) {
    match node {
        Node::Leaf { symbol, .. } => {
            codes.insert(*symbol, Code(path.clone()));
        }
        Node::Internal { left, right, .. } => {
            path.push(false);
            collect(left, path, codes);
            path.pop();
            path.push(true);
            collect(right, path, codes);
            path.pop();
        }
    }
}
