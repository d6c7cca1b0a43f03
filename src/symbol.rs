//! Alphabet units the codec can compress.

use std::fmt::Debug;
use std::hash::Hash;

/// A single compressible unit.
///
/// The ordering is used to break ties between equal-weight nodes, so every
/// implementation must provide a total order that is stable across runs.
pub trait Symbol: Copy + Ord + Hash + Debug + Send + 'static {
    /// Bytes occupied by one symbol in the artifact header.
    const WIDTH: u8;

    fn to_header(self) -> u32;

    /// Returns `None` for values that do not name a valid symbol.
    fn from_header(value: u32) -> Option<Self>;

    fn is_space(self) -> bool;

    fn is_whitespace(self) -> bool;
}

impl Symbol for u8 {
    const WIDTH: u8 = 1;

    fn to_header(self) -> u32 {
        self as u32
    }

    fn from_header(value: u32) -> Option<Self> {
        u8::try_from(value).ok()
    }

    fn is_space(self) -> bool {
        self == b' '
    }

    fn is_whitespace(self) -> bool {
        self.is_ascii_whitespace()
    }
}

impl Symbol for char {
    const WIDTH: u8 = 4;

    fn to_header(self) -> u32 {
        self as u32
    }

    fn from_header(value: u32) -> Option<Self> {
        char::from_u32(value)
    }

    fn is_space(self) -> bool {
        self == ' '
    }

    fn is_whitespace(self) -> bool {
        char::is_whitespace(self)
    }
}
