use alloc::collections::BTreeSet;
use alloc::vec::Vec;
use core::fmt;
use serde::{Deserialize, Serialize};

use crate::*;

/// A glyph shown in a grid cell. Only equality matters to the game.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Symbol(char);

impl Symbol {
    pub const fn new(glyph: char) -> Self {
        Self(glyph)
    }

    pub const fn glyph(self) -> char {
        self.0
    }
}

impl Default for Symbol {
    fn default() -> Self {
        Self(' ')
    }
}

impl From<char> for Symbol {
    fn from(glyph: char) -> Self {
        Self(glyph)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

pub const PICTOGRAMS: [char; 10] = ['😀', '😂', '🎉', '🚀', '💡', '🎨', '⭐', '🌟', '💎', '🎭'];

/// Which glyph groups go into an alphabet.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolSet {
    pub letters: bool,
    pub digits: bool,
    pub pictograms: bool,
}

impl SymbolSet {
    pub const ALL: Self = Self::new(true, true, true);

    pub const fn new(letters: bool, digits: bool, pictograms: bool) -> Self {
        Self {
            letters,
            digits,
            pictograms,
        }
    }

    pub const fn is_empty(&self) -> bool {
        !(self.letters || self.digits || self.pictograms)
    }

    /// Concatenates `A`-`Z`, `0`-`9` and the pictograms, skipping disabled groups.
    pub fn build(&self) -> Result<Alphabet> {
        if self.is_empty() {
            return Err(GameError::EmptyAlphabet);
        }

        let mut symbols = Vec::with_capacity(26 + 10 + PICTOGRAMS.len());
        if self.letters {
            symbols.extend(('A'..='Z').map(Symbol));
        }
        if self.digits {
            symbols.extend(('0'..='9').map(Symbol));
        }
        if self.pictograms {
            symbols.extend(PICTOGRAMS.iter().copied().map(Symbol));
        }
        Alphabet::from_symbols(symbols)
    }
}

impl Default for SymbolSet {
    fn default() -> Self {
        Self::ALL
    }
}

/// Non-empty ordered sequence of symbols that puzzles are drawn from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alphabet {
    symbols: Vec<Symbol>,
}

impl Alphabet {
    pub fn from_symbols(symbols: impl IntoIterator<Item = Symbol>) -> Result<Self> {
        let symbols: Vec<Symbol> = symbols.into_iter().collect();
        if symbols.is_empty() {
            return Err(GameError::EmptyAlphabet);
        }
        Ok(Self { symbols })
    }

    pub fn from_chars(glyphs: &str) -> Result<Self> {
        Self::from_symbols(glyphs.chars().map(Symbol))
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn distinct_count(&self) -> usize {
        self.symbols.iter().collect::<BTreeSet<_>>().len()
    }

    pub fn get(&self, index: usize) -> Option<Symbol> {
        self.symbols.get(index).copied()
    }

    pub fn as_slice(&self) -> &[Symbol] {
        &self.symbols
    }
}
