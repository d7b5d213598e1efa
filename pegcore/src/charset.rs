use std::fmt::{self, Display};

pub const ALPHAS: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";
pub const NUMS: &str = "0123456789";
pub const ALPHANUMS: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
pub const PRINTABLES: &str = "!\"#$%&'()*+,-./0123456789:;<=>?@ABCDEFGHIJKLMNOPQRSTUVWXYZ[\\]^_`abcdefghijklmnopqrstuvwxyz{|}~";

/// A set of characters, kept sorted for lookup.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CharSet {
    chars: Vec<char>,
}

impl CharSet {
    pub fn new(s: &str) -> Self {
        let mut chars: Vec<char> = s.chars().collect();
        chars.sort_unstable();
        chars.dedup();
        CharSet { chars }
    }

    pub fn contains(&self, c: char) -> bool {
        self.chars.binary_search(&c).is_ok()
    }

    /// Returns a new set containing the characters of both sets.
    pub fn union(&self, other: &CharSet) -> CharSet {
        let mut chars = self.chars.clone();
        chars.extend_from_slice(&other.chars);
        chars.sort_unstable();
        chars.dedup();
        CharSet { chars }
    }

    /// Shorthand for `union` with a string of extra characters, e.g.
    /// `CharSet::from(NUMS).with(".")`.
    pub fn with(&self, extra: &str) -> CharSet {
        self.union(&CharSet::new(extra))
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }
}

impl From<&str> for CharSet {
    fn from(s: &str) -> Self {
        CharSet::new(s)
    }
}

impl From<String> for CharSet {
    fn from(s: String) -> Self {
        CharSet::new(&s)
    }
}

/// Abbreviates long sets so expectations stay readable.
impl Display for CharSet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        const SHOWN: usize = 8;
        for c in self.chars.iter().take(SHOWN) {
            write!(f, "{}", c)?;
        }
        if self.chars.len() > SHOWN {
            write!(f, "...")?;
        }
        Ok(())
    }
}
