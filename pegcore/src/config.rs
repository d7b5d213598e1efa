use crate::charset::CharSet;

pub const DEFAULT_WHITESPACE: &str = " \t\r\n";
/// Forward-reference nesting that a 2 MiB thread stack holds in a debug
/// build, with room left for rules that wrap each reference in a few more
/// combinators.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Settings for a single parse call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseConfig {
    /// Characters skipped before each token. Never skipped inside quoted
    /// strings.
    pub whitespace: CharSet,
    /// How deep forward references may nest before the attempt fails.
    pub max_depth: usize,
}

impl ParseConfig {
    pub fn with_whitespace(mut self, whitespace: &str) -> Self {
        self.whitespace = CharSet::new(whitespace);
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

impl Default for ParseConfig {
    fn default() -> Self {
        ParseConfig {
            whitespace: CharSet::new(DEFAULT_WHITESPACE),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}
