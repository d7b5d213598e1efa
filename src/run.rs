//! Loading a grammar and running it over an input text.

use anyhow::{anyhow, Context, Result};
use ebnf::{Compiled, Grammar};
use log::{debug, info};
use pegcore::{parse, Matcher};

use crate::grammars;

/// A grammar ready to parse with.
///
/// Rules compiled from EBNF refer to each other without owning one
/// another, so the compiled rule set is kept here for as long as the
/// matcher is in use.
#[derive(Debug)]
pub struct LoadedGrammar {
    matcher: Matcher,
    _rules: Option<Compiled>,
}

impl LoadedGrammar {
    /// Compile an EBNF grammar and start at `rule`.
    pub fn from_ebnf(src: &str, rule: &str) -> Result<Self> {
        let grammar: Grammar = src.parse().context("invalid grammar definition")?;
        let rules = grammar.compile()?;
        let matcher = rules
            .rule(rule)
            .cloned()
            .ok_or_else(|| {
                let known: Vec<&str> = rules.rule_names().collect();
                anyhow!("no rule named '{}' (rules: {})", rule, known.join(", "))
            })?;
        debug!("compiled {} rules", grammar.rules.len());
        Ok(LoadedGrammar {
            matcher,
            _rules: Some(rules),
        })
    }

    /// One of the built-in example grammars.
    pub fn example(name: &str) -> Result<Self> {
        let matcher = grammars::by_name(name).ok_or_else(|| {
            anyhow!(
                "no example grammar named '{}' (examples: {})",
                name,
                grammars::NAMES.join(", ")
            )
        })?;
        Ok(LoadedGrammar {
            matcher,
            _rules: None,
        })
    }

    pub fn matcher(&self) -> &Matcher {
        &self.matcher
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct RunOptions {
    /// Require the grammar to consume all of its input.
    pub full: bool,
    /// Parse each non-blank line on its own.
    pub per_line: bool,
}

/// The outcome of a run: the rendered results and how many inputs failed.
#[derive(Debug, Default)]
pub struct Report {
    pub parsed: usize,
    pub failed: usize,
    pub output: String,
}

impl Report {
    pub fn is_success(&self) -> bool {
        self.failed == 0
    }
}

/// Parse `input` with `grammar`. A failure on one line doesn't stop the
/// lines after it.
pub fn run(grammar: &LoadedGrammar, input: &str, opts: RunOptions) -> Report {
    let matcher = if opts.full {
        grammars::complete(grammar.matcher().clone())
    } else {
        grammar.matcher().clone()
    };

    let mut report = Report::default();
    let mut sections = Vec::new();
    if opts.per_line {
        for (idx, line) in input.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let rendered = render(&matcher, line, &mut report);
            sections.push(format!("line {}: {}", idx + 1, rendered));
        }
    } else {
        sections.push(render(&matcher, input, &mut report));
    }
    info!("{} parsed, {} failed", report.parsed, report.failed);

    report.output = sections.join("\n");
    report
}

fn render(matcher: &Matcher, input: &str, report: &mut Report) -> String {
    match parse(matcher, input) {
        Ok(result) => {
            report.parsed += 1;
            result.dump()
        }
        Err(diagnostic) => {
            report.failed += 1;
            format!("{}\n    {}", diagnostic, diagnostic.marked_line(input))
        }
    }
}
