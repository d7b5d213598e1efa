use std::fs;
use std::path::PathBuf;
use std::process;

use anyhow::{bail, Context, Result};
use clap::Parser;

use smolpeg::run::{run, LoadedGrammar, RunOptions};

/// Parse a text file with a PEG grammar and print the match results.
#[derive(Debug, Parser)]
#[command(name = "smolpeg", version)]
struct Args {
    /// The file to parse.
    input: PathBuf,

    /// An EBNF grammar file.
    #[arg(long, required_unless_present = "example", conflicts_with = "example")]
    grammar: Option<PathBuf>,

    /// The rule of the grammar file to start from.
    #[arg(long, default_value = "start")]
    rule: String,

    /// Use a built-in grammar instead: c_assignment, c_string_definition
    /// or isotopes.
    #[arg(long)]
    example: Option<String>,

    /// Fail when input remains after the match.
    #[arg(long)]
    full: bool,

    /// Parse every non-blank line separately.
    #[arg(long)]
    per_line: bool,
}

fn main() {
    env_logger::init();
    match try_main() {
        Ok(true) => (),
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("error: {:#}", e);
            process::exit(2);
        }
    }
}

fn try_main() -> Result<bool> {
    let args = Args::parse();

    let grammar = match (&args.grammar, &args.example) {
        (Some(path), _) => {
            let src = fs::read_to_string(path)
                .with_context(|| format!("failed to read grammar {}", path.display()))?;
            LoadedGrammar::from_ebnf(&src, &args.rule)
                .with_context(|| format!("failed to load grammar {}", path.display()))?
        }
        (None, Some(name)) => LoadedGrammar::example(name)?,
        (None, None) => bail!("either --grammar or --example is required"),
    };

    let input = fs::read_to_string(&args.input)
        .with_context(|| format!("failed to read {}", args.input.display()))?;

    let report = run(
        &grammar,
        &input,
        RunOptions {
            full: args.full,
            per_line: args.per_line,
        },
    );
    println!("{}", report.output);
    Ok(report.is_success())
}
