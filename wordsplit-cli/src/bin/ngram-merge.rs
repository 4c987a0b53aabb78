use std::io::{self, BufWriter};

use anyhow::Result;
use clap::Parser;
use log::info;

/// Merge the counts of n-grams that differ only in case
///
/// Reads `<ngram>\t<count>` lines from stdin and writes the lower-cased, merged n-grams in sorted
/// order to stdout.
#[derive(Debug, Parser)]
#[command(name = "ngram-merge", version, about)]
struct Args {}

fn main() -> Result<()> {
    env_logger::init();
    Args::parse();

    let stdin = io::stdin();
    let ngrams = wordsplit_cli::merge_ngrams(stdin.lock())?;
    info!("merged into {} n-grams", ngrams.len());

    let stdout = io::stdout();
    wordsplit_cli::write_ngrams(&ngrams, BufWriter::new(stdout.lock()))
}
