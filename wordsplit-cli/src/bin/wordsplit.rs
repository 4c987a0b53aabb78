use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::num::NonZeroUsize;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use wordsplit::load::{BIGRAMS_FILE, UNIGRAMS_FILE};
use wordsplit::{Config, LoadOptions, Model, Segmenter};

/// Split concatenated words apart, one input line at a time
#[derive(Debug, Parser)]
#[command(name = "wordsplit", version, about)]
struct Args {
    /// File to read lines from [default: stdin]
    infile: Option<PathBuf>,
    /// File to write segmented lines to [default: stdout]
    outfile: Option<PathBuf>,
    /// Directory containing unigrams.txt and bigrams.txt
    #[arg(long, default_value = ".")]
    data_dir: PathBuf,
    /// Unigram table, overrides the one in --data-dir
    #[arg(long)]
    unigrams: Option<PathBuf>,
    /// Bigram table, overrides the one in --data-dir
    #[arg(long)]
    bigrams: Option<PathBuf>,
    /// Normalize by the sum of the unigram counts instead of the default corpus size
    #[arg(long)]
    compute_total: bool,
    /// Maximum word length
    #[arg(long, default_value = "24")]
    limit: NonZeroUsize,
    /// Number of characters searched at a time
    #[arg(long, default_value = "250")]
    chunk_size: NonZeroUsize,
    /// Number of words carried from one chunk into the next
    #[arg(long, default_value = "5")]
    carry: usize,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let data_dir = &args.data_dir;
    let unigrams = args
        .unigrams
        .unwrap_or_else(|| data_dir.join(UNIGRAMS_FILE));
    let bigrams = args
        .bigrams
        .unwrap_or_else(|| data_dir.join(BIGRAMS_FILE));
    let options = LoadOptions {
        compute_total: args.compute_total,
    };
    let model = Model::from_files(&unigrams, &bigrams, options)
        .context("failed to load frequency tables")?;
    info!(
        "loaded {} unigrams and {} bigrams, total {}",
        model.unigram_count(),
        model.bigram_count(),
        model.total()
    );

    let config = Config {
        limit: args.limit.get(),
        chunk_size: args.chunk_size.get(),
        carry: args.carry,
    };
    let segmenter = Segmenter::with_config(model, config)?;

    let input: Box<dyn BufRead> = match &args.infile {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("failed to open {}", path.display()))?,
        )),
        None => Box::new(BufReader::new(io::stdin())),
    };
    let output: Box<dyn Write> = match &args.outfile {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("failed to create {}", path.display()))?,
        )),
        None => Box::new(BufWriter::new(io::stdout())),
    };

    wordsplit_cli::segment_lines(&segmenter, input, output)?;
    Ok(())
}
