//! Line-oriented front ends for the `wordsplit` segmenter

use std::io::{BufRead, Write};

use ahash::AHashMap as HashMap;
use anyhow::{bail, Context, Result};
use log::debug;
use smartstring::alias::String as SmartString;

use wordsplit::{Search, Segmenter};

/// Segment every line of `input`, writing the words of each line space-separated to `output`
///
/// Returns the number of lines processed.
pub fn segment_lines<R, W>(segmenter: &Segmenter, input: R, mut output: W) -> Result<usize>
where
    R: BufRead,
    W: Write,
{
    let mut search = Search::default();
    let mut lines = 0;
    for ln in input.lines() {
        let ln = ln.context("failed to read input")?;
        let mut first = true;
        for word in segmenter.segment(ln.trim(), &mut search) {
            if !first {
                output.write_all(b" ")?;
            }
            output.write_all(word.as_bytes())?;
            first = false;
        }
        output.write_all(b"\n")?;
        lines += 1;
    }

    output.flush()?;
    debug!("segmented {} lines", lines);
    Ok(lines)
}

/// Read `<ngram>\t<count>` lines, merging the counts of n-grams that are equal when lower-cased
///
/// The merged n-grams are returned in sorted order.
pub fn merge_ngrams<R: BufRead>(input: R) -> Result<Vec<(SmartString, u64)>> {
    let mut ngrams = HashMap::<SmartString, u64>::new();
    for (i, ln) in input.lines().enumerate() {
        let ln = ln.context("failed to read input")?;
        let mut fields = ln.split('\t');
        let (ngram, count) = match (fields.next(), fields.next(), fields.next()) {
            (Some(ngram), Some(count), None) => (ngram, count),
            _ => bail!("line {}: expected `<ngram>\\t<count>`", i + 1),
        };

        let count = count
            .trim()
            .parse::<u64>()
            .with_context(|| format!("line {}: invalid count {:?}", i + 1, count))?;
        *ngrams.entry(ngram.to_lowercase().into()).or_default() += count;
    }

    let mut ngrams = ngrams.into_iter().collect::<Vec<_>>();
    ngrams.sort_unstable_by(|(a, _), (b, _)| a.cmp(b));
    Ok(ngrams)
}

/// Write merged n-grams as `<ngram>\t<count>` lines
pub fn write_ngrams<W: Write>(ngrams: &[(SmartString, u64)], mut output: W) -> Result<()> {
    for (ngram, count) in ngrams {
        writeln!(output, "{}\t{}", ngram, count)?;
    }
    output.flush()?;
    Ok(())
}
