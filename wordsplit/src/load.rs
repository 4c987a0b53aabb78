//! Read frequency tables from tab-separated text files
//!
//! Every line holds a key and a count separated by a single tab. Unigram keys are single words,
//! bigram keys are two words separated by a space:
//!
//! ```text
//! the	23135851162
//! of the	2766332391
//! ```

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use log::debug;
use smartstring::alias::String;
use thiserror::Error;

use crate::{HashMap, Model};

impl Model {
    /// Load unigrams and bigrams from `unigrams.txt` and `bigrams.txt` in `dir`
    pub fn from_dir(dir: &Path, options: LoadOptions) -> Result<Self, LoadError> {
        Self::from_files(&dir.join(UNIGRAMS_FILE), &dir.join(BIGRAMS_FILE), options)
    }

    /// Load unigrams and bigrams from the given files
    ///
    /// Fails on the first file that cannot be read or the first malformed line.
    pub fn from_files(
        unigrams: &Path,
        bigrams: &Path,
        options: LoadOptions,
    ) -> Result<Self, LoadError> {
        let unigrams = parse_unigrams(open(unigrams)?, unigrams)?;
        let bigrams = parse_bigrams(open(bigrams)?, bigrams)?;

        let mut model = Self::from_maps(unigrams, bigrams);
        if options.compute_total {
            model.recompute_total();
        }
        Ok(model)
    }
}

/// Options for loading a [`Model`] from files
#[derive(Clone, Copy, Debug, Default)]
pub struct LoadOptions {
    /// Normalize by the sum of the loaded unigram counts instead of [`crate::DEFAULT_TOTAL`]
    pub compute_total: bool,
}

/// Parse unigram counts from `reader`; `path` is only used in error messages
pub fn parse_unigrams<R: BufRead>(
    reader: R,
    path: &Path,
) -> Result<HashMap<String, f64>, LoadError> {
    let mut unigrams = HashMap::default();
    parse(reader, path, |key, count, _| {
        unigrams.insert(key.into(), count);
        Ok(())
    })?;

    debug!("loaded {} unigrams from {}", unigrams.len(), path.display());
    Ok(unigrams)
}

/// Parse bigram counts from `reader`; `path` is only used in error messages
pub fn parse_bigrams<R: BufRead>(
    reader: R,
    path: &Path,
) -> Result<HashMap<(String, String), f64>, LoadError> {
    let mut bigrams = HashMap::default();
    parse(reader, path, |key, count, line| {
        let mut words = key.split(' ');
        match (words.next(), words.next(), words.next()) {
            (Some(first), Some(second), None) if !first.is_empty() && !second.is_empty() => {
                bigrams.insert((first.into(), second.into()), count);
                Ok(())
            }
            _ => Err(LoadError::InvalidBigram {
                path: path.to_owned(),
                line,
                key: key.to_owned(),
            }),
        }
    })?;

    debug!("loaded {} bigrams from {}", bigrams.len(), path.display());
    Ok(bigrams)
}

/// Call `insert` with the key, count and line number of every line in `reader`
fn parse<R, F>(reader: R, path: &Path, mut insert: F) -> Result<(), LoadError>
where
    R: BufRead,
    F: FnMut(&str, f64, usize) -> Result<(), LoadError>,
{
    for (i, ln) in reader.lines().enumerate() {
        let line = i + 1;
        let ln = ln.map_err(|source| LoadError::Io {
            path: path.to_owned(),
            source,
        })?;

        let mut fields = ln.split('\t');
        let key = fields.next().unwrap_or_default();
        let value = match (fields.next(), fields.next()) {
            (Some(value), None) => value,
            (None, _) => {
                return Err(LoadError::MissingTab {
                    path: path.to_owned(),
                    line,
                })
            }
            (Some(_), Some(_)) => {
                return Err(LoadError::ExtraTab {
                    path: path.to_owned(),
                    line,
                })
            }
        };

        let count = f64::from_str(value.trim())
            .ok()
            .filter(|count| count.is_finite() && *count >= 0.0)
            .ok_or_else(|| LoadError::InvalidCount {
                path: path.to_owned(),
                line,
                value: value.to_owned(),
            })?;

        insert(key, count, line)?;
    }

    Ok(())
}

fn open(path: &Path) -> Result<BufReader<File>, LoadError> {
    match File::open(path) {
        Ok(f) => Ok(BufReader::with_capacity(4 * 1024 * 1024, f)),
        Err(source) => Err(LoadError::Io {
            path: path.to_owned(),
            source,
        }),
    }
}

/// Failure to load a frequency table
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{}:{line}: no tab between key and count", .path.display())]
    MissingTab { path: PathBuf, line: usize },
    #[error("{}:{line}: more than one tab", .path.display())]
    ExtraTab { path: PathBuf, line: usize },
    #[error("{}:{line}: bigram {key:?} is not two space-separated words", .path.display())]
    InvalidBigram {
        path: PathBuf,
        line: usize,
        key: std::string::String,
    },
    #[error("{}:{line}: invalid count {value:?}", .path.display())]
    InvalidCount {
        path: PathBuf,
        line: usize,
        value: std::string::String,
    },
}

pub const UNIGRAMS_FILE: &str = "unigrams.txt";
pub const BIGRAMS_FILE: &str = "bigrams.txt";
