//! Word segmentation for text that lost its spaces
//!
//! Splits concatenated text like `thisisatest` into its most probable words using unigram and
//! bigram frequencies. Build a [`Model`] (in memory or with the [`load`] module), wrap it in a
//! [`Segmenter`] and segment:
//!
//! ```
//! use wordsplit::{Model, Search, Segmenter};
//!
//! let mut model = Model::new(
//!     vec![("this".into(), 10.0), ("is".into(), 10.0), ("a".into(), 10.0), ("test".into(), 10.0)],
//!     vec![],
//! );
//! model.set_total(100.0);
//!
//! let segmenter = Segmenter::new(model);
//! let mut search = Search::default();
//! let words = segmenter.segment("ThisIsATest", &mut search).collect::<Vec<_>>();
//! assert_eq!(words, ["this", "is", "a", "test"]);
//! ```

use std::collections::VecDeque;
use std::ops::{Index, Range};
use std::{mem, slice, str};

use log::trace;
#[cfg(feature = "with-serde")]
use serde::{Deserialize, Serialize};
use smartstring::alias::String;
use thiserror::Error;

pub mod load;
mod model;
#[cfg(feature = "test-cases")]
pub mod test_cases;
#[cfg(feature = "__test_data")]
pub mod test_data;

pub use load::{LoadError, LoadOptions};
pub use model::{Model, DEFAULT_TOTAL};

/// Splits concatenated text into its most probable sequence of words
///
/// A `Segmenter` is immutable while segmenting, so a single instance can be shared between
/// threads; every thread needs its own [`Search`].
#[cfg_attr(feature = "with-serde", derive(Deserialize, Serialize))]
#[derive(Clone)]
pub struct Segmenter {
    model: Model,
    config: Config,
}

impl Segmenter {
    /// Create a `Segmenter` with the default [`Config`]
    pub fn new(model: Model) -> Self {
        Self {
            model,
            config: Config::default(),
        }
    }

    /// Create a `Segmenter` with a custom `config`
    pub fn with_config(model: Model, config: Config) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { model, config })
    }

    /// Segment the text in `input`
    ///
    /// The input is [`clean`]ed first, so any characters other than ASCII letters and digits are
    /// dropped. The `search` parameter contains caches that are used during segmentation;
    /// passing it in allows the callers to reuse the cache allocations.
    pub fn segment<'a>(&self, input: &str, search: &'a mut Search) -> Segments<'a> {
        let text = Ascii::new(input);
        let mut words = mem::take(&mut search.result);
        words.clear();

        let mut cursor = Cursor::default();
        while cursor.advance(self, &text, search, &mut words) {}

        search.result = words;
        Segments {
            iter: search.result.iter(),
        }
    }

    /// Lazily segment the text in `input`
    ///
    /// Like [`Segmenter::segment()`], but words are produced as the iterator is consumed, one
    /// chunk of input at a time. The returned iterator owns its own search buffers.
    pub fn isegment(&self, input: &str) -> ISegment<'_> {
        ISegment {
            data: self,
            text: Ascii::new(input),
            cursor: Cursor::default(),
            search: Search::default(),
            pending: VecDeque::new(),
        }
    }

    /// The frequency model used for scoring
    pub fn model(&self) -> &Model {
        &self.model
    }

    /// The tuning parameters used for searching
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Customize the word length `limit`
    ///
    /// Panics if `limit` is zero.
    pub fn set_limit(&mut self, limit: usize) {
        assert!(limit > 0, "word length limit must be at least 1");
        self.config.limit = limit;
    }

    /// Customize the number of input characters searched at a time
    ///
    /// Panics if `size` is zero.
    pub fn set_chunk_size(&mut self, size: usize) {
        assert!(size > 0, "chunk size must be at least 1");
        self.config.chunk_size = size;
    }

    /// Customize the number of words carried over from one chunk into the next
    pub fn set_carry(&mut self, carry: usize) {
        self.config.carry = carry;
    }
}

/// Tuning parameters for the search
///
/// Long inputs are searched in chunks of `chunk_size` characters. The last `carry` words found
/// in a chunk are not emitted but searched again together with the next chunk, so that words
/// spanning a chunk boundary can be found. This is an approximation: a whole-text search may
/// occasionally split a boundary region differently. A larger `carry` makes that less likely at
/// the cost of more repeated work, but never rules it out.
#[cfg_attr(feature = "with-serde", derive(Deserialize, Serialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    /// Maximum length of a single word
    pub limit: usize,
    /// Number of input characters searched at a time
    pub chunk_size: usize,
    /// Number of trailing words carried from one chunk into the next
    pub carry: usize,
}

impl Config {
    /// Check that `limit` and `chunk_size` are at least 1
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.limit == 0 {
            return Err(ConfigError::ZeroLimit);
        }
        if self.chunk_size == 0 {
            return Err(ConfigError::ZeroChunkSize);
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            chunk_size: DEFAULT_CHUNK_SIZE,
            carry: DEFAULT_CARRY,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("word length limit must be at least 1")]
    ZeroLimit,
    #[error("chunk size must be at least 1")]
    ZeroChunkSize,
}

/// Progress of a segmentation through its input
#[derive(Default)]
struct Cursor {
    /// Start of the text for which no words have been emitted yet
    start: usize,
    /// End of the input covered by the chunks searched so far
    end: usize,
    done: bool,
}

impl Cursor {
    /// Search the next chunk and append the words it settles to `out`
    ///
    /// Returns `false` once all of the input has been emitted.
    fn advance<E>(
        &mut self,
        data: &Segmenter,
        text: &Ascii,
        search: &mut Search,
        out: &mut E,
    ) -> bool
    where
        E: Extend<String>,
    {
        if self.done {
            return false;
        }

        // After the last chunk, the carried words are searched once more on their own
        let carry = match self.end < text.len() {
            true => {
                self.end = text.len().min(self.end + data.config.chunk_size);
                data.config.carry
            }
            false => {
                self.done = true;
                0
            }
        };

        trace!("searching {}..{} of {}", self.start, self.end, text.len());
        let splits = SegmentState::new(data, text, search).run(self.start..self.end);
        let emit = &splits[..splits.len().saturating_sub(carry)];

        let mut start = self.start;
        out.extend(emit.iter().map(|&split| {
            let word = String::from(&text[start..split]);
            start = split;
            word
        }));
        self.start = start;
        true
    }
}

struct SegmentState<'a> {
    data: &'a Segmenter,
    text: &'a Ascii,
    search: &'a mut Search,
}

impl<'a> SegmentState<'a> {
    fn new(data: &'a Segmenter, text: &'a Ascii, search: &'a mut Search) -> Self {
        Self { data, text, search }
    }

    /// Returns the split points of the best segmentation of `range`
    ///
    /// Fills a table of the best segmentation of every suffix of `range` given the length of
    /// the word before it, from the end of the range backwards, then follows the best first
    /// words from the start.
    fn run(self, range: Range<usize>) -> &'a [usize] {
        let (base, len) = (range.start, range.len());
        let limit = self.data.config.limit;
        let width = limit + 1;
        let Search {
            scores,
            words,
            splits,
            ..
        } = self.search;
        scores.clear();
        scores.resize((len + 1) * width, 0.0);
        words.clear();
        words.resize((len + 1) * width, 0);

        for start in (0..len).rev() {
            // The previous word is absent at the start of the range, and at most `limit` long
            let previous_lens = match start {
                0 => 0..=0,
                _ => 1..=start.min(limit),
            };

            for previous_len in previous_lens {
                let previous = match previous_len {
                    0 => None,
                    _ => Some(&self.text[base + start - previous_len..base + start]),
                };

                let (mut best, mut best_len) = (f64::NEG_INFINITY, 1);
                for word_len in 1..(len - start).min(limit) + 1 {
                    let split = start + word_len;
                    let word = &self.text[base + start..base + split];
                    let prefix_score = self.data.model.score(word, previous).log10();
                    let score = prefix_score + scores[split * width + word_len];

                    // Strictly greater: on a tie, the shortest first word wins
                    if score > best {
                        best = score;
                        best_len = word_len;
                    }
                }

                scores[start * width + previous_len] = best;
                words[start * width + previous_len] = best_len;
            }
        }

        splits.clear();
        let (mut start, mut previous_len) = (0, 0);
        while start < len {
            previous_len = words[start * width + previous_len];
            start += previous_len;
            splits.push(base + start);
        }

        splits
    }
}

/// Search buffers and result set
///
/// Holds the search table for one segmentation at a time; it is cleared for every chunk
/// searched.
#[derive(Clone, Default)]
pub struct Search {
    /// Best score for each (suffix start, previous word length)
    scores: Vec<f64>,
    /// Length of the first word of the best segmentation for each table entry
    words: Vec<usize>,
    splits: Vec<usize>,
    result: Vec<String>,
}

impl Search {
    /// Get the word at `index` from the most recent segmentation
    pub fn get(&self, index: usize) -> Option<&str> {
        self.result.get(index).map(|word| word.as_str())
    }
}

/// Words of a completed segmentation, borrowed from a [`Search`]
pub struct Segments<'a> {
    iter: slice::Iter<'a, String>,
}

impl<'a> Iterator for Segments<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next().map(|word| word.as_str())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl ExactSizeIterator for Segments<'_> {}

/// Lazily computed segmentation, see [`Segmenter::isegment()`]
pub struct ISegment<'a> {
    data: &'a Segmenter,
    text: Ascii,
    cursor: Cursor,
    search: Search,
    pending: VecDeque<String>,
}

impl Iterator for ISegment<'_> {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(word) = self.pending.pop_front() {
                return Some(word);
            }

            let more = self.cursor.advance(
                self.data,
                &self.text,
                &mut self.search,
                &mut self.pending,
            );
            if !more {
                return None;
            }
        }
    }
}

/// Lower-case `text` and drop everything but ASCII letters and digits
///
/// This glues together words separated by spaces or punctuation: `"Can't buy"` becomes
/// `"cantbuy"`.
pub fn clean(text: &str) -> std::string::String {
    text.chars()
        .flat_map(char::to_lowercase)
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        .collect()
}

/// Cleaned input text
struct Ascii(Vec<u8>);

impl Ascii {
    fn new(s: &str) -> Self {
        Self(clean(s).into_bytes())
    }

    fn len(&self) -> usize {
        self.0.len()
    }
}

impl Index<Range<usize>> for Ascii {
    type Output = str;

    fn index(&self, index: Range<usize>) -> &Self::Output {
        let bytes = self.0.index(index);
        // Since `Ascii` can only be instantiated with ASCII characters, this should be safe
        unsafe { str::from_utf8_unchecked(bytes) }
    }
}

type HashMap<K, V> = std::collections::HashMap<K, V, ahash::RandomState>;

const DEFAULT_LIMIT: usize = 24;
const DEFAULT_CHUNK_SIZE: usize = 250;
const DEFAULT_CARRY: usize = 5;

#[cfg(test)]
pub mod tests {
    use super::*;

    fn segmenter() -> Segmenter {
        let words = ["a", "bc", "ab", "c", "this", "is", "test"];
        let unigrams = words.iter().map(|&word| (word.into(), 10.0));
        let mut model = Model::new(unigrams, Vec::new());
        model.set_total(100.0);
        Segmenter::new(model)
    }

    #[test]
    fn test_clean() {
        let text = Ascii::new("Can't buy me love!");
        assert_eq!(&text[0..text.len()], "cantbuymelove");

        assert_eq!(clean("Route 66, ÉTÉ"), "route66t");
        assert_eq!(clean("\u{212A}elvin"), "kelvin");
        assert_eq!(clean(""), "");
    }

    #[test]
    fn clean_is_idempotent() {
        for s in ["Can't buy me love!", "Hello, World 2024", "ß ünïcödé", "already"].iter() {
            let once = clean(s);
            assert_eq!(clean(&once), once);
            assert!(once.bytes().all(|b| b.is_ascii_lowercase() || b.is_ascii_digit()));
        }
    }

    #[test]
    fn empty() {
        let segmenter = segmenter();
        let mut search = Search::default();
        assert_eq!(segmenter.segment("", &mut search).len(), 0);
        assert_eq!(segmenter.segment("!?, '", &mut search).len(), 0);
        assert_eq!(segmenter.isegment("").count(), 0);
    }

    #[test]
    fn shortest_prefix_wins_ties() {
        // "a bc" and "ab c" score the same
        let segmenter = segmenter();
        let model = segmenter.model();
        assert_eq!(
            model.score_sentence(vec!["a", "bc"]),
            model.score_sentence(vec!["ab", "c"])
        );

        let mut search = Search::default();
        let words = segmenter.segment("abc", &mut search).collect::<Vec<_>>();
        assert_eq!(words, ["a", "bc"]);
    }

    #[test]
    fn search_reuse() {
        let segmenter = segmenter();
        let mut search = Search::default();
        let first = segmenter.segment("thisisatest", &mut search).count();
        assert_eq!(first, 4);
        assert_eq!(search.get(3), Some("test"));

        let words = segmenter.segment("abc", &mut search).collect::<Vec<_>>();
        assert_eq!(words, ["a", "bc"]);
        assert_eq!(search.get(2), None);
    }

    #[test]
    fn config() {
        let model = segmenter().model().clone();
        let config = Config {
            limit: 0,
            ..Config::default()
        };
        assert_eq!(
            Segmenter::with_config(model.clone(), config).err(),
            Some(ConfigError::ZeroLimit)
        );

        let config = Config {
            chunk_size: 0,
            ..Config::default()
        };
        assert_eq!(
            Segmenter::with_config(model.clone(), config).err(),
            Some(ConfigError::ZeroChunkSize)
        );

        let config = Config {
            limit: 2,
            chunk_size: 3,
            carry: 0,
        };
        let segmenter = Segmenter::with_config(model, config).unwrap();
        assert_eq!(*segmenter.config(), config);
    }

    #[test]
    fn limit_bounds_word_length() {
        let mut segmenter = segmenter();
        segmenter.set_limit(2);
        let mut search = Search::default();
        assert!(segmenter.segment("thisisatest", &mut search).all(|word| word.len() <= 2));
    }

    #[test]
    fn oversized_chunk() {
        let config = Config {
            limit: 3,
            chunk_size: 100_000,
            carry: 5,
        };
        let segmenter = Segmenter::with_config(segmenter().model().clone(), config).unwrap();

        // The whole input is searched as a single chunk
        let text = "ab".repeat(25_000);
        let mut search = Search::default();
        let words = segmenter.segment(&text, &mut search).collect::<Vec<_>>();
        assert_eq!(words.concat(), text);
        assert!(words.iter().all(|&word| word == "ab"));
    }

    #[test]
    fn underflowing_scores() {
        let mut model = Model::new(vec![("ab".into(), f64::from_bits(1))], Vec::new());
        model.set_total(f64::MAX);
        let segmenter = Segmenter::new(model);

        let text = "abab".repeat(20);
        let mut search = Search::default();
        let words = segmenter.segment(&text, &mut search).collect::<Vec<_>>();
        assert_eq!(words.concat(), text);
    }

    #[test]
    fn isegment_matches_segment() {
        let mut segmenter = segmenter();
        segmenter.set_chunk_size(5);
        segmenter.set_carry(2);

        let text = "thisisatest".repeat(4);
        let mut search = Search::default();
        let expected = segmenter.segment(&text, &mut search).collect::<Vec<_>>();
        let lazy = segmenter.isegment(&text).collect::<Vec<_>>();
        assert_eq!(lazy.iter().map(|word| word.as_str()).collect::<Vec<_>>(), expected);
        assert_eq!(expected.concat(), text);
    }
}
