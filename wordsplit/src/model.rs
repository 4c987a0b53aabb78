use log::debug;
#[cfg(feature = "with-serde")]
use serde::{Deserialize, Serialize};
use smartstring::alias::String;

use crate::HashMap;

/// Unigram and bigram frequencies used to calculate word probabilities
///
/// Counts are divided by a normalization `total`. By default this is the size of the corpus the
/// standard tables were sampled from ([`DEFAULT_TOTAL`]), so the probabilities of the words
/// present in the tables do not sum to 1.
#[cfg_attr(feature = "with-serde", derive(Deserialize, Serialize))]
#[derive(Clone)]
pub struct Model {
    unigrams: HashMap<String, f64>,
    bigrams: HashMap<(String, String), f64>,
    total: f64,
}

impl Model {
    /// Create a `Model` from the given unigram and bigram counts
    ///
    /// Note: the `String` types used in this API are defined in the `smartstring` crate. Any
    /// `&str` or `String` can be converted into the `String` used here by calling `into()` on it.
    pub fn new<U, B>(unigrams: U, bigrams: B) -> Self
    where
        U: IntoIterator<Item = (String, f64)>,
        B: IntoIterator<Item = ((String, String), f64)>,
    {
        Self::from_maps(unigrams.into_iter().collect(), bigrams.into_iter().collect())
    }

    /// Create a `Model` from the given hashmaps (using ahash)
    ///
    /// The `HashMap` type here refers to `std::collections::HashMap` parametrized with the
    /// `ahash::RandomState`.
    pub fn from_maps(
        unigrams: HashMap<String, f64>,
        bigrams: HashMap<(String, String), f64>,
    ) -> Self {
        Self {
            unigrams,
            bigrams,
            total: DEFAULT_TOTAL,
        }
    }

    /// Score `word` in the context of the `previous` word
    ///
    /// The result is always strictly positive, so its logarithm is always defined.
    pub fn score(&self, word: &str, previous: Option<&str>) -> f64 {
        if let Some(prev) = previous {
            if let Some(bi) = positive(self.bigrams.get(&(prev.into(), word.into()))) {
                if positive(self.unigrams.get(prev)).is_some() {
                    // Conditional probability of the word given the previous
                    // word. The technical name is "stupid backoff" and it's
                    // not a probability distribution but it works well in practice.
                    return clamp(bi / self.total / self.score(prev, None));
                }
            }
        }

        match positive(self.unigrams.get(word)) {
            // Probability of the given word
            Some(p) => clamp(p / self.total),
            // Penalize words not found in the unigrams according
            // to their length, a crucial heuristic.
            None => {
                let len = word.chars().count().min(MAX_PENALTY_EXPONENT) as i32;
                clamp(10.0 / (self.total * 10.0f64.powi(len)))
            }
        }
    }

    /// Returns the sentence's score
    ///
    /// Sums the log10 scores of the `words`, each in the context of the word before it. Returns
    /// `None` iff `words` is empty.
    pub fn score_sentence<'a, I>(&self, words: I) -> Option<f64>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut words = words.into_iter();
        let mut prev = words.next()?;
        let mut score = self.score(prev, None).log10();
        for word in words {
            score += self.score(word, Some(prev)).log10();
            prev = word;
        }
        Some(score)
    }

    /// Count for `word`, if it is in the unigram table
    pub fn unigram(&self, word: &str) -> Option<f64> {
        self.unigrams.get(word).copied()
    }

    /// Count for the `first` `second` word pair, if it is in the bigram table
    pub fn bigram(&self, first: &str, second: &str) -> Option<f64> {
        self.bigrams.get(&(first.into(), second.into())).copied()
    }

    /// Number of entries in the unigram table
    pub fn unigram_count(&self) -> usize {
        self.unigrams.len()
    }

    /// Number of entries in the bigram table
    pub fn bigram_count(&self) -> usize {
        self.bigrams.len()
    }

    /// The normalization constant all counts are divided by
    pub fn total(&self) -> f64 {
        self.total
    }

    /// Customize the relative score by setting the `total`
    ///
    /// Panics if `total` is not a positive, finite number.
    pub fn set_total(&mut self, total: f64) {
        assert!(
            total.is_finite() && total > 0.0,
            "total must be positive and finite, got {}",
            total
        );
        self.total = total;
    }

    /// Set the total to the sum of all unigram counts and return it
    ///
    /// This changes the output of every subsequent segmentation. If the unigram counts do not
    /// sum to a positive number, the current total is kept.
    pub fn recompute_total(&mut self) -> f64 {
        let sum = self.unigrams.values().sum::<f64>();
        if sum.is_finite() && sum > 0.0 {
            debug!("recomputed total from {} unigrams: {}", self.unigrams.len(), sum);
            self.total = sum;
        }
        self.total
    }
}

/// Zero counts carry no information and would make the score zero
fn positive(count: Option<&f64>) -> Option<f64> {
    count.copied().filter(|&count| count > 0.0)
}

/// Keep a probability positive and finite when tiny counts or totals under- or overflow
fn clamp(p: f64) -> f64 {
    p.max(f64::MIN_POSITIVE).min(f64::MAX)
}

/// Number of words in the corpus the default tables were sampled from
pub const DEFAULT_TOTAL: f64 = 1_024_908_267_229.0;

/// Past this many characters the length penalty underflows anyway
const MAX_PENALTY_EXPONENT: usize = 400;
