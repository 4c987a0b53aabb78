use once_cell::sync::Lazy;
use rayon::prelude::*;

use wordsplit::{clean, Config, Model, Search, Segmenter};

macro_rules! assert_segments {
    ($list:expr) => {
        let mut search = Search::default();
        let words = SEGMENTER
            .segment(&$list.concat(), &mut search)
            .collect::<Vec<_>>();
        assert_eq!(words, $list);
    };
}

#[test]
fn test_segment_0() {
    assert_segments!(&["this", "is", "a", "test"]);
}

#[test]
fn test_segment_1() {
    assert_segments!(&["now", "is", "the", "time", "for", "all", "good", "men"]);
}

#[test]
fn test_segment_2() {
    assert_segments!(&["to", "come", "to", "the", "aid", "of", "their", "party"]);
}

#[test]
fn choose_spain() {
    let model = Model::new(
        vec![
            ("choose".into(), 80_000.0),
            ("chooses".into(), 7_000.0),
            ("spain".into(), 20_000.0),
            ("pain".into(), 90_000.0),
        ],
        vec![(("choose".into(), "spain".into()), 7.0)],
    );
    assert_eq!(model.total(), wordsplit::DEFAULT_TOTAL);

    let segmenter = Segmenter::new(model);
    let mut search = Search::default();
    let words = segmenter.segment("choosespain", &mut search).collect::<Vec<_>>();
    assert_eq!(words, ["choose", "spain"]);
}

#[test]
fn cleans_input() {
    let mut search = Search::default();
    let words = SEGMENTER
        .segment("This is... a TEST!", &mut search)
        .collect::<Vec<_>>();
    assert_eq!(words, ["this", "is", "a", "test"]);
}

#[test]
fn empty() {
    let mut search = Search::default();
    assert_eq!(SEGMENTER.segment("", &mut search).count(), 0);
    assert_eq!(SEGMENTER.isegment("").count(), 0);
}

#[test]
fn reproduces_cleaned_text() {
    let long = long_text();
    let mut search = Search::default();
    for text in [
        "Hello, World! 1234",
        "xkcd927standards",
        "thequickbrownfoxjumpsoverthelazydog",
        long.as_str(),
    ]
    .iter()
    {
        let words = SEGMENTER.segment(text, &mut search).collect::<Vec<_>>();
        assert_eq!(words.concat(), clean(text));
    }
}

#[test]
fn deterministic() {
    let text = long_text();
    let mut search = Search::default();
    let first = SEGMENTER.segment(&text, &mut search).collect::<Vec<_>>().join(" ");
    let second = SEGMENTER.segment(&text, &mut search).collect::<Vec<_>>().join(" ");
    assert_eq!(first, second);
}

#[test]
fn long_input() {
    let text = long_text();
    assert!(text.len() > 500);

    let mut search = Search::default();
    let words = SEGMENTER.segment(&text, &mut search).collect::<Vec<_>>();
    assert_eq!(words, long_words());
}

#[test]
fn small_chunks() {
    let config = Config {
        chunk_size: 16,
        carry: 3,
        ..Config::default()
    };
    let segmenter = Segmenter::with_config(SEGMENTER.model().clone(), config).unwrap();

    let mut search = Search::default();
    let words = segmenter.segment(&long_text(), &mut search).collect::<Vec<_>>();
    assert_eq!(words, long_words());

    let lazy = segmenter.isegment(&long_text()).collect::<Vec<_>>();
    assert_eq!(lazy.iter().map(|w| w.as_str()).collect::<Vec<_>>(), long_words());
}

#[test]
fn shared_between_threads() {
    let inputs = (0..32)
        .map(|i| SENTENCE[i % SENTENCE.len()..].concat().repeat(1 + i % 7))
        .collect::<Vec<_>>();

    let sequential = inputs
        .iter()
        .map(|text| {
            let mut search = Search::default();
            let words = SEGMENTER.segment(text, &mut search).collect::<Vec<_>>();
            words.join(" ")
        })
        .collect::<Vec<_>>();

    let parallel = inputs
        .par_iter()
        .map_init(Search::default, |search, text| {
            SEGMENTER.segment(text, search).collect::<Vec<_>>().join(" ")
        })
        .collect::<Vec<_>>();

    assert_eq!(sequential, parallel);
}

fn long_text() -> String {
    long_words().concat()
}

fn long_words() -> Vec<&'static str> {
    SENTENCE.iter().copied().cycle().take(SENTENCE.len() * 12).collect()
}

const SENTENCE: &[&str] = &[
    "now", "is", "the", "time", "for", "all", "good", "men", "to", "come", "to", "the", "aid",
    "of", "their", "party",
];

const EXTRA: &[&str] = &["this", "a", "test"];

static SEGMENTER: Lazy<Segmenter> = Lazy::new(|| {
    let unigrams = SENTENCE
        .iter()
        .chain(EXTRA.iter())
        .map(|&word| (word.into(), 10.0));
    let mut model = Model::new(unigrams, Vec::new());
    model.set_total(100.0);
    Segmenter::new(model)
});
