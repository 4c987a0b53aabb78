use wordsplit::{Model, Search, Segmenter};

fn main() {
    let unigrams = vec![
        ("choose".into(), 80_000.0),
        ("chooses".into(), 7_000.0),
        ("spain".into(), 20_000.0),
        ("pain".into(), 90_000.0),
    ];
    let bigrams = vec![
        (("choose".into(), "spain".into()), 7.0),
        (("chooses".into(), "pain".into()), 0.0),
    ];

    let segmenter = Segmenter::new(Model::new(unigrams, bigrams));
    let mut search = Search::default();

    let words = segmenter.segment("choosespain", &mut search);
    println!("{:?}", words.collect::<Vec<&str>>());

    let model = segmenter.model();
    for sentence in [["choose", "spain"], ["chooses", "pain"]].iter() {
        let score = model.score_sentence(sentence.iter().copied());
        println!("{:?}: {:?}", sentence, score);
    }
}
