#![cfg(feature = "__test_data")]

use std::path::PathBuf;

use crate::{LoadOptions, Model, Segmenter};

#[test]
fn test_data() {
    crate::test_cases::run(&segmenter(crate_data_dir()));
}

#[test]
fn computed_total() {
    let model = Model::from_dir(&crate_data_dir(), LoadOptions::default()).unwrap();
    assert_eq!(model.total(), crate::DEFAULT_TOTAL);

    let options = LoadOptions {
        compute_total: true,
    };
    let mut model = Model::from_dir(&crate_data_dir(), options).unwrap();
    let total = model.total();
    assert_ne!(total, crate::DEFAULT_TOTAL);
    assert_eq!(model.recompute_total(), total);
    assert_eq!(model.score("the", None), model.unigram("the").unwrap() / total);
}

pub fn segmenter(dir: PathBuf) -> Segmenter {
    let model = Model::from_dir(&dir, LoadOptions::default())
        .unwrap_or_else(|e| panic!("failed to load tables from {:?}: {}", dir, e));
    Segmenter::new(model)
}

pub fn crate_data_dir() -> PathBuf {
    PathBuf::from(format!("{}/../data", env!("CARGO_MANIFEST_DIR")))
}
