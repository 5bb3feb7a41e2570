use proptest::prelude::*;

use shelfmate_core::traits::Vectorizer;
use shelfmate_text::{cosine, cosine_similarity, Analyzer, TfidfVectorizer};

fn corpus(docs: &[&str]) -> Vec<String> { docs.iter().map(|d| d.to_string()).collect() }

#[test]
fn analyzer_lowercases_and_drops_stop_words_and_single_chars() {
    let mut analyzer = Analyzer::english();
    assert_eq!(analyzer.tokens("The Lord of the Rings J.R.R. Tolkien"), vec!["lord", "rings", "tolkien"]);
    assert_eq!(
        analyzer.tokens("Harry Potter and the Philosopher's Stone"),
        vec!["harry", "potter", "philosopher", "stone"]
    );
    assert_eq!(analyzer.tokens("1984 George Orwell"), vec!["1984", "george", "orwell"]);
}

#[test]
fn custom_stop_words_replace_the_english_list() {
    let mut analyzer = Analyzer::with_stop_words(["dune"]);
    assert_eq!(analyzer.tokens("The Dune Saga"), vec!["the", "saga"]);
}

#[test]
fn smoothed_idf_and_sorted_vocabulary() {
    let docs = corpus(&["Dune Frank Herbert", "Dune Messiah Frank Herbert", "1984 George Orwell"]);
    let model = TfidfVectorizer::english().fit(&docs);

    assert_eq!(model.vocabulary_size(), 7);
    assert_eq!(model.column("1984"), Some(0), "digits sort before letters");
    assert_eq!(model.column("orwell"), Some(6));
    let shared = model.idf("dune").expect("dune");
    let rare = model.idf("messiah").expect("messiah");
    assert!((shared - ((4.0f32 / 3.0).ln() + 1.0)).abs() < 1e-5);
    assert!((rare - (2.0f32.ln() + 1.0)).abs() < 1e-5);
    assert!(model.idf("the").is_none());
}

#[test]
fn unsmoothed_idf_gives_ubiquitous_terms_weight_one() {
    let docs = corpus(&["alpha beta", "alpha gamma"]);
    let model = TfidfVectorizer::english().with_smooth_idf(false).fit(&docs);
    assert!((model.idf("alpha").expect("alpha") - 1.0).abs() < 1e-6);
}

#[test]
fn rows_are_l2_normalised_and_stop_word_documents_are_empty() {
    let docs = corpus(&["whale whale ahab", "the and of", "ahab"]);
    let features = TfidfVectorizer::english().fit_transform(&docs);

    assert_eq!(features.n_rows(), 3);
    assert_eq!(features.n_cols(), 2);
    let norm: f32 = features.row(0).iter().map(|&(_, w)| w * w).sum::<f32>().sqrt();
    assert!((norm - 1.0).abs() < 1e-5);
    assert!(features.row(1).is_empty());
    let whale = features.row(0).iter().find(|&&(c, _)| c == 1).expect("whale").1;
    let ahab = features.row(0).iter().find(|&&(c, _)| c == 0).expect("ahab").1;
    assert!(whale > ahab, "repeated rarer term outweighs shared one");
}

#[test]
fn transform_ignores_unseen_terms() {
    let model = TfidfVectorizer::english().fit(&corpus(&["dune herbert"]));
    let features = model.transform(&["unseen words only", "herbert"][..]);
    assert!(features.row(0).is_empty());
    assert_eq!(features.row(1).len(), 1);
}

#[test]
fn cosine_matrix_is_symmetric_with_unit_diagonal() {
    let docs = corpus(&["Dune Frank Herbert", "Dune Messiah Frank Herbert", "1984 George Orwell", "the of"]);
    let sim = cosine_similarity(&TfidfVectorizer::english().fit_transform(&docs));

    assert_eq!(sim.len(), 4);
    for i in 0..4 {
        assert_eq!(sim.get(i, i), 1.0);
        for j in 0..4 {
            assert_eq!(sim.get(i, j), sim.get(j, i));
            assert!((0.0..=1.0).contains(&sim.get(i, j)));
        }
    }
    assert!(sim.get(0, 1) > 0.5);
    assert_eq!(sim.get(0, 2), 0.0);
    assert_eq!(sim.get(3, 0), 0.0, "empty row scores zero against others");
}

#[test]
fn cosine_of_pairs() {
    let a: Vec<(usize, f32)> = vec![(0, 1.0), (2, 1.0)];
    let b: Vec<(usize, f32)> = vec![(0, 2.0), (2, 2.0)];
    assert!((cosine(&a, &b) - 1.0).abs() < 1e-6);
    assert_eq!(cosine(&a, &[(1, 3.0)]), 0.0);
    assert_eq!(cosine(&a, &[]), 0.0);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn similarity_properties_hold_for_arbitrary_corpora(
        docs in prop::collection::vec("[a-f]{2,4}( [a-f]{2,4}){0,4}", 1..10),
    ) {
        let features = TfidfVectorizer::english().fit_transform(&docs);
        prop_assert_eq!(features.n_rows(), docs.len());
        let sim = cosine_similarity(&features);
        for i in 0..docs.len() {
            prop_assert_eq!(sim.get(i, i), 1.0);
            for j in 0..docs.len() {
                prop_assert_eq!(sim.get(i, j), sim.get(j, i));
                prop_assert!(sim.get(i, j) >= 0.0 && sim.get(i, j) <= 1.0);
            }
        }
    }
}
