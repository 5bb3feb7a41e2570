use std::sync::Arc;

use shelfmate_core::catalog::{CatalogLoader, RawRecord};
use shelfmate_core::traits::{Recommender, Vectorizer};
use shelfmate_core::types::{Book, FeatureMatrix};
use shelfmate_core::Error;
use shelfmate_engine::ContentRecommender;

fn books(pairs: &[(&str, &str)]) -> Vec<Book> { pairs.iter().map(|(t, a)| Book::new(*t, *a)).collect() }

fn shelf() -> ContentRecommender {
    ContentRecommender::build(books(&[
        ("Dune", "Frank Herbert"),
        ("Dune Messiah", "Frank Herbert"),
        ("1984", "George Orwell"),
        ("Animal Farm", "George Orwell"),
        ("Children of Dune", "Frank Herbert"),
        ("Emma", "Jane Austen"),
        ("Persuasion", "Jane Austen"),
    ]))
    .expect("build")
}

#[test]
fn dune_recommends_its_sequel() {
    let rec = ContentRecommender::build(books(&[
        ("Dune", "Frank Herbert"),
        ("Dune Messiah", "Frank Herbert"),
        ("1984", "George Orwell"),
    ]))
    .expect("build");

    assert_eq!(rec.recommend("Dune", 1).expect("known title"), vec!["Dune Messiah"]);
}

#[test]
fn single_book_catalog_recommends_nothing() {
    let rec = ContentRecommender::build(books(&[("Dune", "Frank Herbert")])).expect("build");
    assert!(rec.recommend("Dune", 5).expect("known title").is_empty());
}

#[test]
fn lookup_is_exact_and_case_sensitive() {
    let rec = shelf();
    for query in ["dune", "DUNE", " Dune", "Dune ", "Dune\n", "Dunes"] {
        let err = rec.recommend(query, 3).expect_err("not an exact title");
        assert!(matches!(err, Error::UnknownTitle(ref t) if t == query), "got {err:?}");
    }
}

#[test]
fn results_have_expected_length_and_exclude_the_query() {
    let rec = shelf();
    for book in rec.books() {
        for k in [0, 1, 3, 6, 7, 50] {
            let recs = rec.recommend(&book.title, k).expect("known title");
            assert_eq!(recs.len(), k.min(rec.len() - 1), "k={k} title={}", book.title);
            assert!(!recs.contains(&book.title));
            assert_eq!(recs, rec.recommend(&book.title, k).expect("repeat"), "deterministic");
        }
    }
}

#[test]
fn same_author_ranks_above_strangers() {
    let rec = shelf();
    let recs = rec.recommend_scored("Emma", 6).expect("known title");
    assert_eq!(recs[0].title, "Persuasion");
    assert!(recs[0].score > 0.0);
    assert!(recs.windows(2).all(|w| w[0].score >= w[1].score));

    let mut dune = rec.recommend("Dune", 2).expect("known title");
    dune.sort();
    assert_eq!(dune, vec!["Children of Dune", "Dune Messiah"]);
}

#[test]
fn zero_scores_fall_back_to_catalog_order() {
    let rec = ContentRecommender::build(books(&[
        ("Alpha", "Aaron"),
        ("Bravo", "Bella"),
        ("Charlie", "Carl"),
        ("Delta", "Dora"),
    ]))
    .expect("build");

    let recs = rec.recommend_scored("Charlie", 3).expect("known title");
    let titles: Vec<&str> = recs.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, vec!["Alpha", "Bravo", "Delta"]);
    assert!(recs.iter().all(|r| r.score == 0.0));
    assert_eq!(recs.iter().map(|r| r.position).collect::<Vec<_>>(), vec![0, 1, 3]);
}

#[test]
fn first_occurrence_of_a_title_wins() {
    let rec = ContentRecommender::build(books(&[
        ("Emma", "Jane Austen"),
        ("Persuasion", "Jane Austen"),
        ("Emma", "Someone Else"),
    ]))
    .expect("build");

    assert_eq!(rec.position_of("Emma"), Some(0));
    assert!(rec.contains("Persuasion"));
    let recs = rec.recommend_scored("Emma", 2).expect("known title");
    assert_eq!(recs.len(), 1, "every book titled Emma is excluded");
    assert_eq!(recs[0].position, 1);
}

#[test]
fn repeated_titles_from_the_loader_are_never_recommended() {
    let catalog = CatalogLoader::new().clean([
        RawRecord::new(Some("Emma"), Some("Jane Austen")),
        RawRecord::new(Some("Persuasion"), Some("Jane Austen")),
        RawRecord::new(Some("Emma"), Some("Jane Austen, Fiona Stafford")),
    ]);
    assert_eq!(catalog.books.len(), 3, "same title with other authors is kept");
    let rec = ContentRecommender::build(catalog.books).expect("build");

    let recs = rec.recommend("Emma", 2).expect("known title");
    assert_eq!(recs, vec!["Persuasion"]);
    assert!(!recs.contains(&"Emma".to_string()));

    let recs = rec.recommend("Persuasion", 5).expect("known title");
    assert_eq!(recs.len(), 2);
    assert!(recs.iter().all(|t| t == "Emma"));
}

#[test]
fn similarity_is_symmetric_with_unit_diagonal() {
    let rec = shelf();
    for i in 0..rec.len() {
        assert_eq!(rec.similarity(i, i), 1.0);
        for j in 0..rec.len() {
            assert_eq!(rec.similarity(i, j), rec.similarity(j, i));
        }
    }
    assert_eq!(rec.features().n_rows(), rec.len());
    assert!(rec.vocabulary_size() > 0);
}

#[test]
fn trait_object_answers_like_the_concrete_type() {
    let rec = shelf();
    let dynamic: &dyn Recommender = &rec;
    assert_eq!(dynamic.catalog().len(), 7);
    assert_eq!(dynamic.recommend("1984", 1).expect("known title"), vec!["Animal Farm"]);
    assert!(matches!(dynamic.recommend("Ulysses", 1), Err(Error::UnknownTitle(_))));
}

#[test]
fn concurrent_queries_share_one_instance() {
    let rec = Arc::new(shelf());
    let expected = rec.recommend("Dune", 3).expect("known title");
    std::thread::scope(|s| {
        for _ in 0..4 {
            let rec = Arc::clone(&rec);
            let expected = expected.clone();
            s.spawn(move || assert_eq!(rec.recommend("Dune", 3).expect("known title"), expected));
        }
    });
}

struct ShortVectorizer;

impl Vectorizer for ShortVectorizer {
    fn fit_transform(&self, _corpus: &[String]) -> FeatureMatrix { FeatureMatrix::from_rows(1, vec![vec![(0, 1.0)]]) }
}

#[test]
fn vectorizer_row_count_must_match_catalog() {
    let result = ContentRecommender::with_vectorizer(books(&[("A book", "Ann"), ("B book", "Bob")]), &ShortVectorizer);
    assert!(matches!(result, Err(Error::DimensionMismatch { expected: 2, got: 1 })));
}
