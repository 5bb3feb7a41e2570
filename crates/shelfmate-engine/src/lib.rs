//! Content-based book recommender.
//!
//! [`ContentRecommender`] is built once from a cleaned catalog and then
//! answers read-only queries. Every structure it owns is immutable after
//! construction, so a single value can be shared across threads.

use std::collections::HashMap;
use std::time::Instant;

use tracing::{debug, info};

use shelfmate_core::error::{Error, Result};
use shelfmate_core::traits::{Recommender, Vectorizer};
use shelfmate_core::types::{Book, FeatureMatrix, ScoredTitle, SimilarityMatrix};
use shelfmate_text::{cosine_similarity, TfidfVectorizer};

pub struct ContentRecommender {
    books: Vec<Book>,
    features: FeatureMatrix,
    similarity: SimilarityMatrix,
    index: HashMap<String, usize>,
}

impl ContentRecommender {
    /// Builds with the English TF-IDF vectorizer.
    pub fn build(books: Vec<Book>) -> Result<Self> { Self::with_vectorizer(books, &TfidfVectorizer::english()) }

    pub fn with_vectorizer<V>(books: Vec<Book>, vectorizer: &V) -> Result<Self>
    where
        V: Vectorizer + ?Sized,
    {
        let start = Instant::now();
        let corpus: Vec<String> = books.iter().map(Book::content).collect();
        let features = vectorizer.fit_transform(&corpus);
        if features.n_rows() != books.len() {
            return Err(Error::DimensionMismatch { expected: books.len(), got: features.n_rows() });
        }
        debug!(rows = features.n_rows(), terms = features.n_cols(), "feature matrix ready");

        let similarity = cosine_similarity(&features);

        // first occurrence of a title wins
        let mut index = HashMap::with_capacity(books.len());
        for (pos, book) in books.iter().enumerate() {
            index.entry(book.title.clone()).or_insert(pos);
        }

        info!(
            books = books.len(),
            titles = index.len(),
            vocabulary = features.n_cols(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "recommender built"
        );
        Ok(Self { books, features, similarity, index })
    }

    pub fn len(&self) -> usize { self.books.len() }

    pub fn is_empty(&self) -> bool { self.books.is_empty() }

    pub fn books(&self) -> &[Book] { &self.books }

    pub fn contains(&self, title: &str) -> bool { self.index.contains_key(title) }

    /// Exact, case-sensitive lookup.
    pub fn position_of(&self, title: &str) -> Option<usize> { self.index.get(title).copied() }

    pub fn similarity(&self, i: usize, j: usize) -> f32 { self.similarity.get(i, j) }

    pub fn vocabulary_size(&self) -> usize { self.features.n_cols() }

    pub fn features(&self) -> &FeatureMatrix { &self.features }

    /// Up to `k` books ranked by similarity to `title`, best first.
    ///
    /// Scores come from the first book carrying `title`. Equal scores are
    /// ordered by catalog position. No book with the queried title is ever
    /// returned, so the length is `min(k, n)` where `n` counts the books
    /// whose title differs from `title`.
    pub fn recommend_scored(&self, title: &str, k: usize) -> Result<Vec<ScoredTitle>> {
        let idx = self.position_of(title).ok_or_else(|| Error::UnknownTitle(title.to_string()))?;
        let mut ranked: Vec<(usize, f32)> = self
            .similarity
            .row(idx)
            .iter()
            .copied()
            .enumerate()
            .filter(|&(pos, _)| self.books[pos].title != title)
            .collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked.truncate(k);
        Ok(ranked
            .into_iter()
            .map(|(position, score)| ScoredTitle { title: self.books[position].title.clone(), position, score })
            .collect())
    }
}

impl Recommender for ContentRecommender {
    fn catalog(&self) -> &[Book] { self.books() }
    fn contains(&self, title: &str) -> bool { Self::contains(self, title) }
    fn recommend_scored(&self, title: &str, k: usize) -> Result<Vec<ScoredTitle>> { Self::recommend_scored(self, title, k) }
}
