use crate::error::Result;
use crate::types::{Book, FeatureMatrix, ScoredTitle};

pub trait Vectorizer: Send + Sync {
    /// Learns a vocabulary from `corpus` and returns one row per document.
    fn fit_transform(&self, corpus: &[String]) -> FeatureMatrix;
}

pub trait Recommender: Send + Sync {
    fn catalog(&self) -> &[Book];

    /// Whether some book carries exactly `title`.
    fn contains(&self, title: &str) -> bool { self.catalog().iter().any(|b| b.title == title) }

    fn recommend_scored(&self, title: &str, k: usize) -> Result<Vec<ScoredTitle>>;

    fn recommend(&self, title: &str, k: usize) -> Result<Vec<String>> {
        Ok(self.recommend_scored(title, k)?.into_iter().map(|hit| hit.title).collect())
    }
}
