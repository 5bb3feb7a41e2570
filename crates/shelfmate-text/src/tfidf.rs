//! TF-IDF vectorization.
//!
//! ```text
//! tf(t, d)  = raw count of t in d
//! idf(t)    = ln((1 + n) / (1 + df(t))) + 1     (smoothed, the default)
//! idf(t)    = ln(n / df(t)) + 1                 (unsmoothed)
//! row(d)    = l2_normalize([tf(t, d) * idf(t) for t in vocabulary])
//! ```
//!
//! Vocabulary columns are assigned in lexicographic term order so the same
//! corpus always produces the same matrix.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use tracing::debug;

use shelfmate_core::traits::Vectorizer;
use shelfmate_core::types::{FeatureMatrix, SparseRow};

use crate::analyzer::Analyzer;

#[derive(Clone)]
pub struct TfidfVectorizer {
	analyzer: Analyzer,
	smooth_idf: bool,
}

impl TfidfVectorizer {
	pub fn english() -> Self { Self { analyzer: Analyzer::english(), smooth_idf: true } }

	pub fn with_analyzer(mut self, analyzer: Analyzer) -> Self {
		self.analyzer = analyzer;
		self
	}

	pub fn with_smooth_idf(mut self, smooth_idf: bool) -> Self {
		self.smooth_idf = smooth_idf;
		self
	}

	/// Learns the vocabulary and document frequencies of `corpus`.
	pub fn fit<S: AsRef<str>>(&self, corpus: &[S]) -> TfidfModel {
		let mut analyzer = self.analyzer.clone();
		let mut doc_freq: BTreeMap<String, usize> = BTreeMap::new();
		for doc in corpus {
			let terms: BTreeSet<String> = analyzer.tokens(doc.as_ref()).into_iter().collect();
			for term in terms { *doc_freq.entry(term).or_insert(0) += 1; }
		}

		let n = corpus.len() as f64;
		let mut vocabulary = HashMap::with_capacity(doc_freq.len());
		let mut idf = Vec::with_capacity(doc_freq.len());
		for (col, (term, df)) in doc_freq.into_iter().enumerate() {
			let df = df as f64;
			let weight = if self.smooth_idf { ((1.0 + n) / (1.0 + df)).ln() + 1.0 } else { (n / df).ln() + 1.0 };
			vocabulary.insert(term, col);
			idf.push(weight as f32);
		}
		debug!(documents = corpus.len(), terms = idf.len(), "fitted tf-idf vocabulary");
		TfidfModel { analyzer, vocabulary, idf }
	}
}

impl Default for TfidfVectorizer {
	fn default() -> Self { Self::english() }
}

impl Vectorizer for TfidfVectorizer {
	fn fit_transform(&self, corpus: &[String]) -> FeatureMatrix { self.fit(corpus).transform(corpus) }
}

/// A fitted vocabulary with per-term inverse document frequencies.
#[derive(Clone)]
pub struct TfidfModel {
	analyzer: Analyzer,
	vocabulary: HashMap<String, usize>,
	idf: Vec<f32>,
}

impl TfidfModel {
	pub fn vocabulary_size(&self) -> usize { self.idf.len() }

	pub fn column(&self, term: &str) -> Option<usize> { self.vocabulary.get(term).copied() }

	pub fn idf(&self, term: &str) -> Option<f32> { self.column(term).map(|col| self.idf[col]) }

	/// Weights each document against the fitted vocabulary; unseen terms are ignored.
	pub fn transform<S: AsRef<str>>(&self, corpus: &[S]) -> FeatureMatrix {
		let mut analyzer = self.analyzer.clone();
		let rows = corpus.iter().map(|doc| self.row(&mut analyzer, doc.as_ref())).collect();
		FeatureMatrix::from_rows(self.idf.len(), rows)
	}

	fn row(&self, analyzer: &mut Analyzer, text: &str) -> SparseRow {
		let mut counts: BTreeMap<usize, f32> = BTreeMap::new();
		for token in analyzer.tokens(text) {
			if let Some(&col) = self.vocabulary.get(&token) { *counts.entry(col).or_insert(0.0) += 1.0; }
		}
		let mut row: SparseRow = counts.into_iter().map(|(col, tf)| (col, tf * self.idf[col])).collect();
		let norm = row.iter().map(|&(_, w)| w * w).sum::<f32>().sqrt();
		if norm > 0.0 {
			for (_, w) in &mut row { *w /= norm; }
		}
		row
	}
}
