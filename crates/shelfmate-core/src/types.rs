//! Domain types shared by the text and engine crates.

use serde::{Deserialize, Serialize};

/// A sparse feature row: `(column, weight)` pairs sorted by column.
pub type SparseRow = Vec<(usize, f32)>;

/// A single catalog entry.
///
/// - `title`: the lookup key used by the title index
/// - `authors`: free-form author string as found in the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub title: String,
    pub authors: String,
}

impl Book {
    pub fn new(title: impl Into<String>, authors: impl Into<String>) -> Self {
        Self { title: title.into(), authors: authors.into() }
    }

    /// Text basis for similarity: title and authors joined by a space.
    pub fn content(&self) -> String {
        format!("{} {}", self.title, self.authors)
    }
}

/// A recommended title together with its catalog position and similarity
/// to the query. Higher `score` is always better.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredTitle {
    pub title: String,
    pub position: usize,
    pub score: f32,
}

/// One weighted row per document, one column per vocabulary term.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureMatrix {
    rows: Vec<SparseRow>,
    n_cols: usize,
}

impl FeatureMatrix {
    /// Builds a matrix from sparse rows. Each row is sorted by column and
    /// entries outside `0..n_cols` are dropped.
    pub fn from_rows(n_cols: usize, rows: Vec<SparseRow>) -> Self {
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.retain(|&(col, _)| col < n_cols);
                row.sort_by_key(|&(col, _)| col);
                row
            })
            .collect();
        Self { rows, n_cols }
    }

    pub fn n_rows(&self) -> usize { self.rows.len() }

    pub fn n_cols(&self) -> usize { self.n_cols }

    pub fn row(&self, i: usize) -> &[(usize, f32)] { &self.rows[i] }

    pub fn rows(&self) -> impl Iterator<Item = &[(usize, f32)]> + '_ {
        self.rows.iter().map(Vec::as_slice)
    }
}

/// Dense, square, symmetric similarity matrix stored row-major.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimilarityMatrix {
    n: usize,
    data: Vec<f32>,
}

impl SimilarityMatrix {
    /// Builds an `n × n` matrix from a pairwise score function.
    ///
    /// `score(i, j)` is only called for `i < j`; the lower triangle mirrors
    /// the upper one and the diagonal is fixed at 1.
    pub fn symmetric<F>(n: usize, mut score: F) -> Self
    where
        F: FnMut(usize, usize) -> f32,
    {
        let mut data = vec![0f32; n * n];
        for i in 0..n {
            data[i * n + i] = 1.0;
            for j in (i + 1)..n {
                let s = score(i, j);
                data[i * n + j] = s;
                data[j * n + i] = s;
            }
        }
        Self { n, data }
    }

    pub fn len(&self) -> usize { self.n }

    pub fn is_empty(&self) -> bool { self.n == 0 }

    pub fn get(&self, i: usize, j: usize) -> f32 { self.data[i * self.n + j] }

    pub fn row(&self, i: usize) -> &[f32] { &self.data[i * self.n..(i + 1) * self.n] }
}
