//! shelfmate-text
//!
//! Text analysis (tantivy tokenizer chain + English stop words), TF-IDF
//! vectorization and cosine similarity over sparse feature rows.

pub mod analyzer;
pub mod similarity;
pub mod stopwords;
pub mod tfidf;

pub use analyzer::Analyzer;
pub use similarity::{cosine, cosine_similarity};
pub use tfidf::{TfidfModel, TfidfVectorizer};
