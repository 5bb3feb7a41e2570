use tantivy::tokenizer::{LowerCaser, SimpleTokenizer, StopWordFilter, TextAnalyzer, TokenStream};

use crate::stopwords;

/// Tokens shorter than this many characters are discarded.
pub const MIN_TOKEN_CHARS: usize = 2;

/// Tokenizer chain used for both vocabulary fitting and transformation:
/// split on non-alphanumerics, lowercase, drop stop words and single characters.
#[derive(Clone)]
pub struct Analyzer {
	inner: TextAnalyzer,
}

impl Analyzer {
	pub fn english() -> Self {
		Self::with_stop_words(stopwords::ENGLISH.iter().copied())
	}

	pub fn with_stop_words<'a, I>(words: I) -> Self
	where
		I: IntoIterator<Item = &'a str>,
	{
		let inner = TextAnalyzer::builder(SimpleTokenizer::default())
			.filter(LowerCaser)
			.filter(StopWordFilter::remove(words.into_iter().map(str::to_string)))
			.build();
		Self { inner }
	}

	pub fn tokens(&mut self, text: &str) -> Vec<String> {
		let mut out = Vec::new();
		let mut stream = self.inner.token_stream(text);
		while stream.advance() {
			let token = &stream.token().text;
			if token.chars().count() >= MIN_TOKEN_CHARS { out.push(token.clone()); }
		}
		out
	}
}

impl Default for Analyzer {
	fn default() -> Self { Self::english() }
}
