use shelfmate_core::types::{FeatureMatrix, SimilarityMatrix};

/// Pairwise cosine similarity of every row against every other row.
///
/// Scores are clamped to `[0, 1]`, the matrix is exactly symmetric and its
/// diagonal is 1 even for rows with no terms.
pub fn cosine_similarity(features: &FeatureMatrix) -> SimilarityMatrix {
	let norms: Vec<f32> = features.rows().map(norm).collect();
	SimilarityMatrix::symmetric(features.n_rows(), |i, j| {
		let denom = norms[i] * norms[j];
		if denom == 0.0 { return 0.0; }
		(dot(features.row(i), features.row(j)) / denom).clamp(0.0, 1.0)
	})
}

/// Cosine of two sparse rows; 0 when either row is empty.
pub fn cosine(a: &[(usize, f32)], b: &[(usize, f32)]) -> f32 {
	let denom = norm(a) * norm(b);
	if denom == 0.0 { 0.0 } else { dot(a, b) / denom }
}

fn norm(row: &[(usize, f32)]) -> f32 { row.iter().map(|&(_, w)| w * w).sum::<f32>().sqrt() }

// Both rows are sorted by column.
fn dot(a: &[(usize, f32)], b: &[(usize, f32)]) -> f32 {
	let (mut i, mut j, mut acc) = (0, 0, 0f32);
	while i < a.len() && j < b.len() {
		match a[i].0.cmp(&b[j].0) {
			std::cmp::Ordering::Less => i += 1,
			std::cmp::Ordering::Greater => j += 1,
			std::cmp::Ordering::Equal => { acc += a[i].1 * b[j].1; i += 1; j += 1; }
		}
	}
	acc
}
