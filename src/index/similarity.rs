use std::time::Instant;

use super::vectorizer::SparseVector;

/// Dense pairwise cosine similarity over the whole corpus.
///
/// Only the upper triangle (diagonal included) is stored, so `get(i, j)` and
/// `get(j, i)` read the same cell.
#[derive(Debug, Clone)]
pub struct SimilarityMatrix {
    size: usize,
    values: Vec<f32>,
}

impl SimilarityMatrix {
    /// Computes every pair once. Rows must already be L2-normalized.
    pub fn compute(vectors: &[SparseVector]) -> Self {
        let started = Instant::now();
        let size = vectors.len();
        let mut values = Vec::with_capacity(size * (size + 1) / 2);

        for (i, row) in vectors.iter().enumerate() {
            for column in &vectors[i..] {
                let score = row.dot(column).clamp(0.0, 1.0) as f32;
                values.push(score);
            }
        }

        tracing::info!(
            size,
            cells = values.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Similarity matrix computed"
        );

        Self { size, values }
    }

    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Similarity between rows `i` and `j`.
    ///
    /// Panics if either index is out of range.
    pub fn get(&self, i: usize, j: usize) -> f32 {
        assert!(
            i < self.size && j < self.size,
            "index ({i}, {j}) out of range for {} rows",
            self.size
        );
        let (row, column) = if i <= j { (i, j) } else { (j, i) };
        self.values[self.offset(row, column)]
    }

    /// All scores for row `i`, in corpus order.
    pub fn row(&self, i: usize) -> impl Iterator<Item = f32> + '_ {
        (0..self.size).map(move |j| self.get(i, j))
    }

    fn offset(&self, row: usize, column: usize) -> usize {
        row * (2 * self.size - row - 1) / 2 + column
    }
}
