use super::vectorizer::SparseVector;

/// Dense all-pairs cosine similarity matrix
///
/// Row-major, `n * n` entries. Only the upper triangle is computed; the lower
/// triangle is mirrored from it so `get(i, j) == get(j, i)` holds exactly.
#[derive(Debug, Clone)]
pub struct SimilarityMatrix {
    size: usize,
    scores: Vec<f64>,
}

impl SimilarityMatrix {
    pub fn build(vectors: &[SparseVector]) -> Self {
        let size = vectors.len();
        let norms: Vec<f64> = vectors.iter().map(|v| dot(v, v).sqrt()).collect();
        let mut scores = vec![0.0; size * size];

        for i in 0..size {
            for j in i..size {
                let score = cosine(&vectors[i], &vectors[j], norms[i], norms[j]);
                scores[i * size + j] = score;
                scores[j * size + i] = score;
            }
        }

        Self { size, scores }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        if i >= self.size || j >= self.size {
            return None;
        }
        Some(self.scores[i * self.size + j])
    }

    /// Similarities of row `i` against every row, in catalog order
    pub fn row(&self, i: usize) -> Option<&[f64]> {
        if i >= self.size {
            return None;
        }
        Some(&self.scores[i * self.size..(i + 1) * self.size])
    }
}

/// Cosine of two sparse vectors; zero when either has no weight
fn cosine(a: &SparseVector, b: &SparseVector, norm_a: f64, norm_b: f64) -> f64 {
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot(a, b) / (norm_a * norm_b)
}

/// Merge-join dot product over index-sorted sparse vectors
fn dot(a: &SparseVector, b: &SparseVector) -> f64 {
    let (mut i, mut j) = (0, 0);
    let mut sum = 0.0;

    while i < a.len() && j < b.len() {
        match a[i].0.cmp(&b[j].0) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                sum += a[i].1 * b[j].1;
                i += 1;
                j += 1;
            }
        }
    }

    sum
}
