//! # TicketLens Index
//!
//! Position-addressed storage for ticket embeddings plus the bookkeeping that
//! maps positions back to ticket identifiers.
//!
//! ## Core pieces
//!
//! - [`VectorIndex`]: append-only matrix of unit-length vectors with exact
//!   top-k inner-product search. Because every stored vector and every query is
//!   L2-normalized by the index itself, the inner product *is* the cosine
//!   similarity.
//! - [`CorrelationTable`]: dense position → ticket id mapping. Position `i` in
//!   the table and row `i` in the index always describe the same ticket; the
//!   owner of both is responsible for appending to them in lockstep.
//!
//! Search is a brute-force scan over an `ndarray` matrix. At the scale of a
//! ticket tracker that is both fast enough and exact, so there is no recall
//! trade-off to tune.
//!
//! ## Example Usage
//!
//! ```
//! use index::{CorrelationTable, VectorIndex};
//!
//! let mut vectors = VectorIndex::new();
//! let mut positions = CorrelationTable::new();
//!
//! let pos = vectors.add(vec![3.0, 4.0]).unwrap();
//! assert_eq!(positions.append(42), pos);
//!
//! let hits = vectors.search(&[1.0, 0.0], 5).unwrap();
//! assert_eq!(hits.len(), 1);
//! assert_eq!(positions.resolve(hits[0].position).unwrap(), 42);
//! assert!((hits[0].score - 0.6).abs() < 1e-6);
//! ```

mod correlation;

pub use correlation::CorrelationTable;

use ndarray::{Array2, ArrayView1};
use thiserror::Error;

/// Errors raised by the vector index and correlation table.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum IndexError {
    #[error("Dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },
    #[error("Vector has zero length and cannot be normalized")]
    ZeroVector,
    #[error("Vector contains non-finite values")]
    NonFinite,
    #[error("Position {position} out of range (len {len})")]
    PositionOutOfRange { position: usize, len: usize },
    #[error("Shape error: {0}")]
    Shape(String),
}

/// A single search hit: row position and cosine similarity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VectorHit {
    pub position: usize,
    pub score: f32,
}

/// Append-only exact inner-product index over unit-length vectors.
#[derive(Debug, Clone, Default)]
pub struct VectorIndex {
    dimension: Option<usize>,
    vectors: Option<Array2<f32>>,
}

impl VectorIndex {
    /// Create an empty index whose dimension is fixed by the first vector added.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty index that only accepts vectors of `dimension`.
    pub fn with_dimension(dimension: usize) -> Self {
        Self {
            dimension: Some(dimension),
            vectors: None,
        }
    }

    /// Dimension accepted by the index, if already fixed.
    pub fn dimension(&self) -> Option<usize> {
        self.dimension
    }

    /// Number of stored vectors.
    pub fn len(&self) -> usize {
        self.vectors.as_ref().map_or(0, |m| m.nrows())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Validate `vector` exactly as [`add`](Self::add) would, without storing it.
    pub fn check(&self, vector: &[f32]) -> Result<(), IndexError> {
        self.check_dimension(vector.len())?;
        validate_components(vector)
    }

    /// Normalize and append `vector`, returning its position (the size before the call).
    pub fn add(&mut self, mut vector: Vec<f32>) -> Result<usize, IndexError> {
        self.check(&vector)?;
        normalize(&mut vector);

        let dim = vector.len();
        let position = self.len();
        let matrix = self
            .vectors
            .get_or_insert_with(|| Array2::zeros((0, dim)));
        matrix
            .push_row(ArrayView1::from(&vector))
            .map_err(|e| IndexError::Shape(e.to_string()))?;
        if self.dimension.is_none() {
            tracing::debug!(dimension = dim, "vector index dimension fixed by first vector");
        }
        self.dimension = Some(dim);

        Ok(position)
    }

    /// Exact top-k search by inner product.
    ///
    /// The query is normalized first. Results are ordered by descending score;
    /// equal scores keep ascending position order. `k` is clamped to the index
    /// size and an empty index yields no hits.
    pub fn search(&self, query: &[f32], k: usize) -> Result<Vec<VectorHit>, IndexError> {
        let matrix = match self.vectors.as_ref() {
            Some(m) if m.nrows() > 0 => m,
            _ => return Ok(Vec::new()),
        };
        self.check(query)?;

        let k = k.min(matrix.nrows());
        if k == 0 {
            return Ok(Vec::new());
        }

        let mut query = query.to_vec();
        normalize(&mut query);
        let scores = matrix.dot(&ArrayView1::from(&query));

        let mut hits: Vec<VectorHit> = scores
            .iter()
            .enumerate()
            .map(|(position, &score)| VectorHit {
                position,
                score: score.clamp(-1.0, 1.0),
            })
            .collect();

        hits.sort_by(|a, b| {
            b.score
                .total_cmp(&a.score)
                .then_with(|| a.position.cmp(&b.position))
        });
        hits.truncate(k);

        Ok(hits)
    }

    fn check_dimension(&self, got: usize) -> Result<(), IndexError> {
        match self.dimension {
            Some(expected) if expected != got => {
                Err(IndexError::DimensionMismatch { expected, got })
            }
            None if got == 0 => Err(IndexError::ZeroVector),
            _ => Ok(()),
        }
    }
}

fn validate_components(vector: &[f32]) -> Result<(), IndexError> {
    if vector.iter().any(|x| !x.is_finite()) {
        return Err(IndexError::NonFinite);
    }
    if vector.iter().all(|x| *x == 0.0) {
        return Err(IndexError::ZeroVector);
    }
    Ok(())
}

// Mirrors `semantic::l2_normalize_in_place`; this crate takes no workspace dependencies.
fn normalize(v: &mut [f32]) {
    let norm = v.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        let inv = norm.recip();
        v.iter_mut().for_each(|x| *x *= inv);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_returns_dense_positions() {
        let mut index = VectorIndex::new();
        assert_eq!(index.add(vec![1.0, 0.0, 0.0]).unwrap(), 0);
        assert_eq!(index.add(vec![0.0, 1.0, 0.0]).unwrap(), 1);
        assert_eq!(index.add(vec![0.0, 0.0, 1.0]).unwrap(), 2);
        assert_eq!(index.len(), 3);
        assert_eq!(index.dimension(), Some(3));
    }

    #[test]
    fn search_ranks_by_descending_score() {
        let mut index = VectorIndex::new();
        index.add(vec![1.0, 0.0, 0.0]).unwrap();
        index.add(vec![0.0, 1.0, 0.0]).unwrap();
        index.add(vec![1.0, 1.0, 0.0]).unwrap();

        let hits = index.search(&[1.0, 0.2, 0.0], 3).unwrap();
        assert_eq!(hits.len(), 3);
        assert_eq!(hits[0].position, 0);
        assert_eq!(hits[1].position, 2);
        assert_eq!(hits[2].position, 1);
        assert!(hits.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn stored_vectors_are_normalized() {
        let mut index = VectorIndex::new();
        index.add(vec![10.0, 0.0]).unwrap();
        let hits = index.search(&[5.0, 0.0], 1).unwrap();
        assert!((hits[0].score - 1.0).abs() < 1e-6);
    }

    #[test]
    fn search_on_empty_index_is_empty() {
        let index = VectorIndex::with_dimension(3);
        assert!(index.search(&[1.0, 0.0, 0.0], 5).unwrap().is_empty());
        let unfixed = VectorIndex::new();
        assert!(unfixed.search(&[1.0], 5).unwrap().is_empty());
    }

    #[test]
    fn normalize_yields_unit_length() {
        let mut v = vec![3.0, -4.0, 12.0];
        normalize(&mut v);
        let norm = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-6);
        assert!((v[0] - 3.0 / 13.0).abs() < 1e-6);

        let mut zero = vec![0.0, 0.0];
        normalize(&mut zero);
        assert_eq!(zero, vec![0.0, 0.0]);
    }

    #[test]
    fn first_add_fixes_dimension() {
        let mut index = VectorIndex::new();
        assert_eq!(index.dimension(), None);
        index.add(vec![1.0, 2.0]).unwrap();
        assert_eq!(index.dimension(), Some(2));
        assert!(matches!(
            index.add(vec![1.0, 2.0, 3.0]),
            Err(IndexError::DimensionMismatch { expected: 2, got: 3 })
        ));
    }

    #[test]
    fn k_is_clamped_to_size() {
        let mut index = VectorIndex::new();
        for i in 1..=5 {
            index.add(vec![i as f32, 1.0]).unwrap();
        }
        assert_eq!(index.search(&[1.0, 0.0], 2).unwrap().len(), 2);
        assert_eq!(index.search(&[1.0, 0.0], 10).unwrap().len(), 5);
        assert!(index.search(&[1.0, 0.0], 0).unwrap().is_empty());
    }

    #[test]
    fn ties_break_by_position() {
        let mut index = VectorIndex::new();
        index.add(vec![0.0, 1.0]).unwrap();
        index.add(vec![1.0, 0.0]).unwrap();
        index.add(vec![1.0, 0.0]).unwrap();
        index.add(vec![2.0, 0.0]).unwrap();

        let hits = index.search(&[1.0, 0.0], 4).unwrap();
        let order: Vec<usize> = hits.iter().map(|h| h.position).collect();
        assert_eq!(order, vec![1, 2, 3, 0]);
    }

    #[test]
    fn scores_stay_in_cosine_range() {
        let mut index = VectorIndex::new();
        index.add(vec![1.0, 0.0]).unwrap();
        index.add(vec![-1.0, 0.0]).unwrap();
        let hits = index.search(&[1.0, 0.0], 2).unwrap();
        assert!(hits.iter().all(|h| (-1.0..=1.0).contains(&h.score)));
        assert!((hits[1].score + 1.0).abs() < 1e-6);
    }

    #[test]
    fn dimension_mismatch_rejected() {
        let mut index = VectorIndex::new();
        index.add(vec![1.0, 0.0, 0.0]).unwrap();

        assert_eq!(
            index.add(vec![1.0, 0.0]),
            Err(IndexError::DimensionMismatch { expected: 3, got: 2 })
        );
        assert!(matches!(
            index.search(&[1.0, 0.0], 1),
            Err(IndexError::DimensionMismatch { .. })
        ));
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn fixed_dimension_enforced_before_first_add() {
        let mut index = VectorIndex::with_dimension(4);
        assert!(index.check(&[1.0, 0.0]).is_err());
        assert!(index.add(vec![1.0, 0.0, 0.0, 0.0]).is_ok());
    }

    #[test]
    fn degenerate_vectors_rejected() {
        let mut index = VectorIndex::new();
        assert_eq!(index.add(vec![0.0, 0.0]), Err(IndexError::ZeroVector));
        assert_eq!(index.add(vec![]), Err(IndexError::ZeroVector));
        assert_eq!(index.add(vec![f32::NAN, 1.0]), Err(IndexError::NonFinite));
        assert!(index.is_empty());
        assert_eq!(index.dimension(), None);
    }

    #[test]
    fn check_does_not_mutate() {
        let index = VectorIndex::new();
        index.check(&[1.0, 2.0]).unwrap();
        assert!(index.is_empty());
        assert_eq!(index.dimension(), None);
    }
}
