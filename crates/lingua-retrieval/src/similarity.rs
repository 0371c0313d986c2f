//! Vector similarity functions.

use std::cmp::Ordering;

/// Calculate cosine similarity between two vectors.
///
/// Returns value in [-1.0, 1.0] where 1.0 = identical direction, and 0.0
/// when either vector has zero magnitude.
///
/// # Panics
/// Panics if vectors have different dimensions.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    assert_eq!(a.len(), b.len(), "Vectors must have same dimension");

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot_product / (norm_a * norm_b)
}

/// Order `(position, score)` pairs by score, highest first.
///
/// The sort is stable, so equal scores keep their incoming order. Callers
/// pass pairs in corpus order, which makes ties resolve by insertion order.
/// NaN scores compare equal to everything and therefore also keep their slot
/// relative to their neighbours.
pub fn rank_descending(scores: &mut [(usize, f32)]) {
    scores.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
}
