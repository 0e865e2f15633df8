use anyhow::Result;

use super::types::TermVector;

/// Cosine similarity between two sparse TF-IDF vectors.
///
/// # Returns
/// - A value in `[0, 1]`; `0.0` when either vector has zero magnitude.
pub fn cosine_similarity(a: &TermVector, b: &TermVector) -> f64 {
    cosine_from_parts(a.dot(b), a.magnitude(), b.magnitude())
}

/// Cosine similarity from a dot product and the two magnitudes.
///
/// Lets callers reuse magnitudes computed once per vector. TF-IDF weights are
/// never negative, so the result is clamped to `[0, 1]` to absorb rounding
/// (a vector compared with itself may otherwise land a hair above 1).
pub fn cosine_from_parts(dot: f64, mag_a: f64, mag_b: f64) -> f64 {
    if mag_a == 0.0 || mag_b == 0.0 {
        return 0.0;
    }
    let similarity = dot / (mag_a * mag_b);
    if similarity.is_finite() {
        similarity.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Calculate cosine similarity directly between two dense vectors
///
/// Dense reference for [`cosine_similarity`]: for any pair of vectors expanded
/// with [`TermVector::to_dense`] both return the same value bit for bit. The
/// pipeline only uses the sparse form.
///
/// # Arguments
/// * `vec1` - First vector
/// * `vec2` - Second vector
///
/// # Returns
/// * `Result<f64>` - The cosine similarity, or an error when the dimensions differ
pub fn calculate_direct_similarity(vec1: &[f64], vec2: &[f64]) -> Result<f64> {
    if vec1.len() != vec2.len() {
        return Err(anyhow::anyhow!(
            "Vector dimensions don't match: {} vs {}",
            vec1.len(),
            vec2.len()
        ));
    }

    let mag1: f64 = vec1.iter().map(|x| x * x).sum::<f64>().sqrt();
    let mag2: f64 = vec2.iter().map(|x| x * x).sum::<f64>().sqrt();
    let dot_product: f64 = vec1.iter().zip(vec2.iter()).map(|(a, b)| a * b).sum();

    Ok(cosine_from_parts(dot_product, mag1, mag2))
}
