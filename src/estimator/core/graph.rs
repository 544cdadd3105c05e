//! Thresholding fitted weights into a binary causal mask.
//!
//! The optimizer drives `h(W)` below tolerance but leaves many entries at
//! small non-zero magnitudes; the mask keeps an edge i→j only when
//! `|W_ij| > threshold`. The mask is created fresh per call and never
//! mutated afterwards.
use ndarray::Array2;

/// Binarize a weighted adjacency: `mask_ij = 1` iff `|w_ij| > threshold`.
pub fn causal_mask(w: &Array2<f64>, threshold: f64) -> Array2<u8> {
    w.mapv(|v| u8::from(v.abs() > threshold))
}

/// Number of edges surviving the threshold.
pub fn edge_count(mask: &Array2<u8>) -> usize {
    mask.iter().filter(|&&v| v == 1).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    // Purpose
    // -------
    // The comparison is strict and applied to magnitudes, so negative
    // weights past the threshold survive and values exactly at the
    // threshold do not.
    fn mask_uses_strict_magnitude_comparison() {
        let w = array![[0.0, 0.5, -0.31], [0.3, 0.0, 0.29], [-0.8, 0.05, 0.0]];
        let mask = causal_mask(&w, 0.3);
        assert_eq!(mask, array![[0, 1, 1], [0, 0, 0], [1, 0, 0]]);
        assert_eq!(edge_count(&mask), 3);
    }

    #[test]
    // Purpose
    // -------
    // An all-zero weight matrix yields an empty mask at any threshold.
    fn zero_weights_give_empty_mask() {
        let w = Array2::<f64>::zeros((4, 4));
        let mask = causal_mask(&w, 0.1);
        assert_eq!(edge_count(&mask), 0);
    }
}
