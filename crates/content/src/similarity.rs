//! Cosine similarity primitives shared by both engines.

use ndarray::{Array2, ArrayView1, ArrayView2};

/// Cosine similarity of two vectors, defined as 0.0 (not NaN) when either
/// vector is all-zero.
pub fn cosine(a: ArrayView1<'_, f64>, b: ArrayView1<'_, f64>) -> f64 {
    let dot = a.dot(&b);
    let norm_a = a.dot(&a).sqrt();
    let norm_b = b.dot(&b).sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}

/// All-pairs cosine similarity over the rows of `matrix`. The result is
/// square and symmetric, with 1.0 on the diagonal for non-zero rows.
pub fn pairwise_rows(matrix: ArrayView2<'_, f64>) -> Array2<f64> {
    let n = matrix.nrows();
    let norms: Vec<f64> = (0..n)
        .map(|i| {
            let row = matrix.row(i);
            row.dot(&row).sqrt()
        })
        .collect();

    let mut sim = Array2::<f64>::zeros((n, n));
    for i in 0..n {
        if norms[i] == 0.0 {
            continue;
        }
        sim[[i, i]] = 1.0;
        for j in (i + 1)..n {
            if norms[j] == 0.0 {
                continue;
            }
            let value = matrix.row(i).dot(&matrix.row(j)) / (norms[i] * norms[j]);
            sim[[i, j]] = value;
            sim[[j, i]] = value;
        }
    }
    sim
}
