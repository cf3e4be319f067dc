//! Pure numeric primitives (C2). No I/O, no suspension; everything the
//! scorer needs once embeddings are in hand.

use brainprint_shared::{EngineError, EngineResult};

fn magnitude(v: &[f64]) -> f64 {
    v.iter().map(|x| x * x).sum::<f64>().sqrt()
}

fn check_dims(a: &[f64], b: &[f64]) -> EngineResult<()> {
    if a.len() != b.len() {
        return Err(EngineError::DimensionMismatch { a: a.len(), b: b.len() });
    }
    Ok(())
}

/// Cosine similarity, clamped to `[0,1]`: opposite-direction vectors read as
/// "unrelated", not "anti-related". `0` when either input is the zero
/// vector.
pub fn cosine(a: &[f64], b: &[f64]) -> EngineResult<f64> {
    check_dims(a, b)?;
    let (ma, mb) = (magnitude(a), magnitude(b));
    if ma == 0.0 || mb == 0.0 {
        return Ok(0.0);
    }
    let dot: f64 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    Ok((dot / (ma * mb)).clamp(0.0, 1.0))
}

/// Returns `v` scaled to unit length, or `v` unchanged when its magnitude is
/// zero.
pub fn normalize(v: &[f64]) -> Vec<f64> {
    let m = magnitude(v);
    if m == 0.0 {
        return v.to_vec();
    }
    v.iter().map(|x| x / m).collect()
}

/// Element-wise average of two vectors, then normalized.
pub fn midpoint(a: &[f64], b: &[f64]) -> EngineResult<Vec<f64>> {
    check_dims(a, b)?;
    let avg: Vec<f64> = a.iter().zip(b).map(|(x, y)| (x + y) / 2.0).collect();
    Ok(normalize(&avg))
}

/// `a + alpha*(b-a)`, then normalized. `alpha` is not clamped here.
pub fn interpolate(a: &[f64], b: &[f64], alpha: f64) -> EngineResult<Vec<f64>> {
    check_dims(a, b)?;
    let v: Vec<f64> = a.iter().zip(b).map(|(x, y)| x + alpha * (y - x)).collect();
    Ok(normalize(&v))
}

/// Element-wise mean of a non-empty list, then normalized.
pub fn centroid(vs: &[Vec<f64>]) -> EngineResult<Vec<f64>> {
    let first = vs.first().ok_or(EngineError::EmptyCluster)?;
    let dim = first.len();
    for v in vs {
        check_dims(first, v)?;
    }
    let mut sum = vec![0.0; dim];
    for v in vs {
        for (s, x) in sum.iter_mut().zip(v) {
            *s += x;
        }
    }
    let n = vs.len() as f64;
    let mean: Vec<f64> = sum.into_iter().map(|s| s / n).collect();
    Ok(normalize(&mean))
}

/// Scalar position of `p` projected onto the line through `a`-`b`, clamped
/// to `[0,1]`. Returns `0.5` when `b-a` is the zero vector.
pub fn project_onto(p: &[f64], a: &[f64], b: &[f64]) -> EngineResult<f64> {
    check_dims(a, b)?;
    check_dims(a, p)?;
    let ab: Vec<f64> = a.iter().zip(b).map(|(x, y)| y - x).collect();
    let ab_mag_sq: f64 = ab.iter().map(|x| x * x).sum();
    if ab_mag_sq == 0.0 {
        return Ok(0.5);
    }
    let ap: Vec<f64> = a.iter().zip(p).map(|(x, y)| y - x).collect();
    let dot: f64 = ap.iter().zip(&ab).map(|(x, y)| x * y).sum();
    Ok((dot / ab_mag_sq).clamp(0.0, 1.0))
}
