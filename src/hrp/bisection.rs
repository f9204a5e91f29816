//! # Recursive Bisection
//!
//! $$
//! \sigma_c^2 = \mathbf{w}_c^\top \Sigma_c \mathbf{w}_c, \quad
//! w_{c,i} \propto \frac{1}{\Sigma_{ii}}
//! $$
//!
//! Top-down capital split along the quasi-diagonal ordering: each contiguous
//! range is cut at its midpoint and the two halves receive capital inversely
//! proportional to their inverse-variance-portfolio variances. Every split
//! conserves the assigned weight, so the final vector sums to the initial
//! 1.0 by construction.

/// Split capital over the quasi-diagonal `order` by recursive bisection.
///
/// Returns weights indexed by original asset position (`order[k]` receives
/// the weight of the k-th ordered slot). Bisection is count-based on the
/// ordering, not tree-based: ranges are halved at the midpoint index. When a
/// split sees zero total variance on both sides the capital is divided
/// evenly instead of dividing by zero.
pub fn recursive_bisection(order: &[usize], cov: &[Vec<f64>]) -> Vec<f64> {
  let mut weights = vec![0.0; cov.len()];
  if order.is_empty() {
    return weights;
  }

  // work list of (range start, range end, assigned weight) over `order`
  let mut work = vec![(0usize, order.len(), 1.0f64)];
  while let Some((lo, hi, w)) = work.pop() {
    if hi - lo == 1 {
      weights[order[lo]] = w;
      continue;
    }

    let mid = lo + (hi - lo) / 2;
    let var_left = cluster_variance(&order[lo..mid], cov);
    let var_right = cluster_variance(&order[mid..hi], cov);

    let denom = var_left + var_right;
    let alpha = if denom > 1e-30 {
      1.0 - var_left / denom
    } else {
      0.5
    };

    work.push((lo, mid, w * alpha));
    work.push((mid, hi, w * (1.0 - alpha)));
  }

  weights
}

/// Inverse-variance-portfolio variance of the cluster spanned by `indices`.
///
/// Within-cluster weights use only the diagonal of the covariance submatrix
/// (the standard HRP approximation), so this is an estimate of cluster risk,
/// not the exact minimum-variance portfolio. A cluster of zero-variance
/// assets reports zero variance, which feeds the even-split fallback above.
pub(crate) fn cluster_variance(indices: &[usize], cov: &[Vec<f64>]) -> f64 {
  let nc = indices.len();
  if nc == 0 {
    return 0.0;
  }
  if nc == 1 {
    return cov
      .get(indices[0])
      .and_then(|row| row.get(indices[0]))
      .copied()
      .unwrap_or(0.0)
      .max(0.0);
  }

  let inv_vars: Vec<f64> = indices
    .iter()
    .map(|&i| {
      let v = cov
        .get(i)
        .and_then(|row| row.get(i))
        .copied()
        .unwrap_or(0.0);
      if v > 1e-15 { 1.0 / v } else { 0.0 }
    })
    .collect();

  let total: f64 = inv_vars.iter().sum();
  if total < 1e-15 {
    return 0.0;
  }

  let w: Vec<f64> = inv_vars.iter().map(|&iv| iv / total).collect();

  let mut var = 0.0;
  for a in 0..nc {
    for b in 0..nc {
      let cov_ab = cov
        .get(indices[a])
        .and_then(|row| row.get(indices[b]))
        .copied()
        .unwrap_or(0.0);
      var += w[a] * w[b] * cov_ab;
    }
  }

  // a PSD covariance keeps this non-negative up to rounding noise
  var.max(0.0)
}
