//! # Correlation Distance
//!
//! $$
//! d_{ij}=\sqrt{\tfrac{1}{2}\left(1-\rho_{ij}\right)}
//! $$
//!
//! Turns a correlation matrix into a proper distance metric: perfectly
//! correlated assets sit at distance 0, perfectly anti-correlated ones at
//! distance 1, and the triangle inequality holds (unlike raw correlation).

use tracing::warn;

/// Element-wise correlation-to-distance transform.
///
/// Correlation entries that drift outside `[-1, 1]` from upstream
/// floating-point noise are clamped to the nearest bound and reported once
/// per matrix through a `tracing` warning; the transform itself never fails.
pub fn distance_matrix(corr: &[Vec<f64>]) -> Vec<Vec<f64>> {
  let n = corr.len();
  let mut dist = vec![vec![0.0; n]; n];
  let mut clamped = 0usize;

  for i in 0..n {
    for j in (i + 1)..n {
      let rho = corr
        .get(i)
        .and_then(|row| row.get(j))
        .copied()
        .unwrap_or(0.0);
      let bounded = rho.clamp(-1.0, 1.0);
      if bounded != rho {
        clamped += 1;
      }

      let d = (0.5 * (1.0 - bounded)).sqrt();
      dist[i][j] = d;
      dist[j][i] = d;
    }
  }

  if clamped > 0 {
    warn!(
      entries = clamped,
      "correlation entries outside [-1, 1] clamped before distance transform"
    );
  }

  dist
}

#[cfg(test)]
mod tests {
  use approx::assert_abs_diff_eq;
  use tracing_test::traced_test;

  use super::*;

  #[test]
  fn distance_is_symmetric_bounded_with_zero_diagonal() {
    let corr = vec![
      vec![1.0, 0.8, -0.3],
      vec![0.8, 1.0, 0.1],
      vec![-0.3, 0.1, 1.0],
    ];

    let dist = distance_matrix(&corr);

    for i in 0..3 {
      assert_eq!(dist[i][i], 0.0);
      for j in 0..3 {
        assert_eq!(dist[i][j], dist[j][i]);
        assert!(dist[i][j] >= 0.0 && dist[i][j] <= 1.0);
      }
    }
  }

  #[test]
  fn extreme_correlations_map_to_bounds() {
    let corr = vec![vec![1.0, 1.0], vec![1.0, 1.0]];
    let dist = distance_matrix(&corr);
    assert_abs_diff_eq!(dist[0][1], 0.0, epsilon = 1e-15);

    let corr = vec![vec![1.0, -1.0], vec![-1.0, 1.0]];
    let dist = distance_matrix(&corr);
    assert_abs_diff_eq!(dist[0][1], 1.0, epsilon = 1e-15);

    let corr = vec![vec![1.0, 0.0], vec![0.0, 1.0]];
    let dist = distance_matrix(&corr);
    assert_abs_diff_eq!(dist[0][1], 0.5_f64.sqrt(), epsilon = 1e-15);
  }

  #[traced_test]
  #[test]
  fn out_of_range_correlation_is_clamped_with_warning() {
    let corr = vec![vec![1.0, 1.0 + 1e-9], vec![1.0 + 1e-9, 1.0]];
    let dist = distance_matrix(&corr);

    assert!(dist[0][1].is_finite());
    assert_abs_diff_eq!(dist[0][1], 0.0, epsilon = 1e-15);
    assert!(logs_contain("clamped"));
  }
}
