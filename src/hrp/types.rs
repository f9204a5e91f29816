//! # HRP Types
//!
//! $$
//! \mathbf{w} \ge 0, \quad \sum_i w_i = 1
//! $$
//!
//! Validated input container and allocation result for the HRP pipeline.

use thiserror::Error;

use super::cluster::Dendrogram;

/// Errors surfaced by the HRP pipeline.
///
/// Degenerate cluster variances and out-of-range correlations are handled
/// locally by documented fallbacks and never appear here.
#[derive(Debug, Error)]
pub enum HrpError {
  /// The returns matrix cannot support an allocation run.
  #[error("invalid input shape: {reason}")]
  InvalidInputShape {
    /// Human-readable description of the violated shape constraint.
    reason: String,
  },
}

/// Aligned per-asset log-return series for a fixed universe.
///
/// Rows are assets, columns are periods. Shape is validated once at
/// construction; afterwards the matrix is immutable and owned by a single
/// pipeline run.
#[derive(Clone, Debug)]
pub struct ReturnsMatrix {
  tickers: Vec<String>,
  series: Vec<Vec<f64>>,
}

impl ReturnsMatrix {
  /// Build a validated returns matrix.
  ///
  /// Requires at least 2 assets, at least 2 periods, equal series lengths
  /// and finite values. Missing-data handling (forward-fill, dropping) is
  /// the caller's job before this point.
  pub fn new(tickers: Vec<String>, series: Vec<Vec<f64>>) -> Result<Self, HrpError> {
    if tickers.len() != series.len() {
      return Err(HrpError::InvalidInputShape {
        reason: format!(
          "{} tickers but {} return series",
          tickers.len(),
          series.len()
        ),
      });
    }

    if tickers.len() < 2 {
      return Err(HrpError::InvalidInputShape {
        reason: format!("need at least 2 assets, got {}", tickers.len()),
      });
    }

    let n_periods = series[0].len();
    if n_periods < 2 {
      return Err(HrpError::InvalidInputShape {
        reason: format!("need at least 2 periods, got {}", n_periods),
      });
    }

    for (ticker, returns) in tickers.iter().zip(series.iter()) {
      if returns.len() != n_periods {
        return Err(HrpError::InvalidInputShape {
          reason: format!(
            "ragged series: {} has {} periods, expected {}",
            ticker,
            returns.len(),
            n_periods
          ),
        });
      }
      if returns.iter().any(|r| !r.is_finite()) {
        return Err(HrpError::InvalidInputShape {
          reason: format!("non-finite return in series {}", ticker),
        });
      }
    }

    Ok(Self { tickers, series })
  }

  /// Number of assets in the universe.
  pub fn n_assets(&self) -> usize {
    self.tickers.len()
  }

  /// Number of aligned return periods.
  pub fn n_periods(&self) -> usize {
    self.series[0].len()
  }

  /// Asset identifiers in input order.
  pub fn tickers(&self) -> &[String] {
    &self.tickers
  }

  /// Aligned return series, one row per asset in input order.
  pub fn series(&self) -> &[Vec<f64>] {
    &self.series
  }
}

/// Output of one HRP run.
#[derive(Clone, Debug)]
pub struct HrpAllocation {
  /// Asset identifiers in the original input order.
  pub tickers: Vec<String>,
  /// Final weights aligned to `tickers`; non-negative, summing to one.
  pub weights: Vec<f64>,
  /// Quasi-diagonal asset ordering (indices into `tickers`).
  pub order: Vec<usize>,
  /// Merge arena built by Ward clustering, kept for diagnostics.
  pub dendrogram: Dendrogram,
}

impl HrpAllocation {
  /// Weight assigned to `ticker`, if it was part of the universe.
  pub fn weight(&self, ticker: &str) -> Option<f64> {
    self
      .tickers
      .iter()
      .position(|t| t == ticker)
      .map(|i| self.weights[i])
  }

  /// Iterate `(ticker, weight)` pairs in input order.
  pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
    self
      .tickers
      .iter()
      .map(String::as_str)
      .zip(self.weights.iter().copied())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn tickers(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
  }

  #[test]
  fn rejects_single_asset() {
    let result = ReturnsMatrix::new(tickers(&["AAA"]), vec![vec![0.01, 0.02]]);
    assert!(matches!(
      result,
      Err(HrpError::InvalidInputShape { .. })
    ));
  }

  #[test]
  fn rejects_single_period() {
    let result = ReturnsMatrix::new(tickers(&["AAA", "BBB"]), vec![vec![0.01], vec![0.02]]);
    assert!(matches!(
      result,
      Err(HrpError::InvalidInputShape { .. })
    ));
  }

  #[test]
  fn rejects_ragged_series() {
    let result = ReturnsMatrix::new(
      tickers(&["AAA", "BBB"]),
      vec![vec![0.01, 0.02, 0.03], vec![0.01, 0.02]],
    );
    assert!(matches!(
      result,
      Err(HrpError::InvalidInputShape { .. })
    ));
  }

  #[test]
  fn rejects_non_finite_returns() {
    let result = ReturnsMatrix::new(
      tickers(&["AAA", "BBB"]),
      vec![vec![0.01, f64::NAN], vec![0.01, 0.02]],
    );
    assert!(matches!(
      result,
      Err(HrpError::InvalidInputShape { .. })
    ));
  }

  #[test]
  fn accepts_valid_matrix() {
    let matrix = ReturnsMatrix::new(
      tickers(&["AAA", "BBB"]),
      vec![vec![0.01, -0.02, 0.03], vec![0.0, 0.01, -0.01]],
    )
    .unwrap();

    assert_eq!(matrix.n_assets(), 2);
    assert_eq!(matrix.n_periods(), 3);
    assert_eq!(matrix.tickers()[1], "BBB");
  }
}
