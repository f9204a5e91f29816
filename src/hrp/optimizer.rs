//! # HRP Optimizer
//!
//! $$
//! \mathbf{w}^\* = \operatorname{HRP}(R)
//! $$
//!
//! Pipeline entry point: validate the returns matrix once, precompute the
//! sample covariance and correlation, then run distance transform, Ward
//! clustering, quasi-diagonalization and recursive bisection in order. The
//! run is a pure synchronous computation with no shared state, so repeated
//! runs on identical input reproduce identical weights.

use tracing::debug;

use crate::data::correlation_matrix;
use crate::data::covariance_matrix;

use super::bisection::recursive_bisection;
use super::cluster::ward_linkage;
use super::distance::distance_matrix;
use super::quasi_diag::leaf_order;
use super::types::HrpAllocation;
use super::types::HrpError;
use super::types::ReturnsMatrix;

/// Single-run HRP allocator over a validated returns matrix.
#[derive(Clone, Debug)]
pub struct HrpOptimizer {
  returns: ReturnsMatrix,
  cov: Vec<Vec<f64>>,
  corr: Vec<Vec<f64>>,
}

impl HrpOptimizer {
  /// Precompute covariance and correlation for the supplied returns.
  pub fn new(returns: ReturnsMatrix) -> Self {
    let cov = covariance_matrix(returns.series());
    let corr = correlation_matrix(returns.series());
    Self {
      returns,
      cov,
      corr,
    }
  }

  /// Sample covariance matrix of the input returns.
  pub fn covariance(&self) -> &[Vec<f64>] {
    &self.cov
  }

  /// Pearson correlation matrix of the input returns.
  pub fn correlation(&self) -> &[Vec<f64>] {
    &self.corr
  }

  /// Run the full HRP pipeline and return the final allocation.
  pub fn optimize(&self) -> HrpAllocation {
    let dist = distance_matrix(&self.corr);
    debug!(n_assets = self.returns.n_assets(), "distance matrix built");

    let dendrogram = ward_linkage(&dist);
    debug!(merges = dendrogram.merges.len(), "ward clustering complete");

    let order = leaf_order(&dendrogram);
    let weights = recursive_bisection(&order, &self.cov);
    debug!(?order, "recursive bisection complete");

    HrpAllocation {
      tickers: self.returns.tickers().to_vec(),
      weights,
      order,
      dendrogram,
    }
  }
}

/// Validate raw series and run the HRP pipeline in one call.
pub fn optimize_hrp(
  tickers: Vec<String>,
  series: Vec<Vec<f64>>,
) -> Result<HrpAllocation, HrpError> {
  let returns = ReturnsMatrix::new(tickers, series)?;
  Ok(HrpOptimizer::new(returns).optimize())
}
