//! # Veritas HRP
//!
//! $$
//! d_{ij}=\sqrt{\tfrac{1}{2}\left(1-\rho_{ij}\right)}
//! $$
//!
//! Hierarchical Risk Parity (HRP) portfolio allocation following Lopez de
//! Prado (2016): cluster assets over a correlation-derived distance metric,
//! reorder them along the dendrogram, then split capital top-down by relative
//! cluster variance. No covariance matrix is ever inverted.

pub mod backtest;
pub mod data;
pub mod hrp;
