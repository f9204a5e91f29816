//! # Backtest
//!
//! $$
//! V_t = 100\prod_{s\le t}(1+r_s)
//! $$
//!
//! Historical simulation of a weight vector against a 1/N benchmark, plus
//! the usual performance summary: total return, annualized volatility,
//! Sharpe ratio and maximum drawdown.

use crate::data::TRADING_DAYS;

/// Base value both equity curves start from.
pub const BASE_VALUE: f64 = 100.0;

/// Strategy and equal-weight benchmark equity curves, base 100.
#[derive(Clone, Debug, Default)]
pub struct BacktestCurves {
  /// Cumulative value of the weighted portfolio.
  pub strategy: Vec<f64>,
  /// Cumulative value of the 1/N benchmark.
  pub benchmark: Vec<f64>,
}

/// Performance summary of a daily return series.
#[derive(Clone, Copy, Debug, Default)]
pub struct PerformanceMetrics {
  /// Compounded return over the whole sample.
  pub total_return: f64,
  /// Sample volatility scaled by sqrt(252).
  pub annual_volatility: f64,
  /// `(annualized mean - risk_free) / annual_volatility`.
  pub sharpe: f64,
  /// Most negative peak-to-trough excursion of the cumulative curve.
  pub max_drawdown: f64,
}

/// Weighted daily portfolio returns for aligned per-asset series.
///
/// Assets missing a weight (shorter `weights` slice) contribute zero,
/// mirroring the upstream policy of zero-weighting unknown tickers.
pub fn portfolio_returns(aligned_returns: &[Vec<f64>], weights: &[f64]) -> Vec<f64> {
  let n_periods = aligned_returns.first().map(|r| r.len()).unwrap_or(0);

  (0..n_periods)
    .map(|t| {
      aligned_returns
        .iter()
        .enumerate()
        .map(|(i, series)| weights.get(i).copied().unwrap_or(0.0) * series[t])
        .sum()
    })
    .collect()
}

/// Simulate the strategy and a 1/N benchmark from a common base of 100.
pub fn equity_curves(aligned_returns: &[Vec<f64>], weights: &[f64]) -> BacktestCurves {
  let n_assets = aligned_returns.len();
  if n_assets == 0 {
    return BacktestCurves::default();
  }

  let strategy_returns = portfolio_returns(aligned_returns, weights);
  let equal = vec![1.0 / n_assets as f64; n_assets];
  let benchmark_returns = portfolio_returns(aligned_returns, &equal);

  BacktestCurves {
    strategy: cumulative_curve(&strategy_returns),
    benchmark: cumulative_curve(&benchmark_returns),
  }
}

fn cumulative_curve(returns: &[f64]) -> Vec<f64> {
  let mut value = BASE_VALUE;
  returns
    .iter()
    .map(|r| {
      value *= 1.0 + r;
      value
    })
    .collect()
}

/// Summarize a daily return series.
///
/// Empty input yields zeroed metrics rather than an error; the backtest is
/// diagnostic output, not part of the allocation contract.
pub fn performance_metrics(daily_returns: &[f64], risk_free: f64) -> PerformanceMetrics {
  if daily_returns.is_empty() {
    return PerformanceMetrics::default();
  }

  let total_return = daily_returns.iter().fold(1.0, |acc, r| acc * (1.0 + r)) - 1.0;

  let n = daily_returns.len();
  let mean = daily_returns.iter().sum::<f64>() / n as f64;
  let variance = if n < 2 {
    0.0
  } else {
    daily_returns
      .iter()
      .map(|r| (r - mean) * (r - mean))
      .sum::<f64>()
      / (n - 1) as f64
  };
  let annual_volatility = variance.sqrt() * TRADING_DAYS.sqrt();

  let sharpe = if annual_volatility > 1e-15 {
    (mean * TRADING_DAYS - risk_free) / annual_volatility
  } else {
    0.0
  };

  let mut peak = f64::NEG_INFINITY;
  let mut max_drawdown = 0.0f64;
  let mut cumulative = 1.0;
  for r in daily_returns {
    cumulative *= 1.0 + r;
    peak = peak.max(cumulative);
    max_drawdown = max_drawdown.min(cumulative / peak - 1.0);
  }

  PerformanceMetrics {
    total_return,
    annual_volatility,
    sharpe,
    max_drawdown,
  }
}
