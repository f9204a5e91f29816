//! # Return Preprocessing
//!
//! $$
//! r_t = \ln\frac{P_t}{P_{t-1}}, \qquad
//! \Sigma_{ij} = \frac{1}{T-1}\sum_t (r_{i,t}-\bar r_i)(r_{j,t}-\bar r_j)
//! $$
//!
//! Helpers for turning price histories into aligned log-return series and
//! for building the sample correlation and covariance matrices the HRP
//! pipeline consumes.

/// Trading days per year, used for annualization.
pub const TRADING_DAYS: f64 = 252.0;

fn sample_mean(xs: &[f64]) -> f64 {
  if xs.is_empty() {
    0.0
  } else {
    xs.iter().sum::<f64>() / xs.len() as f64
  }
}

fn pearson(x: &[f64], y: &[f64]) -> f64 {
  let n = x.len().min(y.len());
  if n < 2 {
    return 0.0;
  }

  let mx = sample_mean(x);
  let my = sample_mean(y);

  let mut cov = 0.0;
  let mut sx = 0.0;
  let mut sy = 0.0;

  for i in 0..n {
    let dx = x[i] - mx;
    let dy = y[i] - my;
    cov += dx * dy;
    sx += dx * dx;
    sy += dy * dy;
  }

  let denom = (sx * sy).sqrt();
  if denom < 1e-15 {
    0.0
  } else {
    (cov / denom).clamp(-1.0, 1.0)
  }
}

fn sample_cov(x: &[f64], y: &[f64]) -> f64 {
  let n = x.len().min(y.len());
  if n < 2 {
    return 0.0;
  }

  let mx = sample_mean(x);
  let my = sample_mean(y);

  let mut acc = 0.0;
  for i in 0..n {
    acc += (x[i] - mx) * (y[i] - my);
  }
  acc / (n - 1) as f64
}

/// Convert close prices to log-return series.
///
/// Non-positive prices cannot produce a valid log-return and are skipped,
/// mirroring an upstream drop of bad quotes.
pub fn log_returns_series(closes: &[f64]) -> Vec<f64> {
  let mut out = Vec::with_capacity(closes.len().saturating_sub(1));
  for i in 1..closes.len() {
    if closes[i - 1] > 0.0 && closes[i] > 0.0 {
      out.push((closes[i] / closes[i - 1]).ln());
    }
  }
  out
}

/// Align multiple return series to their common tail length.
pub fn align_return_series(all_returns: &[Vec<f64>]) -> Vec<Vec<f64>> {
  let min_len = all_returns.iter().map(|r| r.len()).min().unwrap_or(0);
  all_returns
    .iter()
    .map(|r| r[r.len().saturating_sub(min_len)..].to_vec())
    .collect()
}

/// Build a Pearson correlation matrix from aligned return series.
pub fn correlation_matrix(aligned_returns: &[Vec<f64>]) -> Vec<Vec<f64>> {
  let n = aligned_returns.len();
  let mut corr = vec![vec![1.0; n]; n];

  for i in 0..n {
    for j in (i + 1)..n {
      let r = pearson(&aligned_returns[i], &aligned_returns[j]);
      corr[i][j] = r;
      corr[j][i] = r;
    }
  }

  corr
}

/// Build a sample covariance matrix (ddof = 1) from aligned return series.
pub fn covariance_matrix(aligned_returns: &[Vec<f64>]) -> Vec<Vec<f64>> {
  let n = aligned_returns.len();
  let mut cov = vec![vec![0.0; n]; n];

  for i in 0..n {
    for j in i..n {
      let c = sample_cov(&aligned_returns[i], &aligned_returns[j]);
      cov[i][j] = c;
      cov[j][i] = c;
    }
  }

  cov
}

/// Sample covariance scaled by [`TRADING_DAYS`] for annual risk figures.
pub fn annualized_covariance_matrix(aligned_returns: &[Vec<f64>]) -> Vec<Vec<f64>> {
  covariance_matrix(aligned_returns)
    .into_iter()
    .map(|row| row.into_iter().map(|v| v * TRADING_DAYS).collect())
    .collect()
}
