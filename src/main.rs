use anyhow::Result;
use prettytable::Table;
use prettytable::row;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand_distr::Distribution;
use rand_distr::Normal;
use veritas_hrp::backtest::equity_curves;
use veritas_hrp::backtest::performance_metrics;
use veritas_hrp::backtest::portfolio_returns;
use veritas_hrp::data::align_return_series;
use veritas_hrp::data::log_returns_series;
use veritas_hrp::hrp::HrpOptimizer;
use veritas_hrp::hrp::ReturnsMatrix;

/// Synthetic daily close prices: two tech names on one factor, two energy
/// names on another, reproducible via a fixed seed.
fn synthetic_prices(days: usize) -> (Vec<String>, Vec<Vec<f64>>) {
  let mut rng = StdRng::seed_from_u64(42);
  let factor = Normal::new(0.0002, 0.01).unwrap();
  let noise = Normal::new(0.0, 0.004).unwrap();
  let energy_noise = Normal::new(0.0, 0.007).unwrap();

  let tech: Vec<f64> = (0..days).map(|_| factor.sample(&mut rng)).collect();
  let energy: Vec<f64> = (0..days).map(|_| factor.sample(&mut rng)).collect();

  let mut series: Vec<Vec<f64>> = Vec::with_capacity(4);
  for _ in 0..2 {
    series.push(tech.iter().map(|f| f + noise.sample(&mut rng)).collect());
  }
  for _ in 0..2 {
    series.push(
      energy
        .iter()
        .map(|f| f + energy_noise.sample(&mut rng))
        .collect(),
    );
  }

  let tickers = ["TECH_A", "TECH_B", "ENERGY_A", "ENERGY_B"]
    .iter()
    .map(|s| s.to_string())
    .collect();

  let prices = series
    .into_iter()
    .map(|returns| {
      let mut price = 100.0;
      returns
        .iter()
        .map(|r| {
          price *= r.exp();
          price
        })
        .collect()
    })
    .collect();

  (tickers, prices)
}

fn main() -> Result<()> {
  let (tickers, prices) = synthetic_prices(252);

  let raw_returns: Vec<Vec<f64>> = prices.iter().map(|p| log_returns_series(p)).collect();
  let aligned = align_return_series(&raw_returns);

  let returns = ReturnsMatrix::new(tickers.clone(), aligned.clone())?;
  let optimizer = HrpOptimizer::new(returns);
  let allocation = optimizer.optimize();

  let mut corr_table = Table::new();
  let mut header = row!["-"];
  for t in &tickers {
    header.add_cell(prettytable::Cell::new(t));
  }
  corr_table.add_row(header);
  for (i, t) in tickers.iter().enumerate() {
    let mut line = row![t];
    for j in 0..tickers.len() {
      line.add_cell(prettytable::Cell::new(&format!(
        "{:.2}",
        optimizer.correlation()[i][j]
      )));
    }
    corr_table.add_row(line);
  }
  println!("Correlation matrix:");
  corr_table.printstd();

  let mut weight_table = Table::new();
  weight_table.add_row(row!["Ticker", "HRP Weight"]);
  for (ticker, weight) in allocation.iter() {
    weight_table.add_row(row![ticker, format!("{:.2}%", weight * 100.0)]);
  }
  println!("\nHRP allocation:");
  weight_table.printstd();

  let curves = equity_curves(&aligned, &allocation.weights);
  let daily = portfolio_returns(&aligned, &allocation.weights);
  let metrics = performance_metrics(&daily, 0.02);

  println!("\nBacktest (base 100):");
  println!(
    "  final strategy value:  {:.2}",
    curves.strategy.last().copied().unwrap_or(100.0)
  );
  println!(
    "  final benchmark value: {:.2}",
    curves.benchmark.last().copied().unwrap_or(100.0)
  );
  println!("  total return:      {:.2}%", metrics.total_return * 100.0);
  println!(
    "  annual volatility: {:.2}%",
    metrics.annual_volatility * 100.0
  );
  println!("  sharpe ratio:      {:.2}", metrics.sharpe);
  println!("  max drawdown:      {:.2}%", metrics.max_drawdown * 100.0);

  Ok(())
}
