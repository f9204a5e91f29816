//! # Ward Clustering
//!
//! $$
//! d^2_{(ij)k}=\frac{(n_i+n_k)d^2_{ik}+(n_j+n_k)d^2_{jk}-n_k d^2_{ij}}{n_i+n_j+n_k}
//! $$
//!
//! Agglomerative hierarchical clustering with variance-minimizing (Ward)
//! linkage over the correlation-distance matrix. The tree is stored as an
//! arena of merge records indexed by step, which keeps ownership flat and
//! makes merge order replayable in tests.

/// One agglomerative merge step.
///
/// `left` and `right` are node ids: values below the asset count are leaves,
/// `n_assets + step` is the cluster created at `merges[step]`. The cluster
/// occupying the lower original index slot at merge time is `left`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Merge {
  /// Node id of the first merged cluster.
  pub left: usize,
  /// Node id of the second merged cluster.
  pub right: usize,
  /// Ward merge height (square root of the minimal squared linkage distance).
  pub distance: f64,
  /// Number of leaves under the new cluster.
  pub size: usize,
}

/// Binary cluster tree over `n_assets` leaves as a merge arena.
///
/// A tree over `n` assets holds exactly `n - 1` merges; the root node id is
/// `2n - 2`.
#[derive(Clone, Debug)]
pub struct Dendrogram {
  /// Number of leaf assets.
  pub n_assets: usize,
  /// Merge records in execution order.
  pub merges: Vec<Merge>,
}

impl Dendrogram {
  /// Node id of the final merge.
  pub fn root(&self) -> usize {
    self.n_assets + self.merges.len() - 1
  }

  /// Whether `node` refers to an original asset rather than a merge.
  pub fn is_leaf(&self, node: usize) -> bool {
    node < self.n_assets
  }
}

/// Cluster a distance matrix with Ward linkage.
///
/// Inter-cluster distances follow the Lance-Williams update seeded by the
/// squared entries of `dist`. Ties in the minimal merge distance are broken
/// by the lowest combined original asset index: slot `i` always holds the
/// cluster whose smallest original leaf is `i`, so scanning pairs in
/// ascending `(i, j)` order with a strict `<` comparison picks the
/// lowest-indexed pair among equals. Duplicate or zero distances therefore
/// still yield a reproducible merge order.
pub fn ward_linkage(dist: &[Vec<f64>]) -> Dendrogram {
  let n = dist.len();
  let mut merges = Vec::with_capacity(n.saturating_sub(1));
  if n < 2 {
    return Dendrogram {
      n_assets: n,
      merges,
    };
  }

  let mut d2: Vec<Vec<f64>> = dist
    .iter()
    .map(|row| row.iter().map(|&d| d * d).collect())
    .collect();
  let mut active = vec![true; n];
  let mut node_id: Vec<usize> = (0..n).collect();
  let mut size = vec![1usize; n];

  for step in 0..(n - 1) {
    let mut min_d2 = f64::INFINITY;
    let mut mi = 0;
    let mut mj = 1;

    for i in 0..n {
      if !active[i] {
        continue;
      }
      for j in (i + 1)..n {
        if !active[j] {
          continue;
        }
        if d2[i][j] < min_d2 {
          min_d2 = d2[i][j];
          mi = i;
          mj = j;
        }
      }
    }

    merges.push(Merge {
      left: node_id[mi],
      right: node_id[mj],
      distance: min_d2.max(0.0).sqrt(),
      size: size[mi] + size[mj],
    });

    let ni = size[mi] as f64;
    let nj = size[mj] as f64;
    for k in 0..n {
      if !active[k] || k == mi || k == mj {
        continue;
      }
      let nk = size[k] as f64;
      let updated = ((ni + nk) * d2[mi][k] + (nj + nk) * d2[mj][k] - nk * min_d2) / (ni + nj + nk);
      d2[mi][k] = updated;
      d2[k][mi] = updated;
    }

    node_id[mi] = n + step;
    size[mi] += size[mj];
    active[mj] = false;
  }

  Dendrogram {
    n_assets: n,
    merges,
  }
}

#[cfg(test)]
mod tests {
  use approx::assert_abs_diff_eq;

  use super::*;

  #[test]
  fn builds_n_minus_one_merges() {
    let dist = vec![
      vec![0.0, 0.2, 0.9, 0.8],
      vec![0.2, 0.0, 0.85, 0.95],
      vec![0.9, 0.85, 0.0, 0.3],
      vec![0.8, 0.95, 0.3, 0.0],
    ];

    let tree = ward_linkage(&dist);
    assert_eq!(tree.merges.len(), 3);
    assert_eq!(tree.root(), 6);
    assert_eq!(tree.merges[2].size, 4);
  }

  #[test]
  fn perfectly_correlated_pair_merges_first_at_zero_distance() {
    // distance 0 between assets 1 and 2, everything else well apart
    let dist = vec![
      vec![0.0, 0.7, 0.7, 0.6],
      vec![0.7, 0.0, 0.0, 0.5],
      vec![0.7, 0.0, 0.0, 0.5],
      vec![0.6, 0.5, 0.5, 0.0],
    ];

    let tree = ward_linkage(&dist);
    let first = tree.merges[0];
    assert_eq!((first.left, first.right), (1, 2));
    assert_abs_diff_eq!(first.distance, 0.0, epsilon = 1e-15);
  }

  #[test]
  fn tie_break_prefers_lowest_combined_index() {
    // all pairwise distances identical: merge order must be a deterministic
    // caterpillar rooted at the lowest indices
    let dist = vec![
      vec![0.0, 0.5, 0.5, 0.5],
      vec![0.5, 0.0, 0.5, 0.5],
      vec![0.5, 0.5, 0.0, 0.5],
      vec![0.5, 0.5, 0.5, 0.0],
    ];

    let tree = ward_linkage(&dist);
    assert_eq!((tree.merges[0].left, tree.merges[0].right), (0, 1));
    assert_eq!(tree.merges[1].left, 4);
    assert_eq!(tree.merges[1].right, 2);
    assert_eq!(tree.merges[2].left, 5);
    assert_eq!(tree.merges[2].right, 3);
  }

  #[test]
  fn repeated_runs_are_identical() {
    let dist = vec![
      vec![0.0, 0.4, 0.6],
      vec![0.4, 0.0, 0.6],
      vec![0.6, 0.6, 0.0],
    ];

    let a = ward_linkage(&dist);
    let b = ward_linkage(&dist);
    assert_eq!(a.merges, b.merges);
  }

  #[test]
  fn two_block_structure_merges_blocks_before_root() {
    // assets {0,1} and {2,3} are close within blocks, far across
    let dist = vec![
      vec![0.0, 0.1, 0.7, 0.7],
      vec![0.1, 0.0, 0.7, 0.7],
      vec![0.7, 0.7, 0.0, 0.2],
      vec![0.7, 0.7, 0.2, 0.0],
    ];

    let tree = ward_linkage(&dist);
    assert_eq!((tree.merges[0].left, tree.merges[0].right), (0, 1));
    assert_eq!((tree.merges[1].left, tree.merges[1].right), (2, 3));
    assert_eq!((tree.merges[2].left, tree.merges[2].right), (4, 5));
  }
}
