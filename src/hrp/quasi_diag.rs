//! # Quasi-Diagonalization
//!
//! $$
//! \pi = \operatorname{leaves}(T)
//! $$
//!
//! Flattens the cluster tree into a leaf permutation that places correlated
//! assets next to each other, so the reordered covariance matrix approaches
//! block-diagonal form. Purely structural; no numeric work happens here.

use super::cluster::Dendrogram;

/// Depth-first leaf ordering of the dendrogram.
///
/// Each internal node emits its left subtree's leaves before its right
/// subtree's, where left/right is the order fixed at merge time. The result
/// is a permutation of `0..n_assets`; a subtree's leaves are never split.
pub fn leaf_order(tree: &Dendrogram) -> Vec<usize> {
  let n = tree.n_assets;
  let mut order = Vec::with_capacity(n);
  if n == 0 {
    return order;
  }
  if tree.merges.is_empty() {
    order.push(0);
    return order;
  }

  // right child pushed first so the left subtree is emitted first
  let mut stack = vec![tree.root()];
  while let Some(node) = stack.pop() {
    if tree.is_leaf(node) {
      order.push(node);
    } else {
      let merge = &tree.merges[node - n];
      stack.push(merge.right);
      stack.push(merge.left);
    }
  }

  order
}

#[cfg(test)]
mod tests {
  use super::super::cluster::Merge;
  use super::*;

  fn merge(left: usize, right: usize, size: usize) -> Merge {
    Merge {
      left,
      right,
      distance: 0.0,
      size,
    }
  }

  #[test]
  fn two_leaf_tree_keeps_merge_order() {
    let tree = Dendrogram {
      n_assets: 2,
      merges: vec![merge(0, 1, 2)],
    };

    assert_eq!(leaf_order(&tree), vec![0, 1]);
  }

  #[test]
  fn balanced_tree_emits_left_block_first() {
    // ((0,1),(3,2)) with the right pair merged in swapped order
    let tree = Dendrogram {
      n_assets: 4,
      merges: vec![merge(0, 1, 2), merge(3, 2, 2), merge(4, 5, 4)],
    };

    assert_eq!(leaf_order(&tree), vec![0, 1, 3, 2]);
  }

  #[test]
  fn caterpillar_tree_orders_by_attachment() {
    // (((0,1),2),3)
    let tree = Dendrogram {
      n_assets: 4,
      merges: vec![merge(0, 1, 2), merge(4, 2, 3), merge(5, 3, 4)],
    };

    let order = leaf_order(&tree);
    assert_eq!(order, vec![0, 1, 2, 3]);
  }

  #[test]
  fn order_is_a_permutation() {
    let tree = Dendrogram {
      n_assets: 5,
      merges: vec![
        merge(2, 4, 2),
        merge(0, 3, 2),
        merge(5, 1, 3),
        merge(7, 6, 5),
      ],
    };

    let mut order = leaf_order(&tree);
    assert_eq!(order.len(), 5);
    order.sort_unstable();
    assert_eq!(order, vec![0, 1, 2, 3, 4]);
  }
}
