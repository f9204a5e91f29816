//! # Hierarchical Risk Parity
//!
//! $$
//! \alpha = 1 - \frac{\sigma_L^2}{\sigma_L^2 + \sigma_R^2}
//! $$
//!
//! The HRP pipeline in four stages: correlation-to-distance transform, Ward
//! agglomerative clustering, quasi-diagonal leaf ordering, and recursive
//! bisection of capital. Each stage feeds only the next one; a run owns its
//! matrices and tree, so independent runs are safe to execute concurrently.

pub mod bisection;
pub mod cluster;
pub mod distance;
pub mod optimizer;
pub mod quasi_diag;
pub mod types;

pub use bisection::recursive_bisection;
pub use cluster::Dendrogram;
pub use cluster::Merge;
pub use cluster::ward_linkage;
pub use distance::distance_matrix;
pub use optimizer::HrpOptimizer;
pub use optimizer::optimize_hrp;
pub use quasi_diag::leaf_order;
pub use types::HrpAllocation;
pub use types::HrpError;
pub use types::ReturnsMatrix;
