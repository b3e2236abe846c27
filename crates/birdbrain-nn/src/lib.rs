//! Tiny inference engine for evolved feed-forward networks.
//!
//! This crate provides the two building blocks of a bird's brain:
//!
//! - [`Matrix`] - fixed-shape 2D arrays with the handful of operations the
//!   networks need (multiply, transpose, affine transform, elementwise tanh)
//! - [`Network`] - an alternating stack of linear and tanh layers with a
//!   forward pass that records per-layer activations
//!
//! Networks here are never trained by gradient descent; their weights are
//! produced and recombined by the genetic operators in `birdbrain-evolution`.
//! All randomness flows through a caller-supplied [`rand::Rng`] so tests can
//! substitute a seeded generator.
//!
//! # Example
//!
//! ```
//! use birdbrain_nn::{Matrix, Network, should_flap};
//!
//! let mut rng = rand::rng();
//! let mut network = Network::random(3, &[2, 3], &mut rng);
//!
//! let input = Matrix::from_rows(vec![vec![0.2, -0.7, 0.1]]);
//! let output = network.forward(&input).unwrap();
//! assert_eq!((output.rows(), output.cols()), (1, 1));
//!
//! let _flap = should_flap(&output);
//! ```

pub use self::{
    matrix::{Matrix, random_weight},
    network::{Layer, Network, should_flap},
};

pub mod matrix;
pub mod network;

/// Matrix operands had incompatible dimensions.
///
/// With a fixed topology this should never occur at runtime; it exists so a
/// mis-wired network aborts the call instead of silently producing garbage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("incompatible shapes for {op}: {lhs_rows}x{lhs_cols} vs {rhs_rows}x{rhs_cols}")]
pub struct ShapeMismatchError {
    /// The operation that failed.
    pub op: &'static str,
    /// Row count of the left operand.
    pub lhs_rows: usize,
    /// Column count of the left operand.
    pub lhs_cols: usize,
    /// Row count of the right operand.
    pub rhs_rows: usize,
    /// Column count of the right operand.
    pub rhs_cols: usize,
}
