//! Recomendar: offline evaluation of top-N recommenders in pure Rust.
//!
//! Recomendar scores a recommendation model against held-out interaction
//! data, producing recall@N and precision@N. Models implement the
//! [`recommend::Recommender`] contract (ranking comes for free on top of
//! `predict`); [`eval::Evaluation`] runs the per-user hit counting and
//! aggregation, optionally fanned out across a worker pool.
//!
//! # Quick Start
//!
//! ```
//! use recomendar::prelude::*;
//!
//! // A model scoring items by (user, item) arithmetic; its training
//! // history rules seen items out of the ranking.
//! struct Affinity {
//!     seen: InteractionMatrix,
//! }
//!
//! impl Recommender for Affinity {
//!     fn n_users(&self) -> usize {
//!         self.seen.n_users()
//!     }
//!
//!     fn n_items(&self) -> usize {
//!         self.seen.n_items()
//!     }
//!
//!     fn interactions(&self) -> Option<&InteractionMatrix> {
//!         Some(&self.seen)
//!     }
//!
//!     fn predict(&self, user: usize, item: usize) -> Result<f32> {
//!         Ok(((user * 31 + item * 17) % 97) as f32)
//!     }
//! }
//!
//! // Training interactions (ruled out) and held-out test interactions.
//! let train = InteractionMatrix::from_pairs(2, 6, &[(0, 0), (1, 5)]).expect("in bounds");
//! let test = InteractionMatrix::from_pairs(2, 6, &[(0, 3), (1, 1), (1, 2)]).expect("in bounds");
//!
//! let model = Affinity { seen: train };
//! let metrics = Evaluation::new(&test, &model)
//!     .with_cutoff(3)
//!     .with_workers(0)
//!     .test()
//!     .expect("both users have held-out items");
//!
//! assert!(metrics.recall >= 0.0 && metrics.recall <= 1.0);
//! assert!(metrics.precision >= 0.0 && metrics.precision <= 1.0);
//! ```
//!
//! # Modules
//!
//! - [`primitives`]: Sparse interaction matrix
//! - [`recommend`]: Recommender contract and default top-N ranking
//! - [`eval`]: Batch evaluation (recall@N, precision@N, parallel dispatch)
//! - [`error`]: Error types
//! - [`prelude`]: Convenience re-exports
//!
//! # Features
//!
//! - `parallel` (default): per-user evaluation fan-out over a rayon pool.

pub mod error;
pub mod eval;
pub mod prelude;
pub mod primitives;
pub mod recommend;
