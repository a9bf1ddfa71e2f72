//! Core data primitives.
//!
//! These types provide the foundation for recommenders and evaluation.

mod interactions;

pub use interactions::InteractionMatrix;
