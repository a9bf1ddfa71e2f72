//! Convenience re-exports for common usage.
//!
//! # Usage
//!
//! ```
//! use recomendar::prelude::*;
//! ```

pub use crate::error::{RecomendarError, Result};
pub use crate::eval::{EvalMetrics, Evaluation};
pub use crate::primitives::InteractionMatrix;
pub use crate::recommend::Recommender;
