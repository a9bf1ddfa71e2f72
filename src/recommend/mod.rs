//! Recommender contract and the default top-N ranking routine.
//!
//! Any scorable model implements [`Recommender`]. Only the dimension
//! accessors are required: `train` and `predict` are capabilities a
//! concrete model supplies, and `recommend` comes for free on top of
//! `predict` (score every candidate, rank descending, rule out items the
//! user has already seen, take the top N).
//!
//! # Quick Start
//!
//! ```
//! use recomendar::prelude::*;
//!
//! struct Popularity {
//!     catalogue: usize,
//! }
//!
//! impl Recommender for Popularity {
//!     fn n_users(&self) -> usize {
//!         1
//!     }
//!
//!     fn n_items(&self) -> usize {
//!         self.catalogue
//!     }
//!
//!     // Lower item ids are more popular.
//!     fn predict(&self, _user: usize, item: usize) -> Result<f32> {
//!         Ok(-(item as f32))
//!     }
//! }
//!
//! let model = Popularity { catalogue: 10 };
//! let top = model.recommend(0, 3, false).expect("predict is implemented");
//! assert_eq!(top, vec![0, 1, 2]);
//! ```

use std::cmp::Ordering;

use crate::error::{RecomendarError, Result};
use crate::primitives::InteractionMatrix;

/// Polymorphic surface every scorable model must satisfy.
///
/// `n_users` and `n_items` are derived once from the backing interaction
/// matrix and never change. `train` and `predict` have failing default
/// bodies so a ranking-only model (one that overrides [`recommend`]
/// directly) still satisfies the trait; invoking an unimplemented
/// capability is a contract violation surfaced as
/// [`RecomendarError::NotImplemented`].
///
/// [`recommend`]: Recommender::recommend
pub trait Recommender {
    /// Number of users the model was built over.
    fn n_users(&self) -> usize;

    /// Number of items in the candidate catalogue.
    fn n_items(&self) -> usize;

    /// Interaction history used as the rule-out source, if the model
    /// carries one.
    fn interactions(&self) -> Option<&InteractionMatrix> {
        None
    }

    /// Fits the model on interactions inside the optional half-open time
    /// window `[before, after)` (unix seconds, each side optional).
    ///
    /// # Errors
    ///
    /// The default body always returns
    /// [`RecomendarError::NotImplemented`].
    fn train(&mut self, before: Option<i64>, after: Option<i64>) -> Result<()> {
        let _ = (before, after);
        Err(RecomendarError::not_implemented("train"))
    }

    /// Returns an affinity score for a (user, item) pair.
    ///
    /// Higher means more preferred. Scores are only comparable within one
    /// model's own score space.
    ///
    /// # Errors
    ///
    /// The default body always returns
    /// [`RecomendarError::NotImplemented`].
    fn predict(&self, user: usize, item: usize) -> Result<f32> {
        let _ = (user, item);
        Err(RecomendarError::not_implemented("predict"))
    }

    /// Returns up to `num` item ids in descending score order.
    ///
    /// Scores every item in `0..n_items()` via [`predict`], ranks
    /// descending (equal scores order by ascending item id so repeated
    /// runs rank identically), and when `ruleout` is true skips items the
    /// user already interacted with according to [`interactions`]. Fewer
    /// than `num` ids come back only when rule-out plus catalogue
    /// exhaustion leaves fewer survivors.
    ///
    /// # Errors
    ///
    /// Propagates the first [`predict`] failure.
    ///
    /// [`predict`]: Recommender::predict
    /// [`interactions`]: Recommender::interactions
    fn recommend(&self, user: usize, num: usize, ruleout: bool) -> Result<Vec<usize>> {
        if num == 0 {
            return Ok(Vec::new());
        }

        let mut scores: Vec<(usize, f32)> = Vec::with_capacity(self.n_items());
        for item in 0..self.n_items() {
            scores.push((item, self.predict(user, item)?));
        }
        scores.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.0.cmp(&b.0))
        });

        let seen = if ruleout { self.interactions() } else { None };

        let mut result = Vec::with_capacity(num.min(scores.len()));
        for (item, _) in scores {
            if let Some(matrix) = seen {
                if matrix.contains(user, item) {
                    continue;
                }
            }
            result.push(item);
            if result.len() >= num {
                break;
            }
        }
        Ok(result)
    }
}
