//! Offline evaluation of top-N recommenders.
//!
//! [`Evaluation`] runs the batch evaluation protocol: for every test user,
//! intersect the model's top-N recommendations with the user's held-out
//! interactions, then aggregate the per-user hit counts into recall@N and
//! precision@N. Per-user work optionally fans out across a worker pool;
//! the aggregation is commutative, so completion order never affects the
//! result.
//!
//! # Quick Start
//!
//! ```
//! use recomendar::prelude::*;
//!
//! // Ranking-only stub: overrides recommend directly.
//! struct Fixed;
//!
//! impl Recommender for Fixed {
//!     fn n_users(&self) -> usize {
//!         2
//!     }
//!
//!     fn n_items(&self) -> usize {
//!         2
//!     }
//!
//!     fn recommend(&self, user: usize, _num: usize, _ruleout: bool) -> Result<Vec<usize>> {
//!         Ok(if user == 0 { vec![1] } else { vec![] })
//!     }
//! }
//!
//! let matrix = InteractionMatrix::from_dense(2, 2, vec![0, 1, 1, 1]).expect("length matches");
//! let ev = Evaluation::new(&matrix, &Fixed).with_workers(0);
//! let metrics = ev.test().expect("matrix has held-out interactions");
//! assert!((metrics.recall - 0.5).abs() < 1e-6);
//! assert!((metrics.precision - 0.1).abs() < 1e-6);
//! ```

use std::time::Instant;

use tracing::{debug, info};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::error::{RecomendarError, Result};
use crate::primitives::InteractionMatrix;
use crate::recommend::Recommender;

/// Default recommendation cutoff (N).
pub const DEFAULT_CUTOFF: usize = 5;

/// Default worker count for parallel dispatch.
pub const DEFAULT_WORKERS: usize = 6;

/// Aggregate accuracy of a model at a fixed cutoff.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EvalMetrics {
    /// Mean over valid users of (hits / held-out count).
    pub recall: f32,
    /// Total hits over (valid user count × cutoff).
    pub precision: f32,
}

impl EvalMetrics {
    /// Generate a formatted report string.
    #[must_use]
    pub fn report(&self) -> String {
        format!(
            "Evaluation\n\
             ──────────\n\
             recall:    {:.4}\n\
             precision: {:.4}",
            self.recall, self.precision
        )
    }
}

/// Batch evaluation of a recommender against held-out interactions.
///
/// Borrows the test matrix and the model; construction never mutates
/// either, and every [`test`] call is independent and idempotent.
///
/// Configuration follows the builder idiom: cutoff defaults to
/// [`DEFAULT_CUTOFF`], the user set defaults to every row of the test
/// matrix, and the worker count defaults to [`DEFAULT_WORKERS`] (0 runs
/// sequentially in-process; without the `parallel` feature the run is
/// always sequential).
///
/// [`test`]: Evaluation::test
pub struct Evaluation<'a, M> {
    matrix: &'a InteractionMatrix,
    model: &'a M,
    cutoff: usize,
    users: Vec<usize>,
    workers: usize,
}

impl<'a, M: Recommender + Sync> Evaluation<'a, M> {
    /// Creates an evaluation of `model` against the held-out `matrix`.
    pub fn new(matrix: &'a InteractionMatrix, model: &'a M) -> Self {
        Self {
            matrix,
            model,
            cutoff: DEFAULT_CUTOFF,
            users: (0..matrix.n_users()).collect(),
            workers: DEFAULT_WORKERS,
        }
    }

    /// Sets the recommendation cutoff (N).
    #[must_use]
    pub fn with_cutoff(mut self, cutoff: usize) -> Self {
        self.cutoff = cutoff;
        self
    }

    /// Restricts evaluation to an explicit user set.
    #[must_use]
    pub fn with_users(mut self, users: Vec<usize>) -> Self {
        self.users = users;
        self
    }

    /// Sets the worker count; 0 disables parallel dispatch.
    #[must_use]
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Held-out items of `user` that appear in the model's top-N list.
    ///
    /// A user with no held-out interactions yields an empty list without a
    /// recommendation call. Duplicate recommended items collapse to one;
    /// the order of the returned hits carries no meaning beyond its count.
    ///
    /// # Errors
    ///
    /// Propagates a [`Recommender::recommend`] failure.
    ///
    /// # Panics
    ///
    /// Panics if `user` is outside the test matrix.
    pub fn hits(&self, user: usize) -> Result<Vec<usize>> {
        let held_out = self.matrix.row(user);
        if held_out.is_empty() {
            return Ok(Vec::new());
        }

        let recommended = self.model.recommend(user, self.cutoff, true)?;
        let mut matched: Vec<usize> = recommended
            .into_iter()
            .filter(|item| held_out.binary_search(item).is_ok())
            .collect();
        matched.sort_unstable();
        matched.dedup();
        Ok(matched)
    }

    /// Runs the evaluation and returns recall@N and precision@N.
    ///
    /// Blocks until every per-user computation completes; with parallel
    /// dispatch, the worker pool is torn down before returning.
    ///
    /// # Errors
    ///
    /// - [`RecomendarError::EmptyEvaluationSet`] when no evaluated user
    ///   has any held-out interaction.
    /// - [`RecomendarError::InvalidHyperparameter`] for a cutoff of 0.
    /// - [`RecomendarError::WorkerPool`] when pool construction fails.
    /// - Any failure of the model's `recommend`.
    pub fn test(&self) -> Result<EvalMetrics> {
        self.run(false)
    }

    /// Like [`test`], additionally emitting a `debug!` record per user
    /// with at least one hit, listing the hit item ids.
    ///
    /// # Errors
    ///
    /// Same as [`test`].
    ///
    /// [`test`]: Evaluation::test
    pub fn test_full(&self) -> Result<EvalMetrics> {
        self.run(true)
    }

    fn run(&self, full: bool) -> Result<EvalMetrics> {
        if self.cutoff == 0 {
            return Err(RecomendarError::InvalidHyperparameter {
                param: "cutoff".to_string(),
                value: "0".to_string(),
                constraint: ">= 1".to_string(),
            });
        }

        let started = Instant::now();
        let counts = self.hit_counts(full)?;

        let total_hits: usize = counts.iter().map(|&(_, n)| n).sum();
        let mut recall_sum = 0.0_f32;
        let mut valid_users = 0_usize;
        for &(user, n_hits) in &counts {
            let held_out = self.matrix.row(user).len();
            if held_out > 0 {
                valid_users += 1;
                recall_sum += n_hits as f32 / held_out as f32;
            }
        }

        if valid_users == 0 {
            return Err(RecomendarError::EmptyEvaluationSet);
        }

        let recall = recall_sum / valid_users as f32;
        let precision = total_hits as f32 / (valid_users * self.cutoff) as f32;

        info!(recall, precision, "evaluation finished");
        debug!(
            elapsed_ms = started.elapsed().as_millis() as u64,
            users = counts.len(),
            valid_users,
            total_hits,
            workers = self.workers,
            "evaluation timing"
        );

        Ok(EvalMetrics { recall, precision })
    }

    /// Per-user (user, hit count) pairs, dispatched per configuration.
    ///
    /// Both dispatch paths feed the same commutative aggregation, so the
    /// parallel path is a throughput knob only.
    fn hit_counts(&self, full: bool) -> Result<Vec<(usize, usize)>> {
        #[cfg(feature = "parallel")]
        let counts = if self.workers > 0 {
            self.pooled_hit_counts(full)
        } else {
            self.sequential_hit_counts(full)
        };

        #[cfg(not(feature = "parallel"))]
        let counts = self.sequential_hit_counts(full);

        counts
    }

    fn sequential_hit_counts(&self, full: bool) -> Result<Vec<(usize, usize)>> {
        self.users
            .iter()
            .map(|&user| self.count_hits(user, full))
            .collect()
    }

    #[cfg(feature = "parallel")]
    fn pooled_hit_counts(&self, full: bool) -> Result<Vec<(usize, usize)>> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.workers)
            .build()
            .map_err(|e| RecomendarError::WorkerPool {
                message: e.to_string(),
            })?;
        pool.install(|| {
            self.users
                .par_iter()
                .map(|&user| self.count_hits(user, full))
                .collect()
        })
    }

    fn count_hits(&self, user: usize, full: bool) -> Result<(usize, usize)> {
        let matched = self.hits(user)?;
        if full && !matched.is_empty() {
            debug!(user, hits = ?matched, "per-user hits");
        }
        Ok((user, matched.len()))
    }
}


#[cfg(test)]
#[path = "tests_eval_contract.rs"]
mod tests_eval_contract;
