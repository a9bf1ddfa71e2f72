// =========================================================================
// FALSIFY-EV: Evaluation protocol contract (recomendar eval)
//
// Pins the aggregate guarantees of the batch evaluation: hit-count
// bounds, metric bounds, dispatch equivalence, and the hard failure on
// an empty evaluation set.
//
// References:
//   - Herlocker, Konstan, Terveen & Riedl (2004) "Evaluating
//     collaborative filtering recommender systems"
// =========================================================================

use crate::error::RecomendarError;
use crate::eval::Evaluation;
use crate::primitives::InteractionMatrix;
use crate::recommend::Recommender;

/// Deterministic arithmetic scorer; rule-out source is injected
/// independently of the held-out matrix.
struct HashScorer {
    users: usize,
    items: usize,
    seen: Option<InteractionMatrix>,
}

impl Recommender for HashScorer {
    fn n_users(&self) -> usize {
        self.users
    }

    fn n_items(&self) -> usize {
        self.items
    }

    fn interactions(&self) -> Option<&InteractionMatrix> {
        self.seen.as_ref()
    }

    fn predict(&self, user: usize, item: usize) -> crate::error::Result<f32> {
        Ok(((user * 13 + item * 7) % 41) as f32)
    }
}

fn synthetic_matrix(users: usize, items: usize) -> InteractionMatrix {
    // Roughly a third of the grid, spread across all users; user 0 is
    // left without held-out interactions on purpose.
    let mut pairs = Vec::new();
    for user in 1..users {
        for item in 0..items {
            if (user + item) % 3 == 0 {
                pairs.push((user, item));
            }
        }
    }
    InteractionMatrix::from_pairs(users, items, &pairs).expect("in bounds")
}

/// FALSIFY-EV-001: empty held-out set yields an empty hit list
#[test]
fn falsify_ev_001_no_held_out_no_hits() {
    let matrix = synthetic_matrix(6, 12);
    let model = HashScorer {
        users: 6,
        items: 12,
        seen: None,
    };
    let ev = Evaluation::new(&matrix, &model).with_workers(0);

    let hits = ev.hits(0).expect("scorer total");
    assert!(
        hits.is_empty(),
        "FALSIFIED EV-001: user without held-out items hit {hits:?}"
    );
}

/// FALSIFY-EV-002: hit count ≤ min(cutoff, held-out count) for every user
#[test]
fn falsify_ev_002_hit_count_bounded() {
    let matrix = synthetic_matrix(8, 15);
    let model = HashScorer {
        users: 8,
        items: 15,
        seen: None,
    };

    for cutoff in [1, 3, 5, 15] {
        let ev = Evaluation::new(&matrix, &model)
            .with_cutoff(cutoff)
            .with_workers(0);
        for user in 0..8 {
            let n_hits = ev.hits(user).expect("scorer total").len();
            let bound = cutoff.min(matrix.row(user).len());
            assert!(
                n_hits <= bound,
                "FALSIFIED EV-002: user {user} has {n_hits} hits, bound {bound} at cutoff {cutoff}"
            );
        }
    }
}

/// FALSIFY-EV-003: recall and precision stay in [0, 1]
#[test]
fn falsify_ev_003_metrics_bounded() {
    let matrix = synthetic_matrix(10, 20);
    let model = HashScorer {
        users: 10,
        items: 20,
        seen: None,
    };

    for cutoff in [1, 2, 5, 20] {
        let metrics = Evaluation::new(&matrix, &model)
            .with_cutoff(cutoff)
            .with_workers(0)
            .test()
            .expect("matrix has valid users");
        assert!(
            (0.0..=1.0).contains(&metrics.recall),
            "FALSIFIED EV-003: recall {} at cutoff {cutoff}",
            metrics.recall
        );
        assert!(
            (0.0..=1.0).contains(&metrics.precision),
            "FALSIFIED EV-003: precision {} at cutoff {cutoff}",
            metrics.precision
        );
    }
}

/// FALSIFY-EV-004: sequential and parallel dispatch agree exactly
#[cfg(feature = "parallel")]
#[test]
fn falsify_ev_004_dispatch_equivalence() {
    let matrix = synthetic_matrix(12, 18);
    let seen = InteractionMatrix::from_pairs(12, 18, &[(2, 0), (3, 6), (7, 17)]).expect("bounds");
    let model = HashScorer {
        users: 12,
        items: 18,
        seen: Some(seen),
    };

    let sequential = Evaluation::new(&matrix, &model)
        .with_workers(0)
        .test()
        .expect("valid users");
    for workers in [1, 2, 6] {
        let parallel = Evaluation::new(&matrix, &model)
            .with_workers(workers)
            .test()
            .expect("valid users");
        assert_eq!(
            sequential, parallel,
            "FALSIFIED EV-004: {workers}-worker run diverged from sequential"
        );
    }
}

/// FALSIFY-EV-005: an all-zero test matrix is a hard error, never NaN
#[test]
fn falsify_ev_005_empty_set_hard_error() {
    let matrix = InteractionMatrix::from_pairs(5, 5, &[]).expect("in bounds");
    let model = HashScorer {
        users: 5,
        items: 5,
        seen: None,
    };

    let err = Evaluation::new(&matrix, &model)
        .with_workers(0)
        .test()
        .unwrap_err();
    assert!(
        matches!(err, RecomendarError::EmptyEvaluationSet),
        "FALSIFIED EV-005: expected EmptyEvaluationSet, got {err:?}"
    );
}

/// FALSIFY-EV-006: invalid users (no held-out items) dilute neither metric
#[test]
fn falsify_ev_006_invalid_users_excluded_from_denominators() {
    // One valid user with a guaranteed hit among ten users total.
    let matrix = InteractionMatrix::from_pairs(10, 4, &[(0, 2)]).expect("in bounds");

    struct AlwaysTwo;
    impl Recommender for AlwaysTwo {
        fn n_users(&self) -> usize {
            10
        }
        fn n_items(&self) -> usize {
            4
        }
        fn recommend(
            &self,
            _user: usize,
            _num: usize,
            _ruleout: bool,
        ) -> crate::error::Result<Vec<usize>> {
            Ok(vec![2])
        }
    }

    let metrics = Evaluation::new(&matrix, &AlwaysTwo)
        .with_cutoff(4)
        .with_workers(0)
        .test()
        .expect("one valid user");
    // valid_user_count = 1: recall 1/1, precision 1/(1*4).
    assert!(
        (metrics.recall - 1.0).abs() < 1e-6,
        "FALSIFIED EV-006: recall {} diluted by invalid users",
        metrics.recall
    );
    assert!(
        (metrics.precision - 0.25).abs() < 1e-6,
        "FALSIFIED EV-006: precision {} diluted by invalid users",
        metrics.precision
    );
}
