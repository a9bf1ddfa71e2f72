//! Sparse user-item interaction matrix.

use serde::{Deserialize, Serialize};

/// A sparse 0/1 user-item interaction matrix in CSR layout.
///
/// Entry (u, i) is set iff user `u` interacted with item `i`. The matrix is
/// immutable after construction; both the rule-out role (interactions a
/// recommender must not repeat) and the held-out role (ground truth for
/// evaluation) are served by this one type, and the two may be the same
/// instance.
///
/// # Examples
///
/// ```
/// use recomendar::primitives::InteractionMatrix;
///
/// let m = InteractionMatrix::from_dense(2, 3, vec![0, 1, 0, 1, 1, 0]).expect("data length matches users * items");
/// assert_eq!(m.shape(), (2, 3));
/// assert_eq!(m.row(0), &[1]);
/// assert_eq!(m.row(1), &[0, 1]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionMatrix {
    /// Row start offsets into `columns`; length is `n_users + 1`.
    offsets: Vec<usize>,
    /// Nonzero column indices, sorted and deduplicated within each row.
    columns: Vec<usize>,
    n_items: usize,
}

impl InteractionMatrix {
    /// Creates a matrix from (user, item) interaction pairs.
    ///
    /// Duplicate pairs collapse to a single entry.
    ///
    /// # Errors
    ///
    /// Returns an error if any user or item index is out of bounds.
    pub fn from_pairs(
        n_users: usize,
        n_items: usize,
        pairs: &[(usize, usize)],
    ) -> Result<Self, &'static str> {
        let mut rows: Vec<Vec<usize>> = vec![Vec::new(); n_users];
        for &(user, item) in pairs {
            if user >= n_users {
                return Err("User index out of bounds");
            }
            if item >= n_items {
                return Err("Item index out of bounds");
            }
            rows[user].push(item);
        }

        let mut offsets = Vec::with_capacity(n_users + 1);
        let mut columns = Vec::with_capacity(pairs.len());
        offsets.push(0);
        for mut row in rows {
            row.sort_unstable();
            row.dedup();
            columns.extend_from_slice(&row);
            offsets.push(columns.len());
        }

        Ok(Self {
            offsets,
            columns,
            n_items,
        })
    }

    /// Creates a matrix from a dense row-major 0/1 buffer.
    ///
    /// Any nonzero byte becomes an entry.
    ///
    /// # Errors
    ///
    /// Returns an error if data length doesn't match `n_users * n_items`.
    pub fn from_dense(n_users: usize, n_items: usize, data: Vec<u8>) -> Result<Self, &'static str> {
        if data.len() != n_users * n_items {
            return Err("Data length must equal n_users * n_items");
        }

        let mut offsets = Vec::with_capacity(n_users + 1);
        let mut columns = Vec::new();
        offsets.push(0);
        for user in 0..n_users {
            for item in 0..n_items {
                if data[user * n_items + item] != 0 {
                    columns.push(item);
                }
            }
            offsets.push(columns.len());
        }

        Ok(Self {
            offsets,
            columns,
            n_items,
        })
    }

    /// Returns the shape as (`n_users`, `n_items`).
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        (self.n_users(), self.n_items)
    }

    /// Returns the number of users (rows).
    #[must_use]
    pub fn n_users(&self) -> usize {
        self.offsets.len() - 1
    }

    /// Returns the number of items (columns).
    #[must_use]
    pub fn n_items(&self) -> usize {
        self.n_items
    }

    /// Returns the sorted nonzero item indices for a user.
    ///
    /// # Panics
    ///
    /// Panics if `user` is out of bounds.
    #[must_use]
    pub fn row(&self, user: usize) -> &[usize] {
        &self.columns[self.offsets[user]..self.offsets[user + 1]]
    }

    /// Returns true if user `user` interacted with item `item`.
    ///
    /// # Panics
    ///
    /// Panics if `user` is out of bounds.
    #[must_use]
    pub fn contains(&self, user: usize, item: usize) -> bool {
        self.row(user).binary_search(&item).is_ok()
    }

    /// Returns the total number of interactions.
    #[must_use]
    pub fn nnz(&self) -> usize {
        self.columns.len()
    }
}
