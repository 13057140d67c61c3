use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom};

use crate::{Result, SalaryErr};

/// A partition of `0..n` into train and test indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Split {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}

/// Shuffles `0..samples` with a seeded rng and holds out `ceil(test_size * samples)`
/// of them for testing.
///
/// Properties:
/// - `train` and `test` are disjoint and together cover `0..samples`.
/// - The same `(samples, test_size, seed)` always yields the same split.
///
/// # Errors
/// `InvalidSplit` if `test_size` is not in `(0, 1)` or either side would be empty.
pub fn train_test_split(samples: usize, test_size: f64, seed: u64) -> Result<Split> {
    let invalid = || SalaryErr::InvalidSplit { samples, test_size };

    if !(test_size > 0.0 && test_size < 1.0) {
        return Err(invalid());
    }

    let n_test = (test_size * samples as f64).ceil() as usize;
    if n_test == 0 || n_test >= samples {
        return Err(invalid());
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut indices: Vec<usize> = (0..samples).collect();
    indices.shuffle(&mut rng);

    let train = indices.split_off(n_test);
    Ok(Split {
        train,
        test: indices,
    })
}

/// Gathers the items at `indices`, in that order.
pub fn take<T: Clone>(items: &[T], indices: &[usize]) -> Vec<T> {
    indices.iter().map(|&i| items[i].clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_sizes_round_the_test_side_up() {
        let split = train_test_split(10, 0.2, 42).unwrap();
        assert_eq!(split.test.len(), 2);
        assert_eq!(split.train.len(), 8);

        let split = train_test_split(11, 0.2, 42).unwrap();
        assert_eq!(split.test.len(), 3);
        assert_eq!(split.train.len(), 8);
    }

    #[test]
    fn split_covers_every_index_once() {
        let split = train_test_split(57, 0.2, 7).unwrap();
        let mut all: Vec<_> = split.train.iter().chain(&split.test).copied().collect();
        all.sort_unstable();
        assert_eq!(all, (0..57).collect::<Vec<_>>());
    }

    #[test]
    fn the_same_seed_gives_the_same_split() {
        let a = train_test_split(100, 0.2, 42).unwrap();
        let b = train_test_split(100, 0.2, 42).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn degenerate_splits_are_rejected() {
        assert!(train_test_split(1, 0.2, 42).is_err());
        assert!(train_test_split(0, 0.2, 42).is_err());
        assert!(train_test_split(10, 0.0, 42).is_err());
        assert!(train_test_split(10, 1.0, 42).is_err());
    }

    #[test]
    fn take_follows_the_index_order() {
        assert_eq!(take(&['a', 'b', 'c'], &[2, 0]), ['c', 'a']);
    }
}
