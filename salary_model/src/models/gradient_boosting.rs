use log::debug;
use ndarray::{ArrayView1, ArrayView2, aview1};
use rand::{SeedableRng, rngs::StdRng, seq::index};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::{Estimator, LossFn, Mse, RegressionTree};
use crate::{Result, SalaryErr};

/// The hyperparameters of a `GradientBoostingRegressor`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoostingParams {
    pub n_estimators: usize,
    pub learning_rate: f64,
    pub max_depth: usize,
    pub subsample: f64,
}

impl Default for BoostingParams {
    fn default() -> Self {
        Self {
            n_estimators: 300,
            learning_rate: 0.05,
            max_depth: 4,
            subsample: 0.9,
        }
    }
}

impl BoostingParams {
    /// # Errors
    /// `InvalidConfig` naming the first out of range parameter.
    pub fn validate(&self) -> Result<()> {
        if self.n_estimators == 0 {
            return Err(SalaryErr::InvalidConfig(
                "boosting.n_estimators must be at least 1".into(),
            ));
        }

        if !(self.learning_rate > 0.0 && self.learning_rate.is_finite()) {
            return Err(SalaryErr::InvalidConfig(format!(
                "boosting.learning_rate must be positive, got {}",
                self.learning_rate
            )));
        }

        if !(self.subsample > 0.0 && self.subsample <= 1.0) {
            return Err(SalaryErr::InvalidConfig(format!(
                "boosting.subsample must be in (0, 1], got {}",
                self.subsample
            )));
        }

        Ok(())
    }
}

/// Squared error gradient boosting over regression trees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradientBoostingRegressor {
    init: f64,
    learning_rate: f64,
    width: usize,
    trees: Vec<RegressionTree>,
}

impl GradientBoostingRegressor {
    /// Fits `n_estimators` trees, each one to the residuals of the ensemble so far.
    ///
    /// # Arguments
    /// * `x` - The feature matrix, one sample per row.
    /// * `y` - The target, one value per sample.
    /// * `params` - The boosting hyperparameters.
    /// * `seed` - Seeds the row subsampling of every stage.
    ///
    /// # Returns
    /// The fitted ensemble or an error if the inputs or the parameters are invalid.
    pub fn fit(
        x: ArrayView2<f64>,
        y: ArrayView1<f64>,
        params: &BoostingParams,
        seed: u64,
    ) -> Result<Self> {
        super::check_samples(x, y.len())?;
        params.validate()?;

        let n = x.nrows();
        let init = y.mean().ok_or(SalaryErr::EmptyDataset)?;
        let bag = ((params.subsample * n as f64).floor() as usize).clamp(1, n);

        let all_rows: Vec<usize> = (0..n).collect();
        let presorted = RegressionTree::sort_rows(x, &all_rows);

        let mut rng = StdRng::seed_from_u64(seed);
        let mut pred = vec![init; n];
        let mut residuals = vec![0.0; n];
        let mut in_bag = vec![false; n];
        let mut trees = Vec::with_capacity(params.n_estimators);

        for stage in 0..params.n_estimators {
            for ((r, &t), &p) in residuals.iter_mut().zip(y).zip(&pred) {
                *r = t - p;
            }

            let mut rows = index::sample(&mut rng, n, bag).into_vec();
            rows.sort_unstable();

            in_bag.fill(false);
            for &r in &rows {
                in_bag[r] = true;
            }

            let sorted: Vec<Vec<usize>> = presorted
                .par_iter()
                .map(|order| order.iter().copied().filter(|&r| in_bag[r]).collect())
                .collect();

            let tree = RegressionTree::fit(x, aview1(&residuals), sorted, rows, params.max_depth);

            pred.par_iter_mut().enumerate().for_each(|(i, p)| {
                *p += params.learning_rate * tree.predict_row(x.row(i));
            });

            trees.push(tree);

            if (stage + 1) % 50 == 0 {
                let loss = Mse.loss(aview1(&pred), y);
                debug!(stage = stage + 1, loss = loss; "boosting progress");
            }
        }

        Ok(Self {
            init,
            learning_rate: params.learning_rate,
            width: x.ncols(),
            trees,
        })
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }
}

impl Estimator for GradientBoostingRegressor {
    type Output = f64;

    fn width(&self) -> usize {
        self.width
    }

    fn predict(&self, x: ArrayView2<f64>) -> Vec<f64> {
        (0..x.nrows())
            .into_par_iter()
            .map(|i| {
                let row = x.row(i);
                self.init
                    + self.learning_rate
                        * self.trees.iter().map(|t| t.predict_row(row)).sum::<f64>()
            })
            .collect()
    }
}
