use ndarray::{ArrayView1, ArrayView2, Axis, aview1};
use serde::{Deserialize, Serialize};

use super::{Estimator, linalg};
use crate::{Result, SalaryErr};

/// Ordinary least squares with an intercept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearRegression {
    coef: Vec<f64>,
    intercept: f64,
}

impl LinearRegression {
    /// Fits the least squares solution by solving the centered normal equations.
    ///
    /// # Arguments
    /// * `x` - The feature matrix, one sample per row.
    /// * `y` - The target, one value per sample.
    ///
    /// # Returns
    /// The fitted model or an error if the inputs don't line up or are empty.
    pub fn fit(x: ArrayView2<f64>, y: ArrayView1<f64>) -> Result<Self> {
        super::check_samples(x, y.len())?;

        let x_mean = x.mean_axis(Axis(0)).ok_or(SalaryErr::EmptyDataset)?;
        let y_mean = y.mean().ok_or(SalaryErr::EmptyDataset)?;

        let xc = &x - &x_mean;
        let yc = &y - y_mean;

        let gram = xc.t().dot(&xc);
        let rhs = xc.t().dot(&yc);
        let coef = linalg::solve_psd(gram.view(), rhs.view())?;

        let intercept = y_mean - coef.dot(&x_mean);

        Ok(Self {
            coef: coef.to_vec(),
            intercept,
        })
    }

    pub fn coef(&self) -> &[f64] {
        &self.coef
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }
}

impl Estimator for LinearRegression {
    type Output = f64;

    fn width(&self) -> usize {
        self.coef.len()
    }

    fn predict(&self, x: ArrayView2<f64>) -> Vec<f64> {
        (x.dot(&aview1(&self.coef)) + self.intercept).to_vec()
    }
}
