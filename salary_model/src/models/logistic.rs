use log::{debug, warn};
use ndarray::{Array1, ArrayView2, aview1};
use serde::{Deserialize, Serialize};

use super::{Estimator, LogLoss, LossFn, Sigmoid};
use crate::{Result, SalaryErr, optimization::OptimizerKind};

/// The hyperparameters of a `LogisticRegression`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogisticParams {
    pub max_iter: usize,
    /// Inverse of the L2 regularization strength.
    pub c: f64,
    pub learning_rate: f64,
    /// Training stops once every gradient component is below this.
    pub tol: f64,
    pub optimizer: OptimizerKind,
}

impl Default for LogisticParams {
    fn default() -> Self {
        Self {
            max_iter: 500,
            c: 1.0,
            learning_rate: 0.1,
            tol: 1e-4,
            optimizer: OptimizerKind::Adam,
        }
    }
}

impl LogisticParams {
    /// # Errors
    /// `InvalidConfig` naming the first out of range parameter.
    pub fn validate(&self) -> Result<()> {
        if self.max_iter == 0 {
            return Err(SalaryErr::InvalidConfig(
                "logistic.max_iter must be at least 1".into(),
            ));
        }

        for (name, value) in [
            ("c", self.c),
            ("learning_rate", self.learning_rate),
            ("tol", self.tol),
        ] {
            if !(value > 0.0 && value.is_finite()) {
                return Err(SalaryErr::InvalidConfig(format!(
                    "logistic.{name} must be positive, got {value}"
                )));
            }
        }

        Ok(())
    }
}

/// L2 regularized binary logistic regression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticRegression {
    coef: Vec<f64>,
    intercept: f64,
}

impl LogisticRegression {
    /// Minimizes the mean log loss plus `‖w‖² / (2 C n)` with full batch gradient steps.
    ///
    /// # Arguments
    /// * `x` - The feature matrix, one sample per row.
    /// * `y` - The class of every sample, `0` or `1`.
    /// * `params` - The training hyperparameters.
    ///
    /// # Returns
    /// The fitted model, or `SingleClass` if `y` doesn't contain both classes.
    pub fn fit(x: ArrayView2<f64>, y: &[u8], params: &LogisticParams) -> Result<Self> {
        super::check_samples(x, y.len())?;
        params.validate()?;

        let first = y[0];
        if y.iter().all(|&c| c == first) {
            return Err(SalaryErr::SingleClass { class: first });
        }

        let (n, width) = x.dim();
        let target: Array1<f64> = y.iter().map(|&c| f64::from(c)).collect();
        let penalty = 1.0 / (params.c * n as f64);

        // the intercept is stored last
        let mut weights = vec![0.0; width + 1];
        let mut grad = vec![0.0; width + 1];
        let mut optimizer = params.optimizer.build(width + 1, params.learning_rate);
        let mut converged = false;

        for iter in 0..params.max_iter {
            let (coef, intercept) = weights.split_at(width);
            let proba = Self::probabilities(x, coef, intercept[0]);
            let dz = LogLoss.loss_prime(proba.view(), target.view());

            let dw = x.t().dot(&dz);
            for ((g, &d), &w) in grad.iter_mut().zip(&dw).zip(coef) {
                *g = d + penalty * w;
            }
            grad[width] = dz.sum();

            let max_grad = grad.iter().fold(0.0f64, |m, g| m.max(g.abs()));
            if max_grad < params.tol {
                debug!(iterations = iter; "logistic regression converged");
                converged = true;
                break;
            }

            optimizer.update_params(&grad, &mut weights)?;
        }

        if !converged {
            warn!(
                "logistic regression did not converge after {} iterations",
                params.max_iter
            );
        }

        let (coef, intercept) = weights.split_at(width);
        let proba = Self::probabilities(x, coef, intercept[0]);
        debug!(log_loss = LogLoss.loss(proba.view(), target.view()); "logistic regression fitted");

        let intercept = weights.pop().unwrap_or_default();
        Ok(Self {
            coef: weights,
            intercept,
        })
    }

    fn probabilities(x: ArrayView2<f64>, coef: &[f64], intercept: f64) -> Array1<f64> {
        (x.dot(&aview1(coef)) + intercept).mapv(|z| Sigmoid.f(z))
    }

    /// The signed distance of every row to the decision boundary.
    pub fn decision_function(&self, x: ArrayView2<f64>) -> Array1<f64> {
        x.dot(&aview1(&self.coef)) + self.intercept
    }
}

impl Estimator for LogisticRegression {
    type Output = u8;

    fn width(&self) -> usize {
        self.coef.len()
    }

    fn predict(&self, x: ArrayView2<f64>) -> Vec<u8> {
        self.decision_function(x)
            .iter()
            .map(|&z| u8::from(z > 0.0))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use ndarray::array;

    use super::*;

    #[test]
    fn separates_two_clusters() {
        let x = array![
            [-2.0, -1.0],
            [-1.5, -2.0],
            [-1.0, -1.5],
            [1.0, 1.5],
            [1.5, 2.0],
            [2.0, 1.0]
        ];
        let y = [0, 0, 0, 1, 1, 1];

        let model = LogisticRegression::fit(x.view(), &y, &LogisticParams::default()).unwrap();

        assert_eq!(model.predict(x.view()), y);
        assert!(model.decision_function(x.view())[5] > 0.0);
    }

    #[test]
    fn plain_gradient_descent_also_trains() {
        let x = array![[-1.0], [-2.0], [1.0], [2.0]];
        let y = [0, 0, 1, 1];
        let params = LogisticParams {
            optimizer: OptimizerKind::GradientDescent,
            learning_rate: 1.0,
            ..Default::default()
        };

        let model = LogisticRegression::fit(x.view(), &y, &params).unwrap();
        assert_eq!(model.predict(x.view()), y);
    }

    #[test]
    fn a_single_class_target_is_rejected() {
        let x = array![[1.0], [2.0]];
        assert!(matches!(
            LogisticRegression::fit(x.view(), &[1, 1], &LogisticParams::default()),
            Err(SalaryErr::SingleClass { class: 1 })
        ));
    }

    #[test]
    fn a_zero_decision_value_is_the_low_class() {
        let model = LogisticRegression {
            coef: vec![1.0],
            intercept: 0.0,
        };
        assert_eq!(model.predict(array![[0.0], [0.1]].view()), [0, 1]);
    }
}
