use ndarray::{Array1, ArrayView1};

pub trait LossFn {
    fn loss(&self, y_pred: ArrayView1<f64>, y: ArrayView1<f64>) -> f64;
    fn loss_prime(&self, y_pred: ArrayView1<f64>, y: ArrayView1<f64>) -> Array1<f64>;
}

/// Mean squared error loss function.
#[derive(Debug, Default, Clone, Copy)]
pub struct Mse;

impl LossFn for Mse {
    fn loss(&self, y_pred: ArrayView1<f64>, y: ArrayView1<f64>) -> f64 {
        (&y_pred - &y)
            .mapv(|x| x.powi(2))
            .mean()
            .unwrap_or_default()
    }

    fn loss_prime(&self, y_pred: ArrayView1<f64>, y: ArrayView1<f64>) -> Array1<f64> {
        (&y_pred - &y) * (2.0 / y_pred.len() as f64)
    }
}

/// Binary cross entropy over predicted probabilities.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogLoss;

impl LogLoss {
    const EPS: f64 = 1e-15;
}

impl LossFn for LogLoss {
    fn loss(&self, y_pred: ArrayView1<f64>, y: ArrayView1<f64>) -> f64 {
        y_pred
            .iter()
            .zip(y)
            .map(|(&p, &t)| {
                let p = p.clamp(Self::EPS, 1.0 - Self::EPS);
                -(t * p.ln() + (1.0 - t) * (1.0 - p).ln())
            })
            .sum::<f64>()
            / y_pred.len().max(1) as f64
    }

    /// The derivative of the mean loss with respect to the decision value that was fed
    /// to the sigmoid producing `y_pred`.
    fn loss_prime(&self, y_pred: ArrayView1<f64>, y: ArrayView1<f64>) -> Array1<f64> {
        (&y_pred - &y) / y_pred.len().max(1) as f64
    }
}
