use super::Optimizer;
use crate::{Result, SalaryErr};

#[derive(Debug)]
pub struct Adam {
    learning_rate: f64,
    beta1: f64,
    beta2: f64,
    beta1_t: f64,
    beta2_t: f64,
    v: Box<[f64]>,
    s: Box<[f64]>,
    epsilon: f64,
}

impl Adam {
    /// Creates a new `Adam` optimizer.
    ///
    /// # Arguments
    /// * `len` - The amount of parameters this instance should hold.
    /// * `learning_rate` - The small coefficient that modulates the amount of training per update.
    /// * `beta1`, `beta2`, `epsilon` - Hyperparameters to the optimization algorithm.
    ///
    /// # Returns
    /// A new `Adam` instance.
    pub fn new(len: usize, learning_rate: f64, beta1: f64, beta2: f64, epsilon: f64) -> Self {
        Self {
            learning_rate,
            beta1,
            beta2,
            beta1_t: 1.,
            beta2_t: 1.,
            v: vec![0.; len].into_boxed_slice(),
            s: vec![0.; len].into_boxed_slice(),
            epsilon,
        }
    }

    /// Creates a new `Adam` optimizer with the usual `0.9`, `0.999` and `1e-8`.
    pub fn with_defaults(len: usize, learning_rate: f64) -> Self {
        Self::new(len, learning_rate, 0.9, 0.999, 1e-8)
    }
}

impl Optimizer for Adam {
    fn update_params(&mut self, grad: &[f64], params: &mut [f64]) -> Result<()> {
        if grad.len() != params.len() || params.len() != self.v.len() {
            return Err(SalaryErr::SizeMismatch {
                what: "optimizer gradient",
                got: grad.len(),
                expected: self.v.len(),
            });
        }

        let Self {
            learning_rate: lr,
            beta1: b1,
            beta2: b2,
            epsilon: eps,
            ..
        } = *self;

        self.beta1_t *= b1;
        self.beta2_t *= b2;

        let bc1 = 1. - self.beta1_t;
        let bc2 = 1. - self.beta2_t;
        let step_size = lr * (bc2.sqrt() / bc1);

        params
            .iter_mut()
            .zip(grad)
            .zip(self.v.iter_mut())
            .zip(self.s.iter_mut())
            .for_each(|(((p, g), v), s)| {
                *v = b1 * *v + (1. - b1) * g;
                *s = b2 * *s + (1. - b2) * g.powi(2);
                *p -= step_size * *v / (s.sqrt() + eps);
            });

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_step_moves_each_param_by_the_learning_rate() {
        let mut adam = Adam::with_defaults(2, 0.1);
        let mut params = [1.0, 1.0];

        adam.update_params(&[3.0, -0.5], &mut params).unwrap();

        assert!((params[0] - 0.9).abs() < 1e-6);
        assert!((params[1] - 1.1).abs() < 1e-6);
    }

    #[test]
    fn minimizes_a_quadratic() {
        let mut adam = Adam::with_defaults(1, 0.1);
        let mut params = [5.0];

        for _ in 0..500 {
            let grad = [2.0 * (params[0] - 2.0)];
            adam.update_params(&grad, &mut params).unwrap();
        }

        assert!((params[0] - 2.0).abs() < 1e-2);
    }

    #[test]
    fn a_gradient_of_the_wrong_length_is_rejected() {
        let mut adam = Adam::with_defaults(2, 0.1);
        assert!(adam.update_params(&[1.0], &mut [0.0]).is_err());
    }
}
