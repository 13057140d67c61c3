use serde::{Deserialize, Serialize};

use super::{Adam, GradientDescent};
use crate::Result;

pub trait Optimizer {
    /// Takes one step on `params` following `grad`.
    ///
    /// # Errors
    /// `SizeMismatch` if `grad` and `params` have different lengths.
    fn update_params(&mut self, grad: &[f64], params: &mut [f64]) -> Result<()>;
}

/// The optimization algorithm a gradient trained model uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptimizerKind {
    GradientDescent,
    #[default]
    Adam,
}

impl OptimizerKind {
    /// Builds a new optimizer of this kind for `len` parameters.
    pub fn build(self, len: usize, learning_rate: f64) -> Box<dyn Optimizer> {
        match self {
            OptimizerKind::GradientDescent => Box::new(GradientDescent::new(learning_rate)),
            OptimizerKind::Adam => Box::new(Adam::with_defaults(len, learning_rate)),
        }
    }
}
