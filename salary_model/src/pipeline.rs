use ndarray::{ArrayView2, Axis};
use serde::{Deserialize, Serialize};

use crate::{
    Record, Result, SalaryErr,
    models::{Estimator, GradientBoostingRegressor, LinearRegression, LogisticRegression},
    preprocessing::FittedTransform,
};

/// A fitted feature transform followed by a fitted model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pipeline<M> {
    transform: FittedTransform,
    model: M,
}

pub type RegressionPipeline = Pipeline<RegressionModel>;
pub type ClassificationPipeline = Pipeline<LogisticRegression>;

impl<M: Estimator> Pipeline<M> {
    pub fn new(transform: FittedTransform, model: M) -> Self {
        Self { transform, model }
    }

    pub fn transform(&self) -> &FittedTransform {
        &self.transform
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    /// Transforms `records` and predicts one output per record.
    ///
    /// # Errors
    /// `SizeMismatch` if the model was fit on a different feature width than the
    /// transform produces, or the transform's own errors.
    pub fn predict(&self, records: &[Record]) -> Result<Vec<M::Output>> {
        self.check_width()?;
        let x = self.transform.transform(records)?;
        Ok(self.model.predict(x.view()))
    }

    /// Predicts a single record.
    pub fn predict_one(&self, record: &Record) -> Result<M::Output> {
        self.check_width()?;
        let x = self.transform.transform_one(record)?.insert_axis(Axis(0));

        self.model
            .predict(x.view())
            .pop()
            .ok_or(SalaryErr::EmptyDataset)
    }

    fn check_width(&self) -> Result<()> {
        let (got, expected) = (self.model.width(), self.transform.width());
        if got != expected {
            return Err(SalaryErr::SizeMismatch {
                what: "model features",
                got,
                expected,
            });
        }

        Ok(())
    }
}

/// The regression models that can win the selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "model", rename_all = "snake_case")]
pub enum RegressionModel {
    Linear(LinearRegression),
    GradientBoosting(GradientBoostingRegressor),
}

impl RegressionModel {
    pub const LINEAR_NAME: &'static str = "Linear Regression";
    pub const GRADIENT_BOOSTING_NAME: &'static str = "Gradient Boosting";

    pub fn name(&self) -> &'static str {
        match self {
            RegressionModel::Linear(_) => Self::LINEAR_NAME,
            RegressionModel::GradientBoosting(_) => Self::GRADIENT_BOOSTING_NAME,
        }
    }
}

impl Estimator for RegressionModel {
    type Output = f64;

    fn width(&self) -> usize {
        match self {
            RegressionModel::Linear(m) => m.width(),
            RegressionModel::GradientBoosting(m) => m.width(),
        }
    }

    fn predict(&self, x: ArrayView2<f64>) -> Vec<f64> {
        match self {
            RegressionModel::Linear(m) => m.predict(x),
            RegressionModel::GradientBoosting(m) => m.predict(x),
        }
    }
}
