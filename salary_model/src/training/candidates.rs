use ndarray::{ArrayView1, ArrayView2};

use crate::{
    Result,
    models::{BoostingParams, GradientBoostingRegressor, LinearRegression},
    pipeline::RegressionModel,
};

/// An unfitted regression model competing in the selection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Candidate {
    Linear,
    GradientBoosting(BoostingParams),
}

impl Candidate {
    /// The candidates in the order they're tried, which is also their tie-break order.
    pub fn all(boosting: BoostingParams) -> Vec<Candidate> {
        vec![Candidate::Linear, Candidate::GradientBoosting(boosting)]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Candidate::Linear => RegressionModel::LINEAR_NAME,
            Candidate::GradientBoosting(_) => RegressionModel::GRADIENT_BOOSTING_NAME,
        }
    }

    /// Fits this candidate on the transformed training split.
    pub fn fit(
        &self,
        x: ArrayView2<f64>,
        y: ArrayView1<f64>,
        seed: u64,
    ) -> Result<RegressionModel> {
        let model = match self {
            Candidate::Linear => RegressionModel::Linear(LinearRegression::fit(x, y)?),
            Candidate::GradientBoosting(params) => RegressionModel::GradientBoosting(
                GradientBoostingRegressor::fit(x, y, params, seed)?,
            ),
        };

        Ok(model)
    }
}

#[cfg(test)]
mod tests {
    use ndarray::array;

    use super::*;

    #[test]
    fn a_fitted_candidate_reports_the_candidate_name() {
        let x = array![[0.0, 1.0], [1.0, 0.0], [2.0, 2.0], [3.0, 1.0], [4.0, 3.0]];
        let y = array![1.0, 2.0, 5.0, 6.0, 9.0];
        let boosting = BoostingParams {
            n_estimators: 3,
            ..Default::default()
        };

        for candidate in Candidate::all(boosting) {
            let model = candidate.fit(x.view(), y.view(), 7).unwrap();
            assert_eq!(model.name(), candidate.name());
        }
    }

    #[test]
    fn linear_is_tried_first() {
        let names: Vec<_> = Candidate::all(BoostingParams::default())
            .iter()
            .map(Candidate::name)
            .collect();
        assert_eq!(names, ["Linear Regression", "Gradient Boosting"]);
    }
}
