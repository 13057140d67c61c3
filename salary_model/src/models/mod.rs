mod activation;
mod estimator;
mod gradient_boosting;
mod linalg;
mod linear;
mod logistic;
mod loss;
mod tree;

pub use activation::Sigmoid;
pub use estimator::Estimator;
pub use gradient_boosting::{BoostingParams, GradientBoostingRegressor};
pub use linear::LinearRegression;
pub use logistic::{LogisticParams, LogisticRegression};
pub use loss::{LogLoss, LossFn, Mse};
pub use tree::RegressionTree;

use ndarray::ArrayView2;

use crate::{Result, SalaryErr};

/// Makes sure there's at least one sample and one target per row of `x`.
fn check_samples(x: ArrayView2<f64>, targets: usize) -> Result<()> {
    if x.nrows() != targets {
        return Err(SalaryErr::SizeMismatch {
            what: "training targets",
            got: targets,
            expected: x.nrows(),
        });
    }

    if targets == 0 {
        return Err(SalaryErr::EmptyDataset);
    }

    Ok(())
}
