use ndarray::ArrayView2;

/// A fitted model that maps feature rows to predictions.
pub trait Estimator {
    type Output: Copy;

    /// The amount of features every input row must have.
    fn width(&self) -> usize;

    /// Predicts one output per row of `x`.
    ///
    /// Callers must make sure `x` has exactly `width()` columns.
    fn predict(&self, x: ArrayView2<f64>) -> Vec<Self::Output>;
}
