use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::{Result, SalaryErr};

/// Standardizes a single numeric column to zero mean and unit variance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    mean: f64,
    scale: f64,
}

impl StandardScaler {
    /// Learns the mean and the population standard deviation of `values`.
    ///
    /// A constant column keeps a scale of 1 so it maps to zeros instead of NaNs.
    pub fn fit(values: &[f64]) -> Self {
        let n = values.len().max(1) as f64;
        let mean = values.iter().sum::<f64>() / n;
        let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;

        let scale = if var > 0.0 { var.sqrt() } else { 1.0 };
        Self { mean, scale }
    }

    #[inline]
    pub fn transform(&self, value: f64) -> f64 {
        (value - self.mean) / self.scale
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }
}

/// Maps a fixed, ordered list of categories to their rank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrdinalEncoder {
    categories: Vec<String>,
}

impl OrdinalEncoder {
    pub fn new<I, S>(categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            categories: categories.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns the rank of `value` in the declared order.
    ///
    /// # Errors
    /// `UnknownCategory` if `value` isn't one of the declared categories.
    pub fn encode(&self, column: &'static str, value: &str) -> Result<f64> {
        self.categories
            .iter()
            .position(|c| c == value)
            .map(|rank| rank as f64)
            .ok_or_else(|| SalaryErr::UnknownCategory {
                column,
                value: value.to_string(),
            })
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }
}

/// Expands a categorical column into one indicator per category seen while fitting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OneHotEncoder {
    categories: Vec<String>,
}

impl OneHotEncoder {
    /// Learns the sorted set of distinct values.
    pub fn fit<'a, I>(values: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let unique: BTreeSet<&str> = values.into_iter().collect();
        Self {
            categories: unique.into_iter().map(str::to_string).collect(),
        }
    }

    /// The amount of indicator columns this encoder writes.
    pub fn width(&self) -> usize {
        self.categories.len()
    }

    /// Writes the indicator block for `value` into `out`.
    ///
    /// A value never seen while fitting leaves the whole block at zero.
    pub fn encode_into(&self, value: &str, out: &mut [f64]) {
        out.fill(0.0);

        if let Ok(i) = self.categories.binary_search_by(|c| c.as_str().cmp(value)) {
            out[i] = 1.0;
        }
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scaler_centers_and_scales() {
        let scaler = StandardScaler::fit(&[1.0, 2.0, 3.0, 4.0]);

        assert_eq!(scaler.mean(), 2.5);
        assert!((scaler.scale() - 1.25f64.sqrt()).abs() < 1e-12);
        assert_eq!(scaler.transform(2.5), 0.0);
    }

    #[test]
    fn a_constant_column_maps_to_zero() {
        let scaler = StandardScaler::fit(&[7.0, 7.0, 7.0]);
        assert_eq!(scaler.scale(), 1.0);
        assert_eq!(scaler.transform(7.0), 0.0);
    }

    #[test]
    fn ordinal_ranks_follow_the_declared_order() {
        let enc = OrdinalEncoder::new(["S", "M", "L"]);

        let ranks: Vec<_> = ["S", "M", "L"]
            .iter()
            .map(|v| enc.encode("company_size", v).unwrap())
            .collect();

        assert_eq!(ranks, [0.0, 1.0, 2.0]);
        assert!(enc.encode("company_size", "XL").is_err());
    }

    #[test]
    fn one_hot_categories_are_sorted_and_unique() {
        let enc = OneHotEncoder::fit(["US", "DE", "US", "AR"]);
        assert_eq!(enc.categories(), ["AR", "DE", "US"]);

        let mut out = [9.0; 3];
        enc.encode_into("DE", &mut out);
        assert_eq!(out, [0.0, 1.0, 0.0]);
    }

    #[test]
    fn an_unseen_category_yields_an_all_zero_block() {
        let enc = OneHotEncoder::fit(["US", "DE"]);

        let mut out = [1.0; 2];
        enc.encode_into("FR", &mut out);
        assert_eq!(out, [0.0, 0.0]);
    }
}
