use log::debug;
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

use super::{
    column::{CategoricalColumn, NumericColumn},
    encoders::{OneHotEncoder, OrdinalEncoder, StandardScaler},
};
use crate::{Record, Result, SalaryErr};

/// The unfitted column layout of the feature transform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformSpec {
    pub numeric: Vec<NumericColumn>,
    pub ordinal: Vec<(CategoricalColumn, Vec<&'static str>)>,
    pub one_hot: Vec<CategoricalColumn>,
}

impl Default for TransformSpec {
    fn default() -> Self {
        use CategoricalColumn::*;

        Self {
            numeric: vec![NumericColumn::Salary, NumericColumn::RemoteRatio],
            ordinal: vec![
                (CompanySize, vec!["S", "M", "L"]),
                (EmploymentType, vec!["CT", "FT", "PT", "FL"]),
            ],
            one_hot: vec![
                JobTitle,
                SalaryCurrency,
                EmployeeResidence,
                CompanyLocation,
                ExperienceLevel,
            ],
        }
    }
}

impl TransformSpec {
    /// Learns the transform state from the training records.
    ///
    /// # Arguments
    /// * `records` - The training split, never the full dataset.
    ///
    /// # Returns
    /// The fitted transform or `EmptyDataset` if there's nothing to fit on.
    pub fn fit(&self, records: &[Record]) -> Result<FittedTransform> {
        if records.is_empty() {
            return Err(SalaryErr::EmptyDataset);
        }

        let scalers = self
            .numeric
            .iter()
            .map(|&column| {
                let values: Vec<f64> = records.iter().map(|r| column.get(r)).collect();
                ScaledColumn {
                    column,
                    scaler: StandardScaler::fit(&values),
                }
            })
            .collect();

        let ordinals = self
            .ordinal
            .iter()
            .map(|(column, order)| RankedColumn {
                column: *column,
                encoder: OrdinalEncoder::new(order.iter().copied()),
            })
            .collect();

        let indicators: Vec<_> = self
            .one_hot
            .iter()
            .map(|&column| IndicatorColumn {
                column,
                encoder: OneHotEncoder::fit(records.iter().map(|r| column.get(r))),
            })
            .collect();

        let fitted = FittedTransform {
            scalers,
            ordinals,
            indicators,
        };

        debug!(
            samples = records.len(),
            width = fitted.width();
            "fitted the feature transform"
        );

        Ok(fitted)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct ScaledColumn {
    column: NumericColumn,
    scaler: StandardScaler,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct RankedColumn {
    column: CategoricalColumn,
    encoder: OrdinalEncoder,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct IndicatorColumn {
    column: CategoricalColumn,
    encoder: OneHotEncoder,
}

/// A transform fitted on training data, applied unchanged to every later record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FittedTransform {
    scalers: Vec<ScaledColumn>,
    ordinals: Vec<RankedColumn>,
    indicators: Vec<IndicatorColumn>,
}

impl FittedTransform {
    /// The length of every feature vector this transform produces.
    pub fn width(&self) -> usize {
        self.scalers.len()
            + self.ordinals.len()
            + self
                .indicators
                .iter()
                .map(|c| c.encoder.width())
                .sum::<usize>()
    }

    /// One name per output column, in output order.
    pub fn feature_names(&self) -> Vec<String> {
        let mut names = Vec::with_capacity(self.width());

        names.extend(self.scalers.iter().map(|c| c.column.name().to_string()));
        names.extend(self.ordinals.iter().map(|c| c.column.name().to_string()));

        for IndicatorColumn { column, encoder } in &self.indicators {
            names.extend(
                encoder
                    .categories()
                    .iter()
                    .map(|cat| format!("{}={cat}", column.name())),
            );
        }

        names
    }

    /// Writes the feature vector of `record` into `out`.
    ///
    /// # Errors
    /// `SizeMismatch` if `out` is not `width()` long, `UnknownCategory` if an ordinal
    /// field has a value outside its declared order.
    pub fn transform_into(&self, record: &Record, out: &mut [f64]) -> Result<()> {
        let expected = self.width();
        if out.len() != expected {
            return Err(SalaryErr::SizeMismatch {
                what: "feature vector",
                got: out.len(),
                expected,
            });
        }

        let mut at = 0;

        for ScaledColumn { column, scaler } in &self.scalers {
            out[at] = scaler.transform(column.get(record));
            at += 1;
        }

        for RankedColumn { column, encoder } in &self.ordinals {
            out[at] = encoder.encode(column.name(), column.get(record))?;
            at += 1;
        }

        for IndicatorColumn { column, encoder } in &self.indicators {
            let end = at + encoder.width();
            encoder.encode_into(column.get(record), &mut out[at..end]);
            at = end;
        }

        Ok(())
    }

    /// Transforms a single record.
    pub fn transform_one(&self, record: &Record) -> Result<Array1<f64>> {
        let mut row = Array1::zeros(self.width());
        // a freshly allocated 1-d array is always contiguous
        let out = row.as_slice_mut().ok_or(SalaryErr::SizeMismatch {
            what: "feature vector",
            got: 0,
            expected: self.width(),
        })?;

        self.transform_into(record, out)?;
        Ok(row)
    }

    /// Transforms every record into one row of the returned matrix.
    pub fn transform(&self, records: &[Record]) -> Result<Array2<f64>> {
        let mut x = Array2::zeros((records.len(), self.width()));

        for (record, mut row) in records.iter().zip(x.rows_mut()) {
            let out = row.as_slice_mut().ok_or(SalaryErr::SizeMismatch {
                what: "feature matrix row",
                got: 0,
                expected: self.width(),
            })?;

            self.transform_into(record, out)?;
        }

        Ok(x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(title: &str, size: &str, employment: &str, salary: f64, remote: i32) -> Record {
        Record {
            work_year: 2023,
            experience_level: "SE".into(),
            employment_type: employment.into(),
            job_title: title.into(),
            salary,
            salary_currency: "USD".into(),
            employee_residence: "US".into(),
            remote_ratio: remote,
            company_location: "US".into(),
            company_size: size.into(),
        }
    }

    fn training() -> Vec<Record> {
        vec![
            record("Data Scientist", "S", "FT", 100.0, 0),
            record("Data Engineer", "M", "CT", 200.0, 50),
            record("Data Scientist", "L", "PT", 300.0, 100),
        ]
    }

    #[test]
    fn output_layout_follows_the_column_order() {
        let fitted = TransformSpec::default().fit(&training()).unwrap();

        // 2 numeric + 2 ordinal + 2 titles + 1 currency + 1 residence + 1 location + 1 level
        assert_eq!(fitted.width(), 10);
        assert_eq!(
            fitted.feature_names(),
            [
                "salary",
                "remote_ratio",
                "company_size",
                "employment_type",
                "job_title=Data Engineer",
                "job_title=Data Scientist",
                "salary_currency=USD",
                "employee_residence=US",
                "company_location=US",
                "experience_level=SE",
            ]
        );
    }

    #[test]
    fn ordinal_ranks_are_monotonic_in_the_declared_order() {
        let fitted = TransformSpec::default().fit(&training()).unwrap();

        let rank = |size: &str, employment: &str, at: usize| {
            let row = fitted.transform_one(&record("Data Scientist", size, employment, 1.0, 0));
            row.unwrap()[at]
        };

        let ranks: Vec<f64> = ["S", "M", "L"].iter().map(|&s| rank(s, "FT", 2)).collect();
        assert_eq!(ranks, [0.0, 1.0, 2.0]);

        let ranks: Vec<f64> = ["CT", "FT", "PT", "FL"]
            .iter()
            .map(|&e| rank("S", e, 3))
            .collect();
        assert_eq!(ranks, [0.0, 1.0, 2.0, 3.0]);
    }

    #[test]
    fn numeric_columns_are_standardized_with_training_statistics() {
        let fitted = TransformSpec::default().fit(&training()).unwrap();
        let x = fitted.transform(&training()).unwrap();

        let salary = x.column(0);
        assert!(salary.sum().abs() < 1e-12);
        assert!((salary.mapv(|v| v * v).mean().unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn applying_twice_gives_the_same_vector() {
        let fitted = TransformSpec::default().fit(&training()).unwrap();
        let probe = record("Data Engineer", "M", "FL", 150.0, 50);

        assert_eq!(
            fitted.transform_one(&probe).unwrap(),
            fitted.transform_one(&probe).unwrap()
        );
    }

    #[test]
    fn an_unseen_title_maps_to_an_all_zero_block() {
        let fitted = TransformSpec::default().fit(&training()).unwrap();
        let row = fitted
            .transform_one(&record("Prompt Whisperer", "M", "FT", 150.0, 50))
            .unwrap();

        assert_eq!(row[4], 0.0);
        assert_eq!(row[5], 0.0);
    }

    #[test]
    fn an_unknown_ordinal_value_is_an_error() {
        let fitted = TransformSpec::default().fit(&training()).unwrap();
        let err = fitted
            .transform_one(&record("Data Scientist", "XL", "FT", 1.0, 0))
            .unwrap_err();

        assert!(matches!(
            err,
            SalaryErr::UnknownCategory {
                column: "company_size",
                ..
            }
        ));
    }

    #[test]
    fn a_constant_numeric_column_does_not_produce_nan() {
        let records = vec![
            record("A", "S", "FT", 5.0, 0),
            record("B", "M", "FT", 5.0, 0),
        ];
        let x = TransformSpec::default()
            .fit(&records)
            .unwrap()
            .transform(&records)
            .unwrap();

        assert!(x.iter().all(|v| v.is_finite()));
        assert_eq!(x[(0, 0)], 0.0);
    }

    #[test]
    fn fitting_nothing_is_an_error() {
        assert!(matches!(
            TransformSpec::default().fit(&[]),
            Err(SalaryErr::EmptyDataset)
        ));
    }
}
