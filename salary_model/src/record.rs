use serde::{Deserialize, Serialize};

use crate::{Result, SalaryErr};

/// One salary observation, either a training example or a prediction request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub work_year: i32,
    pub experience_level: String,
    pub employment_type: String,
    pub job_title: String,
    pub salary: f64,
    pub salary_currency: String,
    pub employee_residence: String,
    pub remote_ratio: i32,
    pub company_location: String,
    pub company_size: String,
}

/// The raw text of the ten user-facing fields, before any validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordDraft {
    pub work_year: String,
    pub experience_level: String,
    pub employment_type: String,
    pub job_title: String,
    pub salary: String,
    pub salary_currency: String,
    pub employee_residence: String,
    pub remote_ratio: String,
    pub company_location: String,
    pub company_size: String,
}

impl RecordDraft {
    /// Validates the draft and turns it into a typed `Record`.
    ///
    /// # Returns
    /// The parsed record, or `SalaryErr::InvalidField` naming the first field that
    /// doesn't parse. Numbers are never coerced: `"2024.5"` is not a valid year.
    pub fn parse(&self) -> Result<Record> {
        Ok(Record {
            work_year: parse_int("work_year", &self.work_year)?,
            experience_level: self.experience_level.clone(),
            employment_type: self.employment_type.clone(),
            job_title: self.job_title.clone(),
            salary: parse_float("salary", &self.salary)?,
            salary_currency: self.salary_currency.clone(),
            employee_residence: self.employee_residence.clone(),
            remote_ratio: parse_int("remote_ratio", &self.remote_ratio)?,
            company_location: self.company_location.clone(),
            company_size: self.company_size.clone(),
        })
    }
}

fn parse_int(field: &'static str, raw: &str) -> Result<i32> {
    raw.trim().parse().map_err(|_| SalaryErr::InvalidField {
        field,
        value: raw.to_string(),
        expected: "an integer",
    })
}

fn parse_float(field: &'static str, raw: &str) -> Result<f64> {
    let invalid = || SalaryErr::InvalidField {
        field,
        value: raw.to_string(),
        expected: "a finite number",
    };

    let value: f64 = raw.trim().parse().map_err(|_| invalid())?;
    if !value.is_finite() {
        return Err(invalid());
    }

    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> RecordDraft {
        RecordDraft {
            work_year: "2023".into(),
            experience_level: "SE".into(),
            employment_type: "FT".into(),
            job_title: "Data Scientist".into(),
            salary: "150000".into(),
            salary_currency: "USD".into(),
            employee_residence: "US".into(),
            remote_ratio: " 100 ".into(),
            company_location: "US".into(),
            company_size: "M".into(),
        }
    }

    #[test]
    fn a_valid_draft_parses() {
        let record = draft().parse().unwrap();

        assert_eq!(record.work_year, 2023);
        assert_eq!(record.salary, 150000.0);
        assert_eq!(record.remote_ratio, 100);
        assert_eq!(record.job_title, "Data Scientist");
    }

    #[test]
    fn a_non_numeric_work_year_is_rejected() {
        let mut d = draft();
        d.work_year = "twenty".into();

        let err = d.parse().unwrap_err();
        assert!(matches!(
            err,
            SalaryErr::InvalidField {
                field: "work_year",
                ..
            }
        ));
    }

    #[test]
    fn a_fractional_year_is_not_truncated() {
        let mut d = draft();
        d.work_year = "2023.7".into();
        assert!(d.parse().is_err());
    }

    #[test]
    fn empty_and_non_finite_salaries_are_rejected() {
        let mut d = draft();
        d.salary = "".into();
        assert!(d.parse().is_err());

        d.salary = "NaN".into();
        assert!(d.parse().is_err());

        d.salary = "inf".into();
        assert!(d.parse().is_err());
    }
}
