use serde::{Deserialize, Serialize};

use crate::Record;

/// A numeric record field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumericColumn {
    Salary,
    RemoteRatio,
}

impl NumericColumn {
    pub fn name(self) -> &'static str {
        match self {
            NumericColumn::Salary => "salary",
            NumericColumn::RemoteRatio => "remote_ratio",
        }
    }

    pub fn get(self, record: &Record) -> f64 {
        match self {
            NumericColumn::Salary => record.salary,
            NumericColumn::RemoteRatio => f64::from(record.remote_ratio),
        }
    }
}

/// A categorical record field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoricalColumn {
    ExperienceLevel,
    EmploymentType,
    JobTitle,
    SalaryCurrency,
    EmployeeResidence,
    CompanyLocation,
    CompanySize,
}

impl CategoricalColumn {
    pub fn name(self) -> &'static str {
        match self {
            CategoricalColumn::ExperienceLevel => "experience_level",
            CategoricalColumn::EmploymentType => "employment_type",
            CategoricalColumn::JobTitle => "job_title",
            CategoricalColumn::SalaryCurrency => "salary_currency",
            CategoricalColumn::EmployeeResidence => "employee_residence",
            CategoricalColumn::CompanyLocation => "company_location",
            CategoricalColumn::CompanySize => "company_size",
        }
    }

    pub fn get(self, record: &Record) -> &str {
        match self {
            CategoricalColumn::ExperienceLevel => &record.experience_level,
            CategoricalColumn::EmploymentType => &record.employment_type,
            CategoricalColumn::JobTitle => &record.job_title,
            CategoricalColumn::SalaryCurrency => &record.salary_currency,
            CategoricalColumn::EmployeeResidence => &record.employee_residence,
            CategoricalColumn::CompanyLocation => &record.company_location,
            CategoricalColumn::CompanySize => &record.company_size,
        }
    }
}
