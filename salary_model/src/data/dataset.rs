use std::{collections::HashSet, fs::File, io::Read, path::Path};

use log::{debug, info};
use serde::Deserialize;

use crate::{Record, Result, SalaryErr};

/// The columns that every training CSV must carry.
pub const REQUIRED_COLUMNS: [&str; 11] = [
    "work_year",
    "experience_level",
    "employment_type",
    "job_title",
    "salary",
    "salary_currency",
    "employee_residence",
    "remote_ratio",
    "company_location",
    "company_size",
    "salary_in_usd",
];

/// A single CSV row, including the ground truth that requests never carry.
#[derive(Debug, Deserialize)]
struct Row {
    work_year: i32,
    experience_level: String,
    employment_type: String,
    job_title: String,
    salary: f64,
    salary_currency: String,
    employee_residence: String,
    remote_ratio: i32,
    company_location: String,
    company_size: String,
    salary_in_usd: f64,
}

impl From<Row> for (Record, f64) {
    fn from(row: Row) -> Self {
        let record = Record {
            work_year: row.work_year,
            experience_level: row.experience_level,
            employment_type: row.employment_type,
            job_title: row.job_title,
            salary: row.salary,
            salary_currency: row.salary_currency,
            employee_residence: row.employee_residence,
            remote_ratio: row.remote_ratio,
            company_location: row.company_location,
            company_size: row.company_size,
        };

        (record, row.salary_in_usd)
    }
}

/// An in-memory salary dataset: records plus their parallel USD salaries.
#[derive(Debug, Clone)]
pub struct SalaryDataset {
    records: Vec<Record>,
    salaries_usd: Vec<f64>,
}

impl SalaryDataset {
    /// Creates a new dataset from owned buffers.
    ///
    /// # Errors
    /// `SizeMismatch` if both buffers differ in length, `EmptyDataset` if they're empty.
    pub fn new(records: Vec<Record>, salaries_usd: Vec<f64>) -> Result<Self> {
        if records.len() != salaries_usd.len() {
            return Err(SalaryErr::SizeMismatch {
                what: "salaries_usd",
                got: salaries_usd.len(),
                expected: records.len(),
            });
        }

        if records.is_empty() {
            return Err(SalaryErr::EmptyDataset);
        }

        Ok(Self {
            records,
            salaries_usd,
        })
    }

    /// Reads the dataset from a CSV file on disk.
    pub fn from_csv_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("reading dataset from {}", path.display());
        let file = File::open(path)?;
        Self::from_csv_reader(file)
    }

    /// Reads the dataset from any CSV source with a header row.
    ///
    /// # Errors
    /// `MissingColumn` when a required header is absent, `Csv` when a row doesn't
    /// deserialize and `EmptyDataset` when there are no rows at all.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self> {
        let mut reader = csv::Reader::from_reader(reader);

        let headers = reader.headers()?.clone();
        if let Some(column) = REQUIRED_COLUMNS
            .into_iter()
            .find(|&column| !headers.iter().any(|h| h == column))
        {
            return Err(SalaryErr::MissingColumn { column });
        }

        let mut records = Vec::new();
        let mut salaries_usd = Vec::new();

        for row in reader.deserialize::<Row>() {
            let (record, salary_usd) = row?.into();
            records.push(record);
            salaries_usd.push(salary_usd);
        }

        debug!("read {} rows", records.len());
        Self::new(records, salaries_usd)
    }

    /// Removes exact duplicate rows, keeping the first occurrence of each.
    ///
    /// # Returns
    /// The amount of rows removed.
    pub fn dedup(&mut self) -> usize {
        let before = self.records.len();
        let keep = self.first_occurrences();

        let mut flags = keep.iter().copied();
        self.records.retain(|_| flags.next().unwrap_or(true));
        let mut flags = keep.iter().copied();
        self.salaries_usd.retain(|_| flags.next().unwrap_or(true));

        before - self.records.len()
    }

    /// Flags every row that is the first of its kind.
    fn first_occurrences(&self) -> Vec<bool> {
        let mut seen = HashSet::with_capacity(self.records.len());

        self.records
            .iter()
            .zip(&self.salaries_usd)
            .map(|(record, &usd)| seen.insert(RowKey::new(record, usd)))
            .collect()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[inline]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    #[inline]
    pub fn salaries_usd(&self) -> &[f64] {
        &self.salaries_usd
    }
}

/// Hashable identity of a row, floats compared bitwise.
#[derive(Hash, PartialEq, Eq)]
struct RowKey<'a> {
    work_year: i32,
    remote_ratio: i32,
    salary: u64,
    salary_usd: u64,
    text: [&'a str; 7],
}

impl<'a> RowKey<'a> {
    fn new(r: &'a Record, salary_usd: f64) -> Self {
        Self {
            work_year: r.work_year,
            remote_ratio: r.remote_ratio,
            salary: r.salary.to_bits(),
            salary_usd: salary_usd.to_bits(),
            text: [
                &r.experience_level,
                &r.employment_type,
                &r.job_title,
                &r.salary_currency,
                &r.employee_residence,
                &r.company_location,
                &r.company_size,
            ],
        }
    }
}
