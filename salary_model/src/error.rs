use std::{
    error::Error,
    fmt::{self, Display},
    io,
};

/// The result type used in the entire salary model module.
pub type Result<T> = std::result::Result<T, SalaryErr>;

/// The salary model module's error type.
#[derive(Debug)]
pub enum SalaryErr {
    Io(io::Error),
    Csv(csv::Error),
    Json(serde_json::Error),
    MissingColumn {
        column: &'static str,
    },
    InvalidField {
        field: &'static str,
        value: String,
        expected: &'static str,
    },
    UnknownCategory {
        column: &'static str,
        value: String,
    },
    EmptyDataset,
    SingleClass {
        class: u8,
    },
    SizeMismatch {
        what: &'static str,
        got: usize,
        expected: usize,
    },
    InvalidSplit {
        samples: usize,
        test_size: f64,
    },
    InvalidConfig(String),
    Singular,
}

impl Display for SalaryErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SalaryErr::Io(e) => write!(f, "io error: {e}"),
            SalaryErr::Csv(e) => write!(f, "csv error: {e}"),
            SalaryErr::Json(e) => write!(f, "json error: {e}"),
            SalaryErr::MissingColumn { column } => {
                write!(f, "the dataset is missing the required column {column}")
            }
            SalaryErr::InvalidField {
                field,
                value,
                expected,
            } => write!(f, "invalid value {value:?} for {field}, expected {expected}"),
            SalaryErr::UnknownCategory { column, value } => {
                write!(f, "unknown category {value:?} for {column}")
            }
            SalaryErr::EmptyDataset => write!(f, "the dataset has no rows"),
            SalaryErr::SingleClass { class } => write!(
                f,
                "the classification target only contains the class {class}, at least 2 are needed"
            ),
            SalaryErr::SizeMismatch {
                what,
                got,
                expected,
            } => write!(
                f,
                "There's a size mismatch in {what}, got {got} and expected {expected}"
            ),
            SalaryErr::InvalidSplit { samples, test_size } => write!(
                f,
                "cannot split {samples} samples with a test size of {test_size}, both sides must be non-empty"
            ),
            SalaryErr::InvalidConfig(msg) => write!(f, "invalid config: {msg}"),
            SalaryErr::Singular => {
                write!(f, "the normal equations could not be factorized")
            }
        }
    }
}

impl Error for SalaryErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            SalaryErr::Io(e) => Some(e),
            SalaryErr::Csv(e) => Some(e),
            SalaryErr::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for SalaryErr {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<csv::Error> for SalaryErr {
    fn from(value: csv::Error) -> Self {
        Self::Csv(value)
    }
}

impl From<serde_json::Error> for SalaryErr {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}
