pub mod dataset;
pub mod split;
pub mod targets;

pub use dataset::{REQUIRED_COLUMNS, SalaryDataset};
pub use split::{Split, take, train_test_split};
pub use targets::{median, salary_levels};
