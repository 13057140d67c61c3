pub mod config;
pub mod data;
mod error;
pub mod metrics;
pub mod models;
pub mod optimization;
pub mod persistence;
pub mod pipeline;
pub mod preprocessing;
mod record;
pub mod training;

pub use config::TrainerConfig;
pub use data::SalaryDataset;
pub use error::{Result, SalaryErr};
pub use pipeline::{ClassificationPipeline, Pipeline, RegressionModel, RegressionPipeline};
pub use record::{Record, RecordDraft};
pub use training::{SalaryTrainer, TrainingReport};
