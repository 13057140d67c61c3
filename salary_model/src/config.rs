use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::{
    Result, SalaryErr,
    models::{BoostingParams, LogisticParams},
    persistence::ArtifactPaths,
};

/// Everything a training run can be tuned with. Every field has a default so a
/// config file only needs the values it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainerConfig {
    pub dataset_path: PathBuf,
    pub artifacts: ArtifactPaths,
    pub test_size: f64,
    pub seed: u64,
    pub boosting: BoostingParams,
    pub logistic: LogisticParams,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            dataset_path: PathBuf::from("global_ai_ml_data_salaries.csv"),
            artifacts: ArtifactPaths::default(),
            test_size: 0.2,
            seed: 42,
            boosting: BoostingParams::default(),
            logistic: LogisticParams::default(),
        }
    }
}

impl TrainerConfig {
    /// Reads and validates a JSON config file.
    ///
    /// # Errors
    /// `Io` or `Json` if the file can't be read or parsed, `InvalidConfig` if a value
    /// is out of range.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.test_size > 0.0 && self.test_size < 1.0) {
            return Err(SalaryErr::InvalidConfig(format!(
                "test_size must be in (0, 1), got {}",
                self.test_size
            )));
        }

        self.boosting.validate()?;
        self.logistic.validate()
    }
}
