use std::env;

use anyhow::{Context, Result};
use log::info;
use salary_model::{TrainerConfig, persistence::ArtifactPaths};

mod app;
mod service;
mod state;
mod ui;

use service::PredictionService;

fn main() -> Result<()> {
    env_logger::init();

    let artifacts = match env::args().nth(1) {
        Some(path) => {
            TrainerConfig::from_json_file(&path)
                .with_context(|| format!("failed to load the config from {path}"))?
                .artifacts
        }
        None => ArtifactPaths::default(),
    };

    let service = PredictionService::load(&artifacts).with_context(|| {
        format!(
            "failed to load the models from {} and {}",
            artifacts.regression.display(),
            artifacts.classification.display()
        )
    })?;
    info!("models loaded");

    app::run::run(&service)
}
