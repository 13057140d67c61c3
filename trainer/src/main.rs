use std::env;

use anyhow::{Context, Result};
use log::info;

use salary_model::{SalaryTrainer, TrainerConfig};

fn main() -> Result<()> {
    env_logger::init();

    let config = match env::args().nth(1) {
        Some(path) => TrainerConfig::from_json_file(&path)
            .with_context(|| format!("failed to load the trainer config from {path}"))?,
        None => TrainerConfig::default(),
    };

    let trainer = SalaryTrainer::new(config)?;
    let dataset = trainer.config().dataset_path.display().to_string();
    info!("training on {dataset}");

    let report = trainer
        .run()
        .with_context(|| format!("training on {dataset} failed"))?;

    println!("{report}");

    let artifacts = &trainer.config().artifacts;
    println!("Saved regression model as {}", artifacts.regression.display());
    println!(
        "Saved classification model as {}",
        artifacts.classification.display()
    );

    Ok(())
}
