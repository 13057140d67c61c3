use std::fmt::{self, Display};

use log::info;
use ndarray::aview1;

use super::{Candidate, select_best};
use crate::{
    Result, SalaryErr,
    config::TrainerConfig,
    data::{SalaryDataset, median, salary_levels, take, train_test_split},
    metrics::{accuracy_score, mean_squared_error, r2_score},
    models::{Estimator, LogisticRegression},
    persistence,
    pipeline::{ClassificationPipeline, Pipeline, RegressionPipeline},
    preprocessing::TransformSpec,
};

/// The held-out scores of one regression candidate.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateScore {
    pub name: &'static str,
    pub r2: f64,
    pub rmse: f64,
}

/// A summary of a training run.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingReport {
    pub rows_loaded: usize,
    pub duplicates_removed: usize,
    pub median_salary_usd: f64,
    pub candidates: Vec<CandidateScore>,
    pub best_regression: &'static str,
    pub classification_accuracy: f64,
}

impl Display for TrainingReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "===================================")?;
        writeln!(
            f,
            "Rows loaded               : {} ({} duplicates removed)",
            self.rows_loaded, self.duplicates_removed
        )?;
        writeln!(f, "Median salary (USD)       : {:.2}", self.median_salary_usd)?;

        for c in &self.candidates {
            writeln!(f, "{:<26}: R2 {:.4}, RMSE {:.2}", c.name, c.r2, c.rmse)?;
        }

        writeln!(f, "Best Regression Model     : {}", self.best_regression)?;
        writeln!(
            f,
            "Classification Accuracy   : {:.4}",
            self.classification_accuracy
        )?;
        write!(f, "===================================")
    }
}

/// The outcome of `SalaryTrainer::train`, not yet persisted.
#[derive(Debug, Clone)]
pub struct TrainedModels {
    pub regression: RegressionPipeline,
    pub classification: ClassificationPipeline,
    pub report: TrainingReport,
}

/// Trains the salary regression and the salary level classification pipelines.
pub struct SalaryTrainer {
    config: TrainerConfig,
    spec: TransformSpec,
}

impl SalaryTrainer {
    /// Creates a new trainer with the default column layout.
    ///
    /// # Errors
    /// `InvalidConfig` if `config` has out of range values.
    pub fn new(config: TrainerConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            config,
            spec: TransformSpec::default(),
        })
    }

    pub fn config(&self) -> &TrainerConfig {
        &self.config
    }

    /// Loads the configured dataset, trains both pipelines and saves them to the
    /// configured artifact paths.
    pub fn run(&self) -> Result<TrainingReport> {
        let dataset = SalaryDataset::from_csv_path(&self.config.dataset_path)?;
        let trained = self.train(dataset)?;

        let artifacts = &self.config.artifacts;
        persistence::save(&trained.regression, &artifacts.regression)?;
        persistence::save(&trained.classification, &artifacts.classification)?;

        Ok(trained.report)
    }

    /// Deduplicates `dataset`, derives both targets and fits both pipelines.
    pub fn train(&self, mut dataset: SalaryDataset) -> Result<TrainedModels> {
        let TrainerConfig {
            test_size, seed, ..
        } = self.config;

        let rows_loaded = dataset.len();
        let duplicates_removed = dataset.dedup();
        info!(rows = rows_loaded, duplicates = duplicates_removed; "deduplicated the dataset");

        let threshold = median(dataset.salaries_usd()).ok_or(SalaryErr::EmptyDataset)?;
        let levels = salary_levels(dataset.salaries_usd(), threshold);
        info!("median salary in usd is {threshold}");

        let (regression, candidates) = self.select_regression(&dataset, test_size, seed)?;

        let (classification, classification_accuracy) =
            self.train_classification(&dataset, &levels, test_size, seed)?;

        let report = TrainingReport {
            rows_loaded,
            duplicates_removed,
            median_salary_usd: threshold,
            candidates,
            best_regression: regression.model().name(),
            classification_accuracy,
        };

        Ok(TrainedModels {
            regression,
            classification,
            report,
        })
    }

    fn select_regression(
        &self,
        dataset: &SalaryDataset,
        test_size: f64,
        seed: u64,
    ) -> Result<(RegressionPipeline, Vec<CandidateScore>)> {
        let split = train_test_split(dataset.len(), test_size, seed)?;

        let train = take(dataset.records(), &split.train);
        let test = take(dataset.records(), &split.test);
        let y_train = take(dataset.salaries_usd(), &split.train);
        let y_test = take(dataset.salaries_usd(), &split.test);

        let transform = self.spec.fit(&train)?;
        let x_train = transform.transform(&train)?;
        let x_test = transform.transform(&test)?;

        let mut scores = Vec::new();
        let mut fitted = Vec::new();

        for candidate in Candidate::all(self.config.boosting) {
            let model = candidate.fit(x_train.view(), aview1(&y_train), seed)?;
            let pred = model.predict(x_test.view());

            let r2 = r2_score(&y_test, &pred);
            let rmse = mean_squared_error(&y_test, &pred).sqrt();
            info!(r2 = r2, rmse = rmse; "scored {}", candidate.name());

            scores.push(CandidateScore {
                name: candidate.name(),
                r2,
                rmse,
            });
            fitted.push((r2, Pipeline::new(transform.clone(), model)));
        }

        let (r2, best) = select_best(fitted).ok_or(SalaryErr::EmptyDataset)?;
        info!(r2 = r2; "best regression model is {}", best.model().name());

        Ok((best, scores))
    }

    fn train_classification(
        &self,
        dataset: &SalaryDataset,
        levels: &[u8],
        test_size: f64,
        seed: u64,
    ) -> Result<(ClassificationPipeline, f64)> {
        let split = train_test_split(dataset.len(), test_size, seed)?;

        let train = take(dataset.records(), &split.train);
        let test = take(dataset.records(), &split.test);
        let y_train = take(levels, &split.train);
        let y_test = take(levels, &split.test);

        let transform = self.spec.fit(&train)?;
        let x_train = transform.transform(&train)?;
        let model = LogisticRegression::fit(x_train.view(), &y_train, &self.config.logistic)?;

        let pipeline = Pipeline::new(transform, model);
        let accuracy = accuracy_score(&y_test, &pipeline.predict(&test)?);
        info!(accuracy = accuracy; "trained the salary level classifier");

        Ok((pipeline, accuracy))
    }
}
