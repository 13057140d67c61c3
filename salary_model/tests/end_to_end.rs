use std::{fmt::Write as _, fs, path::Path};

use ndarray::aview1;
use salary_model::{
    ClassificationPipeline, Pipeline, Record, RecordDraft, RegressionModel, RegressionPipeline,
    SalaryDataset, SalaryErr, SalaryTrainer, TrainerConfig,
    models::{BoostingParams, Estimator, GradientBoostingRegressor},
    persistence::{self, ArtifactPaths},
    preprocessing::TransformSpec,
};

const HEADER: &str = "work_year,experience_level,employment_type,job_title,salary,salary_currency,salary_in_usd,employee_residence,remote_ratio,company_location,company_size";

const LEVELS: [&str; 4] = ["EN", "MI", "SE", "EX"];
const EMPLOYMENT: [&str; 4] = ["FT", "PT", "CT", "FL"];
const SIZES: [&str; 3] = ["S", "M", "L"];
const TITLES: [&str; 3] = ["Data Scientist", "ML Engineer", "Data Analyst"];
const REMOTE: [i32; 3] = [0, 50, 100];

/// Writes a dataset whose usd salary is an exact linear function of the numeric
/// features, plus one duplicated row.
fn write_linear_dataset(path: &Path, rows: usize) {
    let mut csv = String::from(HEADER);
    csv.push('\n');

    for i in 0..rows {
        let salary = 40_000.0 + 1_500.0 * i as f64;
        let remote = REMOTE[(i / 3) % 3];
        let usd = 2.0 * salary + 300.0 * f64::from(remote) + 5_000.0;

        writeln!(
            csv,
            "2023,{},{},\"{}\",{salary},USD,{usd},US,{remote},US,{}",
            LEVELS[i % 4],
            EMPLOYMENT[i % 4],
            TITLES[i % 3],
            SIZES[i % 3],
        )
        .unwrap();
    }

    let first = csv.lines().nth(1).unwrap().to_string();
    csv.push_str(&first);
    csv.push('\n');

    fs::write(path, csv).unwrap();
}

fn config_in(dir: &Path) -> TrainerConfig {
    TrainerConfig {
        dataset_path: dir.join("salaries.csv"),
        artifacts: ArtifactPaths {
            regression: dir.join("best_reg_model.json"),
            classification: dir.join("best_clf_model.json"),
        },
        boosting: BoostingParams {
            n_estimators: 40,
            ..Default::default()
        },
        ..Default::default()
    }
}

fn request(title: &str, size: &str) -> Record {
    RecordDraft {
        work_year: "2024".into(),
        experience_level: "SE".into(),
        employment_type: "FT".into(),
        job_title: title.into(),
        salary: "75000".into(),
        salary_currency: "USD".into(),
        employee_residence: "US".into(),
        remote_ratio: "50".into(),
        company_location: "US".into(),
        company_size: size.into(),
    }
    .parse()
    .unwrap()
}

#[test]
fn train_persist_load_and_predict() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());
    write_linear_dataset(&config.dataset_path, 60);

    let report = SalaryTrainer::new(config.clone()).unwrap().run().unwrap();

    assert_eq!(report.rows_loaded, 61);
    assert_eq!(report.duplicates_removed, 1);
    assert_eq!(report.candidates.len(), 2);
    assert_eq!(report.best_regression, "Linear Regression");
    assert!(report.candidates[0].r2 > 0.999);
    assert!((0.0..=1.0).contains(&report.classification_accuracy));

    let regression: RegressionPipeline = persistence::load(&config.artifacts.regression).unwrap();
    let classification: ClassificationPipeline =
        persistence::load(&config.artifacts.classification).unwrap();

    let probe = request("Data Scientist", "M");
    let usd = regression.predict_one(&probe).unwrap();
    assert!(usd.is_finite() && usd > 0.0);
    // 2 * 75000 + 300 * 50 + 5000
    assert!((usd - 170_000.0).abs() < 1.0);

    let level = classification.predict_one(&probe).unwrap();
    assert!(level == 0 || level == 1);
}

#[test]
fn a_reloaded_pipeline_predicts_like_the_trained_one() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());
    write_linear_dataset(&config.dataset_path, 45);

    let trainer = SalaryTrainer::new(config.clone()).unwrap();
    let dataset = SalaryDataset::from_csv_path(&config.dataset_path).unwrap();
    let trained = trainer.train(dataset).unwrap();

    persistence::save(&trained.regression, &config.artifacts.regression).unwrap();
    persistence::save(&trained.classification, &config.artifacts.classification).unwrap();

    let regression: RegressionPipeline = persistence::load(&config.artifacts.regression).unwrap();
    let classification: ClassificationPipeline =
        persistence::load(&config.artifacts.classification).unwrap();

    assert_eq!(regression, trained.regression);
    assert_eq!(classification, trained.classification);

    let record = request("ML Engineer", "L");
    assert_eq!(
        regression.predict_one(&record).unwrap(),
        trained.regression.predict_one(&record).unwrap()
    );
    assert_eq!(regression.model().width(), regression.transform().width());
}

#[test]
fn a_reloaded_boosting_pipeline_keeps_every_threshold() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());
    write_linear_dataset(&config.dataset_path, 45);

    let dataset = SalaryDataset::from_csv_path(&config.dataset_path).unwrap();
    let transform = TransformSpec::default().fit(dataset.records()).unwrap();
    let x = transform.transform(dataset.records()).unwrap();
    let model = GradientBoostingRegressor::fit(
        x.view(),
        aview1(dataset.salaries_usd()),
        &config.boosting,
        config.seed,
    )
    .unwrap();

    let pipeline = Pipeline::new(transform, RegressionModel::GradientBoosting(model));
    persistence::save(&pipeline, &config.artifacts.regression).unwrap();
    let reloaded: RegressionPipeline = persistence::load(&config.artifacts.regression).unwrap();

    assert_eq!(reloaded, pipeline);
    assert_eq!(
        reloaded.predict(dataset.records()).unwrap(),
        pipeline.predict(dataset.records()).unwrap()
    );
}

#[test]
fn unseen_titles_predict_and_unknown_sizes_fail() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());
    write_linear_dataset(&config.dataset_path, 45);

    let trainer = SalaryTrainer::new(config.clone()).unwrap();
    let dataset = SalaryDataset::from_csv_path(&config.dataset_path).unwrap();
    let trained = trainer.train(dataset).unwrap();

    let unseen = request("Chief Vibes Officer", "S");
    assert!(trained.regression.predict_one(&unseen).unwrap().is_finite());
    assert!(trained.classification.predict_one(&unseen).is_ok());

    let err = trained
        .classification
        .predict_one(&request("Data Analyst", "XL"))
        .unwrap_err();
    assert!(matches!(
        err,
        SalaryErr::UnknownCategory {
            column: "company_size",
            ..
        }
    ));
}

#[test]
fn a_missing_dataset_fails_the_run() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());

    let err = SalaryTrainer::new(config).unwrap().run().unwrap_err();
    assert!(matches!(err, SalaryErr::Io(_)));
}
