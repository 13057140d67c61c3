use std::fmt::{self, Display};

use log::debug;
use salary_model::{
    ClassificationPipeline, Record, RegressionPipeline, Result, persistence,
    persistence::ArtifactPaths,
};

/// Which trained pipeline answers a request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ModelChoice {
    #[default]
    Regression,
    Classification,
}

impl ModelChoice {
    pub const ALL: [ModelChoice; 2] = [ModelChoice::Regression, ModelChoice::Classification];

    pub fn label(self) -> &'static str {
        match self {
            ModelChoice::Regression => "Regression Model",
            ModelChoice::Classification => "Classification Model",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SalaryLevel {
    High,
    Low,
}

impl From<u8> for SalaryLevel {
    fn from(class: u8) -> Self {
        if class == 1 {
            SalaryLevel::High
        } else {
            SalaryLevel::Low
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Prediction {
    Salary(f64),
    Level(SalaryLevel),
}

impl Prediction {
    /// Whether the result is shown as good news.
    pub fn is_positive(&self) -> bool {
        !matches!(self, Prediction::Level(SalaryLevel::Low))
    }
}

impl Display for Prediction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Prediction::Salary(usd) => write!(f, "Predicted Salary: {}", format_usd(*usd)),
            Prediction::Level(SalaryLevel::High) => write!(f, "Salary Level: HIGH"),
            Prediction::Level(SalaryLevel::Low) => write!(f, "Salary Level: LOW"),
        }
    }
}

/// Formats a dollar amount rounded half to even to whole dollars, with thousands
/// separators.
pub fn format_usd(usd: f64) -> String {
    let rounded = usd.round_ties_even();
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let sign = if rounded < 0.0 { "-" } else { "" };
    format!("${sign}{grouped}")
}

/// Holds both trained pipelines for the lifetime of the predictor.
pub struct PredictionService {
    regression: RegressionPipeline,
    classification: ClassificationPipeline,
}

impl PredictionService {
    pub fn new(regression: RegressionPipeline, classification: ClassificationPipeline) -> Self {
        Self {
            regression,
            classification,
        }
    }

    /// Reads both artifacts from disk.
    pub fn load(paths: &ArtifactPaths) -> Result<Self> {
        let regression = persistence::load(&paths.regression)?;
        let classification = persistence::load(&paths.classification)?;
        Ok(Self::new(regression, classification))
    }

    /// Runs `record` through the pipeline picked by `choice`.
    pub fn predict(&self, choice: ModelChoice, record: &Record) -> Result<Prediction> {
        let prediction = match choice {
            ModelChoice::Regression => Prediction::Salary(self.regression.predict_one(record)?),
            ModelChoice::Classification => {
                Prediction::Level(self.classification.predict_one(record)?.into())
            }
        };

        debug!("{} predicted {prediction}", choice.label());
        Ok(prediction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usd_amounts_are_grouped_and_rounded() {
        assert_eq!(format_usd(123_456.7), "$123,457");
        assert_eq!(format_usd(1_000.0), "$1,000");
        assert_eq!(format_usd(999.4), "$999");
        assert_eq!(format_usd(2.5), "$2");
        assert_eq!(format_usd(3.5), "$4");
        assert_eq!(format_usd(123_456.5), "$123,456");
        assert_eq!(format_usd(0.0), "$0");
        assert_eq!(format_usd(12_345_678.0), "$12,345,678");
        assert_eq!(format_usd(-1_500.0), "$-1,500");
    }

    #[test]
    fn predictions_render_like_the_form_shows_them() {
        assert_eq!(
            Prediction::Salary(123_456.7).to_string(),
            "Predicted Salary: $123,457"
        );
        assert_eq!(
            Prediction::Level(SalaryLevel::from(1)).to_string(),
            "Salary Level: HIGH"
        );
        assert_eq!(
            Prediction::Level(SalaryLevel::from(0)).to_string(),
            "Salary Level: LOW"
        );
        assert!(!Prediction::Level(SalaryLevel::Low).is_positive());
        assert!(Prediction::Salary(1.0).is_positive());
    }

    #[test]
    fn model_labels() {
        assert_eq!(ModelChoice::default().label(), "Regression Model");
        assert_eq!(ModelChoice::Classification.label(), "Classification Model");
    }
}
