use crossterm::event::KeyCode;
use log::warn;
use salary_model::{Record, RecordDraft, Result};

use crate::service::{ModelChoice, Prediction, PredictionService};

pub const EXPERIENCE_LEVELS: &[&str] = &["EN", "MI", "SE", "EX"];
pub const EMPLOYMENT_TYPES: &[&str] = &["FT", "PT", "CT", "FL"];
pub const COMPANY_SIZES: &[&str] = &["S", "M", "L"];

/// Every focusable row of the form, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Model,
    WorkYear,
    ExperienceLevel,
    EmploymentType,
    JobTitle,
    Salary,
    SalaryCurrency,
    EmployeeResidence,
    RemoteRatio,
    CompanyLocation,
    CompanySize,
    Predict,
}

impl Field {
    pub const ALL: [Field; 12] = [
        Field::Model,
        Field::WorkYear,
        Field::ExperienceLevel,
        Field::EmploymentType,
        Field::JobTitle,
        Field::Salary,
        Field::SalaryCurrency,
        Field::EmployeeResidence,
        Field::RemoteRatio,
        Field::CompanyLocation,
        Field::CompanySize,
        Field::Predict,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Field::Model => "Select Model",
            Field::WorkYear => "Work Year",
            Field::ExperienceLevel => "Experience Level",
            Field::EmploymentType => "Employment Type",
            Field::JobTitle => "Job Title",
            Field::Salary => "Salary",
            Field::SalaryCurrency => "Salary Currency",
            Field::EmployeeResidence => "Employee Residence",
            Field::RemoteRatio => "Remote Ratio",
            Field::CompanyLocation => "Company Location",
            Field::CompanySize => "Company Size",
            Field::Predict => "Predict",
        }
    }
}

/// A fixed list of options with one of them selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dropdown {
    options: &'static [&'static str],
    selected: usize,
}

impl Dropdown {
    fn new(options: &'static [&'static str]) -> Self {
        Self {
            options,
            selected: 0,
        }
    }

    pub fn value(&self) -> &'static str {
        self.options.get(self.selected).copied().unwrap_or_default()
    }

    fn next(&mut self) {
        self.selected = (self.selected + 1) % self.options.len().max(1);
    }

    fn prev(&mut self) {
        let n = self.options.len().max(1);
        self.selected = (self.selected + n - 1) % n;
    }
}

pub enum FormAction {
    None,
    Quit,
    Predict,
}

/// Everything the prediction form shows and edits.
pub struct FormState {
    focus: usize,
    pub model: ModelChoice,
    pub experience_level: Dropdown,
    pub employment_type: Dropdown,
    pub company_size: Dropdown,
    pub work_year: String,
    pub job_title: String,
    pub salary: String,
    pub salary_currency: String,
    pub employee_residence: String,
    pub remote_ratio: String,
    pub company_location: String,
    pub result: Option<Prediction>,
    pub error: Option<String>,
}

impl FormState {
    pub fn new() -> Self {
        Self {
            focus: 0,
            model: ModelChoice::default(),
            experience_level: Dropdown::new(EXPERIENCE_LEVELS),
            employment_type: Dropdown::new(EMPLOYMENT_TYPES),
            company_size: Dropdown::new(COMPANY_SIZES),
            work_year: String::new(),
            job_title: String::new(),
            salary: String::new(),
            salary_currency: String::new(),
            employee_residence: String::new(),
            remote_ratio: String::new(),
            company_location: String::new(),
            result: None,
            error: None,
        }
    }

    pub fn focused(&self) -> Field {
        Field::ALL[self.focus]
    }

    /// The current value of `field` as shown on screen.
    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Model => self.model.label(),
            Field::ExperienceLevel => self.experience_level.value(),
            Field::EmploymentType => self.employment_type.value(),
            Field::CompanySize => self.company_size.value(),
            Field::Predict => "",
            text => self.text(text).map(|s| s.as_str()).unwrap_or_default(),
        }
    }

    fn text(&self, field: Field) -> Option<&String> {
        match field {
            Field::WorkYear => Some(&self.work_year),
            Field::JobTitle => Some(&self.job_title),
            Field::Salary => Some(&self.salary),
            Field::SalaryCurrency => Some(&self.salary_currency),
            Field::EmployeeResidence => Some(&self.employee_residence),
            Field::RemoteRatio => Some(&self.remote_ratio),
            Field::CompanyLocation => Some(&self.company_location),
            _ => None,
        }
    }

    fn text_mut(&mut self, field: Field) -> Option<&mut String> {
        match field {
            Field::WorkYear => Some(&mut self.work_year),
            Field::JobTitle => Some(&mut self.job_title),
            Field::Salary => Some(&mut self.salary),
            Field::SalaryCurrency => Some(&mut self.salary_currency),
            Field::EmployeeResidence => Some(&mut self.employee_residence),
            Field::RemoteRatio => Some(&mut self.remote_ratio),
            Field::CompanyLocation => Some(&mut self.company_location),
            _ => None,
        }
    }

    pub fn is_dropdown(field: Field) -> bool {
        matches!(
            field,
            Field::Model | Field::ExperienceLevel | Field::EmploymentType | Field::CompanySize
        )
    }

    fn cycle(&mut self, field: Field, forward: bool) {
        let step = |d: &mut Dropdown| if forward { d.next() } else { d.prev() };

        match field {
            Field::Model => {
                let at = ModelChoice::ALL
                    .iter()
                    .position(|&m| m == self.model)
                    .unwrap_or(0);
                let n = ModelChoice::ALL.len();
                let next = if forward { at + 1 } else { at + n - 1 };
                self.model = ModelChoice::ALL[next % n];
            }
            Field::ExperienceLevel => step(&mut self.experience_level),
            Field::EmploymentType => step(&mut self.employment_type),
            Field::CompanySize => step(&mut self.company_size),
            _ => {}
        }
    }

    pub fn handle_key(&mut self, key: KeyCode) -> FormAction {
        if self.error.take().is_some() {
            return FormAction::None;
        }

        let n = Field::ALL.len();
        let field = self.focused();

        match key {
            KeyCode::Esc => return FormAction::Quit,
            KeyCode::Enter => return FormAction::Predict,
            KeyCode::Down | KeyCode::Tab => self.focus = (self.focus + 1) % n,
            KeyCode::Up | KeyCode::BackTab => self.focus = (self.focus + n - 1) % n,
            KeyCode::Right => self.cycle(field, true),
            KeyCode::Left => self.cycle(field, false),
            KeyCode::Backspace => {
                if let Some(text) = self.text_mut(field) {
                    text.pop();
                }
            }
            KeyCode::Char(c) => {
                if let Some(text) = self.text_mut(field) {
                    text.push(c);
                }
            }
            _ => {}
        }

        FormAction::None
    }

    /// The ten record fields as typed.
    pub fn draft(&self) -> RecordDraft {
        RecordDraft {
            work_year: self.work_year.clone(),
            experience_level: self.experience_level.value().to_string(),
            employment_type: self.employment_type.value().to_string(),
            job_title: self.job_title.clone(),
            salary: self.salary.clone(),
            salary_currency: self.salary_currency.clone(),
            employee_residence: self.employee_residence.clone(),
            remote_ratio: self.remote_ratio.clone(),
            company_location: self.company_location.clone(),
            company_size: self.company_size.value().to_string(),
        }
    }

    /// Validates the form and asks `service` for a prediction, keeping either the
    /// result or the error to show.
    pub fn submit(&mut self, service: &PredictionService) {
        let outcome: Result<Prediction> = self
            .draft()
            .parse()
            .and_then(|record: Record| service.predict(self.model, &record));

        match outcome {
            Ok(prediction) => {
                self.result = Some(prediction);
                self.error = None;
            }
            Err(e) => {
                warn!("prediction failed: {e}");
                self.error = Some(e.to_string());
            }
        }
    }
}

impl Default for FormState {
    fn default() -> Self {
        Self::new()
    }
}
