mod candidates;
mod selection;
mod trainer;

pub use candidates::Candidate;
pub use selection::select_best;
pub use trainer::{CandidateScore, SalaryTrainer, TrainedModels, TrainingReport};
