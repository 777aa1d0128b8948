//! tiqeval-core: EM/F1 scoring for bilingual extractive QA.
//! Normalize answers across Latin and Ge'ez scripts, then score predictions
//! against gold references aligned by question ID.

pub mod datasource;
pub mod evaluator;
pub mod metrics;
pub mod normalize;
pub mod report;

pub use datasource::{load_predictions, HubSplit, LocalEvalSet, ReferenceSource, Split};
pub use evaluator::{score, Predictions, References, ScoreError};
pub use metrics::{exact_match, max_em_f1, token_f1};
pub use normalize::normalize;
pub use report::render_report;
pub use tiqeval_types::{CoverageWarning, EvalResult, EvalSummary, QuestionScore};
