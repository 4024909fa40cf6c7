//! # quizmark
//!
//! An automatic grading engine for quiz submissions: per-type answer
//! normalization, partial-credit scoring via edit-distance similarity,
//! concurrent batch grading, and structured result summaries, with essay
//! answers delegated to an external AI evaluator.

#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

/// Problem catalog access with request-scoped memoization.
pub mod catalog;
/// Environment-driven configuration shared across the crate.
pub mod config;
/// Tunable scoring constants.
pub mod constants;
/// External AI essay evaluator contract and the OpenAI-backed implementation.
pub mod evaluator;
/// For all things related to grading
pub mod grade;
/// Core data model shared across the crate.
pub mod types;

pub use catalog::{CatalogAccessor, CatalogError, PostgrestCatalog, ProblemCatalog, StaticCatalog};
pub use evaluator::{EssayEvaluationRequest, EssayEvaluator, EvaluatorError, OpenAiEvaluator};
pub use grade::{
    ChoiceGrader, EssayGrader, GradedSubmission, GradingItem, ShortAnswerGrader, TrueFalseGrader,
    grade_multiple_problems, grade_single_problem, grade_submission, summarize, summary_table,
};
pub use types::{
    AccuracyBucket, AiEssayEvaluation, CriterionScore, Difficulty, EssayDetailLevel,
    EvaluationCriterion, GradedAnswer, GradingOptions, GradingSummary, Problem,
    ProblemGradingResult, ProblemOption, ProblemType, SubmissionUpdate,
};
