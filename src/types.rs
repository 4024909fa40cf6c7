#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! Core data model for problems, grading options, and grading results.

use std::{collections::HashMap, fmt::Display};

use bon::Builder;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
/// The kind of quiz problem, which selects the grading strategy and the base
/// score.
pub enum ProblemType {
    /// Select one choice out of a fixed option list.
    MultipleChoice,
    /// A true/false judgement.
    TrueFalse,
    /// A short free-text answer matched against acceptable answers.
    ShortAnswer,
    /// A long-form answer scored by the AI evaluator.
    Essay,
    /// Any type string this engine does not recognize. Records with such a
    /// type still deserialize and grade to a deterministic zero-score
    /// result instead of failing the batch.
    #[serde(other)]
    Unknown,
}

impl ProblemType {
    /// Base score for this problem type, before the difficulty multiplier.
    pub fn base_score(&self) -> f64 {
        match self {
            ProblemType::MultipleChoice | ProblemType::ShortAnswer => 10.0,
            ProblemType::TrueFalse => 5.0,
            ProblemType::Essay => 20.0,
            ProblemType::Unknown => 10.0,
        }
    }
}

impl Display for ProblemType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ProblemType::MultipleChoice => "multiple choice",
            ProblemType::TrueFalse => "true/false",
            ProblemType::ShortAnswer => "short answer",
            ProblemType::Essay => "essay",
            ProblemType::Unknown => "unknown",
        };
        write!(f, "{label}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
/// Difficulty band of a problem, which scales its base score.
pub enum Difficulty {
    /// Scales the base score by 0.8.
    Easy,
    /// Leaves the base score unchanged.
    Medium,
    /// Scales the base score by 1.3.
    Hard,
}

impl Difficulty {
    /// Scalar applied to a problem type's base score for this band.
    pub fn multiplier(&self) -> f64 {
        match self {
            Difficulty::Easy => 0.8,
            Difficulty::Medium => 1.0,
            Difficulty::Hard => 1.3,
        }
    }
}

impl Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        };
        write!(f, "{label}")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Builder)]
#[builder(on(String, into))]
/// A single selectable option on a multiple-choice problem.
pub struct ProblemOption {
    /// Option identifier as shown to the student, eg. `a` or `1`.
    pub id:         String,
    /// The option text.
    pub text:       String,
    /// Whether this option is the correct one, when the catalog stores it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_correct: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Builder)]
#[builder(on(String, into))]
/// A canonical quiz item as resolved from the problem catalog.
///
/// The maximum score is always recomputed from type and difficulty via
/// [`Problem::max_score`]; it is never stored, so a change to the scoring
/// rules can never disagree with persisted data.
pub struct Problem {
    /// Opaque identifier assigned by the catalog.
    pub id:         String,
    /// The kind of problem, which selects the grading strategy.
    #[serde(rename = "type")]
    pub kind:       ProblemType,
    /// Difficulty band used to scale the score.
    pub difficulty: Difficulty,
    /// The question as shown to the student.
    pub question:   String,
    /// The canonical correct answer. For short answers this may be a
    /// comma-separated list of acceptable spellings.
    pub answer:     String,
    /// Optional worked solution appended to incorrect-answer feedback.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub solution:   Option<String>,
    /// Options for multiple-choice problems.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options:    Option<Vec<ProblemOption>>,
}

impl Problem {
    /// Maximum score for this problem: `base_score(type)` scaled by the
    /// difficulty multiplier, rounded to the nearest integer.
    pub fn max_score(&self) -> u32 {
        (self.kind.base_score() * self.difficulty.multiplier()).round() as u32
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
/// Verbosity requested from the essay evaluator.
pub enum EssayDetailLevel {
    /// A brief evaluation, one or two sentences per criterion.
    Basic,
    /// A thorough evaluation with references to the student's answer.
    #[default]
    Detailed,
}

#[derive(Debug, Clone, Builder)]
/// Options controlling normalization, partial credit, and feedback.
pub struct GradingOptions {
    /// Enables fuzzy partial credit for short answers.
    #[builder(default = true)]
    pub allow_partial_credit: bool,
    /// When false, essay grading is skipped with a "manual grading
    /// required" result and the evaluator is never called.
    #[builder(default = true)]
    pub use_ai_for_essay:     bool,
    /// Compare answers case-sensitively.
    #[builder(default = false)]
    pub case_sensitive:       bool,
    /// Strip all whitespace from answers before comparison.
    #[builder(default = true)]
    pub ignore_whitespace:    bool,
    /// Include human-readable feedback text in results.
    #[builder(default = true)]
    pub generate_feedback:    bool,
    /// Verbosity requested from the essay evaluator.
    #[builder(default)]
    pub essay_detail_level:   EssayDetailLevel,
}

impl Default for GradingOptions {
    fn default() -> Self {
        GradingOptions::builder().build()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
/// Rubric criteria the essay evaluator scores against.
pub enum EvaluationCriterion {
    /// Factual correctness relative to the model answer.
    Accuracy,
    /// Coverage of the points the model answer makes.
    Completeness,
    /// Coherence and soundness of the argument.
    Logic,
    /// Clarity and quality of the writing itself.
    Expression,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// A single criterion's score with feedback.
pub struct CriterionScore {
    /// The rubric criterion being scored.
    pub criteria: EvaluationCriterion,
    /// Score for this criterion, 0 to 100.
    pub score:    u32,
    /// Feedback specific to this criterion.
    pub feedback: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Structured result returned by the external essay evaluator.
///
/// Created once per evaluation call and never mutated afterwards.
pub struct AiEssayEvaluation {
    /// Overall score, 0 to 100.
    pub overall_score:    u32,
    /// Per-criterion scores and feedback.
    pub criteria_scores:  Vec<CriterionScore>,
    /// Overall feedback on the answer.
    pub overall_feedback: String,
    /// What the answer did well.
    pub strengths:        Vec<String>,
    /// What the answer should improve.
    pub improvements:     Vec<String>,
    /// Identifier of the model that produced the evaluation.
    #[serde(default)]
    pub model_used:       String,
    /// The evaluator's confidence in its own scoring, 0.0 to 1.0.
    #[serde(default)]
    pub confidence:       f64,
}

#[derive(Debug, Clone)]
/// Per-problem grading outcome before the orchestrator stamps timing.
pub struct GradedAnswer {
    /// Whether the answer counts as correct.
    pub is_correct:       bool,
    /// Points awarded, never above the problem's maximum score.
    pub score:            u32,
    /// `round(score / max_score * 100)`.
    pub score_percentage: u32,
    /// Human-readable feedback; empty when feedback generation is off.
    pub feedback:         String,
    /// The AI evaluation, present only for essays graded by the evaluator.
    pub ai_evaluation:    Option<AiEssayEvaluation>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// The outcome of grading one problem.
pub struct ProblemGradingResult {
    /// Identifier of the graded problem.
    pub problem_id:       String,
    /// The kind of problem that was graded.
    pub problem_type:     ProblemType,
    /// Whether the answer counts as correct.
    pub is_correct:       bool,
    /// Points awarded.
    pub score:            u32,
    /// Maximum points for the problem.
    pub max_score:        u32,
    /// `round(score / max_score * 100)`.
    pub score_percentage: u32,
    /// The canonical correct answer, for display.
    pub correct_answer:   String,
    /// The student's answer as submitted.
    pub student_answer:   String,
    /// Human-readable feedback; empty when feedback generation is off.
    pub feedback:         String,
    /// Wall-clock duration of this single grading call.
    pub grading_time_ms:  u64,
    /// The AI evaluation, present only for essays graded by the evaluator.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_evaluation:    Option<AiEssayEvaluation>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
/// Count, correct count, and accuracy for one breakdown bucket.
pub struct AccuracyBucket {
    /// Number of problems in the bucket.
    pub count:      u32,
    /// Number of correct answers in the bucket.
    pub correct:    u32,
    /// `round(correct / count * 100)`; 0 for an empty bucket.
    pub percentage: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
/// Aggregate over a set of [`ProblemGradingResult`]s.
///
/// `correct_count + partial_count + incorrect_count` always equals
/// `total_problems`.
pub struct GradingSummary {
    /// Number of results aggregated.
    pub total_problems:         u32,
    /// Results marked correct.
    pub correct_count:          u32,
    /// Results with some score that are not fully correct.
    pub partial_count:          u32,
    /// Results with no score at all.
    pub incorrect_count:        u32,
    /// Sum of awarded scores.
    pub total_score:            u32,
    /// Sum of maximum scores.
    pub max_total_score:        u32,
    /// `round(total_score / max_total_score * 100)`; 0 when nothing was
    /// gradable.
    pub score_percentage:       u32,
    /// Per-problem-type accuracy breakdown.
    pub accuracy_by_type:       HashMap<ProblemType, AccuracyBucket>,
    /// Per-difficulty accuracy breakdown. Results whose problem definition
    /// was unavailable at aggregation time are not represented here.
    pub accuracy_by_difficulty: HashMap<Difficulty, AccuracyBucket>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Builder)]
#[builder(on(String, into))]
/// The exact fields written back to a submission record after grading.
pub struct SubmissionUpdate {
    /// Submission lifecycle state, `graded` once this engine has run.
    pub status:     String,
    /// Total score across the submission.
    pub score:      u32,
    /// Per-problem results in submission order.
    pub answers:    Vec<ProblemGradingResult>,
    /// When grading completed.
    pub graded_at:  DateTime<Utc>,
    /// Record modification time; same instant as `graded_at` when produced
    /// by [`SubmissionUpdate::graded`].
    pub updated_at: DateTime<Utc>,
}

impl SubmissionUpdate {
    /// Builds the update for a freshly graded submission.
    pub fn graded(results: Vec<ProblemGradingResult>, summary: &GradingSummary) -> Self {
        let now = Utc::now();
        SubmissionUpdate::builder()
            .status("graded")
            .score(summary.total_score)
            .answers(results)
            .graded_at(now)
            .updated_at(now)
            .build()
    }
}
