#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! Grading dispatch: one grader per problem type, plus the concurrent batch
//! orchestrator.

/// Answer normalization shared by the graders.
pub mod answers;
/// Multiple-choice grading.
pub mod choice;
/// Essay grading via the external AI evaluator.
pub mod essay;
/// Short-answer grading with fuzzy partial credit.
pub mod short;
/// Edit-distance similarity helpers.
pub mod similarity;
/// Aggregation of per-problem results into a summary.
pub mod summary;
/// True/false grading.
pub mod truefalse;

pub use answers::{TruthValue, normalize_answer, normalize_choice};
pub use choice::ChoiceGrader;
pub use essay::EssayGrader;
pub use short::ShortAnswerGrader;
pub use similarity::{levenshtein, similarity};
pub use summary::{summarize, summary_table};
pub use truefalse::TrueFalseGrader;

use std::time::Instant;

use anyhow::{Result, ensure};
use futures::future::join_all;

use crate::{
    catalog::{CatalogAccessor, ProblemCatalog},
    evaluator::EssayEvaluator,
    types::{
        GradedAnswer, GradingOptions, GradingSummary, Problem, ProblemGradingResult, ProblemType,
        SubmissionUpdate,
    },
};

/// One (problem, student answer) pairing to grade.
#[derive(Debug, Clone)]
pub struct GradingItem {
    /// The resolved problem definition.
    pub problem:        Problem,
    /// The student's answer as submitted.
    pub student_answer: String,
}

impl GradingItem {
    /// Pairs a problem with a student answer.
    pub fn new(problem: Problem, student_answer: impl Into<String>) -> Self {
        Self {
            problem,
            student_answer: student_answer.into(),
        }
    }
}

/// Integer percentage `round(n / d * 100)`; 0 when the denominator is 0.
pub(crate) fn ratio_percentage(n: u32, d: u32) -> u32 {
    if d == 0 {
        0
    } else {
        (n as f64 / d as f64 * 100.0).round() as u32
    }
}

/// Grades one problem, dispatching on its type, and stamps the wall-clock
/// duration of the call into the result.
///
/// Unknown problem types yield a deterministic zero-score result with
/// explanatory feedback; nothing in here returns an error or panics, so a
/// single bad problem can never take down a batch.
pub async fn grade_single_problem(
    problem: &Problem,
    student_answer: &str,
    options: &GradingOptions,
    evaluator: &dyn EssayEvaluator,
) -> ProblemGradingResult {
    let started = Instant::now();

    let graded = match problem.kind {
        ProblemType::MultipleChoice => ChoiceGrader::builder()
            .problem(problem)
            .student_answer(student_answer)
            .options(options)
            .build()
            .run(),
        ProblemType::TrueFalse => TrueFalseGrader::builder()
            .problem(problem)
            .student_answer(student_answer)
            .options(options)
            .build()
            .run(),
        ProblemType::ShortAnswer => ShortAnswerGrader::builder()
            .problem(problem)
            .student_answer(student_answer)
            .options(options)
            .build()
            .run(),
        ProblemType::Essay => {
            EssayGrader::builder()
                .problem(problem)
                .student_answer(student_answer)
                .options(options)
                .evaluator(evaluator)
                .build()
                .run()
                .await
        }
        ProblemType::Unknown => unsupported(problem, options),
    };

    let grading_time_ms = started.elapsed().as_millis() as u64;

    ProblemGradingResult {
        problem_id: problem.id.clone(),
        problem_type: problem.kind,
        is_correct: graded.is_correct,
        score: graded.score,
        max_score: problem.max_score(),
        score_percentage: graded.score_percentage,
        correct_answer: problem.answer.clone(),
        student_answer: student_answer.to_string(),
        feedback: graded.feedback,
        grading_time_ms,
        ai_evaluation: graded.ai_evaluation,
    }
}

/// Zero-score result for problem types this engine cannot grade.
fn unsupported(problem: &Problem, options: &GradingOptions) -> GradedAnswer {
    tracing::warn!(problem_id = %problem.id, "unsupported problem type");
    GradedAnswer {
        is_correct:       false,
        score:            0,
        score_percentage: 0,
        feedback:         if options.generate_feedback {
            "This problem type is not supported by automatic grading. Manual grading is required."
                .to_string()
        } else {
            String::new()
        },
        ai_evaluation:    None,
    }
}

/// Grades every pairing concurrently.
///
/// Results come back positionally aligned with the input list regardless of
/// completion order, and one slow or failing grading never blocks its
/// siblings; the caller always receives exactly one result per pair.
pub async fn grade_multiple_problems(
    items: &[GradingItem],
    options: &GradingOptions,
    evaluator: &dyn EssayEvaluator,
) -> Vec<ProblemGradingResult> {
    join_all(items.iter().map(|item| {
        grade_single_problem(&item.problem, &item.student_answer, options, evaluator)
    }))
    .await
}

/// Everything produced by grading one submission.
#[derive(Debug, Clone)]
pub struct GradedSubmission {
    /// Aggregate totals and breakdowns.
    pub summary: GradingSummary,
    /// The typed record update for the caller to persist; its `answers`
    /// hold the per-problem results in submission order.
    pub update:  SubmissionUpdate,
}

/// Grades a whole submission against a problem catalog.
///
/// Problem ids that cannot be resolved are skipped, each having been logged
/// by the accessor. Only the catastrophic case propagates as an error: a
/// non-empty submission for which not a single problem could be resolved,
/// since there is nothing meaningful to grade at that point.
pub async fn grade_submission(
    answers: &[(String, String)],
    catalog: &dyn ProblemCatalog,
    options: &GradingOptions,
    evaluator: &dyn EssayEvaluator,
) -> Result<GradedSubmission> {
    let accessor = CatalogAccessor::new(catalog);
    let problems = accessor
        .resolve_many(answers.iter().map(|(id, _)| id.as_str()))
        .await;

    ensure!(
        answers.is_empty() || !problems.is_empty(),
        "none of the {} submitted problems could be resolved from the catalog",
        answers.len()
    );

    let items: Vec<GradingItem> = answers
        .iter()
        .filter_map(|(id, answer)| {
            problems
                .get(id)
                .map(|problem| GradingItem::new(problem.clone(), answer.clone()))
        })
        .collect();

    let results = grade_multiple_problems(&items, options, evaluator).await;
    let summary = summarize(&results, &problems);
    let update = SubmissionUpdate::graded(results, &summary);

    Ok(GradedSubmission { summary, update })
}
