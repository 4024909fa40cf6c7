#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! Essay grading via the external AI evaluator.

use bon::Builder;
use itertools::Itertools;

use super::ratio_percentage;
use crate::{
    constants::{ESSAY_PASS_PERCENTAGE, MIN_ESSAY_LENGTH},
    evaluator::{EssayEvaluationRequest, EssayEvaluator},
    types::{AiEssayEvaluation, GradedAnswer, GradingOptions, Problem},
};

/// Grades a long-form answer by delegating to the AI evaluator.
///
/// Grading is skipped entirely, without calling the evaluator, when AI
/// grading is disabled or the trimmed answer is shorter than
/// [`MIN_ESSAY_LENGTH`] characters. Evaluator failures of any kind degrade
/// to a zero-score "manual grading required" result; they are logged but
/// never propagated.
#[derive(Builder)]
pub struct EssayGrader<'a> {
    /// The problem being graded.
    problem:        &'a Problem,
    /// The student's answer as submitted.
    student_answer: &'a str,
    /// Essay and feedback options.
    options:        &'a GradingOptions,
    /// The external evaluator to score the answer with.
    evaluator:      &'a dyn EssayEvaluator,
}

impl EssayGrader<'_> {
    /// Runs the grader.
    pub async fn run(self) -> GradedAnswer {
        let max_score = self.problem.max_score();
        let trimmed = self.student_answer.trim();

        if !self.options.use_ai_for_essay {
            return self.skipped("AI grading is disabled. Manual grading is required.");
        }

        if trimmed.chars().count() < MIN_ESSAY_LENGTH {
            return self.skipped("The answer is too short to evaluate. Manual grading is required.");
        }

        let request = EssayEvaluationRequest::builder()
            .question(self.problem.question.clone())
            .correct_answer(self.problem.answer.clone())
            .student_answer(trimmed)
            .maybe_solution(self.problem.solution.clone())
            .detail_level(self.options.essay_detail_level)
            .build();

        match self.evaluator.evaluate(&request).await {
            Ok(evaluation) => {
                let overall = evaluation.overall_score.min(100);
                let score = (overall as f64 / 100.0 * max_score as f64).round() as u32;

                let feedback = if self.options.generate_feedback {
                    essay_feedback(&evaluation)
                } else {
                    String::new()
                };

                GradedAnswer {
                    is_correct: overall >= ESSAY_PASS_PERCENTAGE,
                    score,
                    score_percentage: ratio_percentage(score, max_score),
                    feedback,
                    ai_evaluation: Some(evaluation),
                }
            }
            Err(e) => {
                tracing::warn!(problem_id = %self.problem.id, "essay evaluation failed: {e}");
                self.skipped("AI grading failed. Manual grading is required.")
            }
        }
    }

    /// Zero-score result used when the evaluator is skipped or fails.
    fn skipped(&self, reason: &str) -> GradedAnswer {
        GradedAnswer {
            is_correct:       false,
            score:            0,
            score_percentage: 0,
            feedback:         if self.options.generate_feedback {
                reason.to_string()
            } else {
                String::new()
            },
            ai_evaluation:    None,
        }
    }
}

/// Joins the evaluator's overall feedback with its improvement bullets.
fn essay_feedback(evaluation: &AiEssayEvaluation) -> String {
    let mut feedback = evaluation.overall_feedback.trim().to_string();

    if !evaluation.improvements.is_empty() {
        if !feedback.is_empty() {
            feedback.push_str("\n\n");
        }
        feedback.push_str("Suggested improvements:\n");
        feedback.push_str(
            &evaluation
                .improvements
                .iter()
                .map(|improvement| format!("- {improvement}"))
                .join("\n"),
        );
    }

    feedback
}
