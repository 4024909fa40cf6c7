#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! Multiple-choice grading.

use bon::Builder;

use super::{answers::normalize_choice, ratio_percentage};
use crate::types::{GradedAnswer, GradingOptions, Problem};

/// Grades a multiple-choice answer by exact match after choice
/// normalization: all of `b`, `2`, and `②` name the same option.
#[derive(Builder)]
pub struct ChoiceGrader<'a> {
    /// The problem being graded.
    problem:        &'a Problem,
    /// The student's answer as submitted.
    student_answer: &'a str,
    /// Normalization and feedback options.
    options:        &'a GradingOptions,
}

impl ChoiceGrader<'_> {
    /// Runs the grader.
    pub fn run(self) -> GradedAnswer {
        let max_score = self.problem.max_score();
        let expected = normalize_choice(&self.problem.answer, self.options);
        let received = normalize_choice(self.student_answer, self.options);

        let is_correct = expected == received;
        let score = if is_correct { max_score } else { 0 };

        let feedback = if !self.options.generate_feedback {
            String::new()
        } else if is_correct {
            "Correct.".to_string()
        } else {
            let mut feedback = format!(
                "Incorrect. The correct choice is `{}`.",
                self.problem.answer.trim()
            );
            if let Some(solution) = &self.problem.solution {
                feedback.push_str(&format!(" {}", solution.trim()));
            }
            feedback
        };

        GradedAnswer {
            is_correct,
            score,
            score_percentage: ratio_percentage(score, max_score),
            feedback,
            ai_evaluation: None,
        }
    }
}
