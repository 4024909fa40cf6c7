#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! True/false grading.

use bon::Builder;

use super::{answers::TruthValue, ratio_percentage};
use crate::types::{GradedAnswer, GradingOptions, Problem};

/// Grades a true/false answer by canonical truth token: `O`, `true`, `참`,
/// and `yes` all mean true, while anything unrecognized matches nothing.
#[derive(Builder)]
pub struct TrueFalseGrader<'a> {
    /// The problem being graded.
    problem:        &'a Problem,
    /// The student's answer as submitted.
    student_answer: &'a str,
    /// Normalization and feedback options.
    options:        &'a GradingOptions,
}

impl TrueFalseGrader<'_> {
    /// Runs the grader.
    pub fn run(self) -> GradedAnswer {
        let max_score = self.problem.max_score();
        let expected = TruthValue::parse(&self.problem.answer);
        let received = TruthValue::parse(self.student_answer);

        let is_correct = received.matches(expected);
        let score = if is_correct { max_score } else { 0 };

        let feedback = if !self.options.generate_feedback {
            String::new()
        } else if is_correct {
            "Correct.".to_string()
        } else {
            let mut feedback = format!(
                "Incorrect. The correct answer is `{}`.",
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
