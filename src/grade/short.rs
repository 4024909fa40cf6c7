#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! Short-answer grading with fuzzy partial credit.

use bon::Builder;

use super::{
    answers::{acceptable_answers, normalize_answer},
    ratio_percentage,
    similarity::similarity,
};
use crate::{
    constants::{PARTIAL_CREDIT_CAP, PARTIAL_CREDIT_THRESHOLD},
    types::{GradedAnswer, GradingOptions, Problem},
};

/// Grades a short free-text answer.
///
/// The canonical answer may list several acceptable spellings separated by
/// commas; any exact match after normalization earns the full score. When
/// partial credit is enabled, a near miss whose best similarity reaches
/// [`PARTIAL_CREDIT_THRESHOLD`] earns a proportional share of at most
/// [`PARTIAL_CREDIT_CAP`] percent of the maximum score, and is still
/// reported as not correct.
#[derive(Builder)]
pub struct ShortAnswerGrader<'a> {
    /// The problem being graded.
    problem:        &'a Problem,
    /// The student's answer as submitted.
    student_answer: &'a str,
    /// Normalization, partial-credit, and feedback options.
    options:        &'a GradingOptions,
}

impl ShortAnswerGrader<'_> {
    /// Runs the grader.
    pub fn run(self) -> GradedAnswer {
        let max_score = self.problem.max_score();
        let accepted = acceptable_answers(&self.problem.answer, self.options);
        let received = normalize_answer(self.student_answer, self.options);

        if accepted.iter().any(|answer| *answer == received) {
            return GradedAnswer {
                is_correct:       true,
                score:            max_score,
                score_percentage: ratio_percentage(max_score, max_score),
                feedback:         self.feedback_text("Correct."),
                ai_evaluation:    None,
            };
        }

        let best_similarity = accepted
            .iter()
            .map(|answer| similarity(answer, &received))
            .fold(0.0_f64, f64::max);

        if self.options.allow_partial_credit && best_similarity >= PARTIAL_CREDIT_THRESHOLD {
            let score =
                (best_similarity * PARTIAL_CREDIT_CAP / 100.0 * max_score as f64).round() as u32;

            return GradedAnswer {
                is_correct:       false,
                score,
                score_percentage: ratio_percentage(score, max_score),
                feedback:         self.feedback_text(&format!(
                    "Partially correct. The expected answer is `{}`.",
                    self.problem.answer.trim()
                )),
                ai_evaluation:    None,
            };
        }

        let mut feedback = format!(
            "Incorrect. The correct answer is `{}`.",
            self.problem.answer.trim()
        );
        if let Some(solution) = &self.problem.solution {
            feedback.push_str(&format!(" {}", solution.trim()));
        }

        GradedAnswer {
            is_correct:       false,
            score:            0,
            score_percentage: 0,
            feedback:         self.feedback_text(&feedback),
            ai_evaluation:    None,
        }
    }

    /// Returns the given feedback, or nothing when feedback generation is
    /// off.
    fn feedback_text(&self, text: &str) -> String {
        if self.options.generate_feedback {
            text.to_string()
        } else {
            String::new()
        }
    }
}
