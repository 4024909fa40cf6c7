#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! Aggregation of per-problem grading results.

use std::collections::HashMap;

use itertools::Itertools;
use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Panel, Style, object::Rows},
};

use super::ratio_percentage;
use crate::types::{
    AccuracyBucket, Difficulty, GradingSummary, Problem, ProblemGradingResult, ProblemType,
};

/// Reduces a list of per-problem results into totals and breakdowns.
///
/// `problems` supplies the difficulty for each result. A result whose
/// problem is absent from the map still counts toward the totals and the
/// type breakdown but is skipped for the difficulty breakdown. Every
/// percentage rounds to the nearest integer, and an empty bucket or an
/// all-ungradable batch yields 0 rather than a division error.
pub fn summarize(
    results: &[ProblemGradingResult],
    problems: &HashMap<String, Problem>,
) -> GradingSummary {
    let mut correct_count = 0u32;
    let mut partial_count = 0u32;
    let mut incorrect_count = 0u32;
    let mut total_score = 0u32;
    let mut max_total_score = 0u32;
    let mut by_type: HashMap<ProblemType, AccuracyBucket> = HashMap::new();
    let mut by_difficulty: HashMap<Difficulty, AccuracyBucket> = HashMap::new();

    for result in results {
        if result.is_correct {
            correct_count += 1;
        } else if result.score > 0 {
            partial_count += 1;
        } else {
            incorrect_count += 1;
        }
        total_score += result.score;
        max_total_score += result.max_score;

        let bucket = by_type.entry(result.problem_type).or_default();
        bucket.count += 1;
        if result.is_correct {
            bucket.correct += 1;
        }

        if let Some(problem) = problems.get(&result.problem_id) {
            let bucket = by_difficulty.entry(problem.difficulty).or_default();
            bucket.count += 1;
            if result.is_correct {
                bucket.correct += 1;
            }
        }
    }

    for bucket in by_type.values_mut().chain(by_difficulty.values_mut()) {
        bucket.percentage = ratio_percentage(bucket.correct, bucket.count);
    }

    GradingSummary {
        total_problems: results.len() as u32,
        correct_count,
        partial_count,
        incorrect_count,
        total_score,
        max_total_score,
        score_percentage: ratio_percentage(total_score, max_total_score),
        accuracy_by_type: by_type,
        accuracy_by_difficulty: by_difficulty,
    }
}

#[derive(Tabled)]
/// Row in the rendered accuracy breakdown table.
struct BreakdownRow {
    /// The bucket being described, eg. `essay` or `hard`.
    #[tabled(rename = "Group")]
    group:    String,
    /// Number of problems in the bucket.
    #[tabled(rename = "Problems")]
    count:    u32,
    /// Number of correct answers in the bucket.
    #[tabled(rename = "Correct")]
    correct:  u32,
    /// Bucket accuracy as a percentage.
    #[tabled(rename = "Accuracy")]
    accuracy: String,
}

impl BreakdownRow {
    /// Builds a row from a bucket and its display label.
    fn new(group: String, bucket: &AccuracyBucket) -> Self {
        Self {
            group,
            count: bucket.count,
            correct: bucket.correct,
            accuracy: format!("{}%", bucket.percentage),
        }
    }
}

/// Renders a grading summary as a table for textual reports.
pub fn summary_table(summary: &GradingSummary) -> String {
    let rows: Vec<BreakdownRow> = summary
        .accuracy_by_type
        .iter()
        .sorted_by_key(|(kind, _)| **kind)
        .map(|(kind, bucket)| BreakdownRow::new(kind.to_string(), bucket))
        .chain(
            summary
                .accuracy_by_difficulty
                .iter()
                .sorted_by_key(|(difficulty, _)| **difficulty)
                .map(|(difficulty, bucket)| BreakdownRow::new(difficulty.to_string(), bucket)),
        )
        .collect();

    Table::new(&rows)
        .with(Panel::header(format!(
            "Graded {} problems: {}/{} points ({}%)",
            summary.total_problems,
            summary.total_score,
            summary.max_total_score,
            summary.score_percentage
        )))
        .with(Panel::footer(format!(
            "{} correct, {} partial, {} incorrect",
            summary.correct_count, summary.partial_count, summary.incorrect_count
        )))
        .with(
            Modify::new(Rows::first())
                .with(Alignment::center())
                .with(Alignment::center_vertical()),
        )
        .with(Style::modern())
        .to_string()
}
