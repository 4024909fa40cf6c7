//! Tests for result aggregation and the rendered summary table.

use std::collections::HashMap;

use quizmark::{
    Difficulty, Problem, ProblemGradingResult, ProblemType, summarize, summary_table,
};

fn result(
    id: &str,
    kind: ProblemType,
    score: u32,
    max_score: u32,
    is_correct: bool,
) -> ProblemGradingResult {
    ProblemGradingResult {
        problem_id:       id.to_string(),
        problem_type:     kind,
        is_correct,
        score,
        max_score,
        score_percentage: if max_score == 0 {
            0
        } else {
            (score as f64 / max_score as f64 * 100.0).round() as u32
        },
        correct_answer:   "a".to_string(),
        student_answer:   "b".to_string(),
        feedback:         String::new(),
        grading_time_ms:  1,
        ai_evaluation:    None,
    }
}

fn problem(id: &str, kind: ProblemType, difficulty: Difficulty) -> Problem {
    Problem::builder()
        .id(id)
        .kind(kind)
        .difficulty(difficulty)
        .question("Question text.")
        .answer("a")
        .build()
}

#[test]
fn empty_results_summarize_to_all_zeroes() {
    let summary = summarize(&[], &HashMap::new());

    assert_eq!(summary.total_problems, 0);
    assert_eq!(summary.correct_count, 0);
    assert_eq!(summary.partial_count, 0);
    assert_eq!(summary.incorrect_count, 0);
    assert_eq!(summary.total_score, 0);
    assert_eq!(summary.max_total_score, 0);
    assert_eq!(summary.score_percentage, 0);
    assert!(summary.accuracy_by_type.is_empty());
    assert!(summary.accuracy_by_difficulty.is_empty());
}

#[test]
fn counts_partition_into_correct_partial_and_incorrect() {
    let results = vec![
        result("p1", ProblemType::MultipleChoice, 10, 10, true),
        result("p2", ProblemType::ShortAnswer, 6, 10, false),
        result("p3", ProblemType::ShortAnswer, 0, 10, false),
        result("p4", ProblemType::Essay, 17, 20, true),
    ];

    let summary = summarize(&results, &HashMap::new());

    assert_eq!(summary.total_problems, 4);
    assert_eq!(summary.correct_count, 2);
    assert_eq!(summary.partial_count, 1);
    assert_eq!(summary.incorrect_count, 1);
    assert_eq!(
        summary.correct_count + summary.partial_count + summary.incorrect_count,
        summary.total_problems
    );
    assert_eq!(summary.total_score, 33);
    assert_eq!(summary.max_total_score, 50);
    assert_eq!(summary.score_percentage, 66);
}

#[test]
fn type_bucket_counts_sum_to_the_total() {
    let results = vec![
        result("p1", ProblemType::MultipleChoice, 10, 10, true),
        result("p2", ProblemType::MultipleChoice, 0, 10, false),
        result("p3", ProblemType::TrueFalse, 5, 5, true),
    ];

    let summary = summarize(&results, &HashMap::new());

    let bucket_total: u32 = summary.accuracy_by_type.values().map(|b| b.count).sum();
    assert_eq!(bucket_total, summary.total_problems);

    let choice = &summary.accuracy_by_type[&ProblemType::MultipleChoice];
    assert_eq!(choice.count, 2);
    assert_eq!(choice.correct, 1);
    assert_eq!(choice.percentage, 50);
}

#[test]
fn difficulty_breakdown_skips_results_without_a_problem() {
    let results = vec![
        result("p1", ProblemType::MultipleChoice, 10, 10, true),
        result("p2", ProblemType::TrueFalse, 0, 5, false),
    ];
    let problems = HashMap::from([(
        "p1".to_string(),
        problem("p1", ProblemType::MultipleChoice, Difficulty::Hard),
    )]);

    let summary = summarize(&results, &problems);

    assert_eq!(summary.total_problems, 2);
    let difficulty_total: u32 = summary.accuracy_by_difficulty.values().map(|b| b.count).sum();
    assert_eq!(difficulty_total, 1);
    assert_eq!(summary.accuracy_by_difficulty[&Difficulty::Hard].percentage, 100);
}

#[test]
fn difficulty_counts_cover_every_result_when_all_problems_are_known() {
    let results = vec![
        result("p1", ProblemType::MultipleChoice, 10, 10, true),
        result("p2", ProblemType::TrueFalse, 0, 5, false),
        result("p3", ProblemType::Essay, 20, 20, true),
    ];
    let problems = HashMap::from([
        (
            "p1".to_string(),
            problem("p1", ProblemType::MultipleChoice, Difficulty::Easy),
        ),
        (
            "p2".to_string(),
            problem("p2", ProblemType::TrueFalse, Difficulty::Easy),
        ),
        (
            "p3".to_string(),
            problem("p3", ProblemType::Essay, Difficulty::Hard),
        ),
    ]);

    let summary = summarize(&results, &problems);

    let difficulty_total: u32 = summary.accuracy_by_difficulty.values().map(|b| b.count).sum();
    assert_eq!(difficulty_total, summary.total_problems);
    assert_eq!(summary.accuracy_by_difficulty[&Difficulty::Easy].percentage, 50);
}

#[test]
fn all_zero_max_scores_do_not_divide_by_zero() {
    let results = vec![result("p1", ProblemType::MultipleChoice, 0, 0, false)];
    let summary = summarize(&results, &HashMap::new());
    assert_eq!(summary.score_percentage, 0);
}

#[test]
fn summary_table_renders_totals_and_buckets() {
    let results = vec![
        result("p1", ProblemType::MultipleChoice, 10, 10, true),
        result("p2", ProblemType::Essay, 16, 20, false),
    ];
    let problems = HashMap::from([(
        "p1".to_string(),
        problem("p1", ProblemType::MultipleChoice, Difficulty::Medium),
    )]);

    let table = summary_table(&summarize(&results, &problems));

    assert!(table.contains("Graded 2 problems"));
    assert!(table.contains("26/30 points"));
    assert!(table.contains("multiple choice"));
    assert!(table.contains("1 correct, 1 partial, 0 incorrect"));
}
