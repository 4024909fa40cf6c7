//! Tests for derived maximum scores and result invariants.

use quizmark::{Difficulty, GradingOptions, Problem, ProblemType, grade::ChoiceGrader};

fn problem(kind: ProblemType, difficulty: Difficulty) -> Problem {
    Problem::builder()
        .id("p1")
        .kind(kind)
        .difficulty(difficulty)
        .question("What is the answer?")
        .answer("a")
        .build()
}

#[test]
fn max_score_scales_base_score_by_difficulty() {
    let expected = [
        (ProblemType::MultipleChoice, Difficulty::Easy, 8),
        (ProblemType::MultipleChoice, Difficulty::Medium, 10),
        (ProblemType::MultipleChoice, Difficulty::Hard, 13),
        (ProblemType::ShortAnswer, Difficulty::Easy, 8),
        (ProblemType::ShortAnswer, Difficulty::Medium, 10),
        (ProblemType::ShortAnswer, Difficulty::Hard, 13),
        (ProblemType::TrueFalse, Difficulty::Easy, 4),
        (ProblemType::TrueFalse, Difficulty::Medium, 5),
        (ProblemType::TrueFalse, Difficulty::Hard, 7),
        (ProblemType::Essay, Difficulty::Easy, 16),
        (ProblemType::Essay, Difficulty::Medium, 20),
        (ProblemType::Essay, Difficulty::Hard, 26),
    ];

    for (kind, difficulty, max_score) in expected {
        assert_eq!(
            problem(kind, difficulty).max_score(),
            max_score,
            "{kind} at {difficulty}"
        );
    }
}

#[test]
fn max_score_is_idempotent() {
    let p = problem(ProblemType::Essay, Difficulty::Hard);
    assert_eq!(p.max_score(), p.max_score());
}

#[test]
fn unknown_type_still_has_a_positive_max_score() {
    assert_eq!(problem(ProblemType::Unknown, Difficulty::Medium).max_score(), 10);
}

#[test]
fn unknown_type_strings_deserialize_to_unknown() {
    let p: Problem = serde_json::from_value(serde_json::json!({
        "id": "p9",
        "type": "drawing",
        "difficulty": "medium",
        "question": "Draw a cat.",
        "answer": "n/a",
    }))
    .expect("deserialize");

    assert_eq!(p.kind, ProblemType::Unknown);
}

#[test]
fn full_score_result_reports_100_percent() {
    let p = problem(ProblemType::MultipleChoice, Difficulty::Hard);
    let options = GradingOptions::default();

    let graded = ChoiceGrader::builder()
        .problem(&p)
        .student_answer("a")
        .options(&options)
        .build()
        .run();

    assert!(graded.is_correct);
    assert_eq!(graded.score, 13);
    assert_eq!(graded.score_percentage, 100);
}
