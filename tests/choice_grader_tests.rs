//! Tests for multiple-choice and true/false grading.

use quizmark::{
    Difficulty, GradingOptions, Problem, ProblemType,
    grade::{ChoiceGrader, TrueFalseGrader},
};

fn choice_problem(answer: &str) -> Problem {
    Problem::builder()
        .id("mc1")
        .kind(ProblemType::MultipleChoice)
        .difficulty(Difficulty::Medium)
        .question("Pick the right option.")
        .answer(answer)
        .solution("The second option restates the definition.")
        .build()
}

fn truefalse_problem(answer: &str) -> Problem {
    Problem::builder()
        .id("tf1")
        .kind(ProblemType::TrueFalse)
        .difficulty(Difficulty::Medium)
        .question("True or false?")
        .answer(answer)
        .build()
}

fn grade_choice(answer: &str, student: &str, options: &GradingOptions) -> quizmark::GradedAnswer {
    let problem = choice_problem(answer);
    ChoiceGrader::builder()
        .problem(&problem)
        .student_answer(student)
        .options(options)
        .build()
        .run()
}

fn grade_truefalse(answer: &str, student: &str) -> quizmark::GradedAnswer {
    let problem = truefalse_problem(answer);
    let options = GradingOptions::default();
    TrueFalseGrader::builder()
        .problem(&problem)
        .student_answer(student)
        .options(&options)
        .build()
        .run()
}

#[test]
fn circled_numeral_matches_plain_numeral() {
    let graded = grade_choice("2", "②", &GradingOptions::default());
    assert!(graded.is_correct);
    assert_eq!(graded.score, 10);
}

#[test]
fn numeral_matches_letter() {
    let graded = grade_choice("b", "2", &GradingOptions::default());
    assert!(graded.is_correct);
}

#[test]
fn letters_match_case_insensitively_by_default() {
    let graded = grade_choice("B", "b", &GradingOptions::default());
    assert!(graded.is_correct);
}

#[test]
fn case_sensitive_comparison_can_be_requested() {
    let options = GradingOptions::builder().case_sensitive(true).build();
    let graded = grade_choice("B", "b", &options);
    assert!(!graded.is_correct);
    assert_eq!(graded.score, 0);
}

#[test]
fn surrounding_whitespace_is_ignored_by_default() {
    let graded = grade_choice("a", "  a \n", &GradingOptions::default());
    assert!(graded.is_correct);
}

#[test]
fn wrong_choice_feedback_names_answer_and_solution() {
    let graded = grade_choice("2", "3", &GradingOptions::default());
    assert!(!graded.is_correct);
    assert_eq!(graded.score, 0);
    assert!(graded.feedback.contains("`2`"));
    assert!(graded.feedback.contains("restates the definition"));
}

#[test]
fn feedback_can_be_turned_off() {
    let options = GradingOptions::builder().generate_feedback(false).build();
    let graded = grade_choice("2", "3", &options);
    assert!(graded.feedback.is_empty());
}

#[test]
fn korean_and_latin_true_spellings_match() {
    let graded = grade_truefalse("참", "O");
    assert!(graded.is_correct);
    assert_eq!(graded.score, 5);
}

#[test]
fn korean_and_latin_false_spellings_match() {
    let graded = grade_truefalse("거짓", "X");
    assert!(graded.is_correct);
}

#[test]
fn unrecognized_spelling_never_matches() {
    let graded = grade_truefalse("true", "maybe");
    assert!(!graded.is_correct);
    assert_eq!(graded.score, 0);
}

#[test]
fn two_unrecognized_spellings_do_not_match_each_other() {
    let graded = grade_truefalse("perhaps", "perhaps");
    assert!(!graded.is_correct);
}
