#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! Answer normalization shared by the type-specific graders.

use crate::types::GradingOptions;

/// Applies the base normalization: trim, optional whitespace strip, and
/// optional case fold.
pub fn normalize_answer(raw: &str, options: &GradingOptions) -> String {
    let mut normalized: String = if options.ignore_whitespace {
        raw.chars().filter(|c| !c.is_whitespace()).collect()
    } else {
        raw.trim().to_string()
    };

    if !options.case_sensitive {
        normalized = normalized.to_lowercase();
    }

    normalized
}

/// Normalizes a multiple-choice answer, mapping the numeral spellings
/// `1`..`5` and the circled-numeral glyphs `①`..`⑤` onto the letters
/// `a`..`e` so that, for example, `2` and `②` both match a canonical `b`.
pub fn normalize_choice(raw: &str, options: &GradingOptions) -> String {
    let normalized = normalize_answer(raw, options);

    let mut chars = normalized.chars();
    match (chars.next(), chars.next()) {
        (Some(only), None) => match only {
            '1' | '①' => "a".to_string(),
            '2' | '②' => "b".to_string(),
            '3' | '③' => "c".to_string(),
            '4' | '④' => "d".to_string(),
            '5' | '⑤' => "e".to_string(),
            _ => normalized,
        },
        _ => normalized,
    }
}

/// Canonical truth token for true/false answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TruthValue {
    /// An affirmative spelling.
    True,
    /// A negative spelling.
    False,
    /// An unrecognized spelling; never matches anything, itself included.
    Unknown,
}

impl TruthValue {
    /// Canonicalizes the many equivalent true/false spellings, Korean ones
    /// included, into a single token.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "o" | "true" | "t" | "참" | "예" | "yes" | "y" | "1" | "맞음" => TruthValue::True,
            "x" | "false" | "f" | "거짓" | "아니오" | "no" | "n" | "0" | "틀림" => {
                TruthValue::False
            }
            _ => TruthValue::Unknown,
        }
    }

    /// Whether two tokens match; [`TruthValue::Unknown`] never does.
    pub fn matches(self, other: TruthValue) -> bool {
        self != TruthValue::Unknown && self == other
    }
}

/// Splits a canonical short answer into its comma-separated acceptable
/// spellings, each normalized; empty entries are dropped.
pub fn acceptable_answers(canonical: &str, options: &GradingOptions) -> Vec<String> {
    canonical
        .split(',')
        .map(|answer| normalize_answer(answer, options))
        .filter(|answer| !answer.is_empty())
        .collect()
}
