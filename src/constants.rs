#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! Scoring constants carried over from the production scoring rules.
//!
//! The similarity threshold and the partial-credit cap are tunable knobs,
//! not derived quantities; change them here rather than inline.

/// Minimum normalized similarity a short answer must reach before any
/// partial credit is awarded.
pub const PARTIAL_CREDIT_THRESHOLD: f64 = 0.80;

/// Upper bound, as a percentage of the maximum score, on what a fuzzy
/// short-answer match can earn.
pub const PARTIAL_CREDIT_CAP: f64 = 80.0;

/// Overall percentage at or above which an AI-evaluated essay counts as
/// correct.
pub const ESSAY_PASS_PERCENTAGE: u32 = 80;

/// Minimum length, in characters after trimming, an essay answer must have
/// before it is sent to the AI evaluator.
pub const MIN_ESSAY_LENGTH: usize = 10;
