// src/grading.rs
//
// Pure grading core: the answer evaluator and the scoring engine. No I/O,
// deterministic for identical inputs, so attempts can be re-graded and the
// whole thing unit-tested without a database.

use std::collections::HashMap;

use crate::models::question::{AnswerKey, AnswerValue, Question, QuestionKind};

/// Aggregate result of grading one submission.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreOutcome {
    /// 0..=100, round-half-up.
    pub percent: i64,
    pub letter_grade: String,
    /// Per-question verdicts, keyed by question id.
    pub per_question: HashMap<i64, bool>,
}

/// Evaluates a single submitted answer against a question's key.
///
/// Malformed or missing submissions evaluate to `false`, never an error: a
/// single bad field must not abort the whole submission.
pub fn evaluate(question: &Question, submitted: Option<&AnswerValue>) -> bool {
    let key = match &question.answer_key {
        Some(key) => key,
        // Text questions carry no key and are never auto-graded.
        None => return false,
    };

    match (question.kind, key) {
        (QuestionKind::Single, AnswerKey::Choice(key_ids)) => {
            // Containment, not equality: the first/only submitted choice may
            // arrive wrapped in a one-element array, and stray extra values
            // on a single-choice payload do not void a correct pick.
            normalize_choices(submitted)
                .iter()
                .any(|id| key_ids.iter().any(|k| k == id))
        }
        (QuestionKind::Multiple, AnswerKey::Choice(key_ids)) => {
            let chosen = normalize_choices(submitted);
            chosen.len() == key_ids.len()
                && key_ids.iter().all(|id| chosen.contains(&id.as_str()))
        }
        (QuestionKind::Boolean, AnswerKey::Flag(expected)) => {
            // An absent submission counts against the student.
            matches!(submitted, Some(AnswerValue::Flag(b)) if b == expected)
        }
        // Kind/key shape mismatch: data-integrity hazard, graded incorrect.
        _ => false,
    }
}

/// Normalizes a raw answer to a set of option ids, wrapping a scalar into a
/// one-element set. Booleans and empty submissions normalize to no choices.
fn normalize_choices(submitted: Option<&AnswerValue>) -> Vec<&str> {
    match submitted {
        Some(AnswerValue::Scalar(s)) => vec![s.as_str()],
        Some(AnswerValue::Set(ids)) => ids.iter().map(String::as_str).collect(),
        Some(AnswerValue::Flag(_)) | Some(AnswerValue::Empty) | None => Vec::new(),
    }
}

/// Scores a full submission.
///
/// Text questions are excluded from both the numerator and the denominator;
/// an assessment with no gradable points scores 0 rather than dividing by
/// zero.
pub fn score(questions: &[Question], answers: &HashMap<i64, AnswerValue>) -> ScoreOutcome {
    let mut total_points: i64 = 0;
    let mut earned_points: i64 = 0;
    let mut per_question = HashMap::new();

    for question in questions {
        if question.kind == QuestionKind::Text {
            continue;
        }

        total_points += question.points;
        let correct = evaluate(question, answers.get(&question.id));
        if correct {
            earned_points += question.points;
        }
        per_question.insert(question.id, correct);
    }

    let percent = if total_points == 0 {
        0
    } else {
        // Round half up on integer arithmetic.
        (100 * earned_points * 2 + total_points) / (total_points * 2)
    };

    ScoreOutcome {
        percent,
        letter_grade: letter_grade(percent).to_string(),
        per_question,
    }
}

/// Maps a percent score onto a letter grade, inclusive lower bounds.
pub fn letter_grade(percent: i64) -> &'static str {
    match percent {
        p if p >= 90 => "A",
        p if p >= 80 => "B",
        p if p >= 70 => "C",
        p if p >= 60 => "D",
        _ => "F",
    }
}
