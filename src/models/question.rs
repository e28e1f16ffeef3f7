// src/models/question.rs

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Discriminant for the unified question model.
///
/// `Single`/`Multiple` carry options and an option-id answer key, `Boolean`
/// carries a bare true/false key with no options, and `Text` is free-form and
/// never auto-graded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    Single,
    Multiple,
    Text,
    Boolean,
}

/// One selectable option of a choice question.
/// Immutable once an attempt references it; editing options after attempts
/// exist invalidates historical grading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerOption {
    pub id: String,
    pub text: String,
}

/// The correct-answer data attached to a gradable question.
/// `Choice` holds a set of option ids, `Flag` a bare boolean. Absent entirely
/// for `Text` questions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerKey {
    Flag(bool),
    Choice(Vec<String>),
}

/// A raw answer as submitted by a client.
///
/// The wire shapes are heterogeneous (`"a"`, `["a","b"]`, `true`, `null`), so
/// this is an untagged union the evaluator can match exhaustively instead of
/// sniffing JSON value types at grading time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Flag(bool),
    Set(Vec<String>),
    Scalar(String),
    Empty,
}

/// A gradable question, owned by its assessment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    /// Unique within the owning assessment, assigned by the server.
    pub id: i64,

    pub prompt: String,

    pub kind: QuestionKind,

    /// Empty for `Text`/`Boolean`.
    #[serde(default)]
    pub options: Vec<AnswerOption>,

    /// `None` for `Text` (ungraded).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer_key: Option<AnswerKey>,

    /// Non-negative weight; ignored for `Text`, which never enters scoring.
    pub points: i64,
}

/// DTO for sending a question to students (excludes the answer key).
#[derive(Debug, Serialize)]
pub struct PublicQuestion {
    pub id: i64,
    pub prompt: String,
    pub kind: QuestionKind,
    pub options: Vec<AnswerOption>,
    pub points: i64,
}

impl From<&Question> for PublicQuestion {
    fn from(q: &Question) -> Self {
        PublicQuestion {
            id: q.id,
            prompt: q.prompt.clone(),
            kind: q.kind,
            options: q.options.clone(),
            points: q.points,
        }
    }
}

/// DTO for authoring a question as part of assessment creation.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateQuestionRequest {
    #[validate(length(min = 1, max = 2000))]
    pub prompt: String,
    pub kind: QuestionKind,
    #[serde(default)]
    pub options: Vec<AnswerOption>,
    #[serde(default)]
    pub answer_key: Option<AnswerKey>,
    pub points: i64,
}

impl CreateQuestionRequest {
    /// Cross-field consistency checks the `validator` derive cannot express.
    ///
    /// * `Single`: exactly one key option, present in `options`.
    /// * `Multiple`: non-empty key, every key option present in `options`.
    /// * `Boolean`: boolean key, no options.
    /// * `Text`: no key (ungraded).
    /// * `points` must be non-negative for every kind.
    pub fn check_consistency(&self) -> Result<(), String> {
        if self.points < 0 {
            return Err("points must be non-negative".to_string());
        }

        match self.kind {
            QuestionKind::Single | QuestionKind::Multiple => {
                if self.options.is_empty() {
                    return Err("choice questions need at least one option".to_string());
                }
                let key = match &self.answer_key {
                    Some(AnswerKey::Choice(ids)) => ids,
                    Some(AnswerKey::Flag(_)) => {
                        return Err("choice questions need an option-id answer key".to_string());
                    }
                    None => return Err("choice questions need an answer key".to_string()),
                };
                if self.kind == QuestionKind::Single && key.len() != 1 {
                    return Err("single-choice answer key must hold exactly one option".to_string());
                }
                if key.is_empty() {
                    return Err("multiple-choice answer key must not be empty".to_string());
                }
                for id in key {
                    if !self.options.iter().any(|o| &o.id == id) {
                        return Err(format!("answer key references unknown option '{}'", id));
                    }
                }
            }
            QuestionKind::Boolean => {
                if !self.options.is_empty() {
                    return Err("boolean questions carry no options".to_string());
                }
                if !matches!(self.answer_key, Some(AnswerKey::Flag(_))) {
                    return Err("boolean questions need a true/false answer key".to_string());
                }
            }
            QuestionKind::Text => {
                if self.answer_key.is_some() {
                    return Err("text questions are not auto-graded and take no key".to_string());
                }
            }
        }

        Ok(())
    }
}
