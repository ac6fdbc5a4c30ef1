//! Question entity: multiple choice, fill in the blank and comprehension.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{
    bounded_text, normalize, optional_text, DomainError, LevelId, QuestionId, Timestamp,
    ValidationError, Violations,
};

pub const MAX_PROMPT_LEN: usize = 1000;
pub const MAX_PASSAGE_LEN: usize = 5000;
pub const MAX_ANSWER_LEN: usize = 200;
pub const MAX_EXPLANATION_LEN: usize = 1000;
pub const MIN_OPTIONS: usize = 2;
pub const MAX_OPTIONS: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    MultipleChoice,
    FillInTheBlank,
    /// Answered after reading an accompanying passage.
    Comprehension,
}

impl QuestionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionKind::MultipleChoice => "multiple_choice",
            QuestionKind::FillInTheBlank => "fill_in_the_blank",
            QuestionKind::Comprehension => "comprehension",
        }
    }
}

impl fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuestionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "multiple_choice" => Ok(QuestionKind::MultipleChoice),
            "fill_in_the_blank" => Ok(QuestionKind::FillInTheBlank),
            "comprehension" => Ok(QuestionKind::Comprehension),
            other => Err(format!("Invalid question kind: {}", other)),
        }
    }
}

/// Unvalidated input for [`Question::new`].
#[derive(Debug, Clone, Default)]
pub struct NewQuestion {
    pub level_id: LevelId,
    pub kind: Option<QuestionKind>,
    pub prompt: String,
    pub passage: Option<String>,
    pub options: Vec<String>,
    pub answer: String,
    pub explanation: Option<String>,
    pub daily_challenge: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub level_id: LevelId,
    pub kind: QuestionKind,
    pub prompt: String,
    pub passage: Option<String>,
    pub options: Vec<String>,
    pub answer: String,
    pub explanation: Option<String>,
    pub daily_challenge: bool,
    pub created_at: Timestamp,
}

impl Question {
    pub fn new(input: NewQuestion) -> Result<Self, DomainError> {
        let kind = input.kind.unwrap_or(QuestionKind::MultipleChoice);
        let mut violations = Violations::new();

        let prompt = violations.check(bounded_text("prompt", &input.prompt, 1, MAX_PROMPT_LEN));
        let answer = violations.check(bounded_text("answer", &input.answer, 1, MAX_ANSWER_LEN));
        let explanation = violations.check(optional_text(
            "explanation",
            input.explanation.as_deref(),
            MAX_EXPLANATION_LEN,
        ));
        let passage = violations.check(optional_text(
            "passage",
            input.passage.as_deref(),
            MAX_PASSAGE_LEN,
        ));

        match (kind, passage.as_ref()) {
            (QuestionKind::Comprehension, Some(None)) => {
                violations.push(ValidationError::empty_field("passage"));
            }
            (QuestionKind::MultipleChoice | QuestionKind::FillInTheBlank, Some(Some(_))) => {
                violations.push(ValidationError::invalid_format(
                    "passage",
                    "only comprehension questions have a passage",
                ));
            }
            _ => {}
        }

        let options = violations.check(check_options(kind, &input.options, answer.as_deref()));
        violations.finish()?;

        match (prompt, answer, explanation, passage, options) {
            (Some(prompt), Some(answer), Some(explanation), Some(passage), Some(options)) => {
                Ok(Self {
                    id: QuestionId::new(),
                    level_id: input.level_id,
                    kind,
                    prompt,
                    passage,
                    options,
                    answer,
                    explanation,
                    daily_challenge: input.daily_challenge,
                    created_at: Timestamp::now(),
                })
            }
            _ => Err(DomainError::internal("question validation inconsistent")),
        }
    }

    /// Compares a submitted answer, ignoring case and extra whitespace.
    pub fn is_correct(&self, given: &str) -> bool {
        normalize(given) == normalize(&self.answer)
    }
}

fn check_options(
    kind: QuestionKind,
    raw: &[String],
    answer: Option<&str>,
) -> Result<Vec<String>, ValidationError> {
    if kind != QuestionKind::MultipleChoice {
        if raw.is_empty() {
            return Ok(Vec::new());
        }
        return Err(ValidationError::invalid_format(
            "options",
            "only multiple choice questions have options",
        ));
    }

    if raw.len() < MIN_OPTIONS || raw.len() > MAX_OPTIONS {
        return Err(ValidationError::out_of_range(
            "options",
            MIN_OPTIONS as i32,
            MAX_OPTIONS as i32,
            raw.len().min(i32::MAX as usize) as i32,
        ));
    }

    let mut seen = HashSet::new();
    let mut options = Vec::with_capacity(raw.len());
    for option in raw {
        let option = bounded_text("options", option, 1, MAX_ANSWER_LEN)?;
        if !seen.insert(normalize(&option)) {
            return Err(ValidationError::invalid_format("options", "must be unique"));
        }
        options.push(option);
    }

    if let Some(answer) = answer {
        if !seen.contains(&normalize(answer)) {
            return Err(ValidationError::invalid_format(
                "answer",
                "must be one of the options",
            ));
        }
    }
    Ok(options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ErrorCode;

    fn multiple_choice() -> NewQuestion {
        NewQuestion {
            level_id: LevelId::new(),
            kind: Some(QuestionKind::MultipleChoice),
            prompt: "How do you say 'cat'?".to_string(),
            options: vec!["gato".to_string(), "perro".to_string(), "pez".to_string()],
            answer: "gato".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn builds_multiple_choice() {
        let question = Question::new(multiple_choice()).unwrap();
        assert_eq!(question.kind, QuestionKind::MultipleChoice);
        assert_eq!(question.options.len(), 3);
    }

    #[test]
    fn answer_must_be_an_option() {
        let mut input = multiple_choice();
        input.answer = "caballo".to_string();
        let err = Question::new(input).unwrap_err();
        assert_eq!(err.reasons, vec!["answer has invalid format: must be one of the options"]);
    }

    #[test]
    fn duplicate_options_rejected() {
        let mut input = multiple_choice();
        input.options = vec!["gato".to_string(), " Gato ".to_string()];
        assert!(Question::new(input).is_err());
    }

    #[test]
    fn comprehension_requires_passage() {
        let input = NewQuestion {
            kind: Some(QuestionKind::Comprehension),
            prompt: "Where does Ana live?".to_string(),
            answer: "Madrid".to_string(),
            ..Default::default()
        };
        let err = Question::new(input).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert_eq!(err.reasons, vec!["passage should not be empty"]);
    }

    #[test]
    fn comprehension_with_passage_builds() {
        let input = NewQuestion {
            kind: Some(QuestionKind::Comprehension),
            prompt: "Where does Ana live?".to_string(),
            passage: Some("Ana vive en Madrid con su hermana.".to_string()),
            answer: "Madrid".to_string(),
            ..Default::default()
        };
        let question = Question::new(input).unwrap();
        assert!(question.passage.is_some());
        assert!(question.options.is_empty());
    }

    #[test]
    fn fill_in_the_blank_rejects_options() {
        let input = NewQuestion {
            kind: Some(QuestionKind::FillInTheBlank),
            prompt: "Yo ___ estudiante".to_string(),
            options: vec!["soy".to_string()],
            answer: "soy".to_string(),
            ..Default::default()
        };
        assert!(Question::new(input).is_err());
    }

    #[test]
    fn is_correct_ignores_case_and_spacing() {
        let question = Question::new(NewQuestion {
            kind: Some(QuestionKind::FillInTheBlank),
            prompt: "Good morning".to_string(),
            answer: "Buenos días".to_string(),
            ..Default::default()
        })
        .unwrap();

        assert!(question.is_correct("  buenos   DÍAS "));
        assert!(!question.is_correct("buenas noches"));
    }
}
