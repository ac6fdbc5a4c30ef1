//! Voice practice attempts and transcript scoring.
//!
//! Speech recognition happens on the client. The server receives the phrase
//! the learner was asked to say together with the recognised transcript and
//! scores how much of the phrase was actually spoken.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    bounded_text, DomainError, Timestamp, UserId, Violations, VoiceAttemptId,
};
use crate::domain::level::language;

pub const MAX_TEXT_LEN: usize = 1000;

/// Outcome of comparing a transcript against the expected phrase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VoiceScore {
    /// Percentage of expected words spoken in order, `0..=100`.
    pub accuracy: u8,
    pub missing_words: Vec<String>,
}

fn words(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(|w| {
            w.chars()
                .filter(|c| c.is_alphanumeric())
                .flat_map(char::to_lowercase)
                .collect::<String>()
        })
        .filter(|w| !w.is_empty())
        .collect()
}

/// Word-level longest common subsequence score.
pub fn score(expected: &str, transcript: &str) -> VoiceScore {
    let expected = words(expected);
    let spoken = words(transcript);
    if expected.is_empty() {
        return VoiceScore {
            accuracy: 0,
            missing_words: Vec::new(),
        };
    }

    let (n, m) = (expected.len(), spoken.len());
    let mut table = vec![vec![0usize; m + 1]; n + 1];
    for i in (0..n).rev() {
        for j in (0..m).rev() {
            table[i][j] = if expected[i] == spoken[j] {
                table[i + 1][j + 1] + 1
            } else {
                table[i + 1][j].max(table[i][j + 1])
            };
        }
    }

    // Walk the table to find which expected words were matched.
    let mut missing_words = Vec::new();
    let (mut i, mut j) = (0, 0);
    while i < n {
        if j < m && expected[i] == spoken[j] {
            i += 1;
            j += 1;
        } else if j < m && table[i][j + 1] >= table[i + 1][j] {
            j += 1;
        } else {
            missing_words.push(expected[i].clone());
            i += 1;
        }
    }

    let matched = table[0][0];
    let accuracy = ((matched as f64 * 100.0) / n as f64).round() as u8;
    VoiceScore {
        accuracy,
        missing_words,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceAttempt {
    pub id: VoiceAttemptId,
    pub user_id: UserId,
    pub language: String,
    pub expected_text: String,
    pub transcript: String,
    pub accuracy: u8,
    pub missing_words: Vec<String>,
    pub created_at: Timestamp,
}

impl VoiceAttempt {
    /// Validates the texts and scores the attempt.
    pub fn record(
        user_id: UserId,
        language_code: &str,
        expected_text: &str,
        transcript: &str,
    ) -> Result<Self, DomainError> {
        let mut violations = Violations::new();
        let lang = violations.check(language(language_code));
        let expected =
            violations.check(bounded_text("expected_text", expected_text, 1, MAX_TEXT_LEN));
        let transcript =
            violations.check(bounded_text("transcript", transcript, 1, MAX_TEXT_LEN));
        violations.finish()?;

        let (Some(language), Some(expected_text), Some(transcript)) = (lang, expected, transcript)
        else {
            return Err(DomainError::internal("voice attempt validation inconsistent"));
        };

        let VoiceScore {
            accuracy,
            missing_words,
        } = score(&expected_text, &transcript);

        Ok(Self {
            id: VoiceAttemptId::new(),
            user_id,
            language,
            expected_text,
            transcript,
            accuracy,
            missing_words,
            created_at: Timestamp::now(),
        })
    }
}
