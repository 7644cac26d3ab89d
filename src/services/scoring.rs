// src/services/scoring.rs

use crate::models::question::Question;

/// Outcome of comparing one submission with an answer key.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Score {
    pub score: i64,
    pub total: i64,
    pub percentage: f64,
}

/// Rounds to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Scores answers against the answer key by position.
///
/// Answer `i` is checked against question `i` of the *current* list; question
/// ids are not consulted. Extra answers are ignored, missing or `None` answers
/// count as wrong. `total` is the number of questions, never the number of answers.
pub fn score_answers(questions: &[Question], answers: &[Option<String>]) -> Score {
    let total = questions.len() as i64;

    let score = questions
        .iter()
        .zip(answers)
        .filter(|(q, ans)| ans.as_deref() == Some(q.correct_answer.as_str()))
        .count() as i64;

    Score {
        score,
        total,
        percentage: percentage(score, total),
    }
}

/// `round(100 * score / total, 2)`, or 0.0 when there is nothing to score.
pub fn percentage(score: i64, total: i64) -> f64 {
    if total <= 0 {
        return 0.0;
    }
    round2(score as f64 / total as f64 * 100.0)
}
