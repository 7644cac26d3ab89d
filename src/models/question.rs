// src/models/question.rs

use serde::{Deserialize, Serialize};
use sqlx::{prelude::FromRow, types::Json};
use validator::Validate;

use crate::models::catalog::{Kit, Level};

/// Represents the 'questions' table in the database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Question {
    pub id: i64,

    pub kit: Kit,

    pub level: Level,

    /// The text shown to the teacher.
    pub prompt: String,

    /// Choices in display order. Stored as a JSON array in the database.
    pub options: Json<Vec<String>>,

    /// The answer key. Compared verbatim against submitted answers.
    pub correct_answer: String,
}

/// DTO for sending a question to the test taker (excludes the answer key).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicQuestion {
    pub id: i64,
    pub prompt: String,
    pub options: Vec<String>,
}

impl From<Question> for PublicQuestion {
    fn from(q: Question) -> Self {
        Self {
            id: q.id,
            prompt: q.prompt,
            options: q.options.0,
        }
    }
}

/// Fields of a question before it has been assigned an id.
#[derive(Debug, Clone)]
pub struct NewQuestion {
    pub kit: Kit,
    pub level: Level,
    pub prompt: String,
    pub options: Vec<String>,
    pub correct_answer: String,
}

/// DTO for creating a new question.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateQuestionRequest {
    pub kit: Kit,
    pub level: Level,
    #[validate(length(min = 1, max = 1000))]
    pub prompt: String,
    #[validate(custom(function = validate_options))]
    pub options: Vec<String>,
    #[validate(length(min = 1, max = 500))]
    pub correct_answer: String,
}

fn validate_options(options: &[String]) -> Result<(), validator::ValidationError> {
    if options.is_empty() {
        return Err(validator::ValidationError::new("options_cannot_be_empty"));
    }
    for opt in options {
        if opt.is_empty() || opt.len() > 500 {
            return Err(validator::ValidationError::new("option_length"));
        }
    }
    Ok(())
}

/// DTO for clearing a (kit, level) partition.
#[derive(Debug, Deserialize)]
pub struct ResetQuestionsRequest {
    pub kit: Kit,
    pub level: Level,
}
