// src/models/catalog.rs

use std::fmt;

use serde::{Deserialize, Serialize};

/// Teaching product line. Partitions the question bank.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, sqlx::Type,
)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum Kit {
    Eduplay,
    Cretile,
    Pictoblocks,
}

/// Difficulty tier within a kit.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, sqlx::Type,
)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum Level {
    Junior,
    Intermediate,
    Advance,
}

impl Kit {
    pub const ALL: [Kit; 3] = [Kit::Eduplay, Kit::Cretile, Kit::Pictoblocks];

    pub fn as_str(&self) -> &'static str {
        match self {
            Kit::Eduplay => "eduplay",
            Kit::Cretile => "cretile",
            Kit::Pictoblocks => "pictoblocks",
        }
    }
}

impl Level {
    pub const ALL: [Level; 3] = [Level::Junior, Level::Intermediate, Level::Advance];

    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Junior => "junior",
            Level::Intermediate => "intermediate",
            Level::Advance => "advance",
        }
    }
}

impl fmt::Display for Kit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Query-string selector for a (kit, level) partition.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Partition {
    pub kit: Kit,
    pub level: Level,
}
