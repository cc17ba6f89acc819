//! The shared lifecycle status enum for projects, goals, and tasks.
//!
//! Statuses are stored and transmitted as their Korean display strings
//! (진행전 / 진행중 / 완료 / 이슈), matching what the client renders
//! directly. Database columns are plain TEXT; `parse` / `as_str` convert
//! at the boundary.

use serde::{Deserialize, Serialize};

/// Lifecycle status shared by projects, goals, and tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    /// 진행전 -- not started.
    #[serde(rename = "진행전")]
    Pending,
    /// 진행중 -- in progress.
    #[serde(rename = "진행중")]
    InProgress,
    /// 완료 -- complete.
    #[serde(rename = "완료")]
    Complete,
    /// 이슈 -- flagged with an issue; set manually, never by roll-up.
    #[serde(rename = "이슈")]
    Issue,
}

impl Status {
    /// The wire/database string for this status.
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Pending => "진행전",
            Status::InProgress => "진행중",
            Status::Complete => "완료",
            Status::Issue => "이슈",
        }
    }

    /// Parse a wire/database string. Returns `None` for unknown values.
    pub fn parse(s: &str) -> Option<Status> {
        match s {
            "진행전" => Some(Status::Pending),
            "진행중" => Some(Status::InProgress),
            "완료" => Some(Status::Complete),
            "이슈" => Some(Status::Issue),
            _ => None,
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
