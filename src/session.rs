//! Session state carried between steps of one run
//!
//! Values are only ever added. Registration fills in the credentials,
//! review and comment creation fill in the entity ids, and nothing is
//! cleared until the process exits.

use chrono::Local;
use serde_json::Value;
use std::fmt;

/// A session value a step consumes or produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Requirement {
    Token,
    UserId,
    Username,
    ReviewId,
    CommentId,
}

impl Requirement {
    pub fn describe(&self) -> &'static str {
        match self {
            Requirement::Token => "authentication token",
            Requirement::UserId => "user ID",
            Requirement::Username => "registered user",
            Requirement::ReviewId => "review ID",
            Requirement::CommentId => "comment ID",
        }
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// Mutable state for a single harness run
#[derive(Debug, Clone)]
pub struct Session {
    /// Timestamp-derived suffix that makes this run's test user unique
    pub run_id: String,
    pub token: Option<String>,
    pub user_id: Option<String>,
    pub username: Option<String>,
    pub review_id: Option<String>,
    pub comment_id: Option<String>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Start a session whose run id is the current local time as `HHMMSS`
    pub fn new() -> Self {
        Self::with_run_id(Local::now().format("%H%M%S").to_string())
    }

    pub fn with_run_id(run_id: impl Into<String>) -> Self {
        Self {
            run_id: run_id.into(),
            token: None,
            user_id: None,
            username: None,
            review_id: None,
            comment_id: None,
        }
    }

    pub fn has(&self, requirement: Requirement) -> bool {
        match requirement {
            Requirement::Token => self.token.is_some(),
            Requirement::UserId => self.user_id.is_some(),
            Requirement::Username => self.username.is_some(),
            Requirement::ReviewId => self.review_id.is_some(),
            Requirement::CommentId => self.comment_id.is_some(),
        }
    }

    /// Requirements from `required` that are not yet satisfied, in order
    pub fn missing(&self, required: &[Requirement]) -> Vec<Requirement> {
        required.iter().copied().filter(|r| !self.has(*r)).collect()
    }

    /// Store the credentials returned by a successful registration
    pub fn authenticate(&mut self, token: String, user_id: String, username: String) {
        self.token = Some(token);
        self.user_id = Some(user_id);
        self.username = Some(username);
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }
}

/// Render an identifier that may arrive as a JSON string or number
pub fn id_from_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Precondition detail for a step whose inputs are missing
pub fn missing_detail(missing: &[Requirement]) -> String {
    let names: Vec<&str> = missing.iter().map(Requirement::describe).collect();
    match names.as_slice() {
        [] => "- Preconditions satisfied".to_string(),
        [only] => format!("- Missing {only}"),
        [init @ .., last] => format!("- Missing {} and {last}", init.join(", ")),
    }
}
