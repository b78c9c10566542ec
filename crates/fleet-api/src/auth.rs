//! Session gate for the dashboard login screen.
//!
//! Validates the operator's display name and work code. Rejection
//! never touches fleet state; a session just fails to open.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Required work-code prefix
const WORK_CODE_PREFIX: &str = "TRA-";
/// Digits required after the prefix
const WORK_CODE_DIGITS: usize = 5;

/// Login form payload
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub name: String,
    #[serde(default)]
    pub department: String,
    pub work_code: String,
}

/// An authenticated operator session
#[derive(Debug, Clone, Serialize)]
pub struct OperatorSession {
    pub token: Uuid,
    pub name: String,
    pub department: String,
    pub logged_in_at: DateTime<Utc>,
}

impl OperatorSession {
    pub fn new(name: impl Into<String>, department: impl Into<String>) -> Self {
        Self {
            token: Uuid::new_v4(),
            name: name.into(),
            department: department.into(),
            logged_in_at: Utc::now(),
        }
    }
}

/// Validate a login request, returning the rejection message on failure
pub fn validate_login(request: &LoginRequest) -> Result<(), String> {
    if !is_valid_name(&request.name) {
        return Err("Name must contain only letters and must not be empty.".to_string());
    }
    if !is_valid_work_code(&request.work_code) {
        return Err("Work code must match the format TRA-12345 (5 digits).".to_string());
    }
    Ok(())
}

/// Letters and spaces only, and at least one letter
fn is_valid_name(name: &str) -> bool {
    let stripped: String = name.chars().filter(|c| !c.is_whitespace()).collect();
    !stripped.is_empty() && stripped.chars().all(|c| c.is_alphabetic())
}

/// `TRA-` followed by exactly 5 ASCII digits
fn is_valid_work_code(code: &str) -> bool {
    let Some(digits) = code.strip_prefix(WORK_CODE_PREFIX) else {
        return false;
    };
    digits.len() == WORK_CODE_DIGITS && digits.chars().all(|c| c.is_ascii_digit())
}

// ============================================================================
// TESTS
// ============================================================================
