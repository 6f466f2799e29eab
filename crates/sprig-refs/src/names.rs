//! Branch name validation following git-style conventions.
//!
//! Valid branch names:
//! - Must be non-empty
//! - Must not contain whitespace, `~`, `^`, `:`, `?`, `*`, `[`, `\`
//! - Must not contain `..`, `@{` or `//`
//! - Must not start or end with `.` or `/`
//! - Must not end with `.lock`

use crate::error::{RefError, Result};

/// Characters that are forbidden anywhere in a branch name.
const FORBIDDEN_CHARS: &[char] = &[' ', '\t', '\n', '\r', '~', '^', ':', '?', '*', '[', '\\'];

/// Substrings that are forbidden anywhere in a branch name.
const FORBIDDEN_SEQUENCES: &[&str] = &["..", "@{", "//"];

/// Validate a branch name, returning `Ok(())` if valid.
///
/// # Examples
///
/// ```
/// use sprig_refs::names::validate_branch_name;
///
/// assert!(validate_branch_name("master").is_ok());
/// assert!(validate_branch_name("feature/auth").is_ok());
/// assert!(validate_branch_name("").is_err());
/// assert!(validate_branch_name("bad..name").is_err());
/// ```
pub fn validate_branch_name(name: &str) -> Result<()> {
    match violation(name) {
        None => Ok(()),
        Some(reason) => Err(RefError::InvalidBranchName {
            name: name.to_string(),
            reason,
        }),
    }
}

fn violation(name: &str) -> Option<String> {
    if name.is_empty() {
        return Some("branch name must not be empty".into());
    }
    if let Some(ch) = name.chars().find(|c| FORBIDDEN_CHARS.contains(c)) {
        return Some(format!("contains forbidden character: {ch:?}"));
    }
    if let Some(seq) = FORBIDDEN_SEQUENCES.iter().find(|s| name.contains(*s)) {
        return Some(format!("must not contain {seq:?}"));
    }
    for edge in ['.', '/'] {
        if name.starts_with(edge) || name.ends_with(edge) {
            return Some(format!("must not start or end with {edge:?}"));
        }
    }
    if name.ends_with(".lock") {
        return Some("must not end with \".lock\"".into());
    }
    None
}
