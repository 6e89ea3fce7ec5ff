//! Boolean literal parsing.

use crate::error::CastError;

const TRUE_LITERALS: &[&str] = &["y", "yes", "t", "true", "on", "1"];
const FALSE_LITERALS: &[&str] = &["n", "no", "f", "false", "off", "0"];

/// Parses a boolean literal, case-insensitively.
pub fn parse_bool(s: &str) -> Result<bool, CastError> {
    let lower = s.to_lowercase();
    if TRUE_LITERALS.contains(&lower.as_str()) {
        return Ok(true);
    }
    if FALSE_LITERALS.contains(&lower.as_str()) {
        return Ok(false);
    }
    Err(CastError::Bool(s.to_string()))
}
