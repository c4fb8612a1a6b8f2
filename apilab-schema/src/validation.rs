use serde::Serialize;

/// One failed constraint, shaped like the `detail` entries of a 422 response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub loc: Vec<String>,
    pub msg: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl Violation {
    pub fn new(loc: &[&str], msg: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            loc: loc.iter().map(|s| (*s).to_string()).collect(),
            msg: msg.into(),
            kind: kind.into(),
        }
    }
}

/// Field-level constraints that serde alone cannot express.
pub trait Validate {
    fn validate(&self) -> Result<(), Vec<Violation>>;
}

/// Checks `value` holds between `min` and `max` characters (inclusive).
///
/// Length is counted in Unicode scalar values, not bytes.
pub fn check_length(
    loc: &[&str],
    value: &str,
    min: usize,
    max: usize,
    violations: &mut Vec<Violation>,
) {
    let len = value.chars().count();
    if len < min {
        violations.push(Violation::new(
            loc,
            format!("String should have at least {min} characters"),
            "string_too_short",
        ));
    } else if len > max {
        violations.push(Violation::new(
            loc,
            format!("String should have at most {max} characters"),
            "string_too_long",
        ));
    }
}

pub(crate) fn finish(violations: Vec<Violation>) -> Result<(), Vec<Violation>> {
    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}
