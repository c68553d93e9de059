// Declarative checks applied to decoded payloads after the shape itself parsed.

use serde::Serialize;
use std::fmt;

use crate::domain::time::is_hh_mm;

/// First failing check: dotted path into the payload plus a reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    pub path: String,
    pub message: String,
}

impl ValidationIssue {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }

    // Prefix the path with the parent segment ("stats" + "longestActivity.minutes").
    pub fn under(self, parent: impl fmt::Display) -> Self {
        let path = if self.path.is_empty() {
            parent.to_string()
        } else {
            format!("{parent}.{}", self.path)
        };
        Self {
            path,
            message: self.message,
        }
    }

    /// Path used when reporting; never empty.
    pub fn field(&self) -> &str {
        if self.path.is_empty() {
            "unknown"
        } else {
            &self.path
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field(), self.message)
    }
}

pub trait Validate {
    fn validate(&self) -> Result<(), ValidationIssue>;
}

impl<T: Validate> Validate for Vec<T> {
    fn validate(&self) -> Result<(), ValidationIssue> {
        for (index, item) in self.iter().enumerate() {
            item.validate().map_err(|issue| issue.under(index))?;
        }
        Ok(())
    }
}

impl<T: Validate> Validate for Option<T> {
    fn validate(&self) -> Result<(), ValidationIssue> {
        match self {
            Some(inner) => inner.validate(),
            None => Ok(()),
        }
    }
}

// Endpoints without a body still flow through the same decoder.
impl Validate for () {
    fn validate(&self) -> Result<(), ValidationIssue> {
        Ok(())
    }
}

pub fn non_empty(path: &str, value: &str) -> Result<(), ValidationIssue> {
    if value.is_empty() {
        return Err(ValidationIssue::new(path, "String must contain at least 1 character(s)"));
    }
    Ok(())
}

pub fn at_least(path: &str, value: f64, min: f64) -> Result<(), ValidationIssue> {
    if value < min {
        return Err(ValidationIssue::new(
            path,
            format!("Number must be greater than or equal to {min}"),
        ));
    }
    Ok(())
}

pub fn at_most(path: &str, value: f64, max: f64) -> Result<(), ValidationIssue> {
    if value > max {
        return Err(ValidationIssue::new(
            path,
            format!("Number must be less than or equal to {max}"),
        ));
    }
    Ok(())
}

pub fn positive(path: &str, value: f64) -> Result<(), ValidationIssue> {
    if value <= 0.0 {
        return Err(ValidationIssue::new(path, "Number must be greater than 0"));
    }
    Ok(())
}

pub fn max_items<T>(path: &str, items: &[T], max: usize) -> Result<(), ValidationIssue> {
    if items.len() > max {
        return Err(ValidationIssue::new(
            path,
            format!("Array must contain at most {max} element(s)"),
        ));
    }
    Ok(())
}

pub fn hh_mm(path: &str, value: &str) -> Result<(), ValidationIssue> {
    if !is_hh_mm(value) {
        return Err(ValidationIssue::new(path, "Invalid time, expected HH:mm"));
    }
    Ok(())
}

pub fn optional_hh_mm(path: &str, value: Option<&str>) -> Result<(), ValidationIssue> {
    match value {
        Some(value) => hh_mm(path, value),
        None => Ok(()),
    }
}
