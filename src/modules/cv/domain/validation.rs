use std::collections::HashSet;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViolationKind {
    /// Field absent, null, or an empty string.
    Required,
    InvalidEnumValue {
        value: String,
        allowed: &'static [&'static str],
    },
    /// Another item earlier in the same list already uses this id.
    DuplicateId { id: String },
    /// Payload could not be read as a CV document at all.
    InvalidType(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    /// Dotted path in the persisted shape, e.g. `educations.0.duration.from`.
    pub path: String,
    pub kind: ViolationKind,
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ViolationKind::Required => write!(f, "{}: field is required", self.path),
            ViolationKind::InvalidEnumValue { value, allowed } => write!(
                f,
                "{}: `{}` is not a valid value (expected one of: {})",
                self.path,
                value,
                allowed.join(", ")
            ),
            ViolationKind::DuplicateId { id } => {
                write!(f, "{}: id `{}` is already used in this list", self.path, id)
            }
            ViolationKind::InvalidType(msg) => write!(f, "{}: {}", self.path, msg),
        }
    }
}

/// Rejection of a whole CV write. Carries every violation found, not only the
/// first one.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("CV validation failed: {}", join_violations(.violations))]
pub struct CvValidationError {
    pub violations: Vec<FieldViolation>,
}

fn join_violations(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl CvValidationError {
    pub fn single(path: impl Into<String>, kind: ViolationKind) -> Self {
        Self {
            violations: vec![FieldViolation {
                path: path.into(),
                kind,
            }],
        }
    }

    pub fn has_violation_at(&self, path: &str) -> bool {
        self.violations.iter().any(|v| v.path == path)
    }

    pub fn paths(&self) -> Vec<&str> {
        self.violations.iter().map(|v| v.path.as_str()).collect()
    }
}

/// Collects violations while a draft is walked. Missing values are replaced
/// with placeholders so the walk can continue; `finish` throws the result away
/// if anything was recorded.
#[derive(Debug, Default)]
pub(crate) struct Validator {
    violations: Vec<FieldViolation>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn report(&mut self, path: impl Into<String>, kind: ViolationKind) {
        self.violations.push(FieldViolation {
            path: path.into(),
            kind,
        });
    }

    pub fn required_text(&mut self, value: Option<String>, path: &str) -> String {
        match value {
            Some(v) if !v.is_empty() => v,
            _ => {
                self.report(path, ViolationKind::Required);
                String::new()
            }
        }
    }

    pub fn required<T>(&mut self, value: Option<T>, path: &str) -> Option<T> {
        if value.is_none() {
            self.report(path, ViolationKind::Required);
        }
        value
    }

    pub fn enum_value<T>(&mut self, value: Option<String>, path: &str) -> T
    where
        T: std::str::FromStr + Default + EnumValues,
    {
        match value {
            None => T::default(),
            Some(raw) => match raw.parse::<T>() {
                Ok(parsed) => parsed,
                Err(_) => {
                    self.report(
                        path,
                        ViolationKind::InvalidEnumValue {
                            value: raw,
                            allowed: T::allowed(),
                        },
                    );
                    T::default()
                }
            },
        }
    }

    /// Flags every id that repeats an earlier one in the same list.
    pub fn unique_ids<'a, I>(&mut self, list: &str, ids: I)
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut seen = HashSet::new();
        for (index, id) in ids.into_iter().enumerate() {
            if id.is_empty() {
                continue;
            }
            if !seen.insert(id) {
                self.report(
                    format!("{list}.{index}.id"),
                    ViolationKind::DuplicateId { id: id.to_string() },
                );
            }
        }
    }

    pub fn finish<T>(self, value: T) -> Result<T, CvValidationError> {
        if self.violations.is_empty() {
            Ok(value)
        } else {
            Err(CvValidationError {
                violations: self.violations,
            })
        }
    }
}

/// Closed string enumerations checked by [`Validator::enum_value`].
pub(crate) trait EnumValues {
    fn allowed() -> &'static [&'static str];
}

impl EnumValues for super::entities::VerificationStatus {
    fn allowed() -> &'static [&'static str] {
        Self::ALLOWED
    }
}
