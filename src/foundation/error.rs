use std::fmt;

/// Convenience result type used across slidereel.
pub type ReelResult<T> = Result<T, ReelError>;

/// Top-level error taxonomy used by compiler and job APIs.
#[derive(thiserror::Error, Debug)]
pub enum ReelError {
    /// Invalid user-provided request data. Raised before any job exists.
    #[error("validation error: {0}")]
    Validation(ValidationErrors),

    /// Internal invariant violated while assembling a timeline or advancing a job.
    #[error("assembly error: {0}")]
    Assembly(String),

    /// Malformed keyframe curves.
    #[error("animation error: {0}")]
    Animation(String),

    /// Failure reported by the external renderer.
    #[error("render error: {0}")]
    Render(String),

    /// Unknown job identifier.
    #[error("not found: {0}")]
    NotFound(String),

    /// Invalid configuration file or values.
    #[error("config error: {0}")]
    Config(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ReelError {
    /// Build a [`ReelError::Validation`] value with a single root-level issue.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(ValidationErrors::single(ValidationIssue::root(msg)))
    }

    /// Build a [`ReelError::Assembly`] value.
    pub fn assembly(msg: impl Into<String>) -> Self {
        Self::Assembly(msg.into())
    }

    /// Build a [`ReelError::Animation`] value.
    pub fn animation(msg: impl Into<String>) -> Self {
        Self::Animation(msg.into())
    }

    /// Build a [`ReelError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`ReelError::NotFound`] value.
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Build a [`ReelError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`ReelError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Structured validation issues, when this is a validation error.
    pub fn validation_issues(&self) -> Option<&[ValidationIssue]> {
        match self {
            Self::Validation(v) => Some(&v.issues),
            _ => None,
        }
    }
}

/// One element of a JSON path into the submitted request.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(untagged)]
pub enum PathElem {
    /// Object field.
    Field(String),
    /// Array index.
    Index(usize),
}

/// A single problem found while validating a request.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ValidationIssue {
    /// Location of the offending value (`$.sections[2].type`).
    #[serde(serialize_with = "serialize_path")]
    pub path: Vec<PathElem>,
    /// Human readable description.
    pub message: String,
}

impl ValidationIssue {
    /// Issue located at `path`.
    pub fn at(path: &[PathElem], message: impl Into<String>) -> Self {
        Self {
            path: path.to_vec(),
            message: message.into(),
        }
    }

    /// Issue without a location.
    pub fn root(message: impl Into<String>) -> Self {
        Self {
            path: Vec::new(),
            message: message.into(),
        }
    }

    /// Render `path` as `$.a[0].b`.
    pub fn path_string(&self) -> String {
        format_path(&self.path)
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            return write!(f, "{}", self.message);
        }
        write!(f, "{}: {}", format_path(&self.path), self.message)
    }
}

fn format_path(path: &[PathElem]) -> String {
    let mut s = String::from("$");
    for p in path {
        match p {
            PathElem::Field(name) => {
                s.push('.');
                s.push_str(name);
            }
            PathElem::Index(i) => {
                s.push('[');
                s.push_str(&i.to_string());
                s.push(']');
            }
        }
    }
    s
}

fn serialize_path<S>(path: &[PathElem], s: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    s.serialize_str(&format_path(path))
}

/// Every issue found in one request. Non-empty whenever it is surfaced as an error.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ValidationErrors {
    /// Issues in request order.
    pub issues: Vec<ValidationIssue>,
}

impl ValidationErrors {
    /// Wrap a single issue.
    pub fn single(issue: ValidationIssue) -> Self {
        Self {
            issues: vec![issue],
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, e) in self.issues.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{e}")?;
        }
        Ok(())
    }
}

impl From<serde_json::Error> for ReelError {
    fn from(e: serde_json::Error) -> Self {
        Self::serde(e.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
