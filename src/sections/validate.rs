use serde_json::{Map, Value};

use crate::foundation::error::{PathElem, ReelError, ReelResult, ValidationErrors, ValidationIssue};
use crate::sections::model::{DEFAULT_SECTION_SECS, SectionDescriptor};
use crate::sections::registry::ComponentRegistry;

const TYPE_KEY: &str = "type";
const DURATION_KEYS: [&str; 2] = ["duration", "durationSeconds"];
const PROPERTIES_KEY: &str = "properties";
/// snake_case spellings accepted for camelCase property keys.
const KEY_ALIASES: [(&str, &str); 5] = [
    ("left_title", "leftTitle"),
    ("right_title", "rightTitle"),
    ("left_points", "leftPoints"),
    ("right_points", "rightPoints"),
    ("call_to_action", "callToAction"),
];

/// A raw presentation request: an optional title plus untyped section objects.
///
/// Sections stay as JSON until [`validate_request`] resolves them against a registry, so every
/// problem can be reported with its location.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct VideoRequest {
    /// Presentation title (informational).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Section objects in presentation order.
    pub sections: Vec<Value>,
}

impl VideoRequest {
    /// Request from already-decoded JSON.
    pub fn from_value(value: &Value) -> ReelResult<Self> {
        let Value::Object(obj) = value else {
            return Err(ReelError::validation("request must be a JSON object"));
        };

        let mut issues = Vec::new();
        let title = match obj.get("title") {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(_) => {
                issues.push(ValidationIssue::at(
                    &[PathElem::Field("title".to_owned())],
                    "title must be a string",
                ));
                None
            }
        };
        let sections = match obj.get("sections") {
            Some(Value::Array(items)) => items.clone(),
            _ => {
                issues.push(ValidationIssue::at(
                    &[PathElem::Field("sections".to_owned())],
                    "sections array is required",
                ));
                Vec::new()
            }
        };

        if !issues.is_empty() {
            return Err(ReelError::Validation(ValidationErrors { issues }));
        }
        Ok(Self { title, sections })
    }

    /// Request from JSON text.
    pub fn from_json_str(s: &str) -> ReelResult<Self> {
        let value: Value = serde_json::from_str(s)?;
        Self::from_value(&value)
    }
}

/// Normalize every section of `request` against `registry`.
///
/// Problems across the whole batch are collected into one [`ReelError::Validation`]; a single
/// issue rejects the batch. The registry is only read.
pub fn validate_request(
    registry: &ComponentRegistry,
    request: &VideoRequest,
) -> ReelResult<Vec<SectionDescriptor>> {
    let mut issues = Vec::new();
    let mut out = Vec::with_capacity(request.sections.len());

    for (i, raw) in request.sections.iter().enumerate() {
        let path = [PathElem::Field("sections".to_owned()), PathElem::Index(i)];
        if let Some(d) = validate_section(registry, raw, &path, &mut issues) {
            out.push(d);
        }
    }

    if !issues.is_empty() {
        tracing::debug!(issues = issues.len(), "request rejected");
        return Err(ReelError::Validation(ValidationErrors { issues }));
    }
    Ok(out)
}

fn validate_section(
    registry: &ComponentRegistry,
    raw: &Value,
    path: &[PathElem],
    issues: &mut Vec<ValidationIssue>,
) -> Option<SectionDescriptor> {
    let Value::Object(obj) = raw else {
        issues.push(ValidationIssue::at(path, "section must be an object"));
        return None;
    };

    let type_path = child(path, TYPE_KEY);
    let template = match obj.get(TYPE_KEY) {
        None | Some(Value::Null) => {
            issues.push(ValidationIssue::at(&type_path, "section type is required"));
            None
        }
        Some(Value::String(tag)) => {
            let t = registry.lookup(tag);
            if t.is_none() {
                issues.push(ValidationIssue::at(
                    &type_path,
                    format!("unknown section type '{tag}'"),
                ));
            }
            t
        }
        Some(_) => {
            issues.push(ValidationIssue::at(&type_path, "section type must be a string"));
            None
        }
    };

    let duration = section_duration(obj, path, issues);
    let bag = property_bag(obj, path, issues);

    let (template, duration_secs, bag) = (template?, duration?, bag?);
    match template.parse(&bag) {
        Ok(props) => Some(SectionDescriptor {
            tag: template.tag().to_owned(),
            duration_secs,
            props,
        }),
        Err(e) => {
            let at = if obj.get(PROPERTIES_KEY).is_some_and(Value::is_object) {
                child(path, PROPERTIES_KEY)
            } else {
                path.to_vec()
            };
            issues.push(ValidationIssue::at(&at, format!("invalid properties: {e}")));
            None
        }
    }
}

fn section_duration(
    obj: &Map<String, Value>,
    path: &[PathElem],
    issues: &mut Vec<ValidationIssue>,
) -> Option<f64> {
    let Some((key, v)) = DURATION_KEYS
        .iter()
        .find_map(|k| obj.get(*k).filter(|v| !v.is_null()).map(|v| (*k, v)))
    else {
        return Some(DEFAULT_SECTION_SECS);
    };

    match v.as_f64() {
        Some(secs) if secs.is_finite() && secs > 0.0 => Some(secs),
        Some(_) => {
            issues.push(ValidationIssue::at(
                &child(path, key),
                "duration must be a positive number of seconds",
            ));
            None
        }
        None => {
            issues.push(ValidationIssue::at(&child(path, key), "duration must be a number"));
            None
        }
    }
}

// Flat keys first, then nested `properties` on top.
fn property_bag(
    obj: &Map<String, Value>,
    path: &[PathElem],
    issues: &mut Vec<ValidationIssue>,
) -> Option<Map<String, Value>> {
    let mut bag: Map<String, Value> = obj
        .iter()
        .filter(|(k, _)| {
            let k = k.as_str();
            k != TYPE_KEY && k != PROPERTIES_KEY && !DURATION_KEYS.contains(&k)
        })
        .map(|(k, v)| (canonical_key(k).to_owned(), v.clone()))
        .collect();

    match obj.get(PROPERTIES_KEY) {
        None | Some(Value::Null) => {}
        Some(Value::Object(nested)) => {
            for (k, v) in nested {
                bag.insert(canonical_key(k).to_owned(), v.clone());
            }
        }
        Some(_) => {
            issues.push(ValidationIssue::at(
                &child(path, PROPERTIES_KEY),
                "properties must be an object",
            ));
            return None;
        }
    }
    Some(bag)
}

fn canonical_key(key: &str) -> &str {
    KEY_ALIASES
        .iter()
        .find(|(alias, _)| *alias == key)
        .map_or(key, |(_, canonical)| *canonical)
}

fn child(path: &[PathElem], field: &str) -> Vec<PathElem> {
    let mut p = path.to_vec();
    p.push(PathElem::Field(field.to_owned()));
    p
}

#[cfg(test)]
#[path = "../../tests/unit/sections/validate.rs"]
mod tests;
