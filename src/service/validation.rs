//! Declarative field rules and request validation.

use crate::error::{AppError, FieldError};
use serde_json::{Map, Value};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Integer,
    Number,
    Boolean,
}

#[derive(Clone, Debug)]
pub struct FieldRule {
    pub kind: FieldKind,
    pub required: bool,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub minimum: Option<f64>,
    pub maximum: Option<f64>,
}

impl FieldRule {
    fn of(kind: FieldKind) -> Self {
        FieldRule {
            kind,
            required: false,
            min_length: None,
            max_length: None,
            minimum: None,
            maximum: None,
        }
    }

    pub fn text() -> Self {
        Self::of(FieldKind::Text)
    }

    pub fn integer() -> Self {
        Self::of(FieldKind::Integer)
    }

    pub fn number() -> Self {
        Self::of(FieldKind::Number)
    }

    pub fn boolean() -> Self {
        Self::of(FieldKind::Boolean)
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn length(mut self, min: Option<usize>, max: Option<usize>) -> Self {
        self.min_length = min;
        self.max_length = max;
        self
    }

    pub fn range(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.minimum = min;
        self.maximum = max;
        self
    }

    /// Check one present, non-null value. Returns the first violated constraint.
    pub fn check(&self, v: &Value) -> Option<String> {
        match self.kind {
            FieldKind::Text => {
                let s = match v.as_str() {
                    Some(s) => s,
                    None => return Some("must be a string".into()),
                };
                // Lengths count characters, not bytes.
                let len = s.chars().count();
                if let Some(min) = self.min_length {
                    if len < min {
                        return Some(format!("must be at least {} characters", min));
                    }
                }
                if let Some(max) = self.max_length {
                    if len > max {
                        return Some(format!("must be at most {} characters", max));
                    }
                }
                None
            }
            FieldKind::Integer | FieldKind::Number => {
                let n = match v {
                    Value::Number(n) if self.kind == FieldKind::Number => n.as_f64(),
                    Value::Number(n) if n.is_i64() || n.is_u64() => n.as_f64(),
                    _ if self.kind == FieldKind::Integer => return Some("must be an integer".into()),
                    _ => return Some("must be a number".into()),
                };
                let Some(n) = n else {
                    return Some("must be a number".into());
                };
                if let Some(min) = self.minimum {
                    if n < min {
                        return Some(format!("must be at least {}", min));
                    }
                }
                if let Some(max) = self.maximum {
                    if n > max {
                        return Some(format!("must be at most {}", max));
                    }
                }
                None
            }
            FieldKind::Boolean => {
                if v.is_boolean() {
                    None
                } else {
                    Some("must be a boolean".into())
                }
            }
        }
    }
}

/// Field rules for one entity, checked in declaration order.
#[derive(Clone, Debug)]
pub struct EntitySchema {
    pub name: &'static str,
    pub fields: Vec<(&'static str, FieldRule)>,
}

impl EntitySchema {
    pub fn new(name: &'static str) -> Self {
        EntitySchema {
            name,
            fields: Vec::new(),
        }
    }

    pub fn field(mut self, name: &'static str, rule: FieldRule) -> Self {
        self.fields.push((name, rule));
        self
    }

    pub fn rule(&self, field: &str) -> Option<&FieldRule> {
        self.fields.iter().find(|(n, _)| *n == field).map(|(_, r)| r)
    }

    /// Validate a request body. Every violated field is reported; unknown keys are ignored.
    pub fn validate(&self, body: &Map<String, Value>) -> Result<(), AppError> {
        let mut errors = Vec::new();
        for (name, rule) in &self.fields {
            match body.get(*name) {
                None | Some(Value::Null) => {
                    if rule.required {
                        errors.push(FieldError::new(*name, "field required"));
                    }
                }
                Some(v) => {
                    if let Some(message) = rule.check(v) {
                        errors.push(FieldError::new(*name, message));
                    }
                }
            }
        }
        if errors.is_empty() {
            Ok(())
        } else {
            tracing::debug!(entity = self.name, ?errors, "validation failed");
            Err(AppError::Validation(errors))
        }
    }

    /// Validate a single value (query or path parameter) against the named field's rule.
    pub fn validate_value(&self, field: &str, v: &Value) -> Result<(), AppError> {
        match self.rule(field).and_then(|rule| rule.check(v)) {
            Some(message) => Err(AppError::invalid(field, message)),
            None => Ok(()),
        }
    }
}
