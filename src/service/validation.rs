//! Request validation from column specs.

use crate::error::{AppError, FieldError};
use crate::schema::{Attributes, ColumnSpec, EntitySchema, WriteMode};
use serde_json::Value;

pub struct RequestValidator;

impl RequestValidator {
    /// Validate a write body against the schema. Create requires every required column;
    /// update requires at least one attribute. All violations are reported together.
    pub fn validate(schema: &EntitySchema, body: &Attributes, mode: WriteMode) -> Result<(), AppError> {
        let mut errors = Vec::new();
        let pk = schema.primary_key().name;

        if mode == WriteMode::Update && body.is_empty() {
            errors.push(FieldError::new("body", "must contain at least one attribute"));
        }

        let mut keys: Vec<&String> = body.keys().collect();
        keys.sort();
        for key in keys {
            if key == pk {
                errors.push(FieldError::new(key.as_str(), "is assigned by the store and cannot be written"));
                continue;
            }
            match schema.column(key) {
                Some(col) => {
                    if let Err(message) = validate_field(schema, col, &body[key]) {
                        errors.push(FieldError::new(key.as_str(), message));
                    }
                }
                None => errors.push(FieldError::new(key.as_str(), "is not a known attribute")),
            }
        }

        if mode == WriteMode::Create {
            for col in schema.columns().iter().filter(|c| c.is_required()) {
                if !body.contains_key(col.name) {
                    errors.push(FieldError::new(col.name, "is required"));
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(errors))
        }
    }
}

fn validate_field(schema: &EntitySchema, col: &ColumnSpec, v: &Value) -> Result<(), String> {
    if v.is_null() {
        return if col.nullable {
            Ok(())
        } else {
            Err("must not be null".into())
        };
    }
    if !col.ty.accepts(v) {
        return Err(format!("must be {}", expected(col)));
    }
    if let Some(s) = v.as_str() {
        if let Some(max) = col.max_length() {
            if s.chars().count() > max as usize {
                return Err(format!("must be at most {} characters", max));
            }
        }
        if let Some(min) = col.min_length {
            if s.trim().chars().count() < min as usize {
                return Err(if min == 1 {
                    "must not be blank".to_string()
                } else {
                    format!("must be at least {} characters", min)
                });
            }
        }
        if let Some(re) = schema.pattern(col.name) {
            if !re.is_match(s) {
                return Err("does not match required pattern".into());
            }
        }
    }
    if let (Some(min), Some(n)) = (col.minimum, v.as_i64()) {
        if n < min {
            return Err(format!("must be at least {}", min));
        }
    }
    Ok(())
}

fn expected(col: &ColumnSpec) -> &'static str {
    if col.ty.is_integer() {
        "an integer"
    } else if col.ty.is_string() {
        "a string"
    } else {
        "a boolean"
    }
}
