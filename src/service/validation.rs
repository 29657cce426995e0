//! Request validation: create payloads and pagination query parameters.

use crate::error::{FieldError, ValidationError};
use crate::model::{NewAnnouncement, PageCursor, PrimaryKey};
use serde_json::Value;
use std::collections::HashMap;

pub const TITLE_MIN: usize = 4;
pub const TITLE_MAX: usize = 2048;
pub const DESCRIPTION_MIN: usize = 4;
/// Length of a `date-time` value produced by `model::format_timestamp`.
pub const DATE_TIME_LEN: usize = 32;
pub const FIRST_CURSOR_PAGE: u32 = 2;

pub const TITLE_PARAM: &str = "title";
pub const DATE_TIME_PARAM: &str = "date-time";
pub const NEXT_PAGE_PARAM: &str = "next-page-number";

/// Length bounds for one string field, in characters.
#[derive(Clone, Copy, Debug)]
struct LengthRule {
    min: usize,
    max: Option<usize>,
}

const TITLE_RULE: LengthRule = LengthRule {
    min: TITLE_MIN,
    max: Some(TITLE_MAX),
};
const DESCRIPTION_RULE: LengthRule = LengthRule {
    min: DESCRIPTION_MIN,
    max: None,
};
const DATE_TIME_RULE: LengthRule = LengthRule {
    min: DATE_TIME_LEN,
    max: Some(DATE_TIME_LEN),
};

impl LengthRule {
    fn check(&self, field: &str, s: &str) -> Option<FieldError> {
        let len = s.chars().count();
        match self.max {
            Some(max) if max == self.min && len != max => Some(FieldError::new(
                field,
                format!("must be exactly {} characters", max),
            )),
            _ if len < self.min => Some(FieldError::new(
                field,
                format!("must be at least {} characters", self.min),
            )),
            Some(max) if len > max => Some(FieldError::new(
                field,
                format!("must be at most {} characters", max),
            )),
            _ => None,
        }
    }
}

pub struct RequestValidator;

impl RequestValidator {
    /// Validate a create body. Every violated field is reported.
    pub fn validate_create(payload: &Value) -> Result<NewAnnouncement, ValidationError> {
        let obj = match payload {
            Value::Object(m) => m,
            _ => {
                return Err(ValidationError {
                    errors: vec![FieldError::new("body", "must be a JSON object")],
                })
            }
        };
        let mut errors = Vec::new();
        let title = string_field(obj.get("title"), "title", &TITLE_RULE, &mut errors);
        let description = string_field(
            obj.get("description"),
            "description",
            &DESCRIPTION_RULE,
            &mut errors,
        );
        match (title, description) {
            (Some(title), Some(description)) if errors.is_empty() => Ok(NewAnnouncement {
                title: title.to_string(),
                description: description.to_string(),
            }),
            _ => Err(ValidationError { errors }),
        }
    }

    /// Validate the three cursor parameters of a non-first list page.
    pub fn validate_pagination(
        params: &HashMap<String, String>,
    ) -> Result<PageCursor, ValidationError> {
        let mut errors = Vec::new();
        let title = query_field(params, TITLE_PARAM, &TITLE_RULE, &mut errors);
        let date_time = query_field(params, DATE_TIME_PARAM, &DATE_TIME_RULE, &mut errors);
        let next_page_number = match params.get(NEXT_PAGE_PARAM) {
            None => {
                errors.push(FieldError::new(NEXT_PAGE_PARAM, "is required"));
                None
            }
            Some(raw) => match raw.trim().parse::<i64>() {
                Ok(n) if n < i64::from(FIRST_CURSOR_PAGE) => {
                    errors.push(FieldError::new(
                        NEXT_PAGE_PARAM,
                        format!("must be greater than or equal to {}", FIRST_CURSOR_PAGE),
                    ));
                    None
                }
                Ok(n) => match u32::try_from(n) {
                    Ok(n) => Some(n),
                    Err(_) => {
                        errors.push(FieldError::new(NEXT_PAGE_PARAM, "is too large"));
                        None
                    }
                },
                Err(_) => {
                    errors.push(FieldError::new(NEXT_PAGE_PARAM, "must be a valid integer"));
                    None
                }
            },
        };
        match (title, date_time, next_page_number) {
            (Some(title), Some(date_time), Some(next_page_number)) => Ok(PageCursor {
                last_key: PrimaryKey {
                    title: title.to_string(),
                    date_time: date_time.to_string(),
                },
                next_page_number,
            }),
            _ => Err(ValidationError { errors }),
        }
    }
}

fn string_field<'a>(
    v: Option<&'a Value>,
    field: &str,
    rule: &LengthRule,
    errors: &mut Vec<FieldError>,
) -> Option<&'a str> {
    match v {
        None | Some(Value::Null) => {
            errors.push(FieldError::new(field, "is required"));
            None
        }
        Some(Value::String(s)) => match rule.check(field, s) {
            Some(e) => {
                errors.push(e);
                None
            }
            None => Some(s.as_str()),
        },
        Some(_) => {
            errors.push(FieldError::new(field, "must be a string"));
            None
        }
    }
}

fn query_field<'a>(
    params: &'a HashMap<String, String>,
    field: &str,
    rule: &LengthRule,
    errors: &mut Vec<FieldError>,
) -> Option<&'a str> {
    let Some(s) = params.get(field) else {
        errors.push(FieldError::new(field, "is required"));
        return None;
    };
    if let Some(e) = rule.check(field, s) {
        errors.push(e);
        return None;
    }
    Some(s.as_str())
}
