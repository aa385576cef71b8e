use serde_json::{Map, Value};
use std::num::IntErrorKind;
use validator::{ValidateLength, ValidateRange};

use crate::serializers::errors::ValidationError;

/// Reusable validator attached to a field declaration (`validators=[...]`)
pub type FieldValidator = fn(&Value) -> Result<(), ValidationError>;

pub const MSG_REQUIRED: &str = "This field is required.";
pub const MSG_NULL: &str = "This field may not be null.";
pub const MSG_BLANK: &str = "This field may not be blank.";
pub const MSG_INVALID_STRING: &str = "Not a valid string.";
pub const MSG_INVALID_INTEGER: &str = "A valid integer is required.";
pub const MSG_INVALID_BOOLEAN: &str = "Must be a valid boolean.";

const TRUE_STRINGS: &[&str] = &["t", "T", "y", "Y", "yes", "Yes", "YES", "true", "True", "TRUE", "on", "On", "ON", "1"];
const FALSE_STRINGS: &[&str] = &["f", "F", "n", "N", "no", "No", "NO", "false", "False", "FALSE", "off", "Off", "OFF", "0"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Integer,
    Char,
    Boolean,
}

/// One declared schema field and its options
#[derive(Debug, Clone)]
pub struct Field {
    pub name: &'static str,
    pub kind: FieldKind,
    pub read_only: bool,
    pub required: bool,
    pub allow_null: bool,
    pub allow_blank: bool,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub min_value: Option<i64>,
    pub max_value: Option<i64>,
    pub validators: Vec<FieldValidator>,
}

impl Field {
    fn new(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            read_only: false,
            required: true,
            allow_null: false,
            allow_blank: false,
            min_length: None,
            max_length: None,
            min_value: None,
            max_value: None,
            validators: Vec::new(),
        }
    }

    pub fn integer(name: &'static str) -> Self {
        Self::new(name, FieldKind::Integer)
    }

    pub fn char(name: &'static str) -> Self {
        Self::new(name, FieldKind::Char)
    }

    pub fn boolean(name: &'static str) -> Self {
        Self::new(name, FieldKind::Boolean)
    }

    /// Output only; ignored on input
    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self.required = false;
        self
    }

    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    pub fn allow_null(mut self) -> Self {
        self.allow_null = true;
        self
    }

    pub fn allow_blank(mut self) -> Self {
        self.allow_blank = true;
        self
    }

    pub fn min_length(mut self, min: usize) -> Self {
        self.min_length = Some(min);
        self
    }

    pub fn max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    pub fn min_value(mut self, min: i64) -> Self {
        self.min_value = Some(min);
        self
    }

    pub fn max_value(mut self, max: i64) -> Self {
        self.max_value = Some(max);
        self
    }

    pub fn validator(mut self, validator: FieldValidator) -> Self {
        self.validators.push(validator);
        self
    }

    pub fn is_writable(&self) -> bool {
        !self.read_only
    }

    /// Coerce a present input value and run every validator on it.
    ///
    /// Null and blank checks short-circuit. Otherwise all attached and
    /// built-in validators run and their messages are collected together.
    pub fn run_validation(&self, raw: &Value) -> Result<Value, ValidationError> {
        if raw.is_null() {
            return if self.allow_null {
                Ok(Value::Null)
            } else {
                Err(ValidationError::new(MSG_NULL))
            };
        }

        let value = self.to_internal_value(raw)?;

        let mut messages = Vec::new();
        for validator in &self.validators {
            if let Err(e) = validator(&value) {
                messages.extend(e.messages);
            }
        }
        messages.extend(self.builtin_messages(&value));

        if messages.is_empty() {
            Ok(value)
        } else {
            Err(ValidationError { messages })
        }
    }

    fn to_internal_value(&self, raw: &Value) -> Result<Value, ValidationError> {
        match self.kind {
            FieldKind::Integer => coerce_integer(raw).map(Value::from),
            FieldKind::Boolean => coerce_boolean(raw).map(Value::Bool),
            FieldKind::Char => {
                let text = coerce_char(raw)?;
                if text.is_empty() && !self.allow_blank {
                    return Err(ValidationError::new(MSG_BLANK));
                }
                Ok(Value::String(text))
            }
        }
    }

    fn builtin_messages(&self, value: &Value) -> Vec<String> {
        let mut messages = Vec::new();
        match (self.kind, value) {
            (FieldKind::Char, Value::String(text)) => {
                if let Some(max) = self.max_length {
                    if !text.validate_length(None, Some(max as u64), None) {
                        messages.push(format!("Ensure this field has no more than {} characters.", max));
                    }
                }
                if let Some(min) = self.min_length {
                    if !text.validate_length(Some(min as u64), None, None) {
                        messages.push(format!("Ensure this field has at least {} characters.", min));
                    }
                }
            }
            (FieldKind::Integer, Value::Number(n)) => {
                if let Some(number) = n.as_i64() {
                    if let Some(max) = self.max_value {
                        if !number.validate_range(None, Some(max), None, None) {
                            messages.push(format!("Ensure this value is less than or equal to {}.", max));
                        }
                    }
                    if let Some(min) = self.min_value {
                        if !number.validate_range(Some(min), None, None, None) {
                            messages.push(format!("Ensure this value is greater than or equal to {}.", min));
                        }
                    }
                }
            }
            _ => {}
        }
        messages
    }
}

/// Integers, integral floats, and numeric strings (surrounding whitespace and
/// a trailing `.0…` are tolerated). Integral values outside the `i64` range
/// saturate, so the value bounds report them.
fn coerce_integer(raw: &Value) -> Result<i64, ValidationError> {
    match raw {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                return Ok(i);
            }
            if n.is_u64() {
                return Ok(i64::MAX);
            }
            match n.as_f64() {
                // `as` saturates at the i64 bounds
                Some(f) if f.is_finite() && f.fract() == 0.0 => Ok(f as i64),
                _ => Err(ValidationError::new(MSG_INVALID_INTEGER)),
            }
        }
        Value::String(s) => parse_integer(s).ok_or_else(|| ValidationError::new(MSG_INVALID_INTEGER)),
        _ => Err(ValidationError::new(MSG_INVALID_INTEGER)),
    }
}

fn parse_integer(text: &str) -> Option<i64> {
    let trimmed = text.trim();
    let digits = match trimmed.find('.') {
        Some(pos) if trimmed[pos + 1..].chars().all(|c| c == '0') => &trimmed[..pos],
        _ => trimmed,
    };
    match digits.parse::<i64>() {
        Ok(value) => Some(value),
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow => Some(i64::MAX),
            IntErrorKind::NegOverflow => Some(i64::MIN),
            _ => None,
        },
    }
}

fn coerce_boolean(raw: &Value) -> Result<bool, ValidationError> {
    match raw {
        Value::Bool(b) => Ok(*b),
        Value::Number(n) if n.as_f64() == Some(1.0) => Ok(true),
        Value::Number(n) if n.as_f64() == Some(0.0) => Ok(false),
        Value::String(s) if TRUE_STRINGS.contains(&s.as_str()) => Ok(true),
        Value::String(s) if FALSE_STRINGS.contains(&s.as_str()) => Ok(false),
        _ => Err(ValidationError::new(MSG_INVALID_BOOLEAN)),
    }
}

/// Strings are trimmed; numbers are accepted in their textual form
fn coerce_char(raw: &Value) -> Result<String, ValidationError> {
    match raw {
        Value::String(s) => Ok(s.trim().to_string()),
        Value::Number(n) => Ok(n.to_string()),
        _ => Err(ValidationError::new(MSG_INVALID_STRING)),
    }
}

/// Cleaned attributes produced by a successful validation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidatedData(Map<String, Value>);

impl ValidatedData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: &str, value: Value) {
        self.0.insert(field.to_string(), value);
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn str(&self, field: &str) -> Option<&str> {
        self.get(field).and_then(Value::as_str)
    }

    pub fn integer(&self, field: &str) -> Option<i64> {
        self.get(field).and_then(Value::as_i64)
    }

    pub fn boolean(&self, field: &str) -> Option<bool> {
        self.get(field).and_then(Value::as_bool)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn reject_zero(value: &Value) -> Result<(), ValidationError> {
        if value == &json!(0) {
            Err(ValidationError::new("zero"))
        } else {
            Ok(())
        }
    }

    #[test]
    fn integer_coercion_accepts_numeric_forms() {
        let field = Field::integer("age");
        assert_eq!(field.run_validation(&json!(22)).unwrap(), json!(22));
        assert_eq!(field.run_validation(&json!(22.0)).unwrap(), json!(22));
        assert_eq!(field.run_validation(&json!(" 22 ")).unwrap(), json!(22));
        assert_eq!(field.run_validation(&json!("22.00")).unwrap(), json!(22));
        assert_eq!(field.run_validation(&json!("-3")).unwrap(), json!(-3));
    }

    #[test]
    fn integer_coercion_rejects_other_forms() {
        let field = Field::integer("age");
        for raw in [json!(22.5), json!("abc"), json!(true), json!([1]), json!({"a": 1}), json!("")] {
            let err = field.run_validation(&raw).unwrap_err();
            assert_eq!(err.messages, vec![MSG_INVALID_INTEGER], "input {raw}");
        }
    }

    #[test]
    fn integer_bounds_report_framework_messages() {
        let field = Field::integer("age").min_value(0).max_value(150);
        assert_eq!(
            field.run_validation(&json!(151)).unwrap_err().messages,
            vec!["Ensure this value is less than or equal to 150."]
        );
        assert_eq!(
            field.run_validation(&json!(-1)).unwrap_err().messages,
            vec!["Ensure this value is greater than or equal to 0."]
        );
        assert!(field.run_validation(&json!(0)).is_ok());
        assert!(field.run_validation(&json!(150)).is_ok());
    }

    #[test]
    fn oversized_integers_hit_the_value_bounds() {
        let field = Field::integer("age").min_value(0).max_value(150);
        let huge: Value = serde_json::from_str("99999999999999999999").unwrap();
        assert_eq!(
            field.run_validation(&huge).unwrap_err().messages,
            vec!["Ensure this value is less than or equal to 150."]
        );
        assert_eq!(
            field.run_validation(&json!("99999999999999999999")).unwrap_err().messages,
            vec!["Ensure this value is less than or equal to 150."]
        );
        assert_eq!(
            field.run_validation(&json!("-99999999999999999999")).unwrap_err().messages,
            vec!["Ensure this value is greater than or equal to 0."]
        );
        assert_eq!(field.run_validation(&json!(u64::MAX)).unwrap_err().messages.len(), 1);
    }

    #[test]
    fn char_length_counts_characters_not_bytes() {
        let field = Field::char("name").min_length(4).max_length(10);
        assert!(field.run_validation(&json!("张三李四")).is_ok());
        assert_eq!(
            field.run_validation(&json!("张三")).unwrap_err().messages,
            vec!["Ensure this field has at least 4 characters."]
        );
        assert_eq!(
            field.run_validation(&json!("abcdefghijk")).unwrap_err().messages,
            vec!["Ensure this field has no more than 10 characters."]
        );
    }

    #[test]
    fn char_trims_and_rejects_blank() {
        let field = Field::char("name");
        assert_eq!(field.run_validation(&json!("  xiaoming ")).unwrap(), json!("xiaoming"));
        assert_eq!(field.run_validation(&json!("   ")).unwrap_err().messages, vec![MSG_BLANK]);
        assert_eq!(field.run_validation(&json!(12345)).unwrap(), json!("12345"));
        assert_eq!(field.run_validation(&json!(false)).unwrap_err().messages, vec![MSG_INVALID_STRING]);
        assert_eq!(Field::char("d").allow_blank().run_validation(&json!("")).unwrap(), json!(""));
    }

    #[test]
    fn boolean_accepts_common_spellings() {
        let field = Field::boolean("sex");
        for raw in [json!(true), json!(1), json!("yes"), json!("True"), json!("on"), json!("1")] {
            assert_eq!(field.run_validation(&raw).unwrap(), json!(true), "input {raw}");
        }
        for raw in [json!(false), json!(0), json!("no"), json!("FALSE"), json!("off"), json!("0")] {
            assert_eq!(field.run_validation(&raw).unwrap(), json!(false), "input {raw}");
        }
        assert_eq!(field.run_validation(&json!("maybe")).unwrap_err().messages, vec![MSG_INVALID_BOOLEAN]);
        assert_eq!(field.run_validation(&json!(2)).unwrap_err().messages, vec![MSG_INVALID_BOOLEAN]);
    }

    #[test]
    fn null_depends_on_allow_null() {
        assert_eq!(Field::char("c").run_validation(&Value::Null).unwrap_err().messages, vec![MSG_NULL]);
        assert_eq!(Field::char("c").allow_null().run_validation(&Value::Null).unwrap(), Value::Null);
    }

    #[test]
    fn all_validator_messages_are_collected() {
        let field = Field::integer("n").min_value(1).validator(reject_zero);
        let err = field.run_validation(&json!(0)).unwrap_err();
        assert_eq!(err.messages, vec!["zero", "Ensure this value is greater than or equal to 1."]);
    }

    #[test]
    fn read_only_fields_are_not_required() {
        let field = Field::integer("id").read_only();
        assert!(!field.required);
        assert!(!field.is_writable());
    }
}
