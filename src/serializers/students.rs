//! Four ways of writing the Student schema, from a bare field list to a
//! model-backed declaration.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::str::FromStr;
use std::sync::Arc;

use crate::database::models::student::{CLASS_NULL_MAX_LENGTH, NAME_MAX_LENGTH};
use crate::serializers::errors::ValidationError;
use crate::serializers::fields::{Field, ValidatedData};
use crate::serializers::validators::check_user;
use crate::serializers::Serializer;

pub const NAME_MIN_LENGTH: usize = 4;
pub const NAME_LIMIT: usize = 10;
pub const AGE_MIN: i64 = 0;
pub const AGE_MAX: i64 = 150;
pub const ADULT_AGE: i64 = 18;

// validate_<field> and validate bodies shared by the validating schemas

fn reject_root_name(value: Value) -> Result<Value, ValidationError> {
    if value.as_str() == Some("root") {
        return Err(ValidationError::new("用户名不能为root！"));
    }
    Ok(value)
}

fn require_adult_age(value: Value) -> Result<Value, ValidationError> {
    if value.as_i64().is_some_and(|age| age < ADULT_AGE) {
        return Err(ValidationError::new("年龄不能小于18"));
    }
    Ok(value)
}

fn reject_alex_at_22(attrs: ValidatedData) -> Result<ValidatedData, ValidationError> {
    if attrs.str("name") == Some("alex") && attrs.integer("age") == Some(22) {
        return Err(ValidationError::new("alex在22时的故事。。。"));
    }
    Ok(attrs)
}

fn validated_name_field() -> Field {
    Field::char("name")
        .min_length(NAME_MIN_LENGTH)
        .max_length(NAME_LIMIT)
        .validator(check_user)
}

fn bounded_age_field() -> Field {
    Field::integer("age").min_value(AGE_MIN).max_value(AGE_MAX)
}

/// Field types only: converts records to output and checks input types,
/// but defines no create/update.
pub struct StudentSerializer {
    fields: Vec<Field>,
}

impl StudentSerializer {
    pub fn new() -> Self {
        Self {
            fields: vec![
                Field::integer("id"),
                Field::char("name"),
                Field::boolean("sex"),
                Field::integer("age"),
                Field::char("class_null"),
                Field::char("description"),
            ],
        }
    }
}

impl Default for StudentSerializer {
    fn default() -> Self {
        Self::new()
    }
}

impl Serializer for StudentSerializer {
    fn name(&self) -> &'static str {
        "StudentSerializer"
    }

    fn fields(&self) -> &[Field] {
        &self.fields
    }

    fn supports_save(&self) -> bool {
        false
    }
}

/// Input schema with field options, a shared validator, per-field hooks and
/// an object-level check. Stores name/age/sex.
pub struct Student3Serializer {
    fields: Vec<Field>,
}

impl Student3Serializer {
    pub fn new() -> Self {
        Self {
            fields: vec![validated_name_field(), Field::boolean("sex"), bounded_age_field()],
        }
    }
}

impl Default for Student3Serializer {
    fn default() -> Self {
        Self::new()
    }
}

impl Serializer for Student3Serializer {
    fn name(&self) -> &'static str {
        "Student3Serializer"
    }

    fn fields(&self) -> &[Field] {
        &self.fields
    }

    fn validate_field(&self, field: &str, value: Value) -> Result<Value, ValidationError> {
        match field {
            "name" => reject_root_name(value),
            "age" => require_adult_age(value),
            _ => Ok(value),
        }
    }

    fn validate(&self, attrs: ValidatedData) -> Result<ValidatedData, ValidationError> {
        reject_alex_at_22(attrs)
    }
}

/// Same input rules as [`Student3Serializer`], with the read-only
/// attributes added so one schema serves both directions.
pub struct Student5Serializer {
    fields: Vec<Field>,
}

impl Student5Serializer {
    pub fn new() -> Self {
        Self {
            fields: vec![
                Field::integer("id").read_only(),
                validated_name_field(),
                Field::boolean("sex"),
                bounded_age_field(),
                Field::char("class_null").read_only(),
                Field::char("description").read_only(),
            ],
        }
    }
}

impl Default for Student5Serializer {
    fn default() -> Self {
        Self::new()
    }
}

impl Serializer for Student5Serializer {
    fn name(&self) -> &'static str {
        "Student5Serializer"
    }

    fn fields(&self) -> &[Field] {
        &self.fields
    }

    fn validate_field(&self, field: &str, value: Value) -> Result<Value, ValidationError> {
        match field {
            "name" => reject_root_name(value),
            "age" => require_adult_age(value),
            _ => Ok(value),
        }
    }

    fn validate(&self, attrs: ValidatedData) -> Result<ValidatedData, ValidationError> {
        reject_alex_at_22(attrs)
    }
}

/// Fields taken from the model columns, with the name/age limits tightened.
/// `sex` falls back to the model default, `class_null` is nullable and
/// `is_18` is derived.
///
/// `sex` and the adult-age hook are declared here as well, so records written
/// through this schema keep the same age floor as the other validating
/// schemas and an update can change `sex`.
pub struct StudentModelSerializer {
    fields: Vec<Field>,
}

impl StudentModelSerializer {
    pub fn new() -> Self {
        debug_assert!(NAME_LIMIT <= NAME_MAX_LENGTH);
        Self {
            fields: vec![
                Field::integer("id").read_only(),
                validated_name_field(),
                Field::boolean("sex").optional(),
                bounded_age_field(),
                Field::char("class_null")
                    .optional()
                    .allow_null()
                    .max_length(CLASS_NULL_MAX_LENGTH),
                Field::boolean("is_18").read_only(),
            ],
        }
    }
}

impl Default for StudentModelSerializer {
    fn default() -> Self {
        Self::new()
    }
}

impl Serializer for StudentModelSerializer {
    fn name(&self) -> &'static str {
        "StudentModelSerializer"
    }

    fn fields(&self) -> &[Field] {
        &self.fields
    }

    fn validate_field(&self, field: &str, value: Value) -> Result<Value, ValidationError> {
        match field {
            "name" => reject_root_name(value),
            "age" => require_adult_age(value),
            _ => Ok(value),
        }
    }

    fn validate(&self, attrs: ValidatedData) -> Result<ValidatedData, ValidationError> {
        reject_alex_at_22(attrs)
    }
}

/// Which schema the CRUD endpoint is bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchemaKind {
    Plain,
    Student3,
    Student5,
    Model,
}

impl SchemaKind {
    pub fn build(self) -> Arc<dyn Serializer> {
        match self {
            SchemaKind::Plain => Arc::new(StudentSerializer::new()),
            SchemaKind::Student3 => Arc::new(Student3Serializer::new()),
            SchemaKind::Student5 => Arc::new(Student5Serializer::new()),
            SchemaKind::Model => Arc::new(StudentModelSerializer::new()),
        }
    }
}

impl Default for SchemaKind {
    fn default() -> Self {
        SchemaKind::Model
    }
}

impl FromStr for SchemaKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "plain" => Ok(SchemaKind::Plain),
            "student3" => Ok(SchemaKind::Student3),
            "student5" => Ok(SchemaKind::Student5),
            "model" => Ok(SchemaKind::Model),
            other => Err(format!("unknown student schema '{}'", other)),
        }
    }
}
