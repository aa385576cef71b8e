// Declarative request/response schemas for the Student record set
//
// A schema lists its fields and may hook into validation at two points:
// `validate_field` (the per-field `validate_<field>` hook) and `validate`
// (the object-level hook). `run_validation` drives both in order.

pub mod errors;
pub mod fields;
pub mod students;
pub mod validators;

pub use errors::{ValidationError, ValidationErrors, NON_FIELD_ERRORS};
pub use fields::{Field, FieldKind, FieldValidator, ValidatedData};
pub use students::{
    SchemaKind, Student3Serializer, Student5Serializer, StudentModelSerializer, StudentSerializer,
};

use serde_json::{Map, Value};

use crate::database::models::student::{NewStudent, Student, DEFAULT_SEX, DESCRIPTION_MAX_LENGTH};
use fields::MSG_REQUIRED;

pub trait Serializer: Send + Sync {
    /// Schema name for logging
    fn name(&self) -> &'static str;

    /// Declared fields, in declaration order
    fn fields(&self) -> &[Field];

    /// `validate_<field>` hook. Runs only for fields whose own validators
    /// passed, and may replace the value.
    fn validate_field(&self, _field: &str, value: Value) -> Result<Value, ValidationError> {
        Ok(value)
    }

    /// Object-level hook with every cleaned field available
    fn validate(&self, attrs: ValidatedData) -> Result<ValidatedData, ValidationError> {
        Ok(attrs)
    }

    /// Whether create/update are defined for this schema
    fn supports_save(&self) -> bool {
        true
    }

    /// Build the insert payload; model defaults fill absent attributes
    fn create_instance(&self, data: &ValidatedData) -> Result<NewStudent, ValidationErrors> {
        new_student_from(data)
    }

    /// Overwrite the validated attributes on an existing record
    fn update_instance(&self, existing: Student, data: &ValidatedData) -> Result<Student, ValidationErrors> {
        apply_validated(existing, data)
    }

    /// Output projection over the declared fields
    fn to_representation(&self, student: &Student) -> Value {
        let mut out = Map::new();
        for field in self.fields() {
            if let Some(value) = student.attribute(field.name) {
                out.insert(field.name.to_string(), value);
            }
        }
        Value::Object(out)
    }
}

/// Field-level pass: coercion, field options and validators, `validate_<field>`.
///
/// Every writable field is checked and all failures are returned together.
/// With `partial`, missing fields are skipped instead of reported.
pub fn validate_fields<S: Serializer + ?Sized>(
    serializer: &S,
    data: &Value,
    partial: bool,
) -> Result<ValidatedData, ValidationErrors> {
    let input = match data {
        Value::Object(map) => map,
        other => {
            return Err(ValidationErrors::non_field(format!(
                "Invalid data. Expected a dictionary, but got {}.",
                json_type_name(other)
            )))
        }
    };

    let mut validated = ValidatedData::new();
    let mut errors = ValidationErrors::new();

    for field in serializer.fields().iter().filter(|f| f.is_writable()) {
        let raw = match input.get(field.name) {
            Some(raw) => raw,
            None => {
                if field.required && !partial {
                    errors.add(field.name, MSG_REQUIRED);
                }
                continue;
            }
        };

        let checked = field
            .run_validation(raw)
            .and_then(|value| serializer.validate_field(field.name, value));

        match checked {
            Ok(value) => validated.insert(field.name, value),
            Err(e) => errors.extend(field.name, e),
        }
    }

    if errors.is_empty() {
        Ok(validated)
    } else {
        Err(errors)
    }
}

/// Object-level pass; failures are reported under `non_field_errors`
pub fn validate_object<S: Serializer + ?Sized>(
    serializer: &S,
    attrs: ValidatedData,
) -> Result<ValidatedData, ValidationErrors> {
    serializer.validate(attrs).map_err(|e| {
        let mut errors = ValidationErrors::new();
        errors.extend(NON_FIELD_ERRORS, e);
        errors
    })
}

/// Full validation: the object-level hook only runs when every field is clean
pub fn run_validation<S: Serializer + ?Sized>(
    serializer: &S,
    data: &Value,
    partial: bool,
) -> Result<ValidatedData, ValidationErrors> {
    let attrs = validate_fields(serializer, data, partial)?;
    validate_object(serializer, attrs)
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "str",
        Value::Array(_) => "list",
        Value::Object(_) => "dict",
    }
}

fn age_from(data: &ValidatedData, errors: &mut ValidationErrors) -> Option<i32> {
    let age = data.integer("age")?;
    match i32::try_from(age) {
        Ok(age) => Some(age),
        Err(_) => {
            let bound = if age < 0 { i32::MIN } else { i32::MAX };
            let message = if age < 0 {
                format!("Ensure this value is greater than or equal to {}.", bound)
            } else {
                format!("Ensure this value is less than or equal to {}.", bound)
            };
            errors.add("age", message);
            None
        }
    }
}

/// The description column is bounded even for schemas that declare no limit
fn description_from<'a>(data: &'a ValidatedData, errors: &mut ValidationErrors) -> Option<&'a str> {
    let description = data.str("description")?;
    if description.chars().count() > DESCRIPTION_MAX_LENGTH {
        errors.add(
            "description",
            format!("Ensure this field has no more than {} characters.", DESCRIPTION_MAX_LENGTH),
        );
        return None;
    }
    Some(description)
}

/// Generic create: every validated attribute is stored
pub fn new_student_from(data: &ValidatedData) -> Result<NewStudent, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let name = data.str("name").map(str::to_string);
    if name.is_none() {
        errors.add("name", MSG_REQUIRED);
    }
    let age = age_from(data, &mut errors);
    if age.is_none() && !errors.contains("age") {
        errors.add("age", MSG_REQUIRED);
    }
    let description = description_from(data, &mut errors).unwrap_or_default().to_string();

    match (name, age) {
        (Some(name), Some(age)) if errors.is_empty() => Ok(NewStudent {
            name,
            sex: data.boolean("sex").unwrap_or(DEFAULT_SEX),
            age,
            class_null: data.str("class_null").map(str::to_string),
            description,
        }),
        _ => Err(errors),
    }
}

/// Generic update: attributes present in `data` replace the stored ones
pub fn apply_validated(mut student: Student, data: &ValidatedData) -> Result<Student, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    if let Some(name) = data.str("name") {
        student.name = name.to_string();
    }
    if let Some(sex) = data.boolean("sex") {
        student.sex = sex;
    }
    if data.contains("age") {
        if let Some(age) = age_from(data, &mut errors) {
            student.age = age;
        }
    }
    if data.contains("class_null") {
        student.class_null = data.str("class_null").map(str::to_string);
    }
    if let Some(description) = description_from(data, &mut errors) {
        student.description = description.to_string();
    }

    if errors.is_empty() {
        Ok(student)
    } else {
        Err(errors)
    }
}
