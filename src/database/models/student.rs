use serde_json::{json, Value};
use sqlx::FromRow;

/// Column limits declared on the model. Model-backed schemas inherit these.
pub const NAME_MAX_LENGTH: usize = 100;
pub const CLASS_NULL_MAX_LENGTH: usize = 5;
pub const DESCRIPTION_MAX_LENGTH: usize = 1000;

/// Default for `sex` when a create payload leaves it out.
pub const DEFAULT_SEX: bool = true;

#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Student {
    pub id: i64,
    pub name: String,
    pub sex: bool,
    pub age: i32,
    pub class_null: Option<String>,
    pub description: String,
}

impl Student {
    /// Derived, never stored
    pub fn is_18(&self) -> bool {
        self.age >= 18
    }

    /// Look up an attribute by its public field name, including derived ones.
    /// Schemas use this to build their output representation.
    pub fn attribute(&self, field: &str) -> Option<Value> {
        let value = match field {
            "id" => json!(self.id),
            "name" => json!(self.name),
            "sex" => json!(self.sex),
            "age" => json!(self.age),
            "class_null" => json!(self.class_null),
            "description" => json!(self.description),
            "is_18" => json!(self.is_18()),
            _ => return None,
        };
        Some(value)
    }
}

/// Insert payload; `id` is assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStudent {
    pub name: String,
    pub sex: bool,
    pub age: i32,
    pub class_null: Option<String>,
    pub description: String,
}

impl NewStudent {
    pub fn into_student(self, id: i64) -> Student {
        Student {
            id,
            name: self.name,
            sex: self.sex,
            age: self.age,
            class_null: self.class_null,
            description: self.description,
        }
    }
}
