//! Reusable field validators, declared outside any schema and attached to
//! fields through `Field::validator`.

use serde_json::Value;

use crate::serializers::errors::ValidationError;

pub const RESERVED_USERNAME: &str = "oldboy";

/// Rejects the reserved user name
pub fn check_user(value: &Value) -> Result<(), ValidationError> {
    if value.as_str() == Some(RESERVED_USERNAME) {
        return Err(ValidationError::new("用户名不能为oldboy！"));
    }
    Ok(())
}
