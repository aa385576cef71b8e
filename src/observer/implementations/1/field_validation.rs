// Ring 1: Input Validation - field coercion, field options and validate_<field>
use async_trait::async_trait;

use crate::observer::context::ObserverContext;
use crate::observer::error::ObserverError;
use crate::observer::traits::{Observer, ObserverRing, Operation};
use crate::serializers::validate_fields;

#[derive(Default)]
pub struct FieldValidationObserver;

#[async_trait]
impl Observer for FieldValidationObserver {
    fn name(&self) -> &'static str {
        "FieldValidationObserver"
    }

    fn ring(&self) -> ObserverRing {
        ObserverRing::InputValidation
    }

    fn applies_to_operation(&self, op: Operation) -> bool {
        matches!(op, Operation::Create | Operation::Update)
    }

    async fn execute(&self, ctx: &mut ObserverContext) -> Result<(), ObserverError> {
        let validated = validate_fields(ctx.serializer.as_ref(), &ctx.payload, ctx.partial)?;
        tracing::debug!(
            "{} accepted {} field(s) for {:?}",
            ctx.serializer.name(),
            validated.len(),
            ctx.operation
        );
        ctx.validated = Some(validated);
        Ok(())
    }
}
