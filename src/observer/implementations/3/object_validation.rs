// Ring 3: Business - object-level validate over all cleaned fields
use async_trait::async_trait;

use crate::observer::context::ObserverContext;
use crate::observer::error::ObserverError;
use crate::observer::traits::{Observer, ObserverRing, Operation};
use crate::serializers::validate_object;

#[derive(Default)]
pub struct ObjectValidationObserver;

#[async_trait]
impl Observer for ObjectValidationObserver {
    fn name(&self) -> &'static str {
        "ObjectValidationObserver"
    }

    fn ring(&self) -> ObserverRing {
        ObserverRing::Business
    }

    fn applies_to_operation(&self, op: Operation) -> bool {
        matches!(op, Operation::Create | Operation::Update)
    }

    async fn execute(&self, ctx: &mut ObserverContext) -> Result<(), ObserverError> {
        let attrs = ctx
            .validated
            .take()
            .ok_or_else(|| ObserverError::PipelineError("object validation before field validation".into()))?;
        ctx.validated = Some(validate_object(ctx.serializer.as_ref(), attrs)?);
        Ok(())
    }
}
