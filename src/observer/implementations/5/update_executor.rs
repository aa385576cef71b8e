// Ring 5: Update Executor - overwrites validated attributes on the loaded record
use async_trait::async_trait;

use crate::observer::context::ObserverContext;
use crate::observer::error::ObserverError;
use crate::observer::traits::{Observer, ObserverRing, Operation};

#[derive(Default)]
pub struct UpdateExecutor;

#[async_trait]
impl Observer for UpdateExecutor {
    fn name(&self) -> &'static str {
        "UpdateExecutor"
    }

    fn ring(&self) -> ObserverRing {
        ObserverRing::Database
    }

    fn applies_to_operation(&self, op: Operation) -> bool {
        matches!(op, Operation::Update)
    }

    async fn execute(&self, ctx: &mut ObserverContext) -> Result<(), ObserverError> {
        let existing = ctx
            .existing
            .clone()
            .ok_or_else(|| ObserverError::PipelineError("update without a loaded record".into()))?;
        let validated = ctx
            .validated
            .as_ref()
            .ok_or_else(|| ObserverError::PipelineError("update without validated data".into()))?;

        let id = existing.id;
        let changed = ctx.serializer.update_instance(existing, validated)?;
        let updated = ctx.store.update(&changed).await?;

        tracing::info!(
            "Updated student {} via {} (partial={})",
            id,
            ctx.serializer.name(),
            ctx.partial
        );
        ctx.result = Some(updated);
        Ok(())
    }
}
