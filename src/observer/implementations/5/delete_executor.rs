// Ring 5: Delete Executor - removes the loaded record
use async_trait::async_trait;

use crate::observer::context::ObserverContext;
use crate::observer::error::ObserverError;
use crate::observer::traits::{Observer, ObserverRing, Operation};

#[derive(Default)]
pub struct DeleteExecutor;

#[async_trait]
impl Observer for DeleteExecutor {
    fn name(&self) -> &'static str {
        "DeleteExecutor"
    }

    fn ring(&self) -> ObserverRing {
        ObserverRing::Database
    }

    fn applies_to_operation(&self, op: Operation) -> bool {
        matches!(op, Operation::Delete)
    }

    async fn execute(&self, ctx: &mut ObserverContext) -> Result<(), ObserverError> {
        let id = ctx
            .existing
            .as_ref()
            .map(|s| s.id)
            .or(ctx.target_id)
            .ok_or_else(|| ObserverError::PipelineError("delete without a record id".into()))?;

        if !ctx.store.delete(id).await? {
            return Err(ObserverError::NotFound(format!("student {}", id)));
        }

        tracing::info!("Deleted student {}", id);
        ctx.deleted = true;
        Ok(())
    }
}
