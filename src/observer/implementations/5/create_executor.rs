// Ring 5: Create Executor - builds the instance from validated data and inserts it
use async_trait::async_trait;

use crate::observer::context::ObserverContext;
use crate::observer::error::ObserverError;
use crate::observer::traits::{Observer, ObserverRing, Operation};

#[derive(Default)]
pub struct CreateExecutor;

#[async_trait]
impl Observer for CreateExecutor {
    fn name(&self) -> &'static str {
        "CreateExecutor"
    }

    fn ring(&self) -> ObserverRing {
        ObserverRing::Database
    }

    fn applies_to_operation(&self, op: Operation) -> bool {
        matches!(op, Operation::Create)
    }

    async fn execute(&self, ctx: &mut ObserverContext) -> Result<(), ObserverError> {
        let validated = ctx
            .validated
            .as_ref()
            .ok_or_else(|| ObserverError::PipelineError("create without validated data".into()))?;

        let new_student = ctx.serializer.create_instance(validated)?;
        let created = ctx.store.insert(new_student).await?;

        tracing::info!("Created student {} via {}", created.id, ctx.serializer.name());
        ctx.result = Some(created);
        Ok(())
    }
}
