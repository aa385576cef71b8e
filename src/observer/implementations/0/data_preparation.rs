// Ring 0: Data Preparation - loads the record targeted by update/delete
use async_trait::async_trait;

use crate::observer::context::ObserverContext;
use crate::observer::error::ObserverError;
use crate::observer::traits::{Observer, ObserverRing, Operation};

#[derive(Default)]
pub struct DataPreparationObserver;

#[async_trait]
impl Observer for DataPreparationObserver {
    fn name(&self) -> &'static str {
        "DataPreparationObserver"
    }

    fn ring(&self) -> ObserverRing {
        ObserverRing::DataPreparation
    }

    fn applies_to_operation(&self, op: Operation) -> bool {
        // Only applies to operations that need existing data
        matches!(op, Operation::Update | Operation::Delete)
    }

    async fn execute(&self, ctx: &mut ObserverContext) -> Result<(), ObserverError> {
        if ctx.existing.is_some() {
            tracing::debug!("Existing record already loaded, skipping data preparation");
            return Ok(());
        }

        let id = ctx.target_id.ok_or_else(|| {
            ObserverError::PipelineError(format!("{:?} requires a record id", ctx.operation))
        })?;

        match ctx.store.get(id).await? {
            Some(existing) => {
                tracing::debug!("Loaded student {} for {:?}", id, ctx.operation);
                ctx.existing = Some(existing);
                Ok(())
            }
            None => Err(ObserverError::NotFound(format!("student {}", id))),
        }
    }
}
