// Ring 6: Post-Database - structured change log for every successful write
use async_trait::async_trait;

use crate::observer::context::ObserverContext;
use crate::observer::error::ObserverError;
use crate::observer::traits::{Observer, ObserverRing, Operation};

#[derive(Default)]
pub struct ChangeLogObserver;

#[async_trait]
impl Observer for ChangeLogObserver {
    fn name(&self) -> &'static str {
        "ChangeLogObserver"
    }

    fn ring(&self) -> ObserverRing {
        ObserverRing::PostDatabase
    }

    fn applies_to_operation(&self, op: Operation) -> bool {
        op.is_write()
    }

    async fn execute(&self, ctx: &mut ObserverContext) -> Result<(), ObserverError> {
        let id = ctx.result.as_ref().map(|s| s.id).or(ctx.target_id);
        tracing::info!(
            target: "student_api::changes",
            operation = ?ctx.operation,
            schema = ctx.serializer.name(),
            student_id = ?id,
            partial = ctx.partial,
            elapsed_ms = ctx.execution_time().as_millis() as u64,
            "student record changed"
        );
        Ok(())
    }
}
