// Ring 0: Save Support - rejects writes through schemas without create/update
use async_trait::async_trait;

use crate::observer::context::ObserverContext;
use crate::observer::error::ObserverError;
use crate::observer::traits::{Observer, ObserverRing, Operation};

#[derive(Default)]
pub struct SaveSupportObserver;

#[async_trait]
impl Observer for SaveSupportObserver {
    fn name(&self) -> &'static str {
        "SaveSupportObserver"
    }

    fn ring(&self) -> ObserverRing {
        ObserverRing::DataPreparation
    }

    fn applies_to_operation(&self, op: Operation) -> bool {
        matches!(op, Operation::Create | Operation::Update)
    }

    // Before any record is loaded
    fn priority(&self) -> u8 {
        10
    }

    async fn execute(&self, ctx: &mut ObserverContext) -> Result<(), ObserverError> {
        if ctx.serializer.supports_save() {
            return Ok(());
        }
        Err(ObserverError::MethodNotAllowed(format!(
            "{} does not define {:?}",
            ctx.serializer.name(),
            ctx.operation
        )))
    }
}
