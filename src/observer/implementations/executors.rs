// Helper for registering the standard observers (not ring-specific)
use crate::observer::pipeline::ObserverPipeline;

use super::{
    ChangeLogObserver, CreateExecutor, DataPreparationObserver, DeleteExecutor, FieldValidationObserver,
    ObjectValidationObserver, SaveSupportObserver, UpdateExecutor,
};

/// Register every observer the CRUD endpoint relies on
pub fn register_default_observers(pipeline: &mut ObserverPipeline) {
    pipeline.register_observer(Box::new(SaveSupportObserver));
    pipeline.register_observer(Box::new(DataPreparationObserver));
    pipeline.register_observer(Box::new(FieldValidationObserver));
    pipeline.register_observer(Box::new(ObjectValidationObserver));
    pipeline.register_observer(Box::new(CreateExecutor));
    pipeline.register_observer(Box::new(UpdateExecutor));
    pipeline.register_observer(Box::new(DeleteExecutor));
    pipeline.register_observer(Box::new(ChangeLogObserver));
}
