// Observer pipeline: runs registered observers ring by ring for write operations

use std::collections::BTreeMap;
use std::time::Instant;
use tokio::time::timeout;

use crate::observer::context::ObserverContext;
use crate::observer::error::ObserverError;
use crate::observer::traits::{Observer, ObserverRing};

/// Executes observers in ring order and stops at the first ring that
/// records an error
pub struct ObserverPipeline {
    observers: BTreeMap<ObserverRing, Vec<Box<dyn Observer>>>,
}

impl ObserverPipeline {
    /// Create new observer pipeline with empty observer registry
    pub fn new() -> Self {
        Self {
            observers: BTreeMap::new(),
        }
    }

    /// Pipeline with the standard validation and persistence observers
    pub fn with_default_observers() -> Self {
        let mut pipeline = Self::new();
        crate::observer::implementations::register_default_observers(&mut pipeline);
        pipeline
    }

    /// Register an observer, keeping each ring sorted by priority
    pub fn register_observer(&mut self, observer: Box<dyn Observer>) {
        let ring = observer.ring();
        let name = observer.name();
        let ring_observers = self.observers.entry(ring).or_default();
        ring_observers.push(observer);
        ring_observers.sort_by_key(|o| o.priority());

        tracing::debug!("Registered observer '{}' for ring {:?}", name, ring);
    }

    pub fn observer_count(&self) -> usize {
        self.observers.values().map(Vec::len).sum()
    }

    /// Run every relevant ring. On success the context carries the result;
    /// on failure the first recorded error is returned.
    pub async fn execute(&self, mut ctx: ObserverContext) -> Result<ObserverContext, ObserverError> {
        let relevant_rings = ObserverRing::for_operation(&ctx.operation);
        if relevant_rings.is_empty() {
            return Err(ObserverError::PipelineError(format!(
                "{:?} is not a write operation",
                ctx.operation
            )));
        }

        tracing::info!(
            "Observer pipeline starting: operation={:?}, schema={}, id={:?}, rings={:?}",
            ctx.operation,
            ctx.serializer.name(),
            ctx.target_id,
            relevant_rings
        );

        for ring in relevant_rings {
            ctx.current_ring = Some(ring);
            self.execute_ring(ring, &mut ctx).await;

            if ctx.has_errors() {
                if ring.is_pre_database() {
                    tracing::warn!("Observer pipeline stopped at ring {:?}; nothing was written", ring);
                } else {
                    tracing::error!("Observer pipeline failed at ring {:?}", ring);
                }
                return Err(ctx.errors.swap_remove(0));
            }
        }

        tracing::debug!("Observer pipeline finished in {:?}", ctx.execution_time());
        Ok(ctx)
    }

    /// Execute observers in a specific ring, collecting their errors
    async fn execute_ring(&self, ring: ObserverRing, ctx: &mut ObserverContext) {
        let observers = match self.observers.get(&ring) {
            Some(obs) => obs,
            None => {
                tracing::debug!("No observers registered for ring {:?}", ring);
                return;
            }
        };

        for observer in observers {
            if !observer.applies_to_operation(ctx.operation) {
                tracing::trace!(
                    "Observer {} skipped - doesn't apply to operation {:?}",
                    observer.name(),
                    ctx.operation
                );
                continue;
            }

            let observer_start = Instant::now();
            let result = timeout(observer.timeout(), observer.execute(ctx)).await;
            let execution_time = observer_start.elapsed();

            match result {
                Ok(Ok(())) => {
                    tracing::debug!("Observer: {} completed in {:?}", observer.name(), execution_time);
                }
                Ok(Err(error)) => {
                    tracing::warn!("Observer: {} failed in {:?}: {}", observer.name(), execution_time, error);
                    ctx.add_error(error);
                }
                Err(_elapsed) => {
                    tracing::error!("Observer: {} timed out after {:?}", observer.name(), observer.timeout());
                    ctx.add_error(ObserverError::TimeoutError(format!(
                        "Observer {} timed out after {:?}",
                        observer.name(),
                        observer.timeout()
                    )));
                }
            }

            // Later observers in the ring depend on the earlier ones succeeding
            if ctx.has_errors() {
                break;
            }
        }
    }
}

impl Default for ObserverPipeline {
    fn default() -> Self {
        Self::new()
    }
}
