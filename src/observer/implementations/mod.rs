// Observer implementations organized by rings
// Each ring handles a specific phase of a write request

// Ring 0: Data Preparation - reject unsupported saves, load the target record
#[path = "0/save_support.rs"]
pub mod save_support;
#[path = "0/data_preparation.rs"]
pub mod data_preparation;

// Ring 1: Input Validation - per-field checks
#[path = "1/field_validation.rs"]
pub mod field_validation;

// Ring 3: Business - object-level checks
#[path = "3/object_validation.rs"]
pub mod object_validation;

// Ring 5: Database - store writes
#[path = "5/create_executor.rs"]
pub mod create_executor;
#[path = "5/update_executor.rs"]
pub mod update_executor;
#[path = "5/delete_executor.rs"]
pub mod delete_executor;

// Ring 6: Post-Database - change log
#[path = "6/change_log.rs"]
pub mod change_log;

// Helper for registering observers (not ring-specific)
pub mod executors;
pub use executors::*;

pub use save_support::*;
pub use data_preparation::*;
pub use field_validation::*;
pub use object_validation::*;
pub use create_executor::*;
pub use update_executor::*;
pub use delete_executor::*;
pub use change_log::*;

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use crate::database::memory::MemoryStore;
    use crate::database::models::student::NewStudent;
    use crate::database::store::StudentStore;
    use crate::observer::{ObserverContext, ObserverError, ObserverPipeline};
    use crate::serializers::{SchemaKind, NON_FIELD_ERRORS};

    fn pipeline() -> ObserverPipeline {
        ObserverPipeline::with_default_observers()
    }

    async fn seeded_store() -> Arc<MemoryStore> {
        let store = Arc::new(MemoryStore::new());
        store
            .insert(NewStudent {
                name: "xiaoming".into(),
                sex: true,
                age: 20,
                class_null: Some("301".into()),
                description: "first".into(),
            })
            .await
            .unwrap();
        store
    }

    #[tokio::test]
    async fn create_stores_validated_fields() {
        let store = Arc::new(MemoryStore::new());
        let ctx = ObserverContext::create(
            SchemaKind::Model.build(),
            store.clone(),
            json!({"name": "xiaohong", "age": 19, "sex": false, "class_null": "302"}),
        );
        let ctx = pipeline().execute(ctx).await.unwrap();
        let created = ctx.result.unwrap();
        assert_eq!(created.name, "xiaohong");
        assert_eq!(created.age, 19);
        assert!(!created.sex);
        assert_eq!(created.class_null.as_deref(), Some("302"));
        assert_eq!(store.get(created.id).await.unwrap(), Some(created));
    }

    #[tokio::test]
    async fn rejected_create_leaves_store_untouched() {
        let store = Arc::new(MemoryStore::new());
        let ctx = ObserverContext::create(SchemaKind::Student5.build(), store.clone(), json!({"name": "alex", "age": 22, "sex": true}));
        let err = pipeline().execute(ctx).await.unwrap_err();
        match err {
            ObserverError::ValidationError(errors) => assert!(errors.contains(NON_FIELD_ERRORS)),
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn update_overwrites_name_age_sex_and_keeps_id() {
        let store = seeded_store().await;
        let ctx = ObserverContext::update(
            SchemaKind::Student3.build(),
            store.clone(),
            1,
            json!({"name": "xiaogang", "age": 30, "sex": false}),
            false,
        );
        let updated = pipeline().execute(ctx).await.unwrap().result.unwrap();
        assert_eq!(updated.id, 1);
        assert_eq!(updated.name, "xiaogang");
        assert_eq!(updated.age, 30);
        assert!(!updated.sex);
        // attributes outside the schema are left alone
        assert_eq!(updated.class_null.as_deref(), Some("301"));
        assert_eq!(updated.description, "first");
    }

    #[tokio::test]
    async fn partial_update_changes_only_given_fields() {
        let store = seeded_store().await;
        let ctx = ObserverContext::update(SchemaKind::Model.build(), store.clone(), 1, json!({"age": 40}), true);
        let updated = pipeline().execute(ctx).await.unwrap().result.unwrap();
        assert_eq!(updated.name, "xiaoming");
        assert_eq!(updated.age, 40);
    }

    #[tokio::test]
    async fn update_of_missing_record_is_not_found() {
        let store = Arc::new(MemoryStore::new());
        let ctx = ObserverContext::update(SchemaKind::Model.build(), store, 42, json!({"name": "xiaoming", "age": 20}), false);
        let err = pipeline().execute(ctx).await.unwrap_err();
        assert!(matches!(err, ObserverError::NotFound(_)));
    }

    #[tokio::test]
    async fn invalid_update_keeps_stored_record() {
        let store = seeded_store().await;
        let before = store.get(1).await.unwrap();
        let ctx = ObserverContext::update(SchemaKind::Model.build(), store.clone(), 1, json!({"name": "root", "age": 20}), false);
        assert!(pipeline().execute(ctx).await.is_err());
        assert_eq!(store.get(1).await.unwrap(), before);
    }

    #[tokio::test]
    async fn plain_schema_cannot_save() {
        let store = Arc::new(MemoryStore::new());
        let ctx = ObserverContext::create(SchemaKind::Plain.build(), store.clone(), json!({}));
        let err = pipeline().execute(ctx).await.unwrap_err();
        assert!(matches!(err, ObserverError::MethodNotAllowed(_)));
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn delete_removes_record() {
        let store = seeded_store().await;
        let ctx = ObserverContext::delete(SchemaKind::Model.build(), store.clone(), 1);
        assert!(pipeline().execute(ctx).await.unwrap().deleted);
        assert!(store.is_empty().await);

        let ctx = ObserverContext::delete(SchemaKind::Model.build(), store, 1);
        assert!(matches!(pipeline().execute(ctx).await.unwrap_err(), ObserverError::NotFound(_)));
    }
}
