use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use crate::database::manager::DatabaseError;
use crate::database::models::student::{NewStudent, Student};
use crate::database::store::StudentStore;

#[derive(Debug, Default)]
struct Inner {
    rows: BTreeMap<i64, Student>,
    last_id: i64,
}

/// In-process record store. Ids start at 1 and are never reused.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl StudentStore for MemoryStore {
    async fn list(&self, limit: Option<i64>, offset: Option<i64>) -> Result<Vec<Student>, DatabaseError> {
        let inner = self.inner.read().await;
        let offset = offset.unwrap_or(0).max(0) as usize;
        let rows = inner.rows.values().skip(offset);
        let students = match limit {
            Some(limit) => rows.take(limit.max(0) as usize).cloned().collect(),
            None => rows.cloned().collect(),
        };
        Ok(students)
    }

    async fn get(&self, id: i64) -> Result<Option<Student>, DatabaseError> {
        Ok(self.inner.read().await.rows.get(&id).cloned())
    }

    async fn insert(&self, new: NewStudent) -> Result<Student, DatabaseError> {
        let mut inner = self.inner.write().await;
        inner.last_id += 1;
        let student = new.into_student(inner.last_id);
        inner.rows.insert(student.id, student.clone());
        Ok(student)
    }

    async fn update(&self, student: &Student) -> Result<Student, DatabaseError> {
        let mut inner = self.inner.write().await;
        match inner.rows.get_mut(&student.id) {
            Some(row) => {
                *row = student.clone();
                Ok(row.clone())
            }
            None => Err(DatabaseError::NotFound(format!("student {}", student.id))),
        }
    }

    async fn delete(&self, id: i64) -> Result<bool, DatabaseError> {
        Ok(self.inner.write().await.rows.remove(&id).is_some())
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_student(name: &str, age: i32) -> NewStudent {
        NewStudent {
            name: name.into(),
            sex: true,
            age,
            class_null: None,
            description: String::new(),
        }
    }

    #[tokio::test]
    async fn insert_assigns_increasing_ids() {
        let store = MemoryStore::new();
        let a = store.insert(new_student("xiaoming", 20)).await.unwrap();
        let b = store.insert(new_student("xiaohong", 21)).await.unwrap();
        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_delete() {
        let store = MemoryStore::new();
        let a = store.insert(new_student("xiaoming", 20)).await.unwrap();
        assert!(store.delete(a.id).await.unwrap());
        assert!(!store.delete(a.id).await.unwrap());
        let b = store.insert(new_student("xiaohong", 21)).await.unwrap();
        assert_eq!(b.id, 2);
    }

    #[tokio::test]
    async fn list_honours_limit_and_offset() {
        let store = MemoryStore::new();
        for name in ["aaaa", "bbbb", "cccc", "dddd"] {
            store.insert(new_student(name, 20)).await.unwrap();
        }
        let page = store.list(Some(2), Some(1)).await.unwrap();
        let names: Vec<_> = page.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["bbbb", "cccc"]);
        assert_eq!(store.list(None, None).await.unwrap().len(), 4);
    }

    #[tokio::test]
    async fn update_missing_row_is_not_found() {
        let store = MemoryStore::new();
        let ghost = new_student("ghost", 30).into_student(99);
        let err = store.update(&ghost).await.unwrap_err();
        assert!(matches!(err, DatabaseError::NotFound(_)));
    }
}
