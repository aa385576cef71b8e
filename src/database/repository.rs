use async_trait::async_trait;
use sqlx::PgPool;

use crate::database::manager::DatabaseError;
use crate::database::models::student::{
    NewStudent, Student, CLASS_NULL_MAX_LENGTH, DESCRIPTION_MAX_LENGTH, NAME_MAX_LENGTH,
};
use crate::database::store::StudentStore;

const TABLE_NAME: &str = "students";

/// Column widths follow the model limits
fn create_table_sql() -> String {
    format!(
        r#"CREATE TABLE IF NOT EXISTS "{}" (
    "id"          BIGSERIAL PRIMARY KEY,
    "name"        VARCHAR({}) NOT NULL,
    "sex"         BOOLEAN NOT NULL DEFAULT TRUE,
    "age"         INTEGER NOT NULL,
    "class_null"  VARCHAR({}),
    "description" VARCHAR({}) NOT NULL DEFAULT ''
)"#,
        TABLE_NAME, NAME_MAX_LENGTH, CLASS_NULL_MAX_LENGTH, DESCRIPTION_MAX_LENGTH
    )
}

const COLUMNS: &str = r#""id", "name", "sex", "age", "class_null", "description""#;

/// PostgreSQL-backed Student record set
pub struct StudentRepository {
    pool: PgPool,
}

impl StudentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create the table when it does not exist yet
    pub async fn ensure_schema(&self) -> Result<(), DatabaseError> {
        sqlx::query(&create_table_sql()).execute(&self.pool).await?;
        tracing::info!("Ensured table \"{}\" exists", TABLE_NAME);
        Ok(())
    }
}

#[async_trait]
impl StudentStore for StudentRepository {
    async fn list(&self, limit: Option<i64>, offset: Option<i64>) -> Result<Vec<Student>, DatabaseError> {
        // LIMIT NULL means no limit in PostgreSQL
        let sql = format!(
            "SELECT {} FROM \"{}\" ORDER BY \"id\" LIMIT $1 OFFSET $2",
            COLUMNS, TABLE_NAME
        );
        let rows = sqlx::query_as::<_, Student>(&sql)
            .bind(limit.map(|l| l.max(0)))
            .bind(offset.unwrap_or(0).max(0))
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn get(&self, id: i64) -> Result<Option<Student>, DatabaseError> {
        let sql = format!("SELECT {} FROM \"{}\" WHERE \"id\" = $1", COLUMNS, TABLE_NAME);
        let row = sqlx::query_as::<_, Student>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn insert(&self, new: NewStudent) -> Result<Student, DatabaseError> {
        let sql = format!(
            "INSERT INTO \"{}\" (\"name\", \"sex\", \"age\", \"class_null\", \"description\") \
             VALUES ($1, $2, $3, $4, $5) RETURNING {}",
            TABLE_NAME, COLUMNS
        );
        let row = sqlx::query_as::<_, Student>(&sql)
            .bind(&new.name)
            .bind(new.sex)
            .bind(new.age)
            .bind(&new.class_null)
            .bind(&new.description)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn update(&self, student: &Student) -> Result<Student, DatabaseError> {
        let sql = format!(
            "UPDATE \"{}\" SET \"name\" = $2, \"sex\" = $3, \"age\" = $4, \"class_null\" = $5, \"description\" = $6 \
             WHERE \"id\" = $1 RETURNING {}",
            TABLE_NAME, COLUMNS
        );
        sqlx::query_as::<_, Student>(&sql)
            .bind(student.id)
            .bind(&student.name)
            .bind(student.sex)
            .bind(student.age)
            .bind(&student.class_null)
            .bind(&student.description)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("student {}", student.id)))
    }

    async fn delete(&self, id: i64) -> Result<bool, DatabaseError> {
        let sql = format!("DELETE FROM \"{}\" WHERE \"id\" = $1", TABLE_NAME);
        let result = sqlx::query(&sql).bind(id).execute(&self.pool).await?;
        Ok(result.rows_affected() > 0)
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "postgres"
    }
}
