//! PostgreSQL student repository implementation

use std::time::Duration;

use async_trait::async_trait;
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions, PgRow};
use sqlx::Row;
use tracing::info;

use crate::domain::{CourseStats, DomainError, NewStudent, Student, StudentRepository, StudentUpdate};

/// Connection settings for the student database
#[derive(Debug, Clone)]
pub struct PostgresConfig {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub user: String,
    pub password: String,
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
}

impl Default for PostgresConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 5432,
            database: "students".to_string(),
            user: "postgres".to_string(),
            password: String::new(),
            max_connections: 5,
            acquire_timeout_secs: 5,
        }
    }
}

impl PostgresConfig {
    fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .database(&self.database)
            .username(&self.user)
            .password(&self.password)
    }
}

/// PostgreSQL implementation of StudentRepository over the `students` table
#[derive(Debug, Clone)]
pub struct PostgresStudentRepository {
    pool: PgPool,
}

impl PostgresStudentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates a pool that connects on first use, so startup does not depend
    /// on the database being up
    pub fn connect_lazy(config: &PostgresConfig) -> Self {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
            .connect_lazy_with(config.connect_options());

        Self::new(pool)
    }

    /// Creates the `students` table if it does not exist
    pub async fn ensure_table(&self) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS students (
                user_id SERIAL PRIMARY KEY,
                name VARCHAR(255) NOT NULL,
                age INTEGER NOT NULL,
                course VARCHAR(255) NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to create students table", e))?;

        info!("Ensured students table exists");
        Ok(())
    }
}

fn db_error(context: &str, error: sqlx::Error) -> DomainError {
    match error {
        sqlx::Error::Database(e) => DomainError::internal(format!("{}: {}", context, e)),
        other => DomainError::unavailable("postgres", format!("{}: {}", context, other)),
    }
}

fn row_to_student(row: &PgRow) -> Result<Student, DomainError> {
    let get_err = |e: sqlx::Error| DomainError::internal(format!("Failed to read student row: {}", e));

    Ok(Student {
        user_id: row.try_get("user_id").map_err(get_err)?,
        name: row.try_get("name").map_err(get_err)?,
        age: row.try_get("age").map_err(get_err)?,
        course: row.try_get("course").map_err(get_err)?,
    })
}

fn escape_like(pattern: &str) -> String {
    pattern
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

#[async_trait]
impl StudentRepository for PostgresStudentRepository {
    async fn count(&self, course: Option<&str>) -> Result<i64, DomainError> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM students WHERE ($1::text IS NULL OR LOWER(course) = LOWER($1))",
        )
        .bind(course)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("Failed to count students", e))
    }

    async fn list(
        &self,
        course: Option<&str>,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<Student>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT user_id, name, age, course
            FROM students
            WHERE ($1::text IS NULL OR LOWER(course) = LOWER($1))
            ORDER BY user_id
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(course)
        .bind(limit as i64)
        .bind(offset as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to list students", e))?;

        rows.iter().map(row_to_student).collect()
    }

    async fn get(&self, user_id: i32) -> Result<Option<Student>, DomainError> {
        let row = sqlx::query("SELECT user_id, name, age, course FROM students WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to get student", e))?;

        row.as_ref().map(row_to_student).transpose()
    }

    async fn search_by_name(&self, name: &str) -> Result<Vec<Student>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT user_id, name, age, course
            FROM students
            WHERE name ILIKE $1
            ORDER BY user_id
            "#,
        )
        .bind(format!("%{}%", escape_like(name.trim())))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to search students", e))?;

        rows.iter().map(row_to_student).collect()
    }

    async fn average_age(&self, course: Option<&str>) -> Result<Option<f64>, DomainError> {
        sqlx::query_scalar(
            "SELECT AVG(age)::float8 FROM students WHERE ($1::text IS NULL OR LOWER(course) = LOWER($1))",
        )
        .bind(course)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("Failed to compute average age", e))
    }

    async fn course_statistics(&self) -> Result<Vec<CourseStats>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT course, COUNT(*) AS student_count, AVG(age)::float8 AS average_age
            FROM students
            GROUP BY course
            ORDER BY course
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to compute course statistics", e))?;

        rows.iter()
            .map(|row| {
                let get_err =
                    |e: sqlx::Error| DomainError::internal(format!("Failed to read stats row: {}", e));

                Ok(CourseStats {
                    course: row.try_get("course").map_err(get_err)?,
                    student_count: row.try_get("student_count").map_err(get_err)?,
                    average_age: row.try_get("average_age").map_err(get_err)?,
                })
            })
            .collect()
    }

    async fn create(&self, student: NewStudent) -> Result<Student, DomainError> {
        let row = sqlx::query(
            r#"
            INSERT INTO students (name, age, course)
            VALUES ($1, $2, $3)
            RETURNING user_id, name, age, course
            "#,
        )
        .bind(&student.name)
        .bind(student.age)
        .bind(&student.course)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("Failed to create student", e))?;

        row_to_student(&row)
    }

    async fn update(
        &self,
        user_id: i32,
        update: StudentUpdate,
    ) -> Result<Option<Student>, DomainError> {
        let row = sqlx::query(
            r#"
            UPDATE students
            SET name = COALESCE($2, name),
                age = COALESCE($3, age),
                course = COALESCE($4, course)
            WHERE user_id = $1
            RETURNING user_id, name, age, course
            "#,
        )
        .bind(user_id)
        .bind(update.name)
        .bind(update.age)
        .bind(update.course)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to update student", e))?;

        row.as_ref().map(row_to_student).transpose()
    }

    async fn delete(&self, user_id: i32) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM students WHERE user_id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to delete student", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn health_check(&self) -> Result<(), DomainError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Database health check failed", e))?;

        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "postgres"
    }
}
