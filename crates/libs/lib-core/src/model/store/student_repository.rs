//! # Student Repository
//!
//! SQL access for the `students` table. Every statement is parameterized.
//!
//! ## Example
//!
//! ```rust,no_run
//! # use lib_core::model::store::{create_pool, StudentFields, StudentRepository};
//! # async fn example() -> lib_core::Result<()> {
//! let pool = create_pool("sqlite::memory:").await?;
//!
//! let id = StudentRepository::create(&pool, &StudentFields::new("Ada", "ada@x.com", 30)).await?;
//! let student = StudentRepository::get(&pool, id).await?;
//! assert_eq!(student.name, "Ada");
//! # Ok(())
//! # }
//! ```

use super::models::{DeleteOutcome, Student, StudentFields, UpdateOutcome};
use super::DbPool;
use crate::error::{AppError, Result};
use sqlx::query_as;

pub struct StudentRepository;

impl StudentRepository {
    /// Insert a student and return the id SQLite assigned.
    ///
    /// A failed insert is returned as an error, never as a zero id.
    pub async fn create(pool: &DbPool, fields: &StudentFields) -> Result<i64> {
        let result = sqlx::query("INSERT INTO students (name, email, age) VALUES (?, ?, ?)")
            .bind(&fields.name)
            .bind(&fields.email)
            .bind(fields.age)
            .execute(pool)
            .await?;

        Ok(result.last_insert_rowid())
    }

    /// Find a student by id.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(Student))` - Student found
    /// * `Ok(None)` - No student with that id
    /// * `Err(AppError::Storage)` - Database error occurred
    pub async fn find_by_id(pool: &DbPool, id: i64) -> Result<Option<Student>> {
        let student = query_as::<_, Student>("SELECT id, name, email, age FROM students WHERE id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await?;

        Ok(student)
    }

    /// Fetch a student by id, failing with `AppError::NotFound` if absent.
    pub async fn get(pool: &DbPool, id: i64) -> Result<Student> {
        Self::find_by_id(pool, id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("no student found with id {id}")))
    }

    pub async fn list(pool: &DbPool) -> Result<Vec<Student>> {
        let students = query_as::<_, Student>("SELECT id, name, email, age FROM students ORDER BY id")
            .fetch_all(pool)
            .await?;

        Ok(students)
    }

    /// Delete a student by id.
    ///
    /// Deleting an id that does not exist yields [`DeleteOutcome::NotFound`].
    pub async fn delete(pool: &DbPool, id: i64) -> Result<DeleteOutcome> {
        let result = sqlx::query("DELETE FROM students WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;

        if result.rows_affected() == 0 {
            Ok(DeleteOutcome::NotFound)
        } else {
            Ok(DeleteOutcome::Deleted)
        }
    }

    /// Replace name, email and age of a student.
    ///
    /// Check-then-write: the existence check and the update run as two
    /// statements outside a transaction. Two concurrent updates of one id can
    /// interleave and lose one of the writes, and a delete landing between
    /// the steps turns the result into [`UpdateOutcome::NoChange`].
    pub async fn update(pool: &DbPool, id: i64, fields: &StudentFields) -> Result<UpdateOutcome> {
        let Some(existing) = Self::find_by_id(pool, id).await? else {
            return Ok(UpdateOutcome::NotFound);
        };

        let result = sqlx::query("UPDATE students SET name = ?, email = ?, age = ? WHERE id = ?")
            .bind(&fields.name)
            .bind(&fields.email)
            .bind(fields.age)
            .bind(id)
            .execute(pool)
            .await?;

        if result.rows_affected() == 0 {
            return Ok(UpdateOutcome::NoChange(existing));
        }

        Ok(UpdateOutcome::Updated(fields.clone().into_student(id)))
    }
}
